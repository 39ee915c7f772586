//! unitconv-gen
//!
//! Writes the C conversion library for the built-in catalog plus whatever the configuration adds.
//!
//! # Usage
//!
//! ```bash
//! # Defaults, or ./unitconv.toml when present
//! cargo run --bin unitconv-gen
//!
//! # Explicit configuration and output directory
//! UNITCONV_CONFIG=unitconv.toml UNITCONV_OUT=build/generated cargo run --bin unitconv-gen
//! ```
//!
//! # Environment Variables
//!
//! - `UNITCONV_CONFIG`: configuration file (default: search `unitconv.toml` in standard locations)
//! - `UNITCONV_OUT`: output directory, overriding `[output] directory`
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::path::PathBuf;

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use unitconv::{Generator, GeneratorConfig, GeneratorError};

fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    let mut config = match env::var("UNITCONV_CONFIG") {
        Ok(path) => GeneratorConfig::from_file(&path)?,
        Err(_) => match GeneratorConfig::from_default_location() {
            Ok(config) => config,
            Err(GeneratorError::ConfigNotFound) => {
                warn!("no unitconv.toml found, using defaults");
                GeneratorConfig::default()
            }
            Err(e) => return Err(e.into()),
        },
    };
    if let Ok(directory) = env::var("UNITCONV_OUT") {
        config.output.directory = PathBuf::from(directory);
    }

    info!("Generating into {}", config.output.directory.display());
    let written = Generator::new(config).run()?;
    info!("Done: {} files", written.len());

    Ok(())
}
