//! Generates overflow-safe C unit-conversion libraries.
//!
//! This crate re-exports the derivation and synthesis machinery of `unitconv-core` and adds what a generation run
//! needs around it: TOML configuration ([`GeneratorConfig`]), assembly of functions into per-category headers and
//! sources ([`generate_category`], [`generate_relations`]), and the [`Generator`] driver used by the
//! `unitconv-gen` binary.
//!
//! # Quick start
//!
//! ```rust
//! use unitconv::{Generator, GeneratorConfig};
//!
//! let outputs = Generator::new(GeneratorConfig::default()).generate().unwrap();
//! let distance = outputs.iter().find(|output| output.name == "distance").unwrap();
//! assert!(distance.header.contains("mm_t_to_cm_t"));
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod generator;

pub use config::{CodegenSettings, CompositeSettings, GeneratorConfig, NumericSettings, OutputSettings};
pub use error::{GeneratorError, GeneratorResult};
pub use generator::{generate_category, generate_relations, CategoryOutput, Generator, Manifest};

pub use unitconv_core::*;
