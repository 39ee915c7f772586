//! Generator configuration file support.
//!
//! Configuration is read from a TOML file. Every section is optional:
//!
//! ```toml
//! [output]
//! directory = "generated"
//! guard_prefix = "UNITCONV"
//! manifest = true
//!
//! [codegen]
//! branch_hints = true
//! sign_classes = ["truncating", "unsigned", "float", "double"]
//!
//! [numeric.time]
//! truncating = "int32"
//!
//! [[composite]]
//! name = "jerk"
//! base = "distance / time ^ 3"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use unitconv_core::{Catalog, CodegenOptions, CompositeCategory, NumericBindings, NumericType, SignClass};

use crate::error::{GeneratorError, GeneratorResult};

/// Generator configuration from file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub codegen: CodegenSettings,
    /// Per-category narrowing of the sign classes' numeric kinds.
    #[serde(default)]
    pub numeric: BTreeMap<String, NumericSettings>,
    /// Extra composite categories.
    #[serde(default)]
    pub composite: Vec<CompositeSettings>,
}

/// Where and how files are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_guard_prefix")]
    pub guard_prefix: String,
    /// Write `manifest.json` next to the sources.
    #[serde(default = "default_true")]
    pub manifest: bool,
}

/// Code-generation switches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodegenSettings {
    #[serde(default = "default_true")]
    pub branch_hints: bool,
    #[serde(default = "default_sign_classes")]
    pub sign_classes: Vec<SignClass>,
}

/// Numeric kinds bound to each sign class of one category. Unset classes keep their default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericSettings {
    pub truncating: Option<NumericType>,
    pub unsigned: Option<NumericType>,
    pub float: Option<NumericType>,
    pub double: Option<NumericType>,
}

/// A composite category declared by a base expression over leaf category names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeSettings {
    pub name: String,
    pub base: String,
}

fn default_directory() -> PathBuf {
    PathBuf::from("generated")
}

fn default_guard_prefix() -> String {
    "UNITCONV".to_string()
}

fn default_true() -> bool {
    true
}

fn default_sign_classes() -> Vec<SignClass> {
    SignClass::ALL.to_vec()
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            guard_prefix: default_guard_prefix(),
            manifest: true,
        }
    }
}

impl Default for CodegenSettings {
    fn default() -> Self {
        Self {
            branch_hints: true,
            sign_classes: default_sign_classes(),
        }
    }
}

impl NumericSettings {
    fn bindings(&self) -> impl Iterator<Item = (SignClass, NumericType)> + '_ {
        [
            (SignClass::Truncating, self.truncating),
            (SignClass::Unsigned, self.unsigned),
            (SignClass::Float, self.float),
            (SignClass::Double, self.double),
        ]
        .into_iter()
        .filter_map(|(sign, numeric)| numeric.map(|numeric| (sign, numeric)))
    }
}

impl GeneratorConfig {
    /// Load generator configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> GeneratorResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(GeneratorError::io(path.as_ref()))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> GeneratorResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load generator configuration from the default location.
    ///
    /// Searches for `unitconv.toml` in:
    /// 1. Current directory
    /// 2. `config/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> GeneratorResult<Self> {
        let search_paths = [
            PathBuf::from("unitconv.toml"),
            PathBuf::from("config/unitconv.toml"),
            PathBuf::from("../unitconv.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                log::info!("loading configuration from {}", path.display());
                return Self::from_file(&path);
            }
        }

        Err(GeneratorError::ConfigNotFound)
    }

    /// The built-in catalog extended with the configured composites.
    pub fn catalog(&self) -> GeneratorResult<Catalog> {
        let mut catalog = Catalog::builtin()?;
        for composite in &self.composite {
            catalog.add_category(CompositeCategory::parse(composite.name.as_str(), &composite.base)?);
        }
        Ok(catalog)
    }

    /// Code-generation options for `catalog`. Fails on bindings for unknown categories or outside their class.
    pub fn codegen_options(&self, catalog: &Catalog) -> GeneratorResult<CodegenOptions> {
        let mut bindings = NumericBindings::new();
        for (category, settings) in &self.numeric {
            if catalog.category(category).is_none() {
                return Err(GeneratorError::UnknownCategory(category.clone()));
            }
            for (sign, numeric) in settings.bindings() {
                bindings.bind(category, sign, numeric)?;
            }
        }
        Ok(CodegenOptions {
            branch_hints: self.codegen.branch_hints,
            bindings,
        })
    }
}
