//! Assembles generated functions into C headers, sources and a manifest.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use unitconv_core::{Catalog, Category, CodegenOptions, ConversionFunction, GeneratedFunction, Relation, SignClass};

use crate::config::GeneratorConfig;
use crate::error::{GeneratorError, GeneratorResult};

const BANNER: &str = "/* Generated by unitconv-gen. Do not edit. */";

/// One header/source pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOutput {
    pub name: String,
    pub header: String,
    pub source: String,
    pub functions: Vec<GeneratedFunction>,
}

impl CategoryOutput {
    pub fn header_file(&self) -> String {
        format!("{}.h", self.name)
    }

    pub fn source_file(&self) -> String {
        format!("{}.c", self.name)
    }
}

/// `manifest.json` contents.
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub generator: String,
    pub outputs: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ManifestEntry {
    pub name: String,
    pub header: String,
    pub source: String,
    pub functions: Vec<ManifestFunction>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ManifestFunction {
    pub name: String,
    pub comment: String,
    pub signature: String,
}

impl Manifest {
    pub fn new(outputs: &[CategoryOutput]) -> Self {
        Self {
            generator: format!("unitconv {}", env!("CARGO_PKG_VERSION")),
            outputs: outputs
                .iter()
                .map(|output| ManifestEntry {
                    name: output.name.clone(),
                    header: output.header_file(),
                    source: output.source_file(),
                    functions: output
                        .functions
                        .iter()
                        .map(|function| ManifestFunction {
                            name: function.name.clone(),
                            comment: function.comment.clone(),
                            signature: function.signature.clone(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Text assembly
// ─────────────────────────────────────────────────────────────────────────────

fn guard(prefix: &str, name: &str) -> String {
    format!("{}_{}_H", prefix, name.to_uppercase())
}

fn header(prefix: &str, name: &str, preamble: &[String], functions: &[GeneratedFunction]) -> String {
    let guard = guard(prefix, name);
    let mut text = format!("{BANNER}\n#ifndef {guard}\n#define {guard}\n\n");
    for line in preamble {
        text.push_str(line);
        text.push('\n');
    }
    text.push('\n');
    for function in functions {
        text.push_str(&function.declaration());
        text.push('\n');
    }
    text.push_str(&format!("\n#endif /* {guard} */\n"));
    text
}

fn source(name: &str, functions: &[GeneratedFunction]) -> String {
    let mut text = format!("{BANNER}\n#include \"{name}.h\"\n");
    for function in functions {
        text.push('\n');
        text.push_str(&function.definition());
    }
    text
}

fn implementations(
    function: &ConversionFunction,
    sign_classes: &[SignClass],
    options: &CodegenOptions,
    skip_identity: bool,
) -> Vec<GeneratedFunction> {
    let mut generated = Vec::new();
    for &a in sign_classes {
        for &b in sign_classes {
            if skip_identity && a == b && function.source() == function.target() {
                continue;
            }
            generated.push(function.implementation(a, b, options));
        }
    }
    generated
}

/// Header and source for one category: typedefs per unit and sign class, then every conversion between its units.
pub fn generate_category(
    category: &Category,
    sign_classes: &[SignClass],
    options: &CodegenOptions,
    guard_prefix: &str,
) -> GeneratorResult<CategoryOutput> {
    let name = category.name().to_string();
    let mut preamble = vec![
        "#include <float.h>".to_string(),
        "#include <math.h>".to_string(),
        "#include <stdint.h>".to_string(),
        String::new(),
    ];
    for unit in category.units() {
        for &sign in sign_classes {
            let numeric = options.bindings.numeric_type(&name, sign);
            preamble.push(format!("typedef {} {}_{};", numeric.c_type(), unit.abbreviation(), sign));
        }
    }

    let mut functions = Vec::new();
    for function in category.functions()? {
        functions.extend(implementations(&function, sign_classes, options, true));
    }
    log::debug!("category `{}`: {} functions", name, functions.len());

    Ok(CategoryOutput {
        header: header(guard_prefix, &name, &preamble, &functions),
        source: source(&name, &functions),
        name,
        functions,
    })
}

/// Header and source for the derived relations. The header includes the headers of every category involved.
pub fn generate_relations(
    relations: &[Relation],
    sign_classes: &[SignClass],
    options: &CodegenOptions,
    guard_prefix: &str,
) -> CategoryOutput {
    let name = "relations".to_string();
    let categories: BTreeSet<String> = relations
        .iter()
        .flat_map(|relation| [relation.source(), relation.target()])
        .map(|unit| unit.category().to_string())
        .collect();
    let preamble: Vec<String> = categories
        .iter()
        .map(|category| format!("#include \"{category}.h\""))
        .collect();

    let functions: Vec<GeneratedFunction> = relations
        .iter()
        .flat_map(|relation| implementations(&relation.function(), sign_classes, options, false))
        .collect();

    CategoryOutput {
        header: header(guard_prefix, &name, &preamble, &functions),
        source: source(&name, &functions),
        name,
        functions,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Driver
// ─────────────────────────────────────────────────────────────────────────────

/// Runs a whole generation pass for one configuration.
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Builds and validates the catalog, then renders every category and the relations in memory.
    pub fn generate(&self) -> GeneratorResult<Vec<CategoryOutput>> {
        let catalog: Catalog = self.config.catalog()?;
        catalog.validate()?;
        let options = self.config.codegen_options(&catalog)?;
        let sign_classes = &self.config.codegen.sign_classes;
        let prefix = &self.config.output.guard_prefix;

        let mut outputs = Vec::with_capacity(catalog.categories().len() + 1);
        for category in catalog.categories() {
            outputs.push(generate_category(category, sign_classes, &options, prefix)?);
        }
        let relations = catalog.derived_relations()?;
        if !relations.is_empty() {
            outputs.push(generate_relations(&relations, sign_classes, &options, prefix));
        }
        Ok(outputs)
    }

    /// [`Generator::generate`], then writes `<name>.h`, `<name>.c` and (unless disabled) `manifest.json` into the
    /// output directory. Returns the written paths.
    pub fn run(&self) -> GeneratorResult<Vec<PathBuf>> {
        let outputs = self.generate()?;
        let directory = &self.config.output.directory;
        fs::create_dir_all(directory).map_err(GeneratorError::io(directory))?;

        let mut written = Vec::with_capacity(outputs.len() * 2 + 1);
        for output in &outputs {
            written.push(write(directory, &output.header_file(), &output.header)?);
            written.push(write(directory, &output.source_file(), &output.source)?);
        }
        if self.config.output.manifest {
            let manifest = serde_json::to_string_pretty(&Manifest::new(&outputs))?;
            written.push(write(directory, "manifest.json", &manifest)?);
        }

        let functions: usize = outputs.iter().map(|output| output.functions.len()).sum();
        log::info!(
            "wrote {} functions in {} files to {}",
            functions,
            written.len(),
            directory.display()
        );
        Ok(written)
    }
}

fn write(directory: &Path, file: &str, contents: &str) -> GeneratorResult<PathBuf> {
    let path = directory.join(file);
    fs::write(&path, contents).map_err(GeneratorError::io(&path))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use unitconv_core::units::{self, DistanceUnits};

    fn signs() -> Vec<SignClass> {
        SignClass::ALL.to_vec()
    }

    #[test]
    fn category_header_layout() {
        let distance = Category::new(DistanceUnits::Metres);
        let output = generate_category(&distance, &signs(), &CodegenOptions::default(), "UNITCONV").unwrap();
        assert_eq!(output.name, "distance");
        // 25 ordered pairs × 16 sign pairs, minus the 5 × 4 identical ones
        assert_eq!(output.functions.len(), 25 * 16 - 20);
        assert!(output.header.starts_with(BANNER));
        assert!(output.header.contains("#ifndef UNITCONV_DISTANCE_H\n#define UNITCONV_DISTANCE_H"));
        assert!(output.header.contains("typedef int64_t mm_t;"));
        assert!(output.header.contains("typedef uint64_t km_u;"));
        assert!(output.header.contains("typedef float um_f;"));
        assert!(output.header.contains("cm_u mm_t_to_cm_u(mm_t mm);"));
        assert!(!output.header.contains("m_t m_t_to_m_t("));
        assert!(output.header.contains("m_u m_t_to_m_u(m_t m);"));
        assert!(output.header.ends_with("#endif /* UNITCONV_DISTANCE_H */\n"));
        assert!(output.source.contains("#include \"distance.h\""));
        assert!(output.source.contains("/* Converts millimetres (truncating) to centimetres (unsigned). */"));
    }

    #[test]
    fn bindings_narrow_the_typedefs() {
        let mut options = CodegenOptions::default();
        options
            .bindings
            .bind("distance", SignClass::Truncating, unitconv_core::NumericType::Int16)
            .unwrap();
        let distance = Category::new(DistanceUnits::Metres);
        let output = generate_category(&distance, &[SignClass::Truncating], &options, "X").unwrap();
        assert!(output.header.contains("typedef int16_t mm_t;"));
        assert_eq!(output.functions.len(), 20);
    }

    #[test]
    fn relations_include_their_categories() {
        let catalog = Catalog::builtin().unwrap();
        let relations = catalog.derived_relations().unwrap();
        let output = generate_relations(&relations, &signs(), &CodegenOptions::default(), "UNITCONV");
        assert_eq!(output.functions.len(), 30 * 16);
        assert!(output.header.contains("#include \"acceleration.h\"\n#include \"reference_acceleration.h\""));
        assert!(output.header.contains("mps2_t earthG_t_to_mps2_t(earthG_t earthG);"));
    }

    #[test]
    fn manifest_lists_every_function() {
        let velocity = Category::from(units::velocity());
        let output = generate_category(&velocity, &[SignClass::Double], &CodegenOptions::default(), "U").unwrap();
        let manifest = Manifest::new(std::slice::from_ref(&output));
        assert_eq!(manifest.outputs[0].header, "velocity.h");
        assert_eq!(manifest.outputs[0].functions.len(), 15 * 15 - 15);
        let json = serde_json::to_value(&manifest).unwrap();
        assert_eq!(json["outputs"][0]["functions"][0]["name"], "um_per_us_d_to_um_per_ms_d");
    }
}
