use std::fs;

use tempfile::TempDir;
use unitconv::{Generator, GeneratorConfig, GeneratorError, SignClass};

fn config_into(dir: &TempDir) -> GeneratorConfig {
    let mut config = GeneratorConfig::default();
    config.output.directory = dir.path().join("out");
    config
}

#[test]
fn run_writes_every_category_and_the_manifest() {
    let dir = TempDir::new().unwrap();
    let written = Generator::new(config_into(&dir)).run().unwrap();

    // 9 categories + relations, header and source each, plus the manifest
    assert_eq!(written.len(), 10 * 2 + 1);
    let out = dir.path().join("out");
    for name in ["distance", "temperature", "acceleration", "relations"] {
        assert!(out.join(format!("{name}.h")).is_file(), "{name}.h");
        assert!(out.join(format!("{name}.c")).is_file(), "{name}.c");
    }

    let temperature = fs::read_to_string(out.join("temperature.c")).unwrap();
    assert!(temperature.contains("fahrenheit_t celsius_t_to_fahrenheit_t(celsius_t celsius)"));
    // 64-bit celsius inputs overflow `* 9` before the result leaves the range, so the shape runs in double
    assert!(temperature.contains("celsius_w * 9.0 / 5.0 + 32.0"));

    let manifest = fs::read_to_string(out.join("manifest.json")).unwrap();
    let manifest: serde_json::Value = serde_json::from_str(&manifest).unwrap();
    let names: Vec<&str> = manifest["outputs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.last(), Some(&"relations"));
    assert!(names.contains(&"angular_velocity"));
}

#[test]
fn configuration_shapes_the_output() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("unitconv.toml");
    fs::write(
        &path,
        format!(
            r#"
            [output]
            directory = "{}"
            guard_prefix = "ACME"
            manifest = false

            [codegen]
            branch_hints = false
            sign_classes = ["unsigned"]

            [numeric.mass]
            unsigned = "uint16"

            [[composite]]
            name = "jerk"
            base = "distance / time ^ 3"
            "#,
            dir.path().join("gen").display()
        ),
    )
    .unwrap();

    let config = GeneratorConfig::from_file(&path).unwrap();
    assert_eq!(config.codegen.sign_classes, vec![SignClass::Unsigned]);
    Generator::new(config).run().unwrap();

    let gen = dir.path().join("gen");
    assert!(!gen.join("manifest.json").exists());
    let jerk = fs::read_to_string(gen.join("jerk.h")).unwrap();
    assert!(jerk.contains("#ifndef ACME_JERK_H"));
    assert!(jerk.contains("um_per_us_cub_u um_per_ms_cub_u_to_um_per_us_cub_u(um_per_ms_cub_u um_per_ms_cub);"));

    let mass = fs::read_to_string(gen.join("mass.h")).unwrap();
    assert!(mass.contains("typedef uint16_t kg_u;"));
    assert!(!mass.contains("_t;"));
    let source = fs::read_to_string(gen.join("mass.c")).unwrap();
    assert!(!source.contains("__builtin_expect"));
}

#[test]
fn missing_config_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let result = GeneratorConfig::from_file(dir.path().join("absent.toml"));
    assert!(matches!(result, Err(GeneratorError::Io { .. })));
}

#[test]
fn invalid_configuration_aborts_before_writing() {
    let dir = TempDir::new().unwrap();
    let mut config = config_into(&dir);
    config.composite.push(unitconv::CompositeSettings {
        name: "heating".to_string(),
        base: "temperature / time".to_string(),
    });
    assert!(matches!(
        Generator::new(config).run(),
        Err(GeneratorError::Generation(unitconv::GenerationError::NonScalableComposite { .. }))
    ));
    assert!(!dir.path().join("out").exists());
}
