use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use unitconv::units::DistanceUnits;
use unitconv::{generate_category, Catalog, Category, CodegenOptions, Generator, GeneratorConfig, SignClass};

fn bench_catalog(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog");

    group.bench_function("validate_builtin", |b| {
        b.iter(|| {
            let catalog = Catalog::builtin().unwrap();
            black_box(catalog.validate().unwrap());
        });
    });

    group.bench_function("derive_relations", |b| {
        let catalog = Catalog::builtin().unwrap();
        b.iter(|| black_box(catalog.derived_relations().unwrap()));
    });

    group.finish();
}

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation");
    let options = CodegenOptions::default();

    group.bench_function("distance_category", |b| {
        let distance = Category::new(DistanceUnits::Metres);
        b.iter(|| black_box(generate_category(&distance, &SignClass::ALL, &options, "UNITCONV").unwrap()));
    });

    group.bench_function("full_catalog", |b| {
        let generator = Generator::new(GeneratorConfig::default());
        b.iter(|| black_box(generator.generate().unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_catalog, bench_generation);
criterion_main!(benches);
