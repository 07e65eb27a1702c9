//! Code Generation Benchmarks
//!
//! Measures end-to-end generation of synthetic bundles, with a single worker
//! and with the default worker count.
//!
//! # Bundle Shape
//!
//! Each component carries one field of every multiplicity, a nested record, an
//! event and a command, so every emitter path runs once per component.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use schemabind_codegen::generate_files;
use schemabind_core::{
    Bundle, BundleDefinition, CommandDefinition, EventDefinition, FieldDescription, FieldKind,
    GeneratorConfig, PrimitiveType, TypeDescription, ValueType,
};
use std::hint::black_box;

// ============================================================================
// Bundle Construction
// ============================================================================

fn synthetic_bundle(components: usize) -> Bundle {
    let mut types = Vec::with_capacity(components * 2);

    for i in 0..components {
        let name = format!("bench.module{}.Component{i}", i % 8);
        let nested = format!("{name}.Payload");

        let payload = TypeDescription::record(&nested)
            .with_field(FieldDescription::new(
                "amount",
                1,
                FieldKind::Singular {
                    value: ValueType::Primitive(PrimitiveType::Int64),
                },
            ))
            .with_field(FieldDescription::new(
                "label",
                2,
                FieldKind::Option {
                    value: ValueType::Primitive(PrimitiveType::String),
                },
            ));

        let component = TypeDescription::component(&name, 1000 + i as u32)
            .with_nested_type(&nested)
            .with_field(FieldDescription::new(
                "position",
                1,
                FieldKind::Singular {
                    value: ValueType::Type(nested.clone()),
                },
            ))
            .with_field(FieldDescription::new(
                "tags",
                2,
                FieldKind::List {
                    value: ValueType::Primitive(PrimitiveType::String),
                },
            ))
            .with_field(FieldDescription::new(
                "owners",
                3,
                FieldKind::Map {
                    key: ValueType::Primitive(PrimitiveType::EntityId),
                    value: ValueType::Type(nested.clone()),
                },
            ))
            .with_event(EventDefinition {
                name: "changed".into(),
                index: 1,
                payload: nested.clone(),
            })
            .with_command(CommandDefinition {
                name: "reset".into(),
                index: 1,
                request: nested.clone(),
                response: nested,
            });

        types.push(component);
        types.push(payload);
    }

    Bundle::new(BundleDefinition {
        types,
        ..Default::default()
    })
    .expect("synthetic bundle is valid")
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_bundle");

    for components in [1usize, 32, 256] {
        let bundle = synthetic_bundle(components);
        group.throughput(Throughput::Elements(components as u64));

        let single = GeneratorConfig {
            jobs: Some(1),
            ..Default::default()
        };
        group.bench_with_input(
            BenchmarkId::new("single_worker", components),
            &bundle,
            |b, bundle| b.iter(|| generate_files(black_box(bundle), &single)),
        );

        let parallel = GeneratorConfig::default();
        group.bench_with_input(
            BenchmarkId::new("default_workers", components),
            &bundle,
            |b, bundle| b.iter(|| generate_files(black_box(bundle), &parallel)),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
