//! Reference Codec Benchmarks
//!
//! Measures encoding and decoding of records through the in-memory schema
//! object, and component update encoding, for growing list and map sizes.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use schemabind_core::{
    Bundle, BundleDefinition, FieldDescription, FieldKind, PrimitiveType, TypeDescription, ValueType,
};
use schemabind_runtime::{
    ComponentUpdateValue, FieldValue, Record, SchemaObject, Value, decode_record, encode_record,
};
use std::hint::black_box;

// ============================================================================
// Fixtures
// ============================================================================

fn bench_bundle() -> Bundle {
    Bundle::new(BundleDefinition {
        types: vec![
            TypeDescription::component("bench.Chunk", 500)
                .with_field(FieldDescription::new(
                    "heights",
                    1,
                    FieldKind::List {
                        value: ValueType::Primitive(PrimitiveType::Int32),
                    },
                ))
                .with_field(FieldDescription::new(
                    "owners",
                    2,
                    FieldKind::Map {
                        key: ValueType::Primitive(PrimitiveType::EntityId),
                        value: ValueType::Primitive(PrimitiveType::String),
                    },
                )),
        ],
        ..Default::default()
    })
    .expect("bench bundle is valid")
}

fn chunk(size: usize) -> Record {
    Record::new("bench.Chunk")
        .with_field(
            "heights",
            1,
            FieldValue::List((0..size).map(|i| Value::Int32(i as i32)).collect()),
        )
        .with_field(
            "owners",
            2,
            FieldValue::Map(
                (0..size)
                    .map(|i| (Value::EntityId(i as i64), Value::String(format!("worker-{i}"))))
                    .collect(),
            ),
        )
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_record(c: &mut Criterion) {
    let bundle = bench_bundle();
    let mut group = c.benchmark_group("record");

    for size in [16usize, 256, 1024] {
        let record = chunk(size);
        let mut encoded = SchemaObject::new();
        encode_record(&record, &mut encoded);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("encode", size), &record, |b, record| {
            b.iter(|| {
                let mut object = SchemaObject::new();
                encode_record(black_box(record), &mut object);
                object
            })
        });

        group.bench_with_input(BenchmarkId::new("decode", size), &encoded, |b, object| {
            b.iter(|| decode_record(&bundle, "bench.Chunk", black_box(object)))
        });
    }

    group.finish();
}

fn bench_update(c: &mut Criterion) {
    let bundle = bench_bundle();
    let mut group = c.benchmark_group("update");

    for size in [16usize, 256] {
        let update = ComponentUpdateValue::from_initial_data(&bundle, &chunk(size))
            .expect("chunk converts to an update");
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("encode", size), &update, |b, update| {
            b.iter(|| black_box(update).encode())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_record, bench_update);
criterion_main!(benches);
