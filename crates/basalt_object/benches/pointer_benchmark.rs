//! # Pointer Performance Benchmark
//!
//! The attach/detach path sits under every handle copy in the engine, so
//! it has to stay a counter bump plus a branch.
//!
//! Run with: `cargo bench --package basalt_object`

// Benchmarks don't need docs and may have intentionally unused code
#![allow(missing_docs)]
#![allow(dead_code)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use basalt_object::{managed_object, AllocationTable, ObjectCore, Pointer};

#[derive(Default)]
struct Payload {
    core: ObjectCore,
    data: [u64; 8],
}
managed_object!(Payload);

/// Benchmark: heap construct + final release round trip.
fn bench_construct_release(c: &mut Criterion) {
    c.bench_function("pointer_construct_release", |b| {
        b.iter(|| black_box(Pointer::new(Payload::default())));
    });
}

/// Benchmark: clone/drop pair against a live target.
fn bench_clone_drop(c: &mut Criterion) {
    let root = Pointer::new(Payload::default());
    c.bench_function("pointer_clone_drop", |b| {
        b.iter(|| black_box(root.clone()));
    });
}

/// Benchmark: table record/claim with varying pending depth.
fn bench_table_record_claim(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_record_claim");

    for pending in [0usize, 8, 32, 128] {
        group.bench_with_input(
            BenchmarkId::from_parameter(pending),
            &pending,
            |b, &pending| {
                let mut table = AllocationTable::new();
                for address in 0..pending {
                    table.record(0x1000_0000 + address * 0x40);
                }
                b.iter(|| {
                    table.record(0xdead_0000);
                    black_box(table.claim(0xdead_0000))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_construct_release,
    bench_clone_drop,
    bench_table_record_claim
);
criterion_main!(benches);
