//! Benchmarks for merging large candidate batches.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use license_scanner::{
    Aggregator, CandidateRecord, Inventory, LicenseRegistry, NoOpResolver, UsedBy,
};
use std::hint::black_box;
use std::sync::Arc;

const LICENSES: &[&str] = &["MIT", "Apache-2.0", "spdxBSD3", "BSD 3-Clause", "Custom", ""];

/// A batch where every name shows up three times with different provenance.
fn batch(size: usize) -> Vec<CandidateRecord> {
    (0..size)
        .map(|i| {
            let name = format!("dep-{}", i % (size / 3).max(1));
            let record = CandidateRecord::new(name)
                .with_version(format!("1.{i}"))
                .with_license(LICENSES[i % LICENSES.len()]);
            if i % 2 == 0 {
                record.with_used_by(UsedBy::single(format!("module-{}", i % 17)))
            } else {
                record
            }
        })
        .collect()
}

fn benchmark_merge(c: &mut Criterion) {
    let registry = Arc::new(LicenseRegistry::builtin());
    let mut group = c.benchmark_group("merge_batch");
    for size in [100, 1_000, 10_000] {
        let records = batch(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| {
                let mut aggregator =
                    Aggregator::new(Arc::clone(&registry), Box::new(NoOpResolver));
                let mut inventory = Inventory::new();
                aggregator
                    .merge_batch("root", records.clone(), &mut inventory)
                    .unwrap();
                black_box(inventory.len())
            })
        });
    }
    group.finish();
}

fn benchmark_registry(c: &mut Criterion) {
    c.bench_function("registry_builtin", |b| {
        b.iter(|| black_box(LicenseRegistry::builtin().len()))
    });

    let registry = LicenseRegistry::builtin();
    c.bench_function("registry_search", |b| {
        b.iter(|| {
            for text in LICENSES {
                black_box(registry.search_by_name_or_id(text));
            }
        })
    });
}

criterion_group!(benches, benchmark_merge, benchmark_registry);
criterion_main!(benches);
