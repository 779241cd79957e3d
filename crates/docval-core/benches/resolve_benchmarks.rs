use criterion::{Criterion, black_box, criterion_group, criterion_main};
use docval_core::Selector;
use docval_test_utils::sample_catalog;

fn resolve_benchmark(c: &mut Criterion) {
    let catalog = sample_catalog();

    c.bench_function("Catalog::resolve (single preset)", |b| {
        let selectors = vec![Selector::preset("full")];
        b.iter(|| catalog.resolve(black_box(&selectors)))
    });

    // Every check reachable through several paths
    c.bench_function("Catalog::resolve (overlapping)", |b| {
        let selectors = vec![
            Selector::preset("schema"),
            Selector::preset("basic"),
            Selector::test("X"),
            Selector::preset("extended"),
            Selector::preset("full"),
            Selector::test("I1"),
            Selector::preset("missing"),
        ];
        b.iter(|| catalog.resolve(black_box(&selectors)))
    });
}

criterion_group!(benches, resolve_benchmark);
criterion_main!(benches);
