use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use segmenta::{CustomerRecord, KMeans};

fn generate_customers(n: usize) -> Vec<CustomerRecord> {
    let mut rng = StdRng::seed_from_u64(42);
    let genders = ["F", "M"];
    let regions = ["North", "South", "East", "West"];

    (0..n)
        .map(|i| {
            CustomerRecord::new(
                i as u64 + 1,
                rng.gen_range(18.0..75.0),
                rng.gen_range(15000.0..150000.0),
                rng.gen_range(20.0..5000.0),
                genders[rng.gen_range(0..genders.len())],
                regions[rng.gen_range(0..regions.len())],
            )
        })
        .collect()
}

fn bench_kmeans(c: &mut Criterion) {
    let records = generate_customers(1000);

    let mut group = c.benchmark_group("kmeans");

    for &k in &[2, 5, 10] {
        group.bench_with_input(BenchmarkId::new("fit", k), &k, |b, &k| {
            let engine = KMeans::new(k).random_state(42).max_iter(50);

            b.iter(|| black_box(engine.fit(black_box(&records)).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_kmeans);
criterion_main!(benches);
