use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kagero_core::demo::market_model;
use kagero_core::types::{Token, strip_labels};

fn bench_queries(c: &mut Criterion) {
    let model = market_model();
    let mut rng = oorandom::Rand64::new(0x6b61_6765);
    let sampled: Vec<Token<_, _>> = model.random_sample(&mut rng, 200).unwrap();
    let sequence = strip_labels(&sampled);

    c.bench_function("log_probability_200", |b| {
        b.iter(|| model.log_probability(black_box(&sequence)).unwrap());
    });

    c.bench_function("best_path_200", |b| {
        b.iter(|| model.best_path(black_box(&sequence)).unwrap());
    });

    c.bench_function("entropy_200", |b| {
        b.iter(|| model.entropy(black_box(&sequence)));
    });
}

criterion_group!(benches, bench_queries);
criterion_main!(benches);
