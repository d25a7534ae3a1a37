use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vitals_monitor::{classify, default_vitals, evaluate, CollectingNotifier, Readings, VitalSpec};

fn classify_benchmark(c: &mut Criterion) {
    let spec = VitalSpec::bounded("temperature", 95.0, 102.0);
    let test_values = vec![94.0, 95.0, 95.01, 96.0, 98.6, 100.9, 101.99, 102.0, 110.0];

    c.bench_function("classify", |b| {
        b.iter(|| {
            for value in &test_values {
                black_box(classify(black_box(&spec), black_box(*value)));
            }
        })
    });
}

fn evaluate_benchmark(c: &mut Criterion) {
    let specs = default_vitals();
    let readings = Readings::from([
        ("temperature".to_string(), 103.0),
        ("pulseRate".to_string(), 72.0),
        ("spo2".to_string(), 88.0),
    ]);

    c.bench_function("evaluate", |b| {
        b.iter(|| {
            let notifier = CollectingNotifier::new();
            black_box(evaluate(black_box(&specs), black_box(&readings), &notifier))
        })
    });
}

criterion_group!(benches, classify_benchmark, evaluate_benchmark);
criterion_main!(benches);
