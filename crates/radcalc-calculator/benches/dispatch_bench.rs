use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use radcalc_calculator::{CalculatorRegistry, CategoryPolicy, Engine, format, normalize};
use std::time::Duration;

const CASES: &[(&str, &[&str])] = &[
    ("adrenal-ct", &["10", "100", "40"]),
    ("albi", &["si", "40", "15"]),
    ("child-pugh", &["1.5", "3.8", "1.2", "none", "none"]),
    ("meld-na", &["2", "3", "1.5", "130", "no"]),
    ("renal-nephrometry", &["5", "<50", "4-7", "crosses", "yes"]),
    ("milan", &["3", "4", "no", "no", "2", "1.5"]),
    ("y90", &["partition", "200", "120", "10", "50", "3"]),
];

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    group.measurement_time(Duration::from_secs(5));

    let engine = Engine::new();
    for &(calculator, args) in CASES {
        group.bench_with_input(BenchmarkId::new("end_to_end", calculator), &args, |b, args| {
            b.iter(|| black_box(engine.evaluate(black_box(calculator), *args).unwrap()))
        });
    }
    group.finish();
}

fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("stages");
    let registry = CalculatorRegistry::builtin();

    group.bench_function("resolve", |b| {
        b.iter(|| black_box(registry.resolve(black_box("Renal-Nephrometry")).is_ok()))
    });

    let Ok(plugin) = registry.resolve("milan") else {
        panic!("milan is registered");
    };
    let args = ["3", "4", "no", "no", "2", "1.5"];
    group.bench_function("normalize", |b| {
        b.iter(|| black_box(normalize(plugin.spec(), &args, CategoryPolicy::Lenient).unwrap()))
    });

    let input = normalize(plugin.spec(), &args, CategoryPolicy::Lenient).unwrap();
    group.bench_function("evaluate_and_format", |b| {
        b.iter(|| black_box(format(plugin.evaluate(&input).unwrap()).unwrap()))
    });

    group.bench_function("unknown_identifier", |b| {
        b.iter(|| black_box(registry.resolve(black_box("tirads")).is_err()))
    });
    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_stages);
criterion_main!(benches);
