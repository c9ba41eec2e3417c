// Benchmark for occurrence calculations
// Measures single-record computation and a full address-book pass

use birthday_reminder::models::birthday::Birthday;
use birthday_reminder::models::occurrence::LeapDayPolicy;
use birthday_reminder::services::occurrence::OccurrenceCalculator;
use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn address_book(size: usize) -> Vec<Birthday> {
    (0..size)
        .map(|i| {
            let month = (i % 12) as u32 + 1;
            let day = (i % 28) as u32 + 1;
            let year = 1930 + (i % 90) as i32;
            Birthday::new(
                format!("Person {}", i),
                format!("{:04}-{:02}-{:02}", year, month, day),
            )
            .unwrap()
        })
        .collect()
}

fn bench_single(c: &mut Criterion) {
    let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    let regular = Birthday::new("Sam", "1990-06-15").unwrap();
    let leap_day = Birthday::new("Leap", "2000-02-29").unwrap();

    let mut group = c.benchmark_group("compute");
    for policy in [LeapDayPolicy::Feb28, LeapDayPolicy::Mar1] {
        let calculator = OccurrenceCalculator::new(policy);
        group.bench_with_input(
            BenchmarkId::new("regular", policy.as_str()),
            &regular,
            |b, record| b.iter(|| calculator.compute(black_box(record), black_box(today))),
        );
        group.bench_with_input(
            BenchmarkId::new("leap_day", policy.as_str()),
            &leap_day,
            |b, record| b.iter(|| calculator.compute(black_box(record), black_box(today))),
        );
    }
    group.finish();
}

fn bench_compute_all(c: &mut Criterion) {
    let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    let calculator = OccurrenceCalculator::default();

    let mut group = c.benchmark_group("compute_all");
    for size in [10, 100, 1000] {
        let records = address_book(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| calculator.compute_all(black_box(records), black_box(today)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_single, bench_compute_all);
criterion_main!(benches);
