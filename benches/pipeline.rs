//! Pipeline benchmark: raw feed → enriched events, serial vs rayon.

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use txn_features::config::FeaturesConfig;
use txn_features::events::RawTransaction;
use txn_features::features::{group_by_account, FeaturePipeline, WindowEngine};

fn make_feed(n: usize, accounts: usize) -> Vec<RawTransaction> {
    let t0 = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    (0..n)
        .map(|i| {
            let account = format!("C{}", i % accounts);
            let ts = t0 + Duration::minutes((i / accounts) as i64 * 97 + (i % 13) as i64);
            RawTransaction::at(account, ts, ((i * 7919) % 10_000) as f64 / 7.0)
        })
        .collect()
}

fn bench_window_engine(c: &mut Criterion) {
    let config = FeaturesConfig::default();
    let (events, _) = txn_features::events::sequence(make_feed(10_000, 1), config.epoch);
    let streams = group_by_account(events);
    let (_, stream) = streams.iter().next().unwrap();
    let engine = WindowEngine::new(&config);

    c.bench_function("window_engine_10k_one_account", |b| {
        b.iter(|| black_box(engine.compute(black_box(stream))))
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let feed = make_feed(100_000, 500);
    let serial = FeaturePipeline::new(FeaturesConfig::default());
    let parallel = FeaturePipeline::new(FeaturesConfig {
        parallel: true,
        ..FeaturesConfig::default()
    });

    c.bench_function("pipeline_100k_500_accounts_serial", |b| {
        b.iter(|| black_box(serial.run(black_box(feed.clone()))))
    });
    c.bench_function("pipeline_100k_500_accounts_parallel", |b| {
        b.iter(|| black_box(parallel.run(black_box(feed.clone()))))
    });
}

criterion_group!(benches, bench_window_engine, bench_pipeline);
criterion_main!(benches);
