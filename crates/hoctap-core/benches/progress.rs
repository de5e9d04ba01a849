use criterion::{black_box, criterion_group, criterion_main, Criterion};

use hoctap_core::progress::{calculate_level_progress, StreakTier};
use hoctap_core::routing::{guard, resolve};
use hoctap_core::session::Viewer;

fn bench_level_progress(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_progress");

    group.bench_function("level=1", |b| {
        b.iter(|| calculate_level_progress(black_box(Some(1)), black_box(Some(42.0))))
    });

    group.bench_function("level=50", |b| {
        b.iter(|| calculate_level_progress(black_box(Some(50)), black_box(Some(1e6))))
    });

    group.bench_function("streak_tier", |b| {
        b.iter(|| StreakTier::from_streak(black_box(17)))
    });

    group.finish();
}

fn bench_routing(c: &mut Criterion) {
    let mut group = c.benchmark_group("routing");

    group.bench_function("resolve lesson", |b| {
        b.iter(|| resolve(black_box("/lesson/64f1c2a9e3")))
    });

    group.bench_function("guard guest admin", |b| {
        b.iter(|| guard(black_box("/admin/users"), black_box(&Viewer::GUEST)))
    });

    group.finish();
}

criterion_group!(benches, bench_level_progress, bench_routing);
criterion_main!(benches);
