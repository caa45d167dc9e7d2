use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use skydome::config::SkyConfig;
use skydome::coordinates::{equatorial_to_horizontal, EquatorialCoordinate, ObserverLocation};
use skydome::projection::{ViewState, Viewport};
use skydome::sky::{Sky, SkyContext};
use skydome::time::ObservationInstant;

fn sky() -> Sky {
    let config = SkyConfig::builder()
        .background_star_count(4000)
        .background_seed(0xC0FFEE)
        .build()
        .unwrap();
    Sky::builtin(config).unwrap()
}

fn context(minutes: f64) -> SkyContext {
    let observer = ObserverLocation::new(48.85, 2.35).unwrap();
    let start: ObservationInstant = "2024-01-15T21:00:00 UTC".parse().unwrap();
    SkyContext::new(observer, start.plus_minutes(minutes))
}

/// One flat frame: context, every visible sprite, constellation lines and labels.
fn bench_flat_frame(c: &mut Criterion) {
    let sky = sky();
    let view = ViewState::new(180.0, 30.0, 90.0).unwrap();
    let viewport = Viewport::new(1920.0, 1080.0).unwrap();
    let mut tick = 0.0;

    c.bench_function("sky_frame/flat_4000_stars", |b| {
        b.iter(|| {
            tick += 1.0;
            let ctx = context(black_box(tick));
            let sprites = sky.flat_frame(&ctx, view, viewport).count();
            let lines = sky.constellation_segments(&ctx, view, viewport).count();
            let labels = sky.constellation_labels(&ctx, view, viewport).count();
            black_box((sprites, lines, labels))
        })
    });
}

/// One sphere frame: every body above its cutoff placed on its shell.
fn bench_sphere_frame(c: &mut Criterion) {
    let sky = sky();
    let ctx = context(0.0);

    c.bench_function("sky_frame/sphere_4000_stars", |b| {
        b.iter(|| {
            let sum = sky
                .sphere_frame(black_box(&ctx))
                .fold(0.0, |acc, s| acc + s.position.y);
            let lines = sky.sphere_constellation_segments(&ctx).count();
            black_box((sum, lines))
        })
    });
}

/// The per-entry transform alone.
fn bench_equatorial_to_horizontal(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xDEADBEEF);
    let samples = 10_000usize;

    c.bench_function("sky_frame/equatorial_to_horizontal", |b| {
        b.iter_batched(
            || {
                (0..samples)
                    .map(|_| {
                        let eq = EquatorialCoordinate::new(
                            rng.random::<f64>() * 24.0,
                            rng.random_range(-90.0..=90.0),
                        );
                        (eq, rng.random_range(-90.0..=90.0), rng.random::<f64>() * 24.0)
                    })
                    .collect::<Vec<_>>()
            },
            |cases| {
                for (eq, latitude, lst) in cases {
                    black_box(equatorial_to_horizontal(&eq, latitude, lst));
                }
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(
    benches,
    bench_flat_frame,
    bench_sphere_frame,
    bench_equatorial_to_horizontal
);
criterion_main!(benches);
