use approx::assert_abs_diff_eq;
use skydome::catalog::{BodyKind, CelestialBody, SearchHit, DEFAULT_SEARCH_LIMIT};
use skydome::config::SkyConfig;
use skydome::coordinates::{CardinalDirection, EquatorialCoordinate};
use skydome::projection::{ViewState, Viewport};
use skydome::sky::{Sky, SkyContext};

mod common;
use common::{azimuth_diff, init_tracing, instant, new_york};

fn builtin_sky() -> Sky {
    let config = SkyConfig::builder()
        .background_star_count(4000)
        .background_seed(2024)
        .build()
        .unwrap();
    Sky::builtin(config).unwrap()
}

#[test]
fn test_new_york_equinox_sun() {
    init_tracing();
    let start = instant("2024-03-20T12:00:00 UTC");
    let ctx = SkyContext::new(new_york(), start);

    let sun = ctx.ephemeris.sun.equatorial;
    assert_abs_diff_eq!(sun.dec, 0.0, epsilon = 0.5);

    // Morning: the Sun is up in the east, low in the sky
    let hz = ctx.horizontal(&sun);
    assert_abs_diff_eq!(hz.altitude, 10.8, epsilon = 0.5);
    assert!(azimuth_diff(hz.azimuth, 90.0) < 15.0);
    assert_eq!(ctx.twilight_intensity(), None);

    // Sweep the afternoon: the Sun culminates due south near local noon (~17h UTC),
    // at about 90° − 40.7° with a zero declination
    let (peak_altitude, peak_minutes, peak_azimuth) = (0..=720)
        .step_by(5)
        .map(|minutes| {
            let ctx = SkyContext::new(new_york(), start.plus_minutes(minutes as f64));
            let hz = ctx.horizontal(&ctx.ephemeris.sun.equatorial);
            (hz.altitude, minutes, hz.azimuth)
        })
        .fold((f64::MIN, 0, 0.0), |best, cur| if cur.0 > best.0 { cur } else { best });

    assert_abs_diff_eq!(peak_altitude, 49.3, epsilon = 1.0);
    assert!((270..=330).contains(&peak_minutes), "peak at +{peak_minutes} min");
    assert!(azimuth_diff(peak_azimuth, 180.0) < 5.0);
}

#[test]
fn test_polaris_tracks_latitude() {
    let sky = builtin_sky();
    let polaris = sky.catalog().star("polaris").unwrap();

    for hour in 0..24 {
        let at = instant("2024-03-20T00:00:00 UTC").plus_minutes(60.0 * hour as f64);
        let ctx = SkyContext::new(new_york(), at);
        let hz = ctx.horizontal(&polaris.position);
        assert!(
            (hz.altitude - 40.7128).abs() < 1.0,
            "Polaris at {} deg",
            hz.altitude
        );
        assert!(azimuth_diff(hz.azimuth, 0.0) < 1.5);
    }
}

#[test]
fn test_full_flat_frame() {
    init_tracing();
    let sky = builtin_sky();
    let ctx = SkyContext::new(new_york(), instant("2024-01-15T03:00:00 UTC"));
    let view = ViewState::new(180.0, 30.0, 90.0).unwrap();
    let viewport = Viewport::new(1920.0, 1080.0).unwrap();

    // Deep night in winter
    assert!(ctx.sun_altitude() < -18.0);

    let sprites: Vec<_> = sky.flat_frame(&ctx, view, viewport).collect();
    assert!(sprites.len() > 500, "{} sprites", sprites.len());

    for sprite in &sprites {
        assert!(sprite.screen.visible);
        let cutoff = sky.config().horizon_cutoff(sprite.body.kind());
        assert!(sprite.horizontal.altitude >= cutoff);
        assert!(sprite.style.size > 0.0);
        assert!((0.0..=1.0).contains(&sprite.style.opacity));
    }

    // Orion is high in the south on a January night
    let betelgeuse = sprites
        .iter()
        .find(|s| s.body.id() == "betelgeuse")
        .expect("Betelgeuse in view");
    assert!(betelgeuse.style.glow);
    assert!(sprites.iter().any(|s| s.body.kind() == BodyKind::DeepSky));
    assert!(sprites.iter().all(|s| s.body.kind() != BodyKind::Sun));

    let segments: Vec<_> = sky.constellation_segments(&ctx, view, viewport).collect();
    assert!(segments.iter().any(|s| s.constellation.abbreviation == "Ori"));
    assert!(segments.iter().all(|s| s.from.visible && s.to.visible));

    let labels: Vec<_> = sky.constellation_labels(&ctx, view, viewport).collect();
    let orion = labels
        .iter()
        .find(|l| l.constellation.id == "ori")
        .unwrap();
    assert!(orion.visible_members > 0);
    assert!(orion.x > 0.0 && orion.x < viewport.width());

    // Clicking on Betelgeuse selects it
    let (x, y) = (betelgeuse.screen.x + 2.0, betelgeuse.screen.y);
    let hit = sky.pick(&ctx, view, viewport, x, y).unwrap();
    assert_eq!(hit.star.id, "betelgeuse");

    let markers: Vec<_> = sky.cardinal_markers(view, viewport).collect();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].direction, CardinalDirection::South);
    assert_abs_diff_eq!(markers[0].x, 960.0, epsilon = 1e-9);
    assert_abs_diff_eq!(markers[0].y, 900.0, epsilon = 1e-9);

    let glow: Vec<_> = sky.milky_way(&ctx, view, viewport).collect();
    assert!(glow.iter().all(|p| p.screen.visible && p.horizontal.altitude >= -10.0));
    assert!(sky.sphere_milky_way(&ctx).count() >= glow.len());
}

#[test]
fn test_full_sphere_frame() {
    let sky = builtin_sky();
    let ctx = SkyContext::new(new_york(), instant("2024-01-15T03:00:00 UTC"));

    let mut kinds = std::collections::HashSet::new();
    for sprite in sky.sphere_frame(&ctx) {
        let radius = sky.config().sphere_radii().for_kind(sprite.body.kind());
        assert_abs_diff_eq!(sprite.position.norm(), radius, epsilon = 1e-9);
        // +y is up: only stars may dip below the horizon, down to −5°
        let min_y = radius * (-5.0_f64).to_radians().sin();
        assert!(sprite.position.y > min_y - 1e-9);
        kinds.insert(sprite.body.kind());
    }
    assert!(kinds.contains(&BodyKind::Star));
    assert!(kinds.contains(&BodyKind::DeepSky));

    for segment in sky.sphere_constellation_segments(&ctx) {
        assert_abs_diff_eq!(segment.from.norm(), 495.0, epsilon = 1e-9);
        assert_abs_diff_eq!(segment.to.norm(), 495.0, epsilon = 1e-9);
    }
}

#[test]
fn test_bodies_and_moon_phase() {
    let sky = builtin_sky();
    // Full Moon of 2024-03-25
    let ctx = SkyContext::new(new_york(), instant("2024-03-25T07:00:00 UTC"));

    let moon = sky
        .bodies(&ctx)
        .find_map(|b| match b {
            CelestialBody::Moon(moon) => Some(moon),
            _ => None,
        })
        .unwrap();
    assert!(moon.phase > 0.95, "phase {}", moon.phase);

    let count = sky.bodies(&ctx).count();
    let catalog = sky.catalog();
    assert_eq!(
        count,
        catalog.stars().len() + catalog.deep_sky_objects().len() + 5 + 2
    );

    // The Moon, if drawn, gets no phase shadow when full
    let moon_hz = ctx.horizontal(&moon.equatorial);
    let view = ViewState::new(moon_hz.azimuth, moon_hz.altitude, 60.0).unwrap();
    let viewport = Viewport::new(800.0, 800.0).unwrap();
    if let Some(sprite) = sky
        .flat_frame(&ctx, view, viewport)
        .find(|s| s.body.kind() == BodyKind::Moon)
    {
        assert_eq!(sprite.moon_shadow_offset(), None);
        assert_eq!(sprite.moon_shadow_center(), None);
    };
}

#[test]
fn test_search() {
    let sky = builtin_sky();
    let hits = sky.catalog().search("sirius", DEFAULT_SEARCH_LIMIT);
    assert_eq!(hits[0].id(), "sirius");

    let hits = sky.catalog().search("  MARS ", DEFAULT_SEARCH_LIMIT);
    assert!(hits.iter().any(|h| matches!(h, SearchHit::Planet(_))));

    let hits = sky.catalog().search("a", 3);
    assert_eq!(hits.len(), 3);
    assert!(sky.catalog().search("   ", DEFAULT_SEARCH_LIMIT).is_empty());
}

#[test]
fn test_context_is_shared_per_tick() {
    let ctx = SkyContext::new(new_york(), instant("2024-03-20T12:00:00 UTC"));
    let vega = EquatorialCoordinate::parse("18 36 56.3", "+38 47 01").unwrap();
    let a = ctx.horizontal(&vega);
    let b = ctx.horizontal(&vega);
    assert_eq!(a, b);
    assert!((0.0..360.0).contains(&a.azimuth));
}
