use approx::assert_abs_diff_eq;
use proptest::prelude::*;
use skydome::coordinates::{equatorial_to_horizontal, EquatorialCoordinate, HorizontalCoordinate};
use skydome::ephemeris::moon_position;
use skydome::projection::{project_to_screen, project_to_sphere, ViewState, Viewport};
use skydome::time::local_sidereal_time;
use skydome::visual::MagnitudeScale;

proptest! {
    #[test]
    fn sidereal_time_in_range(
        jd in 2_415_020.0..2_488_070.0_f64,
        longitude in -720.0..720.0_f64,
    ) {
        let lst = local_sidereal_time(jd, longitude);
        prop_assert!((0.0..24.0).contains(&lst), "lst {}", lst);

        // Wrapped longitudes describe the same meridian
        let shifted = local_sidereal_time(jd, longitude + 360.0);
        let diff = (lst - shifted).abs();
        prop_assert!(diff < 1e-6 || (24.0 - diff) < 1e-6, "{} vs {}", lst, shifted);
    }

    #[test]
    fn upper_transit_altitude(
        latitude in -89.0..89.0_f64,
        dec in -89.0..89.0_f64,
        ra in 0.0..24.0_f64,
    ) {
        // At upper transit LST = RA
        let hz = equatorial_to_horizontal(&EquatorialCoordinate::new(ra, dec), latitude, ra);
        assert_abs_diff_eq!(hz.altitude, 90.0 - (latitude - dec).abs(), epsilon = 1e-5);
        prop_assert!((0.0..360.0).contains(&hz.azimuth));
    }

    #[test]
    fn horizontal_stays_in_range(
        latitude in -90.0..=90.0_f64,
        dec in -90.0..=90.0_f64,
        ra in 0.0..24.0_f64,
        lst in 0.0..24.0_f64,
    ) {
        let hz = equatorial_to_horizontal(&EquatorialCoordinate::new(ra, dec), latitude, lst);
        prop_assert!(hz.altitude.is_finite() && hz.azimuth.is_finite());
        prop_assert!((-90.0..=90.0).contains(&hz.altitude));
        prop_assert!((0.0..360.0).contains(&hz.azimuth));
    }

    #[test]
    fn sphere_projection_is_pure(
        altitude in -90.0..=90.0_f64,
        azimuth in 0.0..360.0_f64,
        radius in 1.0..1000.0_f64,
    ) {
        let hz = HorizontalCoordinate::new(altitude, azimuth);
        let a = project_to_sphere(&hz, radius);
        let b = project_to_sphere(&hz, radius);
        prop_assert_eq!(a, b);
        assert_abs_diff_eq!(a.norm(), radius, epsilon = 1e-9 * radius);
        assert_abs_diff_eq!(a.y, radius * altitude.to_radians().sin(), epsilon = 1e-9 * radius);
    }

    #[test]
    fn accepted_views_project_finitely(
        view_az in -1000.0..1000.0_f64,
        view_alt in -120.0..120.0_f64,
        fov in -10.0..200.0_f64,
        altitude in -90.0..=90.0_f64,
        azimuth in 0.0..360.0_f64,
    ) {
        // A view either fails at construction or projects every point to a finite pixel
        let Ok(view) = ViewState::new(view_az, view_alt, fov) else {
            prop_assert!(!(fov > 0.0 && fov <= 180.0) || !(-90.0..=90.0).contains(&view_alt));
            return Ok(());
        };
        prop_assert!(view.fov() > 0.0);
        prop_assert!((0.0..360.0).contains(&view.azimuth()));

        let viewport = Viewport::new(1280.0, 720.0).unwrap();
        let hz = HorizontalCoordinate::new(altitude, azimuth);
        let p = project_to_screen(&hz, &view, &viewport, 1.5);
        prop_assert!(p.x.is_finite() && p.y.is_finite());
    }

    #[test]
    fn size_and_opacity_non_increasing(
        m1 in -30.0..20.0_f64,
        m2 in -30.0..20.0_f64,
    ) {
        let scale = MagnitudeScale::default();
        let (bright, faint) = if m1 <= m2 { (m1, m2) } else { (m2, m1) };
        prop_assert!(scale.size(bright) >= scale.size(faint));
        prop_assert!(scale.opacity(bright) >= scale.opacity(faint));
        prop_assert!((scale.min_size..=scale.max_size).contains(&scale.size(bright)));
        prop_assert!((scale.min_opacity..=1.0).contains(&scale.opacity(faint)));
    }

    #[test]
    fn moon_phase_bounded(jd in 2_440_000.0..2_480_000.0_f64) {
        let moon = moon_position(jd);
        prop_assert!((0.0..=1.0).contains(&moon.phase));
        prop_assert!((0.0..24.0).contains(&moon.equatorial.ra));
    }
}

#[test]
fn equator_meridian_is_zenith() {
    let hz = equatorial_to_horizontal(&EquatorialCoordinate::new(6.0, 0.0), 0.0, 6.0);
    assert_abs_diff_eq!(hz.altitude, 90.0, epsilon = 1e-6);
}
