//! Apparent position of the Sun.
//!
//! Mean longitude and mean anomaly are linear in the days since J2000; the equation of
//! center is truncated to its first two terms. The Sun stays on the ecliptic (β = 0) and the
//! obliquity drifts linearly.
use crate::constants::{Degree, JulianDate, Magnitude, J2000_JD, OBLIQUITY_J2000};
use crate::coordinates::{normalize_degrees, EclipticCoordinate, EquatorialCoordinate};

/// Apparent visual magnitude used when the Sun is treated as a catalog body.
pub const SUN_MAGNITUDE: Magnitude = -26.74;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunPosition {
    /// Ecliptic longitude λ, `[0, 360)`, latitude always 0.
    pub ecliptic: EclipticCoordinate,
    /// Obliquity of the ecliptic used for the conversion (degrees).
    pub obliquity: Degree,
    pub equatorial: EquatorialCoordinate,
}

/// Compute the Sun position at the given Julian Date.
///
/// Arguments
/// -----------------
/// * `jd`: Julian Date (UTC based, no ΔT correction)
///
/// Return
/// ----------
/// * the ecliptic and equatorial position of the Sun.
///
/// Details
/// ----------
/// With `n = JD − 2451545`:
///
/// ```text
/// L = 280.460 + 0.9856474 n
/// g = 357.528 + 0.9856003 n
/// λ = L + 1.915 sin g + 0.020 sin 2g
/// ε = 23.439 − 0.0000004 n
/// ```
pub fn sun_position(jd: JulianDate) -> SunPosition {
    let n = jd - J2000_JD;

    let mean_longitude = 280.460 + 0.985_647_4 * n;
    let mean_anomaly = (357.528 + 0.985_600_3 * n).to_radians();

    let lambda = mean_longitude
        + 1.915 * mean_anomaly.sin()
        + 0.020 * (2.0 * mean_anomaly).sin();
    let obliquity = OBLIQUITY_J2000 - 0.000_000_4 * n;

    let ecliptic = EclipticCoordinate::new(normalize_degrees(lambda), 0.0);
    SunPosition {
        ecliptic,
        obliquity,
        equatorial: ecliptic.to_equatorial(obliquity),
    }
}

#[cfg(test)]
mod sun_test {
    use super::*;
    use crate::time::julian_date;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_sun_j2000() {
        // Almanac value for 2000-01-01 12h: RA 18h45m, Dec -23.0°
        let sun = sun_position(J2000_JD);
        assert_abs_diff_eq!(sun.equatorial.ra, 18.75, epsilon = 0.02);
        assert_abs_diff_eq!(sun.equatorial.dec, -23.03, epsilon = 0.05);
        assert_abs_diff_eq!(sun.ecliptic.longitude, 280.38, epsilon = 0.05);
    }

    #[test]
    fn test_sun_equinox_and_solstice() {
        let equinox = sun_position(julian_date(2024, 3, 20, 3.1));
        assert_abs_diff_eq!(equinox.equatorial.dec, 0.0, epsilon = 0.05);
        assert!(equinox.equatorial.ra < 0.05 || equinox.equatorial.ra > 23.95);

        let solstice = sun_position(julian_date(2024, 6, 20, 20.85));
        assert_abs_diff_eq!(solstice.equatorial.dec, 23.44, epsilon = 0.05);
        assert_abs_diff_eq!(solstice.equatorial.ra, 6.0, epsilon = 0.02);
    }

    #[test]
    fn test_sun_declination_bounded() {
        let start = julian_date(2023, 1, 1, 0.0);
        for day in 0..366 {
            let sun = sun_position(start + day as f64);
            assert!(sun.equatorial.dec.abs() <= 23.45);
            assert!((0.0..24.0).contains(&sun.equatorial.ra));
            assert_eq!(sun.ecliptic.latitude, 0.0);
        }
    }
}
