//! Apparent position and illumination of the Moon.
//!
//! Only the largest periodic term in longitude (equation of center, 6.289°) and in
//! latitude (5.128°) are kept. Expect errors of one to two degrees, which is enough to put
//! the Moon in the right constellation and get its phase right.
use crate::constants::{Degree, JulianDate, Magnitude, OBLIQUITY_J2000};
use crate::coordinates::{normalize_degrees, EclipticCoordinate, EquatorialCoordinate};
use crate::time::centuries_since_j2000;

/// Apparent visual magnitude used when the Moon is treated as a catalog body (full Moon).
pub const MOON_MAGNITUDE: Magnitude = -12.7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonPosition {
    pub ecliptic: EclipticCoordinate,
    pub equatorial: EquatorialCoordinate,
    /// Illuminated fraction, `0` at new Moon and `1` at full Moon.
    pub phase: f64,
    /// Mean elongation from the Sun `D`, degrees in `[0, 360)`.
    pub elongation: Degree,
    /// `true` between new and full Moon (`D < 180°`).
    pub waxing: bool,
}

/// Compute the Moon position at the given Julian Date.
///
/// Arguments
/// -----------------
/// * `jd`: Julian Date
///
/// Return
/// ----------
/// * the ecliptic and equatorial position, the illuminated fraction and the elongation.
///
/// Details
/// ----------
/// With `T` in Julian centuries since J2000:
///
/// ```text
/// L = 218.316 + 481267.8813 T   (mean longitude)
/// M = 134.963 + 477198.8676 T   (mean anomaly)
/// D = 297.850 + 445267.1115 T   (mean elongation)
/// F =  93.272 + 483202.0175 T   (argument of latitude)
/// λ = L + 6.289 sin M,  β = 5.128 sin F,  ε = 23.439
/// phase = (1 − cos D) / 2
/// ```
pub fn moon_position(jd: JulianDate) -> MoonPosition {
    let t = centuries_since_j2000(jd);

    let mean_longitude = (218.316 + 481_267.881_3 * t) % 360.0;
    let mean_anomaly = (134.963 + 477_198.867_6 * t) % 360.0;
    let mean_elongation = (297.850 + 445_267.111_5 * t) % 360.0;
    let latitude_argument = (93.272 + 483_202.017_5 * t) % 360.0;

    let lambda = mean_longitude + 6.289 * mean_anomaly.to_radians().sin();
    let beta = 5.128 * latitude_argument.to_radians().sin();

    let ecliptic = EclipticCoordinate::new(normalize_degrees(lambda), beta);
    let elongation = normalize_degrees(mean_elongation);

    MoonPosition {
        ecliptic,
        equatorial: ecliptic.to_equatorial(OBLIQUITY_J2000),
        phase: (1.0 - mean_elongation.to_radians().cos()) / 2.0,
        elongation,
        waxing: elongation < 180.0,
    }
}
