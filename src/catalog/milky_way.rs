//! Stylized path of the Milky Way.
//!
//! The band is sampled every [`GALACTIC_STEP`] degrees of galactic longitude `l`, starting
//! at the galactic center:
//!
//! ```text
//! ra  = (17.76 + l/360 · 24) mod 24      [h]
//! dec = −29 + 60 · sin(2l)               [deg]
//! ```
//!
//! This is a visual wave through the galactic center, not a rigorous galactic → equatorial
//! conversion.
use crate::constants::{Degree, Hour};
use crate::coordinates::EquatorialCoordinate;

/// Right ascension of the galactic center.
pub const GALACTIC_CENTER_RA: Hour = 17.76;

/// Declination of the galactic center.
pub const GALACTIC_CENTER_DEC: Degree = -29.0;

/// Amplitude of the declination wave.
pub const GALACTIC_WAVE_AMPLITUDE: Degree = 60.0;

/// Sampling step in galactic longitude.
pub const GALACTIC_STEP: usize = 5;

/// Number of samples along the band.
pub const GALACTIC_POINTS: usize = 360 / GALACTIC_STEP;

/// Equatorial position of the `index`-th sample of the band.
pub fn galactic_point(index: usize) -> EquatorialCoordinate {
    let l = (index * GALACTIC_STEP) as f64;
    let ra = (GALACTIC_CENTER_RA + l / 360.0 * 24.0) % 24.0;
    let dec = GALACTIC_CENTER_DEC + GALACTIC_WAVE_AMPLITUDE * (2.0 * l.to_radians()).sin();
    EquatorialCoordinate::new(ra, dec)
}

/// Every sample of the band, in galactic longitude order.
pub fn galactic_band() -> impl Iterator<Item = EquatorialCoordinate> {
    (0..GALACTIC_POINTS).map(galactic_point)
}
