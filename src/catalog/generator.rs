//! Deterministic field of faint background stars.
//!
//! Fills the sky between the named stars with `count` anonymous stars:
//!
//! - right ascension uniform in `[0, 24)`,
//! - declination `asin(2u − 1)`, i.e. uniform over the **sphere** rather than over the
//!   declination interval (no crowding at the poles),
//! - magnitude uniform in `[2, 6)`,
//! - spectral class drawn from a rough stellar-population distribution.
//!
//! The generator is driven by an explicit RNG so the same seed always yields the same sky.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::catalog::{SpectralClass, Star};
use crate::coordinates::EquatorialCoordinate;

/// Relative frequency of each class, in [`SpectralClass::ALL`] order (sums to 1).
pub const SPECTRAL_WEIGHTS: [f64; 7] = [0.01, 0.05, 0.10, 0.15, 0.20, 0.25, 0.24];

/// Pick a spectral class from a uniform draw in `[0, 1)`.
///
/// Walks the cumulative [`SPECTRAL_WEIGHTS`]; a draw past the last bucket (rounding) is G.
pub fn weighted_spectral_class(u: f64) -> SpectralClass {
    let mut cumulative = 0.0;
    for (class, weight) in SpectralClass::ALL.iter().zip(SPECTRAL_WEIGHTS) {
        cumulative += weight;
        if u < cumulative {
            return *class;
        }
    }
    SpectralClass::G
}

/// Generate `count` background stars from the given RNG.
pub fn background_stars_with_rng<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Star> {
    (0..count)
        .map(|i| {
            let ra = rng.random::<f64>() * 24.0;
            let dec = (rng.random::<f64>() * 2.0 - 1.0).asin().to_degrees();
            let magnitude = 2.0 + rng.random::<f64>() * 4.0;
            let spectral_class = weighted_spectral_class(rng.random::<f64>());

            Star {
                id: format!("bg-{i}"),
                name: None,
                position: EquatorialCoordinate::new(ra, dec),
                magnitude,
                spectral_class,
                constellation: None,
            }
        })
        .collect()
}

/// Generate `count` background stars from a seeded [`StdRng`].
pub fn background_stars(count: usize, seed: u64) -> Vec<Star> {
    debug!(count, seed, "generating background stars");
    let mut rng = StdRng::seed_from_u64(seed);
    background_stars_with_rng(count, &mut rng)
}
