//! Embedded catalog tables.
//!
//! The bright-star list, the constellation figures and the deep-sky objects ship inside the
//! binary as CSV text and go through the same readers as user-supplied files.
use crate::catalog::reader::{read_constellations, read_deep_sky_objects, read_stars};
use crate::catalog::{Constellation, DeepSkyObject, Star};
use crate::sky_errors::SkyError;

const BRIGHT_STARS_CSV: &str = include_str!("data/bright_stars.csv");
const CONSTELLATIONS_CSV: &str = include_str!("data/constellations.csv");
const DEEP_SKY_CSV: &str = include_str!("data/deep_sky.csv");

/// The named naked-eye stars, grouped by constellation.
pub fn bright_stars() -> Result<Vec<Star>, SkyError> {
    read_stars(BRIGHT_STARS_CSV.as_bytes())
}

/// Stick figures of thirty well-known constellations.
pub fn constellations() -> Result<Vec<Constellation>, SkyError> {
    read_constellations(CONSTELLATIONS_CSV.as_bytes())
}

/// Showpiece galaxies, nebulae, planetary nebulae and clusters.
pub fn deep_sky_objects() -> Result<Vec<DeepSkyObject>, SkyError> {
    read_deep_sky_objects(DEEP_SKY_CSV.as_bytes())
}
