//! CSV readers for catalog tables.
//!
//! Three tables, each with a header row:
//!
//! | table            | columns                                                               |
//! |------------------|-----------------------------------------------------------------------|
//! | stars            | `id,name,ra,dec,magnitude,spectral_type,constellation`                |
//! | deep-sky objects | `id,name,category,ra,dec,magnitude,size,description`                  |
//! | constellations   | `id,name,abbreviation,stars,lines`                                    |
//!
//! `ra` is decimal hours or `HH MM SS.S`; `dec` is decimal degrees or `±DD MM SS.S`.
//! `name` and `constellation` may be empty. In the constellation table `stars` is a
//! space-separated list of star ids and `lines` a space-separated list of `from:to` pairs.
//! Unknown spectral letters are read as G.
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::catalog::{
    Catalog, Constellation, DeepSkyCategory, DeepSkyObject, LineIds, SpectralClass, Star,
    StarIds,
};
use crate::coordinates::EquatorialCoordinate;
use crate::sky_errors::SkyError;

#[derive(Debug, Deserialize, PartialEq)]
struct StarRecord {
    id: String,
    name: Option<String>,
    ra: String,
    dec: String,
    magnitude: f64,
    spectral_type: String,
    constellation: Option<String>,
}

#[derive(Debug, Deserialize, PartialEq)]
struct DeepSkyRecord {
    id: String,
    name: String,
    category: DeepSkyCategory,
    ra: String,
    dec: String,
    magnitude: f64,
    size: f64,
    description: String,
}

#[derive(Debug, Deserialize, PartialEq)]
struct ConstellationRecord {
    id: String,
    name: String,
    abbreviation: String,
    stars: String,
    lines: String,
}

fn non_blank(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.trim().is_empty())
}

fn check_magnitude(id: &str, magnitude: f64) -> Result<f64, SkyError> {
    if magnitude.is_finite() {
        Ok(magnitude)
    } else {
        Err(SkyError::CatalogParseError(format!(
            "{id}: magnitude must be finite"
        )))
    }
}

fn position(id: &str, ra: &str, dec: &str) -> Result<EquatorialCoordinate, SkyError> {
    EquatorialCoordinate::parse(ra, dec)
        .map_err(|e| SkyError::CatalogParseError(format!("{id}: {e}")))
}

impl StarRecord {
    fn into_star(self) -> Result<Star, SkyError> {
        Ok(Star {
            position: position(&self.id, &self.ra, &self.dec)?,
            magnitude: check_magnitude(&self.id, self.magnitude)?,
            spectral_class: SpectralClass::from_letter(self.spectral_type.trim()),
            name: non_blank(self.name),
            constellation: non_blank(self.constellation),
            id: self.id,
        })
    }
}

impl DeepSkyRecord {
    fn into_deep_sky(self) -> Result<DeepSkyObject, SkyError> {
        if !(self.size.is_finite() && self.size >= 0.0) {
            return Err(SkyError::CatalogParseError(format!(
                "{}: angular size must be a non-negative number",
                self.id
            )));
        }
        Ok(DeepSkyObject {
            position: position(&self.id, &self.ra, &self.dec)?,
            magnitude: check_magnitude(&self.id, self.magnitude)?,
            id: self.id,
            name: self.name,
            size: self.size,
            category: self.category,
            description: self.description,
        })
    }
}

impl ConstellationRecord {
    fn into_constellation(self) -> Result<Constellation, SkyError> {
        let members: StarIds = self.stars.split_whitespace().map(String::from).collect();

        let lines = self
            .lines
            .split_whitespace()
            .map(|pair| match pair.split_once(':') {
                Some((from, to)) if !from.is_empty() && !to.is_empty() => {
                    Ok((from.to_string(), to.to_string()))
                }
                _ => Err(SkyError::CatalogParseError(format!(
                    "{}: malformed line segment '{pair}' (expected 'from:to')",
                    self.id
                ))),
            })
            .collect::<Result<LineIds, SkyError>>()?;

        Ok(Constellation {
            id: self.id,
            name: self.name,
            abbreviation: self.abbreviation,
            members,
            lines,
        })
    }
}

/// Read a star table.
///
/// Arguments
/// -----------------
/// * `rdr`: CSV source with a header row
///
/// Return
/// ----------
/// * the stars in file order, or the first CSV or validation error.
pub fn read_stars<R: Read>(rdr: R) -> Result<Vec<Star>, SkyError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
    csv_reader
        .deserialize::<StarRecord>()
        .map(|record| record?.into_star())
        .collect()
}

/// Read a deep-sky object table.
pub fn read_deep_sky_objects<R: Read>(rdr: R) -> Result<Vec<DeepSkyObject>, SkyError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
    csv_reader
        .deserialize::<DeepSkyRecord>()
        .map(|record| record?.into_deep_sky())
        .collect()
}

/// Read a constellation table.
pub fn read_constellations<R: Read>(rdr: R) -> Result<Vec<Constellation>, SkyError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
    csv_reader
        .deserialize::<ConstellationRecord>()
        .map(|record| record?.into_constellation())
        .collect()
}

/// Build a [`Catalog`] from three CSV files.
///
/// Constellation references to stars absent from `stars` are dropped, see [`Catalog::new`].
pub fn load_catalog(
    stars: impl AsRef<Path>,
    constellations: impl AsRef<Path>,
    deep_sky: impl AsRef<Path>,
) -> Result<Catalog, SkyError> {
    let stars = read_stars(File::open(stars)?)?;
    let constellations = read_constellations(File::open(constellations)?)?;
    let deep_sky = read_deep_sky_objects(File::open(deep_sky)?)?;
    Ok(Catalog::new(stars, constellations, deep_sky))
}
