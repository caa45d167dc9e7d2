//! # Sky catalog
//!
//! The static part of the sky: fixed [`Star`]s, [`Constellation`] stick figures and
//! [`DeepSkyObject`]s, gathered in an immutable [`Catalog`] value that is built once and
//! shared read-only by every frame.
//!
//! ## Building a catalog
//!
//! - [`Catalog::builtin`] parses the embedded bright-star, constellation and deep-sky tables,
//! - [`Catalog::with_background_stars`] adds a deterministic field of faint stars drawn by
//!   the [`generator`],
//! - [`reader`] loads the same tables from CSV files or any [`std::io::Read`],
//! - [`Catalog::new`] assembles a catalog from values built by the caller.
//!
//! ## Referential integrity
//!
//! Constellations refer to stars by id. [`Catalog::new`] resolves every reference once:
//! members or line endpoints that name a missing star are dropped with a `warn!` log, and
//! duplicate star ids keep their first occurrence. After construction every constellation
//! line is a pair of valid indices into [`Catalog::stars`].
//!
//! ## Example
//!
//! ```rust
//! use skydome::catalog::Catalog;
//!
//! let catalog = Catalog::builtin().unwrap();
//! let sirius = catalog.star("sirius").unwrap();
//! assert_eq!(sirius.name.as_deref(), Some("Sirius"));
//! ```
pub mod body;
pub mod builtin;
pub mod generator;
pub mod milky_way;
pub mod reader;

use std::collections::HashMap;
use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::constants::{ArcMin, Magnitude};
use crate::coordinates::EquatorialCoordinate;
use crate::ephemeris::Planet;
use crate::sky_errors::SkyError;

pub use body::{BodyKind, CelestialBody};

/// Default number of hits returned by [`Catalog::search`].
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Harvard spectral class of a star.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpectralClass {
    O,
    B,
    A,
    F,
    G,
    K,
    M,
}

impl SpectralClass {
    pub const ALL: [SpectralClass; 7] = [
        SpectralClass::O,
        SpectralClass::B,
        SpectralClass::A,
        SpectralClass::F,
        SpectralClass::G,
        SpectralClass::K,
        SpectralClass::M,
    ];

    /// Class from the first letter of a spectral type (`"K5III"` → K), case-insensitive.
    ///
    /// Unknown or empty types fall back to G, the color of an average star.
    pub fn from_letter(spectral_type: &str) -> Self {
        match spectral_type.chars().next().map(|c| c.to_ascii_uppercase()) {
            Some('O') => SpectralClass::O,
            Some('B') => SpectralClass::B,
            Some('A') => SpectralClass::A,
            Some('F') => SpectralClass::F,
            Some('K') => SpectralClass::K,
            Some('M') => SpectralClass::M,
            _ => SpectralClass::G,
        }
    }

    pub fn letter(self) -> char {
        match self {
            SpectralClass::O => 'O',
            SpectralClass::B => 'B',
            SpectralClass::A => 'A',
            SpectralClass::F => 'F',
            SpectralClass::G => 'G',
            SpectralClass::K => 'K',
            SpectralClass::M => 'M',
        }
    }
}

impl fmt::Display for SpectralClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeepSkyCategory {
    Galaxy,
    Nebula,
    Cluster,
    #[serde(rename = "planetary")]
    PlanetaryNebula,
}

impl fmt::Display for DeepSkyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeepSkyCategory::Galaxy => "galaxy",
            DeepSkyCategory::Nebula => "nebula",
            DeepSkyCategory::Cluster => "cluster",
            DeepSkyCategory::PlanetaryNebula => "planetary nebula",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub id: String,
    pub name: Option<String>,
    pub position: EquatorialCoordinate,
    pub magnitude: Magnitude,
    pub spectral_class: SpectralClass,
    /// Abbreviation of the constellation the star belongs to (`"Ori"`).
    pub constellation: Option<String>,
}

/// Member list of a constellation; almost all figures have at most eight stars.
pub type StarIds = SmallVec<[String; 8]>;

/// Stick-figure segments of a constellation, as pairs of star ids.
pub type LineIds = SmallVec<[(String, String); 8]>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constellation {
    pub id: String,
    pub name: String,
    pub abbreviation: String,
    pub members: StarIds,
    pub lines: LineIds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeepSkyObject {
    pub id: String,
    pub name: String,
    pub position: EquatorialCoordinate,
    pub magnitude: Magnitude,
    /// Apparent size in arcminutes.
    pub size: ArcMin,
    pub category: DeepSkyCategory,
    pub description: String,
}

/// Constellation references resolved to star indices.
#[derive(Debug, Clone, Default, PartialEq)]
struct ResolvedFigure {
    members: SmallVec<[usize; 8]>,
    lines: SmallVec<[(usize, usize); 8]>,
}

/// One match of [`Catalog::search`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchHit<'a> {
    Star(&'a Star),
    DeepSky(&'a DeepSkyObject),
    Constellation(&'a Constellation),
    Planet(Planet),
}

impl SearchHit<'_> {
    pub fn name(&self) -> &str {
        match self {
            SearchHit::Star(star) => star.name.as_deref().unwrap_or(&star.id),
            SearchHit::DeepSky(dso) => &dso.name,
            SearchHit::Constellation(c) => &c.name,
            SearchHit::Planet(planet) => planet.name(),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            SearchHit::Star(star) => &star.id,
            SearchHit::DeepSky(dso) => &dso.id,
            SearchHit::Constellation(c) => &c.id,
            SearchHit::Planet(planet) => planet.id(),
        }
    }
}

/// Immutable collection of stars, constellations and deep-sky objects.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    stars: Vec<Star>,
    star_index: HashMap<String, usize>,
    constellations: Vec<Constellation>,
    figures: Vec<ResolvedFigure>,
    deep_sky: Vec<DeepSkyObject>,
    /// Index of the first generated background star in `stars`.
    background_start: usize,
}

impl Catalog {
    /// Assemble a catalog, resolving and cleaning constellation references.
    ///
    /// Arguments
    /// -----------------
    /// * `stars`: fixed stars; a repeated id keeps its first occurrence
    /// * `constellations`: figures referring to `stars` by id
    /// * `deep_sky`: deep-sky objects
    ///
    /// Return
    /// ----------
    /// * the catalog, with every dangling constellation member or line removed.
    pub fn new(
        stars: Vec<Star>,
        mut constellations: Vec<Constellation>,
        deep_sky: Vec<DeepSkyObject>,
    ) -> Self {
        let mut star_index = HashMap::with_capacity(stars.len());
        let mut kept = Vec::with_capacity(stars.len());
        for star in stars {
            if star_index.contains_key(&star.id) {
                warn!(star = %star.id, "duplicate star id in catalog, keeping the first entry");
                continue;
            }
            star_index.insert(star.id.clone(), kept.len());
            kept.push(star);
        }

        let figures = constellations
            .iter_mut()
            .map(|constellation| resolve_figure(constellation, &star_index))
            .collect();

        debug!(
            stars = kept.len(),
            constellations = constellations.len(),
            deep_sky = deep_sky.len(),
            "catalog built"
        );

        Catalog {
            background_start: kept.len(),
            stars: kept,
            star_index,
            constellations,
            figures,
            deep_sky,
        }
    }

    /// Catalog of the embedded bright stars, constellations and deep-sky objects.
    pub fn builtin() -> Result<Self, SkyError> {
        Ok(Catalog::new(
            builtin::bright_stars()?,
            builtin::constellations()?,
            builtin::deep_sky_objects()?,
        ))
    }

    /// Return a copy of this catalog extended with `count` generated background stars.
    ///
    /// Generated ids (`bg-{i}`) are never referenced by constellations.
    pub fn with_background_stars(self, count: usize, seed: u64) -> Self {
        let Catalog {
            mut stars,
            constellations,
            deep_sky,
            background_start,
            ..
        } = self;
        stars.extend(generator::background_stars(count, seed));
        Catalog {
            background_start,
            ..Catalog::new(stars, constellations, deep_sky)
        }
    }

    /// Every star, background stars last.
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Stars from the catalog data, without the generated background field.
    pub fn catalog_stars(&self) -> &[Star] {
        &self.stars[..self.background_start]
    }

    pub fn constellations(&self) -> &[Constellation] {
        &self.constellations
    }

    pub fn deep_sky_objects(&self) -> &[DeepSkyObject] {
        &self.deep_sky
    }

    pub fn star(&self, id: &str) -> Option<&Star> {
        self.star_index.get(id).map(|&i| &self.stars[i])
    }

    /// Index of a star in [`Catalog::stars`].
    pub fn star_position_index(&self, id: &str) -> Option<usize> {
        self.star_index.get(id).copied()
    }

    pub fn constellation(&self, id_or_abbreviation: &str) -> Option<&Constellation> {
        self.constellations.iter().find(|c| {
            c.id.eq_ignore_ascii_case(id_or_abbreviation)
                || c.abbreviation.eq_ignore_ascii_case(id_or_abbreviation)
        })
    }

    pub fn deep_sky_object(&self, id: &str) -> Option<&DeepSkyObject> {
        self.deep_sky.iter().find(|d| d.id == id)
    }

    /// Line segments of the `index`-th constellation as pairs of star indices.
    pub fn constellation_lines(&self, index: usize) -> &[(usize, usize)] {
        self.figures
            .get(index)
            .map(|f| f.lines.as_slice())
            .unwrap_or(&[])
    }

    /// Member stars of the `index`-th constellation as star indices.
    pub fn constellation_members(&self, index: usize) -> &[usize] {
        self.figures
            .get(index)
            .map(|f| f.members.as_slice())
            .unwrap_or(&[])
    }

    /// Case-insensitive name search across every searchable object.
    ///
    /// Arguments
    /// -----------------
    /// * `query`: text to look for in object names; blank queries match nothing
    /// * `limit`: maximum number of hits returned
    ///
    /// Return
    /// ----------
    /// * matches whose name starts with the query first, then the other substring matches.
    ///   Within each group stars come first, then deep-sky objects, constellations and planets,
    ///   each in catalog order.
    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchHit<'_>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let stars = self
            .stars
            .iter()
            .filter(|s| s.name.is_some())
            .map(SearchHit::Star);
        let deep_sky = self.deep_sky.iter().map(SearchHit::DeepSky);
        let constellations = self.constellations.iter().map(SearchHit::Constellation);
        let planets = Planet::ALL.into_iter().map(SearchHit::Planet);

        stars
            .chain(deep_sky)
            .chain(constellations)
            .chain(planets)
            .filter_map(|hit| {
                let name = hit.name().to_lowercase();
                name.find(&needle).map(|pos| (pos > 0, hit))
            })
            .sorted_by_key(|(not_prefix, _)| *not_prefix)
            .map(|(_, hit)| hit)
            .take(limit)
            .collect()
    }
}

fn resolve_figure(
    constellation: &mut Constellation,
    star_index: &HashMap<String, usize>,
) -> ResolvedFigure {
    let id = constellation.id.clone();
    let mut figure = ResolvedFigure::default();

    constellation.members.retain(|member| match star_index.get(member.as_str()) {
        Some(&i) => {
            figure.members.push(i);
            true
        }
        None => {
            warn!(constellation = %id, star = %member, "dropping unknown constellation member");
            false
        }
    });

    constellation.lines.retain(|(a, b)| {
        match (star_index.get(a.as_str()), star_index.get(b.as_str())) {
            (Some(&i), Some(&j)) => {
                figure.lines.push((i, j));
                true
            }
            _ => {
                warn!(constellation = %id, from = %a, to = %b, "dropping constellation line with unknown star");
                false
            }
        }
    });

    figure
}

#[cfg(test)]
pub(crate) mod catalog_test {
    use super::*;

    pub(crate) fn star(id: &str, ra: f64, dec: f64, magnitude: f64) -> Star {
        Star {
            id: id.to_string(),
            name: Some(id.to_uppercase()),
            position: EquatorialCoordinate::new(ra, dec),
            magnitude,
            spectral_class: SpectralClass::A,
            constellation: None,
        }
    }

    fn figure(id: &str, members: &[&str], lines: &[(&str, &str)]) -> Constellation {
        Constellation {
            id: id.to_string(),
            name: id.to_uppercase(),
            abbreviation: id.to_string(),
            members: members.iter().map(|s| s.to_string()).collect(),
            lines: lines
                .iter()
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_spectral_class_from_letter() {
        assert_eq!(SpectralClass::from_letter("O"), SpectralClass::O);
        assert_eq!(SpectralClass::from_letter("m"), SpectralClass::M);
        assert_eq!(SpectralClass::from_letter("B9.5V"), SpectralClass::B);
        assert_eq!(SpectralClass::from_letter("W"), SpectralClass::G);
        assert_eq!(SpectralClass::from_letter(""), SpectralClass::G);
        for class in SpectralClass::ALL {
            assert_eq!(SpectralClass::from_letter(&class.to_string()), class);
        }
    }

    #[test]
    fn test_dangling_references_dropped() {
        let stars = vec![star("a", 1.0, 0.0, 1.0), star("b", 2.0, 0.0, 2.0)];
        let constellations = vec![figure(
            "abc",
            &["a", "b", "ghost"],
            &[("a", "b"), ("b", "ghost"), ("ghost", "a")],
        )];

        let catalog = Catalog::new(stars, constellations, vec![]);
        let c = &catalog.constellations()[0];
        assert_eq!(c.members.as_slice(), &["a".to_string(), "b".to_string()]);
        assert_eq!(c.lines.len(), 1);
        assert_eq!(catalog.constellation_lines(0), &[(0, 1)]);
        assert_eq!(catalog.constellation_members(0), &[0, 1]);
        assert!(catalog.constellation_lines(7).is_empty());
    }

    #[test]
    fn test_duplicate_star_ids() {
        let stars = vec![
            star("a", 1.0, 0.0, 1.0),
            star("a", 5.0, 5.0, 5.0),
            star("b", 2.0, 0.0, 2.0),
        ];
        let catalog = Catalog::new(stars, vec![], vec![]);
        assert_eq!(catalog.stars().len(), 2);
        assert_eq!(catalog.star("a").unwrap().magnitude, 1.0);
        assert_eq!(catalog.star_position_index("b"), Some(1));
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.stars().len(), 129);
        assert_eq!(catalog.constellations().len(), 30);
        assert_eq!(catalog.deep_sky_objects().len(), 45);

        // Builtin figures are fully consistent
        let orion = catalog.constellation("Ori").unwrap();
        assert_eq!(orion.name, "Orion");
        assert_eq!(orion.members.len(), 7);
        assert_eq!(orion.lines.len(), 8);

        let total_lines: usize = catalog.constellations().iter().map(|c| c.lines.len()).sum();
        let resolved: usize = (0..30).map(|i| catalog.constellation_lines(i).len()).sum();
        assert_eq!(total_lines, resolved);

        let m31 = catalog.deep_sky_object("m31").unwrap();
        assert_eq!(m31.category, DeepSkyCategory::Galaxy);
        assert_eq!(m31.size, 180.0);

        let sirius = catalog.star("sirius").unwrap();
        assert_eq!(sirius.magnitude, -1.46);
        assert_eq!(sirius.spectral_class, SpectralClass::A);
        assert_eq!(sirius.constellation.as_deref(), Some("CMa"));
    }

    #[test]
    fn test_with_background_stars() {
        let catalog = Catalog::builtin()
            .unwrap()
            .with_background_stars(100, 7);
        assert_eq!(catalog.stars().len(), 229);
        assert!(catalog.star("bg-99").is_some());
        assert_eq!(catalog.catalog_stars().len(), 129);
        assert!(catalog.catalog_stars().iter().all(|s| !s.id.starts_with("bg-")));
        // figures still resolve to the same stars
        let (i, j) = catalog.constellation_lines(0)[0];
        assert_eq!(catalog.stars()[i].id, "betelgeuse");
        assert_eq!(catalog.stars()[j].id, "bellatrix");
    }

    #[test]
    fn test_search() {
        let catalog = Catalog::builtin().unwrap();

        let hits = catalog.search("  SIRI ", DEFAULT_SEARCH_LIMIT);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id(), "sirius");

        // Prefix matches first: "Mars" before names merely containing "mar"
        let hits = catalog.search("mar", DEFAULT_SEARCH_LIMIT);
        let names: Vec<&str> = hits.iter().map(|h| h.name()).collect();
        assert!(names.contains(&"Mars"));
        assert!(names.contains(&"Markab"));
        let first_non_prefix = names
            .iter()
            .position(|n| !n.to_lowercase().starts_with("mar"))
            .unwrap_or(names.len());
        assert!(names[first_non_prefix..]
            .iter()
            .all(|n| !n.to_lowercase().starts_with("mar")));

        let hits = catalog.search("nebula", 3);
        assert_eq!(hits.len(), 3);
        assert!(hits.iter().all(|h| matches!(h, SearchHit::DeepSky(_))));

        let hits = catalog.search("orion", DEFAULT_SEARCH_LIMIT);
        assert!(hits
            .iter()
            .any(|h| matches!(h, SearchHit::Constellation(c) if c.id == "ori")));

        assert!(catalog.search("   ", DEFAULT_SEARCH_LIMIT).is_empty());
        assert!(catalog.search("zzzz", DEFAULT_SEARCH_LIMIT).is_empty());
    }
}
