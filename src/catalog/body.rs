//! Uniform view over everything that can be placed on the sky.
//!
//! Catalog entries are borrowed, solar-system bodies are carried by value since they are
//! recomputed every tick. Downstream code matches exhaustively on [`CelestialBody`] so a new
//! kind of body cannot be silently ignored by the renderer.
use serde::{Deserialize, Serialize};

use crate::catalog::{DeepSkyObject, Star};
use crate::constants::Magnitude;
use crate::coordinates::EquatorialCoordinate;
use crate::ephemeris::moon::MOON_MAGNITUDE;
use crate::ephemeris::sun::SUN_MAGNITUDE;
use crate::ephemeris::{MoonPosition, PlanetPosition, SunPosition};
use crate::visual::MOON_BASE_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyKind {
    Star,
    DeepSky,
    Planet,
    Moon,
    Sun,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CelestialBody<'a> {
    Star(&'a Star),
    DeepSky(&'a DeepSkyObject),
    Planet(PlanetPosition),
    Moon(MoonPosition),
    Sun(SunPosition),
}

impl CelestialBody<'_> {
    pub fn kind(&self) -> BodyKind {
        match self {
            CelestialBody::Star(_) => BodyKind::Star,
            CelestialBody::DeepSky(_) => BodyKind::DeepSky,
            CelestialBody::Planet(_) => BodyKind::Planet,
            CelestialBody::Moon(_) => BodyKind::Moon,
            CelestialBody::Sun(_) => BodyKind::Sun,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            CelestialBody::Star(star) => &star.id,
            CelestialBody::DeepSky(dso) => &dso.id,
            CelestialBody::Planet(p) => p.planet.id(),
            CelestialBody::Moon(_) => "moon",
            CelestialBody::Sun(_) => "sun",
        }
    }

    /// Display name, `None` for anonymous stars.
    pub fn name(&self) -> Option<&str> {
        match self {
            CelestialBody::Star(star) => star.name.as_deref(),
            CelestialBody::DeepSky(dso) => Some(&dso.name),
            CelestialBody::Planet(p) => Some(p.planet.name()),
            CelestialBody::Moon(_) => Some("Moon"),
            CelestialBody::Sun(_) => Some("Sun"),
        }
    }

    pub fn equatorial(&self) -> EquatorialCoordinate {
        match self {
            CelestialBody::Star(star) => star.position,
            CelestialBody::DeepSky(dso) => dso.position,
            CelestialBody::Planet(p) => p.equatorial,
            CelestialBody::Moon(m) => m.equatorial,
            CelestialBody::Sun(s) => s.equatorial,
        }
    }

    pub fn magnitude(&self) -> Magnitude {
        match self {
            CelestialBody::Star(star) => star.magnitude,
            CelestialBody::DeepSky(dso) => dso.magnitude,
            CelestialBody::Planet(p) => p.magnitude,
            CelestialBody::Moon(_) => MOON_MAGNITUDE,
            CelestialBody::Sun(_) => SUN_MAGNITUDE,
        }
    }

    /// Size hint: arcminutes for deep-sky objects, base sprite radius for the planets and
    /// the Moon, nothing for point-like stars and the Sun.
    pub fn size_hint(&self) -> Option<f64> {
        match self {
            CelestialBody::DeepSky(dso) => Some(dso.size),
            CelestialBody::Planet(p) => Some(p.size),
            CelestialBody::Moon(_) => Some(MOON_BASE_SIZE),
            CelestialBody::Star(_) | CelestialBody::Sun(_) => None,
        }
    }
}

#[cfg(test)]
mod body_test {
    use super::*;
    use crate::catalog::Catalog;
    use crate::ephemeris::{Ephemeris, Planet};

    #[test]
    fn test_body_accessors() {
        let catalog = Catalog::builtin().unwrap();
        let eph = Ephemeris::at(2_451_545.0);

        let vega = CelestialBody::Star(catalog.star("vega").unwrap());
        assert_eq!(vega.kind(), BodyKind::Star);
        assert_eq!(vega.name(), Some("Vega"));
        assert_eq!(vega.magnitude(), 0.03);
        assert_eq!(vega.size_hint(), None);

        let m42 = CelestialBody::DeepSky(catalog.deep_sky_object("m42").unwrap());
        assert_eq!(m42.kind(), BodyKind::DeepSky);
        assert_eq!(m42.size_hint(), Some(85.0));

        let jupiter = CelestialBody::Planet(*eph.planet(Planet::Jupiter));
        assert_eq!(jupiter.id(), "jupiter");
        assert_eq!(jupiter.magnitude(), -2.5);
        assert_eq!(jupiter.size_hint(), Some(5.0));

        let moon = CelestialBody::Moon(eph.moon);
        assert_eq!(moon.equatorial(), eph.moon.equatorial);
        assert_eq!(moon.size_hint(), Some(MOON_BASE_SIZE));

        let sun = CelestialBody::Sun(eph.sun);
        assert_eq!(sun.kind(), BodyKind::Sun);
        assert!(sun.magnitude() < moon.magnitude());
    }
}
