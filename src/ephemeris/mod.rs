//! # Low-precision ephemeris
//!
//! Analytic models for the bodies whose position changes noticeably from one night to the
//! next: the [`sun`], the [`moon`] and the five naked-eye [`planets`].
//!
//! ## Precision
//!
//! These are **visual** models. The Sun is good to about a hundredth of a degree over a few
//! decades around J2000, the Moon to a degree or so. The planet model is a stylized motion
//! along the ecliptic with a synthetic latitude wobble and is *not* orbital mechanics: it
//! keeps planets in the zodiac band and moving at their mean rate, nothing more.
//!
//! ## Usage
//!
//! All three models are evaluated together once per tick through [`Ephemeris::at`], which
//! holds its results in fixed-size storage so a frame never allocates for them.
//!
//! ```rust
//! use skydome::ephemeris::Ephemeris;
//!
//! let eph = Ephemeris::at(2_451_545.0);
//! assert!(eph.moon.phase >= 0.0 && eph.moon.phase <= 1.0);
//! assert_eq!(eph.planets.len(), 5);
//! ```
pub mod moon;
pub mod planets;
pub mod sun;

use crate::constants::JulianDate;

pub use moon::{moon_position, MoonPosition};
pub use planets::{planet_position, planet_positions, Planet, PlanetPosition};
pub use sun::{sun_position, SunPosition};

/// Positions of every solar-system body at a single instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ephemeris {
    pub julian_date: JulianDate,
    pub sun: SunPosition,
    pub moon: MoonPosition,
    pub planets: [PlanetPosition; Planet::COUNT],
}

impl Ephemeris {
    /// Evaluate the Sun, Moon and planet models at the given Julian Date.
    pub fn at(jd: JulianDate) -> Self {
        Ephemeris {
            julian_date: jd,
            sun: sun_position(jd),
            moon: moon_position(jd),
            planets: planet_positions(jd),
        }
    }

    /// Position of one planet from the evaluated set.
    pub fn planet(&self, planet: Planet) -> &PlanetPosition {
        &self.planets[planet.index()]
    }
}

#[cfg(test)]
mod ephemeris_test {
    use super::*;

    #[test]
    fn test_ephemeris_at() {
        let eph = Ephemeris::at(2_460_389.5);
        assert_eq!(eph.sun, sun_position(2_460_389.5));
        assert_eq!(eph.moon, moon_position(2_460_389.5));
        for planet in Planet::ALL {
            assert_eq!(eph.planet(planet).planet, planet);
        }
    }
}
