//! Stylized positions of the five naked-eye planets.
//!
//! Each planet advances along the ecliptic at its mean daily motion from a J2000 mean
//! longitude. A synthetic latitude `β = 3·sin(0.1·L)` lifts it off the ecliptic so the five
//! planets do not sit on a single line. This is a visual stand-in for orbital mechanics:
//! geocentric effects such as retrograde loops and elongation limits are not modelled.
//!
//! The mean longitude is reduced with a *truncating* remainder, so before J2000 it goes
//! negative and the latitude wobble takes the opposite sign. The rendered sky has always
//! behaved this way and it is kept.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{Degree, JulianDate, Magnitude, J2000_JD, OBLIQUITY_J2000};
use crate::coordinates::{EclipticCoordinate, EquatorialCoordinate};
use crate::visual::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Planet {
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
}

/// Mean elements and display attributes of one planet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetElements {
    /// Mean longitude at J2000 (degrees).
    pub mean_longitude_j2000: Degree,
    /// Mean daily motion (degrees/day).
    pub daily_motion: Degree,
    pub color: Rgb,
    /// Fixed display magnitude.
    pub magnitude: Magnitude,
    /// Base sprite radius in pixels at the reference field of view.
    pub size: f64,
}

impl Planet {
    pub const COUNT: usize = 5;

    pub const ALL: [Planet; Planet::COUNT] = [
        Planet::Mercury,
        Planet::Venus,
        Planet::Mars,
        Planet::Jupiter,
        Planet::Saturn,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Planet::Mercury => "Mercury",
            Planet::Venus => "Venus",
            Planet::Mars => "Mars",
            Planet::Jupiter => "Jupiter",
            Planet::Saturn => "Saturn",
        }
    }

    /// Lowercase identifier, as used for search and body ids.
    pub fn id(self) -> &'static str {
        match self {
            Planet::Mercury => "mercury",
            Planet::Venus => "venus",
            Planet::Mars => "mars",
            Planet::Jupiter => "jupiter",
            Planet::Saturn => "saturn",
        }
    }

    pub fn elements(self) -> PlanetElements {
        let (l0, n, color, magnitude, size) = match self {
            Planet::Mercury => (252.251, 4.092_317, Rgb::new(0xb5, 0xa7, 0xa7), -0.4, 3.0),
            Planet::Venus => (181.980, 1.602_136, Rgb::new(0xf5, 0xe6, 0xc8), -4.4, 4.0),
            Planet::Mars => (355.433, 0.524_039, Rgb::new(0xe2, 0x7b, 0x58), 0.7, 3.0),
            Planet::Jupiter => (34.351, 0.083_056, Rgb::new(0xd4, 0xc4, 0xa8), -2.5, 5.0),
            Planet::Saturn => (50.077, 0.033_371, Rgb::new(0xe8, 0xdc, 0xc0), 0.5, 4.0),
        };
        PlanetElements {
            mean_longitude_j2000: l0,
            daily_motion: n,
            color,
            magnitude,
            size,
        }
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetPosition {
    pub planet: Planet,
    pub ecliptic: EclipticCoordinate,
    pub equatorial: EquatorialCoordinate,
    pub magnitude: Magnitude,
    pub color: Rgb,
    pub size: f64,
}

/// Compute the stylized position of one planet.
///
/// Arguments
/// -----------------
/// * `planet`: which planet
/// * `jd`: Julian Date
///
/// Return
/// ----------
/// * the planet's ecliptic and equatorial position with its display attributes.
pub fn planet_position(planet: Planet, jd: JulianDate) -> PlanetPosition {
    let elements = planet.elements();
    let days = jd - J2000_JD;

    let longitude = (elements.mean_longitude_j2000 + elements.daily_motion * days) % 360.0;
    let latitude = 3.0 * (0.1 * longitude).to_radians().sin();

    let ecliptic = EclipticCoordinate::new(longitude, latitude);
    PlanetPosition {
        planet,
        ecliptic,
        equatorial: ecliptic.to_equatorial(OBLIQUITY_J2000),
        magnitude: elements.magnitude,
        color: elements.color,
        size: elements.size,
    }
}

/// Positions of all five planets, in [`Planet::ALL`] order.
pub fn planet_positions(jd: JulianDate) -> [PlanetPosition; Planet::COUNT] {
    Planet::ALL.map(|planet| planet_position(planet, jd))
}
