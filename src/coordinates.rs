//! # Sky coordinate systems
//!
//! Value types for the three frames the sky model moves through, and the transforms
//! between them:
//!
//! ```text
//! Ecliptic (λ, β) --rotation about X by ε--> Equatorial (α, δ) --hour angle + latitude--> Horizontal (alt, az)
//! ```
//!
//! ## Conventions
//!
//! - Right ascension is in **hours** `[0, 24)`, declination in **degrees** `[-90, 90]`.
//! - Altitude is in degrees `[-90, 90]`, negative below the horizon.
//! - Azimuth is in degrees `[0, 360)`, measured **from north (0°) through east (90°)**.
//!   Cardinal labels downstream depend on this convention.
//! - Longitudes are east positive.
//!
//! ## Numerical safety
//!
//! All `asin` arguments are clamped to `[-1, 1]` and every normalization is guarded so that a
//! value of exactly `360`/`24` can never be produced by floating-point rounding. The
//! horizontal transform uses the pole-safe azimuth form, so an observer standing on a pole
//! still gets a finite azimuth.
use nalgebra::{Rotation3, Vector3};
use serde::{Deserialize, Serialize};

use crate::constants::{Degree, Hour, Radian, DEG_PER_HOUR};
use crate::sky_errors::SkyError;

/// Wrap an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(angle: Degree) -> Degree {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid of a tiny negative value rounds up to 360.0; -0.0 is folded to +0.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped + 0.0
    }
}

/// Wrap a value in hours into `[0, 24)`.
pub fn normalize_hours(hours: Hour) -> Hour {
    let wrapped = hours.rem_euclid(24.0);
    if wrapped >= 24.0 {
        0.0
    } else {
        wrapped + 0.0
    }
}

/// Wrap an angle difference in degrees into `[-180, 180)`.
pub fn wrap_delta_degrees(delta: Degree) -> Degree {
    normalize_degrees(delta + 180.0) - 180.0
}

/// `asin` with its argument clamped to the valid domain.
pub(crate) fn clamped_asin(x: f64) -> Radian {
    x.clamp(-1.0, 1.0).asin()
}

/// Geographic position of the observer.
///
/// Supplied fresh by the caller for each evaluation and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObserverLocation {
    latitude: Degree,
    longitude: Degree,
}

impl ObserverLocation {
    /// Create a new observer location.
    ///
    /// Arguments
    /// -----------------
    /// * `latitude`: degrees, must be finite and within `[-90, 90]`
    /// * `longitude`: degrees east, any finite value (wrapped to `[-180, 180)`)
    ///
    /// Return
    /// ----------
    /// * the location, or [`SkyError::InvalidLatitude`] / [`SkyError::InvalidLongitude`].
    pub fn new(latitude: Degree, longitude: Degree) -> Result<Self, SkyError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(SkyError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() {
            return Err(SkyError::InvalidLongitude(longitude));
        }

        Ok(ObserverLocation {
            latitude,
            longitude: wrap_delta_degrees(longitude),
        })
    }

    /// Geodetic latitude in **degrees**, `[-90, 90]`.
    pub fn latitude(&self) -> Degree {
        self.latitude
    }

    /// Longitude in **degrees** east of Greenwich, `[-180, 180)`.
    pub fn longitude(&self) -> Degree {
        self.longitude
    }
}

/// Equatorial coordinates, the native frame of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquatorialCoordinate {
    /// Right ascension in **hours**, `[0, 24)`.
    pub ra: Hour,
    /// Declination in **degrees**, `[-90, 90]`.
    pub dec: Degree,
}

impl EquatorialCoordinate {
    /// Build a coordinate, wrapping the right ascension and clamping the declination.
    pub fn new(ra: Hour, dec: Degree) -> Self {
        EquatorialCoordinate {
            ra: normalize_hours(ra),
            dec: dec.clamp(-90.0, 90.0),
        }
    }

    /// Parse right ascension and declination text.
    ///
    /// Both sexagesimal (`"05 55 10.3"`, `"+07 24 25"`) and decimal (`"5.92"`, `"7.41"`)
    /// forms are accepted.
    pub fn parse(ra: &str, dec: &str) -> Result<Self, SkyError> {
        let ra_h = parse_ra_to_hours(ra)
            .ok_or_else(|| SkyError::InvalidCoordinate(format!("right ascension '{ra}'")))?;
        let dec_deg = parse_dec_to_deg(dec)
            .ok_or_else(|| SkyError::InvalidCoordinate(format!("declination '{dec}'")))?;

        if !(0.0..24.0).contains(&ra_h) {
            return Err(SkyError::InvalidCoordinate(format!(
                "right ascension out of range: {ra_h}"
            )));
        }
        if !(-90.0..=90.0).contains(&dec_deg) {
            return Err(SkyError::InvalidCoordinate(format!(
                "declination out of range: {dec_deg}"
            )));
        }

        Ok(EquatorialCoordinate {
            ra: ra_h,
            dec: dec_deg,
        })
    }

    /// Unit vector in the equatorial frame (x toward the equinox, z toward the pole).
    pub fn unit_vector(&self) -> Vector3<f64> {
        let (sin_ra, cos_ra) = (self.ra * DEG_PER_HOUR).to_radians().sin_cos();
        let (sin_dec, cos_dec) = self.dec.to_radians().sin_cos();
        Vector3::new(cos_dec * cos_ra, cos_dec * sin_ra, sin_dec)
    }

    /// Inverse of [`EquatorialCoordinate::unit_vector`].
    pub fn from_vector(v: &Vector3<f64>) -> Self {
        let ra = v.y.atan2(v.x).to_degrees() / DEG_PER_HOUR;
        let dec = clamped_asin(v.z / v.norm()).to_degrees();
        EquatorialCoordinate {
            ra: normalize_hours(ra),
            dec,
        }
    }

    /// Convert to the observer's horizon, see [`equatorial_to_horizontal`].
    pub fn to_horizontal(&self, latitude: Degree, lst: Hour) -> HorizontalCoordinate {
        equatorial_to_horizontal(self, latitude, lst)
    }
}

/// Horizontal (alt/az) coordinates relative to the observer's horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizontalCoordinate {
    /// Altitude in **degrees**, negative below the horizon.
    pub altitude: Degree,
    /// Azimuth in **degrees** from north through east, `[0, 360)`.
    pub azimuth: Degree,
}

impl HorizontalCoordinate {
    pub fn new(altitude: Degree, azimuth: Degree) -> Self {
        HorizontalCoordinate {
            altitude: altitude.clamp(-90.0, 90.0),
            azimuth: normalize_degrees(azimuth),
        }
    }

    /// `true` when the altitude is at or above `cutoff` degrees.
    pub fn is_above(&self, cutoff: Degree) -> bool {
        self.altitude >= cutoff
    }
}

/// The four compass points marked along the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardinalDirection {
    North,
    East,
    South,
    West,
}

impl CardinalDirection {
    pub const ALL: [CardinalDirection; 4] = [
        CardinalDirection::North,
        CardinalDirection::East,
        CardinalDirection::South,
        CardinalDirection::West,
    ];

    /// Azimuth of the direction, from north through east.
    pub fn azimuth(self) -> Degree {
        match self {
            CardinalDirection::North => 0.0,
            CardinalDirection::East => 90.0,
            CardinalDirection::South => 180.0,
            CardinalDirection::West => 270.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CardinalDirection::North => "N",
            CardinalDirection::East => "E",
            CardinalDirection::South => "S",
            CardinalDirection::West => "W",
        }
    }

    /// The point of the horizon in this direction.
    pub fn on_horizon(self) -> HorizontalCoordinate {
        HorizontalCoordinate::new(0.0, self.azimuth())
    }
}

/// Ecliptic longitude/latitude, the natural frame of the Sun, Moon and planet models.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EclipticCoordinate {
    /// Ecliptic longitude λ in **degrees**.
    pub longitude: Degree,
    /// Ecliptic latitude β in **degrees**.
    pub latitude: Degree,
}

impl EclipticCoordinate {
    pub fn new(longitude: Degree, latitude: Degree) -> Self {
        EclipticCoordinate {
            longitude,
            latitude,
        }
    }

    /// Rotate into the equatorial frame for the given obliquity of the ecliptic.
    ///
    /// The ecliptic unit vector is turned about the X axis (direction of the equinox) by
    /// `+ε`, which reproduces the classical
    /// `α = atan2(sinλ cosε − tanβ sinε, cosλ)`, `δ = asin(sinβ cosε + cosβ sinε sinλ)`.
    pub fn to_equatorial(&self, obliquity: Degree) -> EquatorialCoordinate {
        let (sin_lon, cos_lon) = self.longitude.to_radians().sin_cos();
        let (sin_lat, cos_lat) = self.latitude.to_radians().sin_cos();
        let ecliptic = Vector3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat);

        let equatorial = ecliptic_to_equatorial_rotation(obliquity) * ecliptic;
        EquatorialCoordinate::from_vector(&equatorial)
    }
}

/// Rotation matrix from the ecliptic to the equatorial frame.
///
/// Active rotation about the X axis by the obliquity `ε` (degrees).
pub fn ecliptic_to_equatorial_rotation(obliquity: Degree) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Vector3::x_axis(), obliquity.to_radians())
}

/// Local hour angle in degrees, `H = (LST − RA)·15`.
pub fn hour_angle(lst: Hour, ra: Hour) -> Degree {
    (lst - ra) * DEG_PER_HOUR
}

/// Convert equatorial coordinates to horizontal coordinates.
///
/// Arguments
/// -----------------
/// * `eq`: right ascension (hours) and declination (degrees) of the target
/// * `latitude`: observer latitude in degrees
/// * `lst`: local sidereal time in hours
///
/// Return
/// ----------
/// * altitude in degrees and azimuth in degrees from north through east.
///
/// Details
/// ----------
/// `sin(alt) = sinφ sinδ + cosφ cosδ cosH`, clamped before `asin`.
/// The azimuth uses `atan2(−cosδ sinH, sinδ cosφ − sinφ cosδ cosH)`: the two arguments
/// of the usual `(sinδ − sinφ sin(alt)) / (cosφ cos(alt))` form multiplied by the
/// non-negative factor `cosφ·cos(alt)`. The direction is unchanged, but the expression stays
/// finite at the poles (φ = ±90°) where it degenerates to the limit azimuth `H + 180°`
/// (north pole) or `−H` (south pole). A target exactly at the zenith gets azimuth 0.
pub fn equatorial_to_horizontal(
    eq: &EquatorialCoordinate,
    latitude: Degree,
    lst: Hour,
) -> HorizontalCoordinate {
    let ha = hour_angle(lst, eq.ra).to_radians();
    let (sin_lat, cos_lat) = latitude.to_radians().sin_cos();
    let (sin_dec, cos_dec) = eq.dec.to_radians().sin_cos();
    let (sin_ha, cos_ha) = ha.sin_cos();

    let sin_alt = sin_lat * sin_dec + cos_lat * cos_dec * cos_ha;
    let altitude = clamped_asin(sin_alt).to_degrees();

    let y = -cos_dec * sin_ha;
    let x = sin_dec * cos_lat - sin_lat * cos_dec * cos_ha;
    let azimuth = normalize_degrees(y.atan2(x).to_degrees());

    HorizontalCoordinate { altitude, azimuth }
}

/// Parse a right ascension string to hours.
///
/// Arguments
/// ---------
/// * `ra`: either `HH MM SS.SS` or decimal hours
///
/// Returns
/// -------
/// * the right ascension in hours, `None` if the input format is invalid.
pub(crate) fn parse_ra_to_hours(ra: &str) -> Option<Hour> {
    let parts: Vec<&str> = ra.split_whitespace().collect();
    match parts.as_slice() {
        [decimal] => decimal.parse().ok(),
        [h, m, s] => {
            let h: f64 = h.parse().ok()?;
            let m: f64 = m.parse().ok()?;
            let s: f64 = s.parse().ok()?;
            Some(h + m / 60.0 + s / 3600.0)
        }
        _ => None,
    }
}

/// Parse a declination string to degrees
///
/// Arguments
/// ---------
/// * `dec`: either `±DD MM SS.SS` or decimal degrees
///
/// Returns
/// -------
/// * the declination in degrees, `None` if the input format is invalid.
pub(crate) fn parse_dec_to_deg(dec: &str) -> Option<Degree> {
    let parts: Vec<&str> = dec.split_whitespace().collect();
    match parts.as_slice() {
        [decimal] => decimal.parse().ok(),
        [d, m, s] => {
            let sign = if d.starts_with('-') { -1.0 } else { 1.0 };
            let d: f64 = d.trim_start_matches(&['-', '+'][..]).parse().ok()?;
            let m: f64 = m.parse().ok()?;
            let s: f64 = s.parse().ok()?;
            Some(sign * (d + m / 60.0 + s / 3600.0))
        }
        _ => None,
    }
}
