//! # Satellite tracking
//!
//! Places a satellite (the ISS by default) on the observer's sky from a **geographic
//! snapshot**: sub-satellite latitude/longitude, orbital altitude and timestamp, as published
//! by live position feeds. Fetching the feed is the caller's business; an absent snapshot is a
//! normal input and [`simulated_snapshot`] provides a plausible stand-in orbit.
//!
//! ## Geometry
//!
//! The apparent position is derived from the great circle between the observer and the
//! sub-satellite point:
//!
//! - the haversine central angle `c` decides visibility (`c < 81°` for a 420 km orbit),
//! - the **initial bearing** of the great circle is the azimuth,
//! - the elevation falls linearly from 90° overhead to 0° at the visibility limit:
//!   `elevation = 90 − c·(90/81)`.
//!
//! This is a visual approximation and does not account for the Earth's curvature in the
//! elevation.
use std::collections::VecDeque;

use nalgebra::Vector3;
use serde::Serialize;
use tracing::trace;

use crate::constants::{Degree, Kilometer, DPI};
use crate::coordinates::{
    normalize_degrees, wrap_delta_degrees, HorizontalCoordinate, ObserverLocation,
};
use crate::sky_errors::SkyError;

/// Central angle (degrees) beyond which a 420 km orbit is below the horizon.
pub const DEFAULT_HORIZON_ANGLE: Degree = 81.0;

/// Orbital period of the simulated orbit, in minutes.
pub const SIMULATED_PERIOD_MINUTES: f64 = 92.68;

/// Inclination of the simulated orbit (degrees).
pub const SIMULATED_INCLINATION: Degree = 51.6;

/// Altitude of the simulated orbit.
pub const SIMULATED_ALTITUDE_KM: Kilometer = 420.0;

/// Maximum number of points kept by a [`SatelliteTrail`].
pub const TRAIL_CAPACITY: usize = 100;

/// Minimum distance between two consecutive trail points, in sphere units.
pub const TRAIL_MIN_SPACING: f64 = 2.0;

/// One reading of a satellite position feed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SatelliteSnapshot {
    latitude: Degree,
    longitude: Degree,
    altitude: Kilometer,
    timestamp: f64,
}

impl SatelliteSnapshot {
    pub fn new(
        latitude: Degree,
        longitude: Degree,
        altitude: Kilometer,
        timestamp: f64,
    ) -> Result<Self, SkyError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(SkyError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() {
            return Err(SkyError::InvalidLongitude(longitude));
        }
        if !(altitude.is_finite() && timestamp.is_finite()) {
            return Err(SkyError::InvalidSkyParameter(
                "satellite altitude and timestamp must be finite".into(),
            ));
        }
        Ok(SatelliteSnapshot {
            latitude,
            longitude: wrap_delta_degrees(longitude),
            altitude,
            timestamp,
        })
    }

    /// Sub-satellite latitude (degrees).
    pub fn latitude(&self) -> Degree {
        self.latitude
    }

    /// Sub-satellite longitude (degrees east), `[-180, 180)`.
    pub fn longitude(&self) -> Degree {
        self.longitude
    }

    /// Altitude above the surface in kilometers.
    pub fn altitude(&self) -> Kilometer {
        self.altitude
    }

    /// Unix timestamp of the reading, in seconds.
    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }
}

/// Apparent position of a visible satellite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SatelliteLookAngles {
    pub horizontal: HorizontalCoordinate,
    /// Great-circle distance between the observer and the sub-satellite point (degrees).
    pub central_angle: Degree,
}

/// Haversine central angle between two geographic points, in degrees.
pub fn central_angle(lat1: Degree, lon1: Degree, lat2: Degree, lon2: Degree) -> Degree {
    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
    let d_phi = phi2 - phi1;
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let a = a.clamp(0.0, 1.0);
    (2.0 * a.sqrt().atan2((1.0 - a).sqrt())).to_degrees()
}

/// Initial bearing of the great circle from point 1 to point 2, degrees in `[0, 360)`.
pub fn initial_bearing(lat1: Degree, lon1: Degree, lat2: Degree, lon2: Degree) -> Degree {
    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
    let d_lambda = (lon2 - lon1).to_radians();

    let y = d_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lambda.cos();
    normalize_degrees(y.atan2(x).to_degrees())
}

/// Where the satellite appears on the observer's sky.
///
/// Arguments
/// -----------------
/// * `observer`: geographic position of the observer
/// * `snapshot`: sub-satellite point
/// * `horizon_angle`: central angle at which the satellite sets (degrees)
///
/// Return
/// ----------
/// * `None` when the satellite is beyond `horizon_angle`, otherwise its elevation and
///   azimuth.
pub fn look_angles(
    observer: &ObserverLocation,
    snapshot: &SatelliteSnapshot,
    horizon_angle: Degree,
) -> Option<SatelliteLookAngles> {
    let c = central_angle(
        observer.latitude(),
        observer.longitude(),
        snapshot.latitude(),
        snapshot.longitude(),
    );
    if c >= horizon_angle {
        trace!(central_angle = c, "satellite below the horizon");
        return None;
    }

    let azimuth = initial_bearing(
        observer.latitude(),
        observer.longitude(),
        snapshot.latitude(),
        snapshot.longitude(),
    );
    let elevation = 90.0 - c * (90.0 / horizon_angle);

    Some(SatelliteLookAngles {
        horizontal: HorizontalCoordinate::new(elevation, azimuth),
        central_angle: c,
    })
}

/// Stand-in orbit used when no live snapshot is available.
///
/// The latitude oscillates between ±51.6° over one 92.68 min period and the longitude sweeps
/// 4° per minute: `lat = 51.6·sin(2π·phase)`, `lon = ((t/60)·4) mod 360 − 180`.
pub fn simulated_snapshot(unix_seconds: f64) -> SatelliteSnapshot {
    let period = SIMULATED_PERIOD_MINUTES * 60.0;
    let angle = unix_seconds.rem_euclid(period) / period * DPI;

    SatelliteSnapshot {
        latitude: SIMULATED_INCLINATION * angle.sin(),
        longitude: ((unix_seconds / 60.0) * 4.0).rem_euclid(360.0) - 180.0,
        altitude: SIMULATED_ALTITUDE_KM,
        timestamp: unix_seconds,
    }
}

/// Bounded history of a satellite's positions on the sky sphere.
///
/// A point is recorded only when it moved more than [`TRAIL_MIN_SPACING`] from the last one;
/// the oldest points are evicted beyond [`TRAIL_CAPACITY`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SatelliteTrail {
    points: VecDeque<Vector3<f64>>,
}

impl SatelliteTrail {
    pub fn new() -> Self {
        SatelliteTrail {
            points: VecDeque::with_capacity(TRAIL_CAPACITY),
        }
    }

    /// Record a new position; returns `true` if it was appended.
    pub fn push(&mut self, position: Vector3<f64>) -> bool {
        if let Some(last) = self.points.back() {
            if (last - position).norm() <= TRAIL_MIN_SPACING {
                return false;
            }
        }
        if self.points.len() == TRAIL_CAPACITY {
            self.points.pop_front();
        }
        self.points.push_back(position);
        true
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points from oldest to newest.
    pub fn points(&self) -> impl Iterator<Item = &Vector3<f64>> + '_ {
        self.points.iter()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

#[cfg(test)]
mod satellite_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_overhead() {
        let observer = ObserverLocation::new(48.85, 2.35).unwrap();
        let iss = SatelliteSnapshot::new(48.85, 2.35, 420.0, 0.0).unwrap();
        let look = look_angles(&observer, &iss, DEFAULT_HORIZON_ANGLE).unwrap();
        assert_abs_diff_eq!(look.horizontal.altitude, 90.0, epsilon = 1e-9);
        assert_eq!(look.central_angle, 0.0);
    }

    #[test]
    fn test_antipodal_not_visible() {
        let observer = ObserverLocation::new(10.0, 20.0).unwrap();
        let iss = SatelliteSnapshot::new(-10.0, -160.0, 420.0, 0.0).unwrap();
        assert_abs_diff_eq!(
            central_angle(10.0, 20.0, -10.0, -160.0),
            180.0,
            epsilon = 1e-6
        );
        assert_eq!(look_angles(&observer, &iss, DEFAULT_HORIZON_ANGLE), None);
    }

    #[test]
    fn test_bearing_and_elevation() {
        let observer = ObserverLocation::new(0.0, 0.0).unwrap();

        // 9° due north: bearing 0, elevation 80
        let iss = SatelliteSnapshot::new(9.0, 0.0, 420.0, 0.0).unwrap();
        let look = look_angles(&observer, &iss, DEFAULT_HORIZON_ANGLE).unwrap();
        assert_abs_diff_eq!(look.horizontal.azimuth, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(look.horizontal.altitude, 80.0, epsilon = 1e-9);

        // due east along the equator
        let iss = SatelliteSnapshot::new(0.0, 27.0, 420.0, 0.0).unwrap();
        let look = look_angles(&observer, &iss, DEFAULT_HORIZON_ANGLE).unwrap();
        assert_abs_diff_eq!(look.horizontal.azimuth, 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(look.horizontal.altitude, 60.0, epsilon = 1e-9);

        // due west across the antimeridian
        let observer = ObserverLocation::new(0.0, 179.0).unwrap();
        let iss = SatelliteSnapshot::new(0.0, -179.0, 420.0, 0.0).unwrap();
        let look = look_angles(&observer, &iss, DEFAULT_HORIZON_ANGLE).unwrap();
        assert_abs_diff_eq!(look.horizontal.azimuth, 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(look.central_angle, 2.0, epsilon = 1e-9);

        // just past the limit
        let iss = SatelliteSnapshot::new(0.0, 179.0 - 81.5, 420.0, 0.0).unwrap();
        assert!(look_angles(&observer, &iss, DEFAULT_HORIZON_ANGLE).is_none());
    }

    #[test]
    fn test_snapshot_validation() {
        assert!(SatelliteSnapshot::new(95.0, 0.0, 420.0, 0.0).is_err());
        assert!(SatelliteSnapshot::new(0.0, f64::NAN, 420.0, 0.0).is_err());
        assert!(SatelliteSnapshot::new(0.0, 0.0, f64::INFINITY, 0.0).is_err());
        let s = SatelliteSnapshot::new(0.0, 200.0, 420.0, 0.0).unwrap();
        assert_abs_diff_eq!(s.longitude(), -160.0, epsilon = 1e-12);
    }

    #[test]
    fn test_simulated_orbit() {
        let s = simulated_snapshot(0.0);
        assert_eq!(s.latitude(), 0.0);
        assert_eq!(s.longitude(), -180.0);
        assert_eq!(s.altitude(), 420.0);

        let quarter = SIMULATED_PERIOD_MINUTES * 60.0 / 4.0;
        let s = simulated_snapshot(quarter);
        assert_abs_diff_eq!(s.latitude(), 51.6, epsilon = 1e-9);

        for t in (0..200_000).step_by(613) {
            let s = simulated_snapshot(1.7e9 + t as f64);
            assert!(s.latitude().abs() <= 51.6 + 1e-12);
            assert!((-180.0..180.0).contains(&s.longitude()));
        }
    }

    #[test]
    fn test_trail() {
        let mut trail = SatelliteTrail::new();
        assert!(trail.push(Vector3::new(0.0, 0.0, 300.0)));
        assert!(!trail.push(Vector3::new(1.0, 0.0, 300.0)));
        assert!(trail.push(Vector3::new(3.0, 0.0, 300.0)));
        assert_eq!(trail.len(), 2);

        for i in 0..250 {
            trail.push(Vector3::new(10.0 * i as f64, 0.0, 0.0));
        }
        assert_eq!(trail.len(), TRAIL_CAPACITY);
        assert_eq!(trail.points().last().unwrap().x, 2490.0);
        assert_eq!(trail.points().next().unwrap().x, 1500.0);

        trail.clear();
        assert!(trail.is_empty());
    }
}
