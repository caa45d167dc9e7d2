//! # Projection of horizontal coordinates
//!
//! Two targets are supported:
//!
//! 1. **Flat screen** ([`project_to_screen`]): a simple equirectangular mapping of the
//!    angular offset from the view center, scaled so that `fov` degrees span the smaller
//!    viewport dimension. Azimuth offsets are wrapped into `[-180, 180)` so a view centered
//!    near north sees objects on both sides of the 0°/360° seam.
//! 2. **Celestial sphere** ([`project_to_sphere`]): a 3D point on a sphere of given radius
//!    around the observer, in a right-handed frame with **+y up** and the camera looking down
//!    **−z** toward south (azimuth 180°).
//!
//! ```text
//!                 +y (zenith)
//!                  |
//!                  |
//!                  +------ +x (west)
//!                 /
//!               +z (north)
//! ```
//!
//! Everything here is pure and allocation-free.
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::Degree;
use crate::coordinates::{normalize_degrees, wrap_delta_degrees, HorizontalCoordinate};
use crate::sky_errors::SkyError;

/// An object is drawn when its angular offset from the view center is below `fov / 1.5`.
pub const DEFAULT_VISIBILITY_DIVISOR: f64 = 1.5;

/// Sun altitude (degrees) below which the sky is fully dark.
pub const ASTRONOMICAL_TWILIGHT: Degree = -18.0;

/// Where the observer is looking and how wide.
///
/// Only [`ViewState::new`] builds a view, so the field of view is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewState {
    azimuth: Degree,
    altitude: Degree,
    fov: Degree,
}

impl ViewState {
    /// Validate and build a view.
    ///
    /// Arguments
    /// -----------------
    /// * `azimuth`: any finite value, wrapped to `[0, 360)`
    /// * `altitude`: finite, within `[-90, 90]`
    /// * `fov`: finite, within `(0, 180]`
    ///
    /// Return
    /// ----------
    /// * the view, or [`SkyError::InvalidViewState`].
    pub fn new(azimuth: Degree, altitude: Degree, fov: Degree) -> Result<Self, SkyError> {
        if !azimuth.is_finite() {
            return Err(SkyError::InvalidViewState(format!(
                "azimuth must be finite, got {azimuth}"
            )));
        }
        if !(altitude.is_finite() && (-90.0..=90.0).contains(&altitude)) {
            return Err(SkyError::InvalidViewState(format!(
                "altitude must be within [-90, 90], got {altitude}"
            )));
        }
        if !(fov.is_finite() && fov > 0.0 && fov <= 180.0) {
            return Err(SkyError::InvalidViewState(format!(
                "field of view must be within (0, 180], got {fov}"
            )));
        }

        Ok(ViewState {
            azimuth: normalize_degrees(azimuth),
            altitude,
            fov,
        })
    }

    /// Azimuth of the view center, `[0, 360)`.
    pub fn azimuth(&self) -> Degree {
        self.azimuth
    }

    /// Altitude of the view center, `[-90, 90]`.
    pub fn altitude(&self) -> Degree {
        self.altitude
    }

    /// Field of view, `(0, 180]`.
    pub fn fov(&self) -> Degree {
        self.fov
    }
}

impl Default for ViewState {
    /// Looking south, 30° up, with a 90° field of view.
    fn default() -> Self {
        ViewState {
            azimuth: 180.0,
            altitude: 30.0,
            fov: 90.0,
        }
    }
}

/// Drawing surface size in pixels, both strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    width: f64,
    height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Result<Self, SkyError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(SkyError::InvalidViewState(format!(
                "viewport must have a positive finite size, got {width}x{height}"
            )));
        }
        Ok(Viewport { width, height })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Pixels per degree for the given field of view.
    pub fn scale(&self, fov: Degree) -> f64 {
        self.width.min(self.height) / fov
    }
}

/// Result of a flat projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
    /// `true` if the point is inside the visible cone of the view.
    pub visible: bool,
}

/// Project a horizontal coordinate onto the screen.
///
/// Arguments
/// -----------------
/// * `hz`: altitude and azimuth of the object
/// * `view`: view center and field of view
/// * `viewport`: drawing surface in pixels
/// * `visibility_divisor`: the visible cone has radius `fov / visibility_divisor`
///
/// Return
/// ----------
/// * pixel coordinates (origin top-left, y down) and the visibility flag.
///
/// Details
/// ----------
/// ```text
/// ΔAz = wrap(az − viewAz) ∈ [-180, 180)
/// ΔAlt = alt − viewAlt
/// visible ⇔ √(ΔAz² + ΔAlt²) < fov / divisor
/// x = w/2 + ΔAz·s,  y = h/2 − ΔAlt·s,  s = min(w, h)/fov
/// ```
pub fn project_to_screen(
    hz: &HorizontalCoordinate,
    view: &ViewState,
    viewport: &Viewport,
    visibility_divisor: f64,
) -> ScreenPoint {
    let delta_az = wrap_delta_degrees(hz.azimuth - view.azimuth());
    let delta_alt = hz.altitude - view.altitude();

    let angular_distance = delta_az.hypot(delta_alt);
    let scale = viewport.scale(view.fov());

    ScreenPoint {
        x: viewport.width() / 2.0 + delta_az * scale,
        y: viewport.height() / 2.0 - delta_alt * scale,
        visible: angular_distance < view.fov() / visibility_divisor,
    }
}

/// Place a horizontal coordinate on a sphere of the given radius.
///
/// `az' = az − 180°`, then `(r·cos(alt)·sin(az'), r·sin(alt), −r·cos(alt)·cos(az'))`.
/// North is +z, east is −x, the zenith is +y.
pub fn project_to_sphere(hz: &HorizontalCoordinate, radius: f64) -> Vector3<f64> {
    let (sin_alt, cos_alt) = hz.altitude.to_radians().sin_cos();
    let (sin_az, cos_az) = (hz.azimuth - 180.0).to_radians().sin_cos();

    Vector3::new(
        radius * cos_alt * sin_az,
        radius * sin_alt,
        -radius * cos_alt * cos_az,
    )
}

/// Screen y of the horizon line for the current view.
///
/// The line is on screen only when the result lies within `(0, height)`.
pub fn horizon_screen_y(view: &ViewState, viewport: &Viewport) -> f64 {
    viewport.height() / 2.0 + view.altitude() * viewport.scale(view.fov())
}

/// Strength of the twilight glow on the horizon for the given Sun altitude.
///
/// Return
/// ----------
/// * `Some((alt + 18) / 18)` while the Sun is between −18° and 0°, `None` otherwise
///   (full night, or daylight).
pub fn twilight_intensity(sun_altitude: Degree) -> Option<f64> {
    if sun_altitude > ASTRONOMICAL_TWILIGHT && sun_altitude < 0.0 {
        Some((sun_altitude - ASTRONOMICAL_TWILIGHT) / -ASTRONOMICAL_TWILIGHT)
    } else {
        None
    }
}
