//! # Sky rendering parameters
//!
//! [`SkyConfig`] gathers every tunable of the per-frame pipeline in a single value, with
//! defaults matching the classic look of the sky view and a validating fluent builder.
//!
//! ## Parameters
//!
//! - **Horizon cutoffs**: stars are kept down to 5° below the horizon so the star field does
//!   not end abruptly; every other body disappears at 0°. Constellation lines on the sphere
//!   and the Milky Way glow reach down to −10°.
//! - **Visibility cone**: an object is drawn when its offset from the view center is below
//!   `fov / visibility_divisor`.
//! - **Sprite scaling**: sizes are specified at `reference_fov` and scaled by
//!   `reference_fov / fov`.
//! - **Sphere radii**: each kind of body lives on its own shell so nearer bodies are drawn
//!   over farther ones (stars outermost, the satellite innermost).
//! - **Magnitude scale**: see [`MagnitudeScale`].
//! - **Satellite horizon**: central angle at which the tracked satellite sets.
//! - **Background stars**: how many faint stars to generate, and from which seed.
//!
//! ## Example
//!
//! ```rust
//! use skydome::config::SkyConfig;
//!
//! let config = SkyConfig::builder()
//!     .star_horizon_cutoff(-2.0)
//!     .background_star_count(1000)
//!     .background_seed(7)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.background_star_count(), 1000);
//! ```
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::BodyKind;
use crate::constants::Degree;
use crate::projection::DEFAULT_VISIBILITY_DIVISOR;
use crate::satellite::DEFAULT_HORIZON_ANGLE;
use crate::sky_errors::SkyError;
use crate::visual::{MagnitudeScale, REFERENCE_FOV};

/// Radius of the shell each kind of body is drawn on, in scene units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphereRadii {
    pub star: f64,
    pub deep_sky: f64,
    pub planet: f64,
    pub moon: f64,
    pub sun: f64,
    pub satellite: f64,
    /// Constellation stick figures, just inside the star shell.
    pub constellation_line: f64,
    /// Milky Way glow, behind the constellation figures.
    pub milky_way: f64,
}

impl Default for SphereRadii {
    fn default() -> Self {
        SphereRadii {
            star: 500.0,
            deep_sky: 450.0,
            planet: 400.0,
            moon: 350.0,
            sun: 350.0,
            satellite: 300.0,
            constellation_line: 495.0,
            milky_way: 490.0,
        }
    }
}

impl SphereRadii {
    pub fn for_kind(&self, kind: BodyKind) -> f64 {
        match kind {
            BodyKind::Star => self.star,
            BodyKind::DeepSky => self.deep_sky,
            BodyKind::Planet => self.planet,
            BodyKind::Moon => self.moon,
            BodyKind::Sun => self.sun,
        }
    }

    fn all(&self) -> [f64; 8] {
        [
            self.star,
            self.deep_sky,
            self.planet,
            self.moon,
            self.sun,
            self.satellite,
            self.constellation_line,
            self.milky_way,
        ]
    }
}

/// Validated pipeline parameters, built through [`SkyConfig::builder`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkyConfig {
    star_horizon_cutoff: Degree,
    body_horizon_cutoff: Degree,
    constellation_line_cutoff: Degree,
    milky_way_cutoff: Degree,
    visibility_divisor: f64,
    reference_fov: Degree,
    sphere_radii: SphereRadii,
    magnitude_scale: MagnitudeScale,
    satellite_horizon_angle: Degree,
    background_star_count: usize,
    background_seed: u64,
}

impl Default for SkyConfig {
    fn default() -> Self {
        SkyConfig {
            star_horizon_cutoff: -5.0,
            body_horizon_cutoff: 0.0,
            constellation_line_cutoff: -10.0,
            milky_way_cutoff: -10.0,
            visibility_divisor: DEFAULT_VISIBILITY_DIVISOR,
            reference_fov: REFERENCE_FOV,
            sphere_radii: SphereRadii::default(),
            magnitude_scale: MagnitudeScale::default(),
            satellite_horizon_angle: DEFAULT_HORIZON_ANGLE,
            background_star_count: 4000,
            background_seed: 0x5EED,
        }
    }
}

impl SkyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a [`SkyConfigBuilder`] starting from the defaults.
    pub fn builder() -> SkyConfigBuilder {
        SkyConfigBuilder::new()
    }

    /// Lowest altitude at which stars are still drawn (degrees).
    pub fn star_horizon_cutoff(&self) -> Degree {
        self.star_horizon_cutoff
    }

    /// Lowest altitude at which deep-sky objects, planets, the Moon and the Sun are drawn.
    pub fn body_horizon_cutoff(&self) -> Degree {
        self.body_horizon_cutoff
    }

    /// Lowest altitude of the endpoints of a constellation line on the sphere.
    pub fn constellation_line_cutoff(&self) -> Degree {
        self.constellation_line_cutoff
    }

    /// Lowest altitude of a Milky Way glow puff.
    pub fn milky_way_cutoff(&self) -> Degree {
        self.milky_way_cutoff
    }

    pub fn visibility_divisor(&self) -> f64 {
        self.visibility_divisor
    }

    pub fn reference_fov(&self) -> Degree {
        self.reference_fov
    }

    pub fn sphere_radii(&self) -> &SphereRadii {
        &self.sphere_radii
    }

    pub fn magnitude_scale(&self) -> &MagnitudeScale {
        &self.magnitude_scale
    }

    pub fn satellite_horizon_angle(&self) -> Degree {
        self.satellite_horizon_angle
    }

    pub fn background_star_count(&self) -> usize {
        self.background_star_count
    }

    pub fn background_seed(&self) -> u64 {
        self.background_seed
    }

    /// Horizon cutoff for the given kind of body.
    pub fn horizon_cutoff(&self, kind: BodyKind) -> Degree {
        match kind {
            BodyKind::Star => self.star_horizon_cutoff,
            BodyKind::DeepSky | BodyKind::Planet | BodyKind::Moon | BodyKind::Sun => {
                self.body_horizon_cutoff
            }
        }
    }
}

/// Builder for [`SkyConfig`], with validation.
#[derive(Debug, Clone, Default)]
pub struct SkyConfigBuilder {
    config: SkyConfig,
}

impl SkyConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: SkyConfig::default(),
        }
    }

    pub fn star_horizon_cutoff(mut self, v: Degree) -> Self {
        self.config.star_horizon_cutoff = v;
        self
    }

    pub fn body_horizon_cutoff(mut self, v: Degree) -> Self {
        self.config.body_horizon_cutoff = v;
        self
    }

    pub fn constellation_line_cutoff(mut self, v: Degree) -> Self {
        self.config.constellation_line_cutoff = v;
        self
    }

    pub fn milky_way_cutoff(mut self, v: Degree) -> Self {
        self.config.milky_way_cutoff = v;
        self
    }

    pub fn visibility_divisor(mut self, v: f64) -> Self {
        self.config.visibility_divisor = v;
        self
    }

    pub fn reference_fov(mut self, v: Degree) -> Self {
        self.config.reference_fov = v;
        self
    }

    pub fn sphere_radii(mut self, v: SphereRadii) -> Self {
        self.config.sphere_radii = v;
        self
    }

    pub fn magnitude_scale(mut self, v: MagnitudeScale) -> Self {
        self.config.magnitude_scale = v;
        self
    }

    pub fn satellite_horizon_angle(mut self, v: Degree) -> Self {
        self.config.satellite_horizon_angle = v;
        self
    }

    pub fn background_star_count(mut self, v: usize) -> Self {
        self.config.background_star_count = v;
        self
    }

    pub fn background_seed(mut self, v: u64) -> Self {
        self.config.background_seed = v;
        self
    }

    fn is_altitude(v: f64) -> bool {
        v.is_finite() && (-90.0..=90.0).contains(&v)
    }

    fn gt0(v: f64) -> bool {
        v.is_finite() && v > 0.0
    }

    /// Finalize the builder.
    ///
    /// Validation rules
    /// -----------------
    /// * every horizon cutoff is an altitude in `[-90, 90]`,
    /// * `visibility_divisor > 0`,
    /// * `0 < reference_fov <= 180`,
    /// * every sphere radius is `> 0`,
    /// * the magnitude scale passes [`MagnitudeScale::validate`],
    /// * `0 < satellite_horizon_angle <= 180`.
    ///
    /// Returns
    /// -----------------
    /// * `Ok(SkyConfig)` or [`SkyError::InvalidSkyParameter`] naming the first failed rule.
    pub fn build(self) -> Result<SkyConfig, SkyError> {
        let c = &self.config;

        if ![
            c.star_horizon_cutoff,
            c.body_horizon_cutoff,
            c.constellation_line_cutoff,
            c.milky_way_cutoff,
        ]
        .into_iter()
        .all(Self::is_altitude)
        {
            return Err(SkyError::InvalidSkyParameter(
                "horizon cutoffs must be within [-90, 90]".into(),
            ));
        }
        if !Self::gt0(c.visibility_divisor) {
            return Err(SkyError::InvalidSkyParameter(
                "visibility_divisor must be > 0".into(),
            ));
        }
        if !Self::gt0(c.reference_fov) || c.reference_fov > 180.0 {
            return Err(SkyError::InvalidSkyParameter(
                "reference_fov must be within (0, 180]".into(),
            ));
        }
        if !c.sphere_radii.all().iter().all(|&r| Self::gt0(r)) {
            return Err(SkyError::InvalidSkyParameter(
                "sphere radii must be > 0".into(),
            ));
        }
        c.magnitude_scale.validate()?;
        if !Self::gt0(c.satellite_horizon_angle) || c.satellite_horizon_angle > 180.0 {
            return Err(SkyError::InvalidSkyParameter(
                "satellite_horizon_angle must be within (0, 180]".into(),
            ));
        }

        Ok(self.config)
    }
}

impl fmt::Display for SkyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "Sky rendering parameters")?;
            writeln!(f, "------------------------")?;
            writeln!(f, "[Horizon]")?;
            writeln!(f, "  star_horizon_cutoff     = {:.1}°", self.star_horizon_cutoff)?;
            writeln!(f, "  body_horizon_cutoff     = {:.1}°", self.body_horizon_cutoff)?;
            writeln!(
                f,
                "  constellation_cutoff    = {:.1}°",
                self.constellation_line_cutoff
            )?;
            writeln!(f, "  milky_way_cutoff        = {:.1}°", self.milky_way_cutoff)?;
            writeln!(f, "\n[View]")?;
            writeln!(f, "  visibility_divisor      = {:.3}", self.visibility_divisor)?;
            writeln!(f, "  reference_fov           = {:.1}°", self.reference_fov)?;
            let r = &self.sphere_radii;
            writeln!(
                f,
                "  sphere_radii            = star {} / deep-sky {} / planet {} / moon {} / sun {} / satellite {} / lines {} / milky way {}",
                r.star,
                r.deep_sky,
                r.planet,
                r.moon,
                r.sun,
                r.satellite,
                r.constellation_line,
                r.milky_way
            )?;
            let m = &self.magnitude_scale;
            writeln!(f, "\n[Magnitudes]")?;
            writeln!(
                f,
                "  magnitude_range         = [{:.2}, {:.2}] -> size [{:.2}, {:.2}]",
                m.brightest, m.faintest, m.max_size, m.min_size
            )?;
            writeln!(f, "\n[Satellite / background]")?;
            writeln!(
                f,
                "  satellite_horizon_angle = {:.1}°",
                self.satellite_horizon_angle
            )?;
            write!(
                f,
                "  background_stars        = {} (seed {})",
                self.background_star_count, self.background_seed
            )
        } else {
            write!(
                f,
                "SkyConfig(cutoffs {:.1}°/{:.1}°, fov/{}, ref_fov {:.1}°, {} bg stars, seed {})",
                self.star_horizon_cutoff,
                self.body_horizon_cutoff,
                self.visibility_divisor,
                self.reference_fov,
                self.background_star_count,
                self.background_seed
            )
        }
    }
}
