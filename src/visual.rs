//! # Visual mapping
//!
//! Turn physical attributes into drawing attributes:
//!
//! - **magnitude → size / opacity** through a clamped linear [`MagnitudeScale`],
//! - **spectral class → color** as an [`Hsl`] triple (convertible to [`Rgb`]),
//! - **field of view → sprite scaling** for planets, the Moon and deep-sky objects.
//!
//! All functions are pure. Sizes are pixel radii at the reference field of view unless the
//! function says otherwise.
use serde::{Deserialize, Serialize};

use crate::catalog::{DeepSkyCategory, SpectralClass};
use crate::constants::{ArcMin, Degree, Magnitude};
use crate::sky_errors::SkyError;

/// Field of view (degrees) at which sprite sizes are specified.
pub const REFERENCE_FOV: Degree = 90.0;

/// Stars brighter than this magnitude get a glow halo.
pub const GLOW_MAGNITUDE: Magnitude = 2.0;

/// Moon sprite radius at the reference field of view.
pub const MOON_BASE_SIZE: f64 = 12.0;

/// Minimum deep-sky sprite radius in pixels.
pub const MIN_DEEP_SKY_SIZE: f64 = 4.0;

/// From this illuminated fraction on, the Moon is drawn without a phase shadow.
pub const FULL_MOON_PHASE: f64 = 0.95;

/// Peak opacity at the core of a Milky Way glow puff.
pub const MILKY_WAY_OPACITY: f64 = 0.08;

/// Color in hue (degrees), saturation and lightness (percent).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// `#rrggbb` form.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Hsl {
    pub const fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        Hsl {
            hue,
            saturation,
            lightness,
        }
    }

    /// Convert to RGB.
    ///
    /// Standard chroma construction: `C = (1 − |2L − 1|)·S`, `X = C·(1 − |H/60 mod 2 − 1|)`,
    /// `m = L − C/2`, with the `(C, X, 0)` permutation picked by the 60° sector of the hue.
    pub fn to_rgb(&self) -> Rgb {
        let h = self.hue.rem_euclid(360.0) / 60.0;
        let s = (self.saturation / 100.0).clamp(0.0, 1.0);
        let l = (self.lightness / 100.0).clamp(0.0, 1.0);

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - chroma / 2.0;

        let (r, g, b) = match h as u8 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        let to_u8 = |c: f64| ((c + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Rgb::new(to_u8(r), to_u8(g), to_u8(b))
    }
}

/// Linear magnitude → size/opacity mapping.
///
/// Magnitudes are normalized over `[brightest, faintest]` and both outputs are clamped, so
/// the mapping is monotonically non-increasing in magnitude and stays finite for any
/// finite input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MagnitudeScale {
    /// Magnitude drawn with `max_size` (Sirius).
    pub brightest: Magnitude,
    /// Magnitude drawn with `min_size` (naked-eye limit).
    pub faintest: Magnitude,
    pub min_size: f64,
    pub max_size: f64,
    /// Opacity lost between the brightest and faintest magnitudes.
    pub opacity_span: f64,
    pub min_opacity: f64,
}

impl Default for MagnitudeScale {
    fn default() -> Self {
        MagnitudeScale {
            brightest: -1.5,
            faintest: 6.0,
            min_size: 0.5,
            max_size: 4.0,
            opacity_span: 0.6,
            min_opacity: 0.4,
        }
    }
}

impl MagnitudeScale {
    /// Check that the scale is usable.
    pub fn validate(&self) -> Result<(), SkyError> {
        let all_finite = [
            self.brightest,
            self.faintest,
            self.min_size,
            self.max_size,
            self.opacity_span,
            self.min_opacity,
        ]
        .iter()
        .all(|v| v.is_finite());

        if !all_finite {
            return Err(SkyError::InvalidSkyParameter(
                "magnitude scale values must be finite".into(),
            ));
        }
        if self.brightest >= self.faintest {
            return Err(SkyError::InvalidSkyParameter(
                "magnitude scale requires brightest < faintest".into(),
            ));
        }
        if !(0.0 <= self.min_size && self.min_size <= self.max_size) {
            return Err(SkyError::InvalidSkyParameter(
                "magnitude scale requires 0 <= min_size <= max_size".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_opacity) || self.opacity_span < 0.0 {
            return Err(SkyError::InvalidSkyParameter(
                "magnitude scale requires min_opacity in [0, 1] and opacity_span >= 0".into(),
            ));
        }
        Ok(())
    }

    /// Position of `magnitude` in `[brightest, faintest]`, unclamped.
    pub fn normalized(&self, magnitude: Magnitude) -> f64 {
        (magnitude - self.brightest) / (self.faintest - self.brightest)
    }

    /// Sprite radius for a star of the given magnitude.
    pub fn size(&self, magnitude: Magnitude) -> f64 {
        let size = self.max_size - self.normalized(magnitude) * (self.max_size - self.min_size);
        size.clamp(self.min_size, self.max_size)
    }

    /// Sprite opacity for a star of the given magnitude.
    pub fn opacity(&self, magnitude: Magnitude) -> f64 {
        let opacity = 1.0 - self.normalized(magnitude) * self.opacity_span;
        opacity.clamp(self.min_opacity, 1.0)
    }
}

/// Color of a star of the given spectral class.
pub fn spectral_color(class: SpectralClass) -> Hsl {
    match class {
        SpectralClass::O => Hsl::new(210.0, 100.0, 85.0),
        SpectralClass::B => Hsl::new(210.0, 80.0, 80.0),
        SpectralClass::A => Hsl::new(200.0, 30.0, 95.0),
        SpectralClass::F => Hsl::new(45.0, 30.0, 90.0),
        SpectralClass::G => Hsl::new(45.0, 60.0, 75.0),
        SpectralClass::K => Hsl::new(30.0, 70.0, 60.0),
        SpectralClass::M => Hsl::new(10.0, 80.0, 50.0),
    }
}

/// Color of a spectral type letter; anything unrecognized is drawn as a G star.
pub fn spectral_letter_color(letter: &str) -> Hsl {
    spectral_color(SpectralClass::from_letter(letter))
}

/// Core color of a deep-sky sprite.
pub fn deep_sky_color(category: DeepSkyCategory) -> Hsl {
    match category {
        DeepSkyCategory::Galaxy => Hsl::new(45.0, 20.0, 80.0),
        DeepSkyCategory::Nebula => Hsl::new(340.0, 50.0, 60.0),
        DeepSkyCategory::Cluster => Hsl::new(200.0, 30.0, 90.0),
        DeepSkyCategory::PlanetaryNebula => Hsl::new(180.0, 60.0, 70.0),
    }
}

/// Opacity of a deep-sky sprite: clusters and planetary nebulae are compact and drawn
/// brighter than the diffuse galaxies and nebulae.
pub fn deep_sky_opacity(category: DeepSkyCategory) -> f64 {
    match category {
        DeepSkyCategory::Galaxy | DeepSkyCategory::Nebula => 0.3,
        DeepSkyCategory::Cluster | DeepSkyCategory::PlanetaryNebula => 0.4,
    }
}

/// Moon body color.
pub const MOON_COLOR: Hsl = Hsl::new(45.0, 10.0, 90.0);

/// Sun color.
pub const SUN_COLOR: Hsl = Hsl::new(50.0, 100.0, 60.0);

/// Zoom factor of sprites for the given field of view.
pub fn fov_scale(fov: Degree, reference_fov: Degree) -> f64 {
    reference_fov / fov
}

/// Sprite radius of a deep-sky object of angular size `size` arcminutes.
pub fn deep_sky_size(size: ArcMin, fov_scale: f64) -> f64 {
    (size / 60.0 * fov_scale * 2.0).max(MIN_DEEP_SKY_SIZE)
}

/// Sprite radius of a planet with base radius `base_size`.
pub fn planet_size(base_size: f64, fov_scale: f64) -> f64 {
    base_size * fov_scale
}

/// Sprite radius of the Moon.
pub fn moon_size(fov_scale: f64) -> f64 {
    MOON_BASE_SIZE * fov_scale
}

/// Horizontal offset of the shadow disk drawn over the Moon for the given phase.
///
/// `(1 − phase)·2·size`, so `2·size` at new Moon. `None` from [`FULL_MOON_PHASE`] on, where
/// no shadow is drawn.
pub fn moon_shadow_offset(phase: f64, size: f64) -> Option<f64> {
    (phase < FULL_MOON_PHASE).then(|| (1.0 - phase) * 2.0 * size)
}

/// Glow radius and tint of the `index`-th Milky Way puff.
///
/// Radius `80 + 30·sin(0.3i)` pixels, hue `25 + 20·sin(0.1i)`, saturation
/// `30 + 20·sin(0.2i)`, lightness 70 %. The radius does not follow the zoom.
pub fn milky_way_style(index: usize) -> VisualStyle {
    let i = index as f64;
    let color = Hsl::new(
        25.0 + (0.1 * i).sin() * 20.0,
        30.0 + (0.2 * i).sin() * 20.0,
        70.0,
    );
    VisualStyle {
        size: 80.0 + (0.3 * i).sin() * 30.0,
        opacity: MILKY_WAY_OPACITY,
        color: color.to_rgb(),
        glow: false,
    }
}

/// `true` if a star is bright enough to get a glow halo.
pub fn has_glow(magnitude: Magnitude) -> bool {
    magnitude < GLOW_MAGNITUDE
}

/// Everything a renderer needs to draw one sprite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisualStyle {
    /// Sprite radius in pixels.
    pub size: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    pub color: Rgb,
    pub glow: bool,
}
