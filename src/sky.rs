//! # Per-tick sky evaluation
//!
//! [`SkyContext`] freezes everything that depends only on *where* and *when* the observer
//! is: Julian Date, centuries since J2000, Local Sidereal Time and the solar-system
//! ephemeris. [`Sky`] owns the immutable [`Catalog`] and the [`SkyConfig`] and turns a context
//! into drawable streams:
//!
//! - [`Sky::bodies`]: every catalog entry and solar-system body, unfiltered,
//! - [`Sky::above_horizon`]: bodies above their per-kind horizon cutoff,
//! - [`Sky::flat_frame`]: screen position and style of every visible body for a flat view,
//! - [`Sky::sphere_frame`]: 3D position and style of every body on its shell,
//! - constellation figures for both targets, label anchors,
//! - the Milky Way glow band, cardinal markers on the horizon,
//! - nearest-star picking at a screen point,
//! - the tracked satellite, live or simulated.
//!
//! ## Pipeline
//!
//! ```text
//! (observer, instant) ──► SkyContext { JD, T, LST, ephemeris }
//!                                 │
//!   Catalog ──► CelestialBody ──► RA/Dec ──► Alt/Az ──► cutoff ──► screen / sphere + style
//! ```
//!
//! Every stream is a lazy iterator borrowing the catalog: nothing is allocated per body,
//! and the whole catalog is re-evaluated on each tick.
//!
//! ## Example
//!
//! ```rust
//! use skydome::config::SkyConfig;
//! use skydome::coordinates::ObserverLocation;
//! use skydome::projection::{ViewState, Viewport};
//! use skydome::sky::{Sky, SkyContext};
//! use skydome::time::ObservationInstant;
//!
//! let config = SkyConfig::builder().background_star_count(200).build().unwrap();
//! let sky = Sky::builtin(config).unwrap();
//!
//! let observer = ObserverLocation::new(48.85, 2.35).unwrap();
//! let instant: ObservationInstant = "2024-03-20T21:00:00 UTC".parse().unwrap();
//! let ctx = SkyContext::new(observer, instant);
//!
//! let view = ViewState::new(180.0, 30.0, 90.0).unwrap();
//! let viewport = Viewport::new(1280.0, 720.0).unwrap();
//! let visible = sky.flat_frame(&ctx, view, viewport).count();
//! assert!(visible > 0);
//! ```
use nalgebra::Vector3;
use tracing::{debug, trace};

use crate::catalog::milky_way::galactic_band;
use crate::catalog::{BodyKind, Catalog, CelestialBody, Constellation, Star};
use crate::config::SkyConfig;
use crate::constants::{Centuries, Degree, Hour, JulianDate};
use crate::coordinates::{
    equatorial_to_horizontal, CardinalDirection, EquatorialCoordinate, HorizontalCoordinate,
    ObserverLocation,
};
use crate::ephemeris::Ephemeris;
use crate::projection::{
    horizon_screen_y, project_to_screen, project_to_sphere, twilight_intensity, ScreenPoint,
    ViewState, Viewport,
};
use crate::satellite::{look_angles, simulated_snapshot, SatelliteLookAngles, SatelliteSnapshot};
use crate::sky_errors::SkyError;
use crate::time::{local_sidereal_time, ObservationInstant};
use crate::visual::{
    deep_sky_color, deep_sky_opacity, deep_sky_size, fov_scale, has_glow, milky_way_style,
    moon_shadow_offset, moon_size, planet_size, spectral_color, VisualStyle, MOON_COLOR,
    SUN_COLOR,
};

/// Constellation names are drawn this many pixels above the centroid of their stars.
pub const LABEL_OFFSET: f64 = 20.0;

/// A click selects the nearest star closer than this many pixels.
pub const PICK_RADIUS: f64 = 20.0;

/// Observer and instant dependent quantities, computed once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyContext {
    pub observer: ObserverLocation,
    pub instant: ObservationInstant,
    pub julian_date: JulianDate,
    pub centuries: Centuries,
    pub local_sidereal_time: Hour,
    pub ephemeris: Ephemeris,
}

impl SkyContext {
    pub fn new(observer: ObserverLocation, instant: ObservationInstant) -> Self {
        let julian_date = instant.julian_date();
        let local_sidereal_time = local_sidereal_time(julian_date, observer.longitude());
        trace!(
            julian_date,
            local_sidereal_time,
            latitude = observer.latitude(),
            longitude = observer.longitude(),
            "sky context"
        );

        SkyContext {
            observer,
            instant,
            julian_date,
            centuries: instant.centuries_since_j2000(),
            local_sidereal_time,
            ephemeris: Ephemeris::at(julian_date),
        }
    }

    /// Horizontal coordinates of an equatorial position for this observer and instant.
    pub fn horizontal(&self, eq: &EquatorialCoordinate) -> HorizontalCoordinate {
        equatorial_to_horizontal(eq, self.observer.latitude(), self.local_sidereal_time)
    }

    pub fn sun_altitude(&self) -> Degree {
        self.horizontal(&self.ephemeris.sun.equatorial).altitude
    }

    /// Twilight glow on the horizon, see [`twilight_intensity`].
    pub fn twilight_intensity(&self) -> Option<f64> {
        twilight_intensity(self.sun_altitude())
    }
}

/// A body with its position on the observer's sky.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedBody<'a> {
    pub body: CelestialBody<'a>,
    pub horizontal: HorizontalCoordinate,
}

/// One sprite of the flat view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatSprite<'a> {
    pub body: CelestialBody<'a>,
    pub horizontal: HorizontalCoordinate,
    pub screen: ScreenPoint,
    pub style: VisualStyle,
}

impl FlatSprite<'_> {
    /// Shadow offset of the phase disk, for a Moon that is not full.
    pub fn moon_shadow_offset(&self) -> Option<f64> {
        match self.body {
            CelestialBody::Moon(moon) => moon_shadow_offset(moon.phase, self.style.size),
            _ => None,
        }
    }

    /// Screen center of the phase shadow disk: `(x + offset − size, y)`.
    ///
    /// The disk has the radius of the Moon sprite.
    pub fn moon_shadow_center(&self) -> Option<(f64, f64)> {
        let offset = self.moon_shadow_offset()?;
        Some((self.screen.x + offset - self.style.size, self.screen.y))
    }
}

/// One sprite of the celestial sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereSprite<'a> {
    pub body: CelestialBody<'a>,
    pub horizontal: HorizontalCoordinate,
    pub position: Vector3<f64>,
    pub style: VisualStyle,
}

/// A constellation line between two on-screen stars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenSegment<'a> {
    pub constellation: &'a Constellation,
    pub from: ScreenPoint,
    pub to: ScreenPoint,
}

/// A constellation line on the star shell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereSegment<'a> {
    pub constellation: &'a Constellation,
    pub from: Vector3<f64>,
    pub to: Vector3<f64>,
}

/// Anchor of a constellation name on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstellationLabel<'a> {
    pub constellation: &'a Constellation,
    pub x: f64,
    pub y: f64,
    /// Number of member stars the anchor was averaged over.
    pub visible_members: usize,
}

/// One glow puff of the Milky Way on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MilkyWayPuff {
    /// Position of the sample along the band, which drives its size and tint.
    pub index: usize,
    pub horizontal: HorizontalCoordinate,
    pub screen: ScreenPoint,
    pub style: VisualStyle,
}

/// One glow puff of the Milky Way on its shell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MilkyWaySpherePuff {
    pub index: usize,
    pub horizontal: HorizontalCoordinate,
    pub position: Vector3<f64>,
    pub style: VisualStyle,
}

/// A compass letter on the horizon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardinalMarker {
    pub direction: CardinalDirection,
    pub x: f64,
    pub y: f64,
}

/// Star selected by [`Sky::pick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickedStar<'a> {
    pub star: &'a Star,
    pub horizontal: HorizontalCoordinate,
    pub screen: ScreenPoint,
    /// Pixel distance from the picked point.
    pub distance: f64,
}

/// The tracked satellite as seen by the observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SatelliteSprite {
    pub snapshot: SatelliteSnapshot,
    pub look: SatelliteLookAngles,
    /// Position on the satellite shell.
    pub position: Vector3<f64>,
    /// `true` when the snapshot came from the stand-in orbit.
    pub simulated: bool,
}

/// Immutable catalog plus rendering parameters.
#[derive(Debug, Clone)]
pub struct Sky {
    catalog: Catalog,
    config: SkyConfig,
}

impl Sky {
    pub fn new(catalog: Catalog, config: SkyConfig) -> Self {
        debug!(
            stars = catalog.stars().len(),
            deep_sky = catalog.deep_sky_objects().len(),
            constellations = catalog.constellations().len(),
            "sky ready"
        );
        Sky { catalog, config }
    }

    /// Builtin catalog filled with `config.background_star_count()` stars generated from
    /// `config.background_seed()`.
    pub fn builtin(config: SkyConfig) -> Result<Self, SkyError> {
        let catalog = Catalog::builtin()?
            .with_background_stars(config.background_star_count(), config.background_seed());
        Ok(Self::new(catalog, config))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &SkyConfig {
        &self.config
    }

    /// Every catalog entry followed by the planets, the Moon and the Sun.
    pub fn bodies<'a>(
        &'a self,
        ctx: &'a SkyContext,
    ) -> impl Iterator<Item = CelestialBody<'a>> + 'a {
        let ephemeris = &ctx.ephemeris;
        self.catalog
            .stars()
            .iter()
            .map(CelestialBody::Star)
            .chain(
                self.catalog
                    .deep_sky_objects()
                    .iter()
                    .map(CelestialBody::DeepSky),
            )
            .chain(ephemeris.planets.iter().copied().map(CelestialBody::Planet))
            .chain([
                CelestialBody::Moon(ephemeris.moon),
                CelestialBody::Sun(ephemeris.sun),
            ])
    }

    /// Bodies at or above the horizon cutoff of their kind.
    pub fn above_horizon<'a>(
        &'a self,
        ctx: &'a SkyContext,
    ) -> impl Iterator<Item = PlacedBody<'a>> + 'a {
        self.bodies(ctx).filter_map(move |body| {
            let horizontal = ctx.horizontal(&body.equatorial());
            horizontal
                .is_above(self.config.horizon_cutoff(body.kind()))
                .then_some(PlacedBody { body, horizontal })
        })
    }

    /// Flat projection of a horizontal coordinate with the configured visibility cone.
    pub fn project(
        &self,
        hz: &HorizontalCoordinate,
        view: &ViewState,
        viewport: &Viewport,
    ) -> ScreenPoint {
        project_to_screen(hz, view, viewport, self.config.visibility_divisor())
    }

    /// Sprites of the flat view: bodies above their cutoff and inside the visible cone.
    ///
    /// The Moon must be strictly above its cutoff to be drawn flat.
    pub fn flat_frame<'a>(
        &'a self,
        ctx: &'a SkyContext,
        view: ViewState,
        viewport: Viewport,
    ) -> impl Iterator<Item = FlatSprite<'a>> + 'a {
        let scale = fov_scale(view.fov(), self.config.reference_fov());
        self.above_horizon(ctx).filter_map(move |placed| {
            if placed.body.kind() == BodyKind::Moon
                && placed.horizontal.altitude <= self.config.horizon_cutoff(BodyKind::Moon)
            {
                return None;
            }
            let screen = self.project(&placed.horizontal, &view, &viewport);
            screen.visible.then(|| FlatSprite {
                body: placed.body,
                horizontal: placed.horizontal,
                screen,
                style: self.body_style(&placed.body, scale),
            })
        })
    }

    /// Sprites of the celestial sphere, each kind on its own shell.
    ///
    /// Sprites keep their reference size: the camera zoom does the scaling.
    pub fn sphere_frame<'a>(
        &'a self,
        ctx: &'a SkyContext,
    ) -> impl Iterator<Item = SphereSprite<'a>> + 'a {
        self.above_horizon(ctx).map(move |placed| {
            let radius = self.config.sphere_radii().for_kind(placed.body.kind());
            SphereSprite {
                body: placed.body,
                horizontal: placed.horizontal,
                position: project_to_sphere(&placed.horizontal, radius),
                style: self.body_style(&placed.body, 1.0),
            }
        })
    }

    /// Constellation lines whose two stars are above the star cutoff and on screen.
    pub fn constellation_segments<'a>(
        &'a self,
        ctx: &'a SkyContext,
        view: ViewState,
        viewport: Viewport,
    ) -> impl Iterator<Item = ScreenSegment<'a>> + 'a {
        self.catalog
            .constellations()
            .iter()
            .enumerate()
            .flat_map(move |(i, constellation)| {
                self.catalog
                    .constellation_lines(i)
                    .iter()
                    .filter_map(move |&(a, b)| {
                        Some(ScreenSegment {
                            constellation,
                            from: self.star_on_screen(ctx, a, &view, &viewport)?,
                            to: self.star_on_screen(ctx, b, &view, &viewport)?,
                        })
                    })
            })
    }

    /// Label anchors: centroid of the on-screen member stars, raised by [`LABEL_OFFSET`].
    ///
    /// Constellations with no member on screen get no label.
    pub fn constellation_labels<'a>(
        &'a self,
        ctx: &'a SkyContext,
        view: ViewState,
        viewport: Viewport,
    ) -> impl Iterator<Item = ConstellationLabel<'a>> + 'a {
        self.catalog
            .constellations()
            .iter()
            .enumerate()
            .filter_map(move |(i, constellation)| {
                let (sum_x, sum_y, n) = self
                    .catalog
                    .constellation_members(i)
                    .iter()
                    .filter_map(|&star| self.star_on_screen(ctx, star, &view, &viewport))
                    .fold((0.0, 0.0, 0usize), |(x, y, n), p| (x + p.x, y + p.y, n + 1));

                (n > 0).then(|| ConstellationLabel {
                    constellation,
                    x: sum_x / n as f64,
                    y: sum_y / n as f64 - LABEL_OFFSET,
                    visible_members: n,
                })
            })
    }

    /// Constellation lines on the sphere, kept when both stars are above
    /// `constellation_line_cutoff`.
    pub fn sphere_constellation_segments<'a>(
        &'a self,
        ctx: &'a SkyContext,
    ) -> impl Iterator<Item = SphereSegment<'a>> + 'a {
        let radius = self.config.sphere_radii().constellation_line;
        let cutoff = self.config.constellation_line_cutoff();
        let stars = self.catalog.stars();
        let on_shell = move |index: usize| {
            let hz = ctx.horizontal(&stars[index].position);
            hz.is_above(cutoff).then(|| project_to_sphere(&hz, radius))
        };

        self.catalog
            .constellations()
            .iter()
            .enumerate()
            .flat_map(move |(i, constellation)| {
                self.catalog
                    .constellation_lines(i)
                    .iter()
                    .filter_map(move |&(a, b)| {
                        Some(SphereSegment {
                            constellation,
                            from: on_shell(a)?,
                            to: on_shell(b)?,
                        })
                    })
            })
    }

    /// Milky Way glow puffs on screen.
    ///
    /// Samples of the galactic band at or above `milky_way_cutoff` and inside the visible
    /// cone. Each puff keeps the index of its sample so its size and tint do not change as
    /// neighbors enter or leave the view.
    pub fn milky_way<'a>(
        &'a self,
        ctx: &'a SkyContext,
        view: ViewState,
        viewport: Viewport,
    ) -> impl Iterator<Item = MilkyWayPuff> + 'a {
        self.milky_way_above(ctx)
            .filter_map(move |(index, horizontal)| {
                let screen = self.project(&horizontal, &view, &viewport);
                screen.visible.then(|| MilkyWayPuff {
                    index,
                    horizontal,
                    screen,
                    style: milky_way_style(index),
                })
            })
    }

    /// Milky Way glow puffs on the Milky Way shell.
    pub fn sphere_milky_way<'a>(
        &'a self,
        ctx: &'a SkyContext,
    ) -> impl Iterator<Item = MilkyWaySpherePuff> + 'a {
        let radius = self.config.sphere_radii().milky_way;
        self.milky_way_above(ctx)
            .map(move |(index, horizontal)| MilkyWaySpherePuff {
                index,
                horizontal,
                position: project_to_sphere(&horizontal, radius),
                style: milky_way_style(index),
            })
    }

    /// Compass letters whose horizon point is inside the visible cone and strictly
    /// between the top and bottom edges of the viewport.
    pub fn cardinal_markers(
        &self,
        view: ViewState,
        viewport: Viewport,
    ) -> impl Iterator<Item = CardinalMarker> + '_ {
        CardinalDirection::ALL
            .into_iter()
            .filter_map(move |direction| {
                let screen = self.project(&direction.on_horizon(), &view, &viewport);
                (screen.visible && screen.y > 0.0 && screen.y < viewport.height()).then_some(
                    CardinalMarker {
                        direction,
                        x: screen.x,
                        y: screen.y,
                    },
                )
            })
    }

    /// Nearest catalog star to the screen point `(x, y)`.
    ///
    /// Arguments
    /// -----------------
    /// * `ctx`: observer and instant
    /// * `view`, `viewport`: the flat view the point was taken on
    /// * `x`, `y`: pixel coordinates, origin top-left
    ///
    /// Return
    /// ----------
    /// * the closest star at or above the horizon, inside the visible cone and less than
    ///   [`PICK_RADIUS`] pixels away, or `None`. Generated background stars cannot be
    ///   picked. On a tie the first star of the catalog wins.
    pub fn pick<'a>(
        &'a self,
        ctx: &SkyContext,
        view: ViewState,
        viewport: Viewport,
        x: f64,
        y: f64,
    ) -> Option<PickedStar<'a>> {
        let picked = self
            .catalog
            .catalog_stars()
            .iter()
            .filter_map(|star| {
                let horizontal = ctx.horizontal(&star.position);
                if !horizontal.is_above(0.0) {
                    return None;
                }
                let screen = self.project(&horizontal, &view, &viewport);
                let distance = (screen.x - x).hypot(screen.y - y);
                (screen.visible && distance < PICK_RADIUS).then_some(PickedStar {
                    star,
                    horizontal,
                    screen,
                    distance,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance));

        if let Some(hit) = &picked {
            trace!(star = %hit.star.id, distance = hit.distance, "picked star");
        }
        picked
    }

    /// Screen y of the horizon line, `None` when it falls outside the viewport.
    pub fn horizon_line(&self, view: &ViewState, viewport: &Viewport) -> Option<f64> {
        let y = horizon_screen_y(view, viewport);
        (y > 0.0 && y < viewport.height()).then_some(y)
    }

    /// Apparent position of the satellite from a live snapshot.
    ///
    /// Return
    /// ----------
    /// * `None` without a snapshot or when the satellite is below the horizon.
    pub fn satellite(
        &self,
        ctx: &SkyContext,
        snapshot: Option<&SatelliteSnapshot>,
    ) -> Option<SatelliteSprite> {
        let snapshot = snapshot?;
        self.place_satellite(ctx, *snapshot, false)
    }

    /// Like [`Sky::satellite`], falling back to the stand-in orbit when no snapshot is
    /// available.
    pub fn satellite_or_simulated(
        &self,
        ctx: &SkyContext,
        snapshot: Option<&SatelliteSnapshot>,
    ) -> Option<SatelliteSprite> {
        match snapshot {
            Some(snapshot) => self.place_satellite(ctx, *snapshot, false),
            None => {
                let unix_seconds = ctx.instant.epoch().to_unix_seconds();
                debug!(unix_seconds, "no satellite snapshot, using simulated orbit");
                self.place_satellite(ctx, simulated_snapshot(unix_seconds), true)
            }
        }
    }

    fn place_satellite(
        &self,
        ctx: &SkyContext,
        snapshot: SatelliteSnapshot,
        simulated: bool,
    ) -> Option<SatelliteSprite> {
        let look = look_angles(
            &ctx.observer,
            &snapshot,
            self.config.satellite_horizon_angle(),
        )?;
        Some(SatelliteSprite {
            snapshot,
            look,
            position: project_to_sphere(&look.horizontal, self.config.sphere_radii().satellite),
            simulated,
        })
    }

    fn milky_way_above<'a>(
        &'a self,
        ctx: &'a SkyContext,
    ) -> impl Iterator<Item = (usize, HorizontalCoordinate)> + 'a {
        let cutoff = self.config.milky_way_cutoff();
        galactic_band()
            .enumerate()
            .map(move |(index, point)| (index, ctx.horizontal(&point)))
            .filter(move |(_, horizontal)| horizontal.is_above(cutoff))
    }

    fn star_on_screen(
        &self,
        ctx: &SkyContext,
        index: usize,
        view: &ViewState,
        viewport: &Viewport,
    ) -> Option<ScreenPoint> {
        let star = self.catalog.stars().get(index)?;
        let hz = ctx.horizontal(&star.position);
        if !hz.is_above(self.config.horizon_cutoff(BodyKind::Star)) {
            return None;
        }
        let screen = self.project(&hz, view, viewport);
        screen.visible.then_some(screen)
    }

    fn body_style(&self, body: &CelestialBody, fov_scale: f64) -> VisualStyle {
        let magnitudes = self.config.magnitude_scale();
        match body {
            CelestialBody::Star(star) => VisualStyle {
                size: magnitudes.size(star.magnitude) * fov_scale,
                opacity: magnitudes.opacity(star.magnitude),
                color: spectral_color(star.spectral_class).to_rgb(),
                glow: has_glow(star.magnitude),
            },
            CelestialBody::DeepSky(dso) => VisualStyle {
                size: deep_sky_size(dso.size, fov_scale),
                opacity: deep_sky_opacity(dso.category),
                color: deep_sky_color(dso.category).to_rgb(),
                glow: false,
            },
            CelestialBody::Planet(planet) => VisualStyle {
                size: planet_size(planet.size, fov_scale),
                opacity: 1.0,
                color: planet.color,
                glow: true,
            },
            CelestialBody::Moon(_) => VisualStyle {
                size: moon_size(fov_scale),
                opacity: 1.0,
                color: MOON_COLOR.to_rgb(),
                glow: true,
            },
            CelestialBody::Sun(_) => VisualStyle {
                size: moon_size(fov_scale),
                opacity: 1.0,
                color: SUN_COLOR.to_rgb(),
                glow: true,
            },
        }
    }
}
