//! Real-time sky computation: where the stars, deep-sky objects, planets, Moon, Sun and a
//! tracked satellite appear for an observer at a given instant, and how to draw them on a
//! flat view or on a celestial sphere. See [`sky`] for the per-frame entry point.
pub mod catalog;
pub mod config;
pub mod constants;
pub mod coordinates;
pub mod ephemeris;
pub mod projection;
pub mod satellite;
pub mod sky;
pub mod sky_errors;
pub mod time;
pub mod visual;
