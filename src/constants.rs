//! # Constants and type definitions for skydome
//!
//! This module centralizes the **astronomical constants**, **conversion factors**, and
//! **common type aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - Epoch and calendar constants (J2000.0, Julian century)
//! - Unit conversions (full turn, hours ↔ degrees)
//! - Fixed parameters of the low-precision sky model (obliquity, sidereal polynomial)
//! - Core type aliases used across the crate
//!
//! The sky model is a *visual* approximation: the constants below are those of the
//! low-order formulas, not of a precision ephemeris.

// -------------------------------------------------------------------------------------------------
// Angles and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Degrees of rotation per hour of right ascension / sidereal time
pub const DEG_PER_HOUR: f64 = 15.0;

// -------------------------------------------------------------------------------------------------
// Time scales
// -------------------------------------------------------------------------------------------------

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00:00)
pub const J2000_JD: f64 = 2_451_545.0;

/// Number of days in a Julian century
pub const JULIAN_CENTURY: f64 = 36_525.0;

// -------------------------------------------------------------------------------------------------
// Sky model parameters
// -------------------------------------------------------------------------------------------------

/// Mean obliquity of the ecliptic used by the lunar and planetary models (degrees)
pub const OBLIQUITY_J2000: f64 = 23.439;

/// GMST polynomial coefficients, degrees (IAU 1982 in the Meeus form)
pub const GMST_C0: f64 = 280.460_618_37;
pub const GMST_C1: f64 = 360.985_647_366_29;
pub const GMST_C2: f64 = 0.000_387_933;
pub const GMST_C3: f64 = 38_710_000.0;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Angle or time in hours (right ascension, sidereal time)
pub type Hour = f64;
/// Julian Date (days)
pub type JulianDate = f64;
/// Julian centuries since J2000.0
pub type Centuries = f64;
/// Apparent visual magnitude (lower is brighter)
pub type Magnitude = f64;
/// Angular size in arcminutes
pub type ArcMin = f64;
/// Distance in kilometers
pub type Kilometer = f64;
