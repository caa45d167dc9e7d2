#![allow(dead_code)]

use approx::assert_abs_diff_eq;
use skydome::coordinates::{wrap_delta_degrees, HorizontalCoordinate, ObserverLocation};
use skydome::time::ObservationInstant;
use tracing_subscriber::EnvFilter;

/// Route library logs to the test harness; `RUST_LOG=skydome=debug` to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn new_york() -> ObserverLocation {
    ObserverLocation::new(40.7128, -74.0060).unwrap()
}

pub fn instant(s: &str) -> ObservationInstant {
    s.parse().unwrap()
}

/// Absolute difference of two azimuths, across the 0°/360° seam.
pub fn azimuth_diff(a: f64, b: f64) -> f64 {
    wrap_delta_degrees(a - b).abs()
}

pub fn assert_horizontal_close(
    actual: &HorizontalCoordinate,
    expected: &HorizontalCoordinate,
    epsilon: f64,
) {
    assert_abs_diff_eq!(actual.altitude, expected.altitude, epsilon = epsilon);
    assert!(
        azimuth_diff(actual.azimuth, expected.azimuth) < epsilon,
        "azimuth {} != {}",
        actual.azimuth,
        expected.azimuth
    );
}
