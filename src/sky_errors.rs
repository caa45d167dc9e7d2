use thiserror::Error;

use crate::constants::Degree;

#[derive(Error, Debug)]
pub enum SkyError {
    #[error("Invalid observer latitude: {0} (expected a finite value in [-90, 90])")]
    InvalidLatitude(Degree),

    #[error("Invalid observer longitude: {0} (expected a finite value)")]
    InvalidLongitude(Degree),

    #[error("Invalid observation instant: {0}")]
    InvalidInstant(String),

    #[error("Unable to parse epoch: {0}")]
    EpochParseError(#[from] hifitime::HifitimeError),

    #[error("Invalid view state: {0}")]
    InvalidViewState(String),

    #[error("Invalid sky configuration parameter: {0}")]
    InvalidSkyParameter(String),

    #[error("Invalid coordinate string: {0}")]
    InvalidCoordinate(String),

    #[error("Invalid catalog record: {0}")]
    CatalogParseError(String),

    #[error("CSV error while reading catalog: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),
}

impl PartialEq for SkyError {
    fn eq(&self, other: &Self) -> bool {
        use SkyError::*;
        match (self, other) {
            (InvalidLatitude(a), InvalidLatitude(b)) => a == b,
            (InvalidLongitude(a), InvalidLongitude(b)) => a == b,
            (InvalidInstant(a), InvalidInstant(b)) => a == b,
            (InvalidViewState(a), InvalidViewState(b)) => a == b,
            (InvalidSkyParameter(a), InvalidSkyParameter(b)) => a == b,
            (InvalidCoordinate(a), InvalidCoordinate(b)) => a == b,
            (CatalogParseError(a), CatalogParseError(b)) => a == b,

            // Foreign errors are not comparable: equal if same variant
            (EpochParseError(_), EpochParseError(_)) => true,
            (CsvError(_), CsvError(_)) => true,
            (IoError(_), IoError(_)) => true,

            _ => false,
        }
    }
}
