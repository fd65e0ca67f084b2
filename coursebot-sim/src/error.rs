//! Error types for the simulator

use coursebot_core::config::{ConfigError, LayoutError};
use coursebot_core::navigation::{CalibrationError, RecordError};
use coursebot_core::traits::StoreError;
use thiserror::Error;

/// Simulator error type
#[derive(Error, Debug)]
pub enum SimError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid motion calibration: {0:?}")]
    Motion(ConfigError),

    #[error("Invalid course layout: {0:?}")]
    Layout(LayoutError),

    #[error("Point table unusable: {0:?}")]
    Calibration(CalibrationError),

    #[error("Recording failed: {0:?}")]
    Record(RecordError),

    #[error("Point store error: {0:?}")]
    Store(StoreError),
}

// The core errors are no_std and carry no `Error` impl, so `#[from]` can't
// name them as a source.
impl From<ConfigError> for SimError {
    fn from(e: ConfigError) -> Self {
        SimError::Motion(e)
    }
}

impl From<LayoutError> for SimError {
    fn from(e: LayoutError) -> Self {
        SimError::Layout(e)
    }
}

impl From<CalibrationError> for SimError {
    fn from(e: CalibrationError) -> Self {
        SimError::Calibration(e)
    }
}

impl From<RecordError> for SimError {
    fn from(e: RecordError) -> Self {
        SimError::Record(e)
    }
}

impl From<StoreError> for SimError {
    fn from(e: StoreError) -> Self {
        SimError::Store(e)
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
