use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScannerError {
    #[error("Only organizers can scan tickets {location}")]
    NotAuthorized { location: ErrorLocation },

    #[error("Camera unavailable: {message} {location}")]
    Camera {
        message: String,
        location: ErrorLocation,
    },

    #[error("Frame of {width}x{height} needs {expected} RGBA bytes, got {actual} {location}")]
    InvalidFrame {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
        location: ErrorLocation,
    },
}

impl ScannerError {
    #[track_caller]
    pub fn not_authorized() -> Self {
        Self::NotAuthorized {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn camera(message: impl Into<String>) -> Self {
        Self::Camera {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScannerError>;
