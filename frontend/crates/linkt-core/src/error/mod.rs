use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid role: {value} {location}")]
    InvalidRole {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid verification stage: {value} {location}")]
    InvalidVerificationStage {
        value: String,
        location: ErrorLocation,
    },

    #[error("Auth response for {email} carries no user profile (userType: {user_type}) {location}")]
    NoProfile {
        email: String,
        user_type: String,
        location: ErrorLocation,
    },
}

pub type Result<T> = StdResult<T, CoreError>;
