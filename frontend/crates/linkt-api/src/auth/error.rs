use crate::ApiError;

use std::panic::Location;

use error_location::ErrorLocation;
use linkt_core::{CoreError, VerificationStage};
use linkt_session::SessionError;
use thiserror::Error;

/// Errors from the login, registration and verification flows
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("{source} {location}")]
    Api {
        #[source]
        source: ApiError,
        location: ErrorLocation,
    },

    #[error("Failed to persist session: {source} {location}")]
    Session {
        #[source]
        source: SessionError,
        location: ErrorLocation,
    },

    #[error("Unusable auth response: {source} {location}")]
    Profile {
        #[source]
        source: CoreError,
        location: ErrorLocation,
    },

    #[error("No {stage} in progress {location}")]
    NoPendingVerification {
        stage: VerificationStage,
        location: ErrorLocation,
    },

    #[error("Verification succeeded without a token {location}")]
    VerificationFailed { location: ErrorLocation },

    #[error("Verification code expired: {message} {location}")]
    CodeExpired {
        message: String,
        location: ErrorLocation,
    },

    #[error("Verification code rejected: {message} {location}")]
    InvalidCode {
        message: String,
        location: ErrorLocation,
    },

    #[error("Verification codes are {expected} digits, got '{code}' {location}")]
    InvalidCodeFormat {
        code: String,
        expected: usize,
        location: ErrorLocation,
    },

    #[error("Server answered with neither a token nor a verification request (userType '{user_type}') {location}")]
    UnexpectedResponse {
        user_type: String,
        location: ErrorLocation,
    },
}

impl AuthError {
    #[track_caller]
    pub fn no_pending(stage: VerificationStage) -> Self {
        Self::NoPendingVerification {
            stage,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn verification_failed() -> Self {
        Self::VerificationFailed {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_code_format(code: &str, expected: usize) -> Self {
        Self::InvalidCodeFormat {
            code: code.to_string(),
            expected,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unexpected_response(user_type: impl Into<String>) -> Self {
        Self::UnexpectedResponse {
            user_type: user_type.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Sort a rejected verification call into expired / invalid / other.
    #[track_caller]
    pub fn from_verification(err: ApiError) -> Self {
        let location = ErrorLocation::from(Location::caller());

        match err {
            ApiError::Rejected { message, .. } if message.contains("expired") => {
                Self::CodeExpired { message, location }
            }
            ApiError::Rejected { message, .. }
                if message.contains("Invalid") || message.contains("not found") =>
            {
                Self::InvalidCode { message, location }
            }
            source => Self::Api { source, location },
        }
    }

    /// Whether the pending verification is still usable after this error
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Api { .. }
                | Self::VerificationFailed { .. }
                | Self::CodeExpired { .. }
                | Self::InvalidCode { .. }
                | Self::InvalidCodeFormat { .. }
        )
    }

    /// Text for the form's inline error
    pub fn user_message(&self) -> String {
        match self {
            Self::CodeExpired { .. } => "Code expired. Please request a new one.".to_string(),
            Self::InvalidCode { .. } => "Invalid verification code.".to_string(),
            Self::VerificationFailed { .. } => "Verification failed. Please try again.".to_string(),
            Self::InvalidCodeFormat { expected, .. } => {
                format!("Please enter the {expected}-digit code.")
            }
            Self::NoPendingVerification { .. } => {
                "No verification in progress. Please start again.".to_string()
            }
            Self::Api { source, .. } => {
                let message = source.server_message();
                if message.is_empty() {
                    "An error occurred. Please try again.".to_string()
                } else {
                    message.to_string()
                }
            }
            Self::Session { .. } | Self::Profile { .. } | Self::UnexpectedResponse { .. } => {
                "An error occurred. Please try again.".to_string()
            }
        }
    }
}

impl From<ApiError> for AuthError {
    #[track_caller]
    fn from(source: ApiError) -> Self {
        Self::Api {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<SessionError> for AuthError {
    #[track_caller]
    fn from(source: SessionError) -> Self {
        Self::Session {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CoreError> for AuthError {
    #[track_caller]
    fn from(source: CoreError) -> Self {
        Self::Profile {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
