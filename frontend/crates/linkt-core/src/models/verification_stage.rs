use crate::{CoreError, Result as CoreErrorResult, Route};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

pub const EMAIL_VERIFICATION_MARKER: &str = "EMAIL_VERIFICATION_REQUIRED";
pub const SECOND_FACTOR_MARKER: &str = "2FA_REQUIRED";

/// Which out-of-band code a pending login or signup is waiting on.
///
/// Serialized with the backend's `userType` markers so the persisted
/// pending record reads the same as the response that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerificationStage {
    #[serde(rename = "EMAIL_VERIFICATION_REQUIRED")]
    EmailVerification,
    #[serde(rename = "2FA_REQUIRED")]
    SecondFactor,
}

impl VerificationStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmailVerification => EMAIL_VERIFICATION_MARKER,
            Self::SecondFactor => SECOND_FACTOR_MARKER,
        }
    }

    /// Route that collects the code for this stage
    pub fn route(&self) -> Route {
        match self {
            Self::EmailVerification => Route::VerifyEmail,
            Self::SecondFactor => Route::TwoFactor,
        }
    }

    /// Where a verification screen sends the user when nothing is pending
    pub fn fallback_route(&self) -> Route {
        match self {
            Self::EmailVerification => Route::Signup,
            Self::SecondFactor => Route::Login,
        }
    }

    /// Recognise a verification marker in an auth response's `userType`
    pub fn from_marker(user_type: &str) -> Option<Self> {
        match user_type {
            EMAIL_VERIFICATION_MARKER => Some(Self::EmailVerification),
            SECOND_FACTOR_MARKER => Some(Self::SecondFactor),
            _ => None,
        }
    }
}

impl FromStr for VerificationStage {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        match s {
            EMAIL_VERIFICATION_MARKER | "email-verification" => Ok(Self::EmailVerification),
            SECOND_FACTOR_MARKER | "second-factor" => Ok(Self::SecondFactor),
            _ => Err(CoreError::InvalidVerificationStage {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl std::fmt::Display for VerificationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
