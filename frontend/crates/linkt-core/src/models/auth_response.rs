use crate::{CoreError, Result as CoreErrorResult, Role, UserProfile, VerificationStage};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Body returned by every `/auth/*` endpoint.
///
/// `user_type` is either a role (`student`, `organizer`, `administrator`)
/// or a verification marker when no token was issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    pub user_type: String,
}

impl AuthResponse {
    /// Token, ignoring the empty string some backends send instead of null
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    /// Verification stage the backend is asking for, if any
    pub fn verification_stage(&self) -> Option<VerificationStage> {
        VerificationStage::from_marker(&self.user_type)
    }

    /// Build the profile to keep in the session.
    #[track_caller]
    pub fn to_profile(&self) -> CoreErrorResult<UserProfile> {
        if self.verification_stage().is_some() {
            return Err(CoreError::NoProfile {
                email: self.email.clone(),
                user_type: self.user_type.clone(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let role = Role::from_str(&self.user_type)?;

        Ok(UserProfile {
            user_id: self.user_id,
            first_name: self.first_name.clone().unwrap_or_default(),
            last_name: self.last_name.clone().unwrap_or_default(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone().unwrap_or_default(),
            role,
        })
    }
}
