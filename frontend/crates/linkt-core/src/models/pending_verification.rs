use crate::VerificationStage;

use serde::{Deserialize, Serialize};

/// Marker recorded while a login or signup waits on an emailed code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingVerification {
    pub email: String,
    #[serde(rename = "status")]
    pub stage: VerificationStage,
}

impl PendingVerification {
    pub fn new(email: impl Into<String>, stage: VerificationStage) -> Self {
        Self {
            email: email.into(),
            stage,
        }
    }
}
