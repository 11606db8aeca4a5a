use crate::{ScanStatus, TicketData};

use serde::{Deserialize, Serialize};

pub const DEFAULT_SCAN_FAILURE_MESSAGE: &str = "Failed to scan ticket. Please try again.";

/// Body of `POST /tickets/events/{eventId}/validate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    pub valid: bool,
    pub status: ScanStatus,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_data: Option<TicketData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scanned_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scanned_by: Option<String>,
}

impl ScanResponse {
    /// Local `ERROR` result for a validation call that never produced a body.
    pub fn transport_error(message: Option<String>) -> Self {
        Self {
            valid: false,
            status: ScanStatus::Error,
            message: message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| DEFAULT_SCAN_FAILURE_MESSAGE.to_string()),
            ticket_data: None,
            scanned_at: None,
            scanned_by: None,
        }
    }
}
