use serde::{Deserialize, Serialize};

/// Check-in counters for one event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanStats {
    pub event_id: i64,
    #[serde(alias = "eventName")]
    pub event_title: String,
    pub total_tickets: u32,
    pub scanned_count: u32,
    pub remaining_count: u32,
}
