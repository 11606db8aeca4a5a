use serde::{Deserialize, Serialize};

/// Attendee detail attached to a validation result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketData {
    pub ticket_id: i64,
    pub student_name: String,
    pub student_email: String,
    #[serde(default)]
    pub event_name: Option<String>,
    #[serde(default)]
    pub event_date: Option<String>,
    #[serde(default)]
    pub ticket_type: Option<String>,
}
