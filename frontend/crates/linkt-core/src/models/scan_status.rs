use serde::{Deserialize, Serialize};

/// Classification of one ticket validation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanStatus {
    /// Valid ticket, first check-in
    Success,
    /// Valid ticket that was already checked in
    AlreadyScanned,
    /// Code matches no ticket
    Invalid,
    /// Valid ticket for a different event
    WrongEvent,
    /// Transport or server failure; also any status this client does not know
    #[serde(other)]
    Error,
}

impl ScanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::AlreadyScanned => "ALREADY_SCANNED",
            Self::Invalid => "INVALID",
            Self::WrongEvent => "WRONG_EVENT",
            Self::Error => "ERROR",
        }
    }

    /// Whether this outcome changed the event's scanned/remaining counters
    pub fn changes_counters(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Severity shown next to the result: repeat scans are warnings, not errors
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::AlreadyScanned)
    }
}

impl std::fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
