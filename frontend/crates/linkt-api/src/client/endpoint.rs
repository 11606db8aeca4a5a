use reqwest::Method;

/// Whether a request is expected to run without a session.
///
/// A 401 from a `Bootstrap` endpoint means the credentials or code were
/// rejected. A 401 from a `Session` endpoint means the session expired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestAuth {
    Bootstrap,
    Session,
}

/// Every backend call the client makes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Login,
    Register,
    VerifyEmail,
    VerifyTwoFactor,
    ValidateTicket { event_id: i64 },
    ScanStats { event_id: i64 },
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::ScanStats { .. } => Method::GET,
            _ => Method::POST,
        }
    }

    /// Path relative to the API base URL
    pub fn path(&self) -> String {
        match self {
            Endpoint::Login => "/auth/login".to_string(),
            Endpoint::Register => "/auth/register".to_string(),
            Endpoint::VerifyEmail => "/auth/verify-email".to_string(),
            Endpoint::VerifyTwoFactor => "/auth/verify-2fa".to_string(),
            Endpoint::ValidateTicket { event_id } => {
                format!("/tickets/events/{event_id}/validate")
            }
            Endpoint::ScanStats { event_id } => format!("/tickets/events/{event_id}/scan-stats"),
        }
    }

    pub fn auth(&self) -> RequestAuth {
        match self {
            Endpoint::Login | Endpoint::Register | Endpoint::VerifyEmail | Endpoint::VerifyTwoFactor => {
                RequestAuth::Bootstrap
            }
            Endpoint::ValidateTicket { .. } | Endpoint::ScanStats { .. } => RequestAuth::Session,
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}
