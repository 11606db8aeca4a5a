use linkt_core::{PendingVerification, UserProfile};

/// Snapshot of the session as every reader sees it.
///
/// The three shapes are mutually exclusive: a token only ever exists
/// alongside a profile, and an authenticated session never carries a
/// pending verification marker.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    PendingVerification(PendingVerification),
    Authenticated(AuthenticatedSession),
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            Self::Authenticated(session) => Some(session.user()),
            _ => None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Authenticated(session) => Some(session.token()),
            _ => None,
        }
    }

    pub fn pending(&self) -> Option<&PendingVerification> {
        match self {
            Self::PendingVerification(pending) => Some(pending),
            _ => None,
        }
    }
}

/// Profile and token of a signed-in user.
///
/// Only [`crate::SessionStore`] can build one, so both halves are always set
/// together.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthenticatedSession {
    user: UserProfile,
    token: String,
}

impl AuthenticatedSession {
    pub(crate) fn new(user: UserProfile, token: String) -> Self {
        Self { user, token }
    }

    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl std::fmt::Debug for AuthenticatedSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatedSession")
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .finish()
    }
}
