use crate::{
    AuthenticatedSession, KeyValueStore, MemoryStore, PENDING_KEY, SessionError, SessionResult,
    SessionState, TOKEN_KEY, USER_KEY,
};

use std::sync::{Mutex, MutexGuard};

use linkt_core::{PendingVerification, UserProfile, VerificationStage};
use log::{error, info, warn};
use tokio::sync::watch;

/// Authentication state shared by every view.
///
/// Mutations hold the storage lock while they publish the new state and
/// write it through, so memory and storage change in the same order.
pub struct SessionStore {
    storage: Mutex<Box<dyn KeyValueStore>>,
    state_tx: watch::Sender<SessionState>,
}

impl SessionStore {
    /// Restore whatever the previous run persisted.
    ///
    /// - profile and token both present: authenticated (a stale pending
    ///   marker next to them is dropped)
    /// - otherwise a pending marker: pending verification
    /// - otherwise: unauthenticated
    ///
    /// Orphaned or unparseable keys are discarded so storage matches the
    /// restored state.
    pub fn rehydrate(storage: impl KeyValueStore + 'static) -> SessionResult<Self> {
        let mut storage: Box<dyn KeyValueStore> = Box::new(storage);

        let user = match storage.get(USER_KEY)? {
            Some(raw) => match serde_json::from_str::<UserProfile>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!("Stored user profile is unreadable, discarding: {e}");
                    storage.discard(USER_KEY)?;
                    None
                }
            },
            None => None,
        };

        let token = storage.get(TOKEN_KEY)?.filter(|t| !t.trim().is_empty());

        let pending = match storage.get(PENDING_KEY)? {
            Some(raw) => match serde_json::from_str::<PendingVerification>(&raw) {
                Ok(pending) => Some(pending),
                Err(e) => {
                    warn!("Stored pending verification is unreadable, discarding: {e}");
                    storage.discard(PENDING_KEY)?;
                    None
                }
            },
            None => None,
        };

        let state = match (user, token) {
            (Some(user), Some(token)) => {
                if pending.is_some() {
                    storage.remove(PENDING_KEY)?;
                }
                info!("Restored session for {} ({})", user.email, user.role);
                SessionState::Authenticated(AuthenticatedSession::new(user, token))
            }
            (user, token) => {
                if user.is_some() {
                    warn!("Stored user profile has no token, discarding");
                    storage.remove(USER_KEY)?;
                }
                if token.is_some() {
                    warn!("Stored token has no user profile, discarding");
                }
                // Also clears a whitespace-only token filtered out above
                storage.remove(TOKEN_KEY)?;

                match pending {
                    Some(pending) => {
                        info!(
                            "Restored pending verification for {} ({})",
                            pending.email, pending.stage
                        );
                        SessionState::PendingVerification(pending)
                    }
                    None => SessionState::Unauthenticated,
                }
            }
        };

        let (state_tx, _) = watch::channel(state);

        Ok(Self {
            storage: Mutex::new(storage),
            state_tx,
        })
    }

    /// Empty store over a fresh in-memory key space.
    pub fn in_memory() -> Self {
        let (state_tx, _) = watch::channel(SessionState::Unauthenticated);

        Self {
            storage: Mutex::new(Box::new(MemoryStore::new())),
            state_tx,
        }
    }

    /// Current state.
    pub fn snapshot(&self) -> SessionState {
        self.state_tx.borrow().clone()
    }

    /// Receiver notified on every mutation.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state_tx.borrow().is_authenticated()
    }

    pub fn token(&self) -> Option<String> {
        self.state_tx.borrow().token().map(str::to_string)
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.state_tx.borrow().user().cloned()
    }

    pub fn pending(&self) -> Option<PendingVerification> {
        self.state_tx.borrow().pending().cloned()
    }

    /// Sign in: store profile and token together and drop any pending marker.
    pub fn establish_session(
        &self,
        user: UserProfile,
        token: impl Into<String>,
    ) -> SessionResult<()> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(SessionError::empty_token());
        }

        let user_json = serde_json::to_string(&user)?;
        let mut storage = self.lock_storage();

        info!("Session established for {} ({})", user.email, user.role);
        self.state_tx
            .send_replace(SessionState::Authenticated(AuthenticatedSession::new(
                user,
                token.clone(),
            )));

        Self::write_through("establish_session", || {
            storage.set(USER_KEY, &user_json)?;
            storage.set(TOKEN_KEY, &token)?;
            storage.remove(PENDING_KEY)
        })
    }

    /// Record that a code was sent to `email`. Replaces any earlier marker
    /// and supersedes an existing session.
    pub fn mark_pending_verification(
        &self,
        email: impl Into<String>,
        stage: VerificationStage,
    ) -> SessionResult<()> {
        let pending = PendingVerification::new(email, stage);
        let pending_json = serde_json::to_string(&pending)?;
        let mut storage = self.lock_storage();

        let had_session = self.state_tx.borrow().is_authenticated();
        if had_session {
            warn!("Pending verification supersedes the current session");
        }

        info!("Awaiting {} for {}", pending.stage, pending.email);
        self.state_tx
            .send_replace(SessionState::PendingVerification(pending));

        Self::write_through("mark_pending_verification", || {
            if had_session {
                storage.remove(USER_KEY)?;
                storage.remove(TOKEN_KEY)?;
            }
            storage.set(PENDING_KEY, &pending_json)
        })
    }

    /// Drop the pending marker. An established session is left alone.
    pub fn clear_pending_verification(&self) -> SessionResult<()> {
        let mut storage = self.lock_storage();

        let cleared = self.state_tx.send_if_modified(|state| {
            if matches!(state, SessionState::PendingVerification(_)) {
                *state = SessionState::Unauthenticated;
                true
            } else {
                false
            }
        });

        if cleared {
            info!("Pending verification cleared");
        }

        Self::write_through("clear_pending_verification", || {
            storage.remove(PENDING_KEY)
        })
    }

    /// Sign out: forget profile, token and pending marker.
    pub fn end_session(&self) -> SessionResult<()> {
        let mut storage = self.lock_storage();

        let previous = self.state_tx.send_replace(SessionState::Unauthenticated);
        if let Some(user) = previous.user() {
            info!("Session ended for {}", user.email);
        }

        Self::write_through("end_session", || {
            storage.remove(USER_KEY)?;
            storage.remove(TOKEN_KEY)?;
            storage.remove(PENDING_KEY)
        })
    }

    fn lock_storage(&self) -> MutexGuard<'_, Box<dyn KeyValueStore>> {
        self.storage.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn write_through(
        operation: &str,
        write: impl FnOnce() -> SessionResult<()>,
    ) -> SessionResult<()> {
        write().inspect_err(|e| {
            error!("{operation}: session changed in memory but was not persisted: {e}");
        })
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &*self.state_tx.borrow())
            .finish_non_exhaustive()
    }
}
