//! Process-wide authentication state.
//!
//! A [`SessionStore`] is the single source of truth for who is signed in.
//! It is rehydrated once from a [`KeyValueStore`] at startup, mutated only
//! through its four operations, and publishes every change over a
//! `tokio::sync::watch` channel so readers never see a stale value.

pub(crate) mod error;
pub(crate) mod session_state;
pub(crate) mod session_store;
pub(crate) mod storage;

#[cfg(test)]
mod tests;

pub use error::{Result as SessionResult, SessionError};
pub use session_state::{AuthenticatedSession, SessionState};
pub use session_store::SessionStore;
pub use storage::{
    KeyValueStore, PENDING_KEY, TOKEN_KEY, USER_KEY, file_store::FileStore,
    memory_store::MemoryStore,
};
