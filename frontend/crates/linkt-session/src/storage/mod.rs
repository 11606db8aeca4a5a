pub(crate) mod file_store;
pub(crate) mod memory_store;

use crate::SessionResult;

/// Serialized [`linkt_core::UserProfile`]
pub const USER_KEY: &str = "user";
/// Opaque bearer token
pub const TOKEN_KEY: &str = "token";
/// Serialized [`linkt_core::PendingVerification`]
pub const PENDING_KEY: &str = "pendingAuth";

/// Durable string key space backing the session.
///
/// The session store is its only writer.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> SessionResult<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> SessionResult<()>;

    /// Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> SessionResult<()>;

    /// Drop a value that could not be parsed. Backends that can keep the
    /// bad value around for diagnosis override this.
    fn discard(&mut self, key: &str) -> SessionResult<()> {
        self.remove(key)
    }
}
