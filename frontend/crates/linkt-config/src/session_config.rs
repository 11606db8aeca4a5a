use crate::{ConfigError, ConfigErrorResult, DEFAULT_SESSION_DIR};

use serde::Deserialize;

/// Where the persisted session keys live
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Directory for the session key files, relative to the config dir
    pub dir: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            dir: DEFAULT_SESSION_DIR.to_string(),
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let path = std::path::Path::new(&self.dir);
        if self.dir.is_empty() || path.is_absolute() || self.dir.contains("..") {
            return Err(ConfigError::session(
                "session.dir must be a non-empty relative path and cannot contain '..'",
            ));
        }

        Ok(())
    }
}
