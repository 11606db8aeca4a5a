use crate::{KeyValueStore, SessionError, SessionResult};

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};

const DATE_FORMAT: &str = "%Y%m%d_%H%M%S";

/// One file per key inside a directory.
///
/// Writes go to a temp file, are synced, then renamed over the target so a
/// crash mid-write never leaves a truncated value behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) the session directory.
    pub fn open(dir: impl Into<PathBuf>) -> SessionResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| SessionError::dir_creation(dir.clone(), e))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    /// Moves an unreadable value aside as `{key}.corrupted.{timestamp}`.
    pub fn quarantine(&self, key: &str) -> SessionResult<Option<PathBuf>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let timestamp = chrono::Utc::now().format(DATE_FORMAT);
        let backup_path = self.dir.join(format!("{key}.corrupted.{timestamp}"));

        fs::rename(&path, &backup_path)
            .map_err(|e| SessionError::atomic_rename(path, backup_path.clone(), e))?;

        warn!("Moved unreadable session key '{key}' to {backup_path:?}");
        Ok(Some(backup_path))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> SessionResult<Option<String>> {
        let path = self.key_path(key);

        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SessionError::file_read(path, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> SessionResult<()> {
        let final_path = self.key_path(key);
        let temp_path = self
            .dir
            .join(format!("{key}.tmp.{}", std::process::id()));

        {
            let mut file = fs::File::create(&temp_path)
                .map_err(|e| SessionError::file_write(temp_path.clone(), e))?;

            file.write_all(value.as_bytes())
                .map_err(|e| SessionError::file_write(temp_path.clone(), e))?;

            file.sync_all()
                .map_err(|e| SessionError::file_write(temp_path.clone(), e))?;
        }

        fs::rename(&temp_path, &final_path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            SessionError::atomic_rename(temp_path, final_path.clone(), e)
        })?;

        debug!("Wrote session key '{key}'");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> SessionResult<()> {
        let path = self.key_path(key);

        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Removed session key '{key}'");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::file_remove(path, e)),
        }
    }

    fn discard(&mut self, key: &str) -> SessionResult<()> {
        self.quarantine(key).map(|_| ())
    }
}
