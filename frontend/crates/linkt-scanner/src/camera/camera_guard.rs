use crate::MediaTrack;

use log::debug;

/// Owns the tracks of an acquired camera stream.
///
/// Tracks are drained on release, so each one is stopped exactly once no
/// matter how many times `release` runs.
pub struct CameraGuard {
    tracks: Vec<Box<dyn MediaTrack>>,
}

impl CameraGuard {
    pub fn new(tracks: Vec<Box<dyn MediaTrack>>) -> Self {
        Self { tracks }
    }

    /// Tracks not yet stopped
    pub fn live_tracks(&self) -> usize {
        self.tracks.len()
    }

    pub fn release(&mut self) {
        if self.tracks.is_empty() {
            return;
        }

        let count = self.tracks.len();
        for mut track in self.tracks.drain(..) {
            track.stop();
        }
        debug!("Camera released ({count} tracks stopped)");
    }
}

impl Drop for CameraGuard {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for CameraGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraGuard")
            .field("live_tracks", &self.tracks.len())
            .finish()
    }
}
