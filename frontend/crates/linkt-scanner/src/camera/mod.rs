pub(crate) mod camera_guard;

use crate::{ScannerError, ScannerResult};

use std::panic::Location;

use async_trait::async_trait;
use error_location::ErrorLocation;

/// One RGBA8 video frame, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl Frame {
    #[track_caller]
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> ScannerResult<Self> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(ScannerError::InvalidFrame {
                width,
                height,
                expected,
                actual: rgba.len(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Per-pixel brightness (Rec. 709 weights), alpha ignored
    pub fn luma(&self) -> Vec<u8> {
        self.rgba
            .chunks_exact(4)
            .map(|px| {
                let (r, g, b) = (px[0] as u32, px[1] as u32, px[2] as u32);
                ((2126 * r + 7152 * g + 722 * b) / 10000) as u8
            })
            .collect()
    }
}

/// Live picture of a camera stream
pub trait FrameSource: Send {
    /// Latest frame, or `None` while the stream has no picture yet
    fn current_frame(&mut self) -> Option<Frame>;
}

/// One capture track of a stream. Stopping it turns the camera off.
pub trait MediaTrack: Send {
    fn stop(&mut self);
}

/// What a successful camera request hands back
pub struct MediaStream {
    pub video: Box<dyn FrameSource>,
    pub tracks: Vec<Box<dyn MediaTrack>>,
}

impl std::fmt::Debug for MediaStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaStream")
            .field("tracks", &self.tracks.len())
            .finish_non_exhaustive()
    }
}

/// Access to the device camera (rear-facing where there is a choice)
#[async_trait]
pub trait Camera: Send + Sync {
    async fn acquire(&self) -> ScannerResult<MediaStream>;
}
