//! Door check-in: sample a camera, decode QR tickets and validate each
//! distinct code once.
//!
//! [`ScanSession`] owns the camera for as long as it is mounted. Dropping
//! it or calling [`ScanSession::unmount`] stops every track and the poll
//! timer.

pub(crate) mod camera;
pub(crate) mod decoder;
pub(crate) mod error;
pub(crate) mod scan_cycle;
pub(crate) mod scan_session;
pub(crate) mod ticket_service;

#[cfg(test)]
mod tests;

pub use camera::{
    Camera, Frame, FrameSource, MediaStream, MediaTrack, camera_guard::CameraGuard,
};
pub use decoder::{QrDecoder, rqrr_decoder::RqrrDecoder};
pub use error::{Result as ScannerResult, ScannerError};
pub use scan_cycle::ScanCycle;
pub use scan_session::{
    CAMERA_ERROR_MESSAGE, STATS_FAILED_MESSAGE, STATS_FORBIDDEN_MESSAGE, ScanContext,
    ScanSession, ScanView,
};
pub use ticket_service::TicketService;
