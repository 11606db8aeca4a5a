pub(crate) mod rqrr_decoder;

use crate::Frame;

/// Finds a QR payload in a frame. A miss is the common case, not an error.
pub trait QrDecoder: Send + Sync {
    fn decode(&self, frame: &Frame) -> Option<String>;
}
