use crate::{Frame, QrDecoder};

use log::trace;

/// Pure-Rust QR decoding over the frame's luma channel
#[derive(Debug, Default, Clone, Copy)]
pub struct RqrrDecoder;

impl QrDecoder for RqrrDecoder {
    fn decode(&self, frame: &Frame) -> Option<String> {
        let width = frame.width() as usize;
        let height = frame.height() as usize;
        if width == 0 || height == 0 {
            return None;
        }

        let luma = frame.luma();
        let mut image =
            rqrr::PreparedImage::prepare_from_greyscale(width, height, |x, y| luma[y * width + x]);

        image.detect_grids().into_iter().find_map(|grid| {
            grid.decode()
                .inspect_err(|e| trace!("Unreadable QR grid: {e:?}"))
                .ok()
                .map(|(_meta, content)| content)
                .filter(|content| !content.is_empty())
        })
    }
}
