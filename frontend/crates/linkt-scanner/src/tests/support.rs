//! Fakes for the camera, decoder and backend seams

use crate::{
    Camera, Frame, FrameSource, MediaStream, MediaTrack, QrDecoder, ScannerError, ScannerResult,
    TicketService,
};

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use linkt_api::{ApiError, ApiResult};
use linkt_core::{ScanResponse, ScanStats, ScanStatus};

// =========================================================================
// Camera
// =========================================================================

pub struct CountingTrack {
    stops: Arc<AtomicUsize>,
}

impl MediaTrack for CountingTrack {
    fn stop(&mut self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn counting_track() -> (Box<dyn MediaTrack>, Arc<AtomicUsize>) {
    let stops = Arc::new(AtomicUsize::new(0));
    (
        Box::new(CountingTrack {
            stops: stops.clone(),
        }),
        stops,
    )
}

struct StillVideo {
    reads: Arc<AtomicUsize>,
}

impl FrameSource for StillVideo {
    fn current_frame(&mut self) -> Option<Frame> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Frame::from_rgba(1, 1, vec![255, 255, 255, 255]).ok()
    }
}

/// Camera with `track_count` tracks, or one that always refuses
pub struct FakeCamera {
    track_count: usize,
    fail: bool,
    pub acquisitions: AtomicUsize,
    pub frame_reads: Arc<AtomicUsize>,
    pub track_stops: Mutex<Vec<Arc<AtomicUsize>>>,
}

impl FakeCamera {
    pub fn with_tracks(track_count: usize) -> Self {
        Self {
            track_count,
            fail: false,
            acquisitions: AtomicUsize::new(0),
            frame_reads: Arc::new(AtomicUsize::new(0)),
            track_stops: Mutex::new(Vec::new()),
        }
    }

    pub fn denied() -> Self {
        Self {
            fail: true,
            ..Self::with_tracks(0)
        }
    }

    pub fn stop_counts(&self) -> Vec<usize> {
        self.track_stops
            .lock()
            .unwrap()
            .iter()
            .map(|s| s.load(Ordering::SeqCst))
            .collect()
    }

    pub fn frame_reads(&self) -> usize {
        self.frame_reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Camera for FakeCamera {
    async fn acquire(&self) -> ScannerResult<MediaStream> {
        self.acquisitions.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ScannerError::camera("NotAllowedError: Permission denied"));
        }

        let mut tracks = Vec::new();
        let mut stops = self.track_stops.lock().unwrap();
        for _ in 0..self.track_count {
            let (track, counter) = counting_track();
            tracks.push(track);
            stops.push(counter);
        }

        Ok(MediaStream {
            video: Box::new(StillVideo {
                reads: self.frame_reads.clone(),
            }),
            tracks,
        })
    }
}

// =========================================================================
// Decoder
// =========================================================================

/// Returns scripted results in order, then `fallback` forever
pub struct ScriptedDecoder {
    script: Mutex<VecDeque<Option<String>>>,
    fallback: Option<String>,
    threads: Mutex<Vec<std::thread::ThreadId>>,
}

impl ScriptedDecoder {
    pub fn new(script: &[Option<&str>], fallback: Option<&str>) -> Self {
        Self {
            script: Mutex::new(script.iter().map(|s| s.map(String::from)).collect()),
            fallback: fallback.map(String::from),
            threads: Mutex::new(Vec::new()),
        }
    }

    /// Thread each decode ran on
    pub fn decode_threads(&self) -> Vec<std::thread::ThreadId> {
        self.threads.lock().unwrap().clone()
    }
}

impl QrDecoder for ScriptedDecoder {
    fn decode(&self, _frame: &Frame) -> Option<String> {
        self.threads.lock().unwrap().push(std::thread::current().id());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

// =========================================================================
// Backend
// =========================================================================

pub fn stats(scanned: u32) -> ScanStats {
    ScanStats {
        event_id: 5,
        event_title: "Hack Night".into(),
        total_tickets: 10,
        scanned_count: scanned,
        remaining_count: 10 - scanned,
    }
}

pub fn response(status: ScanStatus) -> ScanResponse {
    ScanResponse {
        valid: status == ScanStatus::Success,
        status,
        message: status.as_str().into(),
        ticket_data: None,
        scanned_at: None,
        scanned_by: None,
    }
}

/// Backend that answers every validation with `status` after `delay`
pub struct FakeTickets {
    delay: Duration,
    status: ScanStatus,
    validate_error: Option<fn() -> ApiError>,
    stats_error: Option<u16>,
    pub validated: Mutex<Vec<String>>,
    pub stats_calls: AtomicUsize,
}

impl FakeTickets {
    pub fn answering(status: ScanStatus, delay: Duration) -> Self {
        Self {
            delay,
            status,
            validate_error: None,
            stats_error: None,
            validated: Mutex::new(Vec::new()),
            stats_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_validation(error: fn() -> ApiError) -> Self {
        Self {
            validate_error: Some(error),
            ..Self::answering(ScanStatus::Success, Duration::ZERO)
        }
    }

    pub fn with_stats_error(mut self, status: u16) -> Self {
        self.stats_error = Some(status);
        self
    }

    pub fn validated(&self) -> Vec<String> {
        self.validated.lock().unwrap().clone()
    }

    pub fn stats_calls(&self) -> usize {
        self.stats_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TicketService for FakeTickets {
    async fn validate_ticket(&self, _event_id: i64, qr_code: &str) -> ApiResult<ScanResponse> {
        self.validated.lock().unwrap().push(qr_code.to_string());
        tokio::time::sleep(self.delay).await;

        match self.validate_error {
            Some(error) => Err(error()),
            None => Ok(response(self.status)),
        }
    }

    async fn scan_stats(&self, _event_id: i64) -> ApiResult<ScanStats> {
        let calls = self.stats_calls.fetch_add(1, Ordering::SeqCst) as u32;

        match self.stats_error {
            Some(status) => Err(ApiError::rejected(status, "nope")),
            None => Ok(stats(calls)),
        }
    }
}
