use crate::{
    Camera, CameraGuard, Frame, FrameSource, QrDecoder, ScanCycle, ScannerError, ScannerResult,
    TicketService,
};

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use linkt_api::{ApiError, Navigator};
use linkt_config::ScannerConfig;
use linkt_core::{Route, ScanResponse, ScanStats};
use linkt_session::SessionStore;
use log::{debug, error, info, warn};
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, Sleep};

pub const STATS_FORBIDDEN_MESSAGE: &str = "You are not authorized to scan tickets for this event";
pub const STATS_FAILED_MESSAGE: &str = "Failed to load event statistics";
pub const CAMERA_ERROR_MESSAGE: &str =
    "Unable to access camera. Please ensure camera permissions are granted.";

/// Everything a scan view needs from the rest of the client
#[derive(Clone)]
pub struct ScanContext {
    pub event_id: i64,
    pub session: Arc<SessionStore>,
    pub navigator: Arc<dyn Navigator>,
    pub tickets: Arc<dyn TicketService>,
    pub camera: Arc<dyn Camera>,
    pub decoder: Arc<dyn QrDecoder>,
}

/// What the scan screen renders
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanView {
    pub stats: Option<ScanStats>,
    /// Outcome on display until the hold expires
    pub result: Option<ScanResponse>,
    /// A code is being validated or its result is on display
    pub busy: bool,
    /// Non-fatal problem loading the event counters
    pub error: Option<String>,
    /// Camera could not be opened. Scanning never starts.
    pub camera_error: Option<String>,
}

/// A mounted scan screen for one event.
pub struct ScanSession {
    event_id: i64,
    view_rx: watch::Receiver<ScanView>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
    camera: Option<CameraGuard>,
}

impl ScanSession {
    /// Check the role, load counters, open the camera and start polling.
    ///
    /// Only a role failure is an `Err`. Counter and camera failures are
    /// reported through [`ScanView`].
    pub async fn mount(config: &ScannerConfig, ctx: ScanContext) -> ScannerResult<Self> {
        let authorized = ctx
            .session
            .user()
            .is_some_and(|user| user.role.can_scan_tickets());
        if !authorized {
            warn!("Scan view for event {} refused: not an organizer", ctx.event_id);
            ctx.navigator.navigate(Route::Home);
            return Err(ScannerError::not_authorized());
        }

        let mut view = ScanView::default();

        match ctx.tickets.scan_stats(ctx.event_id).await {
            Ok(stats) => view.stats = Some(stats),
            Err(e) => {
                warn!("Failed to load scan stats for event {}: {e}", ctx.event_id);
                view.error = Some(stats_error_message(&e).to_string());
            }
        }

        let stream = match ctx.camera.acquire().await {
            Ok(stream) => stream,
            Err(e) => {
                error!("Camera acquisition failed: {e}");
                view.camera_error = Some(CAMERA_ERROR_MESSAGE.to_string());
                let (_view_tx, view_rx) = watch::channel(view);

                return Ok(Self {
                    event_id: ctx.event_id,
                    view_rx,
                    shutdown_tx: None,
                    task: None,
                    camera: None,
                });
            }
        };

        let (view_tx, view_rx) = watch::channel(view);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let scan_loop = ScanLoop {
            event_id: ctx.event_id,
            poll_interval: config.poll_interval(),
            result_hold: config.result_hold(),
            video: stream.video,
            decoder: ctx.decoder,
            tickets: ctx.tickets,
            view_tx,
            cycle: ScanCycle::new(),
        };
        let task = tokio::spawn(scan_loop.run(shutdown_rx));

        info!(
            "Scanning tickets for event {} every {:?}",
            ctx.event_id,
            config.poll_interval()
        );

        Ok(Self {
            event_id: ctx.event_id,
            view_rx,
            shutdown_tx: Some(shutdown_tx),
            task: Some(task),
            camera: Some(CameraGuard::new(stream.tracks)),
        })
    }

    pub fn event_id(&self) -> i64 {
        self.event_id
    }

    /// Current screen state
    pub fn view(&self) -> ScanView {
        self.view_rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ScanView> {
        self.view_rx.clone()
    }

    /// Whether the poll loop is still alive
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    pub fn live_tracks(&self) -> usize {
        self.camera.as_ref().map_or(0, CameraGuard::live_tracks)
    }

    /// Stop polling, wait for the loop to exit and turn the camera off.
    /// A validation still in flight is abandoned.
    pub async fn unmount(mut self) {
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            let _ = shutdown_tx.send(());
        }

        if let Some(task) = self.task.take()
            && let Err(e) = task.await
        {
            error!("Scan loop for event {} ended abnormally: {e}", self.event_id);
        }

        if let Some(mut camera) = self.camera.take() {
            camera.release();
        }

        debug!("Scan view for event {} unmounted", self.event_id);
    }
}

impl Drop for ScanSession {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        if let Some(mut camera) = self.camera.take() {
            camera.release();
        }
    }
}

impl std::fmt::Debug for ScanSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanSession")
            .field("event_id", &self.event_id)
            .field("running", &self.is_running())
            .field("camera", &self.camera)
            .finish_non_exhaustive()
    }
}

fn stats_error_message(err: &ApiError) -> &'static str {
    if err.status() == Some(403) {
        STATS_FORBIDDEN_MESSAGE
    } else {
        STATS_FAILED_MESSAGE
    }
}

type Pending<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Result of one validation call, plus the refreshed counters after a
/// successful check-in
struct Validation {
    response: ScanResponse,
    stats: Option<ScanStats>,
}

struct ScanLoop {
    event_id: i64,
    poll_interval: Duration,
    result_hold: Duration,
    video: Box<dyn FrameSource>,
    decoder: Arc<dyn QrDecoder>,
    tickets: Arc<dyn TicketService>,
    view_tx: watch::Sender<ScanView>,
    cycle: ScanCycle,
}

impl ScanLoop {
    async fn run(mut self, mut shutdown_rx: oneshot::Receiver<()>) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut in_flight: Option<Pending<Validation>> = None;
        let mut hold: Option<Pin<Box<Sleep>>> = None;

        loop {
            tokio::select! {
                biased;

                _ = &mut shutdown_rx => {
                    debug!("Scan loop for event {} stopping", self.event_id);
                    break;
                }

                validation = settle(&mut in_flight) => {
                    in_flight = None;
                    self.finish(validation);
                    hold = Some(Box::pin(tokio::time::sleep_until(
                        Instant::now() + self.result_hold,
                    )));
                }

                () = settle(&mut hold) => {
                    hold = None;
                    self.cycle.reset();
                    self.publish(None);
                }

                _ = ticker.tick() => {
                    let Some(frame) = self.video.current_frame() else {
                        continue;
                    };
                    let Some(code) = self.decode(frame).await else {
                        continue;
                    };
                    if !self.cycle.offer(&code) {
                        continue;
                    }

                    debug!("Decoded ticket code for event {}", self.event_id);
                    self.publish(None);
                    in_flight = Some(Box::pin(validate(
                        self.tickets.clone(),
                        self.event_id,
                        code,
                    )));
                }
            }
        }
    }

    /// Decodes on the blocking pool; a full camera frame is CPU-bound work
    fn decode(&self, frame: Frame) -> impl Future<Output = Option<String>> + Send + 'static {
        let decoder = Arc::clone(&self.decoder);
        let event_id = self.event_id;
        async move {
            match tokio::task::spawn_blocking(move || decoder.decode(&frame)).await {
                Ok(code) => code,
                Err(e) => {
                    error!("QR decode for event {} failed: {e}", event_id);
                    None
                }
            }
        }
    }

    fn finish(&mut self, validation: Validation) {
        let status = validation.response.status;
        if status.is_warning() {
            warn!("Ticket check for event {}: {}", self.event_id, status.as_str());
        } else {
            info!("Ticket check for event {}: {}", self.event_id, status.as_str());
        }
        self.cycle.complete(validation.response);
        self.publish(validation.stats);
    }

    fn publish(&self, stats: Option<ScanStats>) {
        let cycle = &self.cycle;
        self.view_tx.send_modify(|view| {
            view.busy = cycle.is_busy();
            view.result = cycle.result().cloned();
            if let Some(stats) = stats {
                view.stats = Some(stats);
                view.error = None;
            }
        });
    }
}

/// Await the future in `slot`, or never resolve when it is empty
async fn settle<F: Future + Unpin>(slot: &mut Option<F>) -> F::Output {
    match slot.as_mut() {
        Some(fut) => fut.await,
        None => std::future::pending().await,
    }
}

async fn validate(tickets: Arc<dyn TicketService>, event_id: i64, code: String) -> Validation {
    let response = match tickets.validate_ticket(event_id, &code).await {
        Ok(response) => response,
        Err(e) => {
            warn!("Ticket validation for event {event_id} failed: {e}");
            let message = match e {
                ApiError::Rejected { message, .. } => Some(message),
                _ => None,
            };
            ScanResponse::transport_error(message)
        }
    };

    let stats = if response.status.changes_counters() {
        match tickets.scan_stats(event_id).await {
            Ok(stats) => Some(stats),
            Err(e) => {
                warn!("Failed to refresh scan stats for event {event_id}: {e}");
                None
            }
        }
    } else {
        None
    };

    Validation { response, stats }
}
