//! Capture session state machine
//!
//! A [`CaptureSession`] moves through
//! `Initializing -> Active -> {Completing, Cancelling} -> Terminated`.
//! It owns the overlay surface, the hosted selection view, the cursor guard
//! and the slot lease. The outcome sink is consumed on the single terminal
//! transition, so an outcome can only be delivered once, and `Drop` runs the
//! cancelling path for a session that was abandoned while live.

use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use super::{
    cursor::{CursorControl, CursorGuard},
    slot::SlotLease,
    surface::{OverlayEvent, OverlaySurface, PointerInput, SelectionView, SurfaceFactory, SurfaceStyle},
};
use crate::{
    error::OverlayResult,
    model::{
        CancelReason, CaptureOutcome, CapturedImage, CoordinateSpace, Point, Rect, SessionId,
        SessionState,
    },
};

/// Completion callback in the shape hosts traditionally pass around
pub type CompletionCallback = Box<dyn FnOnce(Option<Vec<u8>>)>;

/// Where the session's single outcome goes
pub(crate) enum OutcomeSink {
    Channel(oneshot::Sender<CaptureOutcome>),
    Callback(CompletionCallback),
}

impl OutcomeSink {
    pub(crate) fn channel(session: SessionId) -> (Self, OutcomeReceiver) {
        let (tx, rx) = oneshot::channel();
        (Self::Channel(tx), OutcomeReceiver { session, rx })
    }

    fn deliver(self, outcome: CaptureOutcome) {
        match self {
            OutcomeSink::Channel(tx) => {
                if tx.send(outcome).is_err() {
                    debug!("outcome receiver dropped before delivery");
                }
            }
            OutcomeSink::Callback(callback) => callback(outcome.into_bytes()),
        }
    }
}

/// Receiving end of a session's outcome
#[derive(Debug)]
pub struct OutcomeReceiver {
    session: SessionId,
    rx:      oneshot::Receiver<CaptureOutcome>,
}

impl OutcomeReceiver {
    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Takes the outcome if the session has already delivered it
    ///
    /// Returns `None` while the session is still live, and again after the
    /// outcome has been taken.
    pub fn try_take(&mut self) -> Option<CaptureOutcome> {
        self.rx.try_recv().ok()
    }

    /// Waits for the outcome
    ///
    /// A session always sends before its sink is dropped; a closed channel
    /// reads as a dropped session.
    pub async fn recv(self) -> CaptureOutcome {
        self.rx
            .await
            .unwrap_or(CaptureOutcome::Cancelled(CancelReason::Dropped))
    }
}

/// Everything a session needs to start, gathered by the controller
pub(crate) struct SessionParts<'a> {
    pub lease:   SlotLease,
    pub factory: &'a dyn SurfaceFactory,
    pub cursor:  Arc<dyn CursorControl>,
    pub style:   &'a SurfaceStyle,
    pub space:   CoordinateSpace,
    pub target:  Rect,
    pub pointer: Point,
    pub view:    Box<dyn SelectionView>,
    pub sink:    OutcomeSink,
}

/// One in-progress or finished screenshot interaction
pub struct CaptureSession {
    id:      SessionId,
    state:   SessionState,
    target:  Rect,
    pointer: Point,
    space:   CoordinateSpace,
    surface: Option<Box<dyn OverlaySurface>>,
    view:    Option<Box<dyn SelectionView>>,
    cursor:  Option<CursorGuard>,
    sink:    Option<OutcomeSink>,
    lease:   Option<SlotLease>,
}

impl CaptureSession {
    /// Runs the Initializing phase and returns an Active session
    ///
    /// On failure nothing stays behind: a created surface is closed, the
    /// cursor is left visible, and the slot is freed. No outcome is delivered
    /// because no session came into existence.
    pub(crate) fn start(parts: SessionParts<'_>) -> OverlayResult<Self> {
        let SessionParts {
            lease,
            factory,
            cursor,
            style,
            space,
            target,
            pointer,
            view,
            sink,
        } = parts;

        let id = lease.id();
        debug!(session = %id, "capture session initializing");

        let mut session = Self {
            id,
            state: SessionState::Initializing,
            target,
            pointer: target.to_local(pointer, space),
            space,
            surface: None,
            view: Some(view),
            cursor: None,
            sink: Some(sink),
            lease: Some(lease),
        };

        let mut surface = match factory.create(target, style) {
            Ok(surface) => surface,
            Err(e) => {
                session.abandon();
                return Err(e);
            }
        };
        if let Err(e) = surface.order_front_as_key() {
            surface.close();
            session.abandon();
            return Err(e);
        }
        let frame = surface.frame();
        if frame != target {
            warn!(session = %id, ?frame, ?target, "overlay surface frame differs from target");
        }
        session.surface = Some(surface);

        match CursorGuard::acquire(cursor) {
            Ok(guard) => session.cursor = Some(guard),
            Err(e) => {
                session.teardown_surface(false);
                session.abandon();
                return Err(e);
            }
        }

        session.state = SessionState::Active;
        info!(
            session = %id,
            width = target.size.width,
            height = target.size.height,
            "capture session active"
        );
        Ok(session)
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    /// The target rectangle in global screen coordinates
    pub fn target(&self) -> Rect {
        self.target
    }

    /// The last pointer position in surface-local coordinates
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Frame of the overlay surface as the windowing layer reports it
    ///
    /// `None` once the surface has been torn down.
    pub fn surface_frame(&self) -> Option<Rect> {
        self.surface.as_ref().map(|surface| surface.frame())
    }

    /// Feeds one host event into the state machine
    ///
    /// Pointer input is translated and forwarded to the selection view.
    /// A selection with bytes completes the session; an empty selection,
    /// a cancel, or a surface close cancels it. Once terminated, events are
    /// ignored and the state stays `Terminated`.
    ///
    /// The returned error only reports a failed cursor restore; the session
    /// has still terminated in that case.
    pub fn handle_event(&mut self, event: OverlayEvent) -> OverlayResult<SessionState> {
        if self.state == SessionState::Terminated {
            debug!(session = %self.id, ?event, "ignoring event after termination");
            return Ok(self.state);
        }

        match event {
            OverlayEvent::Pointer { kind, global } => {
                self.pointer = self.target.to_local(global, self.space);
                if let Some(view) = self.view.as_mut() {
                    view.pointer_event(
                        PointerInput {
                            kind,
                            position: self.pointer,
                        },
                        self.target,
                    );
                }
                Ok(self.state)
            }
            OverlayEvent::Selection(bytes) if bytes.is_empty() => {
                self.finish(CaptureOutcome::Cancelled(CancelReason::EmptySelection), false)
            }
            OverlayEvent::Selection(bytes) => {
                let image = CapturedImage::new(bytes);
                self.finish(CaptureOutcome::Completed(image), false)
            }
            OverlayEvent::Cancelled => {
                self.finish(CaptureOutcome::Cancelled(CancelReason::UserAborted), false)
            }
            OverlayEvent::SurfaceClosed => {
                self.finish(CaptureOutcome::Cancelled(CancelReason::SurfaceClosed), true)
            }
        }
    }

    /// Completes the session with encoded image bytes
    pub fn complete(&mut self, bytes: Vec<u8>) -> OverlayResult<SessionState> {
        self.handle_event(OverlayEvent::Selection(bytes))
    }

    /// Cancels the session as if the user pressed Escape
    pub fn cancel(&mut self) -> OverlayResult<SessionState> {
        self.handle_event(OverlayEvent::Cancelled)
    }

    fn finish(
        &mut self,
        outcome: CaptureOutcome,
        surface_closed: bool,
    ) -> OverlayResult<SessionState> {
        self.state = if outcome.is_completed() {
            SessionState::Completing
        } else {
            SessionState::Cancelling
        };
        match &outcome {
            CaptureOutcome::Completed(image) => {
                info!(session = %self.id, image = %image.id(), bytes = image.len(), "capture completed")
            }
            CaptureOutcome::Cancelled(reason) => {
                info!(session = %self.id, ?reason, "capture cancelled")
            }
        }

        if let Some(sink) = self.sink.take() {
            sink.deliver(outcome);
        }

        let restored = match self.cursor.take() {
            Some(guard) => guard.release(),
            None => Ok(()),
        };

        self.teardown_surface(surface_closed);
        self.lease = None;
        self.state = SessionState::Terminated;
        debug!(session = %self.id, "capture session terminated");

        restored.map(|_| self.state)
    }

    fn teardown_surface(&mut self, already_closed: bool) {
        if let Some(mut surface) = self.surface.take() {
            surface.detach_content();
            if !already_closed {
                surface.close();
            }
        }
        self.view = None;
    }

    /// Drops the sink and lease without delivering; Initializing failed
    fn abandon(&mut self) {
        self.sink = None;
        self.view = None;
        self.lease = None;
        self.state = SessionState::Terminated;
    }
}

impl std::fmt::Debug for CaptureSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureSession")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("target", &self.target)
            .field("pointer", &self.pointer)
            .finish_non_exhaustive()
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        if self.state == SessionState::Terminated {
            return;
        }
        warn!(session = %self.id, state = %self.state, "capture session dropped while live");
        if let Err(e) = self.finish(CaptureOutcome::Cancelled(CancelReason::Dropped), false) {
            warn!("Failed to restore cursor for dropped session: {}", e);
        }
    }
}
