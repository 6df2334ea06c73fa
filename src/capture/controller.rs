//! Hotkey-facing entry point for capture sessions

use std::sync::Arc;

use tracing::info;

use super::{
    cursor::CursorControl,
    session::{CaptureSession, CompletionCallback, OutcomeReceiver, OutcomeSink, SessionParts},
    slot::{SessionSlot, SlotLease},
    surface::{SelectionView, SurfaceFactory, SurfaceStyle},
};
use crate::{
    config::OverlayConfig,
    error::OverlayResult,
    model::{Point, Rect, SessionId},
};

/// What a hotkey trigger asks the controller to capture
pub struct CaptureRequest {
    /// Full-screen target rectangle in global coordinates
    pub target:  Rect,
    /// Pointer position at trigger time, in global coordinates
    pub pointer: Point,
    /// Selection content to host on the overlay
    pub view:    Box<dyn SelectionView>,
}

impl CaptureRequest {
    pub fn new(target: Rect, pointer: Point, view: Box<dyn SelectionView>) -> Self {
        Self {
            target,
            pointer,
            view,
        }
    }
}

/// Starts capture sessions on behalf of a global shortcut
///
/// A second trigger while a session is live is rejected with
/// [`OverlayError::SessionAlreadyActive`](crate::error::OverlayError::SessionAlreadyActive);
/// the live session is left untouched.
pub struct CaptureController {
    factory: Arc<dyn SurfaceFactory>,
    cursor:  Arc<dyn CursorControl>,
    slot:    SessionSlot,
    style:   SurfaceStyle,
    config:  OverlayConfig,
}

impl CaptureController {
    /// Creates a controller bound to the process-wide session slot
    pub fn new(
        factory: Arc<dyn SurfaceFactory>,
        cursor: Arc<dyn CursorControl>,
        config: OverlayConfig,
    ) -> OverlayResult<Self> {
        config.validate()?;
        Ok(Self {
            factory,
            cursor,
            slot: SessionSlot::global().clone(),
            style: SurfaceStyle::overlay(config.background_alpha),
            config,
        })
    }

    /// Uses `slot` instead of the process-wide slot
    pub fn with_slot(mut self, slot: SessionSlot) -> Self {
        self.slot = slot;
        self
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn style(&self) -> &SurfaceStyle {
        &self.style
    }

    /// The live session, if one holds the slot
    pub fn active_session(&self) -> Option<SessionId> {
        self.slot.active()
    }

    /// Starts a session whose outcome arrives on the returned receiver
    pub fn trigger(
        &self,
        request: CaptureRequest,
    ) -> OverlayResult<(CaptureSession, OutcomeReceiver)> {
        let lease = self.slot.acquire(SessionId::next())?;
        let (sink, receiver) = OutcomeSink::channel(lease.id());
        let session = self.start(request, lease, sink)?;
        Ok((session, receiver))
    }

    /// Starts a session that reports through a completion callback
    ///
    /// The callback receives `Some(bytes)` for a completed capture and
    /// `None` otherwise. It runs once, synchronously, on the terminal event.
    pub fn trigger_with_callback<F>(
        &self,
        request: CaptureRequest,
        on_complete: F,
    ) -> OverlayResult<CaptureSession>
    where
        F: FnOnce(Option<Vec<u8>>) + 'static,
    {
        let lease = self.slot.acquire(SessionId::next())?;
        let callback: CompletionCallback = Box::new(on_complete);
        self.start(request, lease, OutcomeSink::Callback(callback))
    }

    fn start(
        &self,
        request: CaptureRequest,
        lease: SlotLease,
        sink: OutcomeSink,
    ) -> OverlayResult<CaptureSession> {
        info!(session = %lease.id(), "capture triggered");
        CaptureSession::start(SessionParts {
            lease,
            factory: self.factory.as_ref(),
            cursor: self.cursor.clone(),
            style: &self.style,
            space: self.config.coordinate_space,
            target: request.target,
            pointer: request.pointer,
            view: request.view,
            sink,
        })
    }
}
