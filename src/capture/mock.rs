//! In-memory surface, cursor and view doubles
//!
//! These implement the capture traits without a windowing system and record
//! every call so tests can assert on ordering and balance.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use screenshot_overlay::{
//!     capture::{
//!         CaptureController, CaptureRequest, SessionSlot,
//!         mock::{MockCursor, MockSurfaceFactory, RecordingView},
//!     },
//!     config::OverlayConfig,
//!     model::{Point, Rect},
//! };
//!
//! let factory = Arc::new(MockSurfaceFactory::new());
//! let cursor = Arc::new(MockCursor::new());
//! let controller = CaptureController::new(factory.clone(), cursor.clone(), OverlayConfig::default())
//!     .unwrap()
//!     .with_slot(SessionSlot::new());
//!
//! let request = CaptureRequest::new(
//!     Rect::new(0.0, 0.0, 1440.0, 900.0),
//!     Point::new(10.0, 10.0),
//!     Box::new(RecordingView::new()),
//! );
//! let (mut session, mut outcome) = controller.trigger(request).unwrap();
//! session.cancel().unwrap();
//!
//! assert!(outcome.try_take().is_some());
//! assert_eq!(cursor.show_count(), 1);
//! ```

use std::sync::Arc;

use parking_lot::Mutex;

use super::{
    cursor::CursorControl,
    surface::{OverlaySurface, PointerInput, SelectionView, SurfaceFactory, SurfaceStyle},
};
use crate::{
    error::{OverlayError, OverlayResult},
    model::Rect,
};

/// One lifecycle step observed on a mock surface
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Created { frame: Rect, style: SurfaceStyle },
    OrderedFront,
    ContentDetached,
    Closed,
}

/// Factory producing [`MockSurface`]s that share one call log
#[derive(Debug, Default)]
pub struct MockSurfaceFactory {
    calls:        Arc<Mutex<Vec<SurfaceCall>>>,
    create_error: Option<String>,
    order_error:  Option<String>,
}

impl MockSurfaceFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every `create` call fail
    pub fn fail_create(mut self, reason: impl Into<String>) -> Self {
        self.create_error = Some(reason.into());
        self
    }

    /// Makes every created surface fail to come to the front
    pub fn fail_order_front(mut self, reason: impl Into<String>) -> Self {
        self.order_error = Some(reason.into());
        self
    }

    /// All calls observed so far, in order
    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.lock().clone()
    }

    pub fn count(&self, matcher: fn(&SurfaceCall) -> bool) -> usize {
        self.calls.lock().iter().filter(|call| matcher(call)).count()
    }

    pub fn created_count(&self) -> usize {
        self.count(|call| matches!(call, SurfaceCall::Created { .. }))
    }

    pub fn closed_count(&self) -> usize {
        self.count(|call| matches!(call, SurfaceCall::Closed))
    }

    pub fn detached_count(&self) -> usize {
        self.count(|call| matches!(call, SurfaceCall::ContentDetached))
    }
}

impl SurfaceFactory for MockSurfaceFactory {
    fn create(&self, frame: Rect, style: &SurfaceStyle) -> OverlayResult<Box<dyn OverlaySurface>> {
        if let Some(reason) = &self.create_error {
            return Err(OverlayError::SurfaceUnavailable {
                reason: reason.clone(),
            });
        }
        self.calls.lock().push(SurfaceCall::Created {
            frame,
            style: style.clone(),
        });
        Ok(Box::new(MockSurface {
            frame,
            calls: self.calls.clone(),
            order_error: self.order_error.clone(),
        }))
    }
}

/// Surface that only records what was done to it
#[derive(Debug)]
pub struct MockSurface {
    frame:       Rect,
    calls:       Arc<Mutex<Vec<SurfaceCall>>>,
    order_error: Option<String>,
}

impl OverlaySurface for MockSurface {
    fn frame(&self) -> Rect {
        self.frame
    }

    fn order_front_as_key(&mut self) -> OverlayResult<()> {
        if let Some(reason) = &self.order_error {
            return Err(OverlayError::SurfaceUnavailable {
                reason: reason.clone(),
            });
        }
        self.calls.lock().push(SurfaceCall::OrderedFront);
        Ok(())
    }

    fn detach_content(&mut self) {
        self.calls.lock().push(SurfaceCall::ContentDetached);
    }

    fn close(&mut self) {
        self.calls.lock().push(SurfaceCall::Closed);
    }
}

#[derive(Debug, Default)]
struct CursorCounts {
    hidden: usize,
    shown:  usize,
}

/// Cursor double tracking hide/show balance
#[derive(Debug, Default)]
pub struct MockCursor {
    counts:     Mutex<CursorCounts>,
    hide_error: Option<String>,
    show_error: Option<String>,
}

impl MockCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_hide(mut self, reason: impl Into<String>) -> Self {
        self.hide_error = Some(reason.into());
        self
    }

    pub fn fail_show(mut self, reason: impl Into<String>) -> Self {
        self.show_error = Some(reason.into());
        self
    }

    pub fn hide_count(&self) -> usize {
        self.counts.lock().hidden
    }

    pub fn show_count(&self) -> usize {
        self.counts.lock().shown
    }

    /// True when every hide has been matched by a show
    pub fn is_visible(&self) -> bool {
        let counts = self.counts.lock();
        counts.hidden == counts.shown
    }
}

impl CursorControl for MockCursor {
    fn hide(&self) -> OverlayResult<()> {
        if let Some(reason) = &self.hide_error {
            return Err(OverlayError::CursorUnavailable {
                reason: reason.clone(),
            });
        }
        self.counts.lock().hidden += 1;
        Ok(())
    }

    fn show(&self) -> OverlayResult<()> {
        // Counted even when failing: the restore was attempted
        self.counts.lock().shown += 1;
        if let Some(reason) = &self.show_error {
            return Err(OverlayError::CursorUnavailable {
                reason: reason.clone(),
            });
        }
        Ok(())
    }
}

/// Selection view recording every forwarded input
///
/// Clones share the same log, so a test can keep one clone and hand the
/// other to the session.
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    inputs: Arc<Mutex<Vec<(PointerInput, Rect)>>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inputs(&self) -> Vec<(PointerInput, Rect)> {
        self.inputs.lock().clone()
    }

    /// Whether the session still holds its clone of this view
    pub fn is_hosted(&self) -> bool {
        Arc::strong_count(&self.inputs) > 1
    }
}

impl SelectionView for RecordingView {
    fn pointer_event(&mut self, input: PointerInput, target: Rect) {
        self.inputs.lock().push((input, target));
    }
}
