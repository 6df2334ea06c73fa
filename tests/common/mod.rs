//! Shared test utilities for integration tests

#![allow(dead_code)]

use std::{
    cell::RefCell,
    rc::Rc,
    sync::{Arc, Once},
};

use image::{DynamicImage, RgbaImage};
use screenshot_overlay::{
    capture::{
        CaptureController, CaptureRequest, SessionSlot,
        mock::{MockCursor, MockSurfaceFactory, RecordingView},
    },
    config::OverlayConfig,
    model::{CapturedImage, Point, Rect},
    util::{imaging::encode_png, logging::init_tracing},
};

static TRACING: Once = Once::new();

/// Installs a test subscriber once per test binary
pub fn init_logging() {
    TRACING.call_once(|| {
        let _ = init_tracing(Some("screenshot_overlay=debug"));
    });
}

/// The full-screen rectangle used by most tests
pub fn screen() -> Rect {
    Rect::new(0.0, 0.0, 1440.0, 900.0)
}

/// Controller wired to mocks and a private session slot
pub struct Harness {
    pub controller: CaptureController,
    pub factory:    Arc<MockSurfaceFactory>,
    pub cursor:     Arc<MockCursor>,
    pub slot:       SessionSlot,
}

impl Harness {
    pub fn new() -> Self {
        Self::with(MockSurfaceFactory::new(), MockCursor::new(), OverlayConfig::default())
    }

    pub fn with(factory: MockSurfaceFactory, cursor: MockCursor, config: OverlayConfig) -> Self {
        init_logging();
        let factory = Arc::new(factory);
        let cursor = Arc::new(cursor);
        let slot = SessionSlot::new();
        let controller = CaptureController::new(factory.clone(), cursor.clone(), config)
            .expect("valid config")
            .with_slot(slot.clone());
        Self {
            controller,
            factory,
            cursor,
            slot,
        }
    }

    /// A request at the origin with a fresh recording view
    pub fn request(&self) -> (CaptureRequest, RecordingView) {
        let view = RecordingView::new();
        let request = CaptureRequest::new(screen(), Point::new(0.0, 0.0), Box::new(view.clone()));
        (request, view)
    }

    pub fn cursor_balanced(&self) -> bool {
        self.cursor.hide_count() == self.cursor.show_count()
    }
}

/// Collects every completion callback invocation
#[derive(Clone, Default)]
pub struct CallbackLog {
    calls: Rc<RefCell<Vec<Option<Vec<u8>>>>>,
}

impl CallbackLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn callback(&self) -> impl FnOnce(Option<Vec<u8>>) + 'static {
        let calls = self.calls.clone();
        move |bytes| calls.borrow_mut().push(bytes)
    }

    pub fn calls(&self) -> Vec<Option<Vec<u8>>> {
        self.calls.borrow().clone()
    }
}

/// A decodable PNG image of the given size
pub fn png_image(width: u32, height: u32) -> CapturedImage {
    let pixels = DynamicImage::ImageRgba8(RgbaImage::new(width, height));
    CapturedImage::new(encode_png(&pixels).expect("encode png"))
}
