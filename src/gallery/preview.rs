//! Full-size preview requests
//!
//! Activating a card body asks a [`PreviewOpener`] for a window showing the
//! image at its native size. The preview is owned by the opener; nothing
//! flows back to the card.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    error::{OverlayError, OverlayResult},
    model::{CapturedImage, ImageId},
    util::imaging::image_dimensions,
};

/// Descriptor of an opened preview window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewWindow {
    pub image_id: ImageId,
    pub width:    u32,
    pub height:   u32,
}

impl PreviewWindow {
    /// Sizes a preview to the image's native pixel dimensions
    pub fn for_image(image: &CapturedImage) -> OverlayResult<Self> {
        let (width, height) =
            image_dimensions(image.bytes()).map_err(|e| OverlayError::PreviewUnavailable {
                reason: e.to_string(),
            })?;
        Ok(Self {
            image_id: image.id(),
            width,
            height,
        })
    }
}

/// Opens preview windows for captured images
pub trait PreviewOpener {
    fn open(&self, image: &CapturedImage) -> OverlayResult<PreviewWindow>;
}

/// Opener that only remembers what it was asked to open
#[derive(Debug, Clone, Default)]
pub struct RecordingPreviews {
    opened: Arc<Mutex<Vec<PreviewWindow>>>,
}

impl RecordingPreviews {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> Vec<PreviewWindow> {
        self.opened.lock().clone()
    }
}

impl PreviewOpener for RecordingPreviews {
    fn open(&self, image: &CapturedImage) -> OverlayResult<PreviewWindow> {
        let window = PreviewWindow::for_image(image)?;
        info!(image = %window.image_id, width = window.width, height = window.height, "preview opened");
        self.opened.lock().push(window.clone());
        Ok(window)
    }
}
