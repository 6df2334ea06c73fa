//! In-memory collection of captured images
//!
//! The gallery owns the images; cards only ever see clones. Newest captures
//! come first.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use super::card::GalleryItem;
use crate::{
    error::{OverlayError, OverlayResult},
    model::{CaptureOutcome, CapturedImage, ImageId},
};

/// Gallery shared between the capture flow and its cards
pub type SharedGallery = Arc<Mutex<Gallery>>;

#[derive(Debug, Clone, Default)]
pub struct Gallery {
    images: Vec<CapturedImage>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedGallery {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Adds an image at the front
    pub fn insert(&mut self, image: CapturedImage) {
        debug!(image = %image.id(), "image added to gallery");
        self.images.insert(0, image);
    }

    /// Adds the image from a completed capture; returns its id
    pub fn accept(&mut self, outcome: CaptureOutcome) -> Option<ImageId> {
        match outcome {
            CaptureOutcome::Completed(image) => {
                let id = image.id();
                self.insert(image);
                Some(id)
            }
            CaptureOutcome::Cancelled(_) => None,
        }
    }

    pub fn remove(&mut self, id: ImageId) -> OverlayResult<CapturedImage> {
        let index = self
            .images
            .iter()
            .position(|image| image.id() == id)
            .ok_or(OverlayError::ImageNotFound { id })?;
        Ok(self.images.remove(index))
    }

    pub fn get(&self, id: ImageId) -> Option<&CapturedImage> {
        self.images.iter().find(|image| image.id() == id)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CapturedImage> {
        self.images.iter()
    }

    /// Builds one gallery item per image, flagging the hovered one
    pub fn items(&self, hovered: Option<ImageId>) -> Vec<GalleryItem> {
        self.images
            .iter()
            .map(|image| GalleryItem::new(image.clone(), Some(image.id()) == hovered))
            .collect()
    }
}
