//! Gallery card presenter
//!
//! [`CardPresenter::render`] is a pure function of a captured image and its
//! hover flag. [`CardPresenter::activate`] turns one click on a card region
//! into exactly one call on an [`ImageActions`] implementation; the
//! presenter itself never touches the collection, the clipboard or the disk.
//! [`CardPresenter::drag`] hands the thumbnail's encoded bytes to a host
//! drag session so the image can be dropped into other applications.

use std::{path::PathBuf, sync::Arc};

use image::ImageFormat;
use tracing::{debug, warn};

use super::preview::PreviewWindow;
use crate::{
    config::OverlayConfig,
    error::OverlayResult,
    model::{CapturedImage, ImageId, Size},
    util::imaging::{image_dimensions, sniff_format},
};

/// Outward operations a card can request
///
/// Each method is called at most once per activation and reports whether
/// the downstream operation succeeded. No retries are attempted.
pub trait ImageActions {
    /// Remove the image from its owning collection
    fn delete(&self, image: &CapturedImage) -> OverlayResult<()>;

    /// Place the image on the system clipboard, replacing its contents
    fn copy(&self, image: &CapturedImage) -> OverlayResult<()>;

    /// Persist the image; returns where it was written
    fn save(&self, image: &CapturedImage) -> OverlayResult<PathBuf>;

    /// Open a full-size preview owned independently of the card
    fn open(&self, image: &CapturedImage) -> OverlayResult<PreviewWindow>;
}

/// A captured image plus its transient hover flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryItem {
    pub image:   CapturedImage,
    pub hovered: bool,
}

impl GalleryItem {
    pub fn new(image: CapturedImage, hovered: bool) -> Self {
        Self { image, hovered }
    }
}

/// Region of a card that received a click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardTarget {
    /// The close control in the top corner
    Delete,
    /// The "Copy" button
    Copy,
    /// The "Save" button
    Save,
    /// Anywhere else on the card
    Body,
}

/// What an activation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Deleted(ImageId),
    Copied(ImageId),
    Saved(PathBuf),
    PreviewOpened(PreviewWindow),
}

/// Thumbnail content of a card
#[derive(Debug, Clone, PartialEq)]
pub enum Thumbnail {
    /// The image decoded; shown aspect-filled into the card frame
    Image {
        source_width:  u32,
        source_height: u32,
    },
    /// The bytes could not be decoded
    Placeholder { reason: String },
}

/// Presentation state of one gallery card
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub image_id:         ImageId,
    pub frame:            Size,
    pub thumbnail:        Thumbnail,
    /// Delete/Copy/Save controls are shown only while hovered
    pub controls_visible: bool,
    pub blur_radius:      f32,
    /// White border while hovered, gray otherwise
    pub highlighted:      bool,
}

impl Card {
    /// The decode failure this card is standing in for, if any
    pub fn decode_failure(&self) -> Option<&str> {
        match &self.thumbnail {
            Thumbnail::Placeholder { reason } => Some(reason),
            Thumbnail::Image { .. } => None,
        }
    }
}

/// What a card offers when its thumbnail is dragged out
///
/// The bytes are the image's own shared storage, handed over unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    pub image_id: ImageId,
    pub format:   ImageFormat,
    bytes:        Arc<[u8]>,
}

impl DragPayload {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// MIME type for the pasteboard, e.g. `image/png`
    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }
}

/// Renders cards and dispatches card clicks
#[derive(Debug, Clone)]
pub struct CardPresenter {
    thumbnail_size: Size,
    hover_blur:     f32,
}

impl CardPresenter {
    pub fn new(config: &OverlayConfig) -> Self {
        Self {
            thumbnail_size: config.thumbnail_size,
            hover_blur:     config.hover_blur,
        }
    }

    /// Builds the card for `item`
    ///
    /// Undecodable bytes produce a placeholder thumbnail and a warning
    /// instead of an error. Hover only affects control visibility, blur and
    /// border.
    pub fn render(&self, item: &GalleryItem) -> Card {
        let thumbnail = match image_dimensions(item.image.bytes()) {
            Ok((source_width, source_height)) => Thumbnail::Image {
                source_width,
                source_height,
            },
            Err(e) => {
                warn!(image = %item.image.id(), "Rendering placeholder: {}", e);
                Thumbnail::Placeholder {
                    reason: e.to_string(),
                }
            }
        };

        Card {
            image_id: item.image.id(),
            frame: self.thumbnail_size,
            thumbnail,
            controls_visible: item.hovered,
            blur_radius: if item.hovered { self.hover_blur } else { 0.0 },
            highlighted: item.hovered,
        }
    }

    /// Sends exactly one request to `actions` for a click on `target`
    pub fn activate(
        &self,
        item: &GalleryItem,
        target: CardTarget,
        actions: &dyn ImageActions,
    ) -> OverlayResult<ActionOutcome> {
        let image = &item.image;
        debug!(image = %image.id(), ?target, "card activated");
        match target {
            CardTarget::Delete => actions.delete(image).map(|_| ActionOutcome::Deleted(image.id())),
            CardTarget::Copy => actions.copy(image).map(|_| ActionOutcome::Copied(image.id())),
            CardTarget::Save => actions.save(image).map(ActionOutcome::Saved),
            CardTarget::Body => actions.open(image).map(ActionOutcome::PreviewOpened),
        }
    }

    /// Builds the drag payload for a card's thumbnail
    ///
    /// Dragging works whether or not the card is hovered. Bytes whose
    /// format cannot be identified have nothing to offer and fail with
    /// [`OverlayError::DecodeFailure`](crate::error::OverlayError::DecodeFailure).
    pub fn drag(&self, item: &GalleryItem) -> OverlayResult<DragPayload> {
        let image = &item.image;
        let format = sniff_format(image.bytes()).inspect_err(|e| {
            warn!(image = %image.id(), "Nothing to drag: {}", e);
        })?;
        debug!(image = %image.id(), ?format, bytes = image.len(), "drag started");
        Ok(DragPayload {
            image_id: image.id(),
            format,
            bytes: image.shared_bytes(),
        })
    }
}

impl Default for CardPresenter {
    fn default() -> Self {
        Self::new(&OverlayConfig::default())
    }
}
