//! Error types for overlay capture and gallery operations
//!
//! This module defines the error taxonomy shared by the capture session
//! controller and the gallery presenter. Each variant carries enough context
//! to log, and `remediation_hint()` gives a short next step for the user.

use crate::model::{ImageId, SessionId};

/// Result type alias for overlay operations
pub type OverlayResult<T> = Result<T, OverlayError>;

/// Error type for capture sessions and gallery actions
#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    /// Encoded image bytes could not be turned into a displayable image
    #[error("Failed to decode image: {reason}")]
    DecodeFailure {
        /// Reason reported by the decoder
        reason: String,
    },

    /// A capture session was requested while another one is still live
    #[error("Capture session {active} is already active")]
    SessionAlreadyActive {
        /// The session currently holding the slot
        active: SessionId,
    },

    /// The overlay surface could not be created or shown
    #[error("Overlay surface unavailable: {reason}")]
    SurfaceUnavailable {
        /// Reason reported by the windowing layer
        reason: String,
    },

    /// The pointer cursor could not be hidden or restored
    #[error("Cursor control failed: {reason}")]
    CursorUnavailable {
        /// Reason reported by the platform
        reason: String,
    },

    /// The system clipboard could not be opened or written
    #[error("Clipboard unavailable: {reason}")]
    ClipboardUnavailable {
        /// Reason reported by the clipboard backend
        reason: String,
    },

    /// No image with this id exists in the gallery
    #[error("Image {id} not found in gallery")]
    ImageNotFound {
        /// The missing image id
        id: ImageId,
    },

    /// A full-size preview could not be opened
    #[error("Preview unavailable: {reason}")]
    PreviewUnavailable {
        /// Reason the preview failed
        reason: String,
    },

    /// Image encoding failed
    #[error("Failed to encode image as {format}: {reason}")]
    EncodingFailed {
        /// Image format that failed
        format: String,
        /// Reason for encoding failure
        reason: String,
    },

    /// Invalid parameter provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: String,
        /// Reason why it's invalid
        reason:    String,
    },

    /// I/O error occurred
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl OverlayError {
    /// Builds a [`OverlayError::DecodeFailure`] from any displayable error
    pub fn decode(err: impl std::fmt::Display) -> Self {
        OverlayError::DecodeFailure {
            reason: err.to_string(),
        }
    }

    /// Returns an actionable remediation hint for this error
    ///
    /// # Examples
    ///
    /// ```
    /// use screenshot_overlay::{error::OverlayError, model::SessionId};
    ///
    /// let error = OverlayError::SessionAlreadyActive {
    ///     active: SessionId::new(3),
    /// };
    /// assert!(error.remediation_hint().contains("Finish or cancel"));
    /// ```
    pub fn remediation_hint(&self) -> &str {
        match self {
            OverlayError::DecodeFailure { .. } => {
                "The captured bytes are not a supported image (PNG, JPEG or WebP). A placeholder \
                 is shown instead; capture the region again."
            }
            OverlayError::SessionAlreadyActive { .. } => {
                "Finish or cancel the selection that is already on screen before starting a new \
                 capture."
            }
            OverlayError::SurfaceUnavailable { .. } => {
                "The overlay window could not be shown. Check that screen recording permission is \
                 granted and that a display is connected."
            }
            OverlayError::CursorUnavailable { .. } => {
                "The pointer could not be hidden or restored. Move the mouse or switch \
                 applications to let the system restore it."
            }
            OverlayError::ClipboardUnavailable { .. } => {
                "The system clipboard is not reachable. Ensure a desktop session is running, or \
                 save the image to a file instead."
            }
            OverlayError::ImageNotFound { .. } => {
                "The image was already removed from the gallery. Refresh the gallery view."
            }
            OverlayError::PreviewUnavailable { .. } => {
                "The preview window could not be opened. Save the image and open it with an \
                 image viewer."
            }
            OverlayError::EncodingFailed { .. } => {
                "Image encoding failed. Try a smaller selection or a different format."
            }
            OverlayError::InvalidParameter { parameter, .. } => match parameter.as_str() {
                "background_alpha" => "Background alpha must be between 0.0 and 1.0.",
                "selection" => "The selection must have a non-zero width and height.",
                _ => "Check the parameter value against the API documentation.",
            },
            OverlayError::IoError(_) => {
                "An I/O error occurred. Check file permissions, disk space, and that the save \
                 directory exists."
            }
        }
    }
}
