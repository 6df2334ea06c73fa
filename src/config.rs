//! Runtime options for capture sessions and gallery cards
//!
//! `OverlayConfig` is an in-memory options struct assembled with a builder.
//! Defaults reproduce the stock overlay: a faint blue tint over the frozen
//! screen, native bottom-left coordinates, and 200x150 gallery thumbnails.
//!
//! # Examples
//!
//! ```
//! use screenshot_overlay::{config::OverlayConfig, model::CoordinateSpace};
//!
//! let config = OverlayConfig::builder()
//!     .coordinate_space(CoordinateSpace::TopLeft)
//!     .background_alpha(0.3)
//!     .build();
//!
//! assert_eq!(config.coordinate_space, CoordinateSpace::TopLeft);
//! assert!(config.validate().is_ok());
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{
    error::{OverlayError, OverlayResult},
    model::{CoordinateSpace, Size},
};

/// Default alpha of the overlay tint
pub const DEFAULT_BACKGROUND_ALPHA: f32 = 0.2;

/// Default blur applied to a hovered gallery card
pub const DEFAULT_HOVER_BLUR: f32 = 5.0;

/// Default file name prefix for saved screenshots
pub const DEFAULT_FILE_PREFIX: &str = "screenshot";

/// Options shared by the capture controller and the gallery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Alpha of the overlay tint (0.0 = fully transparent)
    pub background_alpha: f32,
    /// Local coordinate convention reported to the selection view
    pub coordinate_space: CoordinateSpace,
    /// Size of a gallery card thumbnail
    pub thumbnail_size:   Size,
    /// Blur radius applied to a card while hovered
    pub hover_blur:       f32,
    /// Directory where saved images are written
    pub save_directory:   PathBuf,
    /// Prefix for saved image file names
    pub file_prefix:      String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            background_alpha: DEFAULT_BACKGROUND_ALPHA,
            coordinate_space: CoordinateSpace::default(),
            thumbnail_size:   Size::new(200.0, 150.0),
            hover_blur:       DEFAULT_HOVER_BLUR,
            save_directory:   std::env::temp_dir().join("screenshot-overlay"),
            file_prefix:      DEFAULT_FILE_PREFIX.to_string(),
        }
    }
}

impl OverlayConfig {
    /// Starts a builder seeded with the defaults
    pub fn builder() -> OverlayConfigBuilder {
        OverlayConfigBuilder::default()
    }

    /// Checks value ranges that the builder does not clamp
    pub fn validate(&self) -> OverlayResult<()> {
        if !(0.0..=1.0).contains(&self.background_alpha) {
            return Err(OverlayError::InvalidParameter {
                parameter: "background_alpha".to_string(),
                reason:    format!("value {} is outside 0.0..=1.0", self.background_alpha),
            });
        }
        let thumbnail = self.thumbnail_size;
        if !thumbnail.is_finite() || thumbnail.width <= 0.0 || thumbnail.height <= 0.0 {
            return Err(OverlayError::InvalidParameter {
                parameter: "thumbnail_size".to_string(),
                reason:    "thumbnail must have a positive width and height".to_string(),
            });
        }
        if !self.hover_blur.is_finite() || self.hover_blur < 0.0 {
            return Err(OverlayError::InvalidParameter {
                parameter: "hover_blur".to_string(),
                reason:    format!("radius {} must be a finite value >= 0.0", self.hover_blur),
            });
        }
        if self.file_prefix.is_empty() {
            return Err(OverlayError::InvalidParameter {
                parameter: "file_prefix".to_string(),
                reason:    "prefix must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for [`OverlayConfig`]
#[derive(Debug, Default)]
pub struct OverlayConfigBuilder {
    config: OverlayConfig,
}

impl OverlayConfigBuilder {
    pub fn background_alpha(mut self, alpha: f32) -> Self {
        self.config.background_alpha = alpha;
        self
    }

    pub fn coordinate_space(mut self, space: CoordinateSpace) -> Self {
        self.config.coordinate_space = space;
        self
    }

    pub fn thumbnail_size(mut self, width: f64, height: f64) -> Self {
        self.config.thumbnail_size = Size::new(width, height);
        self
    }

    pub fn hover_blur(mut self, radius: f32) -> Self {
        self.config.hover_blur = radius;
        self
    }

    pub fn save_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.save_directory = dir.into();
        self
    }

    pub fn file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.file_prefix = prefix.into();
        self
    }

    pub fn build(self) -> OverlayConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OverlayConfig::default();
        assert_eq!(config.background_alpha, DEFAULT_BACKGROUND_ALPHA);
        assert_eq!(config.coordinate_space, CoordinateSpace::BottomLeft);
        assert_eq!(config.thumbnail_size, Size::new(200.0, 150.0));
        assert_eq!(config.file_prefix, "screenshot");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let config = OverlayConfig::builder()
            .hover_blur(2.0)
            .save_directory("/tmp/shots")
            .file_prefix("snap")
            .thumbnail_size(120.0, 90.0)
            .build();

        assert_eq!(config.hover_blur, 2.0);
        assert_eq!(config.save_directory, PathBuf::from("/tmp/shots"));
        assert_eq!(config.file_prefix, "snap");
        assert_eq!(config.thumbnail_size, Size::new(120.0, 90.0));
    }

    #[test]
    fn test_validate_rejects_alpha_out_of_range() {
        let config = OverlayConfig::builder().background_alpha(1.5).build();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, OverlayError::InvalidParameter { ref parameter, .. } if parameter == "background_alpha"));
    }

    #[test]
    fn test_validate_rejects_non_finite_thumbnail() {
        let config = OverlayConfig::builder().thumbnail_size(f64::NAN, 90.0).build();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, OverlayError::InvalidParameter { ref parameter, .. } if parameter == "thumbnail_size"));

        let config = OverlayConfig::builder().thumbnail_size(120.0, f64::INFINITY).build();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_hover_blur_range() {
        for radius in [-1.0, f32::NAN, f32::INFINITY] {
            let config = OverlayConfig::builder().hover_blur(radius).build();
            let err = config.validate().unwrap_err();
            assert!(matches!(err, OverlayError::InvalidParameter { ref parameter, .. } if parameter == "hover_blur"));
        }
        assert!(OverlayConfig::builder().hover_blur(0.0).build().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_nan_alpha() {
        let config = OverlayConfig::builder().background_alpha(f32::NAN).build();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_prefix() {
        let config = OverlayConfig::builder().file_prefix("").build();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_partial_uses_defaults() {
        let json = r#"{"coordinate_space":"top_left"}"#;
        let config: OverlayConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.coordinate_space, CoordinateSpace::TopLeft);
        assert_eq!(config.background_alpha, DEFAULT_BACKGROUND_ALPHA);
    }
}
