//! Durable storage for the Save action
//!
//! [`DirectoryStore`] writes each image to its own file named
//! `{prefix}-{timestamp}-{id}.{ext}`. The timestamp is the capture time in
//! RFC 3339 with filesystem-hostile characters replaced, and the extension
//! is sniffed from the encoded bytes.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::{
    config::OverlayConfig,
    error::{OverlayError, OverlayResult},
    model::CapturedImage,
    util::imaging::extension_for,
};

/// Persists captured images
pub trait ImageStore {
    fn save(&self, image: &CapturedImage) -> OverlayResult<PathBuf>;
}

/// Saves images as individual files in one directory
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    dir:    PathBuf,
    prefix: String,
}

impl DirectoryStore {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir:    dir.into(),
            prefix: prefix.into(),
        }
    }

    /// Uses the save directory and file prefix from `config`
    pub fn from_config(config: &OverlayConfig) -> Self {
        Self::new(config.save_directory.clone(), config.file_prefix.clone())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name an image will be saved under
    pub fn file_name(&self, image: &CapturedImage) -> String {
        let timestamp: String = image
            .captured_at()
            .to_rfc3339()
            .chars()
            .map(|c| match c {
                ':' => '-',
                '+' | '.' => '_',
                _ => c,
            })
            .collect();

        format!(
            "{}-{}-{}.{}",
            self.prefix,
            timestamp,
            image.id().get(),
            extension_for(image.bytes())
        )
    }
}

impl ImageStore for DirectoryStore {
    fn save(&self, image: &CapturedImage) -> OverlayResult<PathBuf> {
        if image.is_empty() {
            return Err(OverlayError::InvalidParameter {
                parameter: "image".to_string(),
                reason:    "refusing to save an empty image".to_string(),
            });
        }

        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(self.file_name(image));
        fs::write(&path, image.bytes())?;

        info!(image = %image.id(), path = %path.display(), bytes = image.len(), "image saved");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use image::{DynamicImage, RgbaImage};

    use super::*;
    use crate::util::imaging::encode_png;

    #[test]
    fn test_save_writes_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirectoryStore::new(dir.path(), "shot");
        let png = encode_png(&DynamicImage::ImageRgba8(RgbaImage::new(4, 4))).unwrap();
        let image = CapturedImage::new(png.clone());

        let path = store.save(&image).unwrap();

        assert!(path.starts_with(dir.path()));
        assert_eq!(fs::read(&path).unwrap(), png);
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("shot-"));
        assert!(name.ends_with(".png"));
        assert!(!name.contains(':'));
    }

    #[test]
    fn test_save_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = DirectoryStore::new(&nested, "shot");

        let path = store.save(&CapturedImage::new(b"raw".to_vec())).unwrap();
        assert!(nested.exists());
        assert!(path.to_string_lossy().ends_with(".bin"));
    }

    #[test]
    fn test_distinct_images_get_distinct_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirectoryStore::new(dir.path(), "shot");

        let a = store.save(&CapturedImage::new(b"a".to_vec())).unwrap();
        let b = store.save(&CapturedImage::new(b"b".to_vec())).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_save_empty_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirectoryStore::new(dir.path(), "shot");
        assert!(store.save(&CapturedImage::new(Vec::new())).is_err());
    }

    #[test]
    fn test_from_config() {
        let config = OverlayConfig::builder()
            .save_directory("/tmp/somewhere")
            .file_prefix("capture")
            .build();
        let store = DirectoryStore::from_config(&config);

        assert_eq!(store.dir(), Path::new("/tmp/somewhere"));
        assert!(store.file_name(&CapturedImage::new(b"x".to_vec())).starts_with("capture-"));
    }
}
