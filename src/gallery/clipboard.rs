//! Clipboard sinks for the Copy action
//!
//! A copy replaces whatever the clipboard held before with exactly one
//! image. [`MemoryClipboard`] keeps the last image in memory; with the
//! `system-clipboard` feature, [`SystemClipboard`] writes RGBA pixels to the
//! OS clipboard through `arboard`.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::{error::OverlayResult, model::CapturedImage};

/// Write-only image clipboard
pub trait ClipboardSink {
    fn write_image(&self, image: &CapturedImage) -> OverlayResult<()>;
}

#[derive(Debug, Default)]
struct ClipboardState {
    current: Option<CapturedImage>,
    writes:  usize,
}

/// In-process clipboard; clones share contents
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    state: Arc<Mutex<ClipboardState>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The image currently on the clipboard
    pub fn current(&self) -> Option<CapturedImage> {
        self.state.lock().current.clone()
    }

    /// Encoded bytes currently on the clipboard
    pub fn bytes(&self) -> Option<Vec<u8>> {
        self.state.lock().current.as_ref().map(CapturedImage::to_vec)
    }

    pub fn write_count(&self) -> usize {
        self.state.lock().writes
    }
}

impl ClipboardSink for MemoryClipboard {
    fn write_image(&self, image: &CapturedImage) -> OverlayResult<()> {
        let mut state = self.state.lock();
        state.current = Some(image.clone());
        state.writes += 1;
        debug!(image = %image.id(), "image placed on memory clipboard");
        Ok(())
    }
}

#[cfg(feature = "system-clipboard")]
pub use system::SystemClipboard;

#[cfg(feature = "system-clipboard")]
mod system {
    use std::borrow::Cow;

    use parking_lot::Mutex;
    use tracing::info;

    use super::ClipboardSink;
    use crate::{
        error::{OverlayError, OverlayResult},
        model::CapturedImage,
        util::imaging::decode_image,
    };

    /// OS clipboard via `arboard`, opened on first use
    #[derive(Default)]
    pub struct SystemClipboard {
        inner: Mutex<Option<arboard::Clipboard>>,
    }

    impl SystemClipboard {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl std::fmt::Debug for SystemClipboard {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("SystemClipboard").finish_non_exhaustive()
        }
    }

    fn unavailable(e: arboard::Error) -> OverlayError {
        OverlayError::ClipboardUnavailable {
            reason: e.to_string(),
        }
    }

    impl ClipboardSink for SystemClipboard {
        fn write_image(&self, image: &CapturedImage) -> OverlayResult<()> {
            let rgba = decode_image(image.bytes())?.to_rgba8();
            let (width, height) = rgba.dimensions();
            let data = arboard::ImageData {
                width:  width as usize,
                height: height as usize,
                bytes:  Cow::Owned(rgba.into_raw()),
            };

            let mut inner = self.inner.lock();
            if inner.is_none() {
                *inner = Some(arboard::Clipboard::new().map_err(unavailable)?);
            }
            if let Some(clipboard) = inner.as_mut() {
                clipboard.set_image(data).map_err(unavailable)?;
            }
            info!(image = %image.id(), width, height, "image copied to system clipboard");
            Ok(())
        }
    }
}
