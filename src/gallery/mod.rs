//! Screenshot gallery
//!
//! Cards are rendered by [`CardPresenter`] from a [`GalleryItem`] and send
//! their clicks to an [`ImageActions`] implementation. [`GalleryActions`]
//! is the stock implementation, backed by a [`Gallery`], a
//! [`ClipboardSink`], an [`ImageStore`] and a [`PreviewOpener`].

pub mod actions;
pub mod card;
pub mod clipboard;
pub mod collection;
pub mod preview;
pub mod storage;

pub use actions::GalleryActions;
pub use card::{
    ActionOutcome, Card, CardPresenter, CardTarget, DragPayload, GalleryItem, ImageActions,
    Thumbnail,
};
#[cfg(feature = "system-clipboard")]
pub use clipboard::SystemClipboard;
pub use clipboard::{ClipboardSink, MemoryClipboard};
pub use collection::{Gallery, SharedGallery};
pub use preview::{PreviewOpener, PreviewWindow, RecordingPreviews};
pub use storage::{DirectoryStore, ImageStore};
