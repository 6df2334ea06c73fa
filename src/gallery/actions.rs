//! Default wiring of card actions to their collaborators

use std::path::PathBuf;

use tracing::info;

use super::{
    card::ImageActions,
    clipboard::ClipboardSink,
    collection::SharedGallery,
    preview::{PreviewOpener, PreviewWindow},
    storage::ImageStore,
};
use crate::{error::OverlayResult, model::CapturedImage};

/// Routes delete to the gallery, copy to a clipboard, save to a store and
/// open to a preview opener
pub struct GalleryActions<C, S, P> {
    gallery:   SharedGallery,
    clipboard: C,
    store:     S,
    previews:  P,
}

impl<C, S, P> GalleryActions<C, S, P>
where
    C: ClipboardSink,
    S: ImageStore,
    P: PreviewOpener,
{
    pub fn new(gallery: SharedGallery, clipboard: C, store: S, previews: P) -> Self {
        Self {
            gallery,
            clipboard,
            store,
            previews,
        }
    }

    pub fn gallery(&self) -> &SharedGallery {
        &self.gallery
    }
}

impl<C, S, P> ImageActions for GalleryActions<C, S, P>
where
    C: ClipboardSink,
    S: ImageStore,
    P: PreviewOpener,
{
    fn delete(&self, image: &CapturedImage) -> OverlayResult<()> {
        let removed = self.gallery.lock().remove(image.id())?;
        info!(image = %removed.id(), "image deleted from gallery");
        Ok(())
    }

    fn copy(&self, image: &CapturedImage) -> OverlayResult<()> {
        self.clipboard.write_image(image)
    }

    fn save(&self, image: &CapturedImage) -> OverlayResult<PathBuf> {
        self.store.save(image)
    }

    fn open(&self, image: &CapturedImage) -> OverlayResult<PreviewWindow> {
        self.previews.open(image)
    }
}
