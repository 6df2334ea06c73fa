//! Integration tests for gallery cards and their actions

mod common;

use std::{cell::RefCell, path::PathBuf};

use screenshot_overlay::{
    config::OverlayConfig,
    error::{OverlayError, OverlayResult},
    gallery::{
        ActionOutcome, CardPresenter, CardTarget, DirectoryStore, Gallery, GalleryActions,
        GalleryItem, ImageActions, MemoryClipboard, PreviewWindow, RecordingPreviews,
    },
    model::{CapturedImage, ImageId},
};

use crate::common::{Harness, png_image};

/// Records every outward request without performing it
#[derive(Default)]
struct CountingActions {
    calls: RefCell<Vec<(&'static str, ImageId)>>,
}

impl CountingActions {
    fn calls(&self) -> Vec<(&'static str, ImageId)> {
        self.calls.borrow().clone()
    }
}

impl ImageActions for CountingActions {
    fn delete(&self, image: &CapturedImage) -> OverlayResult<()> {
        self.calls.borrow_mut().push(("delete", image.id()));
        Ok(())
    }

    fn copy(&self, image: &CapturedImage) -> OverlayResult<()> {
        self.calls.borrow_mut().push(("copy", image.id()));
        Ok(())
    }

    fn save(&self, image: &CapturedImage) -> OverlayResult<PathBuf> {
        self.calls.borrow_mut().push(("save", image.id()));
        Ok(PathBuf::from("/dev/null"))
    }

    fn open(&self, image: &CapturedImage) -> OverlayResult<PreviewWindow> {
        self.calls.borrow_mut().push(("open", image.id()));
        Ok(PreviewWindow {
            image_id: image.id(),
            width:    1,
            height:   1,
        })
    }
}

fn stock_actions(
    dir: &std::path::Path,
) -> (
    GalleryActions<MemoryClipboard, DirectoryStore, RecordingPreviews>,
    MemoryClipboard,
    RecordingPreviews,
) {
    let clipboard = MemoryClipboard::new();
    let previews = RecordingPreviews::new();
    let actions = GalleryActions::new(
        Gallery::shared(),
        clipboard.clone(),
        DirectoryStore::new(dir, "screenshot"),
        previews.clone(),
    );
    (actions, clipboard, previews)
}

#[test]
fn test_each_activation_sends_one_signal() {
    let presenter = CardPresenter::default();
    let actions = CountingActions::default();
    let item = GalleryItem::new(CapturedImage::new(b"PNG...".to_vec()), true);
    let id = item.image.id();

    presenter.activate(&item, CardTarget::Delete, &actions).unwrap();
    presenter.activate(&item, CardTarget::Copy, &actions).unwrap();
    presenter.activate(&item, CardTarget::Save, &actions).unwrap();
    presenter.activate(&item, CardTarget::Body, &actions).unwrap();

    assert_eq!(
        actions.calls(),
        vec![("delete", id), ("copy", id), ("save", id), ("open", id)]
    );
}

#[test]
fn test_delete_does_not_mutate_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let (actions, _clipboard, _previews) = stock_actions(dir.path());
    let image = png_image(16, 16);
    let before = image.to_vec();
    actions.gallery().lock().insert(image.clone());

    let presenter = CardPresenter::default();
    let item = GalleryItem::new(image.clone(), true);
    let outcome = presenter.activate(&item, CardTarget::Delete, &actions).unwrap();

    assert_eq!(outcome, ActionOutcome::Deleted(image.id()));
    assert_eq!(image.bytes(), before.as_slice());
    assert!(actions.gallery().lock().is_empty());
}

#[test]
fn test_delete_twice_reports_missing_image() {
    let dir = tempfile::tempdir().unwrap();
    let (actions, _clipboard, _previews) = stock_actions(dir.path());
    let image = png_image(4, 4);
    actions.gallery().lock().insert(image.clone());

    let presenter = CardPresenter::default();
    let item = GalleryItem::new(image, false);
    presenter.activate(&item, CardTarget::Delete, &actions).unwrap();
    let err = presenter.activate(&item, CardTarget::Delete, &actions).unwrap_err();

    assert!(matches!(err, OverlayError::ImageNotFound { .. }));
}

#[test]
fn test_copy_two_images_keeps_second() {
    let dir = tempfile::tempdir().unwrap();
    let (actions, clipboard, _previews) = stock_actions(dir.path());
    let presenter = CardPresenter::default();
    let first = GalleryItem::new(png_image(8, 8), true);
    let second = GalleryItem::new(png_image(12, 6), true);

    presenter.activate(&first, CardTarget::Copy, &actions).unwrap();
    presenter.activate(&second, CardTarget::Copy, &actions).unwrap();

    assert_eq!(clipboard.bytes(), Some(second.image.to_vec()));
    assert_eq!(clipboard.write_count(), 2);
}

#[test]
fn test_hover_does_not_gate_actions() {
    let dir = tempfile::tempdir().unwrap();
    let (actions, clipboard, _previews) = stock_actions(dir.path());
    let presenter = CardPresenter::default();
    let item = GalleryItem::new(png_image(8, 8), false);

    let outcome = presenter.activate(&item, CardTarget::Copy, &actions).unwrap();

    assert_eq!(outcome, ActionOutcome::Copied(item.image.id()));
    assert_eq!(clipboard.current().map(|image| image.id()), Some(item.image.id()));
}

#[test]
fn test_save_writes_to_store() {
    let dir = tempfile::tempdir().unwrap();
    let (actions, _clipboard, _previews) = stock_actions(dir.path());
    let presenter = CardPresenter::default();
    let item = GalleryItem::new(png_image(10, 10), true);

    let outcome = presenter.activate(&item, CardTarget::Save, &actions).unwrap();

    match outcome {
        ActionOutcome::Saved(path) => {
            assert!(path.starts_with(dir.path()));
            assert_eq!(std::fs::read(path).unwrap(), item.image.to_vec());
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[test]
fn test_body_opens_preview() {
    let dir = tempfile::tempdir().unwrap();
    let (actions, _clipboard, previews) = stock_actions(dir.path());
    let presenter = CardPresenter::default();
    let item = GalleryItem::new(png_image(30, 20), false);

    let outcome = presenter.activate(&item, CardTarget::Body, &actions).unwrap();

    let expected = PreviewWindow {
        image_id: item.image.id(),
        width:    30,
        height:   20,
    };
    assert_eq!(outcome, ActionOutcome::PreviewOpened(expected.clone()));
    assert_eq!(previews.opened(), vec![expected]);
}

#[test]
fn test_drag_out_leaves_gallery_image_intact() {
    let dir = tempfile::tempdir().unwrap();
    let (actions, _clipboard, _previews) = stock_actions(dir.path());
    let image = png_image(24, 16);
    let before = image.to_vec();
    actions.gallery().lock().insert(image.clone());

    let presenter = CardPresenter::default();
    let item = actions.gallery().lock().items(None).remove(0);
    let payload = presenter.drag(&item).unwrap();

    assert_eq!(payload.image_id, image.id());
    assert_eq!(payload.mime_type(), "image/png");
    assert_eq!(payload.bytes(), before.as_slice());

    let gallery = actions.gallery().lock();
    assert_eq!(gallery.len(), 1);
    assert_eq!(gallery.get(image.id()).map(|stored| stored.to_vec()), Some(before));
}

#[test]
fn test_undecodable_image_renders_and_reports() {
    let dir = tempfile::tempdir().unwrap();
    let (actions, _clipboard, _previews) = stock_actions(dir.path());
    let presenter = CardPresenter::default();
    let item = GalleryItem::new(CapturedImage::new(b"PNG...".to_vec()), true);

    let card = presenter.render(&item);
    assert!(card.decode_failure().is_some());
    assert!(card.controls_visible);

    let err = presenter.activate(&item, CardTarget::Body, &actions).unwrap_err();
    assert!(matches!(err, OverlayError::PreviewUnavailable { .. }));
}

#[test]
fn test_capture_flows_into_gallery() {
    let harness = Harness::new();
    let (request, _view) = harness.request();
    let (mut session, mut outcome) = harness.controller.trigger(request).unwrap();
    let png = png_image(64, 32);
    session.complete(png.to_vec()).unwrap();

    let mut gallery = Gallery::new();
    let id = gallery.accept(outcome.try_take().unwrap()).unwrap();

    let presenter = CardPresenter::new(&OverlayConfig::default());
    let cards: Vec<_> = gallery
        .items(Some(id))
        .iter()
        .map(|item| presenter.render(item))
        .collect();

    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].image_id, id);
    assert!(cards[0].controls_visible);
    assert!(cards[0].decode_failure().is_none());
}
