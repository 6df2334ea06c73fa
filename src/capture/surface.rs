//! Overlay surface contract
//!
//! The windowing layer is reached only through [`SurfaceFactory`] and
//! [`OverlaySurface`]. Style and behaviour flags travel in a
//! [`SurfaceStyle`] handed to the factory at construction time; the surface
//! trait has no setter for them, so a live surface cannot be restyled.

use crate::{
    error::OverlayResult,
    model::{Point, Rect},
};

/// Window style mask requested for the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleMask {
    /// A panel that can take key focus without activating its process
    NonactivatingPanel,
}

/// Z-order level of the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowLevel {
    Normal,
    /// Floats above regular application windows
    Floating,
}

/// How the surface behaves across Spaces and full-screen apps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionBehavior {
    pub can_join_all_spaces:   bool,
    pub full_screen_auxiliary: bool,
}

/// Straight-alpha colour
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Immutable style for an overlay surface
///
/// Built once by [`SurfaceStyle::overlay`] and only ever passed to
/// [`SurfaceFactory::create`].
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceStyle {
    style_mask:           StyleMask,
    level:                WindowLevel,
    collection:           CollectionBehavior,
    works_when_modal:     bool,
    accepts_mouse_moved:  bool,
    ignores_mouse_events: bool,
    can_become_key:       bool,
    background:           Rgba,
}

impl SurfaceStyle {
    /// The full-screen capture overlay: non-activating, floating, visible on
    /// every Space, key-capable, tracking the mouse, tinted blue
    pub fn overlay(background_alpha: f32) -> Self {
        Self {
            style_mask:           StyleMask::NonactivatingPanel,
            level:                WindowLevel::Floating,
            collection:           CollectionBehavior {
                can_join_all_spaces:   true,
                full_screen_auxiliary: true,
            },
            works_when_modal:     true,
            accepts_mouse_moved:  true,
            ignores_mouse_events: false,
            can_become_key:       true,
            background:           Rgba {
                r: 0.0,
                g: 0.0,
                b: 1.0,
                a: background_alpha.clamp(0.0, 1.0),
            },
        }
    }

    pub fn style_mask(&self) -> StyleMask {
        self.style_mask
    }

    pub fn level(&self) -> WindowLevel {
        self.level
    }

    pub fn collection(&self) -> CollectionBehavior {
        self.collection
    }

    pub fn works_when_modal(&self) -> bool {
        self.works_when_modal
    }

    pub fn accepts_mouse_moved(&self) -> bool {
        self.accepts_mouse_moved
    }

    pub fn ignores_mouse_events(&self) -> bool {
        self.ignores_mouse_events
    }

    pub fn can_become_key(&self) -> bool {
        self.can_become_key
    }

    pub fn background(&self) -> Rgba {
        self.background
    }

    /// Returns true if the surface may take key focus without activating
    /// the owning process
    pub fn is_non_activating(&self) -> bool {
        self.style_mask == StyleMask::NonactivatingPanel && self.can_become_key
    }
}

/// A live overlay window owned by one capture session
pub trait OverlaySurface {
    /// The surface frame in global screen coordinates
    fn frame(&self) -> Rect;

    /// Makes the surface key and brings it to the front without activating
    /// the owning process
    fn order_front_as_key(&mut self) -> OverlayResult<()>;

    /// Removes the hosted selection content from the surface
    fn detach_content(&mut self);

    /// Closes the surface; it is not used again afterwards
    fn close(&mut self);
}

/// Creates overlay surfaces for capture sessions
pub trait SurfaceFactory {
    fn create(&self, frame: Rect, style: &SurfaceStyle) -> OverlayResult<Box<dyn OverlaySurface>>;
}

/// Kind of pointer input forwarded to the selection view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Moved,
    Pressed,
    Dragged,
    Released,
}

/// A pointer input translated into surface-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub kind:     PointerKind,
    pub position: Point,
}

/// Content hosted on the overlay that draws the selection and cursor
///
/// The session forwards pointer input here and never interprets drag
/// geometry itself.
pub trait SelectionView {
    fn pointer_event(&mut self, input: PointerInput, target: Rect);
}

/// Input delivered by the host event loop to a live session
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayEvent {
    /// Pointer input in global screen coordinates
    Pointer { kind: PointerKind, global: Point },
    /// The selection view finished with encoded image bytes
    Selection(Vec<u8>),
    /// The user aborted the selection
    Cancelled,
    /// The host closed the surface out from under the session
    SurfaceClosed,
}

impl OverlayEvent {
    pub fn moved(x: f64, y: f64) -> Self {
        Self::Pointer {
            kind:   PointerKind::Moved,
            global: Point::new(x, y),
        }
    }

    pub fn pressed(x: f64, y: f64) -> Self {
        Self::Pointer {
            kind:   PointerKind::Pressed,
            global: Point::new(x, y),
        }
    }

    pub fn dragged(x: f64, y: f64) -> Self {
        Self::Pointer {
            kind:   PointerKind::Dragged,
            global: Point::new(x, y),
        }
    }

    pub fn released(x: f64, y: f64) -> Self {
        Self::Pointer {
            kind:   PointerKind::Released,
            global: Point::new(x, y),
        }
    }
}
