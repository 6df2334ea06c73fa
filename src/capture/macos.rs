//! CoreGraphics cursor control
//!
//! Hides and shows the system pointer on the main display. CoreGraphics keeps
//! its own hide counter, so every hide must be matched by exactly one show;
//! [`CursorGuard`](super::CursorGuard) provides that pairing.

use core_graphics::display::CGDisplay;

use super::cursor::CursorControl;
use crate::error::{OverlayError, OverlayResult};

/// Cursor control backed by `CGDisplayHideCursor` / `CGDisplayShowCursor`
#[derive(Debug, Clone, Copy)]
pub struct CoreGraphicsCursor {
    display_id: u32,
}

impl CoreGraphicsCursor {
    /// Controls the cursor on the main display
    pub fn main_display() -> Self {
        Self {
            display_id: CGDisplay::main().id,
        }
    }

    fn display(&self) -> CGDisplay {
        CGDisplay::new(self.display_id)
    }
}

impl Default for CoreGraphicsCursor {
    fn default() -> Self {
        Self::main_display()
    }
}

impl CursorControl for CoreGraphicsCursor {
    fn hide(&self) -> OverlayResult<()> {
        self.display()
            .hide_cursor()
            .map_err(|code| OverlayError::CursorUnavailable {
                reason: format!("CGDisplayHideCursor failed with CGError {}", code),
            })
    }

    fn show(&self) -> OverlayResult<()> {
        self.display()
            .show_cursor()
            .map_err(|code| OverlayError::CursorUnavailable {
                reason: format!("CGDisplayShowCursor failed with CGError {}", code),
            })
    }
}
