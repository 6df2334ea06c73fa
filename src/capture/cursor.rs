//! Scoped pointer-cursor suppression
//!
//! The system cursor is process-wide state. A [`CursorGuard`] hides it on
//! acquire and shows it exactly once afterwards: either through
//! [`CursorGuard::release`] or, if the guard is dropped on an abnormal path,
//! from `Drop`.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::OverlayResult;

/// Platform hook for hiding and showing the pointer
pub trait CursorControl {
    fn hide(&self) -> OverlayResult<()>;
    fn show(&self) -> OverlayResult<()>;
}

/// Keeps the cursor hidden for as long as it lives
pub struct CursorGuard {
    cursor:   Arc<dyn CursorControl>,
    released: bool,
}

impl CursorGuard {
    /// Hides the cursor and returns the guard that will restore it
    pub fn acquire(cursor: Arc<dyn CursorControl>) -> OverlayResult<Self> {
        cursor.hide()?;
        debug!("cursor hidden");
        Ok(Self {
            cursor,
            released: false,
        })
    }

    /// Shows the cursor again, consuming the guard
    pub fn release(mut self) -> OverlayResult<()> {
        self.released = true;
        let result = self.cursor.show();
        debug!("cursor restored");
        result
    }
}

impl std::fmt::Debug for CursorGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CursorGuard").field("released", &self.released).finish()
    }
}

impl Drop for CursorGuard {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(e) = self.cursor.show() {
            warn!("Failed to restore cursor on drop: {}", e);
        }
    }
}
