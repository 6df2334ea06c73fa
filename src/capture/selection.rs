//! Drag tracking for selection views
//!
//! [`SelectionTracker`] is a minimal [`SelectionView`]: it remembers the
//! hover position for the cursor indicator and turns a press/drag/release
//! sequence into a selection rectangle. Rendering stays with the host.

use super::surface::{PointerInput, PointerKind, SelectionView};
use crate::model::{Point, Rect};

#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    hover:    Option<Point>,
    anchor:   Option<Point>,
    current:  Option<Point>,
    finished: Option<Rect>,
    target:   Option<Rect>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last pointer position, for drawing the cursor indicator
    pub fn hover(&self) -> Option<Point> {
        self.hover
    }

    /// Rectangle of the drag in progress, if any
    pub fn current_rect(&self) -> Option<Rect> {
        match (self.anchor, self.current) {
            (Some(anchor), Some(current)) => Some(Rect::from_corners(anchor, current)),
            _ => None,
        }
    }

    /// Rectangle of the last completed drag with a non-zero area
    pub fn finished_rect(&self) -> Option<Rect> {
        self.finished
    }

    /// The target rectangle most recently reported by the session
    pub fn target(&self) -> Option<Rect> {
        self.target
    }

    pub fn reset(&mut self) {
        self.anchor = None;
        self.current = None;
        self.finished = None;
    }
}

impl SelectionView for SelectionTracker {
    fn pointer_event(&mut self, input: PointerInput, target: Rect) {
        self.target = Some(target);
        self.hover = Some(input.position);
        match input.kind {
            PointerKind::Moved => {}
            PointerKind::Pressed => {
                self.anchor = Some(input.position);
                self.current = Some(input.position);
                self.finished = None;
            }
            PointerKind::Dragged => {
                if self.anchor.is_some() {
                    self.current = Some(input.position);
                }
            }
            PointerKind::Released => {
                if self.anchor.is_some() {
                    self.current = Some(input.position);
                    self.finished = self.current_rect().filter(|rect| !rect.is_empty());
                }
                self.anchor = None;
                self.current = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(kind: PointerKind, x: f64, y: f64) -> PointerInput {
        PointerInput {
            kind,
            position: Point::new(x, y),
        }
    }

    #[test]
    fn test_drag_produces_rect() {
        let target = Rect::new(0.0, 0.0, 1440.0, 900.0);
        let mut tracker = SelectionTracker::new();

        tracker.pointer_event(input(PointerKind::Pressed, 0.0, 0.0), target);
        tracker.pointer_event(input(PointerKind::Dragged, 50.0, 60.0), target);
        assert_eq!(tracker.current_rect(), Some(Rect::new(0.0, 0.0, 50.0, 60.0)));

        tracker.pointer_event(input(PointerKind::Released, 100.0, 100.0), target);
        assert_eq!(tracker.finished_rect(), Some(Rect::new(0.0, 0.0, 100.0, 100.0)));
        assert_eq!(tracker.current_rect(), None);
    }

    #[test]
    fn test_click_without_drag_has_no_selection() {
        let target = Rect::new(0.0, 0.0, 100.0, 100.0);
        let mut tracker = SelectionTracker::new();

        tracker.pointer_event(input(PointerKind::Pressed, 10.0, 10.0), target);
        tracker.pointer_event(input(PointerKind::Released, 10.0, 10.0), target);
        assert_eq!(tracker.finished_rect(), None);
    }

    #[test]
    fn test_drag_without_press_is_ignored() {
        let target = Rect::new(0.0, 0.0, 100.0, 100.0);
        let mut tracker = SelectionTracker::new();

        tracker.pointer_event(input(PointerKind::Dragged, 30.0, 30.0), target);
        assert_eq!(tracker.current_rect(), None);
        assert_eq!(tracker.hover(), Some(Point::new(30.0, 30.0)));
    }
}
