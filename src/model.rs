//! Data models shared by the capture session and the gallery
//!
//! This module defines:
//! - Screen geometry (`Point`, `Size`, `Rect`) and coordinate conversion
//! - Session identity and lifecycle state
//! - Captured images and the outcome a session hands back to its creator

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A point in screen or surface coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Width and height of a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width:  f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_finite(&self) -> bool {
        self.width.is_finite() && self.height.is_finite()
    }
}

/// Which corner of a surface is the local origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateSpace {
    /// Platform-native: origin at the bottom-left, y grows upward
    #[default]
    BottomLeft,
    /// View-layer convention: origin at the top-left, y grows downward
    TopLeft,
}

/// An axis-aligned rectangle with its origin at the bottom-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size:   Size,
}

impl Rect {
    /// Creates a rectangle from origin and size components
    ///
    /// # Examples
    ///
    /// ```
    /// use screenshot_overlay::model::{Point, Rect};
    ///
    /// let rect = Rect::new(0.0, 0.0, 1440.0, 900.0);
    /// assert!(rect.contains(Point::new(100.0, 100.0)));
    /// ```
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size:   Size::new(width, height),
        }
    }

    /// Builds the smallest rectangle spanning two corner points
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self::new(x, y, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    pub fn min_x(&self) -> f64 {
        self.origin.x
    }

    pub fn min_y(&self) -> f64 {
        self.origin.y
    }

    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.width
    }

    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height
    }

    /// Returns true if the rectangle has no area
    pub fn is_empty(&self) -> bool {
        self.size.width <= 0.0 || self.size.height <= 0.0
    }

    /// Returns false if any coordinate is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }

    /// Returns true if `point` lies inside the rectangle (edges inclusive)
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x()
            && point.x <= self.max_x()
            && point.y >= self.min_y()
            && point.y <= self.max_y()
    }

    /// Translates a global screen point into this rectangle's local space
    ///
    /// Points outside the rectangle are translated, not clamped, so callers
    /// can still see the pointer leaving the surface.
    ///
    /// # Examples
    ///
    /// ```
    /// use screenshot_overlay::model::{CoordinateSpace, Point, Rect};
    ///
    /// let frame = Rect::new(100.0, 50.0, 800.0, 600.0);
    /// let global = Point::new(150.0, 70.0);
    ///
    /// assert_eq!(frame.to_local(global, CoordinateSpace::BottomLeft), Point::new(50.0, 20.0));
    /// assert_eq!(frame.to_local(global, CoordinateSpace::TopLeft), Point::new(50.0, 580.0));
    /// ```
    pub fn to_local(&self, global: Point, space: CoordinateSpace) -> Point {
        let x = global.x - self.origin.x;
        let y = global.y - self.origin.y;
        match space {
            CoordinateSpace::BottomLeft => Point::new(x, y),
            CoordinateSpace::TopLeft => Point::new(x, self.size.height - y),
        }
    }
}

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_IMAGE_ID: AtomicU64 = AtomicU64::new(1);

/// Identifier of one capture session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(u64);

impl SessionId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Allocates the next process-unique session id
    pub fn next() -> Self {
        Self(NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// Identifier of one captured image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageId(u64);

impl ImageId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Allocates the next process-unique image id
    pub fn next() -> Self {
        Self(NEXT_IMAGE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "image-{}", self.0)
    }
}

/// Lifecycle state of a capture session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// Surface is being created and the cursor hidden
    Initializing,
    /// Surface is visible and forwarding input
    Active,
    /// A non-empty selection is being handed back
    Completing,
    /// The session is being abandoned without an image
    Cancelling,
    /// Surface is closed; nothing more will happen
    Terminated,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Initializing => "initializing",
            SessionState::Active => "active",
            SessionState::Completing => "completing",
            SessionState::Cancelling => "cancelling",
            SessionState::Terminated => "terminated",
        }
    }

    /// Returns true once the session has reached a terminal path
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            SessionState::Completing | SessionState::Cancelling | SessionState::Terminated
        )
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One finished screenshot as an opaque encoded byte buffer
///
/// The bytes are frozen when the image is created; clones share the same
/// storage, so handing an image to the gallery, the clipboard and a preview
/// never copies or mutates the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    id:          ImageId,
    bytes:       Arc<[u8]>,
    captured_at: DateTime<Utc>,
}

impl CapturedImage {
    /// Wraps encoded image bytes with a fresh id and the current time
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            id:          ImageId::next(),
            bytes:       Arc::from(bytes.into()),
            captured_at: Utc::now(),
        }
    }

    pub fn id(&self) -> ImageId {
        self.id
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The payload's shared storage; cloning the `Arc` never copies bytes
    pub fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    /// Copies the payload out, leaving shared storage untouched
    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }
}

/// Why a session ended without an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelReason {
    /// The user pressed Escape or equivalent
    UserAborted,
    /// The selection collaborator finished with zero bytes
    EmptySelection,
    /// The host closed the surface underneath the session
    SurfaceClosed,
    /// The session was dropped while still live
    Dropped,
}

/// The single result a capture session reports to its creator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// The user selected a region; the image is now owned by the receiver
    Completed(CapturedImage),
    /// The session ended without producing an image
    Cancelled(CancelReason),
}

impl CaptureOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, CaptureOutcome::Completed(_))
    }

    pub fn image(&self) -> Option<&CapturedImage> {
        match self {
            CaptureOutcome::Completed(image) => Some(image),
            CaptureOutcome::Cancelled(_) => None,
        }
    }

    /// Collapses the outcome into the optional payload a completion
    /// callback receives
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            CaptureOutcome::Completed(image) => Some(image.to_vec()),
            CaptureOutcome::Cancelled(_) => None,
        }
    }
}
