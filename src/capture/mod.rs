//! Overlay capture sessions
//!
//! This module hosts the capture session controller:
//!
//! - `CaptureController`: entry point called by the global shortcut
//! - `CaptureSession`: the `Initializing -> Active -> {Completing,
//!   Cancelling} -> Terminated` state machine
//! - `SessionSlot`: the single process-wide session slot
//! - `CursorGuard`: scoped cursor suppression
//! - Surface traits (`SurfaceFactory`, `OverlaySurface`, `SelectionView`)
//!   that a windowing layer implements
//!
//! Platform bindings live behind features; `mock` provides in-memory
//! doubles for tests and headless hosts.

pub mod controller;
pub mod cursor;
pub mod mock;
pub mod selection;
pub mod session;
pub mod slot;
pub mod surface;

#[cfg(all(target_os = "macos", feature = "macos-backend"))]
pub mod macos;

pub use controller::{CaptureController, CaptureRequest};
pub use cursor::{CursorControl, CursorGuard};
#[cfg(all(target_os = "macos", feature = "macos-backend"))]
pub use macos::CoreGraphicsCursor;
pub use selection::SelectionTracker;
pub use session::{CaptureSession, CompletionCallback, OutcomeReceiver};
pub use slot::{SessionSlot, SlotLease};
pub use surface::{
    OverlayEvent, OverlaySurface, PointerInput, PointerKind, SelectionView, SurfaceFactory,
    SurfaceStyle,
};
