//! screenshot-overlay: region capture sessions and a screenshot gallery
//!
//! This library provides the logic behind a screenshot utility: a capture
//! session controller that owns a transparent, non-activating overlay
//! surface while the user selects a region, and a gallery card presenter
//! that turns clicks into copy, save, delete and preview requests.
//!
//! Windowing, cursor and clipboard access go through traits so hosts can
//! plug in platform bindings.

pub mod capture;
pub mod config;
pub mod error;
pub mod gallery;
pub mod model;
pub mod util;
