//! A headless scroll-captured progression controller.
//!
//! For the event-driven controller (lifecycle, render coalescing, image-load fan-in), see the
//! `pinscroll-adapter` crate.
//!
//! This crate holds the pieces that decide *whether* the page's vertical scroll is captured and
//! *how far* a horizontal sequence has advanced:
//! - region geometry (content width, maximum horizontal offset, pin zone)
//! - an explicit progress state machine with boundary release
//! - exclusive ownership of the page's native scroll behind [`ScrollBackend`]
//!
//! It is UI-agnostic. A DOM/GUI/TUI layer is expected to provide:
//! - the capture region's position and height in page coordinates
//! - item widths and the viewport size
//! - native scroll positions and wheel deltas
//! - a [`ScrollBackend`] that can freeze and reposition the page
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod geometry;
mod lock;
mod mapper;
mod options;
mod state;
mod types;


pub use error::ConfigError;
pub use geometry::{Geometry, content_width};
pub use lock::{MemoryBackend, ScrollBackend, ScrollLock};
pub use mapper::{LockAction, ProgressMapper, Transition};
pub use options::{DEFAULT_BOUNDARY_EPSILON, DEFAULT_SENSITIVITY, ProgressOptions};
pub use state::ProgressSnapshot;
pub use types::{Boundary, ContainerRect, Phase, Viewport, WheelDisposition, Zone};
