//! Adapter utilities for the `pinscroll` crate.
//!
//! The `pinscroll` crate holds the geometry, the progress state machine and the scroll lock.
//! This crate wires them into an event-driven controller that adapters feed from their UI:
//!
//! - [`Controller`]: lifecycle, input handling and lock cleanup for one capture region
//! - [`RenderSync`]: horizontal offsets coalesced to one update per animation frame
//! - [`ImageLoadTracker`]: bounded fan-in of item image loads gating geometry
//! - [`Tween`]/[`Easing`]: eased offsets for discrete updates
//!
//! This crate is intentionally framework-agnostic (no DOM/web-sys bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod images;
mod options;
mod render;
mod tween;

#[cfg(test)]
mod tests;

pub use controller::Controller;
pub use images::{ImageLoadTracker, LoadState};
pub use options::{ControllerOptions, DEFAULT_SMOOTH_DURATION_MS, OnChangeCallback};
pub use render::{RenderFrame, RenderSync};
pub use tween::{Easing, Tween};
