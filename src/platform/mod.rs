//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame scheduling (requestAnimationFrame on web, manual elsewhere)
//! - Layout measurement (bounding boxes on web)

pub mod frames;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use frames::{FrameHandle, FrameLoop, ManualTicks, TickSource};
