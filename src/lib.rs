//! Bunny Card - A flip-open greeting card with a catch-the-bunny mini-game
//!
//! Core modules:
//! - `sim`: Card, round and actor state machines (pure, no DOM)
//! - `platform`: Frame scheduling and layout measurement abstraction
//! - `content`: Configurable images and copy
//! - `ui`: Presentation state derived from the simulation

pub mod content;
pub mod platform;
pub mod sim;
pub mod ui;

pub use content::CardContent;

use glam::Vec2;

/// Card configuration constants
pub mod consts {
    /// Actor footprint (button box incl. bunny)
    pub const ACTOR_WIDTH: f32 = 80.0;
    pub const ACTOR_HEIGHT: f32 = 100.0;

    /// Running boundary margins
    pub const SIDE_MARGIN: f32 = 10.0;
    pub const BOTTOM_MARGIN: f32 = 10.0;
    /// Extra space for the label above the bunny's head
    pub const TOP_MARGIN: f32 = 50.0;

    /// Initial run velocity: x in [-RUN_X_SPREAD/2, RUN_X_SPREAD/2)
    pub const RUN_X_SPREAD: f32 = 8.0;
    /// Initial run velocity: y = -(RUN_Y_BASE + U[0, RUN_Y_JITTER))
    pub const RUN_Y_BASE: f32 = 3.0;
    pub const RUN_Y_JITTER: f32 = 5.0;

    /// Random kick applied to each velocity component on a wall hit (total span)
    pub const WALL_JITTER: f32 = 2.0;
    /// Per-component speed cap while running
    pub const MAX_RUN_SPEED: f32 = 7.0;
    /// Straight-line speed of a losing actor
    pub const EXIT_SPEED: f32 = 10.0;

    /// Fraction of the remaining distance covered per centering tick
    pub const CENTERING_FACTOR: f32 = 0.1;
    /// Snap distance (per axis) that ends centering
    pub const CENTERING_SNAP: f32 = 1.0;
    /// Winner rests this far below the container center
    pub const CENTER_DROP: f32 = 120.0;

    /// Tilt (degrees) while running, and easing toward it per tick
    pub const RUN_TILT: f32 = 10.0;
    pub const TILT_EASING: f32 = 0.1;
}

/// Per-axis absolute clamp
#[inline]
pub fn clamp_components(v: Vec2, max: f32) -> Vec2 {
    v.clamp(Vec2::splat(-max), Vec2::splat(max))
}

/// Exponential approach: move `current` a `factor` fraction toward `target`
#[inline]
pub fn approach(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}
