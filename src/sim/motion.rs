//! Per-frame actor movement
//!
//! The bouncing part of the mini-game: a running bunny reflects off the four
//! card edges, gets a random kick on each hit, and leans into its direction of
//! travel. Winners ease toward a fixed spot; losers fly off in a straight line.

use glam::Vec2;
use rand::Rng;

use super::actor::{Actor, Mode};
use super::tick::Bounds;
use crate::consts::*;
use crate::{approach, clamp_components};

/// Result of moving a running actor against the card edges
#[derive(Debug, Clone, Copy)]
pub struct BounceResult {
    /// New (clamped) position
    pub pos: Vec2,
    /// Velocity with reflected components
    pub vel: Vec2,
    /// Whether any edge was touched
    pub hit: bool,
}

/// Advance `pos` by `vel` inside `bounds`, reflecting off each edge.
///
/// Edges are inset by the actor's footprint plus the side/top/bottom margins,
/// the top margin leaving room for the label above the bunny.
pub fn bounce_off_walls(pos: Vec2, vel: Vec2, bounds: Bounds) -> BounceResult {
    let mut pos = pos + vel;
    let mut vel = vel;
    let mut hit = false;

    let (min, max) = bounds.running_area();

    if pos.x <= min.x {
        pos.x = min.x;
        vel.x = vel.x.abs();
        hit = true;
    } else if pos.x >= max.x {
        pos.x = max.x;
        vel.x = -vel.x.abs();
        hit = true;
    }

    if pos.y <= min.y {
        pos.y = min.y;
        vel.y = vel.y.abs();
        hit = true;
    } else if pos.y >= max.y {
        pos.y = max.y;
        vel.y = -vel.y.abs();
        hit = true;
    }

    BounceResult { pos, vel, hit }
}

/// Random kick after a wall hit, then cap each component
pub fn perturb<R: Rng + ?Sized>(vel: Vec2, rng: &mut R) -> Vec2 {
    let kick = Vec2::new(
        (rng.random::<f32>() - 0.5) * WALL_JITTER,
        (rng.random::<f32>() - 0.5) * WALL_JITTER,
    );
    clamp_components(vel + kick, MAX_RUN_SPEED)
}

/// Lean target: tilt clockwise when heading left, counter-clockwise otherwise
#[inline]
pub fn tilt_target(vel: Vec2) -> f32 {
    if vel.x < 0.0 { RUN_TILT } else { -RUN_TILT }
}

/// Advance one actor by one frame
pub fn step_actor<R: Rng + ?Sized>(actor: &mut Actor, bounds: Bounds, rng: &mut R) {
    match actor.mode {
        Mode::Exiting => {
            actor.pos += actor.vel;
        }
        Mode::Centering => step_centering(actor, bounds),
        Mode::Running => step_running(actor, bounds, rng),
        Mode::Static | Mode::Centered => {}
    }
}

fn step_centering(actor: &mut Actor, bounds: Bounds) {
    let target = bounds.centering_target();
    let delta = target - actor.pos;

    if delta.x.abs() < CENTERING_SNAP && delta.y.abs() < CENTERING_SNAP {
        actor.settle(target);
        return;
    }

    actor.pos += delta * CENTERING_FACTOR;
}

fn step_running<R: Rng + ?Sized>(actor: &mut Actor, bounds: Bounds, rng: &mut R) {
    let result = bounce_off_walls(actor.pos, actor.vel, bounds);
    actor.pos = result.pos;
    actor.vel = if result.hit {
        perturb(result.vel, rng)
    } else {
        result.vel
    };

    actor.rotation = approach(actor.rotation, tilt_target(actor.vel), TILT_EASING);
}
