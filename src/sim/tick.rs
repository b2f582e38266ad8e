//! Frame tick and layout measurement
//!
//! The simulation never reads the page directly: container size and actor
//! offsets come through a `LayoutProbe`, sampled at transition time.

use std::collections::HashMap;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::actor::Answer;
use super::motion::step_actor;
use super::round::Round;
use crate::consts::*;

/// Client size of the card content box (the actors' playground)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width, self.height) / 2.0
    }

    /// Resting spot of the winner: horizontally centered, below the middle
    pub fn centering_target(&self) -> Vec2 {
        Vec2::new(
            self.width / 2.0 - ACTOR_WIDTH / 2.0,
            self.height / 2.0 - ACTOR_HEIGHT / 2.0 + CENTER_DROP,
        )
    }

    /// Allowed top-left range (min, max) for a running actor
    pub fn running_area(&self) -> (Vec2, Vec2) {
        (
            Vec2::new(SIDE_MARGIN, TOP_MARGIN),
            Vec2::new(
                self.width - ACTOR_WIDTH - SIDE_MARGIN,
                self.height - ACTOR_HEIGHT - BOTTOM_MARGIN,
            ),
        )
    }
}

/// Synchronous layout measurements
pub trait LayoutProbe {
    /// Current size of the card content box
    fn container(&self) -> Option<Bounds>;
    /// Laid-out top-left of an actor relative to the content box
    fn actor_offset(&self, id: Answer) -> Option<Vec2>;
}

/// Layout with fixed measurements (headless runs, tests)
#[derive(Debug, Clone, Default)]
pub struct FixedLayout {
    pub bounds: Option<Bounds>,
    pub offsets: HashMap<Answer, Vec2>,
}

impl FixedLayout {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds: Some(bounds),
            offsets: HashMap::new(),
        }
    }

    pub fn with_offset(mut self, id: Answer, offset: Vec2) -> Self {
        self.offsets.insert(id, offset);
        self
    }

    /// The default card grid: yes | no over blushed | maybe, near the bottom
    pub fn card_grid(bounds: Bounds) -> Self {
        let col = (bounds.width - 64.0) / 3.0;
        let row = bounds.height - 2.0 * ACTOR_HEIGHT - 80.0;
        let x = |c: f32| 32.0 + col * c + (col - ACTOR_WIDTH) / 2.0;
        Self::new(bounds)
            .with_offset(Answer::Yes, Vec2::new(x(0.0), row))
            .with_offset(Answer::No, Vec2::new(x(1.0), row))
            .with_offset(Answer::Blushed, Vec2::new(x(1.0), row + ACTOR_HEIGHT + 48.0))
            .with_offset(Answer::Maybe, Vec2::new(x(2.0), row))
    }
}

impl LayoutProbe for FixedLayout {
    fn container(&self) -> Option<Bounds> {
        self.bounds
    }

    fn actor_offset(&self, id: Answer) -> Option<Vec2> {
        self.offsets.get(&id).copied()
    }
}

/// Advance every animating actor by one frame.
///
/// Returns whether any actor still needs frames afterwards.
pub fn tick<R: Rng + ?Sized>(round: &mut Round, bounds: Bounds, rng: &mut R) -> bool {
    for actor in round.actors_mut() {
        step_actor(actor, bounds, rng);
    }
    round.is_animating()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::actor::Mode;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_bounds_targets() {
        let bounds = Bounds::new(420.0, 600.0);
        assert_eq!(bounds.center(), Vec2::new(210.0, 300.0));
        assert_eq!(bounds.centering_target(), Vec2::new(170.0, 370.0));
        let (min, max) = bounds.running_area();
        assert_eq!(min, Vec2::new(10.0, 50.0));
        assert_eq!(max, Vec2::new(330.0, 490.0));
    }

    #[test]
    fn test_fixed_layout_missing_offset() {
        let layout = FixedLayout::new(Bounds::new(100.0, 100.0)).with_offset(Answer::Yes, Vec2::ONE);
        assert_eq!(layout.actor_offset(Answer::Yes), Some(Vec2::ONE));
        assert_eq!(layout.actor_offset(Answer::No), None);
    }

    #[test]
    fn test_tick_idle_round_needs_no_frames() {
        let mut round = Round::new();
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(!tick(&mut round, Bounds::new(420.0, 600.0), &mut rng));
        assert!(round.actors().all(|a| a.mode == Mode::Static));
    }

    #[test]
    fn test_tick_moves_only_animating_actors() {
        let bounds = Bounds::new(420.0, 600.0);
        let layout = FixedLayout::card_grid(bounds);
        let mut round = Round::new();
        let mut rng = Pcg32::seed_from_u64(11);
        round.press(Answer::Maybe, &layout, &mut rng);

        let before_yes = round.actor(Answer::Yes).map(|a| a.pos);
        let before_maybe = round.actor(Answer::Maybe).map(|a| a.pos);
        assert!(tick(&mut round, bounds, &mut rng));
        assert_eq!(round.actor(Answer::Yes).map(|a| a.pos), before_yes);
        assert_ne!(round.actor(Answer::Maybe).map(|a| a.pos), before_maybe);
    }
}
