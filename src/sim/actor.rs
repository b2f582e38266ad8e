//! Actor (bunny) state and mode transitions
//!
//! An actor starts embedded in the page layout (`Static`), breaks free on the
//! first press (`Running`), and ends the round either gliding to the winner's
//! spot (`Centering` -> `Centered`) or fleeing off-card (`Exiting`).

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::tick::Bounds;
use crate::consts::*;

/// The four possible answers, one per actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    Yes,
    No,
    Maybe,
    Blushed,
}

impl Answer {
    /// Layout order (yes | no, blushed | maybe)
    pub const ALL: [Answer; 4] = [Answer::Yes, Answer::No, Answer::Blushed, Answer::Maybe];

    /// Stable identifier (DOM `data-actor` value, config keys)
    pub fn id(&self) -> &'static str {
        match self {
            Answer::Yes => "yes",
            Answer::No => "no",
            Answer::Maybe => "maybe",
            Answer::Blushed => "blushed",
        }
    }

    /// Label shown next to the checkbox
    pub fn label(&self) -> &'static str {
        match self {
            Answer::Yes => "Yes",
            Answer::No => "No",
            Answer::Maybe => "Maybe",
            Answer::Blushed => "Blushed",
        }
    }

    pub fn from_id(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "yes" => Some(Answer::Yes),
            "no" => Some(Answer::No),
            "maybe" => Some(Answer::Maybe),
            "blushed" => Some(Answer::Blushed),
            _ => None,
        }
    }
}

/// Movement mode of an actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Idle checkbox in normal page flow
    #[default]
    Static,
    /// Free-floating bunny bouncing inside the card
    Running,
    /// Winner gliding toward its resting spot
    Centering,
    /// Winner at rest, checkbox ticked (terminal)
    Centered,
    /// Loser fleeing in a straight line (terminal, unbounded)
    Exiting,
}

impl Mode {
    /// Whether this mode needs a per-frame update
    pub fn is_animating(&self) -> bool {
        matches!(self, Mode::Running | Mode::Centering | Mode::Exiting)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Static => "static",
            Mode::Running => "running",
            Mode::Centering => "centering",
            Mode::Centered => "centered",
            Mode::Exiting => "exiting",
        }
    }
}

/// Where an actor stands in the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Standing {
    Playing,
    Won,
    Lost,
}

/// A single bunny
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: Answer,
    pub mode: Mode,
    /// Top-left corner relative to the card content box
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    /// Tilt in degrees
    pub rotation: f32,
}

impl Actor {
    pub fn new(id: Answer) -> Self {
        Self {
            id,
            mode: Mode::Static,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            rotation: 0.0,
        }
    }

    /// Footprint center
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(ACTOR_WIDTH, ACTOR_HEIGHT) / 2.0
    }

    /// Bunny art faces left by default; mirrored while heading right
    #[inline]
    pub fn facing_right(&self) -> bool {
        self.vel.x > 0.0
    }

    /// Back to the idle checkbox (card closed)
    pub fn reset(&mut self) {
        self.mode = Mode::Static;
        self.pos = Vec2::ZERO;
        self.vel = Vec2::ZERO;
        self.rotation = 0.0;
    }

    /// Break out of the layout. `offset` is the laid-out position at this
    /// instant; unmeasurable layouts start at the origin.
    pub fn start_running<R: Rng + ?Sized>(&mut self, offset: Option<Vec2>, rng: &mut R) {
        if self.mode != Mode::Static {
            return;
        }
        self.pos = offset.unwrap_or(Vec2::ZERO);
        self.vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * RUN_X_SPREAD,
            -(rng.random::<f32>() * RUN_Y_JITTER + RUN_Y_BASE),
        );
        self.mode = Mode::Running;
    }

    /// Winner: glide toward the resting spot
    pub fn begin_centering(&mut self) {
        if matches!(self.mode, Mode::Centering | Mode::Centered) {
            return;
        }
        self.mode = Mode::Centering;
    }

    /// Loser: flee away from the container center at `EXIT_SPEED`.
    ///
    /// A static actor first snaps to its measured layout position, and the
    /// flee direction is computed from that snapshot.
    pub fn begin_exiting(&mut self, offset: Option<Vec2>, bounds: Bounds) {
        if self.mode == Mode::Exiting {
            return;
        }
        if self.mode == Mode::Static {
            self.pos = offset.unwrap_or(Vec2::ZERO);
        }

        let away = self.center() - bounds.center();
        let len = away.length();
        let len = if len > 0.0 { len } else { 1.0 };
        self.vel = away / len * EXIT_SPEED;
        self.mode = Mode::Exiting;
    }

    /// Finish centering at `target`
    pub(crate) fn settle(&mut self, target: Vec2) {
        self.pos = target;
        self.vel = Vec2::ZERO;
        self.rotation = 0.0;
        self.mode = Mode::Centered;
    }
}
