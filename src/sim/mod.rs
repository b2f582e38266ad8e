//! Card simulation module
//!
//! All mini-game logic lives here. This module must stay pure:
//! - Advanced one frame at a time by the caller
//! - Seeded RNG only
//! - Layout read only through `LayoutProbe`
//! - No DOM or platform dependencies

pub mod actor;
pub mod card;
pub mod motion;
pub mod round;
pub mod tick;

pub use actor::{Actor, Answer, Mode, Standing};
pub use card::{CardEvent, CardState};
pub use motion::{BounceResult, bounce_off_walls, step_actor};
pub use round::{Round, RoundEvent};
pub use tick::{Bounds, FixedLayout, LayoutProbe, tick};
