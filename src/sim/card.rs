//! Card-level state: open/closed, game progress, chosen answer
//!
//! Owns the round and the RNG. Closing the card resets everything back to
//! the initial state.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::actor::Answer;
use super::round::{Round, RoundEvent};
use super::tick::{LayoutProbe, tick};
use crate::content::CardContent;

/// Events for the page shell (footer, hint)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardEvent {
    Opened,
    Closed,
    GameStarted(Answer),
    GameEnded(Answer),
}

/// Top-level page state
#[derive(Debug, Clone)]
pub struct CardState {
    /// Seed for reproducibility
    pub seed: u64,
    pub card_open: bool,
    /// Some bunny has started running
    pub game_active: bool,
    /// Answer picked by catching a bunny
    pub result: Option<Answer>,
    pub round: Round,
    rng: Pcg32,
}

impl CardState {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            card_open: false,
            game_active: false,
            result: None,
            round: Round::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Press on the cover / inside-left page
    pub fn toggle(&mut self) -> CardEvent {
        if self.card_open {
            self.close()
        } else {
            self.open()
        }
    }

    pub fn open(&mut self) -> CardEvent {
        self.card_open = true;
        log::info!("Card opened");
        CardEvent::Opened
    }

    /// Close and reset app state, winner and every actor
    pub fn close(&mut self) -> CardEvent {
        self.card_open = false;
        self.game_active = false;
        self.result = None;
        self.round.reset();
        log::info!("Card closed, round reset");
        CardEvent::Closed
    }

    /// Press on an actor button. Ignored while the card is closed.
    pub fn press_actor<P>(&mut self, id: Answer, layout: &P) -> Option<CardEvent>
    where
        P: LayoutProbe + ?Sized,
    {
        if !self.card_open {
            return None;
        }

        match self.round.press(id, layout, &mut self.rng)? {
            RoundEvent::RunStarted(id) => {
                self.game_active = true;
                Some(CardEvent::GameStarted(id))
            }
            RoundEvent::Caught(id) => {
                self.result = Some(id);
                Some(CardEvent::GameEnded(id))
            }
        }
    }

    /// Advance one animation frame. Frames without a measurable container
    /// are skipped.
    ///
    /// Returns whether another frame is wanted.
    pub fn tick<P>(&mut self, layout: &P) -> bool
    where
        P: LayoutProbe + ?Sized,
    {
        if !self.card_open {
            return false;
        }
        match layout.container() {
            Some(bounds) => tick(&mut self.round, bounds, &mut self.rng),
            None => self.wants_frame(),
        }
    }

    /// Whether the frame loop should be running
    pub fn wants_frame(&self) -> bool {
        self.card_open && self.round.is_animating()
    }

    pub fn winner(&self) -> Option<Answer> {
        self.round.winner()
    }

    /// Footer line for the current state
    pub fn footer<'a>(&self, content: &'a CardContent) -> &'a str {
        if !self.card_open {
            return &content.messages.closed;
        }
        if let Some(answer) = self.result {
            return content.result_message(answer);
        }
        if self.game_active {
            return &content.messages.playing;
        }
        &content.messages.open
    }

    /// "Please press on your answer" is shown before the game starts
    pub fn show_hint(&self) -> bool {
        self.card_open && !self.game_active && self.result.is_none()
    }
}
