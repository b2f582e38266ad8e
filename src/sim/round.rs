//! Round coordination: who got caught, who runs away
//!
//! The round holds at most one winner. The first catch decides the round and,
//! in the same call, sends every other actor into `Exiting`, so no later press
//! can produce a second catch.

use rand::Rng;

use super::actor::{Actor, Answer, Mode, Standing};
use super::tick::LayoutProbe;

/// Events bubbling up from the round to the card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEvent {
    /// An actor left its checkbox and started running
    RunStarted(Answer),
    /// An actor was caught and is the winner
    Caught(Answer),
}

/// One play-through, from first press to a chosen answer
#[derive(Debug, Clone)]
pub struct Round {
    winner: Option<Answer>,
    /// In `Answer::ALL` order
    actors: Vec<Actor>,
}

impl Default for Round {
    fn default() -> Self {
        Self::new()
    }
}

impl Round {
    pub fn new() -> Self {
        Self {
            winner: None,
            actors: Answer::ALL.iter().map(|&id| Actor::new(id)).collect(),
        }
    }

    pub fn winner(&self) -> Option<Answer> {
        self.winner
    }

    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }

    pub fn standing(&self, id: Answer) -> Standing {
        match self.winner {
            None => Standing::Playing,
            Some(w) if w == id => Standing::Won,
            Some(_) => Standing::Lost,
        }
    }

    pub fn actor(&self, id: Answer) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == id)
    }

    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter()
    }

    pub(crate) fn actors_mut(&mut self) -> impl Iterator<Item = &mut Actor> {
        self.actors.iter_mut()
    }

    /// Whether any actor needs per-frame updates
    pub fn is_animating(&self) -> bool {
        self.actors.iter().any(|a| a.mode.is_animating())
    }

    /// Pointer press on an actor.
    ///
    /// While the round is open, a static actor starts running and a running
    /// one is caught. Everything else is ignored.
    pub fn press<P, R>(&mut self, id: Answer, layout: &P, rng: &mut R) -> Option<RoundEvent>
    where
        P: LayoutProbe + ?Sized,
        R: Rng + ?Sized,
    {
        if self.is_decided() {
            return None;
        }

        let mode = self.actor(id)?.mode;
        match mode {
            Mode::Static => {
                let offset = layout.actor_offset(id);
                let actor = self.actors.iter_mut().find(|a| a.id == id)?;
                actor.start_running(offset, rng);
                log::debug!("{} started running from {:?}", id.id(), actor.pos);
                Some(RoundEvent::RunStarted(id))
            }
            Mode::Running => self.catch(id, layout),
            _ => None,
        }
    }

    /// Record a catch. Only the first one, on a running actor, is accepted.
    pub fn catch<P>(&mut self, id: Answer, layout: &P) -> Option<RoundEvent>
    where
        P: LayoutProbe + ?Sized,
    {
        if self.is_decided() || self.actor(id)?.mode != Mode::Running {
            return None;
        }
        self.winner = Some(id);
        self.apply_standings(layout);
        log::info!("Caught: {}", id.id());
        Some(RoundEvent::Caught(id))
    }

    /// Drive every actor to the mode its standing demands
    fn apply_standings<P>(&mut self, layout: &P)
    where
        P: LayoutProbe + ?Sized,
    {
        let bounds = layout.container().unwrap_or_default();
        let standings: Vec<Standing> = self.actors.iter().map(|a| self.standing(a.id)).collect();

        for (actor, standing) in self.actors.iter_mut().zip(standings) {
            match standing {
                Standing::Won => actor.begin_centering(),
                Standing::Lost => actor.begin_exiting(layout.actor_offset(actor.id), bounds),
                Standing::Playing => {}
            }
        }
    }

    /// Card closed: back to the initial layout, no winner
    pub fn reset(&mut self) {
        self.winner = None;
        for actor in &mut self.actors {
            actor.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::motion::step_actor;
    use crate::sim::tick::{Bounds, FixedLayout};
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn layout() -> FixedLayout {
        FixedLayout::card_grid(Bounds::new(420.0, 600.0))
    }

    fn mode_of(round: &Round, id: Answer) -> Mode {
        round.actor(id).map(|a| a.mode).unwrap_or_default()
    }

    #[test]
    fn test_first_press_starts_running() {
        let mut round = Round::new();
        let mut rng = Pcg32::seed_from_u64(1);
        let event = round.press(Answer::No, &layout(), &mut rng);

        assert_eq!(event, Some(RoundEvent::RunStarted(Answer::No)));
        assert_eq!(mode_of(&round, Answer::No), Mode::Running);
        assert_eq!(mode_of(&round, Answer::Yes), Mode::Static);
        assert!(!round.is_decided());
    }

    #[test]
    fn test_catching_yes_decides_round_in_same_update() {
        let layout = layout();
        let mut round = Round::new();
        let mut rng = Pcg32::seed_from_u64(2);
        round.press(Answer::Yes, &layout, &mut rng);
        let event = round.press(Answer::Yes, &layout, &mut rng);

        assert_eq!(event, Some(RoundEvent::Caught(Answer::Yes)));
        assert_eq!(round.winner(), Some(Answer::Yes));
        assert_eq!(mode_of(&round, Answer::Yes), Mode::Centering);
        for id in [Answer::No, Answer::Maybe, Answer::Blushed] {
            assert_eq!(mode_of(&round, id), Mode::Exiting);
            assert_eq!(round.standing(id), Standing::Lost);
        }
    }

    #[test]
    fn test_static_losers_snap_to_layout_first() {
        let layout = layout();
        let mut round = Round::new();
        let mut rng = Pcg32::seed_from_u64(3);
        round.press(Answer::Maybe, &layout, &mut rng);
        round.press(Answer::Maybe, &layout, &mut rng);

        let no = round.actor(Answer::No).cloned().unwrap_or_else(|| Actor::new(Answer::No));
        assert_eq!(Some(no.pos), layout.actor_offset(Answer::No));
    }

    #[test]
    fn test_second_catch_rejected() {
        let layout = layout();
        let mut round = Round::new();
        let mut rng = Pcg32::seed_from_u64(4);
        round.press(Answer::Yes, &layout, &mut rng);
        round.press(Answer::No, &layout, &mut rng);
        round.press(Answer::Yes, &layout, &mut rng);

        assert_eq!(round.press(Answer::No, &layout, &mut rng), None);
        assert_eq!(round.catch(Answer::No, &layout), None);
        assert_eq!(round.winner(), Some(Answer::Yes));
    }

    #[test]
    fn test_catch_requires_running_actor() {
        let layout = layout();
        let mut round = Round::new();

        assert_eq!(round.catch(Answer::Yes, &layout), None);
        assert!(!round.is_decided());
        assert_eq!(round.standing(Answer::Yes), Standing::Playing);
        for actor in round.actors() {
            assert_eq!(actor.mode, Mode::Static);
            assert_eq!(actor.pos, Vec2::ZERO);
        }

        let mut rng = Pcg32::seed_from_u64(8);
        round.press(Answer::No, &layout, &mut rng);
        assert_eq!(round.catch(Answer::Maybe, &layout), None);
        assert_eq!(round.catch(Answer::No, &layout), Some(RoundEvent::Caught(Answer::No)));
        assert_eq!(round.standing(Answer::No), Standing::Won);
    }

    #[test]
    fn test_press_on_static_after_decision_is_ignored() {
        let layout = layout();
        let mut round = Round::new();
        let mut rng = Pcg32::seed_from_u64(5);
        round.press(Answer::Blushed, &layout, &mut rng);
        round.press(Answer::Blushed, &layout, &mut rng);
        assert_eq!(round.press(Answer::Yes, &layout, &mut rng), None);
    }

    #[test]
    fn test_reset_from_any_mode() {
        let layout = layout();
        let mut round = Round::new();
        let mut rng = Pcg32::seed_from_u64(6);
        round.press(Answer::No, &layout, &mut rng);
        round.press(Answer::No, &layout, &mut rng);
        round.reset();

        assert!(!round.is_decided());
        for actor in round.actors() {
            assert_eq!(actor.mode, Mode::Static);
            assert_eq!(actor.vel, Vec2::ZERO);
            assert_eq!(actor.rotation, 0.0);
        }
    }

    #[test]
    fn test_unmeasurable_container_defaults_to_origin() {
        let layout = FixedLayout::default();
        let mut round = Round::new();
        let mut rng = Pcg32::seed_from_u64(7);
        round.press(Answer::Yes, &layout, &mut rng);
        assert_eq!(round.actor(Answer::Yes).map(|a| a.pos), Some(Vec2::ZERO));
        round.press(Answer::Yes, &layout, &mut rng);
        assert!(round.actors().all(|a| a.vel.x.is_finite() && a.vel.y.is_finite()));
    }

    proptest! {
        #[test]
        fn prop_exactly_one_centered(
            winner_idx in 0usize..4,
            runners in proptest::collection::vec(0usize..4, 0..4),
            warmup in 0u32..60,
            seed in any::<u64>(),
        ) {
            let layout = layout();
            let bounds = Bounds::new(420.0, 600.0);
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut round = Round::new();
            let winner = Answer::ALL[winner_idx];

            for idx in runners {
                let id = Answer::ALL[idx];
                if id != winner && mode_of(&round, id) == Mode::Static {
                    round.press(id, &layout, &mut rng);
                }
            }
            round.press(winner, &layout, &mut rng);
            for _ in 0..warmup {
                for actor in round.actors_mut() {
                    step_actor(actor, bounds, &mut rng);
                }
            }
            round.press(winner, &layout, &mut rng);

            for _ in 0..500 {
                for actor in round.actors_mut() {
                    step_actor(actor, bounds, &mut rng);
                }
            }

            let centered: Vec<_> = round.actors().filter(|a| a.mode == Mode::Centered).collect();
            prop_assert_eq!(centered.len(), 1);
            prop_assert_eq!(centered[0].id, winner);
            prop_assert!(round.actors().filter(|a| a.id != winner).all(|a| a.mode == Mode::Exiting));
        }
    }
}
