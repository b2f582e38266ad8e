//! Frame scheduling
//!
//! A `TickSource` hands out one-shot frame callbacks. `FrameLoop` keeps at
//! most one of them pending: it asks for a frame while the card is animating
//! and cancels the pending one as soon as it isn't.

use std::collections::VecDeque;

/// Opaque id of a scheduled frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Something that can schedule and cancel one-shot frame callbacks
pub trait TickSource {
    /// Schedule the next frame. `None` if the platform refused.
    fn request_frame(&mut self) -> Option<FrameHandle>;
    /// Drop a scheduled frame before it fires
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Single pending-frame bookkeeping
#[derive(Debug, Default)]
pub struct FrameLoop {
    pending: Option<FrameHandle>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Request or cancel so that a frame is pending iff `wants_frame`
    pub fn sync<S: TickSource + ?Sized>(&mut self, source: &mut S, wants_frame: bool) {
        match (self.pending, wants_frame) {
            (None, true) => {
                self.pending = source.request_frame();
                if self.pending.is_some() {
                    log::debug!("Frame loop started");
                }
            }
            (Some(handle), false) => {
                source.cancel_frame(handle);
                self.pending = None;
                log::debug!("Frame loop stopped");
            }
            _ => {}
        }
    }

    /// The pending frame fired; it is no longer pending
    pub fn fired(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }
}

/// Frames fired by hand (headless runs, tests)
#[derive(Debug, Default)]
pub struct ManualTicks {
    next_id: i32,
    queue: VecDeque<FrameHandle>,
    /// Frames cancelled so far
    pub cancelled: u32,
}

impl ManualTicks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames waiting to fire
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Fire the oldest scheduled frame
    pub fn fire(&mut self) -> Option<FrameHandle> {
        self.queue.pop_front()
    }
}

impl TickSource for ManualTicks {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.queue.push_back(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let before = self.queue.len();
        self.queue.retain(|h| *h != handle);
        if self.queue.len() < before {
            self.cancelled += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Answer, Bounds, CardState, FixedLayout};

    /// Drive a card the way the browser loop does
    fn run_frames(card: &mut CardState, layout: &FixedLayout, ticks: &mut ManualTicks, frames: &mut FrameLoop, max: u32) -> u32 {
        let mut count = 0;
        while count < max {
            let Some(handle) = ticks.fire() else { break };
            assert_eq!(frames.fired(), Some(handle));
            card.tick(layout);
            frames.sync(ticks, card.wants_frame());
            count += 1;
        }
        count
    }

    #[test]
    fn test_sync_requests_once() {
        let mut ticks = ManualTicks::new();
        let mut frames = FrameLoop::new();
        frames.sync(&mut ticks, true);
        frames.sync(&mut ticks, true);
        assert_eq!(ticks.pending(), 1);
        assert!(frames.is_running());
    }

    #[test]
    fn test_sync_cancels_pending() {
        let mut ticks = ManualTicks::new();
        let mut frames = FrameLoop::new();
        frames.sync(&mut ticks, true);
        frames.sync(&mut ticks, false);
        assert_eq!(ticks.pending(), 0);
        assert_eq!(ticks.cancelled, 1);
        assert!(!frames.is_running());
    }

    #[test]
    fn test_idle_card_schedules_nothing() {
        let mut card = CardState::new(1);
        let mut ticks = ManualTicks::new();
        let mut frames = FrameLoop::new();
        card.open();
        frames.sync(&mut ticks, card.wants_frame());
        assert_eq!(ticks.pending(), 0);
    }

    #[test]
    fn test_closing_card_cancels_loop() {
        let layout = FixedLayout::card_grid(Bounds::new(420.0, 600.0));
        let mut card = CardState::new(4);
        let mut ticks = ManualTicks::new();
        let mut frames = FrameLoop::new();

        card.open();
        card.press_actor(Answer::Yes, &layout);
        frames.sync(&mut ticks, card.wants_frame());
        assert_eq!(run_frames(&mut card, &layout, &mut ticks, &mut frames, 30), 30);
        assert!(frames.is_running());

        card.close();
        frames.sync(&mut ticks, card.wants_frame());
        assert!(!frames.is_running());
        assert_eq!(ticks.pending(), 0);
        assert_eq!(ticks.cancelled, 1);
    }

    #[test]
    fn test_loop_runs_until_round_settles_or_stops() {
        let layout = FixedLayout::card_grid(Bounds::new(420.0, 600.0));
        let mut card = CardState::new(9);
        let mut ticks = ManualTicks::new();
        let mut frames = FrameLoop::new();

        card.open();
        card.press_actor(Answer::Maybe, &layout);
        frames.sync(&mut ticks, card.wants_frame());
        run_frames(&mut card, &layout, &mut ticks, &mut frames, 20);
        card.press_actor(Answer::Maybe, &layout);
        frames.sync(&mut ticks, card.wants_frame());
        run_frames(&mut card, &layout, &mut ticks, &mut frames, 200);

        assert_eq!(card.round.actor(Answer::Maybe).map(|a| a.mode), Some(crate::sim::Mode::Centered));
        // Losers are still in flight
        assert!(frames.is_running());
    }
}
