//! Presentation state derived from the simulation
//!
//! Pure mapping from `CardState` to what the page should show. The browser
//! entry point applies these to the DOM; nothing here touches web APIs.

use crate::CardContent;
use crate::consts::*;
use crate::sim::{Actor, Answer, CardState, Mode};

/// A run of footer text, cursive when it was wrapped in `*...*`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub cursive: bool,
}

/// Split on `*`; odd pieces were between a pair of stars
pub fn split_cursive(text: &str) -> Vec<Segment<'_>> {
    text.split('*')
        .enumerate()
        .filter(|(_, part)| !part.is_empty())
        .map(|(i, part)| Segment {
            text: part,
            cursive: i % 2 == 1,
        })
        .collect()
}

/// Footer emphasis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FooterStyle {
    /// Small uppercase instructions
    Idle,
    /// Bold call to action while a bunny runs
    Playing,
    /// Normal-case prose
    Result,
}

impl FooterStyle {
    pub fn css_class(&self) -> &'static str {
        match self {
            FooterStyle::Idle => "footer idle",
            FooterStyle::Playing => "footer playing",
            FooterStyle::Result => "footer result",
        }
    }
}

/// How one actor button should be drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorView {
    pub mode: Mode,
    /// Absolutely positioned (out of the layout flow)
    pub floating: bool,
    pub left: f32,
    pub top: f32,
    pub z_index: u32,
    pub box_visible: bool,
    pub bunny_visible: bool,
    pub checkmark: bool,
    pub rotation: f32,
    pub mirrored: bool,
}

impl ActorView {
    pub fn of(actor: &Actor) -> Self {
        let floating = actor.mode != Mode::Static;
        Self {
            mode: actor.mode,
            floating,
            left: actor.pos.x,
            top: actor.pos.y,
            z_index: match actor.mode {
                Mode::Static => 10,
                Mode::Centered => 100,
                _ => 50,
            },
            box_visible: matches!(actor.mode, Mode::Static | Mode::Centered),
            bunny_visible: matches!(actor.mode, Mode::Running | Mode::Exiting | Mode::Centering),
            checkmark: actor.mode == Mode::Centered,
            rotation: actor.rotation,
            mirrored: actor.facing_right(),
        }
    }

    /// CSS transform for the bunny graphic
    pub fn bunny_transform(&self) -> String {
        let (scale, rotation) = if self.bunny_visible {
            (1.0, self.rotation)
        } else {
            (0.5, 0.0)
        };
        let flip = if self.mirrored { -1 } else { 1 };
        format!("scale({scale}) rotate({rotation:.2}deg) scaleX({flip})")
    }

    /// Label sits under the box, or above the bunny's head
    pub fn label_transform(&self) -> &'static str {
        if self.box_visible {
            "translateY(40px)"
        } else {
            "translateY(-36px)"
        }
    }

    /// Inline style for the button element
    pub fn button_style(&self) -> String {
        if self.floating {
            format!(
                "position:absolute;left:{:.2}px;top:{:.2}px;width:{}px;z-index:{}",
                self.left, self.top, ACTOR_WIDTH, self.z_index
            )
        } else {
            format!("position:relative;width:{}px;z-index:{}", ACTOR_WIDTH, self.z_index)
        }
    }
}

/// The revealed answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultView<'a> {
    pub answer: Answer,
    pub image: &'a str,
    /// Blushed gets the larger frame
    pub large: bool,
    /// "No" art is anchored to the bottom edge instead of cropped
    pub anchor_bottom: bool,
}

/// Whole-page view
#[derive(Debug, Clone, PartialEq)]
pub struct CardView<'a> {
    pub open: bool,
    pub footer: Vec<Segment<'a>>,
    pub footer_style: FooterStyle,
    pub hint: Option<&'a str>,
    pub result: Option<ResultView<'a>>,
    /// Question and side decorations fade out once a winner exists
    pub decorations_visible: bool,
    pub actors: Vec<(Answer, ActorView)>,
}

impl<'a> CardView<'a> {
    pub fn of(state: &CardState, content: &'a CardContent) -> Self {
        let footer_style = if state.result.is_some() {
            FooterStyle::Result
        } else if state.game_active {
            FooterStyle::Playing
        } else {
            FooterStyle::Idle
        };

        let result = state.winner().map(|answer| ResultView {
            answer,
            image: content.result_image(answer),
            large: answer == Answer::Blushed,
            anchor_bottom: answer == Answer::No,
        });

        Self {
            open: state.card_open,
            footer: split_cursive(state.footer(content)),
            footer_style,
            hint: state.show_hint().then_some(content.messages.hint.as_str()),
            result,
            decorations_visible: state.winner().is_none(),
            actors: state.round.actors().map(|a| (a.id, ActorView::of(a))).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Bounds, FixedLayout};
    use glam::Vec2;

    #[test]
    fn test_split_cursive() {
        let parts = split_cursive("Hello *dear* friend");
        assert_eq!(
            parts,
            vec![
                Segment { text: "Hello ", cursive: false },
                Segment { text: "dear", cursive: true },
                Segment { text: " friend", cursive: false },
            ]
        );
        assert_eq!(split_cursive("plain"), vec![Segment { text: "plain", cursive: false }]);
        assert!(split_cursive("").is_empty());
    }

    #[test]
    fn test_actor_view_static() {
        let actor = Actor::new(Answer::Yes);
        let view = ActorView::of(&actor);
        assert!(!view.floating);
        assert!(view.box_visible);
        assert!(!view.bunny_visible);
        assert_eq!(view.z_index, 10);
        assert_eq!(view.label_transform(), "translateY(40px)");
        assert!(view.button_style().starts_with("position:relative"));
    }

    #[test]
    fn test_actor_view_running_mirrors_when_heading_right() {
        let mut actor = Actor::new(Answer::No);
        actor.mode = Mode::Running;
        actor.pos = Vec2::new(12.0, 60.0);
        actor.vel = Vec2::new(2.0, -1.0);
        actor.rotation = -4.0;

        let view = ActorView::of(&actor);
        assert!(view.floating);
        assert!(view.bunny_visible);
        assert!(view.mirrored);
        assert_eq!(view.bunny_transform(), "scale(1) rotate(-4.00deg) scaleX(-1)");
        assert!(view.button_style().contains("left:12.00px;top:60.00px"));
    }

    #[test]
    fn test_actor_view_centered_shows_checkmark() {
        let mut actor = Actor::new(Answer::Maybe);
        actor.mode = Mode::Centered;
        let view = ActorView::of(&actor);
        assert!(view.checkmark);
        assert!(view.box_visible);
        assert_eq!(view.z_index, 100);
    }

    #[test]
    fn test_card_view_result() {
        let content = CardContent::default();
        let layout = FixedLayout::card_grid(Bounds::new(420.0, 600.0));
        let mut state = CardState::new(5);

        let view = CardView::of(&state, &content);
        assert!(!view.open);
        assert!(view.hint.is_none());
        assert_eq!(view.footer_style, FooterStyle::Idle);

        state.open();
        assert_eq!(CardView::of(&state, &content).hint, Some("Please press on your answer"));

        state.press_actor(Answer::Blushed, &layout);
        state.press_actor(Answer::Blushed, &layout);
        let view = CardView::of(&state, &content);
        assert_eq!(view.footer_style, FooterStyle::Result);
        assert!(!view.decorations_visible);
        let result = view.result.unwrap();
        assert!(result.large);
        assert!(!result.anchor_bottom);
        assert_eq!(result.image, content.result_image(Answer::Blushed));
        assert_eq!(view.actors.len(), 4);
    }
}
