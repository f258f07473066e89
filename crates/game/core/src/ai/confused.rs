use crate::action::{Action, Direction};

use super::{AiView, Controller};

/// Temporary override that makes an actor stumble about at random.
///
/// The wrapped controller is kept untouched and takes over again once the
/// counter runs out.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfusedController {
    pub inner: Controller,
    pub turns_remaining: u32,
}

impl ConfusedController {
    pub fn new(inner: Controller, turns: u32) -> Self {
        Self {
            inner,
            turns_remaining: turns,
        }
    }

    pub fn is_spent(&self) -> bool {
        self.turns_remaining == 0
    }

    /// One random step in any of the eight directions; waits when that tile
    /// is taken. Always uses up one turn of confusion.
    pub(super) fn stumble(&mut self, view: &AiView<'_>) -> Option<Action> {
        self.turns_remaining = self.turns_remaining.saturating_sub(1);
        let direction = Direction::ALL[view.pick(Direction::ALL.len())?];
        view.can_step(direction)
            .then(|| Action::step(view.actor.id, direction))
    }
}
