//! Agent controllers: how non-player actors pick their next action.
//!
//! A controller is plain data stored on its actor. The scheduler takes it out
//! of the actor for the duration of [`Controller::decide`], hands it an
//! [`AiView`] of the world, and puts it back before performing the result, so
//! deciding never mutates anything but the controller's own memory.
//!
//! - [`IdleBehavior`]: stand still or wander
//! - [`HostileController`]: hunt the player (behavior tree)
//! - [`ConfusedController`]: random stumbling that wraps another controller

mod confused;
mod hostile;
mod idle;
mod view;

pub use confused::ConfusedController;
pub use hostile::{AlertState, HostileController, PerceptionMemory};
pub use idle::IdleBehavior;
pub use view::AiView;

use crate::action::Action;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Controller {
    Idle(IdleBehavior),
    Hostile(HostileController),
    Confused(Box<ConfusedController>),
}

impl Controller {
    pub fn stationary() -> Self {
        Controller::Idle(IdleBehavior::Stationary)
    }

    pub fn hostile(idle: IdleBehavior) -> Self {
        Controller::Hostile(HostileController::new(idle))
    }

    /// Instantiates the controller a template asks for.
    pub fn from_kind(kind: ControllerKind) -> Option<Self> {
        match kind {
            ControllerKind::Inert => None,
            ControllerKind::Stationary => Some(Controller::stationary()),
            ControllerKind::Wander => Some(Controller::Idle(IdleBehavior::Wander)),
            ControllerKind::Hostile { idle } => Some(Controller::hostile(idle)),
        }
    }

    pub fn is_confused(&self) -> bool {
        matches!(self, Controller::Confused(_))
    }

    /// Wraps this controller in a confusion lasting `turns` activations.
    ///
    /// Confusing an already confused actor keeps the longer of the two
    /// durations instead of nesting wrappers.
    #[must_use]
    pub fn confuse(self, turns: u32) -> Self {
        match self {
            Controller::Confused(mut confused) => {
                confused.turns_remaining = confused.turns_remaining.max(turns);
                Controller::Confused(confused)
            }
            other => Controller::Confused(Box::new(ConfusedController::new(other, turns))),
        }
    }

    /// Picks the next action. `None` means wait.
    ///
    /// A spent confusion is unwrapped first and the restored controller
    /// decides this activation.
    pub fn decide(&mut self, view: &AiView<'_>) -> Option<Action> {
        if let Controller::Confused(confused) = self {
            if confused.is_spent() {
                let inner = std::mem::replace(&mut confused.inner, Controller::stationary());
                *self = inner;
            }
        }

        match self {
            Controller::Idle(idle) => idle.decide(view),
            Controller::Hostile(hostile) => hostile.decide(view),
            Controller::Confused(confused) => confused.stumble(view),
        }
    }
}

/// Controller a template asks for, before any runtime memory exists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ControllerKind {
    /// No controller: the actor never acts.
    #[default]
    Inert,
    Stationary,
    Wander,
    Hostile {
        #[cfg_attr(feature = "serde", serde(default))]
        idle: IdleBehavior,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ActorState, EntityId, Faction, GameState, Position};
    use crate::testing::{Fixture, StubMap, StubPerception, state_with};

    fn decide(controller: &mut Controller, state: &GameState, seed: u64) -> Option<Action> {
        let fixture = Fixture::new(StubMap::open(9, 9));
        let perception = StubPerception::everything();
        let view = AiView {
            actor: &state.entities.npcs[0],
            state,
            env: fixture.env(),
            perception: &perception,
            seed,
        };
        controller.decide(&view)
    }

    fn goblin_next_to_player() -> GameState {
        let goblin = ActorState::new(EntityId(1), "goblin", Position::new(4, 4))
            .with_faction(Faction::Monster)
            .with_health(5);
        state_with(Position::new(4, 3), vec![goblin])
    }

    #[test]
    fn confusion_counts_down_then_restores_inner_controller() {
        let state = goblin_next_to_player();
        let mut controller = Controller::hostile(IdleBehavior::Stationary).confuse(2);

        for seed in 0..2 {
            let action = decide(&mut controller, &state, seed);
            assert!(
                matches!(action, None | Some(Action::Move(_))),
                "confused actors only stumble: {action:?}"
            );
            assert!(controller.is_confused());
        }

        let action = decide(&mut controller, &state, 2);

        assert!(matches!(controller, Controller::Hostile(_)));
        assert_eq!(action, Some(Action::melee(EntityId(1), EntityId::PLAYER)));
    }

    #[test]
    fn reconfusing_keeps_the_longer_duration() {
        let controller = Controller::stationary().confuse(5).confuse(3);

        let Controller::Confused(confused) = &controller else {
            panic!("expected confusion");
        };
        assert_eq!(confused.turns_remaining, 5);
        assert_eq!(confused.inner, Controller::stationary());

        let Controller::Confused(confused) = controller.confuse(9) else {
            panic!("expected confusion");
        };
        assert_eq!(confused.turns_remaining, 9);
    }

    #[test]
    fn stumbling_never_targets_an_occupied_tile() {
        let state = goblin_next_to_player();

        for seed in 0..32 {
            let mut controller = Controller::stationary().confuse(1);
            if let Some(Action::Move(step)) = decide(&mut controller, &state, seed) {
                assert_ne!(step.direction.step(Position::new(4, 4)), Position::new(4, 3));
            }
        }
    }

    #[test]
    fn template_kinds_map_to_controllers() {
        assert_eq!(Controller::from_kind(ControllerKind::Inert), None);
        assert_eq!(
            Controller::from_kind(ControllerKind::Wander),
            Some(Controller::Idle(IdleBehavior::Wander))
        );
        assert!(matches!(
            Controller::from_kind(ControllerKind::Hostile {
                idle: IdleBehavior::Wander
            }),
            Some(Controller::Hostile(HostileController {
                idle: IdleBehavior::Wander,
                ..
            }))
        ));
    }
}
