//! What a creature does with nothing to chase.

use crate::action::Action;

use super::AiView;

/// Fallback policy for actors without a target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum IdleBehavior {
    /// Stays put.
    #[default]
    Stationary,
    /// Steps onto a random free neighbouring tile.
    Wander,
}

impl IdleBehavior {
    pub fn decide(self, view: &AiView<'_>) -> Option<Action> {
        match self {
            IdleBehavior::Stationary => None,
            IdleBehavior::Wander => view.wander(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ActorState, EntityId, Position};
    use crate::testing::{Fixture, StubMap, StubPerception, state_with};

    fn decide(idle: IdleBehavior, map: StubMap, at: Position) -> Option<Action> {
        let fixture = Fixture::new(map);
        let state = state_with(
            Position::new(0, 0),
            vec![ActorState::new(EntityId(1), "bat", at)],
        );
        let perception = StubPerception::nothing();
        let view = AiView {
            actor: &state.entities.npcs[0],
            state: &state,
            env: fixture.env(),
            perception: &perception,
            seed: 11,
        };
        idle.decide(&view)
    }

    #[test]
    fn stationary_waits() {
        let action = decide(
            IdleBehavior::Stationary,
            StubMap::open(5, 5),
            Position::new(2, 2),
        );

        assert_eq!(action, None);
    }

    #[test]
    fn wanderer_only_steps_onto_open_floor() {
        let map = StubMap::parse(&["#####", "##.##", "##.##", "#####"]);

        let action = decide(IdleBehavior::Wander, map, Position::new(2, 1));

        let Some(Action::Move(step)) = action else {
            panic!("expected a move, got {action:?}");
        };
        assert_eq!(step.direction, crate::action::Direction::South);
    }

    #[test]
    fn boxed_in_wanderer_waits() {
        let map = StubMap::parse(&["###", "#.#", "###"]);

        let action = decide(IdleBehavior::Wander, map, Position::new(1, 1));

        assert_eq!(action, None);
    }
}
