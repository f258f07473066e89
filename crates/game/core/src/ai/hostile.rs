//! Hunting behavior for creatures that attack the player.
//!
//! The decision is a behavior tree evaluated once per activation over a
//! [`Blackboard`] that borrows the view and the controller's memory:
//!
//! ```text
//! selector
//! ├── sequence: blind?          -> wander
//! ├── sequence: sees player?    -> remember -> selector
//! │                                            ├── adjacent? -> melee
//! │                                            ├── in range? -> shoot
//! │                                            ├── chase
//! │                                            └── wander
//! ├── sequence: remembers spot? -> search
//! └── idle policy
//! ```

use behavior_tree::builder::{condition, selector, sequence, task};
use behavior_tree::{Behavior, Node, Status};

use crate::action::Action;
use crate::config::GameConfig;
use crate::state::{EntityId, Position};

use super::{AiView, IdleBehavior};

/// How aware a hostile is of the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlertState {
    #[default]
    Unaware,
    /// The player is in sight right now.
    Alert,
    /// The player was lost from sight; heading for the last known spot.
    Searching,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerceptionMemory {
    pub alert: AlertState,
    pub last_known: Option<Position>,
}

impl PerceptionMemory {
    fn spot(&mut self, position: Position) {
        self.alert = AlertState::Alert;
        self.last_known = Some(position);
    }

    fn forget(&mut self) {
        self.alert = AlertState::Unaware;
        self.last_known = None;
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HostileController {
    pub memory: PerceptionMemory,
    pub idle: IdleBehavior,
}

impl HostileController {
    pub fn new(idle: IdleBehavior) -> Self {
        Self {
            memory: PerceptionMemory::default(),
            idle,
        }
    }

    pub fn alert(&self) -> AlertState {
        self.memory.alert
    }

    pub fn decide(&mut self, view: &AiView<'_>) -> Option<Action> {
        let mut board = Blackboard {
            view,
            memory: &mut self.memory,
            idle: self.idle,
            decision: None,
        };
        hostile_tree().tick(&mut board);
        board.decision
    }
}

// ============================================================================
// Tree
// ============================================================================

/// Per-activation scratch space shared by the tree's nodes.
struct Blackboard<'v, 'a> {
    view: &'v AiView<'a>,
    memory: &'v mut PerceptionMemory,
    idle: IdleBehavior,
    /// `None` after a successful tick means "wait".
    decision: Option<Action>,
}

impl Blackboard<'_, '_> {
    fn me(&self) -> EntityId {
        self.view.actor.id
    }

    fn player_position(&self) -> Position {
        self.view.player().position
    }
}

fn hostile_tree<'v, 'a: 'v>() -> Node<'v, Blackboard<'v, 'a>> {
    selector(vec![
        sequence(vec![condition(is_blind), task(wander)]),
        sequence(vec![
            condition(sees_player),
            task(remember_player),
            selector(vec![
                sequence(vec![condition(player_in_melee_reach), task(melee)]),
                sequence(vec![condition(player_in_ranged_reach), task(shoot)]),
                task(chase),
                task(wander),
            ]),
        ]),
        sequence(vec![condition(remembers_spot), task(search)]),
        task(idle),
    ])
}

// ===== conditions =====

fn is_blind(board: &Blackboard<'_, '_>) -> bool {
    board.view.is_blind()
}

fn sees_player(board: &Blackboard<'_, '_>) -> bool {
    board.view.sees_player()
}

fn player_in_melee_reach(board: &Blackboard<'_, '_>) -> bool {
    board.view.distance_to(board.player_position()) <= GameConfig::MELEE_RANGE
}

fn player_in_ranged_reach(board: &Blackboard<'_, '_>) -> bool {
    let distance = board.view.distance_to(board.player_position());
    board
        .view
        .actor
        .combat
        .ranged
        .is_some_and(|ranged| distance <= ranged.range)
}

fn remembers_spot(board: &Blackboard<'_, '_>) -> bool {
    board.memory.last_known.is_some()
}

// ===== tasks =====

fn remember_player(board: &mut Blackboard<'_, '_>) -> Status {
    let position = board.player_position();
    board.memory.spot(position);
    Status::Success
}

fn melee(board: &mut Blackboard<'_, '_>) -> Status {
    board.decision = Some(Action::melee(board.me(), EntityId::PLAYER));
    Status::Success
}

fn shoot(board: &mut Blackboard<'_, '_>) -> Status {
    board.decision = Some(Action::ranged(board.me(), EntityId::PLAYER));
    Status::Success
}

fn chase(board: &mut Blackboard<'_, '_>) -> Status {
    match board.view.path_next_to(board.player_position()) {
        Some(path) if !path.is_empty() => {
            board.decision = board.view.follow(path);
            Status::Success
        }
        _ => Status::Failure,
    }
}

fn search(board: &mut Blackboard<'_, '_>) -> Status {
    let Some(spot) = board.memory.last_known else {
        return Status::Failure;
    };
    board.memory.alert = AlertState::Searching;

    if board.view.actor.position == spot {
        board.memory.forget();
        board.decision = None;
        return Status::Success;
    }

    match board.view.path_to(spot) {
        Some(path) => board.decision = board.view.follow(path),
        None => {
            board.memory.forget();
            board.decision = None;
        }
    }
    Status::Success
}

fn wander(board: &mut Blackboard<'_, '_>) -> Status {
    board.decision = board.view.wander();
    Status::Success
}

fn idle(board: &mut Blackboard<'_, '_>) -> Status {
    board.decision = board.idle.decide(board.view);
    Status::Success
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{AttackAction, AttackStyle};
    use crate::env::PerceptionOracle;
    use crate::state::{
        ActorState, CombatProfile, EffectKind, Faction, GameState, StatusFlags,
    };
    use crate::testing::{Fixture, StubMap, StubPerception, state_with};

    fn orc(at: Position) -> ActorState {
        ActorState::new(EntityId(1), "orc", at)
            .with_faction(Faction::Monster)
            .with_health(8)
    }

    fn decide(
        controller: &mut HostileController,
        fixture: &Fixture,
        state: &GameState,
        perception: &dyn PerceptionOracle,
    ) -> Option<Action> {
        decide_seeded(controller, fixture, state, perception, 3)
    }

    fn decide_seeded(
        controller: &mut HostileController,
        fixture: &Fixture,
        state: &GameState,
        perception: &dyn PerceptionOracle,
        seed: u64,
    ) -> Option<Action> {
        let view = AiView {
            actor: &state.entities.npcs[0],
            state,
            env: fixture.env(),
            perception,
            seed,
        };
        controller.decide(&view)
    }

    #[test]
    fn attacks_adjacent_player() {
        let fixture = Fixture::new(StubMap::open(8, 8));
        let state = state_with(Position::new(3, 3), vec![orc(Position::new(4, 4))]);
        let mut controller = HostileController::new(IdleBehavior::Stationary);

        let action = decide(
            &mut controller,
            &fixture,
            &state,
            &StubPerception::everything(),
        );

        assert_eq!(action, Some(Action::melee(EntityId(1), EntityId::PLAYER)));
        assert_eq!(controller.alert(), AlertState::Alert);
        assert_eq!(controller.memory.last_known, Some(Position::new(3, 3)));
    }

    #[test]
    fn archer_shoots_from_range() {
        let fixture = Fixture::new(StubMap::open(10, 3));
        let archer = orc(Position::new(6, 1)).with_combat(CombatProfile::new(2, 0).with_ranged(5, 3));
        let state = state_with(Position::new(2, 1), vec![archer]);
        let mut controller = HostileController::new(IdleBehavior::Stationary);

        let action = decide(
            &mut controller,
            &fixture,
            &state,
            &StubPerception::everything(),
        );

        assert_eq!(action, Some(Action::ranged(EntityId(1), EntityId::PLAYER)));
    }

    #[test]
    fn melee_only_hostile_never_shoots() {
        let fixture = Fixture::new(StubMap::open(9, 9));
        let player = Position::new(4, 4);
        for x in 0..9 {
            for y in 0..9 {
                let at = Position::new(x, y);
                if at == player {
                    continue;
                }
                let state = state_with(player, vec![orc(at)]);
                for seed in 0..16 {
                    let mut controller = HostileController::new(IdleBehavior::Wander);
                    let action = decide_seeded(
                        &mut controller,
                        &fixture,
                        &state,
                        &StubPerception::everything(),
                        seed,
                    );

                    assert!(
                        !matches!(
                            action,
                            Some(Action::Attack(AttackAction {
                                style: AttackStyle::Ranged,
                                ..
                            }))
                        ),
                        "orc at {at:?} with seed {seed} decided {action:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn chases_visible_player_along_a_path() {
        let fixture = Fixture::new(StubMap::open(10, 10));
        let state = state_with(Position::new(1, 1), vec![orc(Position::new(6, 1))]);
        let mut controller = HostileController::new(IdleBehavior::Stationary);

        let action = decide(
            &mut controller,
            &fixture,
            &state,
            &StubPerception::everything(),
        );

        let Some(Action::PathMove(travel)) = action else {
            panic!("expected a path move, got {action:?}");
        };
        assert_eq!(travel.path().peek(), Some(Position::new(5, 1)));
        assert_eq!(travel.path().destination(), Some(Position::new(2, 1)));
    }

    #[test]
    fn invisible_player_is_not_spotted() {
        let fixture = Fixture::new(StubMap::open(8, 8));
        let mut state = state_with(Position::new(3, 3), vec![orc(Position::new(4, 4))]);
        state
            .entities
            .player
            .apply_effect(EffectKind::Invisibility, 5);
        let mut controller = HostileController::new(IdleBehavior::Stationary);

        let action = decide(
            &mut controller,
            &fixture,
            &state,
            &StubPerception::everything(),
        );

        assert_eq!(action, None);
        assert_eq!(controller.alert(), AlertState::Unaware);
    }

    #[test]
    fn blind_hostile_wanders_even_next_to_the_player() {
        let fixture = Fixture::new(StubMap::open(8, 8));
        let mut blind = orc(Position::new(4, 4));
        blind.flags.insert(StatusFlags::BLIND);
        let state = state_with(Position::new(3, 3), vec![blind]);
        let mut controller = HostileController::new(IdleBehavior::Stationary);

        let action = decide(
            &mut controller,
            &fixture,
            &state,
            &StubPerception::everything(),
        );

        assert!(matches!(action, Some(Action::Move(_))), "{action:?}");
        assert_eq!(controller.memory.last_known, None);
    }

    #[test]
    fn searching_hostile_closes_in_on_last_known_spot() {
        let fixture = Fixture::new(StubMap::open(16, 16));
        let start = Position::new(4, 7);
        let spot = Position::new(10, 10);
        let state = state_with(Position::new(15, 0), vec![orc(start)]);
        let mut controller = HostileController::new(IdleBehavior::Stationary);
        controller.memory = PerceptionMemory {
            alert: AlertState::Alert,
            last_known: Some(spot),
        };

        let action = decide(
            &mut controller,
            &fixture,
            &state,
            &StubPerception::nothing(),
        );

        let Some(Action::PathMove(travel)) = action else {
            panic!("expected a path move, got {action:?}");
        };
        let next = travel.path().peek().unwrap();
        assert!(next.manhattan_distance(spot) < start.manhattan_distance(spot));
        assert_eq!(controller.alert(), AlertState::Searching);
    }

    #[test]
    fn reaching_last_known_spot_ends_the_search() {
        let fixture = Fixture::new(StubMap::open(16, 16));
        let spot = Position::new(10, 10);
        let state = state_with(Position::new(15, 0), vec![orc(spot)]);
        let mut controller = HostileController::new(IdleBehavior::Wander);
        controller.memory = PerceptionMemory {
            alert: AlertState::Searching,
            last_known: Some(spot),
        };

        let action = decide(
            &mut controller,
            &fixture,
            &state,
            &StubPerception::nothing(),
        );

        assert_eq!(action, None);
        assert_eq!(controller.memory, PerceptionMemory::default());
    }
}
