//! Turn scheduling and action execution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. The
//! player submits one action at a time; once it succeeds the engine ends the
//! turn, letting every other actor spend its accumulated energy before
//! perception is refreshed and the clock advances. All mutations, player and
//! non-player alike, flow through the same three-phase transition pipeline.

mod errors;
mod events;
mod roster;
mod transition;
mod turns;

pub use errors::{ExecuteError, SpawnError, TransitionPhase, TransitionPhaseError};
pub use events::{EventLog, GameEvent};
pub use turns::TickKind;

pub(crate) use transition::execute_transition;

use crate::action::{Action, ActionContext, RepeatSignal};
use crate::env::{ConfigOracle, GameEnv, PerceptionOracle};
use crate::state::{EntityId, GameState};

/// Why an automated run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The action signalled `Stop` or `Halt` on its own.
    Completed,
    /// A hop was rejected. Only the first hop of a run costs nothing.
    Failed(ExecuteError),
    /// An actor that was not visible at the start of the run came into view.
    ThreatSpotted(EntityId),
    /// The host asked the run to stop.
    Interrupted,
    /// The configured step limit was reached.
    StepLimit,
    PlayerDied,
}

/// Summary of [`GameEngine::run_player_action`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    /// Hops that were performed and paid for with a turn.
    pub steps: u32,
    pub stop: StopReason,
}

/// Game engine that manages action execution, turn scheduling, and game logic.
///
/// All state mutations flow through the three-phase action pipeline:
/// pre_validate → apply → post_validate
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    /// Creates a new game engine with the given state.
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Extra player actions granted before the next full tick.
    pub fn bonus_actions(&self) -> u32 {
        self.state.turn.bonus_actions
    }

    /// Performs one player action and, if it succeeded, ends the turn.
    ///
    /// A rejected action leaves the state untouched and spends no time, and so
    /// does one that answers [`RepeatSignal::Halt`].
    pub fn submit_player_action(
        &mut self,
        env: GameEnv<'_>,
        perception: &mut dyn PerceptionOracle,
        events: &mut EventLog,
        action: &mut Action,
    ) -> Result<RepeatSignal, ExecuteError> {
        if !self.state.player().is_alive() {
            return Err(ExecuteError::ActorDead(EntityId::PLAYER));
        }
        let actor = action.actor();
        if !actor.is_player() {
            return Err(ExecuteError::NotPlayerAction { actor });
        }

        let signal = {
            let mut ctx = ActionContext::new(env, &*perception, events);
            action.perform(self.state, &mut ctx)?
        };

        if signal.is_acted() {
            self.end_turn(env, perception, events)?;
        }
        Ok(signal)
    }

    /// Keeps submitting `action` while it asks to be repeated.
    ///
    /// After every hop the whole world takes its turn, then the run halts if
    /// the player died, a new threat came into view, the action is done, the
    /// step limit is hit, or `interrupt` returns `true`.
    pub fn run_player_action<F>(
        &mut self,
        env: GameEnv<'_>,
        perception: &mut dyn PerceptionOracle,
        events: &mut EventLog,
        mut action: Action,
        mut interrupt: F,
    ) -> RunReport
    where
        F: FnMut(&GameState) -> bool,
    {
        let limit = env
            .config()
            .map(|config| config.max_auto_steps())
            .unwrap_or(crate::config::GameConfig::DEFAULT_MAX_AUTO_STEPS);
        let mut steps = 0;

        loop {
            let signal = match self.submit_player_action(env, perception, events, &mut action) {
                Ok(signal) => signal,
                Err(error) => {
                    return RunReport {
                        steps,
                        stop: StopReason::Failed(error),
                    };
                }
            };
            if !signal.is_acted() {
                return RunReport {
                    steps,
                    stop: StopReason::Completed,
                };
            }
            steps += 1;

            let stop = if !self.state.player().is_alive() {
                Some(StopReason::PlayerDied)
            } else if let Some(spotted) = action.spotted_threat(self.state, &*perception) {
                events.push(GameEvent::ThreatSpotted {
                    actor: action.actor(),
                    spotted,
                });
                Some(StopReason::ThreatSpotted(spotted))
            } else if !signal.is_repeat() {
                Some(StopReason::Completed)
            } else if steps >= limit {
                Some(StopReason::StepLimit)
            } else if interrupt(self.state) {
                Some(StopReason::Interrupted)
            } else {
                None
            };

            if let Some(stop) = stop {
                return RunReport { steps, stop };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Direction;
    use crate::ai::{Controller, IdleBehavior};
    use crate::state::{ActorState, CombatProfile, Faction, Position, ResourceMeter};
    use crate::testing::{Fixture, StubMap, StubPerception, state_with};

    fn corridor() -> StubMap {
        StubMap::parse(&["###########", "#.........#", "###########"])
    }

    fn lurker(at: Position) -> ActorState {
        ActorState::new(EntityId(1), "lurker", at)
            .with_faction(Faction::Monster)
            .with_health(5)
            .with_controller(Controller::stationary())
    }

    #[test]
    fn careful_run_halts_when_a_new_actor_comes_into_view() {
        let fixture = Fixture::new(corridor());
        let mut state = state_with(Position::new(1, 1), vec![lurker(Position::new(9, 1))]);
        let mut perception = StubPerception::radius(3);
        let mut events = EventLog::new();
        let mut engine = GameEngine::new(&mut state);

        let report = engine.run_player_action(
            fixture.env(),
            &mut perception,
            &mut events,
            Action::careful_run(EntityId::PLAYER, Direction::East),
            |_| false,
        );

        assert_eq!(report.stop, StopReason::ThreatSpotted(EntityId(1)));
        assert_eq!(report.steps, 5);
        assert_eq!(engine.state().player().position, Position::new(6, 1));
        assert!(events.iter().any(|event| *event
            == GameEvent::ThreatSpotted {
                actor: EntityId::PLAYER,
                spotted: EntityId(1),
            }));
    }

    #[test]
    fn plain_run_ignores_new_actors_and_stops_next_to_them() {
        let fixture = Fixture::new(corridor());
        let mut state = state_with(Position::new(1, 1), vec![lurker(Position::new(9, 1))]);
        let mut perception = StubPerception::radius(3);
        let mut events = EventLog::new();
        let mut engine = GameEngine::new(&mut state);

        let report = engine.run_player_action(
            fixture.env(),
            &mut perception,
            &mut events,
            Action::run(EntityId::PLAYER, Direction::East),
            |_| false,
        );

        assert_eq!(report.stop, StopReason::Completed);
        assert_eq!(report.steps, 7);
        assert_eq!(engine.state().player().position, Position::new(8, 1));
    }

    #[test]
    fn run_blocked_by_a_chaser_pays_only_for_hops_taken() {
        let runs: [fn(EntityId, Direction) -> Action; 2] = [Action::run, Action::careful_run];
        let cases = runs
            .into_iter()
            .flat_map(|run| [100, 200, 300].map(|speed| (run, speed)));
        for (run, speed) in cases {
            for start in 3..=9 {
                let fixture = Fixture::new(corridor());
                let chaser = ActorState::new(EntityId(1), "chaser", Position::new(start, 1))
                    .with_faction(Faction::Monster)
                    .with_health(10)
                    .with_speed(speed)
                    .with_combat(CombatProfile::new(1, 0))
                    .with_controller(Controller::hostile(IdleBehavior::Stationary));
                let mut state = state_with(Position::new(1, 1), vec![chaser]);
                let mut perception = StubPerception::everything();
                let mut events = EventLog::new();
                let mut engine = GameEngine::new(&mut state);

                let report = engine.run_player_action(
                    fixture.env(),
                    &mut perception,
                    &mut events,
                    run(EntityId::PLAYER, Direction::East),
                    |_| false,
                );

                let moved = (engine.state().player().position.x - 1) as u32;
                assert_eq!(report.stop, StopReason::Completed, "speed {speed} start {start}");
                assert_eq!(report.steps, moved, "speed {speed} start {start}");
                assert_eq!(
                    engine.state().turn.clock.0,
                    u64::from(moved),
                    "speed {speed} start {start}"
                );
            }
        }
    }

    #[test]
    fn halted_run_spends_no_turn() {
        let fixture = Fixture::new(corridor());
        let wall = ActorState::new(EntityId(1), "statue", Position::new(3, 1))
            .with_faction(Faction::Monster)
            .with_health(10);
        let mut state = state_with(Position::new(1, 1), vec![wall]);
        let mut perception = StubPerception::nothing();
        let mut events = EventLog::new();
        let mut action = Action::run(EntityId::PLAYER, Direction::East);
        let mut engine = GameEngine::new(&mut state);

        // First hop to (2,1) succeeds and sees the statue ahead.
        assert_eq!(
            engine.submit_player_action(fixture.env(), &mut perception, &mut events, &mut action),
            Ok(RepeatSignal::Stop)
        );
        // Submitting the finished run again finds the lane taken.
        assert_eq!(
            engine.submit_player_action(fixture.env(), &mut perception, &mut events, &mut action),
            Ok(RepeatSignal::Halt)
        );
        assert_eq!(engine.state().turn.clock.0, 1);
        assert_eq!(engine.state().turn.nonce, 1);
        assert_eq!(engine.state().player().position, Position::new(2, 1));
    }

    #[test]
    fn step_limit_caps_a_run() {
        let mut fixture = Fixture::new(StubMap::open(30, 3));
        fixture.config.max_auto_steps = 4;
        let mut state = state_with(Position::new(1, 1), vec![]);
        let mut perception = StubPerception::nothing();
        let mut events = EventLog::new();
        let mut engine = GameEngine::new(&mut state);

        let report = engine.run_player_action(
            fixture.env(),
            &mut perception,
            &mut events,
            Action::run(EntityId::PLAYER, Direction::East),
            |_| false,
        );

        assert_eq!(report.stop, StopReason::StepLimit);
        assert_eq!(report.steps, 4);
        assert_eq!(engine.state().turn.clock.0, 4);
    }

    #[test]
    fn run_ends_when_the_player_dies() {
        let fixture = Fixture::new(StubMap::open(10, 5));
        let brute = ActorState::new(EntityId(1), "brute", Position::new(1, 1))
            .with_faction(Faction::Monster)
            .with_health(20)
            .with_speed(200)
            .with_combat(CombatProfile::new(50, 0))
            .with_controller(Controller::hostile(IdleBehavior::Stationary));
        let mut state = state_with(Position::new(2, 2), vec![brute]);
        state.entities.player.health = ResourceMeter::new(1, 30);
        let mut perception = StubPerception::everything();
        let mut events = EventLog::new();
        let mut engine = GameEngine::new(&mut state);

        let report = engine.run_player_action(
            fixture.env(),
            &mut perception,
            &mut events,
            Action::run(EntityId::PLAYER, Direction::East),
            |_| false,
        );

        assert_eq!(report.stop, StopReason::PlayerDied);
        assert_eq!(report.steps, 1);
        assert!(!engine.state().player().is_alive());
        assert_eq!(
            engine.submit_player_action(
                fixture.env(),
                &mut perception,
                &mut events,
                &mut Action::wait(EntityId::PLAYER),
            ),
            Err(ExecuteError::ActorDead(EntityId::PLAYER))
        );
    }
}
