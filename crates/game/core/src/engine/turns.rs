//! End-of-turn processing: timed effects, energy-gated activations of every
//! non-player actor, perception refresh and the clock.

use crate::action::ActionContext;
use crate::ai::AiView;
use crate::config::GameConfig;
use crate::env::{GameEnv, PerceptionOracle, compute_seed};
use crate::error::GameError;
use crate::state::EntityId;

use super::{EventLog, ExecuteError, GameEngine, GameEvent};

/// What [`GameEngine::end_turn`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum TickKind {
    /// A bonus action was consumed: only perception was refreshed.
    Bonus,
    /// Effects ticked, every other actor acted and the clock advanced.
    Full,
}

impl<'a> GameEngine<'a> {
    /// Advances the world after a successful player action.
    ///
    /// A fast player banks `effective_speed / 100 - 1` bonus actions per full
    /// tick. While any remain, ending the turn only spends one and refreshes
    /// perception; nothing else moves.
    pub fn end_turn(
        &mut self,
        env: GameEnv<'_>,
        perception: &mut dyn PerceptionOracle,
        events: &mut EventLog,
    ) -> Result<TickKind, ExecuteError> {
        let map = env.map()?;

        if self.state.turn.bonus_actions > 0 {
            self.state.turn.bonus_actions -= 1;
            perception.refresh(self.state, map);
            return Ok(TickKind::Bonus);
        }

        self.tick_effects(events);

        for id in self.state.npc_ids() {
            self.activate(id, env, &*perception, events);
        }

        perception.refresh(self.state, map);
        self.state.turn.clock += 1;
        self.state.turn.bonus_actions = (self.state.player().effective_speed()
            / GameConfig::ACTION_ENERGY)
            .saturating_sub(1);

        Ok(TickKind::Full)
    }

    fn tick_effects(&mut self, events: &mut EventLog) {
        for actor in self.state.entities.all_actors_mut() {
            if !actor.is_alive() {
                continue;
            }
            for effect in actor.tick_effects() {
                events.push(GameEvent::EffectExpired {
                    actor: actor.id,
                    effect,
                });
            }
        }
    }

    /// Gives one actor its energy for this tick and lets it decide while it
    /// can afford an action.
    ///
    /// Energy is paid before the decision, so a failed or skipped action still
    /// costs a full activation and energy ends the tick in `0..100`.
    fn activate(
        &mut self,
        id: EntityId,
        env: GameEnv<'_>,
        perception: &dyn PerceptionOracle,
        events: &mut EventLog,
    ) {
        let player_position = self.state.player().position;
        let player_alive = self.state.player().is_alive();
        let Some(actor) = self.state.actor_mut(id) else {
            return;
        };
        if !actor.is_alive() || actor.controller.is_none() {
            return;
        }
        if actor.is_asleep() {
            if !(player_alive && actor.position.is_adjacent(player_position)) {
                return;
            }
            actor.wake();
            events.push(GameEvent::Woke { actor: id });
        }
        let gain = actor.effective_speed();
        actor.energy += gain;

        let mut activation: u32 = 0;
        loop {
            let Some(actor) = self.state.actor_mut(id) else {
                return;
            };
            if !actor.is_alive() || actor.energy < GameConfig::ACTION_ENERGY {
                return;
            }
            actor.energy -= GameConfig::ACTION_ENERGY;
            let Some(mut controller) = actor.controller.take() else {
                return;
            };

            let seed = compute_seed(
                self.state.game_seed,
                self.state.turn.clock.0,
                id.0,
                activation,
            );
            activation += 1;

            let was_confused = controller.is_confused();
            let decision = match self.state.actor(id) {
                Some(actor) => controller.decide(&AiView {
                    actor,
                    state: self.state,
                    env,
                    perception,
                    seed,
                }),
                None => None,
            };
            if was_confused && !controller.is_confused() {
                events.push(GameEvent::ConfusionEnded { actor: id });
            }
            if let Some(actor) = self.state.actor_mut(id) {
                actor.controller = Some(controller);
            }

            let Some(mut action) = decision else {
                continue;
            };
            let mut ctx = ActionContext::new(env, perception, events);
            if let Err(error) = action.perform(self.state, &mut ctx) {
                events.push(GameEvent::ActionFailed {
                    actor: id,
                    code: error.error_code(),
                    message: error.to_string(),
                });
            }
        }
    }
}
