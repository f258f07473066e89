use crate::action::{ActionContext, ActionTransition, RepeatSignal};
use crate::combat::{apply_damage, resolve_attack};
use crate::config::GameConfig;
use crate::engine::GameEvent;
use crate::env::{OracleError, compute_seed};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{ActorState, EntityId, GameState};

/// Seed context of the critical roll.
const CRIT_ROLL: u32 = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum AttackStyle {
    Melee,
    Ranged,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AttackError {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("attacker {0} not found")]
    AttackerNotFound(EntityId),

    #[error("target {0} not found")]
    TargetNotFound(EntityId),

    #[error("target {0} is already dead")]
    TargetDead(EntityId),

    #[error("an actor cannot attack itself")]
    SelfTarget,

    #[error("target is {distance} tiles away, reach is {reach}")]
    OutOfReach { distance: u32, reach: u32 },

    #[error("actor {0} has no ranged attack")]
    NoRangedAttack(EntityId),

    #[error("target {0} is not in sight")]
    NotVisible(EntityId),
}

impl GameError for AttackError {
    fn severity(&self) -> ErrorSeverity {
        use AttackError::*;
        match self {
            Oracle(error) => error.severity(),
            AttackerNotFound(_) | NoRangedAttack(_) => ErrorSeverity::Internal,
            TargetNotFound(_) | TargetDead(_) | SelfTarget => ErrorSeverity::Validation,
            OutOfReach { .. } | NotVisible(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        use AttackError::*;
        match self {
            Oracle(error) => error.error_code(),
            AttackerNotFound(_) => "ATTACK_ATTACKER_NOT_FOUND",
            TargetNotFound(_) => "ATTACK_TARGET_NOT_FOUND",
            TargetDead(_) => "ATTACK_TARGET_DEAD",
            SelfTarget => "ATTACK_SELF_TARGET",
            OutOfReach { .. } => "ATTACK_OUT_OF_REACH",
            NoRangedAttack(_) => "ATTACK_NO_RANGED_ATTACK",
            NotVisible(_) => "ATTACK_NOT_VISIBLE",
        }
    }
}

/// Melee or ranged strike against one target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackAction {
    pub actor: EntityId,
    pub target: EntityId,
    pub style: AttackStyle,
}

impl AttackAction {
    pub fn melee(actor: EntityId, target: EntityId) -> Self {
        Self {
            actor,
            target,
            style: AttackStyle::Melee,
        }
    }

    pub fn ranged(actor: EntityId, target: EntityId) -> Self {
        Self {
            actor,
            target,
            style: AttackStyle::Ranged,
        }
    }

    fn participants<'s>(
        &self,
        state: &'s GameState,
    ) -> Result<(&'s ActorState, &'s ActorState), AttackError> {
        let attacker = state
            .actor(self.actor)
            .ok_or(AttackError::AttackerNotFound(self.actor))?;
        let target = state
            .actor(self.target)
            .ok_or(AttackError::TargetNotFound(self.target))?;
        Ok((attacker, target))
    }
}

impl ActionTransition for AttackAction {
    type Error = AttackError;

    fn actor(&self) -> EntityId {
        self.actor
    }

    fn pre_validate(&self, state: &GameState, ctx: &ActionContext<'_>) -> Result<(), Self::Error> {
        if self.actor == self.target {
            return Err(AttackError::SelfTarget);
        }
        let (attacker, target) = self.participants(state)?;
        if !target.is_alive() {
            return Err(AttackError::TargetDead(self.target));
        }

        let distance = attacker.position.chebyshev_distance(target.position);
        let reach = match self.style {
            AttackStyle::Melee => GameConfig::MELEE_RANGE,
            AttackStyle::Ranged => {
                let ranged = attacker
                    .combat
                    .ranged
                    .ok_or(AttackError::NoRangedAttack(self.actor))?;
                if !ctx.perception.is_visible(attacker, target.position) {
                    return Err(AttackError::NotVisible(self.target));
                }
                ranged.range
            }
        };
        if distance > reach {
            return Err(AttackError::OutOfReach { distance, reach });
        }
        Ok(())
    }

    fn apply(
        &mut self,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<RepeatSignal, Self::Error> {
        let items = ctx.env.items_opt();
        let rng = ctx.env.rng()?;
        let (attacker, target) = self.participants(state)?;

        let offense = match self.style {
            AttackStyle::Melee => attacker.offense(items),
            AttackStyle::Ranged => attacker
                .ranged_offense(items)
                .ok_or(AttackError::NoRangedAttack(self.actor))?,
        };
        let defense = target.defense(items);
        let seed = compute_seed(state.game_seed, state.turn.nonce, self.actor.0, CRIT_ROLL);
        let (damage, critical) = resolve_attack(
            offense,
            defense,
            attacker.combat.crit_chance,
            attacker.combat.crit_multiplier,
            rng,
            seed,
        );

        ctx.events.push(GameEvent::Attacked {
            attacker: self.actor,
            target: self.target,
            damage,
            critical,
            ranged: self.style == AttackStyle::Ranged,
        });
        apply_damage(state, ctx.events, self.target, damage)
            .ok_or(AttackError::TargetNotFound(self.target))?;
        Ok(RepeatSignal::Stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::resolve;
    use crate::engine::EventLog;
    use crate::state::{CombatProfile, Faction, Position, ResourceMeter};
    use crate::testing::{Fixture, StubMap, StubPerception, state_with};

    fn archer() -> ActorState {
        ActorState::new(EntityId(0), "archer", Position::new(6, 1))
            .with_faction(Faction::Monster)
            .with_combat(CombatProfile::new(1, 0).with_ranged(5, 4).with_crit(0, 150))
            .with_health(8)
    }

    #[test]
    fn melee_needs_adjacency() {
        let fixture = Fixture::new(StubMap::open(10, 3));
        let perception = StubPerception::everything();
        let mut events = EventLog::new();
        let state = state_with(Position::new(1, 1), vec![archer()]);
        let ctx = ActionContext::new(fixture.env(), &perception, &mut events);

        assert_eq!(
            AttackAction::melee(EntityId(1), EntityId::PLAYER).pre_validate(&state, &ctx),
            Err(AttackError::OutOfReach {
                distance: 5,
                reach: 1
            })
        );
    }

    #[test]
    fn ranged_needs_sight() {
        let fixture = Fixture::new(StubMap::open(10, 3));
        let mut perception = StubPerception::nothing();
        let mut events = EventLog::new();
        let mut state = state_with(Position::new(1, 1), vec![archer()]);

        {
            let ctx = ActionContext::new(fixture.env(), &perception, &mut events);
            assert_eq!(
                AttackAction::ranged(EntityId(1), EntityId::PLAYER).pre_validate(&state, &ctx),
                Err(AttackError::NotVisible(EntityId::PLAYER))
            );
        }

        perception.reveal(Position::new(1, 1));
        let mut ctx = ActionContext::new(fixture.env(), &perception, &mut events);
        resolve(
            &mut AttackAction::ranged(EntityId(1), EntityId::PLAYER),
            &mut state,
            &mut ctx,
        )
        .unwrap();
        assert_eq!(state.player().health.current, 26);
    }

    #[test]
    fn ranged_attack_without_a_launcher_is_internal() {
        let fixture = Fixture::new(StubMap::open(10, 3));
        let perception = StubPerception::everything();
        let mut events = EventLog::new();
        let brute = ActorState::new(EntityId(0), "brute", Position::new(4, 1))
            .with_faction(Faction::Monster)
            .with_combat(CombatProfile::new(3, 0));
        let state = state_with(Position::new(1, 1), vec![brute]);
        let ctx = ActionContext::new(fixture.env(), &perception, &mut events);

        let error = AttackAction::ranged(EntityId(1), EntityId::PLAYER)
            .pre_validate(&state, &ctx)
            .unwrap_err();

        assert_eq!(error, AttackError::NoRangedAttack(EntityId(1)));
        assert_eq!(error.severity(), ErrorSeverity::Internal);
        assert!(error.severity().is_internal());
    }

    #[test]
    fn replaying_a_seed_reproduces_health_deltas() {
        let fixture = Fixture::new(StubMap::open(4, 3));
        let perception = StubPerception::everything();
        let brute = ActorState::new(EntityId(0), "brute", Position::new(2, 1))
            .with_faction(Faction::Monster)
            .with_combat(CombatProfile::new(6, 0).with_crit(50, 200))
            .with_health(40);

        let run = |seed: u64| {
            let mut state = state_with(Position::new(1, 1), vec![brute.clone()]);
            state.game_seed = seed;
            state.entities.player.health = ResourceMeter::full(100);
            let mut events = EventLog::new();
            let mut ctx = ActionContext::new(fixture.env(), &perception, &mut events);
            let mut trace = Vec::new();
            for nonce in 0..5 {
                state.turn.nonce = nonce;
                resolve(
                    &mut AttackAction::melee(EntityId(1), EntityId::PLAYER),
                    &mut state,
                    &mut ctx,
                )
                .unwrap();
                trace.push(state.player().health.current);
            }
            trace
        };

        assert_eq!(run(1234), run(1234));
    }
}
