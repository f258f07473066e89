//! Attack resolution and damage application.

use crate::engine::{EventLog, GameEvent};
use crate::env::RngOracle;
use crate::state::{EntityId, GameState};

use super::damage::{calculate_damage, is_critical};

/// Outcome of one resolved hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResult {
    pub damage: u32,
    pub critical: bool,
    pub killed: bool,
}

/// Rolls the critical check and computes damage. Pure: the same seed and
/// inputs always give the same `(damage, critical)` pair.
pub fn resolve_attack(
    offense: u32,
    defense: u32,
    crit_chance: u8,
    crit_multiplier: u16,
    rng: &(impl RngOracle + ?Sized),
    seed: u64,
) -> (u32, bool) {
    let critical = is_critical(rng, seed, crit_chance);
    (
        calculate_damage(offense, defense, critical, crit_multiplier),
        critical,
    )
}

/// Removes health from `target`, waking it. At zero health the target dies:
/// an NPC leaves the roster as a corpse, the player stays with empty health.
///
/// Returns `Some(killed)`, or `None` when `target` is not in the roster.
pub fn apply_damage(
    state: &mut GameState,
    events: &mut EventLog,
    target: EntityId,
    amount: u32,
) -> Option<bool> {
    let actor = state.actor_mut(target)?;
    actor.health.drain(amount);
    if amount > 0 && actor.wake() {
        events.push(GameEvent::Woke { actor: target });
    }
    if actor.is_alive() {
        return Some(false);
    }

    let position = actor.position;
    state.slay(target);
    events.push(GameEvent::Died {
        actor: target,
        position,
    });
    Some(true)
}
