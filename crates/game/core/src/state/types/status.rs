//! Timed status effects and the flags they grant.
//!
//! Effects count down in whole turns: the scheduler invokes the per-turn hook
//! once per full tick, and an effect whose counter reaches zero runs its expiry
//! hook (clearing the flag it granted) and is removed.
//!
//! Flags can also be set without a backing effect. A creature spawned asleep
//! carries `ASLEEP` with no duration and stays that way until something wakes
//! it.

use arrayvec::ArrayVec;
use bitflags::bitflags;

use crate::config::GameConfig;

bitflags! {
    /// Conditions currently affecting an actor.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct StatusFlags: u8 {
        /// Takes no decisions and accrues no energy.
        const ASLEEP = 1 << 0;
        /// Effective speed is doubled.
        const HASTED = 1 << 1;
        /// Hostile controllers cannot spot this actor.
        const INVISIBLE = 1 << 2;
        /// Cannot see anything; hostile controllers fall back to wandering.
        const BLIND = 1 << 3;
        /// Offense bonus while active.
        const ENRAGED = 1 << 4;
    }
}

/// Kinds of timed effect. Each one grants exactly one [`StatusFlags`] bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    Haste,
    Sleep,
    Invisibility,
    Blindness,
    Rage,
}

impl EffectKind {
    /// The flag this effect keeps raised while it is active.
    pub const fn flag(self) -> StatusFlags {
        match self {
            EffectKind::Haste => StatusFlags::HASTED,
            EffectKind::Sleep => StatusFlags::ASLEEP,
            EffectKind::Invisibility => StatusFlags::INVISIBLE,
            EffectKind::Blindness => StatusFlags::BLIND,
            EffectKind::Rage => StatusFlags::ENRAGED,
        }
    }
}

/// A single effect with its remaining duration in turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimedEffect {
    pub kind: EffectKind,
    pub turns_left: u32,
}

/// Active timed effects on an actor, at most one entry per kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimedEffects {
    effects: ArrayVec<TimedEffect, { GameConfig::MAX_TIMED_EFFECTS }>,
}

impl TimedEffects {
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimedEffect> {
        self.effects.iter()
    }

    pub fn has(&self, kind: EffectKind) -> bool {
        self.effects.iter().any(|effect| effect.kind == kind)
    }

    pub fn turns_left(&self, kind: EffectKind) -> Option<u32> {
        self.effects
            .iter()
            .find(|effect| effect.kind == kind)
            .map(|effect| effect.turns_left)
    }

    /// Adds an effect, or extends an existing one of the same kind.
    ///
    /// Re-applying never shortens a running effect. Returns `false` when the
    /// effect list is full and `kind` is not already present.
    pub fn apply(&mut self, kind: EffectKind, turns: u32) -> bool {
        if let Some(existing) = self.effects.iter_mut().find(|effect| effect.kind == kind) {
            existing.turns_left = existing.turns_left.max(turns);
            return true;
        }
        self.effects
            .try_push(TimedEffect {
                kind,
                turns_left: turns,
            })
            .is_ok()
    }

    /// Removes the effect of `kind`. Returns `true` if it was present.
    pub fn remove(&mut self, kind: EffectKind) -> bool {
        let before = self.effects.len();
        self.effects.retain(|effect| effect.kind != kind);
        self.effects.len() != before
    }

    /// Per-turn hook: decrements every effect and drops the ones that ran out.
    ///
    /// Returns the kinds that expired so the caller can run their expiry hooks.
    pub fn tick(&mut self) -> ArrayVec<EffectKind, { GameConfig::MAX_TIMED_EFFECTS }> {
        let mut expired = ArrayVec::new();
        for effect in self.effects.iter_mut() {
            effect.turns_left = effect.turns_left.saturating_sub(1);
            if effect.turns_left == 0 {
                expired.push(effect.kind);
            }
        }
        self.effects.retain(|effect| effect.turns_left > 0);
        expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reapplying_keeps_longest_duration() {
        let mut effects = TimedEffects::empty();
        assert!(effects.apply(EffectKind::Haste, 5));
        assert!(effects.apply(EffectKind::Haste, 2));

        assert_eq!(effects.len(), 1);
        assert_eq!(effects.turns_left(EffectKind::Haste), Some(5));
    }

    #[test]
    fn tick_reports_expired_effects() {
        let mut effects = TimedEffects::empty();
        effects.apply(EffectKind::Rage, 1);
        effects.apply(EffectKind::Blindness, 3);

        let expired = effects.tick();

        assert_eq!(expired.as_slice(), &[EffectKind::Rage]);
        assert!(!effects.has(EffectKind::Rage));
        assert_eq!(effects.turns_left(EffectKind::Blindness), Some(2));
    }

    #[test]
    fn each_kind_occupies_one_slot() {
        let mut effects = TimedEffects::empty();
        let kinds = [
            EffectKind::Haste,
            EffectKind::Sleep,
            EffectKind::Invisibility,
            EffectKind::Blindness,
            EffectKind::Rage,
        ];
        for kind in kinds {
            assert!(effects.apply(kind, 3));
        }
        assert_eq!(effects.len(), kinds.len());
        assert!(effects.apply(EffectKind::Rage, 9));
    }
}
