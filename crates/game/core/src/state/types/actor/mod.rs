//! Actor state: position, combat profile, energy, effects and carried items.

mod inventory;

pub use inventory::{InventorySlot, InventoryState};

use arrayvec::ArrayVec;

use crate::ai::Controller;
use crate::config::GameConfig;
use crate::env::{EquipmentData, ItemOracle};
use crate::state::types::{
    EffectKind, EntityId, ItemHandle, Position, ResourceMeter, StatusFlags, TimedEffects,
};

/// Allegiance used to decide who attacks whom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Faction {
    #[default]
    Adventurer,
    Monster,
}

/// Optional ranged capability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangedProfile {
    /// Maximum Chebyshev distance of a shot.
    pub range: u32,
    /// Base offense of a shot; equipment and rage bonuses apply on top.
    pub offense: u32,
}

/// Base combat values. Equipment bonuses are never folded in here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatProfile {
    pub offense: u32,
    pub defense: u32,
    /// Critical-hit chance in percent (0..=100).
    pub crit_chance: u8,
    /// Critical-hit multiplier in percent (150 = ×1.5).
    pub crit_multiplier: u16,
    pub ranged: Option<RangedProfile>,
}

impl CombatProfile {
    pub const fn new(offense: u32, defense: u32) -> Self {
        Self {
            offense,
            defense,
            crit_chance: GameConfig::DEFAULT_CRIT_CHANCE,
            crit_multiplier: GameConfig::DEFAULT_CRIT_MULTIPLIER,
            ranged: None,
        }
    }

    #[must_use]
    pub const fn with_crit(mut self, chance: u8, multiplier: u16) -> Self {
        self.crit_chance = chance;
        self.crit_multiplier = multiplier;
        self
    }

    #[must_use]
    pub const fn with_ranged(mut self, range: u32, offense: u32) -> Self {
        self.ranged = Some(RangedProfile { range, offense });
        self
    }
}

impl Default for CombatProfile {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

/// A living creature on the current floor (or the player, alive or not).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorState {
    pub id: EntityId,
    pub name: String,
    pub faction: Faction,
    pub position: Position,
    pub health: ResourceMeter,
    pub combat: CombatProfile,
    /// Energy gained per full tick; 100 is one decision per tick.
    pub speed: u32,
    /// Kept in `0..ACTION_ENERGY` between dispatch passes.
    pub energy: u32,
    pub effects: TimedEffects,
    pub flags: StatusFlags,
    /// `None` for the player and for actors that never act on their own.
    pub controller: Option<Controller>,
    pub inventory: InventoryState,
}

impl ActorState {
    pub fn new(id: EntityId, name: impl Into<String>, position: Position) -> Self {
        Self {
            id,
            name: name.into(),
            faction: Faction::default(),
            position,
            health: ResourceMeter::full(1),
            combat: CombatProfile::default(),
            speed: GameConfig::BASE_SPEED,
            energy: 0,
            effects: TimedEffects::empty(),
            flags: StatusFlags::empty(),
            controller: None,
            inventory: InventoryState::default(),
        }
    }

    #[must_use]
    pub fn with_faction(mut self, faction: Faction) -> Self {
        self.faction = faction;
        self
    }

    #[must_use]
    pub fn with_health(mut self, maximum: u32) -> Self {
        self.health = ResourceMeter::full(maximum);
        self
    }

    #[must_use]
    pub fn with_combat(mut self, combat: CombatProfile) -> Self {
        self.combat = combat;
        self
    }

    #[must_use]
    pub fn with_speed(mut self, speed: u32) -> Self {
        self.speed = speed;
        self
    }

    #[must_use]
    pub fn with_controller(mut self, controller: Controller) -> Self {
        self.controller = Some(controller);
        self
    }

    #[must_use]
    pub fn with_inventory(mut self, inventory: InventoryState) -> Self {
        self.inventory = inventory;
        self
    }

    #[must_use]
    pub fn asleep(mut self) -> Self {
        self.flags.insert(StatusFlags::ASLEEP);
        self
    }

    pub fn is_alive(&self) -> bool {
        !self.health.is_empty()
    }

    pub fn is_asleep(&self) -> bool {
        self.flags.contains(StatusFlags::ASLEEP)
    }

    pub fn is_hostile_to(&self, other: &ActorState) -> bool {
        self.faction != other.faction
    }

    /// Energy gained per full tick, doubled while hasted.
    pub fn effective_speed(&self) -> u32 {
        if self.flags.contains(StatusFlags::HASTED) {
            self.speed.saturating_mul(2)
        } else {
            self.speed
        }
    }

    // ========================================================================
    // Derived combat values
    // ========================================================================

    /// Melee offense: base plus equipment, then the rage bonus.
    pub fn offense(&self, items: Option<&dyn ItemOracle>) -> u32 {
        let bonus: u32 = self.equipment(items).map(|data| data.offense_bonus).sum();
        self.enrage(self.combat.offense + bonus)
    }

    /// Ranged offense, or `None` without a ranged capability.
    pub fn ranged_offense(&self, items: Option<&dyn ItemOracle>) -> Option<u32> {
        let ranged = self.combat.ranged?;
        let bonus: u32 = self.equipment(items).map(|data| data.offense_bonus).sum();
        Some(self.enrage(ranged.offense + bonus))
    }

    pub fn defense(&self, items: Option<&dyn ItemOracle>) -> u32 {
        let bonus: u32 = self.equipment(items).map(|data| data.defense_bonus).sum();
        self.combat.defense + bonus
    }

    fn enrage(&self, offense: u32) -> u32 {
        if self.flags.contains(StatusFlags::ENRAGED) {
            offense + offense * GameConfig::RAGE_OFFENSE_PERCENT / 100
        } else {
            offense
        }
    }

    fn equipment<'a>(
        &'a self,
        items: Option<&'a dyn ItemOracle>,
    ) -> impl Iterator<Item = EquipmentData> + 'a {
        self.inventory.equipped().filter_map(move |handle: ItemHandle| {
            items
                .and_then(|oracle| oracle.definition(handle))
                .and_then(|definition| definition.equipment())
        })
    }

    // ========================================================================
    // Effects
    // ========================================================================

    /// Starts (or extends) a timed effect and raises its flag.
    pub fn apply_effect(&mut self, kind: EffectKind, turns: u32) -> bool {
        let applied = self.effects.apply(kind, turns);
        if applied {
            self.flags.insert(kind.flag());
        }
        applied
    }

    /// Ends a timed effect early, clearing its flag.
    pub fn remove_effect(&mut self, kind: EffectKind) -> bool {
        self.flags.remove(kind.flag());
        self.effects.remove(kind)
    }

    /// Clears sleep from any source. Returns `true` if the actor was asleep.
    pub fn wake(&mut self) -> bool {
        let was_asleep = self.is_asleep();
        self.remove_effect(EffectKind::Sleep);
        was_asleep
    }

    /// Runs the per-turn hook of every effect and the expiry hook of those
    /// that ran out. Returns the expired kinds.
    pub fn tick_effects(&mut self) -> ArrayVec<EffectKind, { GameConfig::MAX_TIMED_EFFECTS }> {
        let expired = self.effects.tick();
        for kind in &expired {
            self.flags.remove(kind.flag());
        }
        expired
    }
}

impl Default for ActorState {
    fn default() -> Self {
        Self::new(EntityId::PLAYER, "player", Position::ORIGIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{ItemDefinition, ItemKind};
    use crate::testing::StubItems;

    #[test]
    fn haste_doubles_effective_speed_until_expiry() {
        let mut actor = ActorState::default().with_speed(100);
        actor.apply_effect(EffectKind::Haste, 1);
        assert_eq!(actor.effective_speed(), 200);

        let expired = actor.tick_effects();

        assert_eq!(expired.as_slice(), &[EffectKind::Haste]);
        assert_eq!(actor.effective_speed(), 100);
    }

    #[test]
    fn derived_stats_include_equipped_items_only() {
        let items = StubItems::new()
            .with(ItemHandle(1), ItemDefinition::new("sword", ItemKind::weapon(3)))
            .with(ItemHandle(2), ItemDefinition::new("mail", ItemKind::armor(2)));
        let mut actor = ActorState::default().with_combat(CombatProfile::new(4, 1));
        actor.inventory.add(ItemHandle(1)).unwrap();
        actor.inventory.add(ItemHandle(2)).unwrap();

        assert_eq!(actor.offense(Some(&items)), 4);
        assert_eq!(actor.defense(Some(&items)), 1);

        actor.inventory.get_mut(0).unwrap().equipped = true;
        actor.inventory.get_mut(1).unwrap().equipped = true;

        assert_eq!(actor.offense(Some(&items)), 7);
        assert_eq!(actor.defense(Some(&items)), 3);
        assert_eq!(actor.offense(None), 4);
    }

    #[test]
    fn rage_boosts_offense() {
        let mut actor = ActorState::default().with_combat(CombatProfile::new(10, 0));
        actor.apply_effect(EffectKind::Rage, 3);

        assert_eq!(actor.offense(None), 15);
    }

    #[test]
    fn waking_clears_flag_without_effect() {
        let mut actor = ActorState::default().asleep();

        assert!(actor.wake());
        assert!(!actor.is_asleep());
        assert!(!actor.wake());
    }
}
