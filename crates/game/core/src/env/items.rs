use crate::state::{EffectKind, ItemHandle};

pub trait ItemOracle: Send + Sync {
    fn definition(&self, handle: ItemHandle) -> Option<ItemDefinition>;
}

/// Item definition: display name plus type-specific data.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub name: String,
    pub kind: ItemKind,
}

impl ItemDefinition {
    pub fn new(name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn equipment(&self) -> Option<EquipmentData> {
        match self.kind {
            ItemKind::Equipment(data) => Some(data),
            ItemKind::Consumable(_) => None,
        }
    }

    pub fn consumable(&self) -> Option<ConsumableEffect> {
        match self.kind {
            ItemKind::Consumable(effect) => Some(effect),
            ItemKind::Equipment(_) => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    /// Used up on use.
    Consumable(ConsumableEffect),
    /// Worn or wielded; contributes bonuses while equipped.
    Equipment(EquipmentData),
}

impl ItemKind {
    pub const fn weapon(offense_bonus: u32) -> Self {
        ItemKind::Equipment(EquipmentData {
            slot: EquipSlot::Weapon,
            offense_bonus,
            defense_bonus: 0,
        })
    }

    pub const fn armor(defense_bonus: u32) -> Self {
        ItemKind::Equipment(EquipmentData {
            slot: EquipSlot::Armor,
            offense_bonus: 0,
            defense_bonus,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipSlot {
    Weapon,
    Armor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipmentData {
    pub slot: EquipSlot,
    pub offense_bonus: u32,
    pub defense_bonus: u32,
}

/// What happens when a consumable is used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConsumableEffect {
    /// Restores health to the user.
    Heal { amount: u32 },
    /// Starts a timed effect on the user.
    Grant { effect: EffectKind, turns: u32 },
    /// Confuses a chosen visible target within range.
    Confuse { turns: u32, range: u32 },
    /// Strikes the closest visible hostile within range.
    Bolt { damage: u32, range: u32 },
}

impl ConsumableEffect {
    /// Whether the user has to pick a target before using the item.
    pub fn needs_target(self) -> bool {
        matches!(self, ConsumableEffect::Confuse { .. })
    }
}
