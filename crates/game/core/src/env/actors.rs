//! Actor template definitions and oracle interface.
//!
//! Content collaborators serve [`ActorTemplate`]s by definition id (e.g.
//! `"orc"`). The core never loads them itself; it only validates a template
//! and clones it into an [`ActorState`] at spawn time. A template that fails
//! validation never reaches the roster.

use crate::ai::{Controller, ControllerKind};
use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{
    ActorState, CombatProfile, EntityId, Faction, InventoryState, Position, ResourceMeter,
};

/// Provides actor templates by definition id.
pub trait ActorOracle: Send + Sync {
    fn template(&self, def_id: &str) -> Option<ActorTemplate>;
}

/// Initial stats and behavior of a kind of creature.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorTemplate {
    pub name: String,
    pub faction: Faction,
    pub max_health: u32,
    pub combat: CombatProfile,
    pub speed: u32,
    pub controller: ControllerKind,
    pub starts_asleep: bool,
    pub inventory_capacity: u8,
}

impl ActorTemplate {
    /// Create a builder for constructing actor templates
    pub fn builder(name: impl Into<String>) -> ActorTemplateBuilder {
        ActorTemplateBuilder::new(name)
    }

    /// Rejects templates that would break actor invariants.
    pub fn validate(&self) -> Result<(), TemplateError> {
        if self.name.trim().is_empty() {
            return Err(TemplateError::MissingName);
        }
        if self.max_health == 0 {
            return Err(TemplateError::ZeroHealth);
        }
        if self.speed == 0 {
            return Err(TemplateError::ZeroSpeed);
        }
        if self.combat.crit_chance > 100 {
            return Err(TemplateError::CritChanceOutOfRange(self.combat.crit_chance));
        }
        if self.combat.crit_multiplier < 100 {
            return Err(TemplateError::CritMultiplierTooLow(
                self.combat.crit_multiplier,
            ));
        }
        if self
            .combat
            .ranged
            .is_some_and(|ranged| ranged.range <= GameConfig::MELEE_RANGE)
        {
            return Err(TemplateError::RangedReachTooShort);
        }
        if self.inventory_capacity as usize > GameConfig::MAX_INVENTORY_SLOTS {
            return Err(TemplateError::InventoryTooLarge(self.inventory_capacity));
        }
        Ok(())
    }

    /// Create a new actor from this template with the given id and position.
    ///
    /// Does not validate; callers go through [`ActorTemplate::validate`] first.
    pub fn to_actor(&self, id: EntityId, position: Position) -> ActorState {
        let mut actor = ActorState::new(id, self.name.clone(), position)
            .with_faction(self.faction)
            .with_combat(self.combat)
            .with_speed(self.speed)
            .with_inventory(InventoryState::with_capacity(self.inventory_capacity));
        actor.health = ResourceMeter::full(self.max_health);
        actor.controller = Controller::from_kind(self.controller);
        if self.starts_asleep {
            actor = actor.asleep();
        }
        actor
    }
}

/// Builder for constructing actor templates.
pub struct ActorTemplateBuilder {
    template: ActorTemplate,
}

impl ActorTemplateBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            template: ActorTemplate {
                name: name.into(),
                faction: Faction::Monster,
                max_health: 10,
                combat: CombatProfile::default(),
                speed: GameConfig::BASE_SPEED,
                controller: ControllerKind::default(),
                starts_asleep: false,
                inventory_capacity: 0,
            },
        }
    }

    pub fn faction(mut self, faction: Faction) -> Self {
        self.template.faction = faction;
        self
    }

    pub fn health(mut self, max_health: u32) -> Self {
        self.template.max_health = max_health;
        self
    }

    pub fn combat(mut self, combat: CombatProfile) -> Self {
        self.template.combat = combat;
        self
    }

    pub fn speed(mut self, speed: u32) -> Self {
        self.template.speed = speed;
        self
    }

    pub fn controller(mut self, controller: ControllerKind) -> Self {
        self.template.controller = controller;
        self
    }

    pub fn asleep(mut self) -> Self {
        self.template.starts_asleep = true;
        self
    }

    pub fn inventory_capacity(mut self, capacity: u8) -> Self {
        self.template.inventory_capacity = capacity;
        self
    }

    pub fn build(self) -> ActorTemplate {
        self.template
    }
}

/// Data-integrity failures in a template.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("template has no name")]
    MissingName,

    #[error("template has zero maximum health")]
    ZeroHealth,

    #[error("template has zero speed")]
    ZeroSpeed,

    #[error("critical chance {0}% is above 100%")]
    CritChanceOutOfRange(u8),

    #[error("critical multiplier {0}% is below 100%")]
    CritMultiplierTooLow(u16),

    #[error("ranged attack does not reach past melee range")]
    RangedReachTooShort,

    #[error("inventory capacity {0} exceeds the slot limit")]
    InventoryTooLarge(u8),
}

impl GameError for TemplateError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use TemplateError::*;
        match self {
            MissingName => "TEMPLATE_MISSING_NAME",
            ZeroHealth => "TEMPLATE_ZERO_HEALTH",
            ZeroSpeed => "TEMPLATE_ZERO_SPEED",
            CritChanceOutOfRange(_) => "TEMPLATE_CRIT_CHANCE_OUT_OF_RANGE",
            CritMultiplierTooLow(_) => "TEMPLATE_CRIT_MULTIPLIER_TOO_LOW",
            RangedReachTooShort => "TEMPLATE_RANGED_REACH_TOO_SHORT",
            InventoryTooLarge(_) => "TEMPLATE_INVENTORY_TOO_LARGE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::IdleBehavior;
    use crate::state::StatusFlags;

    #[test]
    fn spawned_actor_copies_template_stats() {
        let template = ActorTemplate::builder("troll")
            .health(16)
            .combat(CombatProfile::new(4, 1).with_crit(30, 150))
            .speed(50)
            .controller(ControllerKind::Hostile {
                idle: IdleBehavior::Wander,
            })
            .asleep()
            .build();
        template.validate().unwrap();

        let actor = template.to_actor(EntityId(3), Position::new(4, 2));

        assert_eq!(actor.id, EntityId(3));
        assert_eq!(actor.health, ResourceMeter::full(16));
        assert_eq!(actor.speed, 50);
        assert_eq!(actor.energy, 0);
        assert!(actor.flags.contains(StatusFlags::ASLEEP));
        assert!(matches!(actor.controller, Some(Controller::Hostile(_))));
    }

    #[test]
    fn rejects_broken_templates() {
        let zero_health = ActorTemplate::builder("wisp").health(0).build();
        let nameless = ActorTemplate::builder(" ").build();
        let bad_crit = ActorTemplate::builder("imp")
            .combat(CombatProfile::new(1, 0).with_crit(120, 150))
            .build();
        let short_bow = ActorTemplate::builder("archer")
            .combat(CombatProfile::new(1, 0).with_ranged(1, 2))
            .build();

        assert_eq!(zero_health.validate(), Err(TemplateError::ZeroHealth));
        assert_eq!(nameless.validate(), Err(TemplateError::MissingName));
        assert_eq!(
            bad_crit.validate(),
            Err(TemplateError::CritChanceOutOfRange(120))
        );
        assert_eq!(
            short_bow.validate(),
            Err(TemplateError::RangedReachTooShort)
        );
    }
}
