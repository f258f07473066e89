//! Built-in content used by the demo binary and the integration tests.
use crawl_core::env::ConsumableEffect;
use crawl_core::{
    ActorTemplate, CombatProfile, ControllerKind, EffectKind, Faction, GameConfig, IdleBehavior,
    ItemDefinition, ItemHandle, ItemKind,
};

use crate::oracle::{ItemCatalog, PLAYER_TEMPLATE, TemplateCatalog};

pub const HEALING_POTION: ItemHandle = ItemHandle(1);
pub const CONFUSION_SCROLL: ItemHandle = ItemHandle(2);
pub const SHORT_SWORD: ItemHandle = ItemHandle(3);
pub const LEATHER_ARMOR: ItemHandle = ItemHandle(4);
pub const LIGHTNING_SCROLL: ItemHandle = ItemHandle(5);
pub const HASTE_POTION: ItemHandle = ItemHandle(6);

pub fn templates() -> TemplateCatalog {
    let mut catalog = TemplateCatalog::new();

    catalog.insert(
        PLAYER_TEMPLATE,
        ActorTemplate::builder("you")
            .faction(Faction::Adventurer)
            .health(30)
            .combat(CombatProfile::new(5, 2))
            .inventory_capacity(GameConfig::DEFAULT_INVENTORY_CAPACITY)
            .build(),
    );
    catalog.insert_with_glyph(
        "rat",
        'r',
        ActorTemplate::builder("rat")
            .health(4)
            .combat(CombatProfile::new(2, 0))
            .speed(150)
            .controller(ControllerKind::Hostile {
                idle: IdleBehavior::Wander,
            })
            .build(),
    );
    catalog.insert_with_glyph(
        "orc",
        'o',
        ActorTemplate::builder("orc")
            .health(12)
            .combat(CombatProfile::new(4, 1))
            .controller(ControllerKind::Hostile {
                idle: IdleBehavior::Stationary,
            })
            .build(),
    );
    catalog.insert_with_glyph(
        "archer",
        'a',
        ActorTemplate::builder("goblin archer")
            .health(8)
            .combat(CombatProfile::new(2, 0).with_ranged(5, 3))
            .controller(ControllerKind::Hostile {
                idle: IdleBehavior::Stationary,
            })
            .build(),
    );
    catalog.insert_with_glyph(
        "troll",
        'T',
        ActorTemplate::builder("troll")
            .health(24)
            .combat(CombatProfile::new(7, 3).with_crit(10, 200))
            .speed(50)
            .controller(ControllerKind::Hostile {
                idle: IdleBehavior::Wander,
            })
            .asleep()
            .build(),
    );
    catalog.insert_with_glyph(
        "bat",
        'b',
        ActorTemplate::builder("bat")
            .health(3)
            .combat(CombatProfile::new(1, 0))
            .speed(200)
            .controller(ControllerKind::Wander)
            .build(),
    );

    catalog
}

pub fn items() -> ItemCatalog {
    let mut catalog = ItemCatalog::new();

    catalog.insert(
        HEALING_POTION,
        ItemDefinition::new(
            "healing potion",
            ItemKind::Consumable(ConsumableEffect::Heal { amount: 10 }),
        ),
    );
    catalog.insert(
        CONFUSION_SCROLL,
        ItemDefinition::new(
            "scroll of confusion",
            ItemKind::Consumable(ConsumableEffect::Confuse { turns: 5, range: 6 }),
        ),
    );
    catalog.insert(SHORT_SWORD, ItemDefinition::new("short sword", ItemKind::weapon(3)));
    catalog.insert(LEATHER_ARMOR, ItemDefinition::new("leather armor", ItemKind::armor(2)));
    catalog.insert(
        LIGHTNING_SCROLL,
        ItemDefinition::new(
            "scroll of lightning",
            ItemKind::Consumable(ConsumableEffect::Bolt {
                damage: 12,
                range: 6,
            }),
        ),
    );
    catalog.insert(
        HASTE_POTION,
        ItemDefinition::new(
            "potion of haste",
            ItemKind::Consumable(ConsumableEffect::Grant {
                effect: EffectKind::Haste,
                turns: 10,
            }),
        ),
    );

    catalog.bind_glyph('!', HEALING_POTION);
    catalog.bind_glyph('?', CONFUSION_SCROLL);
    catalog.bind_glyph('/', SHORT_SWORD);
    catalog.bind_glyph('[', LEATHER_ARMOR);

    catalog
}

/// Two small floors joined by stairs.
pub const DEMO_FLOORS: [&str; 2] = [
    "
##############
#@...#.......#
#....#...o...#
#..!.....a...#
#....#.......#
###.##########
  #.#
  #.######
  #......>#
  #########
",
    "
###########
#<........#
#..r...b..#
#.....T...#
#.?.......#
###########
",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::GridMap;

    #[test]
    fn every_preset_template_is_valid() {
        let catalog = templates();
        for id in [PLAYER_TEMPLATE, "rat", "orc", "archer", "troll", "bat"] {
            let template = catalog.get(id).unwrap();
            assert_eq!(template.validate(), Ok(()), "{id}");
        }
    }

    #[test]
    fn demo_markers_resolve_to_content() {
        let templates = templates();
        let items = items();
        for floor in DEMO_FLOORS {
            let map = GridMap::parse(floor).unwrap();
            for marker in map.markers() {
                assert!(
                    templates.id_for_glyph(marker.glyph).is_some()
                        || items.by_glyph(marker.glyph).is_some(),
                    "unresolved marker {:?}",
                    marker
                );
            }
        }
    }
}
