//! Admission of new actors and placement of the player.

use crate::config::GameConfig;
use crate::env::{ActorOracle, GameEnv, MapOracle};
use crate::state::{EntityId, Position};

use super::{GameEngine, SpawnError};

impl<'a> GameEngine<'a> {
    /// Instantiates `template_id` at `position` and adds it to the roster.
    ///
    /// The template and the tile are both checked first, so an invalid
    /// template or a blocked tile never reaches the roster and no id is spent.
    pub fn spawn(
        &mut self,
        env: GameEnv<'_>,
        template_id: &str,
        position: Position,
    ) -> Result<EntityId, SpawnError> {
        let template = env
            .actors()?
            .template(template_id)
            .ok_or_else(|| SpawnError::UnknownTemplate(template_id.to_owned()))?;
        template
            .validate()
            .map_err(|source| SpawnError::InvalidTemplate {
                id: template_id.to_owned(),
                source,
            })?;
        self.check_placement(env.map()?, position)?;
        if self.state.entities.npcs.len() >= GameConfig::MAX_NPCS {
            return Err(SpawnError::RosterFull);
        }

        let id = self.state.allocate_entity_id();
        self.state.entities.npcs.push(template.to_actor(id, position));
        Ok(id)
    }

    /// Puts the player on `position`, e.g. on arrival at a new floor.
    pub fn place_player(
        &mut self,
        map: &dyn MapOracle,
        position: Position,
    ) -> Result<(), SpawnError> {
        if self.state.player().position != position {
            self.check_placement(map, position)?;
        }
        self.state.entities.player.position = position;
        Ok(())
    }

    fn check_placement(&self, map: &dyn MapOracle, position: Position) -> Result<(), SpawnError> {
        if !map.contains(position) {
            return Err(SpawnError::OutOfBounds(position));
        }
        if !map.is_walkable(position) {
            return Err(SpawnError::Blocked(position));
        }
        if self.state.is_occupied(position) {
            return Err(SpawnError::Occupied(position));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{ControllerKind, IdleBehavior};
    use crate::env::ActorTemplate;
    use crate::error::{ErrorSeverity, GameError};
    use crate::state::Faction;
    use crate::testing::{Fixture, StubActors, StubMap, state_with};

    fn fixture() -> Fixture {
        Fixture::new(StubMap::parse(&["#####", "#...#", "#####"])).with_actors(
            StubActors::new()
                .with(
                    "rat",
                    ActorTemplate::builder("rat")
                        .health(3)
                        .controller(ControllerKind::Hostile {
                            idle: IdleBehavior::Wander,
                        })
                        .build(),
                )
                .with("ghost", ActorTemplate::builder("ghost").health(0).build()),
        )
    }

    #[test]
    fn spawns_validated_template_on_free_floor() {
        let fixture = fixture();
        let mut state = state_with(Position::new(1, 1), vec![]);
        let mut engine = GameEngine::new(&mut state);

        let id = engine
            .spawn(fixture.env(), "rat", Position::new(3, 1))
            .unwrap();

        let rat = engine.state().actor(id).unwrap();
        assert_eq!(rat.faction, Faction::Monster);
        assert_eq!(rat.position, Position::new(3, 1));
        assert!(rat.controller.is_some());
    }

    #[test]
    fn refuses_bad_templates_and_tiles_without_spending_ids() {
        let fixture = fixture();
        let mut state = state_with(Position::new(1, 1), vec![]);
        let mut engine = GameEngine::new(&mut state);

        let invalid = engine
            .spawn(fixture.env(), "ghost", Position::new(2, 1))
            .unwrap_err();
        assert_eq!(invalid.severity(), ErrorSeverity::Validation);
        assert_eq!(invalid.error_code(), "TEMPLATE_ZERO_HEALTH");

        assert_eq!(
            engine.spawn(fixture.env(), "dragon", Position::new(2, 1)),
            Err(SpawnError::UnknownTemplate("dragon".into()))
        );
        assert_eq!(
            engine.spawn(fixture.env(), "rat", Position::new(0, 0)),
            Err(SpawnError::Blocked(Position::new(0, 0)))
        );
        assert_eq!(
            engine.spawn(fixture.env(), "rat", Position::new(1, 1)),
            Err(SpawnError::Occupied(Position::new(1, 1)))
        );

        let id = engine
            .spawn(fixture.env(), "rat", Position::new(2, 1))
            .unwrap();
        assert_eq!(id, EntityId(1));
    }
}
