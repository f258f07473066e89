use std::io::Write;

use crawl_core::{
    Action, ActorTemplate, CombatProfile, ControllerKind, Direction, EntityId, Faction,
    IdleBehavior, Position, StopReason, TileFeature,
};
use crawl_runtime::oracle::PLAYER_TEMPLATE;
use crawl_runtime::presets::{self, HEALING_POTION};
use crawl_runtime::{
    Catalogs, GridMap, MessageLevel, RuntimeConfig, RuntimeError, Session, TemplateCatalog,
};

fn session(rows: &str) -> Session {
    Session::new(
        RuntimeConfig::default(),
        GridMap::parse(rows).unwrap(),
        Catalogs::presets(),
    )
    .unwrap()
}

#[test]
fn floor_is_populated_from_markers() {
    let session = session("#########\n#@..o.!.#\n#########");
    let state = session.state();

    assert_eq!(state.player().position, Position::new(1, 1));
    assert_eq!(state.npc_ids(), vec![EntityId(1)]);
    assert_eq!(
        state.actor(EntityId(1)).map(|orc| orc.position),
        Some(Position::new(4, 1))
    );
    assert_eq!(
        state
            .world
            .items_at(Position::new(6, 1))
            .map(|item| item.handle)
            .collect::<Vec<_>>(),
        vec![HEALING_POTION]
    );
}

#[test]
fn refused_move_costs_no_time_and_is_reported() {
    let mut session = session("#####\n#@..#\n#####");

    let error = session
        .submit(Action::step(EntityId::PLAYER, Direction::North))
        .unwrap_err();

    assert!(error.is_notice());
    assert_eq!(session.state().turn.clock.0, 0);
    let last = session.messages().recent(1).next().unwrap();
    assert_eq!(last.level, MessageLevel::Warning);
    assert!(last.text.contains("blocked"), "{}", last.text);
}

#[test]
fn stairs_swap_the_floor_layout() {
    let mut session = Session::builder(RuntimeConfig::default())
        .floor(GridMap::parse("#####\n#@.>#\n#####").unwrap())
        .floor(GridMap::parse("######\n#<..r#\n######").unwrap())
        .build()
        .unwrap();
    let player = EntityId::PLAYER;

    session.submit(Action::step(player, Direction::East)).unwrap();
    session.submit(Action::step(player, Direction::East)).unwrap();
    session.submit(Action::descend(player)).unwrap();

    assert_eq!(session.state().world.floor, 2);
    assert_eq!(session.state().player().position, Position::new(1, 1));
    assert_eq!(
        session.map().find_feature(TileFeature::UpStairs),
        Some(Position::new(1, 1))
    );
    assert_eq!(session.state().npc_ids().len(), 1);
    assert!(
        session
            .messages()
            .iter()
            .any(|entry| entry.text == "You go down the stairs to floor 2.")
    );

    session.submit(Action::ascend(player)).unwrap();

    assert_eq!(session.state().world.floor, 1);
    assert_eq!(session.state().player().position, Position::new(3, 1));
    assert!(session.state().npc_ids().is_empty());
}

#[test]
fn descending_past_the_last_layout_reuses_it() {
    let mut session = session("####\n#@>#\n####");
    let player = EntityId::PLAYER;

    session.submit(Action::step(player, Direction::East)).unwrap();
    session.submit(Action::descend(player)).unwrap();

    assert_eq!(session.state().world.floor, 2);
    // No up staircase on the reused layout, so the marked start is used.
    assert_eq!(session.state().player().position, Position::new(1, 1));
}

#[test]
fn snapshot_exposes_state_and_view() {
    let session = session("#####\n#@..#\n#####");

    let json: serde_json::Value = serde_json::from_str(&session.snapshot_json().unwrap()).unwrap();

    assert_eq!(json["floor"], 1);
    assert_eq!(json["state"]["entities"]["player"]["position"]["x"], 1);
    let visible = json["visible"].as_array().unwrap();
    assert!(visible.iter().any(|tile| tile["x"] == 3 && tile["y"] == 1));
    assert!(visible.iter().any(|tile| tile["x"] == 0 && tile["y"] == 0));
}

#[test]
fn dead_player_ends_the_session() {
    let mut templates = TemplateCatalog::new();
    templates.insert(
        PLAYER_TEMPLATE,
        ActorTemplate::builder("you")
            .faction(Faction::Adventurer)
            .health(1)
            .build(),
    );
    templates.insert_with_glyph(
        "brute",
        'B',
        ActorTemplate::builder("brute")
            .health(20)
            .combat(CombatProfile::new(50, 0).with_crit(0, 150))
            .controller(ControllerKind::Hostile {
                idle: IdleBehavior::Stationary,
            })
            .build(),
    );
    let mut session = Session::new(
        RuntimeConfig::default(),
        GridMap::parse("#####\n#@B.#\n#####").unwrap(),
        Catalogs::new(presets::items(), templates),
    )
    .unwrap();

    session.submit(Action::wait(EntityId::PLAYER)).unwrap();

    assert!(session.is_over());
    assert!(session.messages().iter().any(|entry| entry.text == "You die..."));
    assert!(matches!(
        session.submit(Action::wait(EntityId::PLAYER)),
        Err(RuntimeError::GameOver)
    ));
}

#[test]
fn files_and_tunables_load_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let map_path = dir.path().join("floor1.txt");
    let config_path = dir.path().join("rules.toml");
    std::fs::write(&map_path, "#############\n#@..........#\n#############\n").unwrap();
    let mut rules = std::fs::File::create(&config_path).unwrap();
    writeln!(rules, "max_auto_steps = 3").unwrap();

    let config = RuntimeConfig {
        game_seed: 11,
        map_paths: vec![map_path],
        config_path: Some(config_path),
        ..RuntimeConfig::default()
    };
    let mut session = Session::from_config(config).unwrap();

    let report = session
        .run(Action::run(EntityId::PLAYER, Direction::East))
        .unwrap();

    assert_eq!(report.stop, StopReason::StepLimit);
    assert_eq!(report.steps, 3);
    assert_eq!(session.state().player().position, Position::new(4, 1));
    assert_eq!(session.state().game_seed, 11);
}

#[test]
fn missing_map_file_reports_the_path() {
    let config = RuntimeConfig {
        map_paths: vec!["/nonexistent/floor.txt".into()],
        ..RuntimeConfig::default()
    };

    let error = Session::from_config(config).err().unwrap();

    assert!(format!("{error:#}").contains("/nonexistent/floor.txt"));
}
