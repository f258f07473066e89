use crawl_core::{Action, Direction, EntityId, Position};
use crawl_runtime::{Catalogs, GridMap, RuntimeConfig, Session};

fn session(rows: &str) -> Session {
    Session::new(
        RuntimeConfig::default(),
        GridMap::parse(rows).unwrap(),
        Catalogs::presets(),
    )
    .unwrap()
}

fn wait(session: &mut Session) {
    session.submit(Action::wait(EntityId::PLAYER)).unwrap();
}

#[test]
fn orc_closes_in_and_attacks() {
    let mut session = session("#######\n#@....#\n#.....#\n#....o#\n#######");
    let orc = EntityId(1);

    for _ in 0..3 {
        wait(&mut session);
    }
    let state = session.state();
    let distance = state
        .actor(orc)
        .unwrap()
        .position
        .chebyshev_distance(state.player().position);
    assert_eq!(distance, 1);
    assert!(state.player().health.is_full());

    wait(&mut session);

    let health = &session.state().player().health;
    assert!(health.current < health.maximum);
    assert!(
        session
            .messages()
            .iter()
            .any(|entry| entry.text.starts_with("The orc") && entry.text.contains("hits you for"))
    );
}

#[test]
fn sleeping_troll_wakes_only_when_the_player_is_adjacent() {
    let mut session = session("#######\n#@...T#\n#######");
    let troll = EntityId(1);
    let player = EntityId::PLAYER;

    wait(&mut session);
    session.submit(Action::step(player, Direction::East)).unwrap();
    session.submit(Action::step(player, Direction::East)).unwrap();

    let sleeper = session.state().actor(troll).unwrap();
    assert!(sleeper.is_asleep());
    assert_eq!(sleeper.position, Position::new(5, 1));

    session.submit(Action::step(player, Direction::East)).unwrap();

    assert!(!session.state().actor(troll).unwrap().is_asleep());
    assert!(
        session
            .messages()
            .iter()
            .any(|entry| entry.text == "The troll wakes up.")
    );
}

#[test]
fn confusion_scroll_takes_over_the_orc() {
    let mut session = session("#########\n#@?....o#\n#########");
    let player = EntityId::PLAYER;
    let orc = EntityId(1);

    session.submit(Action::step(player, Direction::East)).unwrap();
    session.submit(Action::pickup(player)).unwrap();
    assert_eq!(session.state().player().inventory.len(), 1);

    session
        .submit(Action::use_item(player, 0, Some(orc)))
        .unwrap();

    let target = session.state().actor(orc).unwrap();
    assert!(target.controller.as_ref().is_some_and(|c| c.is_confused()));
    assert!(session.state().player().inventory.is_empty());
}
