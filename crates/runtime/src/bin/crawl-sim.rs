//! Headless driver for the crawl runtime.
//!
//! Plays a scripted list of commands against a session and prints the floor
//! and the message log. Layouts, seed and tunables come from `CRAWL_*`
//! environment variables (a `.env` file is honoured).
//!
//! ```bash
//! crawl-sim careful:e travel:9,3 wait run:s descend
//! RUST_LOG=crawl_runtime=debug crawl-sim --json travel:7,8
//! ```

use std::str::FromStr;

use anyhow::Result;
use clap::Parser;
use crawl_core::{Action, Direction, EntityId, Position};
use crawl_runtime::{RuntimeConfig, Session};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Scripted crawl session
#[derive(Parser)]
#[command(name = "crawl-sim")]
#[command(about = "Plays scripted commands against a dungeon floor", long_about = None)]
struct Cli {
    /// Commands: wait, step:<dir>, run:<dir>, careful:<dir>, travel:<x>,<y>,
    /// pickup, drop:<slot>, use:<slot>, equip:<slot>, descend, ascend
    commands: Vec<Command>,

    /// Overrides CRAWL_SEED
    #[arg(long)]
    seed: Option<u64>,

    /// Print the final state as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Command {
    Wait,
    Step(Direction),
    Run(Direction),
    Careful(Direction),
    Travel(Position),
    Pickup,
    Drop(usize),
    Use(usize),
    Equip(usize),
    Descend,
    Ascend,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let (verb, arg) = match text.split_once(':') {
            Some((verb, arg)) => (verb, Some(arg)),
            None => (text, None),
        };
        let required = || arg.ok_or_else(|| format!("'{verb}' needs an argument"));
        let slot = |arg: &str| {
            arg.parse::<usize>()
                .map_err(|_| format!("invalid inventory slot '{arg}'"))
        };

        Ok(match verb {
            "wait" => Command::Wait,
            "step" => Command::Step(parse_direction(required()?)?),
            "run" => Command::Run(parse_direction(required()?)?),
            "careful" => Command::Careful(parse_direction(required()?)?),
            "travel" => Command::Travel(parse_position(required()?)?),
            "pickup" => Command::Pickup,
            "drop" => Command::Drop(slot(required()?)?),
            "use" => Command::Use(slot(required()?)?),
            "equip" => Command::Equip(slot(required()?)?),
            "descend" => Command::Descend,
            "ascend" => Command::Ascend,
            other => return Err(format!("unknown command '{other}'")),
        })
    }
}

fn parse_direction(text: &str) -> Result<Direction, String> {
    Ok(match text {
        "n" => Direction::North,
        "ne" => Direction::NorthEast,
        "e" => Direction::East,
        "se" => Direction::SouthEast,
        "s" => Direction::South,
        "sw" => Direction::SouthWest,
        "w" => Direction::West,
        "nw" => Direction::NorthWest,
        other => return Err(format!("unknown direction '{other}'")),
    })
}

fn parse_position(text: &str) -> Result<Position, String> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| format!("expected <x>,<y>, got '{text}'"))?;
    let coordinate = |value: &str| {
        value
            .trim()
            .parse::<i32>()
            .map_err(|_| format!("invalid coordinate '{value}'"))
    };
    Ok(Position::new(coordinate(x)?, coordinate(y)?))
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let _guard = setup_logging()?;

    let mut config = RuntimeConfig::from_env();
    if let Some(seed) = cli.seed {
        config.game_seed = seed;
    }
    tracing::info!(seed = config.game_seed, maps = config.map_paths.len(), "starting crawl-sim");

    let mut session = Session::from_config(config)?;
    println!("{}\n", session.render());

    for command in cli.commands {
        if session.is_over() {
            break;
        }
        tracing::debug!(?command, "executing");
        // Refusals are already in the message log.
        if let Err(error) = execute(&mut session, command) {
            if !error.is_notice() {
                return Err(error.into());
            }
        }
    }

    println!("{}\n", session.render());
    for entry in session.messages().iter() {
        println!("[{:>4}] {}", entry.tick.0, entry.text);
    }
    if cli.json {
        println!("{}", session.snapshot_json()?);
    }
    Ok(())
}

fn execute(session: &mut Session, command: Command) -> crawl_runtime::Result<()> {
    let player = EntityId::PLAYER;
    match command {
        Command::Wait => session.submit(Action::wait(player)).map(drop),
        Command::Step(direction) => session.submit(Action::bump(player, direction)).map(drop),
        Command::Run(direction) => session.run(Action::run(player, direction)).map(drop),
        Command::Careful(direction) => session
            .run(Action::careful_run(player, direction))
            .map(drop),
        Command::Travel(goal) => session.travel_to(goal).map(drop),
        Command::Pickup => session.submit(Action::pickup(player)).map(drop),
        Command::Drop(slot) => session.submit(Action::drop_item(player, slot)).map(drop),
        Command::Use(slot) => session
            .submit(Action::use_item(player, slot, None))
            .map(drop),
        Command::Equip(slot) => session.submit(Action::equip(player, slot)).map(drop),
        Command::Descend => session.submit(Action::descend(player)).map(drop),
        Command::Ascend => session.submit(Action::ascend(player)).map(drop),
    }
}

/// Logs to stderr, plus a file under `CRAWL_LOG_DIR` when it is set.
///
/// The returned guard flushes the file writer on drop.
fn setup_logging() -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match std::env::var_os("CRAWL_LOG_DIR") {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            let file_appender = tracing_appender::rolling::never(&dir, "crawl-sim.log");
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_file)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}
