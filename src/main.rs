//! Horse Derby entry point
//!
//! Headless runner: generates a schedule, races every round and prints the
//! results table (or the final snapshot as JSON).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use horse_derby::format::{format_time, ordinal};
use horse_derby::sim::{Clock, ManualClock, SystemClock};
use horse_derby::{RaceGame, RaceSettings};

#[derive(Parser)]
#[command(name = "horse-derby")]
#[command(about = "Run a multi-round horse race tournament")]
struct Cli {
    #[arg(long, help = "Seed for a reproducible tournament (random if omitted)")]
    seed: Option<u64>,
    #[arg(long, help = "JSON settings file overriding the defaults")]
    settings: Option<PathBuf>,
    #[arg(
        long,
        help = "Race in wall-clock time instead of simulated time",
        default_value_t = false
    )]
    realtime: bool,
    #[arg(long, help = "Print the final state as JSON", default_value_t = false)]
    json: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    log::info!("Horse Derby (native) starting...");

    let settings = match &cli.settings {
        Some(path) => match RaceSettings::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => RaceSettings::default(),
    };

    let game = match cli.seed {
        Some(seed) => RaceGame::with_seed(settings, seed),
        None => RaceGame::new(settings),
    };
    let mut game = match game {
        Ok(game) => game,
        Err(e) => {
            log::error!("Invalid settings: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = game.generate_schedule() {
        log::error!("Failed to generate schedule: {e}");
        return ExitCode::FAILURE;
    }

    let mut clock: Box<dyn Clock> = if cli.realtime {
        Box::new(SystemClock::new())
    } else {
        Box::new(ManualClock::new())
    };
    let outcome = game.start_racing(clock.as_mut());
    log::info!("Tournament ended: {:?}", outcome);

    if cli.json {
        match serde_json::to_string_pretty(&game.snapshot()) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                log::error!("Failed to serialize snapshot: {e}");
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    println!("Seed: {}", game.seed());
    for round in game.rounds() {
        println!(
            "\nRound {} - {}m ({:?})",
            round.round_number, round.distance, round.status
        );
        for result in &round.results {
            println!(
                "  {:>4}  {:<16} cond {:>3}  {}",
                ordinal(result.position),
                result.horse.name,
                result.horse.condition,
                format_time(result.finish_time)
            );
        }
    }

    ExitCode::SUCCESS
}
