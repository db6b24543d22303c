//! # Hideseek Main Entry Point
//!
//! Initializes logging, builds or loads a house, and runs the
//! read/print loop over the game controller's command surface.

use clap::Parser;
use hideseek::{
    default_opponents, GameController, HideSeekResult, House, RngSource, StdFileAccess,
};
use log::info;
use std::io::{BufRead, Write};

/// Command line arguments for the hideseek game.
#[derive(Parser, Debug)]
#[command(name = "hideseek")]
#[command(about = "A turn-based hide-and-seek text adventure")]
#[command(version)]
struct Args {
    /// House layout file to load, without the .json extension
    /// (defaults to the built-in house)
    #[arg(long)]
    house: Option<String>,

    /// Random seed for opponent placement
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> HideSeekResult<()> {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    info!("Starting hideseek v{}", hideseek::VERSION);

    let files = StdFileAccess;
    let house = match &args.house {
        Some(file_name) => House::load(file_name, &files)?,
        None => House::default_layout(),
    };
    info!("Playing in {} ({} locations)", house.name, house.locations().len());

    let random = match args.seed {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::seeded(rand::random()),
    };
    let mut game = GameController::new(
        house,
        default_opponents(),
        Box::new(files),
        Box::new(random),
    )?;

    println!("Welcome to the hide and seek game!");

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut lines = stdin.lock().lines();

    loop {
        println!("{}", game.status());
        print!("{}", game.prompt());
        stdout.flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };

        println!("{}", game.parse_input(&line));

        if game.game_over() {
            println!("You won the game in {} moves!", game.move_number() - 1);
            break;
        }
    }

    Ok(())
}

/// Initializes env_logger at the requested level; RUST_LOG still wins when
/// set.
fn initialize_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        _ => log::LevelFilter::Warn,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
