//! NEMATODE - CLI entry point.
//!
//! Headless driver for the landscape-exploration core: autoplay games,
//! generate config files, and inspect landscapes.

use clap::{Parser, Subcommand, ValueEnum};
use nematode::{Config, MoveDirection, Session, Variant};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nematode")]
#[command(version)]
#[command(about = "Toroidal scalar-field exploration game, headless")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Built-in environment presets.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Env {
    Easy,
    Hard,
}

#[derive(Subcommand)]
enum Commands {
    /// Autoplay one or more games with a greedy-over-visible policy
    Run {
        /// Configuration file (YAML); overrides --env
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Built-in environment preset
        #[arg(short, long, value_enum, default_value = "easy")]
        env: Env,

        /// Observability variant code (0..=3), overriding the config
        #[arg(long)]
        variant: Option<u8>,

        /// Number of games to play
        #[arg(short, long, default_value = "1")]
        games: u32,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Quiet mode (only final scores)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Generate a configuration file
    Init {
        /// Environment preset to write
        #[arg(short, long, value_enum, default_value = "easy")]
        env: Env,

        /// Output path
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,
    },

    /// Print landscape info and an ASCII shading of the field
    Landscape {
        /// Configuration file (YAML); overrides --env
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Built-in environment preset
        #[arg(short, long, value_enum, default_value = "easy")]
        env: Env,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            env,
            variant,
            games,
            seed,
            quiet,
        } => run_games(config, env, variant, games, seed, quiet),

        Commands::Init { env, output } => {
            let config = preset(env);
            config.save(&output)?;
            println!("Wrote {} config to {}", env_name(env), output.display());
            Ok(())
        }

        Commands::Landscape { config, env } => show_landscape(config, env),
    }
}

fn preset(env: Env) -> Config {
    match env {
        Env::Easy => Config::easy(),
        Env::Hard => Config::hard(),
    }
}

fn env_name(env: Env) -> &'static str {
    match env {
        Env::Easy => "easy",
        Env::Hard => "hard",
    }
}

fn load_config(path: Option<PathBuf>, env: Env) -> Result<Config, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(Config::from_file(path)?),
        None => Ok(preset(env)),
    }
}

fn run_games(
    config_path: Option<PathBuf>,
    env: Env,
    variant: Option<u8>,
    games: u32,
    seed: Option<u64>,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(config_path, env)?;
    if let Some(code) = variant {
        config.game.variant = code;
    }
    config.validate()?;

    let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
    let mut session = Session::with_seed(&config, seed)?;
    let mut policy_rng = ChaCha8Rng::seed_from_u64(seed ^ 0x5eed);

    session.on_game_over(|report| {
        println!(
            "{} (variant {}) finished: {:.2} energy in {} moves",
            report.variant.nickname(),
            report.variant.code(),
            report.final_energy,
            report.move_count
        );
    });

    let allow_stay = config.game.allow_stay;
    log::info!("seed {seed}, playing {games} game(s)");

    for game in 0..games {
        if game > 0 {
            session.reset();
        }
        while !session.is_over() {
            let direction = choose_move(&session, allow_stay, &mut policy_rng);
            let turn = session.play(direction)?;
            if !quiet {
                let pos = session.agent().position();
                println!(
                    "move {:>3}  {:<5} -> ({:>2},{:>2})  energy {:>9.2}  left {}",
                    session.agent().move_count(),
                    direction.to_string(),
                    pos.0,
                    pos.1,
                    session.energy(),
                    turn.moves_left
                );
            }
        }
    }

    Ok(())
}

/// Greedy over disclosed values; random exploration when nothing useful is
/// disclosed. Staying camped on a visible peak is legal when the rules
/// allow it.
fn choose_move(session: &Session, allow_stay: bool, rng: &mut ChaCha8Rng) -> MoveDirection {
    let observation = session.observation();

    let mut best: Option<(MoveDirection, f64)> = None;
    for entry in &observation.entries {
        if entry.direction == MoveDirection::Stay && !allow_stay {
            continue;
        }
        if let Some(value) = entry.disclosed_value() {
            if best.map_or(true, |(_, b)| value > b) {
                best = Some((entry.direction, value));
            }
        }
    }

    match best {
        // A disclosed neighbor strictly better than the current cell.
        Some((direction, value))
            if direction != MoveDirection::Stay
                && value > observation.current().cell.value =>
        {
            direction
        }
        Some((MoveDirection::Stay, _)) if allow_stay => MoveDirection::Stay,
        _ => {
            const COMPASS: [MoveDirection; 4] = [
                MoveDirection::Up,
                MoveDirection::Down,
                MoveDirection::Left,
                MoveDirection::Right,
            ];
            COMPASS[rng.gen_range(0..COMPASS.len())]
        }
    }
}

fn show_landscape(
    config_path: Option<PathBuf>,
    env: Env,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path, env)?;
    let grid = config.build_grid()?;

    println!(
        "{}x{} grid over [{},{}] x [{},{}]",
        grid.rows(),
        grid.cols(),
        config.landscape.x_min,
        config.landscape.x_max,
        config.landscape.y_min,
        config.landscape.y_max
    );
    println!(
        "{} peak(s), values in [{:.3}, {:.3}]",
        config.landscape.peaks.len(),
        grid.min_value(),
        grid.max_value()
    );
    println!();

    const RAMP: &[u8] = b" .:-=+*#%@";
    let span = (grid.max_value() - grid.min_value()).max(f64::EPSILON);
    for row in 0..grid.rows() {
        let mut line = String::with_capacity(grid.cols());
        for col in 0..grid.cols() {
            let value = grid.get_cell(row as i64, col as i64).value;
            let t = (value - grid.min_value()) / span;
            let idx = ((t * (RAMP.len() - 1) as f64).round() as usize).min(RAMP.len() - 1);
            line.push(RAMP[idx] as char);
        }
        println!("{line}");
    }

    Ok(())
}
