use std::{error::Error, str::FromStr};

use rand::{SeedableRng, rngs::StdRng};

use ludo::{
    engine::{DEFAULT_NAMES, SimulationConfig, simulate},
    ludo::Color,
    table::Table,
};

fn main() -> Result<(), Box<dyn Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    let config = parse_config(&args)?;
    let json = args.iter().any(|a| a == "--json");

    if args.iter().any(|a| a == "--demo") {
        return run_demo(&config, json);
    }
    run_games(&config, json)
}

/// Environment first, then command line flags on top.
fn parse_config(args: &[String]) -> Result<SimulationConfig, Box<dyn Error>> {
    let mut config = SimulationConfig::new();

    if let Some(games) = setting::<usize>(args, "--games", "LUDO_GAMES")? {
        config = config.with_games(games);
    }
    if let Some(players) = setting::<usize>(args, "--players", "LUDO_PLAYERS")? {
        config = config.with_players(players);
    }
    if let Some(max_rolls) = setting::<usize>(args, "--max-rolls", "LUDO_MAX_ROLLS")? {
        config = config.with_max_rolls(max_rolls);
    }
    if let Some(seed) = setting::<u64>(args, "--seed", "LUDO_SEED")? {
        config = config.with_seed(seed);
    }
    Ok(config)
}

fn setting<T>(args: &[String], flag: &str, var: &str) -> Result<Option<T>, Box<dyn Error>>
where
    T: FromStr,
    T::Err: Error,
{
    let raw = match args.iter().position(|a| a == flag) {
        Some(i) => Some(args.get(i + 1).cloned().ok_or(format!("{flag} needs a value"))?),
        None => std::env::var(var).ok(),
    };
    match raw {
        Some(raw) => Ok(Some(raw.parse::<T>().map_err(|e| format!("{flag} {raw:?}: {e}"))?)),
        None => Ok(None),
    }
}

fn run_games(config: &SimulationConfig, json: bool) -> Result<(), Box<dyn Error>> {
    let start = std::time::Instant::now();
    let stats = simulate(config);
    let duration = start.elapsed();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("============================================");
    println!("Games: {}, Unfinished: {}", stats.games, stats.unfinished);
    for color in Color::ALL.iter().take(config.players) {
        println!("{color:>6} Wins: {}, Winrate: {:.2}%", stats.wins(*color), stats.win_rate(*color));
    }
    println!("Average rolls per game: {:.1}", stats.average_rolls());
    println!("Captures: {}, Sixes: {}", stats.captures, stats.sixes);
    println!("Simulation took: {duration:?}");
    println!("============================================");
    Ok(())
}

fn run_demo(config: &SimulationConfig, json: bool) -> Result<(), Box<dyn Error>> {
    let table = Table::new();
    for name in &DEFAULT_NAMES[..config.players] {
        table.join(name)?;
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let mut rolls = 0;
    while !table.is_over() && rolls < config.max_rolls {
        let Some(player) = table.current_turn() else {
            break;
        };
        let report = table.roll_with(&player, &mut rng)?;
        rolls += 1;
        if json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            println!("{:<40} | {}", report.outcome.to_string(), report.snapshot.to_wire());
        }
    }

    match table.winner() {
        Some(winner) => println!("{winner} wins after {rolls} rolls"),
        None => println!("No winner after {rolls} rolls"),
    }
    Ok(())
}

fn print_help() {
    println!("Usage: ludo [--demo] [--json] [--games N] [--players N] [--max-rolls N] [--seed N]");
    println!();
    println!("  --demo         play and print a single match");
    println!("  --json         print results as JSON");
    println!("  --games N      matches to simulate (LUDO_GAMES)");
    println!("  --players N    seats taken, 1-4 (LUDO_PLAYERS)");
    println!("  --max-rolls N  roll limit per match (LUDO_MAX_ROLLS)");
    println!("  --seed N       seed for repeatable simulations (LUDO_SEED)");
}
