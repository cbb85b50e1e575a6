use std::rc::Rc;
use std::str::FromStr;
use std::time::Instant;

use clap::Parser;
use scotland_yard::Colour;
use scotland_yard::agents::Agent;
use scotland_yard::cli::{LogFormat, StatisticsAccumulator, create_agent, init_logging, print_agent_help};
use scotland_yard::config::MatchConfig;
use scotland_yard::game::{Game, LoggingObserver};
use scotland_yard::graph::{Graph, demo_map};

#[derive(Debug, Parser, Clone)]
#[command(name = "scotland-yard-sim")]
#[command(about = "Scotland Yard simulator - play many games between agent strategies")]
struct Args {
    /// Number of games to play
    #[arg(short = 'n', long, default_value_t = 5)]
    num: u32,

    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Map file (one `a b TRANSPORT` edge per line). Uses the demo map if omitted
    #[arg(long)]
    map: Option<String>,

    /// JSON match config. Uses the standard setup if omitted
    #[arg(long)]
    config: Option<String>,

    /// Agent code for Mr X
    #[arg(long, default_value = "R")]
    mr_x: String,

    /// Comma-separated agent codes for the detectives, or one code for all
    /// Use ':' to set agent-specific params (e.g., R:7 for a seed offset)
    #[arg(long, default_value = "R")]
    detectives: String,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Show agent codes and exit
    #[arg(long)]
    help_agents: bool,

    /// Silence console output
    #[arg(long)]
    quiet: bool,
}

fn main() {
    let args = Args::parse();

    if args.help_agents {
        print_agent_help();
        return;
    }

    let format = if args.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Human
    };
    init_logging(format, args.verbose);

    let graph = match &args.map {
        Some(path) => load_map(path),
        None => demo_map().clone(),
    };

    let config = match &args.config {
        Some(path) => MatchConfig::from_path(path).unwrap_or_else(|err| {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }),
        None => MatchConfig::default(),
    };

    if let Some(seat) = std::iter::once(&config.mr_x)
        .chain(&config.detectives)
        .find(|seat| !graph.contains_node(seat.location))
    {
        eprintln!(
            "Error: {} starts at node {}, which is not on the map",
            seat.colour, seat.location
        );
        std::process::exit(1);
    }

    let detective_codes: Vec<&str> = args.detectives.split(',').collect();
    if detective_codes.len() != 1 && detective_codes.len() != config.detectives.len() {
        eprintln!(
            "Error: Expected 1 or {} detective codes, got {}",
            config.detectives.len(),
            detective_codes.len()
        );
        std::process::exit(1);
    }

    let mut stats = StatisticsAccumulator::new();
    for game_idx in 0..args.num {
        let game_seed = args.seed.wrapping_add(u64::from(game_idx) << 8);
        let mut seat = 0u64;
        let detectives = config.detectives.clone();
        let model = config.clone().build(graph.clone(), |colour| {
            let code = if colour.is_mr_x() {
                args.mr_x.as_str()
            } else {
                let idx = detectives
                    .iter()
                    .position(|d| d.colour == colour)
                    .unwrap_or(0);
                detective_codes.get(idx).copied().unwrap_or(detective_codes[0])
            };
            seat += 1;
            agent_or_exit(code, game_seed.wrapping_add(seat))
        });
        let model = model.unwrap_or_else(|err| {
            eprintln!("Error: Invalid match: {err}");
            std::process::exit(1);
        });

        let mut game = Game::new(model);
        if args.verbose > 0 {
            game.model
                .register_observer(Rc::new(LoggingObserver))
                .unwrap_or_else(|err| {
                    eprintln!("Error: {err}");
                    std::process::exit(1);
                });
        }
        let start = Instant::now();
        let result = game.play();
        let duration = start.elapsed();

        let winners = match result {
            Ok(winners) => winners,
            Err(err) => {
                eprintln!("Error: Game {} aborted: {err}", game_idx + 1);
                std::process::exit(1);
            }
        };
        stats.after(&game, duration);

        if !args.quiet {
            let last_n = 10;
            if game_idx < last_n || game_idx >= args.num.saturating_sub(last_n) {
                let winner_str = if winners.contains(&Colour::MR_X) {
                    "MR X".to_string()
                } else {
                    "DETECTIVES".to_string()
                };
                println!(
                    "Game {:>4}: Id={}, Winner={:>10}, Rounds={:>3}, Duration={:?}",
                    game_idx + 1,
                    game.id,
                    winner_str,
                    game.model.current_round(),
                    duration
                );
            } else if (game_idx + 1) % 100 == 0 {
                print!(".");
                use std::io::Write;
                let _ = std::io::stdout().flush();
            }
        }
    }

    if !args.quiet {
        print_summary(&stats);
    }
}

fn load_map(path: &str) -> Graph {
    let contents = std::fs::read_to_string(path).unwrap_or_else(|err| {
        eprintln!("Error: Cannot read map '{path}': {err}");
        std::process::exit(1);
    });
    Graph::from_str(&contents).unwrap_or_else(|err| {
        eprintln!("Error: Invalid map '{path}': {err}");
        std::process::exit(1);
    })
}

fn agent_or_exit(code: &str, seed: u64) -> Box<dyn Agent> {
    create_agent(code, seed).unwrap_or_else(|| {
        eprintln!("Error: Unknown agent code '{code}'");
        eprintln!("Use --help-agents to see available codes");
        std::process::exit(1);
    })
}

fn print_summary(stats: &StatisticsAccumulator) {
    let stats = &stats.stats;
    println!("\n{}", "=".repeat(80));
    println!("SIMULATION SUMMARY");
    println!("{}", "=".repeat(80));

    println!("\n{:<15} {:<10} {:<12}", "Side", "Wins", "Win Rate");
    println!("{}", "-".repeat(40));
    println!(
        "{:<15} {:<10} {:<11.1}%",
        "Mr X",
        stats.mr_x_wins,
        stats.mr_x_win_rate() * 100.0
    );
    println!(
        "{:<15} {:<10} {:<11.1}%",
        "Detectives",
        stats.detective_wins,
        stats.detective_win_rate() * 100.0
    );

    println!("\nGame Summary:");
    println!("  Total Games: {}", stats.games);
    println!("  Avg Rounds: {:.2}", stats.get_avg_rounds());
    println!("  Avg Duration: {:.2?}", stats.get_avg_duration());
}
