use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wodboard::api::state::AppState;
use wodboard::api::build_router;
use wodboard::config::AppConfig;
use wodboard::scoring::ordinal;
use wodboard::seed::{seed_competition, SeedConfig};
use wodboard::service::{RankOutcome, RankingService};
use wodboard::storage::{JsonlScoreStore, StorageConfig};

#[derive(Parser)]
#[command(name = "wodboard")]
#[command(about = "Competition leaderboard with a pure workout ranking engine")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Data directory path (overrides config)
    #[arg(long)]
    data_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error; overrides config)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Generate deterministic demo data
    Seed {
        /// Number of participants to generate
        #[arg(long, default_value = "40")]
        participants: u32,

        /// RNG seed
        #[arg(long, default_value = "2026")]
        seed: u64,
    },

    /// Run ranking passes and persist placement points
    Rank {
        /// Workout to rank (default: all)
        #[arg(long)]
        workout: Option<String>,
    },

    /// Print a leaderboard
    Board {
        /// Workout board (default: overall board)
        #[arg(long)]
        workout: Option<String>,
    },
}

fn print_workout_board(outcome: &RankOutcome) {
    println!("\n=== Workout {} ===", outcome.workout_id);
    println!(
        "{:>5}  {:<14} {:<12} {:<22} {}",
        "place", "participant", "scaling", "score", "tiebreak"
    );
    for standing in &outcome.standings {
        println!(
            "{:>5}  {:<14} {:<12} {:<22} {}",
            ordinal(standing.placement),
            standing.participant_id,
            standing.scaling,
            standing.score_display,
            standing.tiebreak_display.as_deref().unwrap_or("-")
        );
    }
    if !outcome.write_errors.is_empty() {
        println!("\nWrite failures:");
        for err in &outcome.write_errors {
            println!("  - {}", err);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = PathBuf::from(&cli.config);
    let mut config = if config_path.exists() {
        AppConfig::from_file(&config_path)?
    } else {
        AppConfig::default()
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = PathBuf::from(dir);
    }

    // Initialize tracing
    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting wodboard v{}", env!("CARGO_PKG_VERSION"));

    let store = Arc::new(JsonlScoreStore::new(StorageConfig::new(
        config.data_dir.clone(),
    )));
    let service = Arc::new(RankingService::new(
        config.competition.clone(),
        store.clone(),
        store.clone(),
    ));

    match cli.command {
        Commands::Serve { host, port } => {
            let state = AppState {
                service: service.clone(),
            };
            let app = build_router(state);

            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let addr = format!("{}:{}", host, port);

            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Leaderboard API: http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Seed { participants, seed } => {
            let seed_config = SeedConfig { participants, seed };
            let report = seed_competition(&store, &service, &seed_config).await?;

            println!("\n=== Seed Results ===");
            println!("Profiles written:    {}", report.profiles_written);
            println!("Submissions written: {}", report.submissions_written);
            println!("Workouts ranked:     {}", report.workouts_ranked);
            if !report.errors.is_empty() {
                println!("\nErrors:");
                for err in &report.errors {
                    println!("  - {}", err);
                }
            }
        }
        Commands::Rank { workout } => match workout {
            Some(id) => {
                let outcome = service.refresh_workout(&id.as_str().into()).await?;
                println!("\n=== Ranking Results ===");
                println!(
                    "{}: {} submissions ranked, {} write failures",
                    outcome.workout_id,
                    outcome.standings.len(),
                    outcome.write_errors.len()
                );
                if !outcome.write_errors.is_empty() {
                    println!("\nWrite failures:");
                    for err in &outcome.write_errors {
                        println!("  - {}", err);
                    }
                }
            }
            None => {
                let outcomes = service.refresh_all().await;
                println!("\n=== Ranking Results ===");
                for (workout_id, outcome) in &outcomes {
                    match outcome {
                        Ok(o) => println!(
                            "{}: {} submissions ranked, {} write failures",
                            workout_id,
                            o.standings.len(),
                            o.write_errors.len()
                        ),
                        Err(e) => println!("{}: FAILED ({})", workout_id, e),
                    }
                }
            }
        },
        Commands::Board { workout } => match workout {
            Some(id) => {
                let outcome = service.refresh_workout(&id.as_str().into()).await?;
                print_workout_board(&outcome);
            }
            None => {
                let entries = service.overall_leaderboard().await?;
                println!("\n=== Overall: {} ===", config.competition.name);
                println!(
                    "{:>5}  {:<22} {:>6}  {}",
                    "place", "athlete", "points", "workouts"
                );
                for entry in &entries {
                    println!(
                        "{:>5}  {:<22} {:>6}  {}",
                        ordinal(entry.overall_placement),
                        entry.display_name,
                        entry.total_points,
                        entry.placements.len()
                    );
                }
            }
        },
    }

    Ok(())
}
