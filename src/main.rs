use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use badminton_league::api::{build_router, state::AppState};
use badminton_league::calculate::monthly_standings;
use badminton_league::config::AppConfig;
use badminton_league::models::{JerseyAward, MatchSubmission, MonthWindow, PlayerId};
use badminton_league::parse_set_score;
use badminton_league::scoring::validate_match;
use badminton_league::storage::{LeagueStore, NewPlayer, StorageConfig};

#[derive(Parser)]
#[command(name = "badminton-league")]
#[command(about = "Monthly badminton league: score validation, ranking and jerseys")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./league.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
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
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },

    /// Check a list of set scores, e.g. `validate 21-10 15-21 21-19`
    Validate {
        #[arg(required = true)]
        sets: Vec<String>,
    },

    /// Print the general ranking and the jerseys of a month
    Ranking {
        /// Month (1-12), defaults to the current month
        #[arg(long)]
        month: Option<u32>,

        /// Year, defaults to the current year
        #[arg(long)]
        year: Option<i32>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Register a player
    AddPlayer {
        nickname: String,

        /// Federation licence number
        #[arg(long)]
        license: Option<String>,

        /// Singles ranking points
        #[arg(long)]
        ranking_points: Option<u32>,
    },

    /// Set the singles ranking points of the player holding LICENSE
    SetRankingPoints { license: String, points: u32 },

    /// Record a match reported by PLAYER1
    RecordMatch {
        player1: u32,
        player2: u32,

        /// Match date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,

        /// Set scores from PLAYER1's side, e.g. 21-10 15-21 21-19
        #[arg(required = true)]
        sets: Vec<String>,
    },

    /// List registered players
    Players,

    /// List recorded matches
    Matches {
        /// Only matches involving this player
        #[arg(long)]
        player: Option<u32>,
    },
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date (expected YYYY-MM-DD): {}", s))
}

fn print_jersey(label: &str, award: &Option<JerseyAward>) {
    match award {
        Some(award) => println!("{:<10} {} ({})", label, award.nickname, award.metric),
        None => println!("{:<10} -", label),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config {:?}", cli.config))?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    config.json_logs |= cli.json_logs;

    init_tracing(&config.log_level, config.json_logs);
    tracing::debug!("Starting badminton-league v{}", env!("CARGO_PKG_VERSION"));

    let store = LeagueStore::new(StorageConfig::new(config.data_dir.clone()));

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or(config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let state = AppState::new(store, config.server.cors_origin.clone());
            let app = build_router(state);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Validate { sets } => {
            let sets = sets
                .iter()
                .map(|s| parse_set_score(s))
                .collect::<Result<Vec<_>>>()?;
            match validate_match(&sets) {
                Ok(tally) => {
                    println!(
                        "Valid match: {}-{} in sets",
                        tally.player1_sets, tally.player2_sets
                    );
                }
                Err(rejection) => bail!("Invalid match: {}", rejection),
            }
        }
        Commands::Ranking { month, year, json } => {
            let current = MonthWindow::containing(Utc::now().date_naive());
            let window = MonthWindow::new(
                month.unwrap_or(current.month()),
                year.unwrap_or(current.year()),
            )?;
            let standings = monthly_standings(&store.players()?, &store.matches()?, window);

            if json {
                println!("{}", serde_json::to_string_pretty(&standings)?);
                return Ok(());
            }

            println!("=== General ranking ===");
            println!("{:>3}  {:<20} {:>6} {:>4} {:>6}", "#", "Player", "Points", "Won", "Lost");
            for (i, entry) in standings.general_ranking.iter().enumerate() {
                println!(
                    "{:>3}  {:<20} {:>6} {:>4} {:>6}",
                    i + 1,
                    entry.nickname,
                    entry.points,
                    entry.wins,
                    entry.losses
                );
            }

            println!("\n=== Jerseys {} ===", window);
            print_jersey("Leader", &standings.jerseys.leader);
            print_jersey("Upset", &standings.jerseys.upset);
            print_jersey("Closing", &standings.jerseys.closing);
            print_jersey("Activity", &standings.jerseys.activity);
        }
        Commands::AddPlayer {
            nickname,
            license,
            ranking_points,
        } => {
            let player = store.register_player(NewPlayer {
                nickname,
                license_number: license,
                single_ranking_points: ranking_points,
            })?;
            println!("Registered {} with id {}", player.nickname, player.id);
        }
        Commands::SetRankingPoints { license, points } => {
            let player = store.update_ranking_points(&license, points)?;
            println!("{} now has {} ranking points", player.nickname, points);
        }
        Commands::RecordMatch {
            player1,
            player2,
            date,
            sets,
        } => {
            let match_date = match date {
                Some(s) => parse_date(&s)?,
                None => Utc::now().date_naive(),
            };
            let sets = sets
                .iter()
                .map(|s| parse_set_score(s))
                .collect::<Result<Vec<_>>>()?;
            let recorded = store.record_match(MatchSubmission {
                player1_id: PlayerId::new(player1),
                player2_id: PlayerId::new(player2),
                match_date,
                sets,
            })?;
            println!(
                "Recorded match {} ({}-{} in sets)",
                recorded.id, recorded.player1_sets, recorded.player2_sets
            );
        }
        Commands::Players => {
            for player in store.players()? {
                let points = player
                    .single_ranking_points
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!("{:>4}  {:<20} {:>6}", player.id.get(), player.nickname, points);
            }
        }
        Commands::Matches { player } => {
            let matches = match player {
                Some(id) => store.matches_for(PlayerId::new(id))?,
                None => store.matches()?,
            };
            for m in matches {
                let sets: Vec<String> = m.sets.iter().map(|s| s.to_string()).collect();
                println!(
                    "{:>4}  {}  {} vs {}  {}",
                    m.id.get(),
                    m.match_date,
                    m.player1_id,
                    m.player2_id,
                    sets.join(" ")
                );
            }
        }
    }

    Ok(())
}
