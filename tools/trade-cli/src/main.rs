//! Trade Finder CLI
//!
//! Three commands:
//! - users: list the members of a league
//! - search: rank every trade that helps you without hurting the other team
//! - scenario: score one specific trade

mod config;
mod logging;
mod output;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use sleeper_client::{SleeperClient, SnapshotCache};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

use config::AppConfig;
use trade_engine::{
    CounterpartySelector, LeagueUser, Position, ScenarioRequest, ScoringVariant, TradeEngineService,
    TradeRequest,
};

#[derive(Parser)]
#[command(name = "trade-cli")]
#[command(about = "Find fantasy football trades that help both sides")]
#[command(version = "0.1.0")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Ignore and do not write the daily snapshot cache
    #[arg(long, global = true)]
    no_cache: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List users in a league
    Users {
        #[arg(long)]
        league: String,
    },

    /// Search every trade with every other team in the league
    Search {
        #[command(flatten)]
        target: TargetArgs,

        /// Largest number of players on each side of a trade
        #[arg(long)]
        max_group: Option<usize>,

        /// Positions never offered or requested, e.g. QB,K
        #[arg(long, value_delimiter = ',', value_parser = parse_position)]
        exclude: Vec<Position>,

        /// Also write the results to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Show progress while searching
        #[arg(long)]
        progress: bool,
    },

    /// Score a single trade
    Scenario {
        #[command(flatten)]
        target: TargetArgs,

        /// Counterparty user ID or display name
        #[arg(long)]
        with: String,

        /// Player IDs you send
        #[arg(long, value_delimiter = ',', required = true)]
        send: Vec<String>,

        /// Player IDs you receive
        #[arg(long, value_delimiter = ',', required = true)]
        receive: Vec<String>,
    },
}

#[derive(Args)]
struct TargetArgs {
    /// Sleeper league ID
    #[arg(long)]
    league: String,

    /// Your user ID
    #[arg(long, conflicts_with = "name", required_unless_present = "name")]
    user: Option<String>,

    /// Your display name
    #[arg(long)]
    name: Option<String>,

    /// Current week of the season
    #[arg(long)]
    week: u32,

    /// PPR, Half PPR or Standard
    #[arg(long, default_value = "ppr")]
    scoring: ScoringVariant,
}

fn parse_position(value: &str) -> std::result::Result<Position, String> {
    match value.parse::<Position>() {
        Ok(Position::Unknown) | Err(_) => Err(format!("Unknown position '{value}'")),
        Ok(position) => Ok(position),
    }
}

type Service = TradeEngineService<SnapshotCache<SleeperClient>>;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::initialize_logging();

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if cli.no_cache {
        config.cache.enabled = false;
    }

    let client = SleeperClient::new(config.sleeper.clone()).context("Failed to create Sleeper client")?;
    let source = SnapshotCache::new(client, config.cache.clone());
    let service = TradeEngineService::new(config.engine.clone(), source)?;

    match cli.command {
        Commands::Users { league } => {
            let users = service.league_users(&league).await?;
            output::print_users(&users);
        }
        Commands::Search { target, max_group, exclude, csv, progress } => {
            let target_user_id = resolve_user(&service, &target).await?;
            let request = TradeRequest {
                league_id: target.league.clone(),
                target_user_id,
                week: target.week,
                scoring_variant: target.scoring,
                max_group_size: max_group,
                excluded_positions: exclude,
            };

            let report = if progress {
                let report = service
                    .search_trades_with_progress(request, |p| {
                        eprint!("\r\x1b[2K{:>5.1}% {}", p.fraction() * 100.0, p.message);
                        let _ = std::io::stderr().flush();
                    })
                    .await;
                eprintln!();
                report?
            } else {
                service.search_trades(request).await?
            };

            output::print_report(&report);
            if let Some(path) = csv {
                output::write_csv(&report, &path)?;
                info!("Wrote {} trades to {}", report.rows.len(), path.display());
            }
        }
        Commands::Scenario { target, with, send, receive } => {
            let target_user_id = resolve_user(&service, &target).await?;
            let users = service.league_users(&target.league).await?;
            let counterparty = if users.iter().any(|u| u.user_id == with) {
                CounterpartySelector::UserId(with)
            } else {
                CounterpartySelector::DisplayName(with)
            };

            let outcome = service
                .evaluate_scenario(ScenarioRequest {
                    league_id: target.league.clone(),
                    target_user_id,
                    week: target.week,
                    scoring_variant: target.scoring,
                    counterparty,
                    outgoing: send,
                    incoming: receive,
                })
                .await?;
            output::print_scenario(&outcome);
        }
    }

    Ok(())
}

/// User ID from `--user`, or looked up from `--name`
async fn resolve_user(service: &Service, target: &TargetArgs) -> Result<String> {
    if let Some(user) = &target.user {
        return Ok(user.clone());
    }
    let name = target.name.as_deref().ok_or_else(|| anyhow!("Either --user or --name is required"))?;
    let users = service.league_users(&target.league).await?;
    find_by_name(&users, name)
        .map(|u| u.user_id.clone())
        .ok_or_else(|| anyhow!("No user named '{}' in league {}", name, target.league))
}

fn find_by_name<'u>(users: &'u [LeagueUser], name: &str) -> Option<&'u LeagueUser> {
    users
        .iter()
        .find(|u| u.display_name == name)
        .or_else(|| users.iter().find(|u| u.display_name.eq_ignore_ascii_case(name)))
}
