use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::anyhow;
use fotmob_etl::config_handler::{self, Config};
use fotmob_etl::extract_service::{BatchReport, ExtractService};
use fotmob_etl::rest_client::FotmobClient;
use fotmob_etl::storage::Storage;
use fotmob_etl::team_config::TeamConfig;
use fotmob_etl::transform_service::TransformService;
use tracing::log;

const USAGE: &str = "usage:
  fotmob-etl extract [<team_config.json> [<season>]]
  fotmob-etl transform [<prefix> [<out_dir>]]";

enum Command {
    Extract { team_config: Option<PathBuf>, season: Option<String> },
    Transform { prefix: Option<String>, out_dir: Option<PathBuf> },
}

fn parse_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<Command> {
    let command = args.next().ok_or_else(|| anyhow!("Missing command"))?;
    let first = args.next();
    let second = args.next();
    if let Some(extra) = args.next() {
        return Err(anyhow!("Unexpected argument {extra}"));
    }
    match command.as_str() {
        "extract" => Ok(Command::Extract { team_config: first.map(PathBuf::from), season: second }),
        "transform" => Ok(Command::Transform { prefix: first, out_dir: second.map(PathBuf::from) }),
        other => Err(anyhow!("Unknown command {other}")),
    }
}

async fn extract(config: &Config, team_config: Option<PathBuf>, season: Option<String>) -> anyhow::Result<Vec<BatchReport>> {
    let teams = match &team_config {
        Some(path) => vec![TeamConfig::load(path)?],
        None => TeamConfig::load_all(Path::new(&config.teams_dir))?,
    };
    let storage = Storage::from_config(&config.storage).await;
    let mut client = FotmobClient::start(config)?;

    let reports = match (teams.first(), season) {
        (Some(team), Some(season)) => vec![ExtractService::run_extraction(&mut client, &storage, &config.raw_prefix, team, &season).await],
        _ => ExtractService::run_all(&mut client, &storage, &config.raw_prefix, &teams).await,
    };

    client.close();
    Ok(reports)
}

async fn transform(config: &Config, prefix: Option<String>, out_dir: Option<PathBuf>) -> anyhow::Result<Vec<BatchReport>> {
    let storage = Storage::from_config(&config.storage).await;
    let prefix = prefix.unwrap_or_else(|| config.raw_prefix.clone());
    let out_dir = out_dir.unwrap_or_else(|| PathBuf::from(&config.rows_dir));
    let report = TransformService::run_transform(&storage, &prefix, &out_dir).await?;
    Ok(vec![report])
}

async fn run(command: Command) -> anyhow::Result<Vec<BatchReport>> {
    let config = config_handler::get_config()?;
    match command {
        Command::Extract { team_config, season } => extract(&config, team_config, season).await,
        Command::Transform { prefix, out_dir } => transform(&config, prefix, out_dir).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    if std::env::var_os("RUST_LOG").is_none() {
        // Set the RUST_LOG, if it hasn't been explicitly defined
        std::env::set_var("RUST_LOG", "info")
    }

    // Configure a custom event formatter
    let format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_target(false)
        .with_ansi(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .compact();
    tracing_subscriber::fmt()
        .event_format(format)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let command = match parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{e}\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(command).await {
        Ok(reports) => {
            for report in &reports {
                log::info!("[MAIN] {report}");
                for (item, reason) in &report.failed {
                    log::warn!("[MAIN] {item} failed: {reason}");
                }
            }
            if reports.iter().all(|r| r.is_complete()) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            log::error!("[MAIN] {e:#}");
            ExitCode::FAILURE
        }
    }
}
