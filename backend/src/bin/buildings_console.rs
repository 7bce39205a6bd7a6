//! Interactive console for managing office buildings.
//!
//! Settings come from `BUILDINGS_*` environment variables and configuration
//! files via OrthoConfig; command-line flags override them. Logs go to stderr
//! so they never interleave with the console transcript.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io;
use std::sync::Arc;

use buildings::config::BuildingsSettings;
use buildings::domain::BuildingUseCases;
use buildings::domain::ports::BuildingRepository;
use buildings::inbound::console::ConsoleSession;
use buildings::outbound::InMemoryBuildingRepository;
use buildings::outbound::persistence::{ConnectionConfig, DbConnection, DieselBuildingRepository};
use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tokio::io::BufReader;
use tokio::runtime::Builder;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

/// `buildings-console` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "buildings-console",
    about = "Manage office buildings and their parking from the terminal",
    version
)]
struct CliArgs {
    /// SQLite database path. Falls back to `BUILDINGS_DATABASE_URL`.
    #[arg(long = "database-url", value_name = "path")]
    database_url: Option<String>,
    /// Keep buildings in memory for this session only.
    #[arg(long = "in-memory")]
    in_memory: bool,
    /// Emit logs as JSON lines.
    #[arg(long = "log-json")]
    log_json: bool,
}

/// Settings after command-line overrides are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ResolvedSettings {
    database_url: String,
    in_memory: bool,
    log_json: bool,
}

impl ResolvedSettings {
    fn merge(args: CliArgs, settings: &BuildingsSettings) -> Self {
        Self {
            database_url: args
                .database_url
                .unwrap_or_else(|| settings.database_url().to_owned()),
            in_memory: args.in_memory || settings.in_memory,
            log_json: args.log_json || settings.log_json,
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = CliArgs::try_parse()?;
    let settings = BuildingsSettings::load_from_iter([OsString::from("buildings-console")])
        .map_err(|err| eyre!("failed to load buildings settings: {err}"))?;
    let resolved = ResolvedSettings::merge(args, &settings);
    init_tracing(resolved.log_json)?;

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build console runtime")?;
    runtime.block_on(async_main(resolved))
}

fn init_tracing(json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt().with_env_filter(filter).with_writer(io::stderr);
    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|err| eyre!("failed to install tracing subscriber: {err}"))
}

async fn async_main(settings: ResolvedSettings) -> Result<()> {
    if settings.in_memory {
        info!("using in-memory storage");
        return run_console(Arc::new(InMemoryBuildingRepository::new())).await;
    }

    info!(database_url = %settings.database_url, "opening building database");
    let conn = DbConnection::open(ConnectionConfig::new(&settings.database_url))
        .await
        .wrap_err("failed to open building database")?;
    let repository = DieselBuildingRepository::new(conn, Arc::new(DefaultClock))
        .await
        .wrap_err("failed to load stored buildings")?;
    run_console(Arc::new(repository)).await
}

async fn run_console<R: BuildingRepository>(repository: Arc<R>) -> Result<()> {
    let use_cases = Arc::new(BuildingUseCases::new(repository));
    let mut session = ConsoleSession::new(use_cases, io::stdout().lock());
    session
        .run(BufReader::new(tokio::io::stdin()))
        .await
        .wrap_err("console session failed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn settings(database_url: Option<&str>, in_memory: bool) -> BuildingsSettings {
        BuildingsSettings {
            database_url: database_url.map(str::to_owned),
            in_memory,
            log_json: false,
        }
    }

    #[rstest]
    fn flags_override_loaded_settings() {
        let args = CliArgs::parse_from(["buildings-console", "--database-url", "cli.sqlite3"]);
        let resolved = ResolvedSettings::merge(args, &settings(Some("env.sqlite3"), false));
        assert_eq!(resolved.database_url, "cli.sqlite3");
        assert!(!resolved.in_memory);
    }

    #[rstest]
    fn loaded_settings_fill_missing_flags() {
        let args = CliArgs::parse_from(["buildings-console"]);
        let resolved = ResolvedSettings::merge(args, &settings(None, true));
        assert_eq!(resolved.database_url, "buildings.sqlite3");
        assert!(resolved.in_memory);
    }
}
