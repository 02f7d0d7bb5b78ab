//! `journal-server`: serves the life and diary timelines, their detail
//! fragments and the admin API from one SQLite file.
//!
//! Settings come from `config.toml` (see `config.example.toml`) and may be
//! overridden with `JOURNAL_*` variables, e.g. `JOURNAL_HIDE_PRIVATE=true`.
//! Run with `--hash-password` to produce the `admin_password_hash` value.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use journal_core::{
  record::{Activity, Entry, Event, MedicalObservation, Period, Person},
  store::{JournalStore, Record},
};
use journal_store_sqlite::SqliteStore;
use journal_web::{AppState, ServerConfig, auth};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Journal timeline server")]
struct Cli {
  /// Configuration file; missing is fine if `JOURNAL_*` covers the rest.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Read a password from stdin, print its argon2 hash and exit.
  #[arg(long)]
  hash_password: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();
  if cli.hash_password {
    let mut password = String::new();
    std::io::stdin().read_line(&mut password)?;
    let hash = auth::hash_password(password.trim_end_matches(['\n', '\r']))
      .map_err(|e| anyhow::anyhow!("argon2 error: {e}"))?;
    println!("{hash}");
    return Ok(());
  }

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let config = ServerConfig::load(&cli.config)
    .with_context(|| format!("invalid configuration in {:?}", cli.config))?;
  let store = SqliteStore::open(&config.store_path)
    .await
    .with_context(|| format!("failed to open journal at {:?}", config.store_path))?;
  log_contents(&store).await?;

  tracing::info!(
    privacy = ?config.privacy(),
    static_dir = ?config.static_dir,
    "diary privacy and static files"
  );

  let address = format!("{}:{}", config.host, config.port);
  let app = journal_web::router(AppState {
    store:  Arc::new(store),
    auth:   Arc::new(config.auth()),
    config: Arc::new(config),
  });

  let listener = tokio::net::TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  tracing::info!("timelines at http://{address}/timeline/life/ and /timeline/diary/");
  axum::serve(listener, app).await.context("server error")
}

/// Log how many records of each timeline-bearing kind the journal holds.
async fn log_contents(store: &SqliteStore) -> anyhow::Result<()> {
  async fn count<R: Record>(store: &SqliteStore) -> anyhow::Result<usize> {
    let records = store
      .list::<R>(None)
      .await
      .with_context(|| format!("failed to read {}", R::KIND))?;
    Ok(records.len())
  }

  let entries = count::<Entry>(store).await?;
  let activities = count::<Activity>(store).await?;
  let observations = count::<MedicalObservation>(store).await?;
  let events = count::<Event>(store).await?;
  let periods = count::<Period>(store).await?;
  let people = count::<Person>(store).await?;
  tracing::info!(entries, activities, observations, events, periods, people, "opened journal");
  Ok(())
}
