use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use pano_core::PanoConfig;
use pano_scheduler::StatusEngine;
use pano_store::ConfigStore;
use tracing::{info, warn};

mod render;

/// Short git commit hash embedded at compile time by build.rs.
const GIT_SHA: &str = env!("PANO_GIT_SHA");

/// Accepted format for `--at`.
const AT_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Parser)]
#[command(
    name = "pano",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("PANO_GIT_SHA"), ")"),
    about = "School status board: current period, duty roster, class lessons",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file (default: $PANO_CONFIG or ./pano.toml)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Board document path, overrides store.path
    #[arg(long, global = true)]
    data: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one status snapshot
    Status {
        /// Evaluate at this local time ("YYYY-MM-DD HH:MM") instead of now
        #[arg(long)]
        at: Option<String>,

        /// Emit the snapshot as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Re-print the snapshot on an interval until Ctrl-C
    Watch {
        /// Seconds between snapshots (default: watch.interval_secs)
        #[arg(short, long)]
        interval: Option<u64>,

        /// Emit each snapshot as one JSON line
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Apply the weekly duty rotation if it is due
    Rotate {
        /// Rotate even if this week was already rotated
        #[arg(long, default_value = "false")]
        force: bool,

        /// Evaluate at this local time ("YYYY-MM-DD HH:MM") instead of now
        #[arg(long)]
        at: Option<String>,
    },

    /// Create the board document from defaults if it does not exist
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    // logs go to stderr so `--json` output on stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pano_cli=info,pano_scheduler=info,pano_store=info".into()),
        )
        .init();

    let cli = Cli::parse();

    // settings: --config > PANO_CONFIG env > ./pano.toml
    let mut config = PanoConfig::load(cli.config.as_deref()).unwrap_or_else(|e| {
        warn!("Config load failed ({}), using defaults", e);
        PanoConfig::default()
    });
    if let Some(data) = cli.data {
        config.store.path = data;
    }

    info!(version = env!("CARGO_PKG_VERSION"), git = GIT_SHA, path = %config.store.path, "pano starting");
    let engine = StatusEngine::new(
        ConfigStore::open(&config.store.path),
        config.display.clone(),
    );

    match cli.command {
        Commands::Status { at, json } => {
            let now = resolve_now(at.as_deref())?;
            print_status(&engine, now, json)?;
        }
        Commands::Watch { interval, json } => {
            let secs = interval.unwrap_or(config.watch.interval_secs).max(1);
            watch(&engine, secs, json).await?;
        }
        Commands::Rotate { force, at } => {
            let now = resolve_now(at.as_deref())?;
            let outcome = engine
                .rotate_now(now, force)
                .context("rotation could not be applied")?;
            println!("Duty rotation: {outcome}");
        }
        Commands::Init => {
            engine
                .store()
                .load()
                .context("board document could not be read")?;
            println!("Board document ready at {}", engine.store().path().display());
        }
    }

    Ok(())
}

/// Pinned time from `--at`, or the local wall clock.
fn resolve_now(at: Option<&str>) -> Result<NaiveDateTime> {
    match at {
        Some(raw) => NaiveDateTime::parse_from_str(raw.trim(), AT_FORMAT)
            .with_context(|| format!("--at must look like \"2025-03-20 08:10\", got {raw:?}")),
        None => Ok(chrono::Local::now().naive_local()),
    }
}

fn print_status(engine: &StatusEngine, now: NaiveDateTime, json: bool) -> Result<()> {
    let outcome = engine.status(now);
    if let Some(ref e) = outcome.save_error {
        warn!(error = %e, "rotation not saved; it will be retried on the next query");
    }
    if json {
        println!("{}", serde_json::to_string(&outcome.snapshot)?);
    } else {
        let days_left = outcome.snapshot.countdown.days_remaining(now);
        print!("{}", render::render_text(&outcome.snapshot, days_left));
    }
    Ok(())
}

/// Kiosk loop: one snapshot per tick until Ctrl-C.
async fn watch(engine: &StatusEngine, interval_secs: u64, json: bool) -> Result<()> {
    info!(interval_secs, "watch loop started");
    let mut interval = tokio::time::interval(std::time::Duration::from_secs(interval_secs));
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            _ = interval.tick() => {
                // read the clock once per snapshot
                let now = chrono::Local::now().naive_local();
                print_status(engine, now, json)?;
            }
            _ = &mut shutdown => {
                info!("watch loop shutting down");
                break;
            }
        }
    }
    Ok(())
}
