/* src/cli/core/src/main.rs */

mod config;
mod inspect;
mod serve;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use config::{IsomorphConfig, apply_env, resolve_config};

#[derive(Parser)]
#[command(name = "isomorph", about = "Isomorphic render server for the host and patient-portal apps")]
struct Cli {
  /// Path to isomorph.toml (auto-detected if omitted)
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Serve every app over HTTP
  Serve {
    /// Port to listen on (overrides config and PORT)
    #[arg(short, long)]
    port: Option<u16>,
  },
  /// Show which loader tier supplies an app's entry module
  Resolve {
    /// App id, e.g. host or patient-portal
    app: String,
    /// Also render this URL with the resolved entry
    #[arg(short, long)]
    url: Option<String>,
  },
  /// Render a request path to stdout as the server would
  Render {
    /// Request path, e.g. /patient-portal/dashboard
    path: String,
  },
}

fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  tracing_subscriber::registry().with(filter).with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)).init();
}

/// Resolve config path (explicit or auto-detected), parse it, apply env overrides
fn load(explicit: Option<PathBuf>) -> Result<(PathBuf, IsomorphConfig)> {
  let cwd = std::env::current_dir().context("failed to get cwd")?;
  let (base, config) = resolve_config(explicit, &cwd)?;
  let config = apply_env(config, |key| std::env::var(key).ok())?;
  Ok((base, config))
}

#[tokio::main]
async fn main() -> Result<()> {
  init_tracing();
  let cli = Cli::parse();
  let (base, config) = load(cli.config)?;

  match cli.command {
    Command::Serve { port } => serve::run(&base, &config, port).await,
    Command::Resolve { app, url } => inspect::resolve(&base, &config, &app, url.as_deref()).await,
    Command::Render { path } => inspect::render(&base, &config, &path).await,
  }
}
