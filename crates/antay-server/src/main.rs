//! antay contact server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`) layered under
//! `ANTAY_*` environment variables, and serves the contact API over HTTP.
//!
//! # Dry run
//!
//! To exercise the endpoint without an email provider, record notifications
//! in memory and log them instead of sending:
//!
//! ```
//! cargo run -p antay-server --bin server -- --dry-run
//! ```

use std::path::PathBuf;

use antay_mail::{MemoryNotifier, SendGridNotifier};
use antay_server::{ServerConfig, app};
use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Antay contact form server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Log notifications instead of delivering them.
  #[arg(long)]
  dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let server_cfg = ServerConfig::load(&cli.config)?;
  tracing::debug!(config = ?server_cfg, "configuration loaded");

  let settings = server_cfg.contact_settings();
  let router = if cli.dry_run {
    tracing::warn!("dry run: notifications are logged, not delivered");
    app(settings, Some(MemoryNotifier::logging()))
  } else {
    let notifier = match server_cfg.sendgrid() {
      Some(sg) => Some(SendGridNotifier::new(sg).context("failed to build SendGrid client")?),
      None => {
        tracing::warn!("no SendGrid API key configured; /api/contact will answer 500");
        None
      }
    };
    app(settings, notifier)
  };

  let address = server_cfg.address();
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, router)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!("failed to listen for ctrl-c: {e}");
    std::future::pending::<()>().await;
  }
  tracing::info!("shutting down");
}
