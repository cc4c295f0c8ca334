//! `antay-contact` — terminal contact form for the Antay contact API.
//!
//! # Usage
//!
//! ```
//! antay-contact --url http://localhost:8080
//! antay-contact --hosted-form https://forms.example.com/f/abc123 --simple
//! antay-contact --config ~/.config/antay/contact.toml
//! ```
//!
//! Set `ANTAY_LOG` (e.g. `ANTAY_LOG=debug`) to write logs to
//! `antay-contact.log` in the working directory.

mod app;
mod ui;

use std::{fs::File, io, path::PathBuf, sync::Mutex, time::Duration};

use anyhow::{Context, Result};
use antay_form::{
  ApiTransport, FormController, FormOptions, HostedFormTransport, ToastLog, Transport,
};
use app::App;
use clap::Parser;
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

const DEFAULT_URL: &str = "http://localhost:8080";
const LOG_FILE: &str = "antay-contact.log";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "antay-contact", about = "Terminal contact form for Antay")]
struct Args {
  /// Path to a TOML config file (url, hosted_form, simple).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the contact API (default: http://localhost:8080).
  #[arg(long, env = "ANTAY_URL")]
  url: Option<String>,

  /// Submit to a hosted form endpoint instead of the contact API.
  #[arg(long, value_name = "URL", conflicts_with = "url")]
  hosted_form: Option<String>,

  /// Subject optional, shorter result display.
  #[arg(long)]
  simple: bool,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:         String,
  #[serde(default)]
  hosted_form: String,
  #[serde(default)]
  simple:      bool,
}

fn non_empty(s: &str) -> Option<String> { (!s.trim().is_empty()).then(|| s.to_owned()) }

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();
  init_logging()?;

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  let options = if args.simple || file_cfg.simple {
    FormOptions::simple()
  } else {
    FormOptions::rich()
  };

  // CLI flags override the config file. An explicit --url wins over a
  // hosted form named only in the file.
  let hosted = match (&args.url, &args.hosted_form) {
    (Some(_), _) => None,
    (None, Some(endpoint)) => Some(endpoint.clone()),
    (None, None) => non_empty(&file_cfg.hosted_form),
  };

  match hosted {
    Some(endpoint) => {
      let transport = HostedFormTransport::new(endpoint.clone())?;
      run(transport, options, endpoint).await
    }
    None => {
      let url = args
        .url
        .or_else(|| non_empty(&file_cfg.url))
        .unwrap_or_else(|| DEFAULT_URL.to_string());
      let transport = ApiTransport::new(url.clone())?;
      run(transport, options, url).await
    }
  }
}

/// The terminal belongs to the UI, so logs only go to a file and only on
/// request.
fn init_logging() -> Result<()> {
  let Ok(directives) = std::env::var("ANTAY_LOG") else {
    return Ok(());
  };
  let file = File::create(LOG_FILE).with_context(|| format!("creating {LOG_FILE}"))?;
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::new(directives))
    .with_writer(Mutex::new(file))
    .with_ansi(false)
    .init();
  Ok(())
}

async fn run<T: Transport + 'static>(
  transport: T,
  options: FormOptions,
  target: String,
) -> Result<()> {
  tracing::info!(%target, ?options, "starting contact form");
  let toasts = ToastLog::new();
  let form = FormController::new(transport, toasts.clone(), options);
  let mut app = App::new(form, toasts, target);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let run_result = run_event_loop(&mut terminal, &mut app).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop<T: Transport + 'static>(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App<T>,
) -> Result<()> {
  loop {
    app.poll_submit().await;
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting. The short
    // timeout also picks up finished submissions and the timed reset to idle
    // without a keypress.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(Event::Key(key)) = maybe_event {
      if !app.handle_key(key) {
        break;
      }
    }
  }

  Ok(())
}
