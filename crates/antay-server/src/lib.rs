//! HTTP server wiring for the Antay contact endpoint.
//!
//! Loads [`ServerConfig`] from `config.toml` and `ANTAY_*` environment
//! variables, and assembles the top-level [`Router`] with the contact API
//! nested under `/api`.

use std::{path::Path, sync::Arc};

use anyhow::Context as _;
use antay_api::{ContactSettings, ContactState, api_router};
use antay_core::{Notifier, Rules};
use antay_mail::{Mailbox, SendGridConfig};
use axum::Router;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` layered
/// under `ANTAY_*` environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:              String,
  pub port:              u16,
  pub operator_address:  String,
  pub sender_address:    String,
  pub sender_name:       Option<String>,
  pub site_name:         String,
  pub site_url:          String,
  pub require_subject:   bool,
  pub ping_message:      String,
  /// Absent key is not fatal: the contact endpoint reports it per request.
  pub sendgrid_api_key:  Option<String>,
  pub sendgrid_base_url: String,
}

impl std::fmt::Debug for ServerConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ServerConfig")
      .field("host", &self.host)
      .field("port", &self.port)
      .field("operator_address", &self.operator_address)
      .field("sender_address", &self.sender_address)
      .field("site_name", &self.site_name)
      .field("require_subject", &self.require_subject)
      .field("sendgrid_api_key", &self.sendgrid_api_key.as_ref().map(|_| "<redacted>"))
      .field("sendgrid_base_url", &self.sendgrid_base_url)
      .finish_non_exhaustive()
  }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
  Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 8080)?
    .set_default("operator_address", "antayco.info@gmail.com")?
    .set_default("sender_address", "noreply@antay-co.com")?
    .set_default("site_name", "ANTAY-CO Holding")?
    .set_default("site_url", "https://antay-co.com")?
    .set_default("require_subject", true)?
    .set_default("ping_message", "ping")?
    .set_default("sendgrid_base_url", antay_mail::DEFAULT_BASE_URL)
}

impl ServerConfig {
  /// Load from `path` (optional) and the environment. The bare
  /// `SENDGRID_API_KEY` variable is honoured when `ANTAY_SENDGRID_API_KEY`
  /// is not set.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = defaults()?
      .add_source(File::from(path).required(false))
      .add_source(Environment::with_prefix("ANTAY"))
      .build()
      .context("failed to read config file")?;

    let mut cfg: Self = settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")?;
    if cfg.sendgrid_api_key.is_none() {
      cfg.sendgrid_api_key = std::env::var("SENDGRID_API_KEY").ok();
    }
    cfg.sendgrid_api_key = cfg.sendgrid_api_key.filter(|k| !k.trim().is_empty());
    Ok(cfg)
  }

  /// Load from an in-memory TOML document, ignoring the environment.
  pub fn from_toml(toml: &str) -> anyhow::Result<Self> {
    let settings = defaults()?
      .add_source(File::from_str(toml, config::FileFormat::Toml))
      .build()
      .context("failed to parse config")?;
    let cfg: Self = settings.try_deserialize().context("failed to deserialise ServerConfig")?;
    Ok(Self { sendgrid_api_key: cfg.sendgrid_api_key.filter(|k| !k.trim().is_empty()), ..cfg })
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn rules(&self) -> Rules {
    if self.require_subject { Rules::Strict } else { Rules::Relaxed }
  }

  pub fn contact_settings(&self) -> ContactSettings {
    ContactSettings {
      mailbox:      Mailbox {
        operator:  self.operator_address.clone(),
        site_name: self.site_name.clone(),
        site_url:  self.site_url.clone(),
      },
      rules:        self.rules(),
      ping_message: self.ping_message.clone(),
    }
  }

  /// SendGrid settings, or `None` when no API key is configured.
  pub fn sendgrid(&self) -> Option<SendGridConfig> {
    self.sendgrid_api_key.as_ref().map(|api_key| SendGridConfig {
      api_key:     api_key.clone(),
      base_url:    self.sendgrid_base_url.clone(),
      sender:      self.sender_address.clone(),
      sender_name: self.sender_name.clone(),
    })
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the application router: the contact API under `/api`, with request
/// tracing.
pub fn app<N>(settings: ContactSettings, notifier: Option<N>) -> Router
where
  N: Notifier + 'static,
{
  let state = ContactState {
    notifier: notifier.map(Arc::new),
    settings: Arc::new(settings),
  };
  Router::new()
    .nest("/api", api_router(state))
    .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
  use antay_mail::MemoryNotifier;
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  use super::*;

  #[test]
  fn defaults_fill_missing_keys() {
    let cfg = ServerConfig::from_toml("port = 9000").unwrap();
    assert_eq!(cfg.address(), "127.0.0.1:9000");
    assert_eq!(cfg.operator_address, "antayco.info@gmail.com");
    assert_eq!(cfg.rules(), Rules::Strict);
    assert!(cfg.sendgrid().is_none());
  }

  #[test]
  fn blank_api_key_counts_as_missing() {
    let cfg = ServerConfig::from_toml("sendgrid_api_key = \"  \"").unwrap();
    assert!(cfg.sendgrid().is_none());
  }

  #[test]
  fn api_key_enables_sendgrid() {
    let cfg = ServerConfig::from_toml(
      "sendgrid_api_key = \"SG.abc\"\nsender_name = \"Antay\"\nrequire_subject = false",
    )
    .unwrap();
    let sg = cfg.sendgrid().unwrap();
    assert_eq!(sg.api_key, "SG.abc");
    assert_eq!(sg.sender, "noreply@antay-co.com");
    assert_eq!(sg.sender_name.as_deref(), Some("Antay"));
    assert_eq!(cfg.rules(), Rules::Relaxed);
    assert!(!format!("{cfg:?}").contains("SG.abc"));
  }

  #[tokio::test]
  async fn contact_is_mounted_under_api() {
    let cfg = ServerConfig::from_toml("").unwrap();
    let notifier = MemoryNotifier::new();
    let app = app(cfg.contact_settings(), Some(notifier.clone()));

    let body = json!({
      "fullName": "Ann Lee",
      "email": "ann@x.com",
      "subject": "Partnership",
      "message": "Interested in collaborating on real estate.",
    });
    let req = Request::builder()
      .method("POST")
      .uri("/api/contact")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(body.to_string()))
      .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(notifier.len(), 2);
  }

  #[tokio::test]
  async fn unconfigured_server_still_starts_and_reports_500() {
    let cfg = ServerConfig::from_toml("").unwrap();
    let app = app::<MemoryNotifier>(cfg.contact_settings(), None);
    let req = Request::builder()
      .method("POST")
      .uri("/api/contact")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(
        json!({
          "fullName": "Ann Lee",
          "email": "ann@x.com",
          "subject": "Partnership",
          "message": "Interested in collaborating on real estate.",
        })
        .to_string(),
      ))
      .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "Email service not configured");
    assert!(!body.to_string().contains("SENDGRID"));
  }
}
