//! [`SendGridNotifier`] — delivery through the SendGrid v3 mail API.

use std::time::Duration;

use antay_core::{Notification, Notifier};
use reqwest::Client;
use serde::Serialize;

use crate::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.sendgrid.com";

/// Recorded in [`Error::Rejected`] when the error body itself cannot be read.
const UNREADABLE_BODY: &str = "<unreadable body>";

/// Connection and sender settings for SendGrid.
#[derive(Clone)]
pub struct SendGridConfig {
  pub api_key:     String,
  /// API origin; overridable so tests can point at a local server.
  pub base_url:    String,
  pub sender:      String,
  pub sender_name: Option<String>,
}

/// Sends each [`Notification`] as one `POST /v3/mail/send` request.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct SendGridNotifier {
  client: Client,
  config: SendGridConfig,
}

impl SendGridNotifier {
  pub fn new(config: SendGridConfig) -> Result<Self> {
    let client = Client::builder().timeout(Duration::from_secs(15)).build()?;
    Ok(Self { client, config })
  }

  fn url(&self) -> String {
    format!("{}/v3/mail/send", self.config.base_url.trim_end_matches('/'))
  }
}

// ─── Wire format ─────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct Address<'a> {
  email: &'a str,
  #[serde(skip_serializing_if = "Option::is_none")]
  name:  Option<&'a str>,
}

#[derive(Serialize)]
struct Personalization<'a> {
  to: [Address<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
  #[serde(rename = "type")]
  kind:  &'static str,
  value: &'a str,
}

#[derive(Serialize)]
struct MailSend<'a> {
  personalizations: [Personalization<'a>; 1],
  from:             Address<'a>,
  #[serde(skip_serializing_if = "Option::is_none")]
  reply_to:         Option<Address<'a>>,
  subject:          &'a str,
  /// SendGrid requires `text/plain` before `text/html`.
  content:          [Content<'a>; 2],
}

fn payload<'a>(config: &'a SendGridConfig, n: &'a Notification) -> MailSend<'a> {
  MailSend {
    personalizations: [Personalization { to: [Address { email: &n.to, name: None }] }],
    from:             Address {
      email: &config.sender,
      name:  config.sender_name.as_deref(),
    },
    reply_to:         n.reply_to.as_deref().map(|email| Address { email, name: None }),
    subject:          &n.subject,
    content:          [
      Content { kind: "text/plain", value: &n.text },
      Content { kind: "text/html", value: &n.html },
    ],
  }
}

impl Notifier for SendGridNotifier {
  type Error = Error;

  async fn send(&self, notification: &Notification) -> Result<()> {
    let resp = self
      .client
      .post(self.url())
      .bearer_auth(&self.config.api_key)
      .json(&payload(&self.config, notification))
      .send()
      .await?;

    let status = resp.status();
    if status.is_success() {
      return Ok(());
    }
    let body = resp.text().await.unwrap_or_else(|e| {
      tracing::warn!(error = %e, "failed to read SendGrid error body");
      UNREADABLE_BODY.to_string()
    });
    tracing::error!(status = status.as_u16(), %body, "SendGrid rejected message");
    Err(Error::Rejected { status: status.as_u16(), body })
  }
}
