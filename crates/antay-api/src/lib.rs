//! JSON HTTP API for the Antay contact form.
//!
//! Exposes an axum [`Router`] backed by any [`antay_core::Notifier`].
//! TLS, tracing layers, and listener setup are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", antay_api::api_router(state))
//! ```

pub mod contact;
pub mod error;
pub mod ping;

use std::sync::Arc;

use antay_core::{Notifier, Rules};
use antay_mail::Mailbox;
use axum::{
  Router,
  extract::DefaultBodyLimit,
  routing::{get, post},
};

pub use error::ApiError;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

// ─── State ────────────────────────────────────────────────────────────────────

/// Settings that shape how submissions are validated and addressed.
#[derive(Debug, Clone)]
pub struct ContactSettings {
  pub mailbox:      Mailbox,
  pub rules:        Rules,
  pub ping_message: String,
}

/// Shared state threaded through the API handlers.
///
/// `notifier` is `None` when the email provider is not configured; the
/// contact endpoint then answers with a configuration error.
pub struct ContactState<N> {
  pub notifier: Option<Arc<N>>,
  pub settings: Arc<ContactSettings>,
}

impl<N> Clone for ContactState<N> {
  fn clone(&self) -> Self {
    Self { notifier: self.notifier.clone(), settings: self.settings.clone() }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<N>(state: ContactState<N>) -> Router<()>
where
  N: Notifier + 'static,
{
  Router::new()
    .route("/contact", post(contact::handler::<N>))
    .route("/ping", get(ping::handler::<N>))
    .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
    .with_state(state)
}
