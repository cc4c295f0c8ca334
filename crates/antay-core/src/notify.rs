//! The `Notifier` trait and the outbound message it delivers.
//!
//! Implemented by delivery backends (e.g. `antay-mail`). The HTTP endpoint
//! depends on this abstraction, not on any concrete email provider.

use std::future::Future;

use serde::{Deserialize, Serialize};

/// One outbound email with both a plain-text and an HTML body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
  pub to:       String,
  /// Address replies should go to, when different from the sender.
  pub reply_to: Option<String>,
  pub subject:  String,
  pub text:     String,
  pub html:     String,
}

/// Delivers notifications to a human recipient.
///
/// Each call is a single independent side effect: there is no batching and no
/// deduplication, so sending the same notification twice delivers it twice.
pub trait Notifier: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Deliver `notification`, resolving once the provider has accepted it.
  fn send<'a>(
    &'a self,
    notification: &'a Notification,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
