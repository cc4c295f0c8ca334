//! [`MemoryNotifier`] — records notifications instead of delivering them.

use std::sync::{Arc, Mutex, PoisonError};

use antay_core::{Notification, Notifier};

use crate::{Error, Result};

/// A notifier that keeps every accepted notification in memory.
///
/// Cloning is cheap and clones share the same outbox. For long-running dry
/// runs use [`MemoryNotifier::logging`], which keeps nothing.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotifier {
  outbox:     Arc<Mutex<Vec<Notification>>>,
  /// Reject every send once this many have been accepted.
  fail_after: Option<usize>,
  /// Log each notification without adding it to the outbox.
  discard:    bool,
}

impl MemoryNotifier {
  pub fn new() -> Self { Self::default() }

  /// A notifier that only logs what it would have sent. Its outbox stays
  /// empty no matter how many notifications pass through.
  pub fn logging() -> Self { Self { discard: true, ..Self::default() } }

  /// A notifier that accepts `accepted` notifications and fails afterwards.
  pub fn failing_after(accepted: usize) -> Self {
    Self { fail_after: Some(accepted), ..Self::default() }
  }

  /// Snapshot of everything accepted so far, in send order.
  pub fn sent(&self) -> Vec<Notification> {
    self.outbox.lock().unwrap_or_else(PoisonError::into_inner).clone()
  }

  pub fn len(&self) -> usize {
    self.outbox.lock().unwrap_or_else(PoisonError::into_inner).len()
  }

  pub fn is_empty(&self) -> bool { self.len() == 0 }
}

impl Notifier for MemoryNotifier {
  type Error = Error;

  async fn send(&self, notification: &Notification) -> Result<()> {
    let mut outbox = self.outbox.lock().unwrap_or_else(PoisonError::into_inner);
    if self.fail_after.is_some_and(|n| outbox.len() >= n) {
      return Err(Error::Simulated(notification.to.clone()));
    }
    tracing::info!(
      to = %notification.to,
      subject = %notification.subject,
      "notification recorded (not delivered)"
    );
    if !self.discard {
      outbox.push(notification.clone());
    }
    Ok(())
  }
}
