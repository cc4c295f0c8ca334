//! User-facing notifications raised by the form.

use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
  Success,
  Error,
}

/// A short message shown to the user after a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
  pub kind:        ToastKind,
  pub title:       String,
  pub description: String,
}

impl Toast {
  pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
    Self { kind: ToastKind::Success, title: title.into(), description: description.into() }
  }

  pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
    Self { kind: ToastKind::Error, title: title.into(), description: description.into() }
  }
}

/// Displays toasts.
pub trait Toaster {
  fn show(&self, toast: Toast);
}

/// Keeps every toast shown. Clones share the same history, so a UI can read
/// what the controller raised.
#[derive(Debug, Clone, Default)]
pub struct ToastLog {
  shown: Arc<Mutex<Vec<Toast>>>,
}

impl ToastLog {
  pub fn new() -> Self { Self::default() }

  pub fn latest(&self) -> Option<Toast> {
    self.shown.lock().unwrap_or_else(PoisonError::into_inner).last().cloned()
  }

  pub fn all(&self) -> Vec<Toast> {
    self.shown.lock().unwrap_or_else(PoisonError::into_inner).clone()
  }

  pub fn is_empty(&self) -> bool {
    self.shown.lock().unwrap_or_else(PoisonError::into_inner).is_empty()
  }
}

impl Toaster for ToastLog {
  fn show(&self, toast: Toast) {
    tracing::debug!(kind = ?toast.kind, title = %toast.title, "toast");
    self.shown.lock().unwrap_or_else(PoisonError::into_inner).push(toast);
  }
}
