//! Email delivery for the Antay contact pipeline.
//!
//! Provides two [`Notifier`](antay_core::Notifier) backends, the SendGrid
//! HTTP API client and an in-memory recorder, plus the composition of the
//! operator and acknowledgment emails and the sequential dispatch of both.

mod compose;
mod dispatch;
mod memory;
mod sendgrid;

pub mod error;

pub use compose::{Mailbox, compose_acknowledgment, compose_operator};
pub use dispatch::{DispatchError, DispatchStep, dispatch};
pub use error::{Error, Result};
pub use memory::MemoryNotifier;
pub use sendgrid::{DEFAULT_BASE_URL, SendGridConfig, SendGridNotifier};
