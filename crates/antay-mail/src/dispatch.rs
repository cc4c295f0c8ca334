//! Sequential delivery of the operator notification and the acknowledgment.

use std::fmt;

use antay_core::{ContactRequest, Notifier};
use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::compose::{Mailbox, compose_acknowledgment, compose_operator};

/// Which of the two notifications was being sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStep {
  Operator,
  Acknowledgment,
}

impl fmt::Display for DispatchStep {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Operator => "operator",
      Self::Acknowledgment => "acknowledgment",
    })
  }
}

#[derive(Debug, Error)]
#[error("{step} notification failed: {source}")]
pub struct DispatchError<E: std::error::Error + 'static> {
  pub step:   DispatchStep,
  #[source]
  pub source: E,
}

/// Send the operator notification, then the acknowledgment.
///
/// Stops at the first failure. A failed acknowledgment does not undo the
/// operator notification that already went out.
pub async fn dispatch<N>(
  notifier: &N,
  submission: &ContactRequest,
  mailbox: &Mailbox,
  reference: Uuid,
) -> Result<(), DispatchError<N::Error>>
where
  N: Notifier,
{
  let internal = compose_operator(submission, mailbox, Utc::now(), reference);
  notifier
    .send(&internal)
    .await
    .map_err(|source| DispatchError { step: DispatchStep::Operator, source })?;
  tracing::debug!(%reference, to = %internal.to, "operator notification sent");

  let ack = compose_acknowledgment(submission, mailbox);
  if let Err(source) = notifier.send(&ack).await {
    tracing::warn!(
      %reference,
      "operator was notified but the acknowledgment failed"
    );
    return Err(DispatchError { step: DispatchStep::Acknowledgment, source });
  }
  tracing::debug!(%reference, "acknowledgment sent");

  Ok(())
}
