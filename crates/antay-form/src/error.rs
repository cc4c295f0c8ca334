//! Error type for the form transports.

use thiserror::Error;

/// The request never produced a usable [`SubmissionResult`](antay_core::SubmissionResult).
#[derive(Debug, Error)]
pub enum TransportError {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("undecodable response: {0}")]
  Decode(#[from] antay_core::Error),

  #[error("unexpected response status {0}")]
  UnexpectedStatus(u16),
}
