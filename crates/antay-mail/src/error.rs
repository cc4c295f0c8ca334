//! Error type for `antay-mail`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  /// The provider answered with a non-success status.
  #[error("provider rejected message with status {status}: {body}")]
  Rejected { status: u16, body: String },

  #[error("simulated delivery failure to {0}")]
  Simulated(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
