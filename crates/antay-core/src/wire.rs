//! JSON shapes exchanged between the form and `POST /api/contact`.

use serde::{Deserialize, Serialize};

use crate::{Result, validate::ValidationErrorSet};

/// Generic message shown when a submission fails without a usable reason.
pub const GENERIC_FAILURE: &str = "Failed to send message. Please try again later.";

/// Message returned once both notifications have gone out.
pub const SUCCESS_MESSAGE: &str =
  "Your message has been sent successfully. We will get back to you soon.";

// ─── Request ─────────────────────────────────────────────────────────────────

/// Request body of `POST /api/contact`.
///
/// Every field defaults to empty so that a missing key is reported as a
/// validation failure rather than a decoding error. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactRequest {
  pub full_name: String,
  pub email:     String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub subject:   Option<String>,
  pub message:   String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub phone:     Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub honeypot:  Option<String>,
}

impl ContactRequest {
  /// A copy with every value trimmed; blank optionals become `None`.
  pub fn trimmed(&self) -> Self {
    fn opt(v: &Option<String>) -> Option<String> {
      v.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
    }
    Self {
      full_name: self.full_name.trim().to_string(),
      email:     self.email.trim().to_string(),
      subject:   opt(&self.subject),
      message:   self.message.trim().to_string(),
      phone:     opt(&self.phone),
      honeypot:  opt(&self.honeypot),
    }
  }

  pub fn is_bot(&self) -> bool {
    self.honeypot.as_deref().is_some_and(|h| !h.trim().is_empty())
  }

  /// The subject, or an empty string when none was given.
  pub fn subject_or_empty(&self) -> &str { self.subject.as_deref().unwrap_or("") }
}

// ─── Response ────────────────────────────────────────────────────────────────

/// Body of every `POST /api/contact` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactResponse {
  pub success: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error:   Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub details: Option<ValidationErrorSet>,
}

impl ContactResponse {
  pub fn ok(message: impl Into<String>) -> Self {
    Self { success: true, message: Some(message.into()), ..Self::default() }
  }

  pub fn failed(error: impl Into<String>) -> Self {
    Self { success: false, error: Some(error.into()), ..Self::default() }
  }

  pub fn with_details(mut self, details: ValidationErrorSet) -> Self {
    self.details = Some(details);
    self
  }

  pub fn from_json(bytes: &[u8]) -> Result<Self> { Ok(serde_json::from_slice(bytes)?) }
}

// ─── Result ──────────────────────────────────────────────────────────────────

/// Outcome of one submission as seen by the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmissionResult {
  Success {
    message: String,
  },
  Failure {
    error:   String,
    details: Option<ValidationErrorSet>,
  },
}

impl SubmissionResult {
  pub fn is_success(&self) -> bool { matches!(self, Self::Success { .. }) }

  pub fn failure(error: impl Into<String>) -> Self {
    Self::Failure { error: error.into(), details: None }
  }
}

impl From<ContactResponse> for SubmissionResult {
  fn from(resp: ContactResponse) -> Self {
    if resp.success {
      Self::Success {
        message: resp.message.unwrap_or_else(|| SUCCESS_MESSAGE.to_string()),
      }
    } else {
      Self::Failure {
        error:   resp.error.unwrap_or_else(|| GENERIC_FAILURE.to_string()),
        details: resp.details,
      }
    }
  }
}

impl From<SubmissionResult> for ContactResponse {
  fn from(result: SubmissionResult) -> Self {
    match result {
      SubmissionResult::Success { message } => Self::ok(message),
      SubmissionResult::Failure { error, details } => {
        Self { details, ..Self::failed(error) }
      }
    }
  }
}
