//! The in-progress contact form state held by the client.
//!
//! A draft is created empty when the form mounts, mutated on every keystroke,
//! and cleared after a successful submission. It is never persisted.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::{Error, Result, wire::ContactRequest};

// ─── Field ───────────────────────────────────────────────────────────────────

/// A named input of the contact form. The string form matches the JSON key
/// used on the wire.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Field {
  FullName,
  Email,
  Subject,
  Message,
  Phone,
  /// Hidden from humans; anything typed here marks the submission as a bot.
  Honeypot,
}

impl Field {
  /// Human-readable label used in prompts and aggregate error messages.
  pub fn label(self) -> &'static str {
    match self {
      Self::FullName => "Full name",
      Self::Email => "Email",
      Self::Subject => "Subject",
      Self::Message => "Message",
      Self::Phone => "Phone",
      Self::Honeypot => "Website",
    }
  }
}

// ─── Draft ───────────────────────────────────────────────────────────────────

/// Raw, untrimmed form input exactly as the user typed it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDraft {
  pub full_name: String,
  pub email:     String,
  pub subject:   String,
  pub message:   String,
  pub phone:     String,
  pub honeypot:  String,
}

impl SubmissionDraft {
  pub fn get(&self, field: Field) -> &str {
    match field {
      Field::FullName => &self.full_name,
      Field::Email => &self.email,
      Field::Subject => &self.subject,
      Field::Message => &self.message,
      Field::Phone => &self.phone,
      Field::Honeypot => &self.honeypot,
    }
  }

  pub fn get_mut(&mut self, field: Field) -> &mut String {
    match field {
      Field::FullName => &mut self.full_name,
      Field::Email => &mut self.email,
      Field::Subject => &mut self.subject,
      Field::Message => &mut self.message,
      Field::Phone => &mut self.phone,
      Field::Honeypot => &mut self.honeypot,
    }
  }

  /// Replace the value of `field`.
  pub fn set(&mut self, field: Field, value: impl Into<String>) {
    *self.get_mut(field) = value.into();
  }

  /// Replace a field addressed by its wire name (e.g. `"fullName"`).
  pub fn set_by_name(&mut self, name: &str, value: impl Into<String>) -> Result<Field> {
    let field =
      Field::from_str(name).map_err(|_| Error::UnknownField(name.to_string()))?;
    self.set(field, value);
    Ok(field)
  }

  /// Reset every field to its empty initial value.
  pub fn clear(&mut self) { *self = Self::default(); }

  /// True once the honeypot holds anything other than whitespace.
  pub fn is_bot(&self) -> bool { !self.honeypot.trim().is_empty() }

  /// A copy with leading and trailing whitespace removed from every field.
  pub fn trimmed(&self) -> Self {
    Self {
      full_name: self.full_name.trim().to_string(),
      email:     self.email.trim().to_string(),
      subject:   self.subject.trim().to_string(),
      message:   self.message.trim().to_string(),
      phone:     self.phone.trim().to_string(),
      honeypot:  self.honeypot.trim().to_string(),
    }
  }

  /// The trimmed payload sent over the wire. Empty optional fields are
  /// omitted and the honeypot never leaves the client.
  pub fn to_request(&self) -> ContactRequest {
    let t = self.trimmed();
    ContactRequest {
      full_name: t.full_name,
      email:     t.email,
      subject:   (!t.subject.is_empty()).then_some(t.subject),
      message:   t.message,
      phone:     (!t.phone.is_empty()).then_some(t.phone),
      honeypot:  None,
    }
  }
}
