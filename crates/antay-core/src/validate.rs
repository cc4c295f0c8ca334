//! Contact form validation rules.
//!
//! The same rules run in the form before anything is sent and again in the
//! HTTP endpoint on whatever arrives. All checks look at trimmed values, so
//! surrounding whitespace never counts toward emptiness or length.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::{
  draft::{Field, SubmissionDraft},
  wire::ContactRequest,
};

// ─── Rule variants ───────────────────────────────────────────────────────────

/// Which variant of the form is being validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rules {
  /// Subject is required.
  #[default]
  Strict,
  /// Subject may be left blank, but a non-blank subject is still checked.
  Relaxed,
}

impl Rules {
  pub fn subject_required(self) -> bool { matches!(self, Self::Strict) }
}

// ─── Error set ───────────────────────────────────────────────────────────────

/// Field name to human-readable error. Serialises as a flat JSON object keyed
/// by wire field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrorSet(BTreeMap<Field, String>);

impl ValidationErrorSet {
  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn get(&self, field: Field) -> Option<&str> { self.0.get(&field).map(String::as_str) }

  pub fn contains(&self, field: Field) -> bool { self.0.contains_key(&field) }

  pub fn insert(&mut self, field: Field, message: impl Into<String>) {
    self.0.insert(field, message.into());
  }

  /// Drop the error for a single field, leaving the others untouched.
  pub fn clear_field(&mut self, field: Field) -> bool { self.0.remove(&field).is_some() }

  pub fn clear(&mut self) { self.0.clear(); }

  pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
    self.0.iter().map(|(f, m)| (*f, m.as_str()))
  }

  pub fn fields(&self) -> impl Iterator<Item = Field> + '_ { self.0.keys().copied() }

  /// All messages joined into a single line, in field order.
  pub fn summary(&self) -> String {
    self.0.values().map(String::as_str).collect::<Vec<_>>().join("; ")
  }
}

// ─── Rules ───────────────────────────────────────────────────────────────────

/// Trimmed view of a submission that the rules run against. `subject` is
/// `None` when it is optional and left blank, which skips its length rule.
#[derive(Debug, Validate)]
struct Checked {
  #[validate(length(min = 2))]
  full_name: String,
  #[validate(custom(function = "email_shape"))]
  email:     String,
  #[validate(length(min = 3))]
  subject:   Option<String>,
  #[validate(length(min = 10))]
  message:   String,
}

impl Checked {
  fn new(full_name: &str, email: &str, subject: Option<&str>, message: &str, rules: Rules) -> Self {
    let subject = subject.map(str::trim).unwrap_or_default();
    Self {
      full_name: full_name.trim().to_owned(),
      email:     email.trim().to_owned(),
      subject:   (rules.subject_required() || !subject.is_empty()).then(|| subject.to_owned()),
      message:   message.trim().to_owned(),
    }
  }

  fn value(&self, field: Field) -> &str {
    match field {
      Field::FullName => &self.full_name,
      Field::Email => &self.email,
      Field::Subject => self.subject.as_deref().unwrap_or_default(),
      Field::Message => &self.message,
      Field::Phone | Field::Honeypot => "",
    }
  }

  fn errors(&self) -> ValidationErrorSet {
    let mut set = ValidationErrorSet::default();
    let Err(errors) = self.validate() else {
      return set;
    };
    for (name, field_errors) in errors.field_errors() {
      let (Some(field), Some(error)) = (field_named(&name), field_errors.first()) else {
        continue;
      };
      set.insert(field, message_for(field, self.value(field), error));
    }
    set
  }
}

fn field_named(name: &str) -> Option<Field> {
  match name {
    "full_name" => Some(Field::FullName),
    "email" => Some(Field::Email),
    "subject" => Some(Field::Subject),
    "message" => Some(Field::Message),
    _ => None,
  }
}

fn email_shape(value: &str) -> Result<(), ValidationError> {
  if value.is_empty() {
    Err(ValidationError::new("required"))
  } else if is_valid_email(value) {
    Ok(())
  } else {
    Err(ValidationError::new("email"))
  }
}

fn message_for(field: Field, value: &str, error: &ValidationError) -> String {
  if value.is_empty() {
    return format!("{} is required", field.label());
  }
  match error.params.get("min").and_then(serde_json::Value::as_u64) {
    Some(min) if error.code == "length" => {
      format!("{} must be at least {min} characters", field.label())
    }
    _ if field == Field::Email => "Invalid email address".to_owned(),
    _ => format!("{} is invalid", field.label()),
  }
}

/// Validate a client-side draft.
pub fn validate(draft: &SubmissionDraft, rules: Rules) -> ValidationErrorSet {
  Checked::new(
    &draft.full_name,
    &draft.email,
    Some(draft.subject.as_str()),
    &draft.message,
    rules,
  )
  .errors()
}

/// Validate a payload received over the wire.
pub fn validate_request(request: &ContactRequest, rules: Rules) -> ValidationErrorSet {
  Checked::new(
    &request.full_name,
    &request.email,
    request.subject.as_deref(),
    &request.message,
    rules,
  )
  .errors()
}

/// Accepts the simple `local@domain.tld` shape: exactly one `@`, no
/// whitespace, a non-empty local part, and a dot inside the domain with at
/// least one character on either side.
pub fn is_valid_email(candidate: &str) -> bool {
  if candidate.chars().any(char::is_whitespace) {
    return false;
  }
  let Some((local, domain)) = candidate.split_once('@') else {
    return false;
  };
  if local.is_empty() || domain.contains('@') {
    return false;
  }
  domain
    .char_indices()
    .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;
  use strum::IntoEnumIterator;

  use super::*;

  fn valid_draft() -> SubmissionDraft {
    SubmissionDraft {
      full_name: "Ann Lee".into(),
      email:     "ann@x.com".into(),
      subject:   "Partnership".into(),
      message:   "Interested in collaborating on real estate.".into(),
      ..Default::default()
    }
  }

  #[test]
  fn email_shapes() {
    assert!(is_valid_email("a@b.co"));
    assert!(is_valid_email("first.last@sub.example.org"));
    assert!(!is_valid_email("a@b"));
    assert!(!is_valid_email("a.b.com"));
    assert!(!is_valid_email("a @b.com"));
    assert!(!is_valid_email("@b.co"));
    assert!(!is_valid_email("a@b@c.co"));
    assert!(!is_valid_email("a@.co"));
    assert!(!is_valid_email("a@b."));
  }

  #[test]
  fn valid_draft_has_no_errors() {
    assert!(validate(&valid_draft(), Rules::Strict).is_empty());
    assert!(validate(&valid_draft(), Rules::Relaxed).is_empty());
  }

  #[test]
  fn short_message_fails_alone() {
    let draft = SubmissionDraft {
      full_name: "Jo".into(),
      email:     "jo@x.com".into(),
      subject:   "Hi!".into(),
      message:   "short".into(),
      ..Default::default()
    };
    let errors = validate(&draft, Rules::Strict);
    assert_eq!(errors.fields().collect::<Vec<_>>(), vec![Field::Message]);
    assert_eq!(
      errors.get(Field::Message),
      Some("Message must be at least 10 characters")
    );
  }

  #[test]
  fn every_empty_required_field_is_reported() {
    let errors = validate(&SubmissionDraft::default(), Rules::Strict);
    assert_eq!(
      errors.fields().collect::<Vec<_>>(),
      vec![Field::FullName, Field::Email, Field::Subject, Field::Message]
    );
    assert_eq!(errors.get(Field::Email), Some("Email is required"));
  }

  #[test]
  fn blanking_any_required_field_fails() {
    for field in Field::iter() {
      let mut draft = valid_draft();
      draft.set(field, "   ");
      let errors = validate(&draft, Rules::Strict);
      let required = matches!(
        field,
        Field::FullName | Field::Email | Field::Subject | Field::Message
      );
      assert_eq!(errors.contains(field), required, "field {field}");
    }
  }

  #[test]
  fn whitespace_does_not_count_toward_length() {
    let mut draft = valid_draft();
    draft.set(Field::FullName, "  J  ");
    draft.set(Field::Message, "   123456789   ");
    let errors = validate(&draft, Rules::Strict);
    assert_eq!(
      errors.get(Field::FullName),
      Some("Full name must be at least 2 characters")
    );
    assert!(errors.contains(Field::Message));
  }

  #[test]
  fn relaxed_rules_allow_blank_subject_but_check_short_ones() {
    let mut draft = valid_draft();
    draft.set(Field::Subject, "");
    assert!(validate(&draft, Rules::Relaxed).is_empty());
    assert!(validate(&draft, Rules::Strict).contains(Field::Subject));

    draft.set(Field::Subject, "Hi");
    assert_eq!(
      validate(&draft, Rules::Relaxed).get(Field::Subject),
      Some("Subject must be at least 3 characters")
    );
  }

  #[test]
  fn request_validation_matches_draft_validation() {
    let draft = SubmissionDraft { message: "short".into(), ..valid_draft() };
    assert_eq!(
      validate_request(&draft.to_request(), Rules::Strict),
      validate(&draft, Rules::Strict)
    );
    let missing_subject = ContactRequest { subject: None, ..valid_draft().to_request() };
    assert!(validate_request(&missing_subject, Rules::Strict).contains(Field::Subject));
  }

  #[test]
  fn error_set_clears_single_field() {
    let mut errors = validate(&SubmissionDraft::default(), Rules::Strict);
    assert!(errors.clear_field(Field::Email));
    assert!(!errors.clear_field(Field::Email));
    assert_eq!(errors.len(), 3);
    assert!(errors.summary().starts_with("Full name is required; "));
  }

  #[test]
  fn malformed_email_is_reported_once_with_fixed_message() {
    let mut draft = valid_draft();
    draft.set(Field::Email, " a@b ");
    let errors = validate(&draft, Rules::Strict);
    assert_eq!(errors.fields().collect::<Vec<_>>(), vec![Field::Email]);
    assert_eq!(errors.get(Field::Email), Some("Invalid email address"));
  }

  #[test]
  fn length_counts_characters_not_bytes() {
    let mut draft = valid_draft();
    draft.set(Field::FullName, "Ñu");
    draft.set(Field::Message, "ééééééééé");
    let errors = validate(&draft, Rules::Strict);
    assert!(!errors.contains(Field::FullName));
    assert_eq!(
      errors.get(Field::Message),
      Some("Message must be at least 10 characters")
    );
  }
}
