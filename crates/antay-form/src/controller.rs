//! The contact form state machine.
//!
//! ```text
//! idle --submit(valid)--> submitting --success--> success --timeout--> idle
//!                         submitting --failure--> error   --timeout--> idle
//! idle --submit(invalid)--> idle   (errors surfaced, nothing sent)
//! ```
//!
//! [`FormController::submit`] runs the whole cycle and holds `&mut self`
//! until the transport answers. A UI that must keep drawing splits it into
//! [`FormController::begin_submit`], which hands back a [`PendingSubmit`] to
//! drive elsewhere, and [`FormController::finish_submit`]. Field updates are
//! ignored while a submission is in flight.

use std::{sync::Arc, time::Duration};

use antay_core::{
  ContactRequest, Field, Rules, SubmissionDraft, SubmissionResult, ValidationErrorSet, validate,
  wire::GENERIC_FAILURE,
};
use tokio::{sync::watch, task::JoinHandle};

use crate::{
  TransportError,
  toast::{Toast, Toaster},
  transport::Transport,
};

// ─── Options ──────────────────────────────────────────────────────────────────

/// Per-variant behaviour of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormOptions {
  pub rules:       Rules,
  /// How long the success or error state lasts before returning to idle.
  pub reset_after: Duration,
}

impl FormOptions {
  /// Subject required; five-second result display.
  pub fn rich() -> Self { Self { rules: Rules::Strict, reset_after: Duration::from_secs(5) } }

  /// Subject optional; three-second result display.
  pub fn simple() -> Self {
    Self { rules: Rules::Relaxed, reset_after: Duration::from_secs(3) }
  }
}

impl Default for FormOptions {
  fn default() -> Self { Self::rich() }
}

// ─── Status ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStatus {
  #[default]
  Idle,
  Submitting,
  Success,
  Error,
}

/// What a call to [`FormController::submit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
  /// Validation failed locally; nothing was sent.
  Invalid(ValidationErrorSet),
  /// The honeypot was filled; dropped without any feedback.
  Suppressed,
  Sent(String),
  Failed(String),
}

/// The first half of a submit.
pub enum SubmitStep<T> {
  /// The draft passed every check; send it and pass the result to
  /// [`FormController::finish_submit`].
  Sending(PendingSubmit<T>),
  /// Nothing needs sending.
  Finished(SubmitOutcome),
}

/// A validated payload bound to the transport that will carry it. Owns
/// everything it needs, so it can be spawned.
pub struct PendingSubmit<T> {
  transport: Arc<T>,
  request:   ContactRequest,
}

impl<T: Transport> PendingSubmit<T> {
  pub fn request(&self) -> &ContactRequest { &self.request }

  pub async fn send(self) -> Result<SubmissionResult, TransportError> {
    self.transport.send(&self.request).await
  }
}

// ─── Reset timer ──────────────────────────────────────────────────────────────

/// Moves the status back to idle after a delay. Aborted when dropped, so it
/// cannot fire once the controller (or a newer timer) has replaced it.
struct ResetTimer(JoinHandle<()>);

impl ResetTimer {
  fn start(status: Arc<watch::Sender<FormStatus>>, after: Duration) -> Self {
    Self(tokio::spawn(async move {
      tokio::time::sleep(after).await;
      status.send_replace(FormStatus::Idle);
    }))
  }
}

impl Drop for ResetTimer {
  fn drop(&mut self) { self.0.abort(); }
}

// ─── Controller ───────────────────────────────────────────────────────────────

pub struct FormController<T, U> {
  draft:     SubmissionDraft,
  errors:    ValidationErrorSet,
  status:    Arc<watch::Sender<FormStatus>>,
  reset:     Option<ResetTimer>,
  transport: Arc<T>,
  toaster:   U,
  options:   FormOptions,
}

impl<T, U> FormController<T, U>
where
  T: Transport,
  U: Toaster,
{
  /// Create a controller with an empty draft in the idle state.
  pub fn new(transport: T, toaster: U, options: FormOptions) -> Self {
    let (status, _) = watch::channel(FormStatus::Idle);
    Self {
      draft: SubmissionDraft::default(),
      errors: ValidationErrorSet::default(),
      status: Arc::new(status),
      reset: None,
      transport: Arc::new(transport),
      toaster,
      options,
    }
  }

  pub fn draft(&self) -> &SubmissionDraft { &self.draft }

  pub fn errors(&self) -> &ValidationErrorSet { &self.errors }

  pub fn options(&self) -> FormOptions { self.options }

  pub fn status(&self) -> FormStatus { *self.status.borrow() }

  /// Watch status transitions, including the timed return to idle.
  pub fn subscribe(&self) -> watch::Receiver<FormStatus> { self.status.subscribe() }

  /// True while a submission is in flight.
  pub fn is_locked(&self) -> bool { self.status() == FormStatus::Submitting }

  /// Set one field. Only that field's error is cleared; nothing is
  /// re-validated. Ignored while locked.
  pub fn update_field(&mut self, field: Field, value: impl Into<String>) {
    if self.is_locked() {
      tracing::debug!(%field, "form locked; update ignored");
      return;
    }
    self.draft.set(field, value);
    self.errors.clear_field(field);
  }

  /// [`update_field`](Self::update_field) addressed by wire name.
  pub fn update_field_by_name(
    &mut self,
    name: &str,
    value: impl Into<String>,
  ) -> antay_core::Result<Field> {
    let field = name
      .parse::<Field>()
      .map_err(|_| antay_core::Error::UnknownField(name.to_owned()))?;
    self.update_field(field, value);
    Ok(field)
  }

  /// Recompute the whole error set from the current draft.
  pub fn validate(&mut self) -> &ValidationErrorSet {
    self.errors = validate(&self.draft, self.options.rules);
    &self.errors
  }

  /// Validate and send the draft, then report the outcome.
  pub async fn submit(&mut self) -> SubmitOutcome {
    match self.begin_submit() {
      SubmitStep::Sending(pending) => {
        let result = pending.send().await;
        self.finish_submit(result)
      }
      SubmitStep::Finished(outcome) => outcome,
    }
  }

  /// Run the local checks and, when they pass, lock the form and return the
  /// payload to send.
  pub fn begin_submit(&mut self) -> SubmitStep<T> {
    if self.draft.is_bot() {
      tracing::info!("honeypot filled; submission dropped");
      return SubmitStep::Finished(SubmitOutcome::Suppressed);
    }

    if !self.validate().is_empty() {
      let errors = self.errors.clone();
      self.toaster.show(Toast::error("Please fix the form", errors.summary()));
      return SubmitStep::Finished(SubmitOutcome::Invalid(errors));
    }

    self.reset = None;
    self.status.send_replace(FormStatus::Submitting);
    SubmitStep::Sending(PendingSubmit {
      transport: self.transport.clone(),
      request:   self.draft.to_request(),
    })
  }

  /// Report the result of a [`PendingSubmit`] and unlock the form.
  pub fn finish_submit(
    &mut self,
    result: Result<SubmissionResult, TransportError>,
  ) -> SubmitOutcome {
    let result = result.unwrap_or_else(|e| {
      tracing::warn!(error = %e, "contact submission failed in transport");
      SubmissionResult::failure(GENERIC_FAILURE)
    });

    let outcome = match result {
      SubmissionResult::Success { message } => {
        self.toaster.show(Toast::success("Message sent", message.clone()));
        self.draft.clear();
        self.errors.clear();
        self.status.send_replace(FormStatus::Success);
        SubmitOutcome::Sent(message)
      }
      SubmissionResult::Failure { error, details } => {
        let description = match details.filter(|d| !d.is_empty()) {
          Some(details) => format!("{error}: {}", details.summary()),
          None => error.clone(),
        };
        self.toaster.show(Toast::error("Message not sent", description));
        self.status.send_replace(FormStatus::Error);
        SubmitOutcome::Failed(error)
      }
    };

    self.reset = Some(ResetTimer::start(self.status.clone(), self.options.reset_after));
    outcome
  }
}
