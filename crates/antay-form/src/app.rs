//! Terminal form state and key dispatcher.

use antay_core::{Field, SubmissionResult, wire::GENERIC_FAILURE};
use antay_form::{
  FormController, SubmitOutcome, SubmitStep, ToastLog, Transport, TransportError,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::task::JoinHandle;

// ─── Focus ────────────────────────────────────────────────────────────────────

/// Everything that can hold keyboard focus, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
  Input(Field),
  Submit,
}

/// Rendered inputs. The honeypot is never shown.
pub const INPUTS: [Field; 5] =
  [Field::FullName, Field::Email, Field::Subject, Field::Phone, Field::Message];

impl Focus {
  fn index(self) -> usize {
    match self {
      Self::Input(field) => INPUTS.iter().position(|f| *f == field).unwrap_or(0),
      Self::Submit => INPUTS.len(),
    }
  }

  fn from_index(index: usize) -> Self {
    INPUTS.get(index).map_or(Self::Submit, |f| Self::Input(*f))
  }

  fn next(self) -> Self { Self::from_index((self.index() + 1) % (INPUTS.len() + 1)) }

  fn prev(self) -> Self {
    Self::from_index((self.index() + INPUTS.len()) % (INPUTS.len() + 1))
  }
}

// ─── App ──────────────────────────────────────────────────────────────────────

type InFlight = JoinHandle<Result<SubmissionResult, TransportError>>;

/// Top-level application state.
pub struct App<T> {
  pub form:   FormController<T, ToastLog>,
  /// Shared with the controller's toaster; read back for the status bar.
  pub toasts: ToastLog,
  pub focus:  Focus,
  /// Label shown in the header.
  pub target: String,
  /// The submission being sent on its own task, so the UI keeps drawing.
  in_flight:  Option<InFlight>,
}

impl<T: Transport + 'static> App<T> {
  pub fn new(form: FormController<T, ToastLog>, toasts: ToastLog, target: String) -> Self {
    Self { form, toasts, focus: Focus::Input(INPUTS[0]), target, in_flight: None }
  }

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if key.code == KeyCode::Esc || (ctrl && key.code == KeyCode::Char('c')) {
      return false;
    }
    if self.in_flight.is_some() {
      return true;
    }
    if ctrl && key.code == KeyCode::Char('s') {
      self.submit();
      return true;
    }

    match (key.code, self.focus) {
      (KeyCode::Tab | KeyCode::Down, _) => self.focus = self.focus.next(),
      (KeyCode::BackTab | KeyCode::Up, _) => self.focus = self.focus.prev(),
      (KeyCode::Enter, Focus::Submit) => self.submit(),
      (KeyCode::Enter, Focus::Input(Field::Message)) => self.edit(Field::Message, |v| v.push('\n')),
      (KeyCode::Enter, Focus::Input(_)) => self.focus = self.focus.next(),
      (KeyCode::Backspace, Focus::Input(field)) => self.edit(field, |v| {
        v.pop();
      }),
      (KeyCode::Char(c), Focus::Input(field)) if !ctrl => self.edit(field, |v| v.push(c)),
      _ => {}
    }
    true
  }

  fn edit(&mut self, field: Field, f: impl FnOnce(&mut String)) {
    let mut value = self.form.draft().get(field).to_owned();
    f(&mut value);
    self.form.update_field(field, value);
  }

  fn submit(&mut self) {
    match self.form.begin_submit() {
      SubmitStep::Sending(pending) => self.in_flight = Some(tokio::spawn(pending.send())),
      SubmitStep::Finished(outcome) => self.settle(outcome),
    }
  }

  /// Apply the result of a finished submission. Returns at once while the
  /// request is still in flight.
  pub async fn poll_submit(&mut self) {
    if self.in_flight.as_ref().is_some_and(JoinHandle::is_finished) {
      self.await_submit().await;
    }
  }

  /// Wait for the in-flight submission, if any, and apply its result.
  pub async fn await_submit(&mut self) {
    let Some(handle) = self.in_flight.take() else {
      return;
    };
    let result = handle.await.unwrap_or_else(|e| {
      tracing::warn!(error = %e, "submission task did not complete");
      Ok(SubmissionResult::failure(GENERIC_FAILURE))
    });
    let outcome = self.form.finish_submit(result);
    self.settle(outcome);
  }

  fn settle(&mut self, outcome: SubmitOutcome) {
    match outcome {
      SubmitOutcome::Invalid(errors) => {
        if let Some(first) = INPUTS.iter().find(|f| errors.contains(**f)) {
          self.focus = Focus::Input(*first);
        }
      }
      SubmitOutcome::Sent(_) => self.focus = Focus::Input(INPUTS[0]),
      SubmitOutcome::Suppressed | SubmitOutcome::Failed(_) => {}
    }
  }
}

impl<T> Drop for App<T> {
  /// Leaving the form abandons whatever is still being sent.
  fn drop(&mut self) {
    if let Some(handle) = self.in_flight.take() {
      handle.abort();
    }
  }
}

#[cfg(test)]
mod tests {
  use std::{
    sync::{Arc, Mutex},
    time::Duration,
  };

  use antay_core::ContactRequest;
  use antay_form::{FormOptions, FormStatus};

  use super::*;

  #[derive(Clone, Default)]
  struct Recording(Arc<Mutex<Vec<ContactRequest>>>);

  impl Transport for Recording {
    async fn send(&self, request: &ContactRequest) -> Result<SubmissionResult, TransportError> {
      self.0.lock().unwrap().push(request.clone());
      Ok(SubmissionResult::Success { message: "ok".into() })
    }
  }

  /// Never answers within a test's lifetime.
  struct Stalled;

  impl Transport for Stalled {
    async fn send(&self, _: &ContactRequest) -> Result<SubmissionResult, TransportError> {
      tokio::time::sleep(Duration::from_secs(600)).await;
      Ok(SubmissionResult::Success { message: "late".into() })
    }
  }

  fn app() -> (App<Recording>, Recording) {
    let transport = Recording::default();
    let toasts = ToastLog::new();
    let form = FormController::new(transport.clone(), toasts.clone(), FormOptions::rich());
    (App::new(form, toasts, "test".into()), transport)
  }

  fn fill<T: Transport + 'static>(app: &mut App<T>) {
    app.form.update_field(Field::FullName, "Ann Lee");
    app.form.update_field(Field::Email, "ann@x.com");
    app.form.update_field(Field::Subject, "Partnership");
    app.form.update_field(Field::Message, "Interested in collaborating.");
  }

  fn key(code: KeyCode) -> KeyEvent { KeyEvent::new(code, KeyModifiers::NONE) }

  fn type_str(app: &mut App<Recording>, s: &str) {
    for c in s.chars() {
      app.handle_key(key(KeyCode::Char(c)));
    }
  }

  #[test]
  fn focus_wraps_both_ways() {
    assert_eq!(Focus::Submit.next(), Focus::Input(Field::FullName));
    assert_eq!(Focus::Input(Field::FullName).prev(), Focus::Submit);
    assert_eq!(Focus::Input(Field::Email).next(), Focus::Input(Field::Subject));
  }

  #[test]
  fn typing_edits_focused_field() {
    let (mut app, _) = app();
    type_str(&mut app, "Anx");
    app.handle_key(key(KeyCode::Backspace));
    type_str(&mut app, "n");
    app.handle_key(key(KeyCode::Tab));
    type_str(&mut app, "a@b.co");

    assert_eq!(app.form.draft().full_name, "Ann");
    assert_eq!(app.form.draft().email, "a@b.co");
    assert_eq!(app.focus, Focus::Input(Field::Email));
  }

  #[test]
  fn invalid_submit_focuses_first_error() {
    let (mut app, transport) = app();
    type_str(&mut app, "Ann Lee");
    let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
    assert!(app.handle_key(ctrl_s));

    assert_eq!(app.focus, Focus::Input(Field::Email));
    assert!(transport.0.lock().unwrap().is_empty());
    assert!(app.toasts.latest().is_some());
  }

  #[tokio::test]
  async fn enter_on_submit_sends_and_refocuses() {
    let (mut app, transport) = app();
    type_str(&mut app, "Ann Lee");
    app.handle_key(key(KeyCode::Enter));
    type_str(&mut app, "ann@x.com");
    app.handle_key(key(KeyCode::Enter));
    type_str(&mut app, "Partnership");
    app.handle_key(key(KeyCode::Tab));
    app.handle_key(key(KeyCode::Tab));
    type_str(&mut app, "Interested in collaborating.");
    app.handle_key(key(KeyCode::Tab));
    assert_eq!(app.focus, Focus::Submit);

    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.form.status(), FormStatus::Submitting);
    app.await_submit().await;

    assert_eq!(transport.0.lock().unwrap().len(), 1);
    assert_eq!(app.form.status(), FormStatus::Success);
    assert_eq!(app.focus, Focus::Input(Field::FullName));
  }

  #[tokio::test(start_paused = true)]
  async fn keys_stay_live_while_sending() {
    let toasts = ToastLog::new();
    let form = FormController::new(Stalled, toasts.clone(), FormOptions::rich());
    let mut app = App::new(form, toasts, "test".into());
    fill(&mut app);
    app.focus = Focus::Submit;

    assert!(app.handle_key(key(KeyCode::Enter)));
    assert_eq!(app.form.status(), FormStatus::Submitting);

    // Still sending after a while; nothing collected, edits ignored.
    tokio::time::sleep(Duration::from_secs(30)).await;
    app.poll_submit().await;
    assert_eq!(app.form.status(), FormStatus::Submitting);
    assert!(app.handle_key(key(KeyCode::Tab)));
    assert_eq!(app.focus, Focus::Submit);

    assert!(!app.handle_key(key(KeyCode::Esc)));
  }

  #[test]
  fn escape_quits() {
    let (mut app, _) = app();
    assert!(!app.handle_key(key(KeyCode::Esc)));
  }
}
