//! Handler for `POST /contact`.
//!
//! | Outcome                       | Status | Body                                              |
//! |-------------------------------|--------|---------------------------------------------------|
//! | sent (or honeypot tripped)    | `200`  | `{"success":true,"message":…}`                    |
//! | malformed JSON                | `400`  | `{"success":false,"error":"Invalid request body"}` |
//! | validation failure            | `400`  | `{"success":false,"error":…,"details":{field:…}}` |
//! | provider missing or failing   | `500`  | `{"success":false,"error":…}`                     |
//!
//! The payload is always re-validated here; nothing the form checked is
//! trusted. Submitting the same payload twice sends everything twice.

use antay_core::{
  ContactRequest, ContactResponse, Notifier, validate_request, wire::SUCCESS_MESSAGE,
};
use antay_mail::dispatch;
use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use uuid::Uuid;

use crate::{ContactState, error::ApiError};

/// `POST /contact` — body: `{"fullName":…,"email":…,"subject":…,"message":…}`
pub async fn handler<N>(
  State(state): State<ContactState<N>>,
  payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<ContactResponse>, ApiError>
where
  N: Notifier + 'static,
{
  let reference = Uuid::new_v4();

  let Json(raw) = payload.map_err(|rejection| {
    tracing::debug!(%reference, %rejection, "rejected contact payload");
    ApiError::InvalidBody(rejection.body_text())
  })?;
  let submission = raw.trimmed();

  if submission.is_bot() {
    tracing::info!(%reference, "honeypot filled; dropping submission");
    return Ok(Json(ContactResponse::ok(SUCCESS_MESSAGE)));
  }

  let errors = validate_request(&submission, state.settings.rules);
  if !errors.is_empty() {
    tracing::debug!(%reference, fields = %errors.summary(), "contact validation failed");
    return Err(ApiError::Validation(errors));
  }

  let Some(notifier) = state.notifier.as_deref() else {
    tracing::error!(%reference, "email provider API key not configured");
    return Err(ApiError::NotConfigured);
  };

  dispatch(notifier, &submission, &state.settings.mailbox, reference)
    .await
    .map_err(|e| {
      tracing::error!(%reference, step = %e.step, error = %e.source, "contact dispatch failed");
      ApiError::Dispatch(Box::new(e))
    })?;

  tracing::info!(%reference, "contact submission delivered");
  Ok(Json(ContactResponse::ok(SUCCESS_MESSAGE)))
}
