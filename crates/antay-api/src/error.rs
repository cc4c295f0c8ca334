//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every variant renders as a [`ContactResponse`] with `success: false`.
//! Server-side causes are logged by the handler and never reach the body.

use antay_core::{ContactResponse, ValidationErrorSet, wire::GENERIC_FAILURE};
use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("invalid request body: {0}")]
  InvalidBody(String),

  #[error("validation failed on {} field(s)", .0.len())]
  Validation(ValidationErrorSet),

  #[error("email provider is not configured")]
  NotConfigured,

  #[error("dispatch failed: {0}")]
  Dispatch(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::InvalidBody(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::NotConfigured | ApiError::Dispatch(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let body = match self {
      ApiError::InvalidBody(_) => ContactResponse::failed("Invalid request body"),
      ApiError::Validation(details) => {
        ContactResponse::failed("Validation failed").with_details(details)
      }
      ApiError::NotConfigured => ContactResponse::failed("Email service not configured"),
      ApiError::Dispatch(_) => ContactResponse::failed(GENERIC_FAILURE),
    };
    (status, Json(body)).into_response()
  }
}
