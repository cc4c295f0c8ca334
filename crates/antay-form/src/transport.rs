//! Ways of getting a [`ContactRequest`] to whoever handles it.
//!
//! [`ApiTransport`] talks to our own `POST /api/contact`. [`HostedFormTransport`]
//! posts a plain urlencoded form to a third-party form service and makes do
//! with whatever status and content type it answers with.

use std::{future::Future, time::Duration};

use antay_core::{
  ContactRequest, ContactResponse, SubmissionResult,
  wire::{GENERIC_FAILURE, SUCCESS_MESSAGE},
};
use reqwest::{Client, header};
use serde::Deserialize;

use crate::TransportError;

/// Sends one submission and returns the outcome.
///
/// There is no retry at this layer; a failure is reported once and the user
/// decides whether to submit again.
pub trait Transport: Send + Sync {
  fn send<'a>(
    &'a self,
    request: &'a ContactRequest,
  ) -> impl Future<Output = Result<SubmissionResult, TransportError>> + Send + 'a;
}

fn build_client() -> Result<Client, TransportError> {
  Ok(Client::builder().timeout(Duration::from_secs(30)).build()?)
}

// ─── Own API ──────────────────────────────────────────────────────────────────

/// JSON client for `POST {base_url}/api/contact`.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiTransport {
  client:   Client,
  base_url: String,
}

impl ApiTransport {
  pub fn new(base_url: impl Into<String>) -> Result<Self, TransportError> {
    Ok(Self { client: build_client()?, base_url: base_url.into() })
  }

  fn url(&self) -> String {
    format!("{}/api/contact", self.base_url.trim_end_matches('/'))
  }
}

impl Transport for ApiTransport {
  async fn send(&self, request: &ContactRequest) -> Result<SubmissionResult, TransportError> {
    let resp = self.client.post(self.url()).json(request).send().await?;
    let status = resp.status();
    let bytes = resp.bytes().await?;

    let body = match ContactResponse::from_json(&bytes) {
      Ok(body) => body,
      Err(_) if !status.is_success() => {
        return Err(TransportError::UnexpectedStatus(status.as_u16()));
      }
      Err(e) => return Err(e.into()),
    };

    if body.success && !status.is_success() {
      tracing::warn!(status = status.as_u16(), "success body with error status");
      return Ok(SubmissionResult::failure(GENERIC_FAILURE));
    }
    Ok(body.into())
  }
}

// ─── Hosted form service ──────────────────────────────────────────────────────

/// Urlencoded client for an external hosted form endpoint.
#[derive(Clone)]
pub struct HostedFormTransport {
  client:   Client,
  endpoint: String,
}

/// Error bodies hosted form services commonly return.
#[derive(Debug, Default, Deserialize)]
struct HostedError {
  #[serde(default)]
  error:  Option<String>,
  #[serde(default)]
  errors: Vec<HostedFieldError>,
}

#[derive(Debug, Deserialize)]
struct HostedFieldError {
  message: String,
}

impl HostedError {
  fn into_message(self) -> Option<String> {
    if let Some(error) = self.error.filter(|e| !e.trim().is_empty()) {
      return Some(error);
    }
    let joined = self
      .errors
      .into_iter()
      .map(|e| e.message)
      .collect::<Vec<_>>()
      .join(", ");
    (!joined.is_empty()).then_some(joined)
  }
}

impl HostedFormTransport {
  pub fn new(endpoint: impl Into<String>) -> Result<Self, TransportError> {
    Ok(Self { client: build_client()?, endpoint: endpoint.into() })
  }

  fn fields(request: &ContactRequest) -> Vec<(&'static str, &str)> {
    let mut fields = vec![
      ("fullName", request.full_name.as_str()),
      ("email", request.email.as_str()),
    ];
    if let Some(subject) = request.subject.as_deref() {
      fields.push(("subject", subject));
    }
    if let Some(phone) = request.phone.as_deref() {
      fields.push(("phone", phone));
    }
    fields.push(("message", request.message.as_str()));
    fields
  }
}

impl Transport for HostedFormTransport {
  async fn send(&self, request: &ContactRequest) -> Result<SubmissionResult, TransportError> {
    let resp = self
      .client
      .post(&self.endpoint)
      .header(header::ACCEPT, "application/json")
      .form(&Self::fields(request))
      .send()
      .await?;

    let status = resp.status();
    if status.is_success() {
      return Ok(SubmissionResult::Success { message: SUCCESS_MESSAGE.to_string() });
    }

    let is_json = resp
      .headers()
      .get(header::CONTENT_TYPE)
      .and_then(|v| v.to_str().ok())
      .is_some_and(|ct| ct.starts_with("application/json"));
    if !is_json {
      tracing::warn!(status = status.as_u16(), "hosted form answered without JSON");
      return Ok(SubmissionResult::failure(GENERIC_FAILURE));
    }

    let body: HostedError = resp.json().await.unwrap_or_default();
    let error = body.into_message().unwrap_or_else(|| GENERIC_FAILURE.to_string());
    Ok(SubmissionResult::failure(error))
  }
}

#[cfg(test)]
mod tests {
  use antay_core::{Field, ValidationErrorSet};
  use axum::{Form, Json, Router, http::StatusCode, routing::post};
  use pretty_assertions::assert_eq;
  use serde_json::json;
  use std::collections::HashMap;
  use tokio::net::TcpListener;

  use super::*;

  async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await });
    format!("http://{addr}")
  }

  fn request() -> ContactRequest {
    ContactRequest {
      full_name: "Ann Lee".into(),
      email:     "ann@x.com".into(),
      subject:   Some("Partnership".into()),
      message:   "Interested in collaborating on real estate.".into(),
      phone:     None,
      honeypot:  None,
    }
  }

  // ── ApiTransport ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn api_success_round_trip() {
    let app = Router::new().route(
      "/api/contact",
      post(|Json(req): Json<ContactRequest>| async move {
        assert_eq!(req.full_name, "Ann Lee");
        Json(ContactResponse::ok("thanks"))
      }),
    );
    let base = serve(app).await;
    let result = ApiTransport::new(base).unwrap().send(&request()).await.unwrap();
    assert_eq!(result, SubmissionResult::Success { message: "thanks".into() });
  }

  #[tokio::test]
  async fn api_validation_failure_keeps_details() {
    let app = Router::new().route(
      "/api/contact",
      post(|| async {
        let mut details = ValidationErrorSet::default();
        details.insert(Field::Message, "Message must be at least 10 characters");
        (
          StatusCode::BAD_REQUEST,
          Json(ContactResponse::failed("Validation failed").with_details(details)),
        )
      }),
    );
    let base = serve(app).await;
    let result = ApiTransport::new(base).unwrap().send(&request()).await.unwrap();
    match result {
      SubmissionResult::Failure { error, details } => {
        assert_eq!(error, "Validation failed");
        assert!(details.unwrap().contains(Field::Message));
      }
      other => panic!("unexpected: {other:?}"),
    }
  }

  #[tokio::test]
  async fn api_html_error_page_is_unexpected_status() {
    let app = Router::new().route(
      "/api/contact",
      post(|| async { (StatusCode::BAD_GATEWAY, "<html>bad gateway</html>") }),
    );
    let base = serve(app).await;
    let err = ApiTransport::new(base).unwrap().send(&request()).await.unwrap_err();
    assert!(matches!(err, TransportError::UnexpectedStatus(502)));
  }

  #[tokio::test]
  async fn api_unreachable_is_http_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let err = ApiTransport::new(format!("http://{addr}"))
      .unwrap()
      .send(&request())
      .await
      .unwrap_err();
    assert!(matches!(err, TransportError::Http(_)));
  }

  // ── HostedFormTransport ─────────────────────────────────────────────────────

  #[tokio::test]
  async fn hosted_form_posts_urlencoded_fields() {
    let app = Router::new().route(
      "/f/abc",
      post(|Form(fields): Form<HashMap<String, String>>| async move {
        assert_eq!(fields.get("fullName").map(String::as_str), Some("Ann Lee"));
        assert_eq!(fields.get("subject").map(String::as_str), Some("Partnership"));
        assert!(!fields.contains_key("phone"));
        Json(json!({ "ok": true }))
      }),
    );
    let base = serve(app).await;
    let result = HostedFormTransport::new(format!("{base}/f/abc"))
      .unwrap()
      .send(&request())
      .await
      .unwrap();
    assert!(result.is_success());
  }

  #[tokio::test]
  async fn hosted_form_json_errors_are_joined() {
    let app = Router::new().route(
      "/f/abc",
      post(|| async {
        (
          StatusCode::UNPROCESSABLE_ENTITY,
          Json(json!({ "errors": [
            { "field": "email", "message": "should be an email" },
            { "field": "message", "message": "is required" },
          ]})),
        )
      }),
    );
    let base = serve(app).await;
    let result = HostedFormTransport::new(format!("{base}/f/abc"))
      .unwrap()
      .send(&request())
      .await
      .unwrap();
    assert_eq!(result, SubmissionResult::failure("should be an email, is required"));
  }

  #[tokio::test]
  async fn hosted_form_non_json_failure_is_generic() {
    let app = Router::new().route(
      "/f/abc",
      post(|| async { (StatusCode::FORBIDDEN, "Forbidden") }),
    );
    let base = serve(app).await;
    let result = HostedFormTransport::new(format!("{base}/f/abc"))
      .unwrap()
      .send(&request())
      .await
      .unwrap();
    assert_eq!(result, SubmissionResult::failure(GENERIC_FAILURE));
  }
}
