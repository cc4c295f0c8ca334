//! `GET /ping` — liveness probe returning the configured message.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::ContactState;

#[derive(Debug, Serialize, Deserialize)]
pub struct PingResponse {
  pub message: String,
}

/// `GET /ping`
pub async fn handler<N>(State(state): State<ContactState<N>>) -> Json<PingResponse> {
  Json(PingResponse { message: state.settings.ping_message.clone() })
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use antay_core::Rules;
  use antay_mail::{Mailbox, MemoryNotifier};
  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use tower::ServiceExt as _;

  use crate::{ContactSettings, ContactState, MAX_BODY_BYTES, api_router};

  fn state(ping_message: &str) -> ContactState<MemoryNotifier> {
    ContactState {
      notifier: None,
      settings: Arc::new(ContactSettings {
        mailbox: Mailbox {
          operator:  "ops@example.com".into(),
          site_name: "Example".into(),
          site_url:  "https://example.com".into(),
        },
        rules: Rules::Strict,
        ping_message: ping_message.into(),
      }),
    }
  }

  #[tokio::test]
  async fn ping_returns_configured_message() {
    let req = Request::builder().uri("/ping").body(Body::empty()).unwrap();
    let resp = api_router(state("hello")).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: super::PingResponse = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body.message, "hello");
  }

  #[tokio::test]
  async fn oversized_body_is_rejected() {
    let req = Request::builder()
      .method("POST")
      .uri("/contact")
      .header("content-type", "application/json")
      .body(Body::from(vec![b' '; MAX_BODY_BYTES + 1]))
      .unwrap();
    let resp = api_router(state("ping")).oneshot(req).await.unwrap();
    assert!(resp.status().is_client_error(), "status: {}", resp.status());
  }
}
