use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::ErrorEnvelope;

/// Everything that can go wrong between receiving a generation request and
/// handing back a normalized result.
///
/// The variants are logged separately but all render as the same degraded
/// envelope, so callers only ever see one failure shape.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Invalid generation request: {0}")]
    Validation(String),

    #[error("Backend returned status {status}: {body}")]
    BackendStatus { status: u16, body: String },

    #[error("Backend unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed backend reply: {0}")]
    Parse(#[from] serde_json::Error),
}

impl GatewayError {
    /// Stable tag for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Validation(_) => "validation",
            GatewayError::BackendStatus { .. } => "backend_status",
            GatewayError::Transport(_) => "transport",
            GatewayError::Parse(_) => "parse",
        }
    }

    /// Transport errors and server-side statuses may succeed on another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            GatewayError::Transport(_) => true,
            GatewayError::BackendStatus { status, .. } => *status == 429 || *status >= 500,
            GatewayError::Validation(_) | GatewayError::Parse(_) => false,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        tracing::error!(kind = self.kind(), "Resume generation failed: {self}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorEnvelope::default()),
        )
            .into_response()
    }
}

/// Form submission rejected before any backend call.
/// Messages are keyed by the camelCase field name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Form rejected: {} invalid field(s)", .fields.len())]
pub struct FormError {
    pub fields: BTreeMap<&'static str, String>,
}

impl FormError {
    #[cfg(test)]
    pub fn message(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }
}

impl IntoResponse for FormError {
    fn into_response(self) -> Response {
        tracing::warn!(fields = ?self.fields.keys().collect::<Vec<_>>(), "Form validation failed");
        let body = Json(json!({
            "error": "입력값을 확인해주세요.",
            "fields": self.fields,
        }));
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_every_gateway_error_renders_same_envelope() {
        let errors = vec![
            GatewayError::Validation("missing field `draft`".to_string()),
            GatewayError::BackendStatus {
                status: 502,
                body: "bad gateway".to_string(),
            },
            GatewayError::Parse(serde_json::from_str::<serde_json::Value>("{").unwrap_err()),
        ];

        for err in errors {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            let body = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let envelope: ErrorEnvelope = serde_json::from_slice(&body).unwrap();
            assert_eq!(envelope, ErrorEnvelope::default());
        }
    }

    #[test]
    fn test_retryable_statuses() {
        let status = |status| GatewayError::BackendStatus {
            status,
            body: String::new(),
        };
        assert!(status(503).is_retryable());
        assert!(status(429).is_retryable());
        assert!(!status(404).is_retryable());
        assert!(!status(302).is_retryable());
        assert!(!GatewayError::Validation("x".to_string()).is_retryable());
    }

    #[tokio::test]
    async fn test_form_error_is_bad_request_with_field_messages() {
        let mut fields = BTreeMap::new();
        fields.insert("company", "회사명은 필수입니다.".to_string());
        let response = FormError { fields }.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["fields"]["company"], "회사명은 필수입니다.");
    }
}
