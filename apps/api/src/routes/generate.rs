//! Axum route handlers for resume generation.

use axum::{extract::State, Form, Json};
use bytes::Bytes;
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::errors::GatewayError;
use crate::form::{self, RawForm, SubmitError};
use crate::models::{GenerationRequest, GenerationResult};
use crate::state::AppState;

/// POST /api/generate-resume
///
/// Gateway boundary. The body is parsed by hand so that a malformed request
/// produces the same degraded envelope as a backend failure.
pub async fn handle_generate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GenerationResult>, GatewayError> {
    let span = info_span!("generate", request_id = %Uuid::new_v4());
    async move {
        let request: GenerationRequest = serde_json::from_slice(&body)
            .map_err(|e| GatewayError::Validation(e.to_string()))?;
        let result = state.generator.generate(&request).await?;
        Ok(Json(result))
    }
    .instrument(span)
    .await
}

/// POST /write
///
/// Form Collector surface: raw urlencoded fields are validated here and only
/// forwarded to the gateway when every field passes.
pub async fn handle_write(
    State(state): State<AppState>,
    Form(raw): Form<RawForm>,
) -> Result<Json<GenerationResult>, SubmitError> {
    let span = info_span!("write", request_id = %Uuid::new_v4());
    async move {
        let result = form::submit(state.generator.as_ref(), &raw).await?;
        Ok(Json(result))
    }
    .instrument(span)
    .await
}
