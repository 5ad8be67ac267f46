//! Generation Gateway — the single point of contact with the generation backend.
//!
//! No other module may call the backend directly. The gateway defaults the
//! model, always asks for commentary, and turns every failure into a
//! `GatewayError` that renders as the degraded envelope.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, redirect, Client};
use tracing::{debug, info, warn};

use crate::config::BackendConfig;
use crate::errors::GatewayError;
use crate::models::generation::{BackendReply, BackendRequest};
use crate::models::{GenerationRequest, GenerationResult};

pub mod normalize;

pub const GENERATE_PATH: &str = "/api/generate-resume";

/// Longest backend error body kept for logging, in characters.
const MAX_ERROR_BODY_CHARS: usize = 512;

#[cfg(not(test))]
const BACKOFF_BASE_MS: u64 = 1000;
#[cfg(test)]
const BACKOFF_BASE_MS: u64 = 10;

/// Produces a result for a validated request. The form collector depends on
/// this trait rather than on the HTTP client.
#[async_trait]
pub trait ResumeGenerator: Send + Sync {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GatewayError>;
}

#[derive(Clone)]
pub struct GenerationGateway {
    client: Client,
    endpoint: String,
    config: BackendConfig,
}

impl GenerationGateway {
    pub fn new(config: BackendConfig) -> Result<Self, reqwest::Error> {
        // Redirects are not followed: any 3xx is a failed call.
        let client = Client::builder()
            .timeout(config.timeout)
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}{GENERATE_PATH}", config.base_url),
            config,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send_once(&self, body: &BackendRequest<'_>) -> Result<BackendReply, GatewayError> {
        let mut builder = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(body);
        if let Some(api_key) = &self.config.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::BackendStatus {
                status: status.as_u16(),
                body: truncate_chars(&body, MAX_ERROR_BODY_CHARS),
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl ResumeGenerator for GenerationGateway {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GatewayError> {
        let body = BackendRequest::from(request);
        info!(
            company = %request.company,
            position = %request.position,
            model = body.ai_model,
            word_limit = body.word_limit,
            "Forwarding resume generation request"
        );

        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.send_once(&body).await {
                Ok(reply) => {
                    let result = normalize::normalize(reply, body.ai_model);
                    debug!(
                        chars = result.improved_resume.chars().count(),
                        comments = result.comments.len(),
                        "Backend reply normalized"
                    );
                    return Ok(result);
                }
                Err(err) if err.is_retryable() && attempt < max_attempts => {
                    // Exponential backoff: base, 2x base, 4x base, ...
                    let delay =
                        Duration::from_millis(BACKOFF_BASE_MS * (1 << (attempt - 1).min(5)));
                    warn!(
                        kind = err.kind(),
                        "Backend attempt {attempt}/{max_attempts} failed ({err}), retrying after {}ms",
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}
