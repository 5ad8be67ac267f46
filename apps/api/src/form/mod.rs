//! Form Collector — turns raw form fields into a `GenerationRequest`.
//!
//! Rejected submissions never reach the generator. Accepted ones are handed to
//! a `ResumeGenerator`, normally the HTTP gateway.

use std::collections::BTreeMap;

use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::errors::{FormError, GatewayError};
use crate::gateway::ResumeGenerator;
use crate::models::{AiModel, GenerationRequest, GenerationResult};

pub const MIN_WORD_LIMIT: i64 = 100;
pub const MAX_WORD_LIMIT: i64 = 3000;
pub const DEFAULT_WORD_LIMIT: u32 = 1000;
pub const MAX_QUESTION_LENGTH: usize = 1000;
pub const MAX_DRAFT_LENGTH: usize = 5000;
pub const MAX_COMPANY_LENGTH: usize = 100;
pub const MAX_POSITION_LENGTH: usize = 100;

/// Form fields exactly as submitted. Missing fields deserialize as empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawForm {
    pub question: String,
    pub draft: String,
    pub word_limit: String,
    pub company: String,
    pub position: String,
    pub ai_model: String,
}

/// Client-side bounds, published so a page can mirror them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormBounds {
    pub min_word_limit: i64,
    pub max_word_limit: i64,
    pub default_word_limit: u32,
    pub max_question_length: usize,
    pub max_draft_length: usize,
    pub max_company_length: usize,
    pub max_position_length: usize,
}

pub const FORM_BOUNDS: FormBounds = FormBounds {
    min_word_limit: MIN_WORD_LIMIT,
    max_word_limit: MAX_WORD_LIMIT,
    default_word_limit: DEFAULT_WORD_LIMIT,
    max_question_length: MAX_QUESTION_LENGTH,
    max_draft_length: MAX_DRAFT_LENGTH,
    max_company_length: MAX_COMPANY_LENGTH,
    max_position_length: MAX_POSITION_LENGTH,
};

struct TextField {
    key: &'static str,
    label: &'static str,
    max_chars: usize,
}

const QUESTION: TextField = TextField {
    key: "question",
    label: "자소서 문항은",
    max_chars: MAX_QUESTION_LENGTH,
};
const DRAFT: TextField = TextField {
    key: "draft",
    label: "초안은",
    max_chars: MAX_DRAFT_LENGTH,
};
const COMPANY: TextField = TextField {
    key: "company",
    label: "회사명은",
    max_chars: MAX_COMPANY_LENGTH,
};
const POSITION: TextField = TextField {
    key: "position",
    label: "직군/직무는",
    max_chars: MAX_POSITION_LENGTH,
};

fn check_text(field: &TextField, value: &str) -> Option<String> {
    if value.trim().is_empty() {
        Some(format!("{} 필수입니다.", field.label))
    } else if value.chars().count() > field.max_chars {
        Some(format!(
            "{} {}자를 초과할 수 없습니다.",
            field.label, field.max_chars
        ))
    } else {
        None
    }
}

fn check_word_limit(raw: &str) -> Result<u32, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("글자수 제한은 필수입니다.".to_string());
    }
    let limit: i64 = raw
        .parse()
        .map_err(|_| "글자수 제한은 숫자여야 합니다.".to_string())?;
    if !(MIN_WORD_LIMIT..=MAX_WORD_LIMIT).contains(&limit) {
        return Err(format!(
            "글자수 제한은 {MIN_WORD_LIMIT}자 이상 {MAX_WORD_LIMIT}자 이하여야 합니다."
        ));
    }
    // In range, so it fits.
    Ok(limit as u32)
}

fn check_model(raw: &str) -> Result<AiModel, String> {
    if raw.trim().is_empty() {
        return Ok(AiModel::default());
    }
    AiModel::parse(raw).ok_or_else(|| "지원하지 않는 AI 모델입니다.".to_string())
}

/// Validates every field and reports all problems at once.
pub fn collect(raw: &RawForm) -> Result<GenerationRequest, FormError> {
    let mut fields = BTreeMap::new();

    for (field, value) in [
        (&QUESTION, &raw.question),
        (&DRAFT, &raw.draft),
        (&COMPANY, &raw.company),
        (&POSITION, &raw.position),
    ] {
        if let Some(message) = check_text(field, value) {
            fields.insert(field.key, message);
        }
    }

    let word_limit = match check_word_limit(&raw.word_limit) {
        Ok(limit) => Some(limit),
        Err(message) => {
            fields.insert("wordLimit", message);
            None
        }
    };
    let model = match check_model(&raw.ai_model) {
        Ok(model) => Some(model),
        Err(message) => {
            fields.insert("aiModel", message);
            None
        }
    };

    match (word_limit, model) {
        (Some(word_limit), Some(model)) if fields.is_empty() => Ok(GenerationRequest {
            question: raw.question.clone(),
            draft: raw.draft.clone(),
            word_limit,
            company: raw.company.clone(),
            position: raw.position.clone(),
            ai_model: Some(model.as_str().to_string()),
        }),
        _ => Err(FormError { fields }),
    }
}

/// Either the form was rejected locally or the generator failed.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Rejected(#[from] FormError),

    #[error(transparent)]
    Failed(#[from] GatewayError),
}

impl IntoResponse for SubmitError {
    fn into_response(self) -> Response {
        match self {
            SubmitError::Rejected(err) => err.into_response(),
            SubmitError::Failed(err) => err.into_response(),
        }
    }
}

/// Validates the form and, only if it passes, makes exactly one generator call.
pub async fn submit(
    generator: &dyn ResumeGenerator,
    raw: &RawForm,
) -> Result<GenerationResult, SubmitError> {
    let request = collect(raw)?;
    debug!(model = request.resolved_model(), "Form accepted");
    Ok(generator.generate(&request).await?)
}
