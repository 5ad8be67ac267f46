use serde::{Deserialize, Serialize};

use crate::models::AiModel;

/// Shown when the backend answers but carries no generated text.
pub const MISSING_RESULT_TEXT: &str = "결과를 받아오지 못했습니다.";

/// Replaces the generated text whenever a call fails.
pub const APOLOGY_TEXT: &str = "죄송합니다. 자소서 생성 중 오류가 발생했습니다. 다시 시도해주세요.";

/// `error` field of the failure envelope.
pub const GENERATION_FAILED_MESSAGE: &str = "자소서 생성 중 오류가 발생했습니다.";

/// A single generation request as accepted by the gateway.
///
/// `ai_model` stays loosely typed here: the gateway defaults a blank value but
/// otherwise forwards whatever the caller chose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub question: String,
    pub draft: String,
    pub word_limit: u32,
    pub company: String,
    pub position: String,
    #[serde(default)]
    pub ai_model: Option<String>,
}

impl GenerationRequest {
    /// The model identifier to send, with blanks replaced by the primary model.
    pub fn resolved_model(&self) -> &str {
        match self.ai_model.as_deref().map(str::trim) {
            Some(model) if !model.is_empty() => model,
            _ => AiModel::default().as_str(),
        }
    }
}

/// Body of the outbound backend call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendRequest<'a> {
    pub question: &'a str,
    pub draft: &'a str,
    pub word_limit: u32,
    pub company: &'a str,
    pub position: &'a str,
    pub ai_model: &'a str,
    pub include_comments: bool,
}

impl<'a> From<&'a GenerationRequest> for BackendRequest<'a> {
    fn from(request: &'a GenerationRequest) -> Self {
        Self {
            question: &request.question,
            draft: &request.draft,
            word_limit: request.word_limit,
            company: &request.company,
            position: &request.position,
            ai_model: request.resolved_model(),
            include_comments: true,
        }
    }
}

/// Backend reply as it arrives. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendReply {
    #[serde(default)]
    pub improved_resume: Option<String>,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub comments: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub improved_resume: String,
    pub comments: Vec<String>,
}

impl GenerationResult {
    /// The placeholder result used on every failure path.
    pub fn degraded() -> Self {
        Self {
            improved_resume: APOLOGY_TEXT.to_string(),
            comments: Vec::new(),
        }
    }
}

/// Failure body returned alongside HTTP 500.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub error: String,
    pub improved_resume: String,
    pub comments: Vec<String>,
}

impl Default for ErrorEnvelope {
    fn default() -> Self {
        let degraded = GenerationResult::degraded();
        Self {
            error: GENERATION_FAILED_MESSAGE.to_string(),
            improved_resume: degraded.improved_resume,
            comments: degraded.comments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(ai_model: Option<&str>) -> GenerationRequest {
        GenerationRequest {
            question: "지원동기를 기술해 주세요.".to_string(),
            draft: "저는 백엔드 개발자입니다.".to_string(),
            word_limit: 1000,
            company: "삼성전자".to_string(),
            position: "백엔드".to_string(),
            ai_model: ai_model.map(str::to_string),
        }
    }

    #[test]
    fn test_resolved_model_defaults_when_missing_or_blank() {
        assert_eq!(request(None).resolved_model(), "gpt-4");
        assert_eq!(request(Some("")).resolved_model(), "gpt-4");
        assert_eq!(request(Some("   ")).resolved_model(), "gpt-4");
        assert_eq!(request(Some("claude-3")).resolved_model(), "claude-3");
    }

    #[test]
    fn test_backend_request_always_asks_for_comments() {
        let req = request(None);
        let body = serde_json::to_value(BackendRequest::from(&req)).unwrap();
        assert_eq!(
            body,
            json!({
                "question": "지원동기를 기술해 주세요.",
                "draft": "저는 백엔드 개발자입니다.",
                "wordLimit": 1000,
                "company": "삼성전자",
                "position": "백엔드",
                "aiModel": "gpt-4",
                "includeComments": true
            })
        );
    }

    #[test]
    fn test_request_accepts_missing_ai_model() {
        let req: GenerationRequest = serde_json::from_value(json!({
            "question": "q",
            "draft": "d",
            "wordLimit": 500,
            "company": "c",
            "position": "p"
        }))
        .unwrap();
        assert_eq!(req.ai_model, None);
        assert_eq!(req.word_limit, 500);
    }

    #[test]
    fn test_backend_reply_tolerates_unknown_and_missing_fields() {
        let reply: BackendReply =
            serde_json::from_value(json!({ "result": "text", "tokens": 12 })).unwrap();
        assert_eq!(reply.result.as_deref(), Some("text"));
        assert!(reply.improved_resume.is_none());
        assert!(reply.comments.is_none());
    }

    #[test]
    fn test_error_envelope_serializes_camel_case() {
        let body = serde_json::to_value(ErrorEnvelope::default()).unwrap();
        assert_eq!(
            body,
            json!({
                "error": "자소서 생성 중 오류가 발생했습니다.",
                "improvedResume": "죄송합니다. 자소서 생성 중 오류가 발생했습니다. 다시 시도해주세요.",
                "comments": []
            })
        );
    }
}
