//! Turns whatever the backend sent into a fixed `GenerationResult`.
//!
//! Fallback chain for the text: `improvedResume` → `result` → placeholder.
//! Fallback for comments: `comments` → the canned four-item list.
//! Empty strings count as missing.

use crate::models::generation::{BackendReply, GenerationResult, MISSING_RESULT_TEXT};

const FALLBACK_COMMENTS: [&str; 3] = [
    "문장 구조를 더 명확하게 개선했습니다.",
    "회사와 직군에 맞는 키워드를 추가했습니다.",
    "글자수 제한에 맞게 내용을 조정했습니다.",
];

pub fn normalize(reply: BackendReply, model: &str) -> GenerationResult {
    let improved_resume = reply
        .improved_resume
        .filter(|text| !text.is_empty())
        .or_else(|| reply.result.filter(|text| !text.is_empty()))
        .unwrap_or_else(|| MISSING_RESULT_TEXT.to_string());

    let comments = reply
        .comments
        .unwrap_or_else(|| fallback_comments(model));

    GenerationResult {
        improved_resume,
        comments,
    }
}

/// Generic improvement notes used when the backend sends no comments.
/// The last note names the model in upper case.
pub fn fallback_comments(model: &str) -> Vec<String> {
    FALLBACK_COMMENTS
        .iter()
        .map(|note| note.to_string())
        .chain(std::iter::once(format!(
            "{} 모델을 사용하여 최적화했습니다.",
            model.to_uppercase()
        )))
        .collect()
}
