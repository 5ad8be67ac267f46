use serde::{Deserialize, Serialize};

/// The generation models the backend knows about.
///
/// `Gpt4` is the primary model: it is selected whenever a caller leaves the
/// model blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AiModel {
    #[default]
    #[serde(rename = "gpt-4")]
    Gpt4,
    #[serde(rename = "gpt-3.5-turbo")]
    Gpt35Turbo,
    #[serde(rename = "claude-3")]
    Claude3,
    #[serde(rename = "gemini-pro")]
    GeminiPro,
}

impl AiModel {
    pub const ALL: [AiModel; 4] = [
        AiModel::Gpt4,
        AiModel::Gpt35Turbo,
        AiModel::Claude3,
        AiModel::GeminiPro,
    ];

    /// Wire identifier sent to the backend.
    pub fn as_str(self) -> &'static str {
        match self {
            AiModel::Gpt4 => "gpt-4",
            AiModel::Gpt35Turbo => "gpt-3.5-turbo",
            AiModel::Claude3 => "claude-3",
            AiModel::GeminiPro => "gemini-pro",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AiModel::Gpt4 => "GPT-4 (추천)",
            AiModel::Gpt35Turbo => "GPT-3.5 Turbo",
            AiModel::Claude3 => "Claude 3",
            AiModel::GeminiPro => "Gemini Pro",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AiModel::Gpt4 => "가장 정확하고 자연스러운 결과를 제공합니다.",
            AiModel::Gpt35Turbo => "빠르고 효율적인 모델입니다.",
            AiModel::Claude3 | AiModel::GeminiPro => "향후 지원 예정입니다.",
        }
    }

    /// Case-insensitive lookup by wire identifier.
    pub fn parse(raw: &str) -> Option<AiModel> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|model| model.as_str().eq_ignore_ascii_case(raw))
    }
}
