pub mod ai_model;
pub mod generation;

pub use ai_model::AiModel;
pub use generation::{ErrorEnvelope, GenerationRequest, GenerationResult};
