use axum::{extract::State, Json};
use serde::Serialize;

use crate::form::{FormBounds, DEFAULT_WORD_LIMIT, FORM_BOUNDS};
use crate::models::AiModel;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AppConfigResponse {
    pub app: AppInfo,
    pub models: Vec<ModelOption>,
    pub bounds: FormBounds,
    pub defaults: FormDefaults,
}

#[derive(Debug, Serialize)]
pub struct AppInfo {
    pub name: String,
    pub description: String,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ModelOption {
    pub value: AiModel,
    pub label: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDefaults {
    pub ai_model: AiModel,
    pub word_limit: u32,
    pub include_comments: bool,
}

/// GET /api/config
///
/// Everything a page needs to draw the form: display strings, the model
/// picker and the field bounds.
pub async fn handle_app_config(State(state): State<AppState>) -> Json<AppConfigResponse> {
    let models = AiModel::ALL
        .into_iter()
        .map(|model| ModelOption {
            value: model,
            label: model.label(),
            description: model.description(),
        })
        .collect();

    Json(AppConfigResponse {
        app: AppInfo {
            name: state.config.app_name.clone(),
            description: state.config.app_description.clone(),
            version: env!("CARGO_PKG_VERSION"),
        },
        models,
        bounds: FORM_BOUNDS,
        defaults: FormDefaults {
            ai_model: AiModel::default(),
            word_limit: DEFAULT_WORD_LIMIT,
            include_comments: true,
        },
    })
}
