use std::sync::Arc;

use crate::config::Config;
use crate::gateway::ResumeGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-request data.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// The generation gateway. Tests swap in a stub.
    pub generator: Arc<dyn ResumeGenerator>,
}
