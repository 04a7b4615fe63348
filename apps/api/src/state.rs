use std::sync::Arc;

use sqlx::PgPool;

use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Drafting gateway boundary. The REST surface does not call it yet;
    /// see `drafting` for the library entry points.
    #[allow(dead_code)]
    pub generator: Arc<dyn TextGenerator>,
}
