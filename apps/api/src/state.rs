use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::wizard::guard::CompletionGuard;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Serializes wizard completions per session. Redis-backed when `REDIS_URL` is set.
    pub completion_guard: Arc<dyn CompletionGuard>,
}
