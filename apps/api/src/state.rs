use reqwest::Client;

use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Holds no per-search data. Upstream clients are built per request from the
/// credentials that request resolved to, all sharing this one HTTP pool.
#[derive(Clone)]
pub struct AppState {
    pub http: Client,
    pub config: Config,
}
