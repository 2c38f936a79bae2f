use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
///
/// Liveness plus the upstreams a search will use. `default_credentials`
/// reports whether requests may omit their own keys.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let config = &state.config;
    let adzuna_defaults = config.adzuna_app_id.is_some() && config.adzuna_app_key.is_some();
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "job_source": {
            "provider": "adzuna",
            "country": config.adzuna_country,
            "default_credentials": adzuna_defaults,
        },
        "llm": {
            "model": config.openai_model,
            "default_credentials": config.openai_api_key.is_some(),
        },
        "fetch_limit": config.fetch_limit,
    }))
}
