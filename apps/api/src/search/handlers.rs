//! Axum route handlers for the Search API.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use tracing::debug;

use crate::errors::AppError;
use crate::llm_client::{CompletionProvider, LlmClient};
use crate::search::validation::{validate_search, SearchRequest, ValidatedSearch};
use crate::search::{execute_search, SearchResponse};
use crate::sources::adzuna::AdzunaSource;
use crate::state::AppState;

/// POST /api/v1/jobs/search
///
/// Runs the full search: Adzuna fetch → keyword filter → agency check → fit
/// analysis → one page of rows. Invalid input is rejected before any upstream call.
pub async fn handle_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let search = validate_search(request, &state.config)?;
    Ok(Json(run(&state, search).await))
}

/// GET /api/v1/jobs/search
///
/// Same as the POST form, with fields as query parameters. Used for paging.
///
/// Nothing is cached between requests: each page re-runs the fetch and both
/// LLM stages, so a later page costs as much as the first and its boundaries
/// can shift if Adzuna ranking or the model's answers change in between.
pub async fn handle_search_query(
    State(state): State<AppState>,
    Query(request): Query<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let search = validate_search(request, &state.config)?;
    Ok(Json(run(&state, search).await))
}

async fn run(state: &AppState, search: ValidatedSearch) -> SearchResponse {
    let config = &state.config;
    let source = AdzunaSource::new(
        state.http.clone(),
        &config.adzuna_base_url,
        &config.adzuna_country,
        search.adzuna,
    );
    let llm = search.openai_api_key.map(|key| {
        let client = LlmClient::new(
            state.http.clone(),
            &config.openai_base_url,
            &config.openai_model,
            key,
        );
        debug!("LLM checks enabled (model: {})", client.model());
        Arc::new(client) as Arc<dyn CompletionProvider>
    });

    execute_search(&source, llm, search.pipeline, config.fetch_limit).await
}
