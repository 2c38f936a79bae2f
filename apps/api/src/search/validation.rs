use serde::Deserialize;

use crate::config::Config;
use crate::errors::AppError;
use crate::pipeline::{PipelineConfig, MAX_PAGE_SIZE, MAX_RESULT_LIMIT};
use crate::sources::adzuna::AdzunaCredentials;

pub const DEFAULT_RESULT_LIMIT: usize = 10;
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const OPENAI_KEY_PREFIX: &str = "sk-";

/// Search form as submitted by the display layer. Everything but `keyword`
/// is optional; credentials fall back to the server's configured defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub keyword: String,
    pub result_limit: Option<usize>,
    pub page_size: Option<usize>,
    pub page_number: Option<usize>,
    pub enable_agency_check: Option<bool>,
    pub enable_fit_check: Option<bool>,
    pub adzuna_app_id: Option<String>,
    pub adzuna_app_key: Option<String>,
    pub openai_api_key: Option<String>,
}

/// A request that passed validation: run settings plus resolved credentials.
#[derive(Debug, Clone)]
pub struct ValidatedSearch {
    pub pipeline: PipelineConfig,
    pub adzuna: AdzunaCredentials,
    /// Present whenever an LLM stage is enabled.
    pub openai_api_key: Option<String>,
}

/// Checks a search request before any upstream call is made.
pub fn validate_search(
    request: SearchRequest,
    config: &Config,
) -> Result<ValidatedSearch, AppError> {
    let keyword = request.keyword.trim().to_string();
    if keyword.is_empty() {
        return Err(AppError::Validation("keyword cannot be empty".to_string()));
    }

    let result_limit = bounded(
        "result_limit",
        request.result_limit.unwrap_or(DEFAULT_RESULT_LIMIT),
        MAX_RESULT_LIMIT,
    )?;
    let page_size = bounded(
        "page_size",
        request.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        MAX_PAGE_SIZE,
    )?;
    let page_number = request.page_number.unwrap_or(1);
    if page_number == 0 {
        return Err(AppError::Validation("page_number must be at least 1".to_string()));
    }

    let enable_agency_check = request.enable_agency_check.unwrap_or(true);
    let enable_fit_check = request.enable_fit_check.unwrap_or(true);

    let adzuna = AdzunaCredentials {
        app_id: credential("adzuna_app_id", request.adzuna_app_id, &config.adzuna_app_id)?,
        app_key: credential("adzuna_app_key", request.adzuna_app_key, &config.adzuna_app_key)?,
    };

    let openai_api_key = if enable_agency_check || enable_fit_check {
        let key = credential("openai_api_key", request.openai_api_key, &config.openai_api_key)?;
        if !key.starts_with(OPENAI_KEY_PREFIX) {
            return Err(AppError::Validation(format!(
                "openai_api_key must start with '{OPENAI_KEY_PREFIX}'"
            )));
        }
        Some(key)
    } else {
        None
    };

    Ok(ValidatedSearch {
        pipeline: PipelineConfig {
            keyword,
            result_limit,
            page_size,
            page_number,
            enable_agency_check,
            enable_fit_check,
        },
        adzuna,
        openai_api_key,
    })
}

fn bounded(field: &str, value: usize, max: usize) -> Result<usize, AppError> {
    if value == 0 || value > max {
        return Err(AppError::Validation(format!(
            "{field} must be between 1 and {max}"
        )));
    }
    Ok(value)
}

/// Request value if non-blank, otherwise the configured default.
fn credential(
    field: &str,
    supplied: Option<String>,
    fallback: &Option<String>,
) -> Result<String, AppError> {
    supplied
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .or_else(|| fallback.clone())
        .ok_or_else(|| AppError::Validation(format!("{field} is required")))
}
