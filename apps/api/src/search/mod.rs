//! Search: turns a validated request into one page of display rows.
//!
//! Flow: validate → fetch → screen → paginate → shape for display.
//! Only validation can fail; every upstream problem ends up in `warnings`,
//! a fallback decision, or a marker commentary.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::llm_client::CompletionProvider;
use crate::models::exclusion::{ExclusionReason, ExclusionRecord};
use crate::pipeline::paginate::{paginate, Pagination};
use crate::pipeline::{AnalysisResult, PipelineConfig, PipelineStatus, ResultPipeline};
use crate::screening::agency::ClassificationVerdict;
use crate::sources::JobSource;

pub mod handlers;
pub mod validation;

/// Exclusions returned to the display layer; the full count is still reported.
pub const EXCLUSION_DISPLAY_LIMIT: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    Ok,
    NoJobsFound,
    NoSuitableJobs,
    PageOutOfRange,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultRow {
    pub company: String,
    pub title: String,
    pub url: String,
    /// Markdown link for table renderers.
    pub link: String,
    pub commentary: String,
    pub agency_verdict: Option<ClassificationVerdict>,
}

impl From<&AnalysisResult> for ResultRow {
    fn from(result: &AnalysisResult) -> Self {
        Self {
            company: result.posting.company.clone(),
            title: result.posting.title.clone(),
            url: result.posting.url.clone(),
            link: format!("[Open Posting]({})", result.posting.url),
            commentary: result.commentary.clone(),
            agency_verdict: result.verdict_used,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExclusionRow {
    pub company: String,
    pub title: String,
    pub reason: ExclusionReason,
    pub description: &'static str,
    pub detail: Option<String>,
}

impl From<&ExclusionRecord> for ExclusionRow {
    fn from(record: &ExclusionRecord) -> Self {
        Self {
            company: record.company.clone(),
            title: record.title.clone(),
            reason: record.reason,
            description: record.reason.describe(),
            detail: record.detail.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub search_id: Uuid,
    pub searched_at: DateTime<Utc>,
    pub status: SearchStatus,
    /// Plain-language explanation for any status other than `ok`.
    pub message: Option<String>,
    pub warnings: Vec<String>,
    pub fetched: usize,
    pub total_results: usize,
    pub total_pages: usize,
    pub page_number: usize,
    pub rows: Vec<ResultRow>,
    pub exclusions: Vec<ExclusionRow>,
    pub excluded_total: usize,
}

/// Runs one search against the given collaborators.
pub async fn execute_search(
    source: &dyn JobSource,
    llm: Option<Arc<dyn CompletionProvider>>,
    config: PipelineConfig,
    fetch_limit: usize,
) -> SearchResponse {
    let search_id = Uuid::new_v4();
    let searched_at = Utc::now();
    let page_size = config.page_size;
    let page_number = config.page_number;
    info!(%search_id, "Search started: keyword='{}'", config.keyword);

    let pipeline = ResultPipeline::new(config, llm);
    let outcome = pipeline.run(source, fetch_limit).await;

    let exclusions = outcome
        .exclusions
        .iter()
        .take(EXCLUSION_DISPLAY_LIMIT)
        .map(ExclusionRow::from)
        .collect();

    let mut response = SearchResponse {
        search_id,
        searched_at,
        status: SearchStatus::Ok,
        message: None,
        warnings: outcome.warnings,
        fetched: outcome.fetched,
        total_results: outcome.results.len(),
        total_pages: 0,
        page_number,
        rows: Vec::new(),
        exclusions,
        excluded_total: outcome.exclusions.len(),
    };

    match outcome.status {
        PipelineStatus::NoJobsFound => {
            response.status = SearchStatus::NoJobsFound;
            response.message = Some("No jobs found.".to_string());
        }
        PipelineStatus::NoSuitableJobs => {
            response.status = SearchStatus::NoSuitableJobs;
            response.message = Some("No recruiter-friendly jobs matched your filters.".to_string());
        }
        PipelineStatus::Completed => match paginate(&outcome.results, page_size, page_number) {
            Pagination::Page {
                items, total_pages, ..
            } => {
                response.total_pages = total_pages;
                response.rows = items.iter().map(ResultRow::from).collect();
            }
            Pagination::OutOfRange { total_pages } => {
                response.status = SearchStatus::PageOutOfRange;
                response.total_pages = total_pages;
                response.message = Some(format!("Only {total_pages} pages available."));
            }
        },
    }

    info!(
        %search_id,
        "Search finished: status={:?}, rows={}, excluded={}",
        response.status,
        response.rows.len(),
        response.excluded_total
    );
    response
}
