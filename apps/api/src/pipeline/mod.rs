//! Result Pipeline: orchestrates screening over fetched postings.
//!
//! Flow per record, in provider order:
//!   parse → keyword filter → agency classifier → fit analyzer
//!
//! Each record resolves to exactly one `ItemOutcome`: accepted with its
//! analysis, or excluded with an attributable reason. Processing stops as soon
//! as `result_limit` postings are accepted; later records are never looked at.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::llm_client::CompletionProvider;
use crate::models::exclusion::{ExclusionReason, ExclusionRecord};
use crate::models::posting::{record_label, Posting};
use crate::screening::agency::{AgencyClassifier, AgencyDecision, ClassificationVerdict};
use crate::screening::fit_analyzer::{FitAnalyzer, FIT_CHECK_SKIPPED};
use crate::screening::keyword_filter::KeywordFilter;
use crate::sources::{fetch_postings, JobSource};

pub mod paginate;

pub const MAX_RESULT_LIMIT: usize = 50;
pub const MAX_PAGE_SIZE: usize = 50;

/// Per-run settings, fixed once the request is validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub keyword: String,
    pub result_limit: usize,
    pub page_size: usize,
    pub page_number: usize,
    pub enable_agency_check: bool,
    pub enable_fit_check: bool,
}

/// A posting that survived screening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub posting: Posting,
    /// `None` when the agency check was off.
    pub verdict_used: Option<ClassificationVerdict>,
    pub commentary: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Accepted(AnalysisResult),
    Excluded(ExclusionRecord),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    /// The provider returned nothing.
    NoJobsFound,
    /// Postings came back but none survived screening.
    NoSuitableJobs,
    Completed,
}

#[derive(Debug)]
pub struct PipelineOutcome {
    pub status: PipelineStatus,
    pub results: Vec<AnalysisResult>,
    pub exclusions: Vec<ExclusionRecord>,
    /// Non-fatal upstream problems, e.g. a failed page fetch.
    pub warnings: Vec<String>,
    pub fetched: usize,
}

pub struct ResultPipeline {
    config: PipelineConfig,
    filter: KeywordFilter,
    agency: Option<AgencyClassifier>,
    fit: Option<FitAnalyzer>,
}

impl ResultPipeline {
    /// `llm` backs both optional LLM stages; it is ignored when both are disabled.
    pub fn new(config: PipelineConfig, llm: Option<Arc<dyn CompletionProvider>>) -> Self {
        let agency = config
            .enable_agency_check
            .then(|| AgencyClassifier::new(llm.clone()));
        let fit = config.enable_fit_check.then(|| FitAnalyzer::new(llm));
        let filter = KeywordFilter::new(&config.keyword);
        debug!(
            "Pipeline: tokens={:?}, limit={}, agency_check={}, fit_check={}",
            filter.tokens(),
            config.result_limit,
            config.enable_agency_check,
            config.enable_fit_check
        );

        Self {
            filter,
            config,
            agency,
            fit,
        }
    }

    /// Fetches up to `fetch_limit` records from `source` and screens them.
    pub async fn run(&self, source: &dyn JobSource, fetch_limit: usize) -> PipelineOutcome {
        let fetch = fetch_postings(source, &self.config.keyword, fetch_limit).await;
        let warnings: Vec<String> = fetch.warning.into_iter().collect();
        info!(
            "Fetched {} records from {} for '{}'",
            fetch.records.len(),
            source.name(),
            self.config.keyword
        );

        let mut outcome = self.screen(&fetch.records).await;
        outcome.warnings = warnings;
        outcome
    }

    /// Screens already-fetched records in order.
    pub async fn screen(&self, records: &[Value]) -> PipelineOutcome {
        let mut results = Vec::new();
        let mut exclusions = Vec::new();

        if records.is_empty() {
            return PipelineOutcome {
                status: PipelineStatus::NoJobsFound,
                results,
                exclusions,
                warnings: Vec::new(),
                fetched: 0,
            };
        }

        for record in records {
            if results.len() >= self.config.result_limit {
                debug!("Result limit {} reached; stopping", self.config.result_limit);
                break;
            }

            match self.process_record(record).await {
                ItemOutcome::Accepted(result) => results.push(result),
                ItemOutcome::Excluded(exclusion) => {
                    debug!(
                        "Excluded '{}' at {}: {}",
                        exclusion.title,
                        exclusion.company,
                        exclusion.reason.describe()
                    );
                    exclusions.push(exclusion);
                }
            }
        }

        let status = if results.is_empty() {
            PipelineStatus::NoSuitableJobs
        } else {
            PipelineStatus::Completed
        };
        info!(
            "Screening complete: {} accepted, {} excluded, {} fetched",
            results.len(),
            exclusions.len(),
            records.len()
        );

        PipelineOutcome {
            status,
            results,
            exclusions,
            warnings: Vec::new(),
            fetched: records.len(),
        }
    }

    /// Runs one record through every stage.
    pub async fn process_record(&self, record: &Value) -> ItemOutcome {
        let posting = match Posting::from_record(record) {
            Ok(posting) => posting,
            Err(e) => {
                let (company, title) = record_label(record);
                return ItemOutcome::Excluded(ExclusionRecord::new(
                    &company,
                    &title,
                    ExclusionReason::MalformedPosting,
                    Some(e.to_string()),
                ));
            }
        };

        if let Err(rejection) = self.filter.check(&posting) {
            return excluded(&posting, rejection.reason, rejection.detail);
        }

        let decision = match &self.agency {
            Some(classifier) => classifier.decide(&posting.company).await,
            None => AgencyDecision::NotChecked,
        };
        if let Some((reason, detail)) = decision.exclusion() {
            return excluded(&posting, reason, detail);
        }

        let commentary = match &self.fit {
            Some(analyzer) => analyzer.analyze(&posting).await,
            None => FIT_CHECK_SKIPPED.to_string(),
        };

        ItemOutcome::Accepted(AnalysisResult {
            posting,
            verdict_used: decision.verdict_used(),
            commentary,
        })
    }
}

fn excluded(posting: &Posting, reason: ExclusionReason, detail: Option<String>) -> ItemOutcome {
    ItemOutcome::Excluded(ExclusionRecord::new(
        &posting.company,
        &posting.title,
        reason,
        detail,
    ))
}
