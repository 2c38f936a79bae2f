//! Job sources: paginated retrieval of raw posting records.
//!
//! A `JobSource` answers one page at a time; `fetch_postings` owns the paging
//! policy so every provider degrades the same way on failure.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub mod adzuna;

/// Records requested per upstream page.
pub const PAGE_SIZE: usize = 50;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("provider returned status {status}: {message}")]
    Api { status: u16, message: String },
}

/// A job-search provider that can return one page of raw records.
///
/// Records stay raw JSON: turning them into `Posting`s is the pipeline's job,
/// so a malformed record costs one exclusion rather than a whole page.
#[async_trait]
pub trait JobSource: Send + Sync {
    fn name(&self) -> &str;

    /// Fetches 1-based `page` of results for `keyword`.
    async fn fetch_page(
        &self,
        keyword: &str,
        page: usize,
        page_size: usize,
    ) -> Result<Vec<Value>, SourceError>;
}

/// Everything collected by one fetch, plus the failure that cut it short, if any.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    pub records: Vec<Value>,
    pub warning: Option<String>,
}

/// Number of upstream pages needed for `max_results` records.
pub fn pages_for(max_results: usize) -> usize {
    max_results.div_ceil(PAGE_SIZE)
}

/// Pulls up to `max_results` records from `source`, one page at a time.
///
/// A failed page stops paging but keeps everything already collected; the
/// failure comes back as `FetchOutcome::warning`. An empty or short page
/// means the provider has nothing more.
pub async fn fetch_postings(
    source: &dyn JobSource,
    keyword: &str,
    max_results: usize,
) -> FetchOutcome {
    let mut outcome = FetchOutcome::default();

    for page in 1..=pages_for(max_results) {
        match source.fetch_page(keyword, page, PAGE_SIZE).await {
            Ok(records) => {
                let received = records.len();
                debug!("{} page {page}: {received} records", source.name());
                outcome.records.extend(records);
                if received < PAGE_SIZE {
                    break;
                }
            }
            Err(e) => {
                warn!(
                    "{} page {page} failed, keeping {} records: {e}",
                    source.name(),
                    outcome.records.len()
                );
                outcome.warning = Some(format!(
                    "Failed to fetch page {page} from {}: {e}",
                    source.name()
                ));
                break;
            }
        }
    }

    outcome.records.truncate(max_results);
    outcome
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// In-memory source serving a fixed list of pages. A `None` page fails.
    pub struct PagedSource {
        pages: Vec<Option<Vec<Value>>>,
        pub requested: Mutex<Vec<usize>>,
    }

    impl PagedSource {
        pub fn new(pages: Vec<Option<Vec<Value>>>) -> Self {
            Self {
                pages,
                requested: Mutex::new(Vec::new()),
            }
        }

        /// A single page holding `records`.
        pub fn single(records: Vec<Value>) -> Self {
            Self::new(vec![Some(records)])
        }
    }

    #[async_trait]
    impl JobSource for PagedSource {
        fn name(&self) -> &str {
            "paged"
        }

        async fn fetch_page(
            &self,
            _keyword: &str,
            page: usize,
            _page_size: usize,
        ) -> Result<Vec<Value>, SourceError> {
            self.requested.lock().unwrap().push(page);
            match self.pages.get(page - 1) {
                Some(Some(records)) => Ok(records.clone()),
                Some(None) => Err(SourceError::Api {
                    status: 503,
                    message: "unavailable".to_string(),
                }),
                None => Ok(Vec::new()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::PagedSource;
    use super::*;
    use serde_json::json;

    fn records(n: usize, offset: usize) -> Vec<Value> {
        (0..n).map(|i| json!({"title": format!("Job {}", i + offset)})).collect()
    }

    #[test]
    fn test_pages_for_rounds_up() {
        assert_eq!(pages_for(1), 1);
        assert_eq!(pages_for(50), 1);
        assert_eq!(pages_for(51), 2);
        assert_eq!(pages_for(100), 2);
        assert_eq!(pages_for(500), 10);
    }

    #[tokio::test]
    async fn test_fetch_collects_all_pages() {
        let source = PagedSource::new(vec![Some(records(50, 0)), Some(records(50, 50))]);
        let outcome = fetch_postings(&source, "engineer", 100).await;

        assert_eq!(outcome.records.len(), 100);
        assert!(outcome.warning.is_none());
        assert_eq!(*source.requested.lock().unwrap(), vec![1, 2]);
        assert_eq!(outcome.records[50]["title"], "Job 50");
    }

    #[tokio::test]
    async fn test_failed_page_keeps_partial_results() {
        let source = PagedSource::new(vec![Some(records(50, 0)), None, Some(records(50, 100))]);
        let outcome = fetch_postings(&source, "engineer", 150).await;

        assert_eq!(outcome.records.len(), 50);
        let warning = outcome.warning.expect("warning expected");
        assert!(warning.contains("page 2"));
        assert_eq!(*source.requested.lock().unwrap(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_first_page_failure_yields_empty_with_warning() {
        let source = PagedSource::new(vec![None]);
        let outcome = fetch_postings(&source, "engineer", 50).await;

        assert!(outcome.records.is_empty());
        assert!(outcome.warning.is_some());
    }

    #[tokio::test]
    async fn test_short_page_stops_paging() {
        let source = PagedSource::new(vec![Some(records(12, 0)), Some(records(50, 12))]);
        let outcome = fetch_postings(&source, "engineer", 100).await;

        assert_eq!(outcome.records.len(), 12);
        assert_eq!(*source.requested.lock().unwrap(), vec![1]);
    }

    #[tokio::test]
    async fn test_empty_provider_yields_nothing_without_warning() {
        let source = PagedSource::new(vec![]);
        let outcome = fetch_postings(&source, "engineer", 100).await;

        assert!(outcome.records.is_empty());
        assert!(outcome.warning.is_none());
    }

    #[tokio::test]
    async fn test_results_truncated_to_max() {
        let source = PagedSource::single(records(50, 0));
        let outcome = fetch_postings(&source, "engineer", 30).await;

        assert_eq!(outcome.records.len(), 30);
    }
}
