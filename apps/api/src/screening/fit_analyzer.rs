use std::sync::Arc;

use tracing::warn;

use crate::llm_client::CompletionProvider;
use crate::models::posting::Posting;
use crate::screening::prompts::{fit_analysis_prompt, FIT_ANALYSIS_MAX_TOKENS};

/// Commentary for a posting whose analysis call failed.
pub const ANALYSIS_ERROR_MARKER: &str = "AI error";
/// Commentary when the fit check is turned off.
pub const FIT_CHECK_SKIPPED: &str = "skipped";

/// Asks the LLM whether a posting reads as open to external recruiters.
///
/// Never fails: a broken call yields `ANALYSIS_ERROR_MARKER` so the posting
/// keeps its row and the failure stays visible.
pub struct FitAnalyzer {
    llm: Option<Arc<dyn CompletionProvider>>,
}

impl FitAnalyzer {
    pub fn new(llm: Option<Arc<dyn CompletionProvider>>) -> Self {
        Self { llm }
    }

    pub async fn analyze(&self, posting: &Posting) -> String {
        let Some(llm) = &self.llm else {
            warn!("Fit analysis requested without an LLM provider");
            return ANALYSIS_ERROR_MARKER.to_string();
        };

        match llm
            .complete(&fit_analysis_prompt(&posting.description), FIT_ANALYSIS_MAX_TOKENS)
            .await
        {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                warn!("Fit analysis for '{}' returned no text", posting.title);
                ANALYSIS_ERROR_MARKER.to_string()
            }
            Err(e) => {
                warn!("Fit analysis failed for '{}' at {}: {e}", posting.title, posting.company);
                ANALYSIS_ERROR_MARKER.to_string()
            }
        }
    }
}
