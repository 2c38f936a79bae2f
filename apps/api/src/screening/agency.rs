//! Agency classification: is the hiring company itself a staffing business?
//!
//! Two tiers. The LLM answers Yes/No; anything it cannot answer cleanly
//! (call failure, refusal, a sentence instead of a word) becomes `Unknown`
//! and a fixed lexical check on the company name decides instead.
//!
//! ```text
//! NotChecked ──classify──▶ Verdict(Yes)      → excluded
//!                          Verdict(No)       → passed
//!                          Verdict(Unknown)
//!                              ──fallback──▶ Fallback(Excluded{term}) → excluded
//!                                            Fallback(Passed)         → passed
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::llm_client::CompletionProvider;
use crate::models::exclusion::ExclusionReason;
use crate::screening::prompts::{agency_classify_prompt, AGENCY_CLASSIFY_MAX_TOKENS};

/// Company-name fragments that mark a staffing business when the classifier can't say.
pub const AGENCY_FALLBACK_TERMS: [&str; 10] = [
    "staffing",
    "recruiting",
    "recruitment",
    "talent",
    "consulting",
    "agency",
    "personnel",
    "placement",
    "headhunter",
    "search firm",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationVerdict {
    Yes,
    No,
    Unknown,
}

impl ClassificationVerdict {
    /// Maps a raw completion to a verdict. Only a bare "yes" or "no" counts.
    pub fn from_answer(answer: &str) -> Self {
        match answer.trim().to_lowercase().as_str() {
            "yes" => ClassificationVerdict::Yes,
            "no" => ClassificationVerdict::No,
            _ => ClassificationVerdict::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackVerdict {
    Excluded { term: &'static str },
    Passed,
}

impl FallbackVerdict {
    pub fn check(company: &str) -> Self {
        let company = company.to_lowercase();
        match AGENCY_FALLBACK_TERMS
            .into_iter()
            .find(|term| company.contains(term))
        {
            Some(term) => FallbackVerdict::Excluded { term },
            None => FallbackVerdict::Passed,
        }
    }
}

/// Where a posting ended up in the classify-then-fallback state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgencyDecision {
    /// Agency check disabled for this run.
    NotChecked,
    /// The classifier gave a usable answer: `Yes` or `No`, never `Unknown`.
    Verdict(ClassificationVerdict),
    /// The classifier answered `Unknown` and the lexical check decided.
    Fallback(FallbackVerdict),
}

impl AgencyDecision {
    /// Advances a classifier verdict to a final decision.
    pub fn resolve(verdict: ClassificationVerdict, company: &str) -> Self {
        match verdict {
            ClassificationVerdict::Unknown => {
                AgencyDecision::Fallback(FallbackVerdict::check(company))
            }
            known => AgencyDecision::Verdict(known),
        }
    }

    /// `None` when the posting passes.
    pub fn exclusion(&self) -> Option<(ExclusionReason, Option<String>)> {
        match self {
            AgencyDecision::Verdict(ClassificationVerdict::Yes) => {
                Some((ExclusionReason::AgencyClassifierPositive, None))
            }
            AgencyDecision::Fallback(FallbackVerdict::Excluded { term }) => {
                Some((ExclusionReason::AgencyFallbackMatch, Some((*term).to_string())))
            }
            _ => None,
        }
    }

    /// The classifier verdict behind this decision; `None` when unchecked.
    pub fn verdict_used(&self) -> Option<ClassificationVerdict> {
        match self {
            AgencyDecision::NotChecked => None,
            AgencyDecision::Verdict(verdict) => Some(*verdict),
            AgencyDecision::Fallback(_) => Some(ClassificationVerdict::Unknown),
        }
    }
}

/// LLM-backed agency classifier. Without a provider every verdict is `Unknown`,
/// which leaves the decision to the lexical fallback.
pub struct AgencyClassifier {
    llm: Option<Arc<dyn CompletionProvider>>,
}

impl AgencyClassifier {
    pub fn new(llm: Option<Arc<dyn CompletionProvider>>) -> Self {
        Self { llm }
    }

    pub async fn classify(&self, company: &str) -> ClassificationVerdict {
        let Some(llm) = &self.llm else {
            return ClassificationVerdict::Unknown;
        };

        match llm
            .complete(&agency_classify_prompt(company), AGENCY_CLASSIFY_MAX_TOKENS)
            .await
        {
            Ok(answer) => {
                let verdict = ClassificationVerdict::from_answer(&answer);
                debug!("Agency classifier for '{company}': {answer:?} -> {verdict:?}");
                verdict
            }
            Err(e) => {
                warn!("Agency classification failed for '{company}': {e}");
                ClassificationVerdict::Unknown
            }
        }
    }

    pub async fn decide(&self, company: &str) -> AgencyDecision {
        AgencyDecision::resolve(self.classify(company).await, company)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::{as_provider, ScriptedProvider};

    fn classifier(provider: ScriptedProvider) -> (AgencyClassifier, Arc<ScriptedProvider>) {
        let provider = Arc::new(provider);
        (AgencyClassifier::new(Some(as_provider(&provider))), provider)
    }

    #[test]
    fn test_verdict_parsing_is_exact() {
        assert_eq!(ClassificationVerdict::from_answer("Yes"), ClassificationVerdict::Yes);
        assert_eq!(ClassificationVerdict::from_answer("  NO \n"), ClassificationVerdict::No);
        assert_eq!(ClassificationVerdict::from_answer(""), ClassificationVerdict::Unknown);
        assert_eq!(ClassificationVerdict::from_answer("Yes."), ClassificationVerdict::Unknown);
        assert_eq!(
            ClassificationVerdict::from_answer("No, it is a robotics firm"),
            ClassificationVerdict::Unknown
        );
    }

    #[test]
    fn test_fallback_matches_literal_terms() {
        assert_eq!(
            FallbackVerdict::check("Acme Staffing Solutions"),
            FallbackVerdict::Excluded { term: "staffing" }
        );
        assert_eq!(
            FallbackVerdict::check("Smith Executive Search Firm"),
            FallbackVerdict::Excluded { term: "search firm" }
        );
        assert_eq!(FallbackVerdict::check("Acme Robotics"), FallbackVerdict::Passed);
        // No stemming: "staff" alone is not a term.
        assert_eq!(FallbackVerdict::check("Staff Kitchen Ltd"), FallbackVerdict::Passed);
    }

    #[test]
    fn test_yes_excludes_without_fallback() {
        let decision = AgencyDecision::resolve(ClassificationVerdict::Yes, "Acme Robotics");
        assert_eq!(decision, AgencyDecision::Verdict(ClassificationVerdict::Yes));
        assert_eq!(
            decision.exclusion(),
            Some((ExclusionReason::AgencyClassifierPositive, None))
        );
    }

    #[test]
    fn test_no_passes_even_with_agency_terms() {
        let decision =
            AgencyDecision::resolve(ClassificationVerdict::No, "Acme Staffing Solutions");
        assert_eq!(decision, AgencyDecision::Verdict(ClassificationVerdict::No));
        assert!(decision.exclusion().is_none());
    }

    #[test]
    fn test_unknown_defers_to_fallback() {
        let staffing =
            AgencyDecision::resolve(ClassificationVerdict::Unknown, "Acme Staffing Solutions");
        assert_eq!(
            staffing.exclusion(),
            Some((ExclusionReason::AgencyFallbackMatch, Some("staffing".to_string())))
        );
        assert_eq!(staffing.verdict_used(), Some(ClassificationVerdict::Unknown));

        let robotics = AgencyDecision::resolve(ClassificationVerdict::Unknown, "Acme Robotics");
        assert_eq!(robotics, AgencyDecision::Fallback(FallbackVerdict::Passed));
        assert!(robotics.exclusion().is_none());
    }

    #[test]
    fn test_not_checked_passes() {
        assert!(AgencyDecision::NotChecked.exclusion().is_none());
        assert!(AgencyDecision::NotChecked.verdict_used().is_none());
    }

    #[tokio::test]
    async fn test_classify_sends_company_prompt() {
        let (classifier, provider) = classifier(ScriptedProvider::answering("No"));
        assert_eq!(classifier.classify("Initech").await, ClassificationVerdict::No);

        let prompts = provider.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Is company Initech a staffing or recruiting agency?"));
    }

    #[tokio::test]
    async fn test_call_failure_is_unknown() {
        let (classifier, _) = classifier(ScriptedProvider::failing());
        assert_eq!(classifier.classify("Initech").await, ClassificationVerdict::Unknown);
    }

    #[tokio::test]
    async fn test_verbose_answer_falls_back() {
        let (classifier, _) = classifier(ScriptedProvider::answering("I believe so, yes."));
        let decision = classifier.decide("Acme Staffing Solutions").await;
        assert_eq!(
            decision,
            AgencyDecision::Fallback(FallbackVerdict::Excluded { term: "staffing" })
        );
    }

    #[tokio::test]
    async fn test_without_provider_fallback_decides() {
        let classifier = AgencyClassifier::new(None);
        assert_eq!(
            classifier.decide("Acme Robotics").await,
            AgencyDecision::Fallback(FallbackVerdict::Passed)
        );
        assert_eq!(
            classifier.decide("Global Talent Partners").await,
            AgencyDecision::Fallback(FallbackVerdict::Excluded { term: "talent" })
        );
    }
}
