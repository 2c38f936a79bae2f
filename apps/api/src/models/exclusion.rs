use serde::{Deserialize, Serialize};

/// Why a posting was dropped from the results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    HostileLanguage,
    TitleMismatch,
    AgencyClassifierPositive,
    AgencyFallbackMatch,
    MalformedPosting,
}

impl ExclusionReason {
    pub fn describe(self) -> &'static str {
        match self {
            ExclusionReason::HostileLanguage => "contains recruiter-hostile language",
            ExclusionReason::TitleMismatch => "title does not match keyword",
            ExclusionReason::AgencyClassifierPositive => "agency classifier positive",
            ExclusionReason::AgencyFallbackMatch => "fallback keyword match",
            ExclusionReason::MalformedPosting => "parsing error",
        }
    }
}

/// One entry of the exclusion trail. Diagnostic only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionRecord {
    pub company: String,
    pub title: String,
    pub reason: ExclusionReason,
    /// The phrase, term or parse error that triggered the exclusion.
    pub detail: Option<String>,
}

impl ExclusionRecord {
    pub fn new(
        company: &str,
        title: &str,
        reason: ExclusionReason,
        detail: Option<String>,
    ) -> Self {
        Self {
            company: company.to_string(),
            title: title.to_string(),
            reason,
            detail,
        }
    }
}
