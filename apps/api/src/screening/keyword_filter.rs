//! Deterministic keyword screening. Runs before any LLM call.

use crate::models::exclusion::ExclusionReason;
use crate::models::posting::Posting;

/// Phrases signalling the poster will not work with external recruiters.
/// Matched as lowercase substrings of `title + " " + description`.
pub const HOSTILE_PHRASES: [&str; 3] = ["no recruiters", "no agencies", "no recruitment agencies"];

/// Why `KeywordFilter::check` rejected a posting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub reason: ExclusionReason,
    pub detail: Option<String>,
}

/// Two-rule filter bound to one search keyword.
///
/// 1. Hostility: reject if any `HOSTILE_PHRASES` entry appears.
/// 2. Relevance: the lowercased title must contain at least one keyword token.
///    Tokens are OR'd, so "senior project manager" accepts a title containing
///    only "senior".
#[derive(Debug, Clone)]
pub struct KeywordFilter {
    tokens: Vec<String>,
}

impl KeywordFilter {
    pub fn new(keyword: &str) -> Self {
        Self {
            tokens: keyword.to_lowercase().split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn check(&self, posting: &Posting) -> Result<(), Rejection> {
        if let Some(phrase) = hostile_phrase(posting) {
            return Err(Rejection {
                reason: ExclusionReason::HostileLanguage,
                detail: Some(phrase.to_string()),
            });
        }

        let title = posting.title.to_lowercase();
        if !self.tokens.iter().any(|token| title.contains(token.as_str())) {
            return Err(Rejection {
                reason: ExclusionReason::TitleMismatch,
                detail: None,
            });
        }

        Ok(())
    }
}

/// First hostile phrase found in the posting's title or description.
pub fn hostile_phrase(posting: &Posting) -> Option<&'static str> {
    let text = format!("{} {}", posting.title, posting.description).to_lowercase();
    HOSTILE_PHRASES.into_iter().find(|phrase| text.contains(phrase))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posting(title: &str, description: &str) -> Posting {
        Posting {
            title: title.to_string(),
            company: "Acme".to_string(),
            description: description.to_string(),
            url: "#".to_string(),
        }
    }

    #[test]
    fn test_hostile_phrase_in_title_rejects() {
        let filter = KeywordFilter::new("project manager");
        let rejection = filter
            .check(&posting("Project Manager (no agencies)", ""))
            .unwrap_err();
        assert_eq!(rejection.reason, ExclusionReason::HostileLanguage);
        assert_eq!(rejection.detail.as_deref(), Some("no agencies"));
    }

    #[test]
    fn test_hostile_phrase_in_description_is_case_insensitive() {
        let filter = KeywordFilter::new("engineer");
        let rejection = filter
            .check(&posting("Software Engineer", "Please, NO RECRUITERS."))
            .unwrap_err();
        assert_eq!(rejection.reason, ExclusionReason::HostileLanguage);
    }

    #[test]
    fn test_hostility_checked_before_relevance() {
        let filter = KeywordFilter::new("nurse");
        let rejection = filter
            .check(&posting("Accountant", "No recruitment agencies please"))
            .unwrap_err();
        assert_eq!(rejection.reason, ExclusionReason::HostileLanguage);
    }

    #[test]
    fn test_phrases_are_literal_substrings() {
        // Punctuation between the words defeats the match.
        let filter = KeywordFilter::new("engineer");
        assert!(filter.check(&posting("Engineer", "no-recruiters policy")).is_ok());
    }

    #[test]
    fn test_title_mismatch_rejects() {
        let filter = KeywordFilter::new("project manager");
        let rejection = filter
            .check(&posting("Data Scientist", "Manage projects daily"))
            .unwrap_err();
        assert_eq!(rejection.reason, ExclusionReason::TitleMismatch);
        assert!(rejection.detail.is_none());
    }

    #[test]
    fn test_any_keyword_token_matches() {
        let filter = KeywordFilter::new("Senior Project Manager");
        assert!(filter.check(&posting("Senior Accountant", "")).is_ok());
        assert!(filter.check(&posting("Store MANAGER", "")).is_ok());
    }

    #[test]
    fn test_tokens_match_as_substrings() {
        let filter = KeywordFilter::new("engineer");
        assert!(filter.check(&posting("Engineering Lead", "")).is_ok());
    }

    #[test]
    fn test_keyword_tokenized_on_whitespace() {
        let filter = KeywordFilter::new("  Senior\tProject   Manager ");
        assert_eq!(filter.tokens(), ["senior", "project", "manager"]);
    }

    #[test]
    fn test_same_input_same_decision() {
        let filter = KeywordFilter::new("manager");
        let postings = [
            posting("Manager", "no agencies"),
            posting("Manager", "great team"),
            posting("Chef", ""),
        ];
        let first: Vec<_> = postings.iter().map(|p| filter.check(p)).collect();
        let second: Vec<_> = postings.iter().map(|p| filter.check(p)).collect();
        assert_eq!(first, second);
    }
}
