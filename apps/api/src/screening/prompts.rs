// Prompt constants and builders for every LLM call Scout makes.
// Templates use `{placeholder}` markers replaced before sending.

/// Agency classification prompt. Replace `{company}` before sending.
pub const AGENCY_CLASSIFY_PROMPT_TEMPLATE: &str =
    "Is company {company} a staffing or recruiting agency? Answer Yes or No only.";

/// A one-word answer needs almost no room.
pub const AGENCY_CLASSIFY_MAX_TOKENS: u32 = 5;

/// Recruiter-openness prompt. Replace `{description}` before sending.
pub const FIT_ANALYSIS_PROMPT_TEMPLATE: &str = "You are an AI assistant helping a recruiter. \
    Determine if the following job post suggests the company might be open to working with \
    external recruiters. Keep your response to one or two sentences.\n<<<{description}>>>";

pub const FIT_ANALYSIS_MAX_TOKENS: u32 = 100;

pub fn agency_classify_prompt(company: &str) -> String {
    AGENCY_CLASSIFY_PROMPT_TEMPLATE.replace("{company}", company)
}

pub fn fit_analysis_prompt(description: &str) -> String {
    FIT_ANALYSIS_PROMPT_TEMPLATE.replace("{description}", description)
}
