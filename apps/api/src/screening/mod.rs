// Screening stages applied to each posting, in order:
// keyword filter → agency classifier → fit analyzer.
// All LLM calls go through llm_client::CompletionProvider.

pub mod agency;
pub mod fit_analyzer;
pub mod keyword_filter;
pub mod prompts;
