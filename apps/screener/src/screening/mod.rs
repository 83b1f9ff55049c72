// Resume screening: text extraction, prompt construction, LLM assessment,
// decision parsing and applicant/recruiter notification.
// All LLM calls go through llm_client — no direct provider calls here.

pub mod decision;
pub mod extractor;
pub mod handlers;
pub mod models;
pub mod notifier;
pub mod orchestrator;
pub mod prompt_builder;
pub mod prompts;
pub mod repository;
pub mod requirements;
pub mod validation;
