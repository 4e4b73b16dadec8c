//! Analysis service implementations backed by hosted language models.

pub mod analysis_schema;
pub mod gemini_analysis_service;
pub mod prompts;

pub use gemini_analysis_service::GeminiAnalysisService;
