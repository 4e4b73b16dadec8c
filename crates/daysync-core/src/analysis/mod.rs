//! Analysis service boundary.
//!
//! The analysis service is the external natural-language model. The core only
//! sees it through [`AnalysisService`]: it asks for follow-up questions,
//! companion replies and structured day analyses.

mod error;
mod service;

pub use error::AnalysisError;
pub use service::AnalysisService;
