pub mod orchestration;
pub mod services;
pub mod types;

pub use orchestration::{AnalysisPipeline, AnalysisService, ImageSubmission};
pub use types::{CompositionReport, Swatch};
