pub mod analysis_pipeline;
pub mod analysis_service;
pub mod instrumented_analyzer;

pub use analysis_pipeline::{AnalysisPipeline, SampledImage};
pub use analysis_service::{AnalysisService, ImageSubmission};
pub use instrumented_analyzer::{AnalyzerInstrumentation, InstrumentedAnalyzer};
