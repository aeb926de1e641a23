//! Cinematographic composition analysis: dominant palette, 60/30/10
//! coverage scoring, hue harmony, Zone System tonality, visual weight and
//! matching against reference cinematographer styles.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod pipeline;

pub use config::Configuration;
pub use coordinator::{AnalysisSession, AnalysisSessionBuilder};
pub use error::{AnalysisError, Result};
pub use pipeline::{AnalysisPipeline, AnalysisService, CompositionReport, ImageSubmission};
