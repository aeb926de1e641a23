pub mod image;
pub mod scoring;

pub use image::{ColorQuantizer, PixelSampler, SampleAnalyzer, ToneMapper, WeightAnalyzer};
pub use scoring::{CombinedAnalysis, CompositionScorer, HarmonyClassifier, StyleMatcher};
