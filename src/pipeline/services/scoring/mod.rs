pub mod composition;
pub mod harmony;
pub mod style;

pub use composition::CompositionScorer;
pub use harmony::HarmonyClassifier;
pub use style::{CombinedAnalysis, REFERENCE_PROFILES, StyleMatcher};
