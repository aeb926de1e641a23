use std::path::Path;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::pipeline::types::RuleVariant;

const ENV_PREFIX: &str = "CINECOLOR";

/// Tunable parameters for every stage of the analysis pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub sampling: SamplingConfig,
    pub quantizer: QuantizerConfig,
    pub composition: CompositionConfig,
    pub zones: ZoneConfig,
    pub weight: WeightConfig,
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Longest side of the working image for color and zone analysis
    pub color_max_dimension: u32,
    pub color_stride: usize,
    /// Longest side of the working image for weight analysis
    pub weight_max_dimension: u32,
    pub weight_stride: usize,
    /// Pixels with alpha below this value are discarded
    pub alpha_threshold: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuantizerConfig {
    pub seed_count: usize,
    pub target_count: usize,
    pub max_iterations: usize,
    pub convergence_threshold: f64,
    /// Centroids closer than this are folded together
    pub merge_threshold: f64,
    /// Minimum RGB distance between any two reported swatches
    pub min_distinct_distance: f64,
    /// Fixed RNG seed; system entropy when absent
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositionConfig {
    pub rule: RuleVariant,
    pub tolerance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneConfig {
    /// Minimum zone percentage that counts toward dynamic range
    pub significance_threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightConfig {
    pub grid_size: usize,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            sampling: SamplingConfig::default(),
            quantizer: QuantizerConfig::default(),
            composition: CompositionConfig::default(),
            zones: ZoneConfig::default(),
            weight: WeightConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            color_max_dimension: 400,
            color_stride: 4,
            weight_max_dimension: 100,
            weight_stride: 1,
            alpha_threshold: 128, // ~50% opacity
        }
    }
}

impl Default for QuantizerConfig {
    fn default() -> Self {
        Self {
            seed_count: 8,
            target_count: 5,
            max_iterations: 25,
            convergence_threshold: 1.0,
            merge_threshold: 20.0,
            min_distinct_distance: 40.0,
            seed: None,
        }
    }
}

impl Default for CompositionConfig {
    fn default() -> Self {
        Self {
            rule: RuleVariant::Classic,
            tolerance: 10.0,
        }
    }
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            significance_threshold: 2.0,
        }
    }
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self { grid_size: 3 }
    }
}

impl Configuration {
    /// Smaller working images for interactive previews
    pub fn fast() -> Self {
        Self {
            sampling: SamplingConfig {
                color_max_dimension: 200,
                color_stride: 4,
                weight_max_dimension: 64,
                weight_stride: 1,
                alpha_threshold: 128,
            },
            quantizer: QuantizerConfig {
                max_iterations: 15,
                ..QuantizerConfig::default()
            },
            ..Self::default()
        }
    }

    /// Larger working images and denser sampling for final reports
    pub fn detailed() -> Self {
        Self {
            sampling: SamplingConfig {
                color_max_dimension: 800,
                color_stride: 2,
                weight_max_dimension: 200,
                weight_stride: 1,
                alpha_threshold: 128,
            },
            quantizer: QuantizerConfig {
                seed_count: 10,
                max_iterations: 40,
                ..QuantizerConfig::default()
            },
            ..Self::default()
        }
    }

    /// Layers defaults, an optional config file and `CINECOLOR__*` environment
    /// variables, in that order.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        let configuration: Self = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()?;

        configuration.validate()?;
        Ok(configuration)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(AnalysisError::InvalidConfig(msg.to_string()));

        if self.sampling.color_max_dimension == 0 || self.sampling.weight_max_dimension == 0 {
            return invalid("Max working dimensions must be greater than 0");
        }
        if self.sampling.color_stride == 0 || self.sampling.weight_stride == 0 {
            return invalid("Sample strides must be greater than 0");
        }
        if self.quantizer.target_count == 0 {
            return invalid("Quantizer target count must be greater than 0");
        }
        if self.quantizer.target_count > self.quantizer.seed_count {
            return invalid("Quantizer seed count must be at least the target count");
        }
        if self.quantizer.max_iterations == 0 {
            return invalid("Quantizer needs at least one iteration");
        }
        if self.quantizer.convergence_threshold <= 0.0
            || self.quantizer.merge_threshold <= 0.0
            || self.quantizer.min_distinct_distance <= 0.0
        {
            return invalid("Quantizer distance thresholds must be positive");
        }
        if self.composition.tolerance < 0.0 {
            return invalid("Composition tolerance cannot be negative");
        }
        let targets = self.composition.rule.targets();
        if targets.iter().any(|t| !t.is_finite() || *t < 0.0) {
            return invalid("Composition targets must be finite and non-negative");
        }
        if !(0.0..=100.0).contains(&self.zones.significance_threshold) {
            return invalid("Zone significance threshold must be between 0 and 100");
        }
        if self.weight.grid_size == 0 {
            return invalid("Weight grid size must be greater than 0");
        }
        Ok(())
    }

    pub fn with_rule(mut self, rule: RuleVariant) -> Self {
        self.composition.rule = rule;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.quantizer.seed = Some(seed);
        self
    }

    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}
