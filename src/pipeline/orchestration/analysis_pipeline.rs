use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use futures::future::try_join3;
use image::{DynamicImage, GenericImageView};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::instrumented_analyzer::{AnalyzerInstrumentation, InstrumentedAnalyzer};
use crate::config::{Configuration, SamplingConfig};
use crate::error::Result;
use crate::pipeline::services::{
    ColorQuantizer, CombinedAnalysis, CompositionScorer, HarmonyClassifier, PixelSampler,
    StyleMatcher, ToneMapper, WeightAnalyzer,
};
use crate::pipeline::types::{CompositionReport, PositionedPixelSet, SampledPixelSet};

/// Both pixel samples taken from one decoded image.
#[derive(Debug, Clone)]
pub struct SampledImage {
    pub source_dimensions: (u32, u32),
    pub color: Arc<SampledPixelSet>,
    pub weight: Arc<PositionedPixelSet>,
}

/// Decode, sample, run the independent analyzers in parallel, then score.
#[derive(Debug, Clone)]
pub struct AnalysisPipeline {
    config: Arc<Configuration>,
    sampler: PixelSampler,
    quantizer: Arc<InstrumentedAnalyzer<ColorQuantizer>>,
    tone_mapper: Arc<InstrumentedAnalyzer<ToneMapper>>,
    weight_analyzer: Arc<InstrumentedAnalyzer<WeightAnalyzer>>,
    scorer: CompositionScorer,
    harmony: HarmonyClassifier,
    style: StyleMatcher<'static>,
}

impl AnalysisPipeline {
    pub fn new(config: Configuration) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            sampler: PixelSampler::from_config(&config.sampling),
            quantizer: Arc::new(ColorQuantizer::new(config.quantizer.clone()).instrumented()),
            tone_mapper: Arc::new(ToneMapper::new(&config.zones).instrumented()),
            weight_analyzer: Arc::new(WeightAnalyzer::new(&config.weight).instrumented()),
            scorer: CompositionScorer::new(&config.composition),
            harmony: HarmonyClassifier::new(),
            style: StyleMatcher::new(),
            config: Arc::new(config),
        })
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Swap the profile table; the default is the built-in reference set.
    pub fn with_style_matcher(mut self, style: StyleMatcher<'static>) -> Self {
        self.style = style;
        self
    }

    /// The only suspending step; failures abort the run.
    pub async fn decode(bytes: Vec<u8>) -> Result<DynamicImage> {
        tokio::task::spawn_blocking(move || PixelSampler::decode(&bytes)).await?
    }

    pub fn sample(&self, image: &DynamicImage) -> SampledImage {
        Self::sample_with(&self.sampler, &self.config.sampling, image)
    }

    fn sample_with(
        sampler: &PixelSampler,
        sampling: &SamplingConfig,
        image: &DynamicImage,
    ) -> SampledImage {
        let start = Instant::now();
        let color = sampler.sample(image, sampling.color_max_dimension, sampling.color_stride);
        let weight = sampler.sample_positioned(
            image,
            sampling.weight_max_dimension,
            sampling.weight_stride,
        );
        debug!("Sampling took {}us", start.elapsed().as_micros());

        SampledImage {
            source_dimensions: image.dimensions(),
            color: Arc::new(color),
            weight: Arc::new(weight),
        }
    }

    #[instrument(skip_all, fields(image_id = %image_id, generation = generation))]
    pub async fn analyze_bytes(
        &self,
        bytes: Vec<u8>,
        image_id: Uuid,
        generation: u64,
    ) -> Result<CompositionReport> {
        let image = Self::decode(bytes).await?;
        self.analyze_image(image, image_id, generation).await
    }

    pub async fn analyze_image(
        &self,
        image: DynamicImage,
        image_id: Uuid,
        generation: u64,
    ) -> Result<CompositionReport> {
        let start = Instant::now();
        let sampler = self.sampler.clone();
        let config = self.config.clone();
        let sampled =
            tokio::task::spawn_blocking(move || Self::sample_with(&sampler, &config.sampling, &image))
                .await?;

        info!(
            "Analyzing image {}x{} (generation {})",
            sampled.source_dimensions.0, sampled.source_dimensions.1, generation
        );
        if sampled.color.is_empty() {
            warn!("No opaque pixels sampled; reporting defaults");
        }

        let (swatches, zones, weight) = try_join3(
            self.quantizer.clone().run_blocking(sampled.color.clone()),
            self.tone_mapper.clone().run_blocking(sampled.color.clone()),
            self.weight_analyzer.clone().run_blocking(sampled.weight.clone()),
        )
        .await?;

        let composition = self
            .scorer
            .score(&swatches, self.config.composition.rule.targets());
        let harmony = self.harmony.classify(&swatches);
        let style_matches = self.style.match_styles(&CombinedAnalysis {
            swatches: Some(&swatches),
            harmony: Some(&harmony),
            zones: Some(&zones),
        });

        debug!("Analysis finished in {}ms", start.elapsed().as_millis());

        Ok(CompositionReport {
            image_id,
            generation,
            analyzed_at: Utc::now(),
            source_dimensions: sampled.source_dimensions,
            working_dimensions: sampled.color.dimensions(),
            sample_count: sampled.color.len(),
            swatches,
            composition,
            harmony,
            zones,
            weight,
            style_matches,
        })
    }
}
