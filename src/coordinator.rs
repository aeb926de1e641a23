use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use tokio::sync::RwLock;
use tower::ServiceExt;
use tracing::{debug, info};

use crate::{
    config::Configuration,
    error::Result,
    pipeline::{
        orchestration::{AnalysisService, ImageSubmission},
        types::{CompositionReport, RuleVariant},
    },
};

/// Single-image analysis session.
///
/// Every submission is tagged with a new generation. Submitting again while
/// an earlier run is in flight does not cancel it, but the earlier result
/// is dropped on arrival so it can never replace a newer one.
pub struct AnalysisSession {
    service: AnalysisService,
    generation: AtomicU64,
    latest: RwLock<Option<Arc<CompositionReport>>>,
}

impl AnalysisSession {
    fn new(service: AnalysisService) -> Self {
        Self {
            service,
            generation: AtomicU64::new(0),
            latest: RwLock::new(None),
        }
    }

    /// Analyze an encoded image. Returns `None` when a newer submission or a
    /// reset happened before this run finished.
    pub async fn submit(&self, bytes: Vec<u8>) -> Result<Option<Arc<CompositionReport>>> {
        let generation = self.next_generation();
        let submission = ImageSubmission::new(bytes).with_generation(generation);
        info!(
            "Submitted image {} as generation {}",
            submission.id, generation
        );

        let report = self.service.clone().oneshot(submission).await?;
        Ok(self.publish(generation, report).await)
    }

    /// Invalidate in-flight runs and forget the retained report.
    pub async fn reset(&self) {
        let mut latest = self.latest.write().await;
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *latest = None;
        debug!("Session reset at generation {}", generation);
    }

    pub async fn latest(&self) -> Option<Arc<CompositionReport>> {
        self.latest.read().await.clone()
    }

    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn configuration(&self) -> &Configuration {
        self.service.pipeline().configuration()
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn publish(
        &self,
        generation: u64,
        report: CompositionReport,
    ) -> Option<Arc<CompositionReport>> {
        // Checked under the write lock so a concurrent reset cannot interleave.
        let mut latest = self.latest.write().await;
        let current = self.generation.load(Ordering::SeqCst);
        if generation != current {
            debug!(
                "Dropping stale result for generation {} (current {})",
                generation, current
            );
            return None;
        }

        let report = Arc::new(report);
        *latest = Some(report.clone());
        Some(report)
    }
}

pub struct AnalysisSessionBuilder {
    configuration: Configuration,
    service: Option<AnalysisService>,
}

impl AnalysisSessionBuilder {
    pub fn new(configuration: Configuration) -> Self {
        Self {
            configuration,
            service: None,
        }
    }

    // Sets the target split used by the composition scorer.
    pub fn rule(mut self, rule: RuleVariant) -> Self {
        self.configuration.composition.rule = rule;
        self
    }

    // Fixes the quantizer seed for reproducible palettes.
    pub fn seed(mut self, seed: u64) -> Self {
        self.configuration.quantizer.seed = Some(seed);
        self
    }

    pub fn color_max_dimension(mut self, max_dimension: u32) -> Self {
        self.configuration.sampling.color_max_dimension = max_dimension;
        self
    }

    /// Use a prebuilt service; the builder's configuration is then ignored.
    pub fn service(mut self, service: AnalysisService) -> Self {
        self.service = Some(service);
        self
    }

    pub fn build(self) -> Result<AnalysisSession> {
        let service = match self.service {
            Some(service) => service,
            None => AnalysisService::from_config(self.configuration)?,
        };
        Ok(AnalysisSession::new(service))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
        let image = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(width, height, Rgb(rgb)));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn session() -> AnalysisSession {
        AnalysisSessionBuilder::new(Configuration::default())
            .seed(42)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn submit_retains_latest_report() {
        let session = session();
        let report = session
            .submit(png_bytes(16, 16, [200, 40, 40]))
            .await
            .unwrap()
            .expect("only submission is current");

        assert_eq!(report.generation, 1);
        assert_eq!(session.current_generation(), 1);
        let latest = session.latest().await.unwrap();
        assert_eq!(latest.image_id, report.image_id);
    }

    #[tokio::test]
    async fn stale_results_are_dropped() {
        let session = session();
        let bytes = png_bytes(8, 8, [10, 10, 10]);
        let report = session
            .service
            .clone()
            .oneshot(ImageSubmission::new(bytes).with_generation(1))
            .await
            .unwrap();

        let older = session.next_generation();
        let newer = session.next_generation();
        assert!(session.publish(older, report.clone()).await.is_none());
        assert!(session.latest().await.is_none());
        assert!(session.publish(newer, report).await.is_some());
        assert!(session.latest().await.is_some());
    }

    #[tokio::test]
    async fn reset_invalidates_in_flight_run() {
        let session = session();
        let bytes = png_bytes(256, 256, [90, 120, 200]);

        let (result, ()) = tokio::join!(session.submit(bytes), session.reset());

        assert!(result.unwrap().is_none());
        assert!(session.latest().await.is_none());
        assert_eq!(session.current_generation(), 2);
    }

    #[tokio::test]
    async fn reset_clears_retained_report() {
        let session = session();
        session.submit(png_bytes(8, 8, [1, 2, 3])).await.unwrap();
        assert!(session.latest().await.is_some());

        session.reset().await;
        assert!(session.latest().await.is_none());
    }

    #[tokio::test]
    async fn decode_failure_keeps_previous_report() {
        let session = session();
        session.submit(png_bytes(8, 8, [1, 2, 3])).await.unwrap();

        let err = session.submit(b"broken".to_vec()).await.unwrap_err();
        assert!(err.is_decode_failure());
        assert!(session.latest().await.is_some());
    }

    #[test]
    fn builder_applies_overrides() {
        let session = AnalysisSessionBuilder::new(Configuration::default())
            .rule(RuleVariant::Dramatic)
            .color_max_dimension(200)
            .seed(3)
            .build()
            .unwrap();

        assert_eq!(session.configuration().composition.rule, RuleVariant::Dramatic);
        assert_eq!(session.configuration().sampling.color_max_dimension, 200);
        assert_eq!(session.configuration().quantizer.seed, Some(3));
    }

    #[test]
    fn builder_rejects_invalid_configuration() {
        let result = AnalysisSessionBuilder::new(Configuration::default())
            .color_max_dimension(0)
            .build();
        assert!(result.is_err());
    }
}
