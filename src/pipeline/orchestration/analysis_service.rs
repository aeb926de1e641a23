use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use chrono::{DateTime, Utc};
use tower::Service;
use uuid::Uuid;

use super::analysis_pipeline::AnalysisPipeline;
use crate::config::Configuration;
use crate::error::{AnalysisError, Result};
use crate::pipeline::types::CompositionReport;

/// One encoded image handed to the analysis service.
#[derive(Debug, Clone)]
pub struct ImageSubmission {
    pub id: Uuid,
    pub generation: u64,
    pub submitted_at: DateTime<Utc>,
    pub bytes: Vec<u8>,
}

impl ImageSubmission {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            id: Uuid::new_v4(),
            generation: 0,
            submitted_at: Utc::now(),
            bytes,
        }
    }

    pub fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }
}

/// Tower front for [`AnalysisPipeline`]. Cloning is cheap and shares the pipeline.
#[derive(Debug, Clone)]
pub struct AnalysisService {
    pipeline: Arc<AnalysisPipeline>,
}

impl AnalysisService {
    pub fn new(pipeline: AnalysisPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }

    pub fn from_config(config: Configuration) -> Result<Self> {
        Ok(Self::new(AnalysisPipeline::new(config)?))
    }

    pub fn pipeline(&self) -> &AnalysisPipeline {
        &self.pipeline
    }
}

impl Service<ImageSubmission> for AnalysisService {
    type Response = CompositionReport;
    type Error = AnalysisError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, submission: ImageSubmission) -> Self::Future {
        let pipeline = self.pipeline.clone();

        Box::pin(async move {
            pipeline
                .analyze_bytes(submission.bytes, submission.id, submission.generation)
                .await
        })
    }
}
