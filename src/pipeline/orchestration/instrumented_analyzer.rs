use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, instrument};

use crate::error::Result;
use crate::pipeline::services::SampleAnalyzer;

/// Wraps a [`SampleAnalyzer`] with timing and a tracing span.
#[derive(Debug, Clone)]
pub struct InstrumentedAnalyzer<A> {
    inner: A,
}

impl<A: SampleAnalyzer> InstrumentedAnalyzer<A> {
    pub fn new(analyzer: A) -> Self {
        Self { inner: analyzer }
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }

    pub fn into_inner(self) -> A {
        self.inner
    }

    #[instrument(skip(self, input), fields(analyzer = self.inner.name()))]
    pub fn run(&self, input: &A::Input) -> A::Output {
        let start = Instant::now();
        let output = self.inner.analyze(input);
        debug!(
            "Completed analyzer '{}' in {}us",
            self.inner.name(),
            start.elapsed().as_micros()
        );
        output
    }
}

impl<A> InstrumentedAnalyzer<A>
where
    A: SampleAnalyzer + 'static,
    A::Input: 'static,
    A::Output: 'static,
{
    /// Runs the analyzer on the blocking pool so CPU-bound passes never stall the runtime.
    pub async fn run_blocking(self: Arc<Self>, input: Arc<A::Input>) -> Result<A::Output> {
        Ok(tokio::task::spawn_blocking(move || self.run(&input)).await?)
    }
}

/// Extension trait to wrap analyzers with instrumentation
pub trait AnalyzerInstrumentation: SampleAnalyzer + Sized {
    fn instrumented(self) -> InstrumentedAnalyzer<Self> {
        InstrumentedAnalyzer::new(self)
    }
}

impl<A: SampleAnalyzer> AnalyzerInstrumentation for A {}
