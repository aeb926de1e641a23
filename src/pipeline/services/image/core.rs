/// Strategy for one independent pass over a sampled pixel set.
///
/// Analyzers are pure: they read an immutable sample and return a fresh
/// record, so several of them can run on separate threads over the same
/// shared sample.
pub trait SampleAnalyzer: Send + Sync {
    type Input: Send + Sync;
    type Output: Send;

    fn analyze(&self, input: &Self::Input) -> Self::Output;
    fn name(&self) -> &'static str;
}
