pub mod core;
pub mod quantizer;
pub mod sampler;
pub mod weight_analyzer;
pub mod zone_mapper;

pub use self::core::SampleAnalyzer;
pub use quantizer::ColorQuantizer;
pub use sampler::PixelSampler;
pub use weight_analyzer::WeightAnalyzer;
pub use zone_mapper::{ToneMapper, ZONES};
