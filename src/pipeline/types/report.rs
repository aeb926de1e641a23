use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::{
    composition::CompositionScore, harmony::HarmonyResult, style::MatchResult, swatch::Swatch,
    weight::WeightField, zone::ZoneReport,
};
use crate::error::Result;

/// Everything computed for one submitted image.
#[derive(Debug, Clone, Serialize)]
pub struct CompositionReport {
    pub image_id: Uuid,
    pub generation: u64,
    pub analyzed_at: DateTime<Utc>,
    pub source_dimensions: (u32, u32),
    pub working_dimensions: (u32, u32),
    pub sample_count: usize,
    pub swatches: Vec<Swatch>,
    pub composition: CompositionScore,
    pub harmony: HarmonyResult,
    pub zones: ZoneReport,
    pub weight: WeightField,
    pub style_matches: Vec<MatchResult<'static>>,
}

impl CompositionReport {
    pub fn best_match(&self) -> Option<&MatchResult<'static>> {
        self.style_matches.first()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
