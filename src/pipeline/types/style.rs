use serde::Serialize;

use super::{harmony::HarmonyType, zone::TonalCharacter};

/// Reference record describing one cinematographer's signature palette.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleProfile {
    pub id: &'static str,
    pub cinematographer: &'static str,
    pub label: &'static str,
    pub notable_works: &'static [&'static str],
    /// Inclusive average-saturation band, percent
    pub saturation_range: (f64, f64),
    pub harmonies: &'static [HarmonyType],
    pub tonal_characters: &'static [TonalCharacter],
    /// Hue ranges in degrees; `start > end` wraps through 0
    pub hue_ranges: &'static [(f64, f64)],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult<'a> {
    pub profile: &'a StyleProfile,
    pub match_score: u8,
}
