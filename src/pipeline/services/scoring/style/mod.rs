mod profiles;

pub use profiles::REFERENCE_PROFILES;

use crate::pipeline::types::{
    HarmonyResult, MatchResult, StyleProfile, Swatch, ZoneReport,
};

const FULL_CREDIT: f64 = 25.0;
const PARTIAL_CREDIT: f64 = 10.0;
const HUE_PARTIAL_CREDIT: f64 = 8.0;

/// Outputs of the earlier stages that feed style matching. Missing pieces
/// are simply left out of the average.
#[derive(Debug, Clone, Copy, Default)]
pub struct CombinedAnalysis<'a> {
    pub swatches: Option<&'a [Swatch]>,
    pub harmony: Option<&'a HarmonyResult>,
    pub zones: Option<&'a ZoneReport>,
}

fn in_hue_range(hue: f64, (start, end): (f64, f64)) -> bool {
    if start <= end {
        hue >= start && hue <= end
    } else {
        hue >= start || hue <= end
    }
}

/// Ranks reference profiles against one image's analysis.
#[derive(Debug, Clone)]
pub struct StyleMatcher<'p> {
    profiles: &'p [StyleProfile],
}

impl StyleMatcher<'static> {
    pub fn new() -> Self {
        Self::with_profiles(&REFERENCE_PROFILES)
    }
}

impl Default for StyleMatcher<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'p> StyleMatcher<'p> {
    pub fn with_profiles(profiles: &'p [StyleProfile]) -> Self {
        Self { profiles }
    }

    pub fn profiles(&self) -> &'p [StyleProfile] {
        self.profiles
    }

    /// One result per profile, best first; ties keep table order.
    pub fn match_styles(&self, analysis: &CombinedAnalysis<'_>) -> Vec<MatchResult<'p>> {
        let mut results: Vec<MatchResult<'p>> = self
            .profiles
            .iter()
            .map(|profile| MatchResult {
                profile,
                match_score: Self::score_profile(profile, analysis),
            })
            .collect();

        results.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        results
    }

    fn score_profile(profile: &StyleProfile, analysis: &CombinedAnalysis<'_>) -> u8 {
        let swatches = analysis.swatches.filter(|s| !s.is_empty());
        let sub_scores = [
            swatches.map(|s| Self::saturation_fit(profile, s)),
            analysis.harmony.map(|h| {
                if profile.harmonies.contains(&h.harmony_type) {
                    FULL_CREDIT
                } else {
                    PARTIAL_CREDIT
                }
            }),
            analysis.zones.map(|z| {
                if profile.tonal_characters.contains(&z.character) {
                    FULL_CREDIT
                } else {
                    PARTIAL_CREDIT
                }
            }),
            swatches.map(|s| Self::hue_fit(profile, &s[0])),
        ];

        let available: Vec<f64> = sub_scores.into_iter().flatten().collect();
        if available.is_empty() {
            return 0;
        }
        let average = available.iter().sum::<f64>() / available.len() as f64;
        (average * 4.0).round().clamp(0.0, 100.0) as u8
    }

    fn saturation_fit(profile: &StyleProfile, swatches: &[Swatch]) -> f64 {
        let top: Vec<f64> = swatches.iter().take(3).map(|s| s.hsl().saturation).collect();
        let avg = top.iter().sum::<f64>() / top.len() as f64;
        let (low, high) = profile.saturation_range;

        let distance = if avg < low {
            low - avg
        } else if avg > high {
            avg - high
        } else {
            0.0
        };
        (FULL_CREDIT - distance).max(0.0)
    }

    fn hue_fit(profile: &StyleProfile, dominant: &Swatch) -> f64 {
        let hue = dominant.hsl().hue;
        if profile.hue_ranges.iter().any(|range| in_hue_range(hue, *range)) {
            FULL_CREDIT
        } else {
            HUE_PARTIAL_CREDIT
        }
    }
}
