use tracing::debug;

use super::core::SampleAnalyzer;
use crate::config::ZoneConfig;
use crate::pipeline::types::{
    SampledPixelSet, TonalCharacter, ZONE_COUNT, ZoneBucket, ZoneClass, ZoneInfo, ZoneReport,
    relative_luminance,
};

const fn zone(
    index: u8,
    numeral: &'static str,
    name: &'static str,
    description: &'static str,
    class: ZoneClass,
) -> ZoneInfo {
    ZoneInfo {
        index,
        numeral,
        name,
        description,
        class,
    }
}

pub static ZONES: [ZoneInfo; ZONE_COUNT] = [
    zone(0, "0", "Pure Black", "Total black with no detail", ZoneClass::Shadow),
    zone(1, "I", "Near Black", "Slight tonality, no texture", ZoneClass::Shadow),
    zone(2, "II", "Textured Black", "First hint of texture in deep shadow", ZoneClass::Shadow),
    zone(3, "III", "Dark Shadow", "Dark materials with clear detail", ZoneClass::Shadow),
    zone(4, "IV", "Open Shadow", "Shaded skin, foliage and stone", ZoneClass::Midtone),
    zone(5, "V", "Middle Grey", "18% grey, the metered midpoint", ZoneClass::Midtone),
    zone(6, "VI", "Light Midtone", "Lit skin, clear north sky", ZoneClass::Midtone),
    zone(7, "VII", "Light Tone", "Pale skin, light grey objects", ZoneClass::Highlight),
    zone(8, "VIII", "Textured White", "Whites that still hold texture", ZoneClass::Highlight),
    zone(9, "IX", "Near White", "Glaring surfaces, barely any texture", ZoneClass::Highlight),
    zone(10, "X", "Pure White", "Specular highlights and light sources", ZoneClass::Highlight),
];

/// Zone System tone mapper: 11-bucket luminance histogram plus tonal key.
#[derive(Debug, Clone)]
pub struct ToneMapper {
    significance_threshold: f64,
}

impl ToneMapper {
    pub fn new(config: &ZoneConfig) -> Self {
        Self {
            significance_threshold: config.significance_threshold,
        }
    }

    pub fn zone_index(rgb: [u8; 3]) -> usize {
        ((relative_luminance(rgb) * 10.0).round() as usize).min(ZONE_COUNT - 1)
    }

    pub fn map_zones(&self, samples: &SampledPixelSet) -> ZoneReport {
        let mut counts = [0usize; ZONE_COUNT];
        for px in samples.pixels() {
            counts[Self::zone_index(*px)] += 1;
        }

        let total = samples.len();
        let percentages: Vec<f64> = counts
            .iter()
            .map(|&c| if total == 0 { 0.0 } else { c as f64 / total as f64 * 100.0 })
            .collect();

        let aggregate = |class: ZoneClass| -> f64 {
            ZONES
                .iter()
                .zip(&percentages)
                .filter(|(z, _)| z.class == class)
                .map(|(_, p)| p)
                .sum()
        };
        let shadow = aggregate(ZoneClass::Shadow);
        let midtone = aggregate(ZoneClass::Midtone);
        let highlight = aggregate(ZoneClass::Highlight);

        let dynamic_range = self.dynamic_range(&percentages);
        let character = Self::classify(shadow, midtone, highlight, dynamic_range);

        // First bucket wins ties, so an empty histogram peaks at zone 0.
        let peak_zone = counts
            .iter()
            .enumerate()
            .fold(0, |best, (i, &c)| if c > counts[best] { i } else { best });

        debug!(
            "Zone map: peak {} range {} character {:?}",
            peak_zone, dynamic_range, character
        );

        ZoneReport {
            buckets: ZONES
                .iter()
                .zip(counts.iter().zip(&percentages))
                .map(|(zone, (&count, &percentage))| ZoneBucket {
                    zone,
                    count,
                    percentage,
                })
                .collect(),
            peak_zone: peak_zone as u8,
            dynamic_range,
            shadow_percentage: shadow,
            midtone_percentage: midtone,
            highlight_percentage: highlight,
            character,
            description: character.description().to_string(),
        }
    }

    /// Span between the darkest and brightest zone holding a significant share.
    fn dynamic_range(&self, percentages: &[f64]) -> u8 {
        let significant: Vec<usize> = percentages
            .iter()
            .enumerate()
            .filter(|(_, p)| **p > 0.0 && **p >= self.significance_threshold)
            .map(|(i, _)| i)
            .collect();

        match (significant.first(), significant.last()) {
            (Some(lo), Some(hi)) => (hi - lo) as u8,
            _ => 0,
        }
    }

    fn classify(shadow: f64, midtone: f64, highlight: f64, dynamic_range: u8) -> TonalCharacter {
        if shadow > 50.0 {
            TonalCharacter::LowKey
        } else if highlight > 50.0 {
            TonalCharacter::HighKey
        } else if midtone > 50.0 {
            TonalCharacter::MiddleKey
        } else if dynamic_range >= 8 {
            TonalCharacter::FullRange
        } else if dynamic_range <= 4 {
            TonalCharacter::Compressed
        } else {
            TonalCharacter::Balanced
        }
    }
}

impl Default for ToneMapper {
    fn default() -> Self {
        Self::new(&ZoneConfig::default())
    }
}

impl SampleAnalyzer for ToneMapper {
    type Input = SampledPixelSet;
    type Output = ZoneReport;

    fn analyze(&self, input: &SampledPixelSet) -> ZoneReport {
        self.map_zones(input)
    }

    fn name(&self) -> &'static str {
        "ToneMapper"
    }
}
