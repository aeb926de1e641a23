use crate::pipeline::types::{HarmonyResult, HarmonyType, HslColor, Swatch, hue_distance};

const MAX_COLORS: usize = 3;
const ACHROMATIC_SATURATION: f64 = 15.0;

fn near(value: f64, target: f64, tolerance: f64) -> bool {
    (value - target).abs() <= tolerance
}

/// Classifies the hue relationship of the leading swatches.
#[derive(Debug, Clone, Default)]
pub struct HarmonyClassifier;

impl HarmonyClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, swatches: &[Swatch]) -> HarmonyResult {
        let colors: Vec<HslColor> = swatches.iter().take(MAX_COLORS).map(Swatch::hsl).collect();
        let harmony_type = Self::classify_colors(&colors);
        HarmonyResult::new(harmony_type, colors)
    }

    /// Rules are checked in priority order; the first match wins.
    pub fn classify_colors(colors: &[HslColor]) -> HarmonyType {
        if colors.len() < 2 {
            return HarmonyType::Monochromatic;
        }

        let avg_saturation = colors.iter().map(|c| c.saturation).sum::<f64>() / colors.len() as f64;
        if avg_saturation < ACHROMATIC_SATURATION {
            return HarmonyType::Achromatic;
        }

        let hues: Vec<f64> = colors.iter().map(|c| c.hue).collect();
        let max = hues.iter().copied().fold(f64::MIN, f64::max);
        let min = hues.iter().copied().fold(f64::MAX, f64::min);
        let spread = max - min;
        if spread < 20.0 || spread > 340.0 {
            return HarmonyType::Monochromatic;
        }

        let primary = hues[0];
        let secondaries = &hues[1..];

        if secondaries
            .iter()
            .any(|h| near(hue_distance(primary, *h), 180.0, 30.0))
        {
            return HarmonyType::Complementary;
        }

        if hues.len() >= 3 {
            let pairs = [(hues[0], hues[1]), (hues[0], hues[2]), (hues[1], hues[2])];
            if pairs
                .iter()
                .all(|(a, b)| near(hue_distance(*a, *b), 120.0, 30.0))
            {
                return HarmonyType::Triadic;
            }
        }

        if secondaries.iter().any(|h| {
            let offset = (h - primary).rem_euclid(360.0);
            near(offset, 150.0, 20.0) || near(offset, 210.0, 20.0)
        }) {
            return HarmonyType::SplitComplementary;
        }

        if secondaries
            .iter()
            .all(|h| hue_distance(primary, *h) <= 60.0)
        {
            return HarmonyType::Analogous;
        }

        if hues.len() >= 3 {
            let pairs = [(hues[0], hues[1]), (hues[0], hues[2]), (hues[1], hues[2])];
            if pairs
                .iter()
                .any(|(a, b)| near(hue_distance(*a, *b), 90.0, 20.0))
            {
                return HarmonyType::Tetradic;
            }
        }

        HarmonyType::Complex
    }
}
