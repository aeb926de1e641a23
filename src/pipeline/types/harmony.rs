use serde::{Deserialize, Serialize};

use super::color::HslColor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HarmonyType {
    Monochromatic,
    Achromatic,
    Complementary,
    Triadic,
    SplitComplementary,
    Analogous,
    Tetradic,
    Complex,
}

impl HarmonyType {
    pub fn score(&self) -> u8 {
        match self {
            HarmonyType::Complementary => 95,
            HarmonyType::SplitComplementary => 90,
            HarmonyType::Triadic => 88,
            HarmonyType::Analogous => 85,
            HarmonyType::Tetradic => 82,
            HarmonyType::Monochromatic => 80,
            HarmonyType::Achromatic => 78,
            HarmonyType::Complex => 75,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HarmonyType::Monochromatic => "Monochromatic",
            HarmonyType::Achromatic => "Achromatic",
            HarmonyType::Complementary => "Complementary",
            HarmonyType::Triadic => "Triadic",
            HarmonyType::SplitComplementary => "Split-Complementary",
            HarmonyType::Analogous => "Analogous",
            HarmonyType::Tetradic => "Tetradic",
            HarmonyType::Complex => "Complex",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            HarmonyType::Monochromatic => "Variations of a single hue; unified and calm.",
            HarmonyType::Achromatic => "Little to no saturation; the image reads through value alone.",
            HarmonyType::Complementary => "Opposing hues create maximum contrast and visual tension.",
            HarmonyType::Triadic => "Three evenly spaced hues; vibrant while staying balanced.",
            HarmonyType::SplitComplementary => {
                "A base hue against the two neighbours of its complement; contrast with less strain."
            }
            HarmonyType::Analogous => "Neighbouring hues flow into each other for a cohesive mood.",
            HarmonyType::Tetradic => "Two complementary pairs; rich but demanding to balance.",
            HarmonyType::Complex => "No single classical relationship; an eclectic, custom palette.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarmonyResult {
    pub harmony_type: HarmonyType,
    pub score: u8,
    pub description: String,
    pub colors: Vec<HslColor>,
}

impl HarmonyResult {
    pub fn new(harmony_type: HarmonyType, colors: Vec<HslColor>) -> Self {
        Self {
            harmony_type,
            score: harmony_type.score(),
            description: harmony_type.description().to_string(),
            colors,
        }
    }
}
