use crate::pipeline::types::{
    HarmonyType::{self, *},
    StyleProfile,
    TonalCharacter::{self, *},
};

const fn profile(
    id: &'static str,
    cinematographer: &'static str,
    label: &'static str,
    notable_works: &'static [&'static str],
    saturation_range: (f64, f64),
    harmonies: &'static [HarmonyType],
    tonal_characters: &'static [TonalCharacter],
    hue_ranges: &'static [(f64, f64)],
) -> StyleProfile {
    StyleProfile {
        id,
        cinematographer,
        label,
        notable_works,
        saturation_range,
        harmonies,
        tonal_characters,
        hue_ranges,
    }
}

/// Built-in reference table, in display order.
pub static REFERENCE_PROFILES: [StyleProfile; 8] = [
    profile(
        "deakins",
        "Roger Deakins",
        "Naturalistic silhouettes and motivated light",
        &["Blade Runner 2049", "1917", "Skyfall", "No Country for Old Men"],
        (15.0, 55.0),
        &[Complementary, Analogous, Monochromatic],
        &[LowKey, FullRange, Balanced],
        &[(15.0, 50.0), (180.0, 230.0)],
    ),
    profile(
        "lubezki",
        "Emmanuel Lubezki",
        "Natural light and immersive long takes",
        &["The Revenant", "The Tree of Life", "Children of Men", "Gravity"],
        (10.0, 45.0),
        &[Analogous, Monochromatic, Achromatic],
        &[MiddleKey, Balanced, FullRange],
        &[(60.0, 150.0), (180.0, 240.0)],
    ),
    profile(
        "yeoman",
        "Robert Yeoman",
        "Symmetrical pastel storybook palettes",
        &["The Grand Budapest Hotel", "Moonrise Kingdom", "The French Dispatch"],
        (35.0, 75.0),
        &[Complementary, Triadic, SplitComplementary],
        &[HighKey, MiddleKey, Balanced],
        &[(330.0, 60.0), (160.0, 200.0)],
    ),
    profile(
        "doyle",
        "Christopher Doyle",
        "Saturated neon and handheld romance",
        &["In the Mood for Love", "Chungking Express", "Hero"],
        (55.0, 100.0),
        &[Complementary, Complex, Tetradic],
        &[LowKey, Balanced, Compressed],
        &[(340.0, 30.0), (90.0, 160.0)],
    ),
    profile(
        "storaro",
        "Vittorio Storaro",
        "Symbolic color and operatic warmth",
        &["Apocalypse Now", "The Last Emperor", "The Conformist"],
        (50.0, 95.0),
        &[Complementary, Triadic, Analogous],
        &[LowKey, FullRange],
        &[(0.0, 55.0), (260.0, 300.0)],
    ),
    profile(
        "young",
        "Bradford Young",
        "Underexposed, rich dark skin tones and soft shadows",
        &["Arrival", "Selma", "A Most Violent Year"],
        (5.0, 35.0),
        &[Monochromatic, Analogous, Achromatic],
        &[LowKey, Compressed],
        &[(20.0, 60.0), (190.0, 230.0)],
    ),
    profile(
        "van_hoytema",
        "Hoyte van Hoytema",
        "Large-format realism with cool restraint",
        &["Interstellar", "Dunkirk", "Oppenheimer", "Her"],
        (10.0, 50.0),
        &[Complementary, Analogous, Monochromatic],
        &[FullRange, MiddleKey, Balanced],
        &[(180.0, 240.0), (20.0, 45.0)],
    ),
    profile(
        "khondji",
        "Darius Khondji",
        "Dense, moody textures in sickly greens and ambers",
        &["Se7en", "Delicatessen", "Uncut Gems"],
        (20.0, 60.0),
        &[Analogous, Monochromatic, Complex],
        &[LowKey, Compressed, Balanced],
        &[(40.0, 110.0)],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn profile_table_is_well_formed() {
        let ids: HashSet<&str> = REFERENCE_PROFILES.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), REFERENCE_PROFILES.len());

        for profile in &REFERENCE_PROFILES {
            let (low, high) = profile.saturation_range;
            assert!(low <= high && high <= 100.0, "{}", profile.id);
            assert!(!profile.harmonies.is_empty());
            assert!(!profile.tonal_characters.is_empty());
            assert!(!profile.hue_ranges.is_empty());
        }
    }
}
