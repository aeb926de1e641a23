use crate::config::CompositionConfig;
use crate::pipeline::types::{CompositionScore, Swatch, SwatchDeviation, SwatchRole, Verdict};

/// Points lost per percentage point of total deviation.
const PENALTY_PER_POINT: f64 = 0.77;

/// Scores the three leading swatches against a target coverage split.
#[derive(Debug, Clone)]
pub struct CompositionScorer {
    tolerance: f64,
}

impl CompositionScorer {
    pub fn new(config: &CompositionConfig) -> Self {
        Self {
            tolerance: config.tolerance,
        }
    }

    /// Scores the three highest-coverage swatches, whatever order they arrive in.
    pub fn score(&self, swatches: &[Swatch], targets: [f64; 3]) -> CompositionScore {
        if swatches.len() < 3 {
            return CompositionScore::insufficient();
        }

        let mut ranked: Vec<&Swatch> = swatches.iter().collect();
        ranked.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));

        let deviations: Vec<SwatchDeviation> = ranked
            .into_iter()
            .zip(targets)
            .zip(SwatchRole::ORDER)
            .map(|((swatch, target), role)| {
                let deviation = swatch.percentage - target;
                SwatchDeviation {
                    role,
                    hex: swatch.hex.clone(),
                    actual: swatch.percentage,
                    target,
                    deviation,
                    within_tolerance: deviation.abs() <= self.tolerance,
                }
            })
            .collect();

        let total_deviation: f64 = deviations.iter().map(|d| d.deviation.abs()).sum();
        let score = (100.0 - total_deviation * PENALTY_PER_POINT)
            .round()
            .clamp(0.0, 100.0) as u8;

        CompositionScore {
            score,
            verdict: Verdict::from_score(score),
            total_deviation,
            deviations,
        }
    }
}

impl Default for CompositionScorer {
    fn default() -> Self {
        Self::new(&CompositionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::types::RuleVariant;

    fn swatches(percentages: &[f64]) -> Vec<Swatch> {
        percentages
            .iter()
            .enumerate()
            .map(|(i, p)| Swatch::new([i as u8 * 50, 0, 0], (*p * 10.0) as usize, *p))
            .collect()
    }

    #[test]
    fn exact_match_is_textbook() {
        let result = CompositionScorer::default().score(&swatches(&[60.0, 30.0, 10.0]), RuleVariant::Classic.targets());

        assert_eq!(result.score, 100);
        assert_eq!(result.verdict, Verdict::Textbook);
        assert_eq!(result.total_deviation, 0.0);
        assert!(result.deviations.iter().all(|d| d.within_tolerance));
        assert_eq!(result.deviations[2].role, SwatchRole::Accent);
    }

    #[test]
    fn even_thirds_are_expressive() {
        // ranked as [34, 33, 33]: |34-60| + |33-30| + |33-10| = 52 -> 100 - 40.04
        let result = CompositionScorer::default().score(&swatches(&[33.0, 33.0, 34.0]), RuleVariant::Classic.targets());

        assert!((result.total_deviation - 52.0).abs() < 1e-9);
        assert_eq!(result.score, 60);
        assert_eq!(result.verdict, Verdict::Expressive);
        assert_eq!(result.deviations[0].actual, 34.0);
        assert_eq!(result.deviations[0].deviation, -26.0);
        assert!(!result.deviations[0].within_tolerance);
        assert!(result.deviations[1].within_tolerance);
    }

    #[test]
    fn fewer_than_three_swatches_is_insufficient() {
        let result = CompositionScorer::default().score(&swatches(&[70.0, 30.0]), RuleVariant::Classic.targets());

        assert_eq!(result.score, 0);
        assert_eq!(result.verdict, Verdict::InsufficientColors);
        assert!(result.deviations.is_empty());
    }

    #[test]
    fn only_top_three_are_scored() {
        let result = CompositionScorer::default()
            .score(&swatches(&[50.0, 30.0, 10.0, 6.0, 4.0]), RuleVariant::Classic.targets());

        assert_eq!(result.deviations.len(), 3);
        assert_eq!(result.score, 92);
        assert_eq!(result.verdict, Verdict::Textbook);
    }

    #[test]
    fn unordered_input_is_ranked_by_coverage() {
        let result = CompositionScorer::default()
            .score(&swatches(&[10.0, 60.0, 30.0]), RuleVariant::Classic.targets());

        assert_eq!(result.score, 100);
        assert_eq!(result.deviations[0].actual, 60.0);
        assert_eq!(result.deviations[0].role, SwatchRole::Dominant);
    }

    #[test]
    fn score_is_clamped_and_monotonic() {
        let scorer = CompositionScorer::default();
        let targets = RuleVariant::Classic.targets();
        let mut previous = 101;
        for shift in 0..=20 {
            let shift = shift as f64;
            let result = scorer.score(&swatches(&[60.0 - shift, 30.0 + shift / 2.0, 10.0 + shift / 2.0]), targets);
            assert!(result.score <= previous);
            previous = result.score;
        }

        // out-of-range input still clamps to the floor
        let extreme = scorer.score(&swatches(&[250.0, 150.0, 100.0]), targets);
        assert_eq!(extreme.score, 0);
        assert_eq!(extreme.verdict, Verdict::Bold);
    }

    #[test]
    fn rule_variant_changes_targets() {
        let result = CompositionScorer::default()
            .score(&swatches(&[70.0, 20.0, 10.0]), RuleVariant::Dramatic.targets());
        assert_eq!(result.score, 100);

        let classic = CompositionScorer::default()
            .score(&swatches(&[70.0, 20.0, 10.0]), RuleVariant::Classic.targets());
        // 20 points off -> 100 - 15.4
        assert_eq!(classic.score, 85);
        assert_eq!(classic.verdict, Verdict::Textbook);
    }
}
