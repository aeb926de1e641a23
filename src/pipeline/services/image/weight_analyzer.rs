use std::cmp::Ordering;

use tracing::debug;

use super::core::SampleAnalyzer;
use crate::config::WeightConfig;
use crate::pipeline::types::{
    BalanceType, HslColor, PositionedPixelSet, QuadrantWeights, WeightField,
};

const LIGHTNESS_FACTOR: f64 = 0.7;
const SATURATION_FACTOR: f64 = 0.3;

/// Share of a pixel lying past the midpoint of `extent`; the middle
/// row or column of an odd extent is split evenly.
fn far_side_share(position: u32, extent: u32) -> f64 {
    match (2 * u64::from(position) + 1).cmp(&u64::from(extent)) {
        Ordering::Less => 0.0,
        Ordering::Equal => 0.5,
        Ordering::Greater => 1.0,
    }
}

/// Locates the center of visual mass and how weight spreads across the frame.
#[derive(Debug, Clone)]
pub struct WeightAnalyzer {
    grid_size: usize,
}

impl WeightAnalyzer {
    pub fn new(config: &WeightConfig) -> Self {
        Self {
            grid_size: config.grid_size.max(1),
        }
    }

    /// Darker and more saturated pixels weigh more.
    pub fn pixel_weight(rgb: [u8; 3]) -> f64 {
        let hsl = HslColor::from_rgb(rgb);
        LIGHTNESS_FACTOR * (1.0 - hsl.lightness / 100.0) + SATURATION_FACTOR * (hsl.saturation / 100.0)
    }

    pub fn analyze_weight(&self, samples: &PositionedPixelSet) -> WeightField {
        let width = samples.width().max(1) as f64;
        let height = samples.height().max(1) as f64;
        let n = self.grid_size;

        let mut total = 0.0;
        let mut sum_x = 0.0;
        let mut sum_y = 0.0;
        // top-left, top-right, bottom-left, bottom-right
        let mut quadrants = [0.0f64; 4];
        let mut grid = vec![vec![0.0f64; n]; n];

        for px in samples.pixels() {
            let w = Self::pixel_weight(px.rgb);
            // Pixel centres keep a uniform frame exactly centred.
            let fx = (px.x as f64 + 0.5) / width;
            let fy = (px.y as f64 + 0.5) / height;

            total += w;
            sum_x += w * fx;
            sum_y += w * fy;

            let right = far_side_share(px.x, samples.width());
            let bottom = far_side_share(px.y, samples.height());
            quadrants[0] += w * (1.0 - right) * (1.0 - bottom);
            quadrants[1] += w * right * (1.0 - bottom);
            quadrants[2] += w * (1.0 - right) * bottom;
            quadrants[3] += w * right * bottom;

            let col = ((fx * n as f64) as usize).min(n - 1);
            let row = ((fy * n as f64) as usize).min(n - 1);
            grid[row][col] += w;
        }

        let centroid = if total > 0.0 {
            (sum_x / total * 100.0, sum_y / total * 100.0)
        } else {
            (50.0, 50.0)
        };

        let share = |v: f64| if total > 0.0 { v / total * 100.0 } else { 25.0 };
        let quadrants = QuadrantWeights {
            top_left: share(quadrants[0]),
            top_right: share(quadrants[1]),
            bottom_left: share(quadrants[2]),
            bottom_right: share(quadrants[3]),
        };

        let max_cell = grid.iter().flatten().copied().fold(0.0, f64::max);
        let heatmap = grid
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|v| if max_cell > 0.0 { v / max_cell } else { 0.0 })
                    .collect()
            })
            .collect();

        let horizontal_balance = quadrants.top_right + quadrants.bottom_right;
        let vertical_balance = quadrants.bottom_left + quadrants.bottom_right;
        let center_deviation = ((centroid.0 - 50.0).powi(2) + (centroid.1 - 50.0).powi(2)).sqrt();
        let balance_type = Self::classify(horizontal_balance, vertical_balance, center_deviation);
        let balance_score = (100.0 - 2.0 * center_deviation).round().clamp(0.0, 100.0) as u8;

        debug!(
            "Weight centroid ({:.1}, {:.1}) balance {:?}",
            centroid.0, centroid.1, balance_type
        );

        WeightField {
            centroid,
            quadrants,
            heatmap,
            horizontal_balance,
            vertical_balance,
            balance_score,
            balance_type,
        }
    }

    fn classify(horizontal: f64, vertical: f64, center_deviation: f64) -> BalanceType {
        let h_dev = (horizontal - 50.0).abs();
        let v_dev = (vertical - 50.0).abs();

        if h_dev < 10.0 && v_dev < 10.0 && center_deviation < 10.0 {
            BalanceType::Centered
        } else if h_dev > 25.0 && v_dev < 15.0 {
            if horizontal > 50.0 {
                BalanceType::RightHeavy
            } else {
                BalanceType::LeftHeavy
            }
        } else if v_dev > 25.0 && h_dev < 15.0 {
            if vertical > 50.0 {
                BalanceType::BottomHeavy
            } else {
                BalanceType::TopHeavy
            }
        } else if center_deviation > 25.0 {
            BalanceType::OffCenter
        } else {
            BalanceType::Balanced
        }
    }
}

impl Default for WeightAnalyzer {
    fn default() -> Self {
        Self::new(&WeightConfig::default())
    }
}

impl SampleAnalyzer for WeightAnalyzer {
    type Input = PositionedPixelSet;
    type Output = WeightField;

    fn analyze(&self, input: &PositionedPixelSet) -> WeightField {
        self.analyze_weight(input)
    }

    fn name(&self) -> &'static str {
        "WeightAnalyzer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::types::PositionedPixel;

    fn field_of(width: u32, height: u32, color: impl Fn(u32, u32) -> [u8; 3]) -> PositionedPixelSet {
        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| PositionedPixel { x, y, rgb: color(x, y) })
            .collect();
        PositionedPixelSet::new(pixels, width, height)
    }

    const BLACK: [u8; 3] = [0, 0, 0];
    const WHITE: [u8; 3] = [255, 255, 255];

    #[test]
    fn weight_favours_dark_and_saturated_pixels() {
        assert!((WeightAnalyzer::pixel_weight(BLACK) - 0.7).abs() < 1e-6);
        assert!(WeightAnalyzer::pixel_weight(WHITE).abs() < 1e-6);
        assert!(WeightAnalyzer::pixel_weight([255, 0, 0]) > WeightAnalyzer::pixel_weight([128, 128, 128]));
    }

    #[test]
    fn empty_sample_is_centered() {
        let field = WeightAnalyzer::default().analyze_weight(&PositionedPixelSet::new(Vec::new(), 0, 0));

        assert_eq!(field.centroid, (50.0, 50.0));
        assert_eq!(field.quadrants.top_left, 25.0);
        assert_eq!(field.horizontal_balance, 50.0);
        assert_eq!(field.balance_score, 100);
        assert_eq!(field.balance_type, BalanceType::Centered);
        assert!(field.heatmap.iter().flatten().all(|v| *v == 0.0));
    }

    #[test]
    fn uniform_frame_is_centered() {
        let field = WeightAnalyzer::default().analyze_weight(&field_of(9, 6, |_, _| [40, 90, 160]));

        assert!((field.centroid.0 - 50.0).abs() < 1e-9);
        assert!((field.centroid.1 - 50.0).abs() < 1e-9);
        assert_eq!(field.balance_type, BalanceType::Centered);
        assert_eq!(field.balance_score, 100);
        assert!(field.heatmap.iter().flatten().all(|v| (*v - 1.0).abs() < 1e-9));
    }

    #[test]
    fn odd_sized_uniform_frame_splits_middle_evenly() {
        for (width, height) in [(3, 3), (5, 3), (7, 4)] {
            let field = WeightAnalyzer::default().analyze_weight(&field_of(width, height, |_, _| BLACK));
            let q = field.quadrants;

            for share in [q.top_left, q.top_right, q.bottom_left, q.bottom_right] {
                assert!((share - 25.0).abs() < 1e-9, "{}x{}: {:?}", width, height, q);
            }
            assert!((field.horizontal_balance - 50.0).abs() < 1e-9);
            assert!((field.vertical_balance - 50.0).abs() < 1e-9);
            assert_eq!(field.balance_type, BalanceType::Centered);
        }
    }

    #[test]
    fn middle_column_of_odd_frame_is_shared() {
        assert_eq!(far_side_share(0, 3), 0.0);
        assert_eq!(far_side_share(1, 3), 0.5);
        assert_eq!(far_side_share(2, 3), 1.0);
        assert_eq!(far_side_share(1, 4), 0.0);
        assert_eq!(far_side_share(2, 4), 1.0);
    }

    #[test]
    fn all_white_frame_has_no_weight_and_defaults_to_center() {
        let field = WeightAnalyzer::default().analyze_weight(&field_of(8, 8, |_, _| WHITE));
        assert_eq!(field.centroid, (50.0, 50.0));
    }

    #[test]
    fn dark_left_half_is_left_heavy() {
        let field = WeightAnalyzer::default()
            .analyze_weight(&field_of(10, 10, |x, _| if x < 5 { BLACK } else { WHITE }));

        assert!(field.centroid.0 < 50.0);
        assert!((field.centroid.1 - 50.0).abs() < 1e-9);
        assert!(field.horizontal_balance < 1e-9);
        assert_eq!(field.balance_type, BalanceType::LeftHeavy);
        assert_eq!(field.heatmap[1][0], 1.0);
        assert_eq!(field.heatmap[1][2], 0.0);
    }

    #[test]
    fn dark_bottom_band_is_bottom_heavy() {
        let field = WeightAnalyzer::default()
            .analyze_weight(&field_of(12, 12, |_, y| if y >= 6 { BLACK } else { WHITE }));

        assert!((field.vertical_balance - 100.0).abs() < 1e-9);
        assert_eq!(field.balance_type, BalanceType::BottomHeavy);
        let quadrant_sum = field.quadrants.top_left
            + field.quadrants.top_right
            + field.quadrants.bottom_left
            + field.quadrants.bottom_right;
        assert!((quadrant_sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn dark_corner_is_off_center() {
        let field = WeightAnalyzer::default()
            .analyze_weight(&field_of(10, 10, |x, y| if x < 3 && y < 3 { BLACK } else { WHITE }));

        assert_eq!(field.balance_type, BalanceType::OffCenter);
        assert!(field.balance_score < 50);
        assert!(field.centroid.0 >= 0.0 && field.centroid.1 >= 0.0);
    }
}
