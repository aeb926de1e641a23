use rand::{
    Rng, SeedableRng,
    distr::{Distribution, weighted::WeightedIndex},
    rngs::StdRng,
};
use tracing::debug;

use super::core::SampleAnalyzer;
use crate::config::QuantizerConfig;
use crate::pipeline::types::{SampledPixelSet, Swatch, rgb_distance};

/// Working cluster center; only lives inside one quantization run.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Centroid {
    rgb: [f64; 3],
    count: usize,
}

fn to_f64(rgb: [u8; 3]) -> [f64; 3] {
    [rgb[0] as f64, rgb[1] as f64, rgb[2] as f64]
}

fn squared_distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    let d = rgb_distance(a, b);
    d * d
}

/// k-means++ color quantizer producing a small ranked list of distinct swatches.
#[derive(Debug, Clone)]
pub struct ColorQuantizer {
    config: QuantizerConfig,
}

impl ColorQuantizer {
    pub fn new(config: QuantizerConfig) -> Self {
        Self { config }
    }

    /// Quantize using the configured seed, or system entropy when unset.
    pub fn quantize(&self, samples: &SampledPixelSet) -> Vec<Swatch> {
        match self.config.seed {
            Some(seed) => self.quantize_with_rng(samples, &mut StdRng::seed_from_u64(seed)),
            None => self.quantize_with_rng(samples, &mut StdRng::from_os_rng()),
        }
    }

    pub fn quantize_with_rng<R: Rng + ?Sized>(
        &self,
        samples: &SampledPixelSet,
        rng: &mut R,
    ) -> Vec<Swatch> {
        let pixels: Vec<[f64; 3]> = samples.pixels().iter().map(|px| to_f64(*px)).collect();
        if pixels.is_empty() {
            return Vec::new();
        }

        let seeds = self.seed_centroids(&pixels, rng);
        let clustered = self.cluster(&pixels, seeds);
        let merged = self.merge_near_duplicates(clustered);
        let selected = self.select_distinct(merged);

        Self::into_swatches(selected)
    }

    /// k-means++ seeding: uniform first pick, then proportional to the
    /// squared distance to the nearest chosen centroid.
    fn seed_centroids<R: Rng + ?Sized>(&self, pixels: &[[f64; 3]], rng: &mut R) -> Vec<Centroid> {
        let mut centroids = Vec::with_capacity(self.config.seed_count);
        let first = pixels[rng.random_range(0..pixels.len())];
        centroids.push(Centroid { rgb: first, count: 0 });

        let mut nearest: Vec<f64> = pixels.iter().map(|px| squared_distance(*px, first)).collect();

        while centroids.len() < self.config.seed_count {
            // Errors once every remaining weight is zero, i.e. all pixels are covered.
            let Ok(dist) = WeightedIndex::new(&nearest) else {
                break;
            };
            let chosen = pixels[dist.sample(rng)];
            centroids.push(Centroid { rgb: chosen, count: 0 });

            for (d, px) in nearest.iter_mut().zip(pixels) {
                *d = d.min(squared_distance(*px, chosen));
            }
        }

        debug!("Seeded {} centroids", centroids.len());
        centroids
    }

    fn nearest_centroid(px: [f64; 3], centroids: &[Centroid]) -> usize {
        let mut best = 0;
        let mut best_distance = f64::MAX;
        for (i, c) in centroids.iter().enumerate() {
            let d = squared_distance(px, c.rgb);
            if d < best_distance {
                best = i;
                best_distance = d;
            }
        }
        best
    }

    /// Lloyd iterations until every centroid moves less than the threshold.
    fn cluster(&self, pixels: &[[f64; 3]], mut centroids: Vec<Centroid>) -> Vec<Centroid> {
        let mut iterations = 0;
        let mut converged = false;

        while iterations < self.config.max_iterations && !converged {
            iterations += 1;
            let mut sums = vec![[0.0f64; 3]; centroids.len()];
            let mut counts = vec![0usize; centroids.len()];

            for px in pixels {
                let i = Self::nearest_centroid(*px, &centroids);
                sums[i][0] += px[0];
                sums[i][1] += px[1];
                sums[i][2] += px[2];
                counts[i] += 1;
            }

            converged = true;
            for ((centroid, sum), count) in centroids.iter_mut().zip(&sums).zip(&counts) {
                centroid.count = *count;
                // An empty cluster keeps its previous position.
                if *count == 0 {
                    continue;
                }
                let n = *count as f64;
                let moved = [sum[0] / n, sum[1] / n, sum[2] / n];
                if rgb_distance(moved, centroid.rgb) >= self.config.convergence_threshold {
                    converged = false;
                }
                centroid.rgb = moved;
            }
        }

        debug!(
            "Clustering finished after {} iterations (converged: {})",
            iterations, converged
        );

        // Final counts must reflect the final positions.
        if !converged {
            for c in centroids.iter_mut() {
                c.count = 0;
            }
            for px in pixels {
                let i = Self::nearest_centroid(*px, &centroids);
                centroids[i].count += 1;
            }
        }
        centroids
    }

    /// Fold centroids closer than the merge threshold, weighting by pixel count.
    fn merge_near_duplicates(&self, centroids: Vec<Centroid>) -> Vec<Centroid> {
        let mut merged: Vec<Centroid> = Vec::with_capacity(centroids.len());

        for centroid in centroids.into_iter().filter(|c| c.count > 0) {
            let target = merged
                .iter_mut()
                .find(|m| rgb_distance(m.rgb, centroid.rgb) < self.config.merge_threshold);

            match target {
                Some(m) => {
                    let total = (m.count + centroid.count) as f64;
                    let (wa, wb) = (m.count as f64 / total, centroid.count as f64 / total);
                    for ch in 0..3 {
                        m.rgb[ch] = m.rgb[ch] * wa + centroid.rgb[ch] * wb;
                    }
                    m.count += centroid.count;
                }
                None => merged.push(centroid),
            }
        }

        merged.sort_by(|a, b| b.count.cmp(&a.count));
        merged
    }

    /// Greedy pick, most prevalent first, skipping colors too close to a kept one.
    fn select_distinct(&self, ranked: Vec<Centroid>) -> Vec<Centroid> {
        let mut selected: Vec<Centroid> = Vec::with_capacity(self.config.target_count);
        for candidate in ranked {
            if selected.len() >= self.config.target_count {
                break;
            }
            let distinct = selected
                .iter()
                .all(|s| rgb_distance(s.rgb, candidate.rgb) >= self.config.min_distinct_distance);
            if distinct {
                selected.push(candidate);
            }
        }
        selected
    }

    /// Percentages are re-derived over the retained clusters only.
    fn into_swatches(selected: Vec<Centroid>) -> Vec<Swatch> {
        let total: usize = selected.iter().map(|c| c.count).sum();
        if total == 0 {
            return Vec::new();
        }

        selected
            .into_iter()
            .map(|c| {
                let rgb = c.rgb.map(|v| v.round().clamp(0.0, 255.0) as u8);
                Swatch::new(rgb, c.count, c.count as f64 / total as f64 * 100.0)
            })
            .collect()
    }
}

impl Default for ColorQuantizer {
    fn default() -> Self {
        Self::new(QuantizerConfig::default())
    }
}

impl SampleAnalyzer for ColorQuantizer {
    type Input = SampledPixelSet;
    type Output = Vec<Swatch>;

    fn analyze(&self, input: &SampledPixelSet) -> Vec<Swatch> {
        self.quantize(input)
    }

    fn name(&self) -> &'static str {
        "ColorQuantizer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples_of(groups: &[([u8; 3], usize)]) -> SampledPixelSet {
        let pixels: Vec<[u8; 3]> = groups
            .iter()
            .flat_map(|(rgb, n)| std::iter::repeat_n(*rgb, *n))
            .collect();
        SampledPixelSet::from(pixels)
    }

    fn seeded(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn empty_sample_yields_no_swatches() {
        let swatches = ColorQuantizer::default()
            .quantize_with_rng(&SampledPixelSet::from(Vec::new()), &mut seeded(1));
        assert!(swatches.is_empty());
    }

    #[test]
    fn single_color_yields_single_full_swatch() {
        let swatches = ColorQuantizer::default()
            .quantize_with_rng(&samples_of(&[([12, 34, 56], 500)]), &mut seeded(1));
        assert_eq!(swatches.len(), 1);
        assert_eq!(swatches[0].rgb, [12, 34, 56]);
        assert_eq!(swatches[0].hex, "#0c2238");
        assert!((swatches[0].percentage - 100.0).abs() < 1e-9);
    }

    #[test]
    fn recovers_distinct_groups_ranked_by_coverage() {
        let samples = samples_of(&[
            ([200, 30, 30], 600),
            ([30, 30, 200], 300),
            ([30, 200, 30], 100),
        ]);
        let swatches = ColorQuantizer::default().quantize_with_rng(&samples, &mut seeded(7));

        assert_eq!(swatches.len(), 3);
        assert_eq!(swatches[0].rgb, [200, 30, 30]);
        assert_eq!(swatches[1].rgb, [30, 30, 200]);
        assert_eq!(swatches[2].rgb, [30, 200, 30]);
        assert!((swatches[0].percentage - 60.0).abs() < 1e-9);
        assert!((swatches[1].percentage - 30.0).abs() < 1e-9);
        assert!((swatches[2].percentage - 10.0).abs() < 1e-9);
    }

    #[test]
    fn near_duplicates_are_merged_by_weighted_average() {
        let quantizer = ColorQuantizer::default();
        let merged = quantizer.merge_near_duplicates(vec![
            Centroid { rgb: [100.0, 100.0, 100.0], count: 30 },
            Centroid { rgb: [110.0, 100.0, 100.0], count: 10 },
            Centroid { rgb: [0.0, 0.0, 0.0], count: 50 },
            Centroid { rgb: [255.0, 0.0, 0.0], count: 0 },
        ]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].count, 50);
        assert_eq!(merged[1].count, 40);
        assert!((merged[1].rgb[0] - 102.5).abs() < 1e-9);
    }

    #[test]
    fn distinctness_filter_excludes_from_denominator() {
        let quantizer = ColorQuantizer::default();
        let selected = quantizer.select_distinct(vec![
            Centroid { rgb: [0.0, 0.0, 0.0], count: 50 },
            Centroid { rgb: [25.0, 0.0, 0.0], count: 30 },
            Centroid { rgb: [255.0, 255.0, 255.0], count: 20 },
        ]);
        let swatches = ColorQuantizer::into_swatches(selected);

        assert_eq!(swatches.len(), 2);
        assert!((swatches[0].percentage - 50.0 / 70.0 * 100.0).abs() < 1e-9);
        let total: f64 = swatches.iter().map(|s| s.percentage).sum();
        assert!((total - 100.0).abs() < 0.01);
    }

    #[test]
    fn caps_output_at_target_count() {
        let groups: Vec<([u8; 3], usize)> = (0..10u8)
            .map(|i| ([i * 25, 255 - i * 25, (i % 2) * 200], 50 + i as usize))
            .collect();
        let swatches = ColorQuantizer::default().quantize_with_rng(&samples_of(&groups), &mut seeded(3));

        assert!(swatches.len() <= 5);
        assert!(swatches.windows(2).all(|w| w[0].pixel_count >= w[1].pixel_count));
        let total: f64 = swatches.iter().map(|s| s.percentage).sum();
        assert!((total - 100.0).abs() < 0.01);
    }

    #[test]
    fn same_seed_gives_same_palette() {
        let pixels: Vec<[u8; 3]> = (0..2000u32)
            .map(|i| [(i * 7 % 256) as u8, (i * 13 % 256) as u8, (i * 29 % 256) as u8])
            .collect();
        let samples = SampledPixelSet::from(pixels);
        let quantizer = ColorQuantizer::default();

        let a = quantizer.quantize_with_rng(&samples, &mut seeded(42));
        let b = quantizer.quantize_with_rng(&samples, &mut seeded(42));
        assert_eq!(a, b);
    }

    #[test]
    fn configured_seed_is_used_by_quantize() {
        let config = QuantizerConfig {
            seed: Some(9),
            ..QuantizerConfig::default()
        };
        let pixels: Vec<[u8; 3]> = (0..900u32)
            .map(|i| [(i % 256) as u8, (i * 3 % 256) as u8, 128])
            .collect();
        let samples = SampledPixelSet::from(pixels);
        let quantizer = ColorQuantizer::new(config);
        assert_eq!(quantizer.quantize(&samples), quantizer.quantize(&samples));
    }
}
