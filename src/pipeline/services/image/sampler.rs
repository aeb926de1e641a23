use image::{DynamicImage, GenericImageView, RgbaImage, imageops::FilterType};
use tracing::debug;

use crate::config::SamplingConfig;
use crate::error::Result;
use crate::pipeline::types::{Pixel, PositionedPixel, PositionedPixelSet, SampledPixelSet};

/// Turns a decoded image into the bounded pixel samples every analyzer reads.
#[derive(Debug, Clone)]
pub struct PixelSampler {
    alpha_threshold: u8,
}

impl PixelSampler {
    pub fn new(alpha_threshold: u8) -> Self {
        Self { alpha_threshold }
    }

    pub fn from_config(config: &SamplingConfig) -> Self {
        Self::new(config.alpha_threshold)
    }

    /// Decode an encoded image (PNG, JPEG, WEBP...) held in memory.
    pub fn decode(bytes: &[u8]) -> Result<DynamicImage> {
        Ok(image::load_from_memory(bytes)?)
    }

    /// Decode then sample; the only sampling path that can fail.
    pub fn sample_encoded(
        &self,
        bytes: &[u8],
        max_dimension: u32,
        stride: usize,
    ) -> Result<SampledPixelSet> {
        let image = Self::decode(bytes)?;
        Ok(self.sample(&image, max_dimension, stride))
    }

    /// Opaque RGB triples from every `stride`-th pixel of the downscaled image.
    pub fn sample(&self, image: &DynamicImage, max_dimension: u32, stride: usize) -> SampledPixelSet {
        let working = Self::working_image(image, max_dimension);
        let (width, height) = working.dimensions();

        let pixels: Vec<[u8; 3]> = Self::strided(&working, stride)
            .filter(|(_, _, px)| px.is_opaque(self.alpha_threshold))
            .map(|(_, _, px)| px.rgb())
            .collect();

        debug!(
            "Sampled {} opaque pixels from {}x{} working image",
            pixels.len(),
            width,
            height
        );
        SampledPixelSet::new(pixels, width, height)
    }

    /// Same as [`sample`](Self::sample) but keeps each pixel's position.
    pub fn sample_positioned(
        &self,
        image: &DynamicImage,
        max_dimension: u32,
        stride: usize,
    ) -> PositionedPixelSet {
        let working = Self::working_image(image, max_dimension);
        let (width, height) = working.dimensions();

        let pixels: Vec<PositionedPixel> = Self::strided(&working, stride)
            .filter(|(_, _, px)| px.is_opaque(self.alpha_threshold))
            .map(|(x, y, px)| PositionedPixel { x, y, rgb: px.rgb() })
            .collect();

        debug!(
            "Sampled {} positioned pixels from {}x{} working image",
            pixels.len(),
            width,
            height
        );
        PositionedPixelSet::new(pixels, width, height)
    }

    /// Downscale so the longer side equals `max_dimension`; never upscale.
    fn working_image(image: &DynamicImage, max_dimension: u32) -> RgbaImage {
        let (width, height) = image.dimensions();
        if width.max(height) <= max_dimension {
            image.to_rgba8()
        } else {
            image
                .resize(max_dimension, max_dimension, FilterType::Triangle)
                .to_rgba8()
        }
    }

    fn strided(image: &RgbaImage, stride: usize) -> impl Iterator<Item = (u32, u32, Pixel)> + '_ {
        let width = image.width() as usize;
        let total = width * image.height() as usize;

        (0..total).step_by(stride.max(1)).map(move |index| {
            let x = (index % width) as u32;
            let y = (index / width) as u32;
            (x, y, Pixel::from(*image.get_pixel(x, y)))
        })
    }
}

impl Default for PixelSampler {
    fn default() -> Self {
        Self::from_config(&SamplingConfig::default())
    }
}
