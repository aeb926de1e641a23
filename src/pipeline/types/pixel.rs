use image::Rgba;
use serde::{Deserialize, Serialize};

/// A single decoded pixel. Alpha only decides inclusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_opaque(&self, alpha_threshold: u8) -> bool {
        self.a >= alpha_threshold
    }

    pub fn rgb(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<Rgba<u8>> for Pixel {
    fn from(px: Rgba<u8>) -> Self {
        let [r, g, b, a] = px.0;
        Self { r, g, b, a }
    }
}

/// Opaque RGB triples taken from one downsampled image, without coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledPixelSet {
    pixels: Vec<[u8; 3]>,
    width: u32,
    height: u32,
}

impl SampledPixelSet {
    pub fn new(pixels: Vec<[u8; 3]>, width: u32, height: u32) -> Self {
        Self {
            pixels,
            width,
            height,
        }
    }

    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.pixels
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Dimensions of the working image the samples were taken from
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl From<Vec<[u8; 3]>> for SampledPixelSet {
    fn from(pixels: Vec<[u8; 3]>) -> Self {
        let width = pixels.len() as u32;
        Self::new(pixels, width, 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionedPixel {
    pub x: u32,
    pub y: u32,
    pub rgb: [u8; 3],
}

/// Opaque pixels with their coordinates in the working image, used by the
/// weight analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedPixelSet {
    pixels: Vec<PositionedPixel>,
    width: u32,
    height: u32,
}

impl PositionedPixelSet {
    pub fn new(pixels: Vec<PositionedPixel>, width: u32, height: u32) -> Self {
        Self {
            pixels,
            width,
            height,
        }
    }

    pub fn pixels(&self) -> &[PositionedPixel] {
        &self.pixels
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}
