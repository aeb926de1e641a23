use serde::{Deserialize, Serialize};

use super::color::{HslColor, to_hex};

/// One dominant color of the image with its share of the retained samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swatch {
    pub rgb: [u8; 3],
    pub hex: String,
    pub percentage: f64,
    pub pixel_count: usize,
}

impl Swatch {
    pub fn new(rgb: [u8; 3], pixel_count: usize, percentage: f64) -> Self {
        Self {
            rgb,
            hex: to_hex(rgb),
            percentage,
            pixel_count,
        }
    }

    pub fn hsl(&self) -> HslColor {
        HslColor::from_rgb(self.rgb)
    }
}
