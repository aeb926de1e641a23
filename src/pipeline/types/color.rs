use palette::{FromColor, Hsl, Srgb};
use serde::{Deserialize, Serialize};

/// Hue in degrees [0, 360), saturation and lightness in percent [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HslColor {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl HslColor {
    pub fn from_rgb(rgb: [u8; 3]) -> Self {
        let srgb: Srgb<f32> = Srgb::new(rgb[0], rgb[1], rgb[2]).into_format();
        let hsl: Hsl = Hsl::from_color(srgb);

        Self {
            hue: f64::from(hsl.hue.into_positive_degrees()).rem_euclid(360.0),
            saturation: (f64::from(hsl.saturation) * 100.0).clamp(0.0, 100.0),
            lightness: (f64::from(hsl.lightness) * 100.0).clamp(0.0, 100.0),
        }
    }
}

/// Shortest arc between two hues, always in [0, 180].
pub fn hue_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    if d > 180.0 { 360.0 - d } else { d }
}

/// Euclidean distance in RGB space.
pub fn rgb_distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    let dr = a[0] - b[0];
    let dg = a[1] - b[1];
    let db = a[2] - b[2];
    (dr * dr + dg * dg + db * db).sqrt()
}

/// Rec. 709 relative luminance in [0, 1].
pub fn relative_luminance(rgb: [u8; 3]) -> f64 {
    (0.2126 * rgb[0] as f64 + 0.7152 * rgb[1] as f64 + 0.0722 * rgb[2] as f64) / 255.0
}

pub fn to_hex(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.5
    }

    #[test]
    fn primaries_convert_to_expected_hues() {
        let red = HslColor::from_rgb([255, 0, 0]);
        let cyan = HslColor::from_rgb([0, 255, 255]);
        let blue = HslColor::from_rgb([0, 0, 255]);

        assert!(close(red.hue, 0.0));
        assert!(close(cyan.hue, 180.0));
        assert!(close(blue.hue, 240.0));
        assert!(close(red.saturation, 100.0));
        assert!(close(red.lightness, 50.0));
    }

    #[test]
    fn greys_have_no_saturation() {
        let grey = HslColor::from_rgb([128, 128, 128]);
        assert!(grey.saturation < 0.01);
        assert!(close(grey.lightness, 50.2));
    }

    #[test]
    fn hue_distance_takes_the_short_way_round() {
        assert_eq!(hue_distance(10.0, 350.0), 20.0);
        assert_eq!(hue_distance(0.0, 180.0), 180.0);
        assert_eq!(hue_distance(90.0, 300.0), 150.0);
    }

    #[test]
    fn luminance_spans_unit_range() {
        assert_eq!(relative_luminance([0, 0, 0]), 0.0);
        assert!((relative_luminance([255, 255, 255]) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn hex_is_lowercase_and_padded() {
        assert_eq!(to_hex([255, 8, 0]), "#ff0800");
    }
}
