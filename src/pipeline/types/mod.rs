mod color;
mod composition;
mod harmony;
mod pixel;
mod report;
mod style;
mod swatch;
mod weight;
mod zone;

pub use color::{HslColor, hue_distance, relative_luminance, rgb_distance, to_hex};
pub use composition::{CompositionScore, RuleVariant, SwatchDeviation, SwatchRole, Verdict};
pub use harmony::{HarmonyResult, HarmonyType};
pub use pixel::{Pixel, PositionedPixel, PositionedPixelSet, SampledPixelSet};
pub use report::CompositionReport;
pub use style::{MatchResult, StyleProfile};
pub use swatch::Swatch;
pub use weight::{BalanceType, QuadrantWeights, WeightField};
pub use zone::{TonalCharacter, ZONE_COUNT, ZoneBucket, ZoneClass, ZoneInfo, ZoneReport};
