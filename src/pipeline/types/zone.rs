use serde::{Deserialize, Serialize};

pub const ZONE_COUNT: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneClass {
    Shadow,
    Midtone,
    Highlight,
}

impl ZoneClass {
    pub fn for_zone(zone: usize) -> Self {
        match zone {
            0..=3 => ZoneClass::Shadow,
            4..=6 => ZoneClass::Midtone,
            _ => ZoneClass::Highlight,
        }
    }
}

/// Static description of one exposure zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ZoneInfo {
    pub index: u8,
    pub numeral: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub class: ZoneClass,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneBucket {
    pub zone: &'static ZoneInfo,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TonalCharacter {
    LowKey,
    HighKey,
    MiddleKey,
    FullRange,
    Compressed,
    Balanced,
}

impl TonalCharacter {
    pub fn label(&self) -> &'static str {
        match self {
            TonalCharacter::LowKey => "Low Key",
            TonalCharacter::HighKey => "High Key",
            TonalCharacter::MiddleKey => "Middle Key",
            TonalCharacter::FullRange => "Full Range",
            TonalCharacter::Compressed => "Compressed",
            TonalCharacter::Balanced => "Balanced",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TonalCharacter::LowKey => "Dominated by shadows; moody, dramatic and mysterious.",
            TonalCharacter::HighKey => "Dominated by highlights; airy, optimistic and open.",
            TonalCharacter::MiddleKey => "Concentrated in the midtones; naturalistic and even.",
            TonalCharacter::FullRange => "Spans deep blacks to bright whites with rich separation.",
            TonalCharacter::Compressed => "A narrow tonal band; flat, faded or atmospheric.",
            TonalCharacter::Balanced => "Tones spread across the scale without a single dominant key.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneReport {
    pub buckets: Vec<ZoneBucket>,
    pub peak_zone: u8,
    pub dynamic_range: u8,
    pub shadow_percentage: f64,
    pub midtone_percentage: f64,
    pub highlight_percentage: f64,
    pub character: TonalCharacter,
    pub description: String,
}
