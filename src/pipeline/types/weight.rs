use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BalanceType {
    Centered,
    LeftHeavy,
    RightHeavy,
    TopHeavy,
    BottomHeavy,
    OffCenter,
    Balanced,
}

impl BalanceType {
    pub fn label(&self) -> &'static str {
        match self {
            BalanceType::Centered => "Centered",
            BalanceType::LeftHeavy => "Left Heavy",
            BalanceType::RightHeavy => "Right Heavy",
            BalanceType::TopHeavy => "Top Heavy",
            BalanceType::BottomHeavy => "Bottom Heavy",
            BalanceType::OffCenter => "Off-Center",
            BalanceType::Balanced => "Balanced",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BalanceType::Centered => "Visual mass sits at the middle of the frame; formal and stable.",
            BalanceType::LeftHeavy => "Weight gathers on the left; the eye settles there first.",
            BalanceType::RightHeavy => "Weight gathers on the right; the frame leans forward.",
            BalanceType::TopHeavy => "Weight rises to the top; imposing, sometimes oppressive.",
            BalanceType::BottomHeavy => "Weight sinks to the bottom; grounded and heavy.",
            BalanceType::OffCenter => "The center of mass sits far from the middle; dynamic tension.",
            BalanceType::Balanced => "Asymmetric but stable; weights offset each other.",
        }
    }
}

/// Weight share per quadrant in percent, summing to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadrantWeights {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_left: f64,
    pub bottom_right: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightField {
    /// Center of visual mass as (x%, y%) of the frame
    pub centroid: (f64, f64),
    pub quadrants: QuadrantWeights,
    /// Row-major grid of weights normalized by the heaviest cell
    pub heatmap: Vec<Vec<f64>>,
    pub horizontal_balance: f64,
    pub vertical_balance: f64,
    pub balance_score: u8,
    pub balance_type: BalanceType,
}
