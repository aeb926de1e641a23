use serde::{Deserialize, Serialize};

/// Target coverage split for the three most prevalent colors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum RuleVariant {
    /// 60 / 30 / 10
    #[default]
    Classic,
    /// 70 / 20 / 10
    Dramatic,
    /// 50 / 35 / 15
    Balanced,
    Custom([f64; 3]),
}

impl RuleVariant {
    pub fn targets(&self) -> [f64; 3] {
        match self {
            RuleVariant::Classic => [60.0, 30.0, 10.0],
            RuleVariant::Dramatic => [70.0, 20.0, 10.0],
            RuleVariant::Balanced => [50.0, 35.0, 15.0],
            RuleVariant::Custom(targets) => *targets,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwatchRole {
    Dominant,
    Secondary,
    Accent,
}

impl SwatchRole {
    pub const ORDER: [SwatchRole; 3] = [SwatchRole::Dominant, SwatchRole::Secondary, SwatchRole::Accent];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwatchDeviation {
    pub role: SwatchRole,
    pub hex: String,
    pub actual: f64,
    pub target: f64,
    /// actual - target
    pub deviation: f64,
    pub within_tolerance: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Textbook,
    Harmonious,
    Expressive,
    Bold,
    InsufficientColors,
}

impl Verdict {
    pub fn from_score(score: u8) -> Self {
        if score >= 85 {
            Verdict::Textbook
        } else if score >= 70 {
            Verdict::Harmonious
        } else if score >= 50 {
            Verdict::Expressive
        } else {
            Verdict::Bold
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Textbook => "Textbook",
            Verdict::Harmonious => "Harmonious",
            Verdict::Expressive => "Expressive",
            Verdict::Bold => "Bold",
            Verdict::InsufficientColors => "Insufficient colors",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Verdict::Textbook => {
                "The palette follows the target split almost exactly: a clear dominant, a supporting secondary and a restrained accent."
            }
            Verdict::Harmonious => {
                "Close to the target split, with small departures that keep the hierarchy readable."
            }
            Verdict::Expressive => {
                "The proportions drift noticeably from the rule, giving the frame a more personal balance."
            }
            Verdict::Bold => {
                "The palette ignores the rule, trading the classic hierarchy for a stronger statement."
            }
            Verdict::InsufficientColors => {
                "Fewer than three distinct colors were found, so proportions cannot be judged."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionScore {
    pub score: u8,
    pub verdict: Verdict,
    pub total_deviation: f64,
    pub deviations: Vec<SwatchDeviation>,
}

impl CompositionScore {
    pub fn insufficient() -> Self {
        Self {
            score: 0,
            verdict: Verdict::InsufficientColors,
            total_deviation: 0.0,
            deviations: Vec::new(),
        }
    }
}
