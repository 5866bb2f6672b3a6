use serde::{Deserialize, Serialize};

/// Cost-oriented framing for generated content, selected by the integer
/// budget level on the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetTier {
    BudgetFriendly,
    MidRange,
    Luxury,
    Any,
}

impl BudgetTier {
    /// Total mapping: 1, 2 and 3 select the named tiers, anything else
    /// falls back to `Any`.
    pub fn from_level(level: i64) -> Self {
        match level {
            1 => Self::BudgetFriendly,
            2 => Self::MidRange,
            3 => Self::Luxury,
            _ => Self::Any,
        }
    }

    pub fn descriptor(self) -> &'static str {
        match self {
            Self::BudgetFriendly => "Budget-Friendly",
            Self::MidRange => "Mid-Range",
            Self::Luxury => "Luxury",
            Self::Any => "Any Budget",
        }
    }
}
