//! Competency rating scale.

use serde::{Deserialize, Serialize};

/// Skill rating. Wire format: `u8` (1 = Basic, 2 = Intermediate, 3 = Advanced).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Rating {
    #[default]
    Basic = 1,
    Intermediate = 2,
    Advanced = 3,
}

impl Rating {
    /// Convert from `u8` wire value. Returns `None` for unknown values.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            1 => Some(Self::Basic),
            2 => Some(Self::Intermediate),
            3 => Some(Self::Advanced),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

impl TryFrom<u8> for Rating {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        Self::from_u8(v).ok_or_else(|| format!("rating must be 1, 2 or 3 (got {v})"))
    }
}

impl From<Rating> for u8 {
    fn from(r: Rating) -> Self {
        r.as_u8()
    }
}
