//! Traditional auspiciousness of a panchang element.

use serde::{Deserialize, Serialize};

/// Conventional muhurta quality of a tithi, nakshatra, yoga, karana or vaar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    Auspicious,
    Neutral,
    Inauspicious,
}

impl Quality {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Auspicious => "auspicious",
            Self::Neutral => "neutral",
            Self::Inauspicious => "inauspicious",
        }
    }
}
