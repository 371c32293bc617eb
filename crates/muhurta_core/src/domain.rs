//! Decision domains. Each domain is a parameterization of the same engine.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Marriage,
    Career,
    Finance,
    Charity,
    Fasting,
}

pub const ALL_DOMAINS: [Domain; 5] = [
    Domain::Marriage,
    Domain::Career,
    Domain::Finance,
    Domain::Charity,
    Domain::Fasting,
];

impl Domain {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Marriage => "marriage",
            Self::Career => "career",
            Self::Finance => "finance",
            Self::Charity => "charity",
            Self::Fasting => "fasting",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        ALL_DOMAINS
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown domain {s:?}"))
    }
}
