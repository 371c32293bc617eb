//! Factor model: what a position provider reports and what a score is made of.
//!
//! A provider reports [`FactorSignal`]s (identity, presence, strength). The
//! aggregator resolves each signal against a catalog into a [`Factor`], which
//! adds the catalog weight, the scoring category and the contribution.

use serde::{Deserialize, Serialize};

use crate::aspect::Aspect;
use crate::error::CoreError;
use crate::graha::Graha;
use crate::karana::Karana;
use crate::nakshatra::Nakshatra;
use crate::tithi::Tithi;
use crate::util::is_unit_interval;
use crate::vaar::Vaar;
use crate::yoga::Yoga;

/// Family a factor belongs to. Catalog categories are defined over kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FactorKind {
    Transit,
    Progression,
    PlanetaryPair,
    Tithi,
    Nakshatra,
    Yoga,
    Karana,
    Vaar,
}

pub const ALL_FACTOR_KINDS: [FactorKind; 8] = [
    FactorKind::Transit,
    FactorKind::Progression,
    FactorKind::PlanetaryPair,
    FactorKind::Tithi,
    FactorKind::Nakshatra,
    FactorKind::Yoga,
    FactorKind::Karana,
    FactorKind::Vaar,
];

impl FactorKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Transit => "transit",
            Self::Progression => "progression",
            Self::PlanetaryPair => "planetary_pair",
            Self::Tithi => "tithi",
            Self::Nakshatra => "nakshatra",
            Self::Yoga => "yoga",
            Self::Karana => "karana",
            Self::Vaar => "vaar",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        ALL_FACTOR_KINDS
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for FactorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// How a transiting or progressed body touches the natal chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Contact {
    /// Aspect to a natal graha.
    Aspect { aspect: Aspect, natal: Graha },
    /// Occupation of a whole-sign house (1..=12).
    House(u8),
}

/// Typed factor identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FactorKey {
    Transit { body: Graha, contact: Contact },
    Progression { body: Graha, contact: Contact },
    /// Unordered pair; build with [`FactorKey::pair`].
    PlanetaryPair { first: Graha, second: Graha },
    Tithi(Tithi),
    Nakshatra(Nakshatra),
    Yoga(Yoga),
    Karana(Karana),
    Vaar(Vaar),
}

impl FactorKey {
    /// Planetary pair with a canonical (index) ordering.
    pub fn pair(a: Graha, b: Graha) -> Self {
        let (first, second) = if a.index() <= b.index() { (a, b) } else { (b, a) };
        Self::PlanetaryPair { first, second }
    }

    pub const fn kind(&self) -> FactorKind {
        match self {
            Self::Transit { .. } => FactorKind::Transit,
            Self::Progression { .. } => FactorKind::Progression,
            Self::PlanetaryPair { .. } => FactorKind::PlanetaryPair,
            Self::Tithi(_) => FactorKind::Tithi,
            Self::Nakshatra(_) => FactorKind::Nakshatra,
            Self::Yoga(_) => FactorKind::Yoga,
            Self::Karana(_) => FactorKind::Karana,
            Self::Vaar(_) => FactorKind::Vaar,
        }
    }

    /// Stable identity string, also the key for catalog overrides.
    ///
    /// `"Guru in house 10"`, `"Shani trine natal Surya"`,
    /// `"progressed Chandra in house 7"`, `"Guru-Shukra"`, `"Shukla Ekadashi"`.
    pub fn identity(&self) -> String {
        fn contact_text(body: Graha, contact: &Contact) -> String {
            match contact {
                Contact::Aspect { aspect, natal } => format!("{body} {aspect} natal {natal}"),
                Contact::House(h) => format!("{body} in house {h}"),
            }
        }
        match self {
            Self::Transit { body, contact } => contact_text(*body, contact),
            Self::Progression { body, contact } => {
                format!("progressed {}", contact_text(*body, contact))
            }
            Self::PlanetaryPair { first, second } => format!("{first}-{second}"),
            Self::Tithi(t) => t.name().to_string(),
            Self::Nakshatra(n) => n.name().to_string(),
            Self::Yoga(y) => y.name().to_string(),
            Self::Karana(k) => k.name().to_string(),
            Self::Vaar(v) => v.name().to_string(),
        }
    }
}

impl std::fmt::Display for FactorKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.identity())
    }
}

/// A factor as reported for one date: present or absent, with strength.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorSignal {
    key: FactorKey,
    present: bool,
    strength: f64,
}

impl FactorSignal {
    /// A present factor. Strength must be a finite value in [0, 1].
    pub fn present(key: FactorKey, strength: f64) -> Result<Self, CoreError> {
        if !is_unit_interval(strength) {
            return Err(CoreError::StrengthOutOfRange {
                identity: key.identity(),
                strength,
            });
        }
        Ok(Self {
            key,
            present: true,
            strength,
        })
    }

    /// An absent factor (strength 0).
    pub fn absent(key: FactorKey) -> Self {
        Self {
            key,
            present: false,
            strength: 0.0,
        }
    }

    pub fn key(&self) -> &FactorKey {
        &self.key
    }

    pub fn kind(&self) -> FactorKind {
        self.key.kind()
    }

    pub fn is_present(&self) -> bool {
        self.present
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }

    /// Re-check the strength contract, for signals that did not come
    /// through [`FactorSignal::present`] (e.g. deserialized input).
    pub fn validate(&self) -> Result<(), CoreError> {
        if is_unit_interval(self.strength) {
            Ok(())
        } else {
            Err(CoreError::StrengthOutOfRange {
                identity: self.key.identity(),
                strength: self.strength,
            })
        }
    }
}

/// A factor resolved against a catalog, as listed in a score breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Factor {
    pub kind: FactorKind,
    pub identity: String,
    /// Catalog weight in [0, 1].
    pub weight: f64,
    pub present: bool,
    /// Strength in [0, 1].
    pub strength: f64,
    /// Scoring category, or `None` when the catalog does not score this kind.
    pub category: Option<String>,
    /// Points this factor added to the normalized score.
    pub contribution: f64,
}
