//! Angular aspects between two longitudes.
//!
//! Six conventional aspects, ordered by ease. The default weights decrease
//! strictly with ease: conjunction 1.0, trine 0.8, sextile 0.6, square 0.4,
//! opposition 0.3, quincunx 0.2.

use serde::{Deserialize, Serialize};

use crate::util::angular_separation;

/// A conventional aspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Aspect {
    Conjunction,
    Trine,
    Sextile,
    Square,
    Opposition,
    Quincunx,
}

/// All aspects in order of decreasing ease.
pub const ALL_ASPECTS: [Aspect; 6] = [
    Aspect::Conjunction,
    Aspect::Trine,
    Aspect::Sextile,
    Aspect::Square,
    Aspect::Opposition,
    Aspect::Quincunx,
];

impl Aspect {
    /// Lowercase name, as used in factor identities and catalog files.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Conjunction => "conjunction",
            Self::Trine => "trine",
            Self::Sextile => "sextile",
            Self::Square => "square",
            Self::Opposition => "opposition",
            Self::Quincunx => "quincunx",
        }
    }

    /// Exact separation of the aspect in degrees.
    pub const fn angle_deg(self) -> f64 {
        match self {
            Self::Conjunction => 0.0,
            Self::Sextile => 60.0,
            Self::Square => 90.0,
            Self::Trine => 120.0,
            Self::Quincunx => 150.0,
            Self::Opposition => 180.0,
        }
    }

    /// Default ease weight.
    pub const fn default_weight(self) -> f64 {
        match self {
            Self::Conjunction => 1.0,
            Self::Trine => 0.8,
            Self::Sextile => 0.6,
            Self::Square => 0.4,
            Self::Opposition => 0.3,
            Self::Quincunx => 0.2,
        }
    }

    /// Parse from the lowercase name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        ALL_ASPECTS
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for Aspect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Nearest aspect found within an orb.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectMatch {
    pub aspect: Aspect,
    /// Absolute deviation from the exact aspect angle, degrees.
    pub deviation_deg: f64,
    /// 1.0 when exact, falling linearly to 0.0 at the orb edge.
    pub exactness: f64,
}

/// Find the aspect formed by two longitudes, if any lies within `orb_deg`.
///
/// The closest aspect angle wins. A non-positive orb only admits exact aspects.
pub fn aspect_between(lon_a_deg: f64, lon_b_deg: f64, orb_deg: f64) -> Option<AspectMatch> {
    let sep = angular_separation(lon_a_deg, lon_b_deg);
    let (aspect, deviation) = ALL_ASPECTS
        .into_iter()
        .map(|a| (a, (sep - a.angle_deg()).abs()))
        .min_by(|x, y| x.1.total_cmp(&y.1))?;

    if orb_deg <= 0.0 {
        return (deviation == 0.0).then_some(AspectMatch {
            aspect,
            deviation_deg: 0.0,
            exactness: 1.0,
        });
    }
    if deviation > orb_deg {
        return None;
    }
    Some(AspectMatch {
        aspect,
        deviation_deg: deviation,
        exactness: (1.0 - deviation / orb_deg).clamp(0.0, 1.0),
    })
}
