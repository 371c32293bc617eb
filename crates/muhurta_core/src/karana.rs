//! Karana (half-tithi) classification.
//!
//! 60 karanas per synodic month, 6 deg of elongation each. The first half
//! of Shukla Pratipada is Kimstughna, the next 56 cycle through the 7
//! movable karanas, and the last three are Shakuni, Chatushpada and Naga.

use serde::{Deserialize, Serialize};

use crate::quality::Quality;
use crate::util::normalize_360;

/// Span of one karana in degrees of elongation.
pub const KARANA_SEGMENT_DEG: f64 = 6.0;

/// The 11 karana names (7 movable + 4 fixed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Karana {
    Bava,
    Balava,
    Kaulava,
    Taitila,
    Garaja,
    Vanija,
    Vishti,
    Shakuni,
    Chatushpada,
    Naga,
    Kimstughna,
}

/// All 11 karanas (movable first).
pub const ALL_KARANAS: [Karana; 11] = [
    Karana::Bava,
    Karana::Balava,
    Karana::Kaulava,
    Karana::Taitila,
    Karana::Garaja,
    Karana::Vanija,
    Karana::Vishti,
    Karana::Shakuni,
    Karana::Chatushpada,
    Karana::Naga,
    Karana::Kimstughna,
];

impl Karana {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bava => "Bava",
            Self::Balava => "Balava",
            Self::Kaulava => "Kaulava",
            Self::Taitila => "Taitila",
            Self::Garaja => "Garaja",
            Self::Vanija => "Vanija",
            Self::Vishti => "Vishti",
            Self::Shakuni => "Shakuni",
            Self::Chatushpada => "Chatushpada",
            Self::Naga => "Naga",
            Self::Kimstughna => "Kimstughna",
        }
    }

    /// Whether this is one of the four fixed karanas.
    pub const fn is_fixed(self) -> bool {
        matches!(
            self,
            Self::Shakuni | Self::Chatushpada | Self::Naga | Self::Kimstughna
        )
    }

    /// Vishti (Bhadra) is inauspicious, the fixed karanas neutral, the rest auspicious.
    pub const fn quality(self) -> Quality {
        match self {
            Self::Vishti => Quality::Inauspicious,
            k if k.is_fixed() => Quality::Neutral,
            _ => Quality::Auspicious,
        }
    }
}

/// Karana lookup result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KaranaPosition {
    pub karana: Karana,
    /// 0-based sequence index within the synodic month (0..59).
    pub karana_index: u8,
}

/// Determine the karana from Moon-Sun elongation in degrees.
pub fn karana_from_elongation(elongation_deg: f64) -> KaranaPosition {
    let elong = normalize_360(elongation_deg);
    let idx = ((elong / KARANA_SEGMENT_DEG).floor() as u8).min(59);
    let karana = match idx {
        0 => Karana::Kimstughna,
        57 => Karana::Shakuni,
        58 => Karana::Chatushpada,
        59 => Karana::Naga,
        n => ALL_KARANAS[((n - 1) % 7) as usize],
    };
    KaranaPosition {
        karana,
        karana_index: idx,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_boundaries() {
        assert_eq!(karana_from_elongation(0.0).karana, Karana::Kimstughna);
        assert_eq!(karana_from_elongation(6.0).karana, Karana::Bava);
        assert_eq!(karana_from_elongation(42.0).karana, Karana::Vishti);
        assert_eq!(karana_from_elongation(48.0).karana, Karana::Bava);
        assert_eq!(karana_from_elongation(342.0).karana, Karana::Shakuni);
        assert_eq!(karana_from_elongation(354.5).karana, Karana::Naga);
    }

    #[test]
    fn vishti_is_inauspicious() {
        assert_eq!(Karana::Vishti.quality(), Quality::Inauspicious);
        assert_eq!(Karana::Naga.quality(), Quality::Neutral);
        assert_eq!(Karana::Bava.quality(), Quality::Auspicious);
    }
}
