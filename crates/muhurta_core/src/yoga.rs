//! Luni-solar yoga classification.
//!
//! The sum of the sidereal longitudes of Sun and Moon, divided into 27
//! equal segments of 13 deg 20'.

use serde::{Deserialize, Serialize};

use crate::quality::Quality;
use crate::util::normalize_360;

/// Span of one yoga in degrees of the sidereal sum.
pub const YOGA_SEGMENT_DEG: f64 = 360.0 / 27.0;

/// The 27 yogas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Yoga {
    Vishkambha,
    Priti,
    Ayushman,
    Saubhagya,
    Shobhana,
    Atiganda,
    Sukarma,
    Dhriti,
    Shula,
    Ganda,
    Vriddhi,
    Dhruva,
    Vyaghata,
    Harshana,
    Vajra,
    Siddhi,
    Vyatipata,
    Variyana,
    Parigha,
    Shiva,
    Siddha,
    Sadhya,
    Shubha,
    Shukla,
    Brahma,
    Indra,
    Vaidhriti,
}

/// All 27 yogas in order (0 = Vishkambha, 26 = Vaidhriti).
pub const ALL_YOGAS: [Yoga; 27] = [
    Yoga::Vishkambha,
    Yoga::Priti,
    Yoga::Ayushman,
    Yoga::Saubhagya,
    Yoga::Shobhana,
    Yoga::Atiganda,
    Yoga::Sukarma,
    Yoga::Dhriti,
    Yoga::Shula,
    Yoga::Ganda,
    Yoga::Vriddhi,
    Yoga::Dhruva,
    Yoga::Vyaghata,
    Yoga::Harshana,
    Yoga::Vajra,
    Yoga::Siddhi,
    Yoga::Vyatipata,
    Yoga::Variyana,
    Yoga::Parigha,
    Yoga::Shiva,
    Yoga::Siddha,
    Yoga::Sadhya,
    Yoga::Shubha,
    Yoga::Shukla,
    Yoga::Brahma,
    Yoga::Indra,
    Yoga::Vaidhriti,
];

impl Yoga {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Vishkambha => "Vishkambha",
            Self::Priti => "Priti",
            Self::Ayushman => "Ayushman",
            Self::Saubhagya => "Saubhagya",
            Self::Shobhana => "Shobhana",
            Self::Atiganda => "Atiganda",
            Self::Sukarma => "Sukarma",
            Self::Dhriti => "Dhriti",
            Self::Shula => "Shula",
            Self::Ganda => "Ganda",
            Self::Vriddhi => "Vriddhi",
            Self::Dhruva => "Dhruva",
            Self::Vyaghata => "Vyaghata",
            Self::Harshana => "Harshana",
            Self::Vajra => "Vajra",
            Self::Siddhi => "Siddhi",
            Self::Vyatipata => "Vyatipata",
            Self::Variyana => "Variyana",
            Self::Parigha => "Parigha",
            Self::Shiva => "Shiva",
            Self::Siddha => "Siddha",
            Self::Sadhya => "Sadhya",
            Self::Shubha => "Shubha",
            Self::Shukla => "Shukla",
            Self::Brahma => "Brahma",
            Self::Indra => "Indra",
            Self::Vaidhriti => "Vaidhriti",
        }
    }

    pub const fn index(self) -> u8 {
        self as u8
    }

    /// The nine classically afflicted yogas are inauspicious; all others auspicious.
    pub const fn quality(self) -> Quality {
        match self {
            Self::Vishkambha
            | Self::Atiganda
            | Self::Shula
            | Self::Ganda
            | Self::Vyaghata
            | Self::Vajra
            | Self::Vyatipata
            | Self::Parigha
            | Self::Vaidhriti => Quality::Inauspicious,
            _ => Quality::Auspicious,
        }
    }
}

/// Determine the yoga from the sidereal Sun+Moon longitude sum.
pub fn yoga_from_sum(sidereal_sum_deg: f64) -> Yoga {
    let sum = normalize_360(sidereal_sum_deg);
    let idx = ((sum / YOGA_SEGMENT_DEG).floor() as usize).min(26);
    ALL_YOGAS[idx]
}
