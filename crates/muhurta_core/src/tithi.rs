//! Tithi (lunar day) classification.
//!
//! A tithi is each 12 deg step of the Moon-Sun elongation, 30 per synodic
//! month: 15 in the waxing (Shukla) paksha ending at Purnima and 15 in the
//! waning (Krishna) paksha ending at Amavasya.

use serde::{Deserialize, Serialize};

use crate::quality::Quality;
use crate::util::normalize_360;

/// Span of one tithi in degrees of elongation.
pub const TITHI_SEGMENT_DEG: f64 = 12.0;

/// Lunar fortnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Paksha {
    Shukla,
    Krishna,
}

/// The 30 tithis of the synodic month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tithi {
    ShuklaPratipada,
    ShuklaDwitiya,
    ShuklaTritiya,
    ShuklaChaturthi,
    ShuklaPanchami,
    ShuklaShashthi,
    ShuklaSaptami,
    ShuklaAshtami,
    ShuklaNavami,
    ShuklaDashami,
    ShuklaEkadashi,
    ShuklaDwadashi,
    ShuklaTrayodashi,
    ShuklaChaturdashi,
    Purnima,
    KrishnaPratipada,
    KrishnaDwitiya,
    KrishnaTritiya,
    KrishnaChaturthi,
    KrishnaPanchami,
    KrishnaShashthi,
    KrishnaSaptami,
    KrishnaAshtami,
    KrishnaNavami,
    KrishnaDashami,
    KrishnaEkadashi,
    KrishnaDwadashi,
    KrishnaTrayodashi,
    KrishnaChaturdashi,
    Amavasya,
}

/// All 30 tithis in order (0 = Shukla Pratipada, 29 = Amavasya).
pub const ALL_TITHIS: [Tithi; 30] = [
    Tithi::ShuklaPratipada,
    Tithi::ShuklaDwitiya,
    Tithi::ShuklaTritiya,
    Tithi::ShuklaChaturthi,
    Tithi::ShuklaPanchami,
    Tithi::ShuklaShashthi,
    Tithi::ShuklaSaptami,
    Tithi::ShuklaAshtami,
    Tithi::ShuklaNavami,
    Tithi::ShuklaDashami,
    Tithi::ShuklaEkadashi,
    Tithi::ShuklaDwadashi,
    Tithi::ShuklaTrayodashi,
    Tithi::ShuklaChaturdashi,
    Tithi::Purnima,
    Tithi::KrishnaPratipada,
    Tithi::KrishnaDwitiya,
    Tithi::KrishnaTritiya,
    Tithi::KrishnaChaturthi,
    Tithi::KrishnaPanchami,
    Tithi::KrishnaShashthi,
    Tithi::KrishnaSaptami,
    Tithi::KrishnaAshtami,
    Tithi::KrishnaNavami,
    Tithi::KrishnaDashami,
    Tithi::KrishnaEkadashi,
    Tithi::KrishnaDwadashi,
    Tithi::KrishnaTrayodashi,
    Tithi::KrishnaChaturdashi,
    Tithi::Amavasya,
];

const TITHI_NAMES: [&str; 30] = [
    "Shukla Pratipada",
    "Shukla Dwitiya",
    "Shukla Tritiya",
    "Shukla Chaturthi",
    "Shukla Panchami",
    "Shukla Shashthi",
    "Shukla Saptami",
    "Shukla Ashtami",
    "Shukla Navami",
    "Shukla Dashami",
    "Shukla Ekadashi",
    "Shukla Dwadashi",
    "Shukla Trayodashi",
    "Shukla Chaturdashi",
    "Purnima",
    "Krishna Pratipada",
    "Krishna Dwitiya",
    "Krishna Tritiya",
    "Krishna Chaturthi",
    "Krishna Panchami",
    "Krishna Shashthi",
    "Krishna Saptami",
    "Krishna Ashtami",
    "Krishna Navami",
    "Krishna Dashami",
    "Krishna Ekadashi",
    "Krishna Dwadashi",
    "Krishna Trayodashi",
    "Krishna Chaturdashi",
    "Amavasya",
];

impl Tithi {
    /// Name of the tithi, e.g. "Shukla Ekadashi", "Purnima".
    pub const fn name(self) -> &'static str {
        TITHI_NAMES[self as usize]
    }

    /// 0-based index (0 = Shukla Pratipada .. 29 = Amavasya).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Paksha the tithi belongs to.
    pub const fn paksha(self) -> Paksha {
        if (self as u8) < 15 {
            Paksha::Shukla
        } else {
            Paksha::Krishna
        }
    }

    /// 1-based number within the paksha (1-15).
    pub const fn tithi_in_paksha(self) -> u8 {
        (self as u8) % 15 + 1
    }

    /// Traditional quality.
    ///
    /// Rikta tithis (4, 9, 14) and Amavasya are inauspicious; Pratipada,
    /// Shashthi, Ashtami and Dwadashi are neutral; the rest, including
    /// Purnima, are auspicious.
    pub const fn quality(self) -> Quality {
        if matches!(self, Self::Amavasya) {
            return Quality::Inauspicious;
        }
        match self.tithi_in_paksha() {
            4 | 9 | 14 => Quality::Inauspicious,
            1 | 6 | 8 | 12 => Quality::Neutral,
            _ => Quality::Auspicious,
        }
    }

    /// Parse from the display name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        ALL_TITHIS
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(name))
    }

    /// All 30 tithis in order.
    pub const fn all() -> &'static [Tithi; 30] {
        &ALL_TITHIS
    }
}

/// Result of a tithi lookup from elongation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TithiPosition {
    pub tithi: Tithi,
    /// 0-based tithi index (0..29).
    pub tithi_index: u8,
    pub paksha: Paksha,
    /// 1-based tithi number within the paksha (1-15).
    pub tithi_in_paksha: u8,
    /// Degrees of elongation elapsed within the tithi [0, 12).
    pub degrees_in_tithi: f64,
}

/// Determine the tithi from Moon-Sun elongation in degrees.
pub fn tithi_from_elongation(elongation_deg: f64) -> TithiPosition {
    let elong = normalize_360(elongation_deg);
    let idx = ((elong / TITHI_SEGMENT_DEG).floor() as u8).min(29);
    let tithi = ALL_TITHIS[idx as usize];
    TithiPosition {
        tithi,
        tithi_index: idx,
        paksha: tithi.paksha(),
        tithi_in_paksha: tithi.tithi_in_paksha(),
        degrees_in_tithi: elong - idx as f64 * TITHI_SEGMENT_DEG,
    }
}
