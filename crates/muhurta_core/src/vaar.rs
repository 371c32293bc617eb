//! Vaar (weekday) and its planetary lord.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::graha::Graha;
use crate::quality::Quality;

/// The 7 Vedic weekdays, Sunday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Vaar {
    Ravivara,
    Somavara,
    Mangalavara,
    Budhavara,
    Guruvara,
    Shukravara,
    Shanivara,
}

pub const ALL_VAARS: [Vaar; 7] = [
    Vaar::Ravivara,
    Vaar::Somavara,
    Vaar::Mangalavara,
    Vaar::Budhavara,
    Vaar::Guruvara,
    Vaar::Shukravara,
    Vaar::Shanivara,
];

impl Vaar {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ravivara => "Ravivara",
            Self::Somavara => "Somavara",
            Self::Mangalavara => "Mangalavara",
            Self::Budhavara => "Budhavara",
            Self::Guruvara => "Guruvara",
            Self::Shukravara => "Shukravara",
            Self::Shanivara => "Shanivara",
        }
    }

    /// Planetary lord of the day.
    pub const fn lord(self) -> Graha {
        match self {
            Self::Ravivara => Graha::Surya,
            Self::Somavara => Graha::Chandra,
            Self::Mangalavara => Graha::Mangal,
            Self::Budhavara => Graha::Buddh,
            Self::Guruvara => Graha::Guru,
            Self::Shukravara => Graha::Shukra,
            Self::Shanivara => Graha::Shani,
        }
    }

    /// Days ruled by natural benefics are auspicious, Sunday neutral,
    /// Tuesday and Saturday inauspicious.
    pub const fn quality(self) -> Quality {
        match self {
            Self::Somavara | Self::Budhavara | Self::Guruvara | Self::Shukravara => {
                Quality::Auspicious
            }
            Self::Ravivara => Quality::Neutral,
            Self::Mangalavara | Self::Shanivara => Quality::Inauspicious,
        }
    }
}

/// Vaar for a civil weekday.
pub fn vaar_from_weekday(weekday: Weekday) -> Vaar {
    ALL_VAARS[weekday.num_days_from_sunday() as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_mapping() {
        assert_eq!(vaar_from_weekday(Weekday::Sun), Vaar::Ravivara);
        assert_eq!(vaar_from_weekday(Weekday::Thu), Vaar::Guruvara);
        assert_eq!(vaar_from_weekday(Weekday::Sat), Vaar::Shanivara);
    }

    #[test]
    fn lords_match_weekday_order() {
        assert_eq!(Vaar::Guruvara.lord(), Graha::Guru);
        assert_eq!(Vaar::Shukravara.lord(), Graha::Shukra);
    }
}
