//! Mean-motion longitudes and the panchang they imply.
//!
//! Linear mean longitudes from J2000.0 with a linear Lahiri-style ayanamsha.
//! Good to a few degrees for Sun and Moon and much coarser for the planets,
//! which use heliocentric mean motion. This is a stand-in position source
//! for exercising the engine, not an ephemeris.

use chrono::{Datelike, NaiveDate};

use crate::graha::Graha;
use crate::karana::{KaranaPosition, karana_from_elongation};
use crate::nakshatra::{NakshatraInfo, nakshatra_from_longitude};
use crate::tithi::{TithiPosition, tithi_from_elongation};
use crate::util::normalize_360;
use crate::vaar::{Vaar, vaar_from_weekday};
use crate::yoga::{Yoga, yoga_from_sum};

/// Lahiri ayanamsha at J2000.0, degrees.
pub const AYANAMSHA_J2000_DEG: f64 = 23.853;

/// Mean precession in longitude, degrees per day (50.2788"/yr).
const PRECESSION_DEG_PER_DAY: f64 = 50.2788 / 3600.0 / 365.25;

/// (longitude at J2000.0, rate in degrees/day), tropical.
const fn mean_elements(graha: Graha) -> (f64, f64) {
    match graha {
        Graha::Surya => (280.46646, 0.985_647_36),
        Graha::Chandra => (218.3165, 13.176_396_48),
        Graha::Mangal => (355.433, 0.524_020_68),
        Graha::Buddh => (252.251, 4.092_334_45),
        Graha::Guru => (34.352, 0.083_085_29),
        Graha::Shukra => (181.980, 1.602_130_34),
        Graha::Shani => (50.078, 0.033_444_14),
        Graha::Rahu => (125.045, -0.052_953_77),
        Graha::Ketu => (305.045, -0.052_953_77),
    }
}

/// Days from J2000.0 (2000-01-01 12:00) to local noon of `date`.
pub fn days_since_j2000(date: NaiveDate) -> f64 {
    let epoch = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default();
    (date - epoch).num_days() as f64
}

/// Mean tropical longitude of a graha, degrees [0, 360).
pub fn mean_tropical_longitude(graha: Graha, days: f64) -> f64 {
    let (l0, rate) = mean_elements(graha);
    normalize_360(l0 + rate * days)
}

/// Linear ayanamsha, degrees.
pub fn mean_ayanamsha_deg(days: f64) -> f64 {
    AYANAMSHA_J2000_DEG + PRECESSION_DEG_PER_DAY * days
}

/// Mean sidereal longitude of a graha, degrees [0, 360).
pub fn mean_sidereal_longitude(graha: Graha, days: f64) -> f64 {
    normalize_360(mean_tropical_longitude(graha, days) - mean_ayanamsha_deg(days))
}

/// Moon-Sun elongation, degrees [0, 360). Ayanamsha cancels.
pub fn mean_elongation(days: f64) -> f64 {
    normalize_360(
        mean_tropical_longitude(Graha::Chandra, days) - mean_tropical_longitude(Graha::Surya, days),
    )
}

/// Five-limb panchang at local noon of a civil date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanPanchang {
    pub date: NaiveDate,
    pub tithi: TithiPosition,
    pub nakshatra: NakshatraInfo,
    pub yoga: Yoga,
    pub karana: KaranaPosition,
    pub vaar: Vaar,
}

/// Compute the mean-motion panchang for a date.
pub fn mean_panchang(date: NaiveDate) -> MeanPanchang {
    let days = days_since_j2000(date);
    let elongation = mean_elongation(days);
    let moon_sid = mean_sidereal_longitude(Graha::Chandra, days);
    let sun_sid = mean_sidereal_longitude(Graha::Surya, days);

    MeanPanchang {
        date,
        tithi: tithi_from_elongation(elongation),
        nakshatra: nakshatra_from_longitude(moon_sid),
        yoga: yoga_from_sum(moon_sid + sun_sid),
        karana: karana_from_elongation(elongation),
        vaar: vaar_from_weekday(date.weekday()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tithi::Tithi;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn epoch_is_day_zero() {
        assert_eq!(days_since_j2000(date(2000, 1, 1)), 0.0);
        assert_eq!(days_since_j2000(date(2000, 1, 31)), 30.0);
    }

    #[test]
    fn sun_moves_about_one_degree_per_day() {
        let a = mean_tropical_longitude(Graha::Surya, 100.0);
        let b = mean_tropical_longitude(Graha::Surya, 101.0);
        assert!((normalize_360(b - a) - 0.9856).abs() < 1e-3);
    }

    #[test]
    fn ketu_opposes_rahu() {
        let days = 5000.0;
        let r = mean_tropical_longitude(Graha::Rahu, days);
        let k = mean_tropical_longitude(Graha::Ketu, days);
        assert!((normalize_360(k - r) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn full_moon_2024_04_23_is_near_purnima() {
        // Mean elongation lags/leads the true one by up to ~a day.
        let p = mean_panchang(date(2024, 4, 23));
        let idx = p.tithi.tithi_index as i32;
        assert!((13..=16).contains(&idx), "got {}", p.tithi.tithi.name());
    }

    #[test]
    fn new_moon_2024_04_08_is_near_amavasya() {
        let p = mean_panchang(date(2024, 4, 8));
        let t = p.tithi.tithi;
        assert!(
            matches!(
                t,
                Tithi::KrishnaTrayodashi
                    | Tithi::KrishnaChaturdashi
                    | Tithi::Amavasya
                    | Tithi::ShuklaPratipada
                    | Tithi::ShuklaDwitiya
            ),
            "got {}",
            t.name()
        );
    }

    #[test]
    fn panchang_is_deterministic() {
        let d = date(2026, 10, 17);
        assert_eq!(mean_panchang(d), mean_panchang(d));
    }
}
