//! Calendar alignment predicates.
//!
//! A predicate marks dates as "aligned" for a domain. Predicates are pure in
//! the date: the same date always yields the same answer, regardless of
//! when or how often it is asked.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};

use crate::error::CatalogError;
use crate::factor::FactorKey;
use crate::graha::Graha;
use crate::mean_motion::mean_panchang;
use crate::tithi::Tithi;

/// Strategy deciding whether a calendar date is aligned.
pub trait AlignmentPredicate: Send + Sync + std::fmt::Debug {
    fn is_aligned(&self, date: NaiveDate) -> bool;

    /// Human-readable description, used as the significance of alignment dates.
    fn label(&self) -> String;

    /// Factor to add as present (strength 1.0) on aligned dates, if any.
    fn boost(&self) -> Option<FactorKey> {
        None
    }

    /// Aligned dates are calendar observances rather than planetary alignments.
    fn is_observance(&self) -> bool {
        false
    }
}

/// Fixed day-of-month set for a planetary pair.
///
/// The set is closed and versioned: changing the days means a new version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayOfMonthAlignment {
    pair: (Graha, Graha),
    allowed_days: BTreeSet<u32>,
    version: u32,
}

impl DayOfMonthAlignment {
    /// Rejects an empty day set and any day outside 1..=31.
    pub fn new(
        pair: (Graha, Graha),
        allowed_days: impl IntoIterator<Item = u32>,
        version: u32,
    ) -> Result<Self, CatalogError> {
        let allowed_days: BTreeSet<u32> = allowed_days.into_iter().collect();
        if let Some(&day) = allowed_days.iter().find(|d| !(1..=31).contains(*d)) {
            return Err(CatalogError::InvalidAlignmentDay(day));
        }
        if allowed_days.is_empty() {
            return Err(CatalogError::EmptyAlignment);
        }
        Ok(Self {
            pair,
            allowed_days,
            version,
        })
    }

    /// Shukra-Guru alignment on the 15th and 22nd.
    pub fn shukra_guru() -> Self {
        Self {
            pair: (Graha::Shukra, Graha::Guru),
            allowed_days: BTreeSet::from([15, 22]),
            version: 1,
        }
    }

    pub fn allowed_days(&self) -> impl Iterator<Item = u32> + '_ {
        self.allowed_days.iter().copied()
    }

    pub fn version(&self) -> u32 {
        self.version
    }
}

impl AlignmentPredicate for DayOfMonthAlignment {
    fn is_aligned(&self, date: NaiveDate) -> bool {
        self.allowed_days.contains(&date.day())
    }

    fn label(&self) -> String {
        let days: Vec<String> = self.allowed_days.iter().map(u32::to_string).collect();
        format!(
            "{}-{} alignment (v{}, days {})",
            self.pair.0,
            self.pair.1,
            self.version,
            days.join(", ")
        )
    }

    fn boost(&self) -> Option<FactorKey> {
        Some(FactorKey::pair(self.pair.0, self.pair.1))
    }
}

/// Aligned when the mean-motion tithi at local noon is one of a set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeanTithiAlignment {
    tithis: BTreeSet<Tithi>,
    label: String,
}

impl MeanTithiAlignment {
    pub fn new(tithis: impl IntoIterator<Item = Tithi>, label: impl Into<String>) -> Self {
        Self {
            tithis: tithis.into_iter().collect(),
            label: label.into(),
        }
    }

    /// Both Ekadashis.
    pub fn ekadashi() -> Self {
        Self::new([Tithi::ShuklaEkadashi, Tithi::KrishnaEkadashi], "Ekadashi")
    }

    /// Purnima and Amavasya.
    pub fn full_and_new_moon() -> Self {
        Self::new([Tithi::Purnima, Tithi::Amavasya], "Purnima/Amavasya")
    }
}

impl AlignmentPredicate for MeanTithiAlignment {
    fn is_aligned(&self, date: NaiveDate) -> bool {
        self.tithis.contains(&mean_panchang(date).tithi.tithi)
    }

    fn label(&self) -> String {
        format!("{} tithi", self.label)
    }

    fn is_observance(&self) -> bool {
        true
    }
}

/// Null strategy: no date is ever aligned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NeverAligned;

impl AlignmentPredicate for NeverAligned {
    fn is_aligned(&self, _date: NaiveDate) -> bool {
        false
    }

    fn label(&self) -> String {
        "none".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn shukra_guru_days() {
        let a = DayOfMonthAlignment::shukra_guru();
        assert!(a.is_aligned(date(2026, 3, 15)));
        assert!(a.is_aligned(date(2026, 3, 22)));
        assert!(!a.is_aligned(date(2026, 3, 10)));
        assert!(!a.is_aligned(date(2026, 3, 16)));
        assert_eq!(a.boost(), Some(FactorKey::pair(Graha::Guru, Graha::Shukra)));
        assert_eq!(a.label(), "Shukra-Guru alignment (v1, days 15, 22)");
    }

    #[test]
    fn out_of_month_days_rejected() {
        let pair = (Graha::Surya, Graha::Chandra);
        assert_eq!(
            DayOfMonthAlignment::new(pair, [5, 40], 2),
            Err(CatalogError::InvalidAlignmentDay(40))
        );
        assert_eq!(
            DayOfMonthAlignment::new(pair, [0, 5], 2),
            Err(CatalogError::InvalidAlignmentDay(0))
        );
        assert_eq!(
            DayOfMonthAlignment::new(pair, std::iter::empty(), 2),
            Err(CatalogError::EmptyAlignment)
        );
        let a = DayOfMonthAlignment::new(pair, [31, 5, 5], 2).unwrap();
        assert_eq!(a.allowed_days().collect::<Vec<_>>(), vec![5, 31]);
    }

    #[test]
    fn shukra_guru_matches_checked_constructor() {
        let checked = DayOfMonthAlignment::new((Graha::Shukra, Graha::Guru), [22, 15], 1);
        assert_eq!(Ok(DayOfMonthAlignment::shukra_guru()), checked);
    }

    #[test]
    fn full_moon_alignment() {
        // 2024-04-23: mean elongation ~179.5 deg.
        let a = MeanTithiAlignment::full_and_new_moon();
        assert!(a.is_aligned(date(2024, 4, 23)));
        assert!(a.is_aligned(date(2024, 4, 8)));
        assert!(!a.is_aligned(date(2024, 4, 15)));
    }

    #[test]
    fn never_aligned() {
        assert!(!NeverAligned.is_aligned(date(2026, 1, 15)));
        assert!(NeverAligned.boost().is_none());
    }
}
