//! Natal chart as consumed by timing providers.
//!
//! Chart construction (houses, ascendant) belongs to the ephemeris layer;
//! this type only holds the already-computed sidereal positions and answers
//! whole-sign house questions about them.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::CoreError;
use crate::graha::Graha;
use crate::mean_motion::{days_since_j2000, mean_sidereal_longitude};
use crate::util::normalize_360;

/// Birth chart: birth date, sidereal ascendant and sidereal graha longitudes.
#[derive(Debug, Clone, PartialEq)]
pub struct NatalChart {
    birth_date: NaiveDate,
    ascendant_deg: f64,
    positions: BTreeMap<Graha, f64>,
}

impl NatalChart {
    /// Build a chart. Longitudes must be finite; they are normalized to [0, 360).
    pub fn new(
        birth_date: NaiveDate,
        ascendant_deg: f64,
        positions: BTreeMap<Graha, f64>,
    ) -> Result<Self, CoreError> {
        if !ascendant_deg.is_finite() {
            return Err(CoreError::InvalidLongitude {
                what: "ascendant",
                value: ascendant_deg,
            });
        }
        let mut normalized = BTreeMap::new();
        for (graha, lon) in positions {
            if !lon.is_finite() {
                return Err(CoreError::InvalidLongitude {
                    what: graha.name(),
                    value: lon,
                });
            }
            normalized.insert(graha, normalize_360(lon));
        }
        Ok(Self {
            birth_date,
            ascendant_deg: normalize_360(ascendant_deg),
            positions: normalized,
        })
    }

    /// Chart with every graha at its mean-motion position on the birth date.
    pub fn from_mean_motion(birth_date: NaiveDate, ascendant_deg: f64) -> Result<Self, CoreError> {
        let days = days_since_j2000(birth_date);
        let positions = crate::graha::ALL_GRAHAS
            .into_iter()
            .map(|g| (g, mean_sidereal_longitude(g, days)))
            .collect();
        Self::new(birth_date, ascendant_deg, positions)
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn ascendant_deg(&self) -> f64 {
        self.ascendant_deg
    }

    pub fn longitude(&self, graha: Graha) -> Option<f64> {
        self.positions.get(&graha).copied()
    }

    pub fn positions(&self) -> impl Iterator<Item = (Graha, f64)> + '_ {
        self.positions.iter().map(|(g, lon)| (*g, *lon))
    }

    /// Whole-sign house (1..=12) of a sidereal longitude.
    pub fn house_of_longitude(&self, lon_deg: f64) -> u8 {
        let asc_sign = (self.ascendant_deg / 30.0).floor() as i32;
        let sign = (normalize_360(lon_deg) / 30.0).floor() as i32;
        ((sign - asc_sign).rem_euclid(12) + 1) as u8
    }

    /// Whole-sign house of a natal graha.
    pub fn house_of(&self, graha: Graha) -> Option<u8> {
        self.longitude(graha).map(|lon| self.house_of_longitude(lon))
    }

    /// Fail with the first graha in `required` that the chart lacks.
    pub fn require(&self, required: &[Graha]) -> Result<(), CoreError> {
        match required.iter().find(|g| !self.positions.contains_key(g)) {
            Some(g) => Err(CoreError::MissingGraha(g.name())),
            None => Ok(()),
        }
    }
}

/// On-disk chart description (TOML).
///
/// ```toml
/// birth_date = "1990-05-14"
/// ascendant = 112.5
///
/// [positions]
/// Surya = 29.4
/// Moon = 201.0
/// ```
///
/// Omitting `[positions]` fills every graha from mean motion.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartSpec {
    pub birth_date: NaiveDate,
    pub ascendant: f64,
    #[serde(default)]
    pub positions: BTreeMap<String, f64>,
}

impl ChartSpec {
    pub fn into_chart(self) -> Result<NatalChart, ChartSpecError> {
        if self.positions.is_empty() {
            return Ok(NatalChart::from_mean_motion(self.birth_date, self.ascendant)?);
        }
        let mut positions = BTreeMap::new();
        for (name, lon) in self.positions {
            let graha = Graha::from_name(&name).ok_or(ChartSpecError::UnknownGraha(name))?;
            positions.insert(graha, lon);
        }
        Ok(NatalChart::new(self.birth_date, self.ascendant, positions)?)
    }
}

/// Failure turning a [`ChartSpec`] into a chart.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChartSpecError {
    #[error("unknown graha {0:?}")]
    UnknownGraha(String),
    #[error(transparent)]
    Invalid(#[from] CoreError),
}
