//! Reference provider built on mean-motion longitudes.
//!
//! Transits are whole-sign house placements and orb-limited aspects of the
//! mean grahas against the natal chart, plus aspects between transiting
//! grahas. Progressions are secondary (one day after birth per year of
//! life). Calendar factors are the mean-motion panchang at local noon.
//! Positions are approximate; any real ephemeris can replace this behind
//! the same trait.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use muhurta_core::{
    ALL_GRAHAS, Contact, FactorKey, FactorSignal, Graha, NatalChart, aspect_between,
    days_since_j2000, mean_panchang, mean_sidereal_longitude,
};

use crate::error::ProviderError;
use crate::provider::AstronomicalPositionProvider;

/// Transit aspect orb, degrees.
pub const DEFAULT_TRANSIT_ORB_DEG: f64 = 6.0;

/// Progressed aspect orb, degrees.
pub const DEFAULT_PROGRESSION_ORB_DEG: f64 = 1.0;

/// Years the mean elements are trusted for.
const SUPPORTED_YEARS: std::ops::RangeInclusive<i32> = 1800..=2200;

const PROGRESSED_GRAHAS: [Graha; 3] = [Graha::Surya, Graha::Chandra, Graha::Shukra];

#[derive(Debug, Clone)]
pub struct MeanMotionProvider {
    chart: NatalChart,
    transit_orb_deg: f64,
    progression_orb_deg: f64,
}

impl MeanMotionProvider {
    pub fn new(chart: NatalChart) -> Self {
        Self {
            chart,
            transit_orb_deg: DEFAULT_TRANSIT_ORB_DEG,
            progression_orb_deg: DEFAULT_PROGRESSION_ORB_DEG,
        }
    }

    pub fn with_orbs(mut self, transit_orb_deg: f64, progression_orb_deg: f64) -> Self {
        self.transit_orb_deg = transit_orb_deg;
        self.progression_orb_deg = progression_orb_deg;
        self
    }

    fn check_range(&self, date: NaiveDate) -> Result<(), ProviderError> {
        if SUPPORTED_YEARS.contains(&date.year()) {
            Ok(())
        } else {
            Err(ProviderError::OutOfRange { date })
        }
    }

    /// House and natal-aspect signals for one moving body.
    fn contacts(
        &self,
        body: Graha,
        lon: f64,
        orb: f64,
        key: impl Fn(Contact) -> FactorKey,
    ) -> Result<Vec<FactorSignal>, ProviderError> {
        let mut out = vec![signal(
            key(Contact::House(self.chart.house_of_longitude(lon))),
            1.0,
        )?];
        for (natal, natal_lon) in self.chart.positions() {
            if natal == body {
                continue;
            }
            if let Some(m) = aspect_between(lon, natal_lon, orb) {
                out.push(signal(
                    key(Contact::Aspect {
                        aspect: m.aspect,
                        natal,
                    }),
                    m.exactness,
                )?);
            }
        }
        Ok(out)
    }
}

fn signal(key: FactorKey, strength: f64) -> Result<FactorSignal, ProviderError> {
    FactorSignal::present(key, strength).map_err(|e| ProviderError::Other(e.to_string()))
}

impl AstronomicalPositionProvider for MeanMotionProvider {
    fn transits(&self, date: NaiveDate) -> Result<Vec<FactorSignal>, ProviderError> {
        self.check_range(date)?;
        let days = days_since_j2000(date);
        let lons: Vec<(Graha, f64)> = ALL_GRAHAS
            .into_iter()
            .map(|g| (g, mean_sidereal_longitude(g, days)))
            .collect();

        let mut out = Vec::new();
        for &(body, lon) in &lons {
            out.extend(self.contacts(body, lon, self.transit_orb_deg, |contact| {
                FactorKey::Transit { body, contact }
            })?);
        }
        // Mutual aspects between transiting grahas; the nodes always oppose.
        for (i, &(a, lon_a)) in lons.iter().enumerate() {
            for &(b, lon_b) in &lons[i + 1..] {
                if matches!((a, b), (Graha::Rahu, Graha::Ketu)) {
                    continue;
                }
                if let Some(m) = aspect_between(lon_a, lon_b, self.transit_orb_deg) {
                    out.push(signal(FactorKey::pair(a, b), m.exactness)?);
                }
            }
        }
        Ok(out)
    }

    fn progressions(
        &self,
        date: NaiveDate,
    ) -> Result<BTreeMap<Graha, Vec<FactorSignal>>, ProviderError> {
        self.check_range(date)?;
        let birth = self.chart.birth_date();
        if date < birth {
            return Err(ProviderError::Unavailable {
                date,
                reason: "date precedes birth".to_string(),
            });
        }
        let years = (date - birth).num_days() as f64 / 365.25;
        let days = days_since_j2000(birth) + years;

        let mut out = BTreeMap::new();
        for body in PROGRESSED_GRAHAS {
            let lon = mean_sidereal_longitude(body, days);
            let signals = self.contacts(body, lon, self.progression_orb_deg, |contact| {
                FactorKey::Progression { body, contact }
            })?;
            out.insert(body, signals);
        }
        Ok(out)
    }

    fn calendar(&self, date: NaiveDate) -> Result<Vec<FactorSignal>, ProviderError> {
        self.check_range(date)?;
        let p = mean_panchang(date);
        [
            FactorKey::Tithi(p.tithi.tithi),
            FactorKey::Nakshatra(p.nakshatra.nakshatra),
            FactorKey::Yoga(p.yoga),
            FactorKey::Karana(p.karana.karana),
            FactorKey::Vaar(p.vaar),
        ]
        .into_iter()
        .map(|k| signal(k, 1.0))
        .collect()
    }

    fn natal_chart(&self) -> Option<&NatalChart> {
        Some(&self.chart)
    }
}
