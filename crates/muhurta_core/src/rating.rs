//! Rating bands and score classification.
//!
//! A [`RatingTable`] is an ordered set of inclusive lower bounds that
//! partitions [0, 100]: the lowest band starts at 0, the highest runs to 100
//! inclusive, and a score on a boundary belongs to the higher band.

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CoreError};

/// Human-facing rating, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Difficult,
    Challenging,
    Moderate,
    Good,
    VeryGood,
    Excellent,
}

pub const ALL_RATINGS: [Rating; 6] = [
    Rating::Difficult,
    Rating::Challenging,
    Rating::Moderate,
    Rating::Good,
    Rating::VeryGood,
    Rating::Excellent,
];

impl Rating {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Difficult => "Difficult",
            Self::Challenging => "Challenging",
            Self::Moderate => "Moderate",
            Self::Good => "Good",
            Self::VeryGood => "Very Good",
            Self::Excellent => "Excellent",
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One band: every score >= `lower` and below the next band's bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingBand {
    pub rating: Rating,
    pub lower: f64,
}

/// Validated threshold table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingTable {
    /// Ascending by `lower` and by `rating`.
    bands: Vec<RatingBand>,
}

impl RatingTable {
    /// Validate and sort a set of bands.
    pub fn new(mut bands: Vec<RatingBand>) -> Result<Self, CatalogError> {
        if bands.is_empty() {
            return Err(CatalogError::InvalidRatingTable("no bands"));
        }
        if bands
            .iter()
            .any(|b| !b.lower.is_finite() || !(0.0..=100.0).contains(&b.lower))
        {
            return Err(CatalogError::InvalidRatingTable("band lower bounds must lie in [0, 100]"));
        }
        bands.sort_by(|a, b| a.lower.total_cmp(&b.lower));
        if bands[0].lower != 0.0 {
            return Err(CatalogError::InvalidRatingTable("lowest band must start at 0"));
        }
        for pair in bands.windows(2) {
            if pair[0].lower == pair[1].lower {
                return Err(CatalogError::InvalidRatingTable("two bands share a lower bound"));
            }
            if pair[0].rating >= pair[1].rating {
                return Err(CatalogError::InvalidRatingTable(
                    "ratings must increase with their lower bounds",
                ));
            }
        }
        Ok(Self { bands })
    }

    /// Reference table: Excellent >= 80, Very Good >= 70, Good >= 60,
    /// Moderate >= 50, Challenging >= 40, Difficult >= 0.
    pub fn reference() -> Self {
        Self {
            bands: vec![
                RatingBand {
                    rating: Rating::Difficult,
                    lower: 0.0,
                },
                RatingBand {
                    rating: Rating::Challenging,
                    lower: 40.0,
                },
                RatingBand {
                    rating: Rating::Moderate,
                    lower: 50.0,
                },
                RatingBand {
                    rating: Rating::Good,
                    lower: 60.0,
                },
                RatingBand {
                    rating: Rating::VeryGood,
                    lower: 70.0,
                },
                RatingBand {
                    rating: Rating::Excellent,
                    lower: 80.0,
                },
            ],
        }
    }

    /// Classify a normalized score. Scores outside [0, 100] are rejected.
    pub fn classify(&self, score: f64) -> Result<Rating, CoreError> {
        if !score.is_finite() || !(0.0..=100.0).contains(&score) {
            return Err(CoreError::ScoreOutOfRange(score));
        }
        let band = self
            .bands
            .iter()
            .rev()
            .find(|b| score >= b.lower)
            .unwrap_or(&self.bands[0]);
        Ok(band.rating)
    }

    pub fn lowest(&self) -> Rating {
        self.bands[0].rating
    }

    pub fn highest(&self) -> Rating {
        self.bands[self.bands.len() - 1].rating
    }

    /// Lower bound of a rating's band, if the table has that rating.
    pub fn lower_bound(&self, rating: Rating) -> Option<f64> {
        self.bands.iter().find(|b| b.rating == rating).map(|b| b.lower)
    }

    pub fn bands(&self) -> &[RatingBand] {
        &self.bands
    }
}

impl Default for RatingTable {
    fn default() -> Self {
        Self::reference()
    }
}
