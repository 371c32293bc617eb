//! Types for favorable/challenging window search.

use chrono::NaiveDate;
use muhurta_core::{CoreError, Rating};
use serde::{Deserialize, Serialize};

/// Configuration for a window search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Days after the start date to sample (inclusive).
    pub horizon_days: u32,
    /// Days between samples.
    pub step_days: u32,
    /// Samples scoring at or above this extend a favorable window.
    pub favorable_threshold: f64,
    /// Samples scoring at or below this extend a challenging period.
    pub challenging_threshold: f64,
    pub max_favorable_windows: usize,
    pub max_challenging_windows: usize,
    /// Minimum score for a local maximum to become a peak date.
    pub peak_threshold: f64,
    pub max_optimal_dates: usize,
    /// Evaluate samples on the rayon pool.
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            horizon_days: 90,
            step_days: 1,
            favorable_threshold: 70.0,
            challenging_threshold: 40.0,
            max_favorable_windows: 10,
            max_challenging_windows: 10,
            peak_threshold: 80.0,
            max_optimal_dates: 20,
            parallel: false,
        }
    }
}

impl SearchConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.step_days == 0 {
            return Err("step_days must be > 0");
        }
        let in_range = |v: f64| v.is_finite() && (0.0..=100.0).contains(&v);
        if !in_range(self.favorable_threshold) {
            return Err("favorable_threshold must lie in [0, 100]");
        }
        if !in_range(self.challenging_threshold) {
            return Err("challenging_threshold must lie in [0, 100]");
        }
        if !in_range(self.peak_threshold) {
            return Err("peak_threshold must lie in [0, 100]");
        }
        if self.challenging_threshold >= self.favorable_threshold {
            return Err("challenging_threshold must be below favorable_threshold");
        }
        Ok(())
    }

    /// Number of dates the search samples.
    pub fn sample_count(&self) -> usize {
        match self.step_days {
            0 => 0,
            step => (self.horizon_days / step) as usize + 1,
        }
    }
}

/// One scored sample date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub date: NaiveDate,
    pub score: f64,
    pub rating: Rating,
}

/// A sample the provider could not supply.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedSample {
    pub date: NaiveDate,
    pub reason: String,
}

/// Contiguous run of samples on one side of a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Window {
    start: NaiveDate,
    end: NaiveDate,
    /// Run maximum for favorable windows, run minimum for challenging ones.
    score: f64,
    rating: Rating,
    samples: usize,
}

impl Window {
    pub fn new(
        start: NaiveDate,
        end: NaiveDate,
        score: f64,
        rating: Rating,
        samples: usize,
    ) -> Result<Self, CoreError> {
        if end < start {
            return Err(CoreError::InvertedWindow { start, end });
        }
        Ok(Self {
            start,
            end,
            score,
            rating,
            samples,
        })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    /// Number of samples in the run.
    pub fn samples(&self) -> usize {
        self.samples
    }
}

/// Why a date was recommended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimalDateKind {
    /// Day-of-month planetary alignment.
    AlignmentMatch,
    /// Calendar observance (e.g. Ekadashi).
    Observance,
    /// Local score maximum above the peak threshold.
    PeakScore,
}

impl OptimalDateKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::AlignmentMatch => "alignment_match",
            Self::Observance => "observance",
            Self::PeakScore => "peak_score",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimalDate {
    pub date: NaiveDate,
    pub kind: OptimalDateKind,
    pub significance: String,
    /// Score on the date; `None` when the provider failed for it.
    pub score: Option<f64>,
}

/// What the search actually covered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchCoverage {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub sampled: usize,
    pub scored: usize,
    pub skipped: Vec<SkippedSample>,
}

impl SearchCoverage {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Result of [`crate::WindowSearch::run`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub samples: Vec<Sample>,
    pub favorable_windows: Vec<Window>,
    pub challenging_periods: Vec<Window>,
    pub optimal_dates: Vec<OptimalDate>,
    pub coverage: SearchCoverage,
}
