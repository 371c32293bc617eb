//! Types returned by a timing analysis.

use chrono::NaiveDate;
use muhurta_core::{Domain, Rating, ScoreBreakdown};
use serde::Serialize;

use crate::compose::Counseling;
use crate::error::ProviderError;
use crate::window_types::{OptimalDate, SearchCoverage, Window};

/// Score and rating on the reference date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentTiming {
    pub date: NaiveDate,
    pub score: f64,
    pub rating: Rating,
    pub breakdown: ScoreBreakdown,
}

/// Outcome of scoring the reference date.
///
/// A provider outage on the reference date leaves the rest of the analysis
/// intact; only a failure of every search sample fails `analyze`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CurrentStatus {
    Scored(CurrentTiming),
    Unavailable {
        date: NaiveDate,
        reason: ProviderError,
    },
}

impl CurrentStatus {
    pub fn scored(&self) -> Option<&CurrentTiming> {
        match self {
            Self::Scored(t) => Some(t),
            Self::Unavailable { .. } => None,
        }
    }
}

/// Full result of [`crate::TimingEngine::analyze`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimingAnalysis {
    pub domain: Domain,
    pub reference_date: NaiveDate,
    /// `name@vN` of the catalog used.
    pub catalog: String,
    pub current_timing: CurrentStatus,
    pub future_windows: Vec<Window>,
    pub challenging_periods: Vec<Window>,
    pub optimal_dates: Vec<OptimalDate>,
    pub counseling: Counseling,
    pub coverage: SearchCoverage,
}
