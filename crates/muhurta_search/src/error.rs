//! Error types for providers, window search and timing analysis.

use chrono::NaiveDate;
use muhurta_core::CoreError;
use serde::Serialize;

/// Transient failure of a position provider for one date.
///
/// The window search absorbs these per sample; they never abort a search
/// unless every sample fails.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ProviderError {
    #[error("positions unavailable for {date}: {reason}")]
    Unavailable { date: NaiveDate, reason: String },

    #[error("{date} is outside the provider's supported range")]
    OutOfRange { date: NaiveDate },

    #[error("provider error: {0}")]
    Other(String),
}

/// Window search failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum SearchError {
    #[error("invalid search configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("all {samples} samples from {start} to {end} failed")]
    AllSamplesFailed {
        start: NaiveDate,
        end: NaiveDate,
        samples: usize,
    },

    #[error(transparent)]
    Contract(#[from] CoreError),
}

/// Failure of a full timing analysis.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum AnalysisError {
    /// The natal chart or a provider signal violates an input contract.
    #[error(transparent)]
    Contract(#[from] CoreError),

    /// A single date could not be evaluated by [`crate::TimingEngine::score_date`].
    #[error("current timing for {date} unavailable: {source}")]
    CurrentTiming {
        date: NaiveDate,
        #[source]
        source: ProviderError,
    },

    #[error(transparent)]
    WindowSearch(#[from] SearchError),
}

/// Failure to evaluate a single date.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SampleError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Contract(#[from] CoreError),
}
