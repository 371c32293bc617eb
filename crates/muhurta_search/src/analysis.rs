//! Timing analysis: current score, future windows, optimal dates, counseling.

use chrono::NaiveDate;
use muhurta_core::{CoreError, FactorSignal, Rating, ScoreBreakdown, aggregate};
use tracing::{info, info_span, warn};

use crate::analysis_types::{CurrentStatus, CurrentTiming, TimingAnalysis};
use crate::compose::CompositionInput;
use crate::error::{AnalysisError, SampleError, SearchError};
use crate::profile::DomainProfile;
use crate::provider::AstronomicalPositionProvider;
use crate::window::WindowSearch;

/// Timing engine for one domain profile.
#[derive(Debug, Clone)]
pub struct TimingEngine {
    profile: DomainProfile,
}

impl TimingEngine {
    /// Build an engine. Fails when the profile's search configuration is invalid.
    pub fn new(profile: DomainProfile) -> Result<Self, SearchError> {
        profile
            .search
            .validate()
            .map_err(SearchError::InvalidConfig)?;
        Ok(Self { profile })
    }

    pub fn profile(&self) -> &DomainProfile {
        &self.profile
    }

    /// Classify a normalized score with the profile's rating table.
    pub fn classify(&self, score: f64) -> Result<Rating, CoreError> {
        self.profile.catalog.ratings().classify(score)
    }

    /// Aggregate signals under the profile's catalog.
    pub fn aggregate(&self, signals: &[FactorSignal]) -> Result<ScoreBreakdown, CoreError> {
        aggregate(signals, &self.profile.catalog)
    }

    fn search(&self) -> Result<WindowSearch<'_>, SearchError> {
        WindowSearch::new(
            &self.profile.catalog,
            self.profile.alignment.as_ref(),
            self.profile.search,
        )
    }

    /// Score a single date, including the alignment boost.
    pub fn score_date<P>(
        &self,
        provider: &P,
        date: NaiveDate,
    ) -> Result<CurrentTiming, AnalysisError>
    where
        P: AstronomicalPositionProvider + ?Sized,
    {
        let breakdown = self
            .search()?
            .evaluate(provider, date)
            .map_err(|e| match e {
                SampleError::Provider(source) => AnalysisError::CurrentTiming { date, source },
                SampleError::Contract(e) => AnalysisError::Contract(e),
            })?;
        let score = breakdown.normalized_score();
        Ok(CurrentTiming {
            date,
            score,
            rating: self.classify(score)?,
            breakdown,
        })
    }

    /// Full analysis from `reference_date` over the profile's horizon.
    ///
    /// Fails on a natal chart missing a required graha, on a contract
    /// violation in the provider's signals, or when every search sample
    /// fails. A provider outage on the reference date is reported in
    /// [`TimingAnalysis::current_timing`]; outages on other dates are
    /// recorded in the coverage.
    pub fn analyze<P>(
        &self,
        provider: &P,
        reference_date: NaiveDate,
    ) -> Result<TimingAnalysis, AnalysisError>
    where
        P: AstronomicalPositionProvider + ?Sized,
    {
        let domain = self.profile.domain;
        let _span = info_span!("analyze", %domain, date = %reference_date).entered();

        if let Some(chart) = provider.natal_chart() {
            chart.require(&self.profile.required_planets)?;
        }

        let current_timing = match self.score_date(provider, reference_date) {
            Ok(timing) => CurrentStatus::Scored(timing),
            Err(AnalysisError::CurrentTiming { date, source }) => {
                warn!(%date, error = %source, "current timing unavailable");
                CurrentStatus::Unavailable {
                    date,
                    reason: source,
                }
            }
            Err(e) => return Err(e),
        };
        let outcome = self.search()?.run(provider, reference_date)?;

        let scored = current_timing.scored();
        let counseling = self.profile.composer.compose(&CompositionInput {
            current: scored.map(|t| (t.rating, t.score)),
            dominant: scored.and_then(|t| t.breakdown.dominant()),
            favorable_windows: &outcome.favorable_windows,
            challenging_periods: &outcome.challenging_periods,
        });

        info!(
            score = scored.map(|t| t.score),
            rating = scored.map(|t| t.rating.label()),
            windows = outcome.favorable_windows.len(),
            optimal_dates = outcome.optimal_dates.len(),
            "analysis complete"
        );

        Ok(TimingAnalysis {
            domain,
            reference_date,
            catalog: self.profile.catalog.label(),
            current_timing,
            future_windows: outcome.favorable_windows,
            challenging_periods: outcome.challenging_periods,
            optimal_dates: outcome.optimal_dates,
            counseling,
            coverage: outcome.coverage,
        })
    }
}
