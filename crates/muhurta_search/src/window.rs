//! Bounded-horizon window search.
//!
//! Samples the horizon at a fixed step, scores every sample through the
//! catalog, and accumulates contiguous runs above the favorable threshold
//! and below the challenging threshold. A sample the provider cannot supply
//! is skipped and breaks contiguity; it is never retried.

use chrono::{Days, NaiveDate};
use muhurta_core::{
    AlignmentPredicate, CoreError, FactorCatalog, FactorSignal, RatingTable, ScoreBreakdown,
    aggregate,
};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::{SampleError, SearchError};
use crate::provider::{AstronomicalPositionProvider, collect_signals};
use crate::window_types::{
    OptimalDate, OptimalDateKind, Sample, SearchConfig, SearchCoverage, SearchOutcome,
    SkippedSample, Window,
};

/// Per-date result, kept in date order.
#[derive(Debug, Clone, PartialEq)]
enum SampleResult {
    Scored(Sample),
    Skipped(SkippedSample),
}

impl SampleResult {
    fn date(&self) -> NaiveDate {
        match self {
            Self::Scored(s) => s.date,
            Self::Skipped(s) => s.date,
        }
    }

    fn scored(&self) -> Option<&Sample> {
        match self {
            Self::Scored(s) => Some(s),
            Self::Skipped(_) => None,
        }
    }
}

/// Window search over one catalog and alignment strategy.
#[derive(Debug, Clone, Copy)]
pub struct WindowSearch<'a> {
    catalog: &'a FactorCatalog,
    alignment: &'a dyn AlignmentPredicate,
    config: SearchConfig,
}

impl<'a> WindowSearch<'a> {
    pub fn new(
        catalog: &'a FactorCatalog,
        alignment: &'a dyn AlignmentPredicate,
        config: SearchConfig,
    ) -> Result<Self, SearchError> {
        config.validate().map_err(SearchError::InvalidConfig)?;
        Ok(Self {
            catalog,
            alignment,
            config,
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn ratings(&self) -> &RatingTable {
        self.catalog.ratings()
    }

    /// Sample dates `start, start + step, ...` up to `start + horizon`.
    pub fn sample_dates(&self, start: NaiveDate) -> Result<Vec<NaiveDate>, SearchError> {
        (0..=self.config.horizon_days)
            .step_by(self.config.step_days as usize)
            .map(|offset| {
                start
                    .checked_add_days(Days::new(u64::from(offset)))
                    .ok_or(SearchError::InvalidConfig(
                        "horizon runs past the supported calendar",
                    ))
            })
            .collect()
    }

    /// Score one date: provider factors plus the alignment boost, aggregated.
    pub fn evaluate<P>(&self, provider: &P, date: NaiveDate) -> Result<ScoreBreakdown, SampleError>
    where
        P: AstronomicalPositionProvider + ?Sized,
    {
        let mut signals = collect_signals(provider, date)?;
        if let Some(key) = self.alignment.boost() {
            if self.alignment.is_aligned(date) {
                signals.push(FactorSignal::present(key, 1.0)?);
            }
        }
        Ok(aggregate(&signals, self.catalog)?)
    }

    fn sample<P>(&self, provider: &P, date: NaiveDate) -> Result<SampleResult, CoreError>
    where
        P: AstronomicalPositionProvider + ?Sized,
    {
        match self.evaluate(provider, date) {
            Ok(breakdown) => {
                let score = breakdown.normalized_score();
                let rating = self.ratings().classify(score)?;
                debug!(%date, score, %rating, "sampled");
                Ok(SampleResult::Scored(Sample {
                    date,
                    score,
                    rating,
                }))
            }
            Err(SampleError::Provider(e)) => {
                warn!(%date, error = %e, "provider failed, skipping sample");
                Ok(SampleResult::Skipped(SkippedSample {
                    date,
                    reason: e.to_string(),
                }))
            }
            Err(SampleError::Contract(e)) => Err(e),
        }
    }

    /// Run the search from `start` over the configured horizon.
    pub fn run<P>(&self, provider: &P, start: NaiveDate) -> Result<SearchOutcome, SearchError>
    where
        P: AstronomicalPositionProvider + ?Sized,
    {
        let dates = self.sample_dates(start)?;
        let mut results: Vec<SampleResult> = if self.config.parallel {
            dates
                .par_iter()
                .map(|&d| self.sample(provider, d))
                .collect::<Result<_, _>>()?
        } else {
            dates
                .iter()
                .map(|&d| self.sample(provider, d))
                .collect::<Result<_, _>>()?
        };
        results.sort_by_key(SampleResult::date);

        let end = dates.last().copied().unwrap_or(start);
        let samples: Vec<Sample> = results.iter().filter_map(|r| r.scored().copied()).collect();
        if samples.is_empty() {
            return Err(SearchError::AllSamplesFailed {
                start,
                end,
                samples: dates.len(),
            });
        }

        let cfg = &self.config;
        let favorable_windows = collect_windows(
            &results,
            |s| s >= cfg.favorable_threshold,
            f64::max,
            cfg.max_favorable_windows,
            self.ratings(),
        )?;
        let challenging_periods = collect_windows(
            &results,
            |s| s <= cfg.challenging_threshold,
            f64::min,
            cfg.max_challenging_windows,
            self.ratings(),
        )?;
        let optimal_dates = self.optimal_dates(&results);

        let skipped: Vec<SkippedSample> = results
            .into_iter()
            .filter_map(|r| match r {
                SampleResult::Skipped(s) => Some(s),
                SampleResult::Scored(_) => None,
            })
            .collect();

        info!(
            %start,
            %end,
            scored = samples.len(),
            skipped = skipped.len(),
            favorable = favorable_windows.len(),
            challenging = challenging_periods.len(),
            "window search complete"
        );

        Ok(SearchOutcome {
            coverage: SearchCoverage {
                start,
                end,
                sampled: dates.len(),
                scored: samples.len(),
                skipped,
            },
            samples,
            favorable_windows,
            challenging_periods,
            optimal_dates,
        })
    }

    /// Alignment dates over every sampled date, and score peaks.
    fn optimal_dates(&self, results: &[SampleResult]) -> Vec<OptimalDate> {
        let kind = if self.alignment.is_observance() {
            OptimalDateKind::Observance
        } else {
            OptimalDateKind::AlignmentMatch
        };
        let mut out: Vec<OptimalDate> = results
            .iter()
            .filter(|r| self.alignment.is_aligned(r.date()))
            .map(|r| OptimalDate {
                date: r.date(),
                kind,
                significance: self.alignment.label(),
                score: r.scored().map(|s| s.score),
            })
            .collect();

        for (i, r) in results.iter().enumerate() {
            let Some(s) = r.scored() else { continue };
            if s.score < self.config.peak_threshold {
                continue;
            }
            let prev = i.checked_sub(1).and_then(|j| results[j].scored());
            let next = results.get(i + 1).and_then(SampleResult::scored);
            let is_peak = prev.is_none_or(|p| s.score >= p.score)
                && next.is_none_or(|n| s.score >= n.score);
            if is_peak {
                out.push(OptimalDate {
                    date: s.date,
                    kind: OptimalDateKind::PeakScore,
                    significance: format!("peak score {:.1} ({})", s.score, s.rating),
                    score: Some(s.score),
                });
            }
        }

        out.sort_by(|a, b| a.date.cmp(&b.date).then(a.kind.cmp(&b.kind)));
        out.truncate(self.config.max_optimal_dates);
        out
    }
}

/// Contiguous runs of scored samples satisfying `in_run`, in date order.
///
/// `pick` folds the run's reported score (max for favorable, min for
/// challenging). Accumulation stops once `cap` windows are collected.
fn collect_windows(
    results: &[SampleResult],
    in_run: impl Fn(f64) -> bool,
    pick: fn(f64, f64) -> f64,
    cap: usize,
    ratings: &RatingTable,
) -> Result<Vec<Window>, CoreError> {
    struct Run {
        start: NaiveDate,
        end: NaiveDate,
        score: f64,
        samples: usize,
    }

    let close = |run: Run| -> Result<Window, CoreError> {
        Window::new(
            run.start,
            run.end,
            run.score,
            ratings.classify(run.score)?,
            run.samples,
        )
    };

    let mut windows = Vec::new();
    let mut current: Option<Run> = None;
    for r in results {
        if windows.len() >= cap {
            return Ok(windows);
        }
        match r.scored() {
            Some(s) if in_run(s.score) => {
                current = Some(match current.take() {
                    Some(run) => Run {
                        end: s.date,
                        score: pick(run.score, s.score),
                        samples: run.samples + 1,
                        ..run
                    },
                    None => Run {
                        start: s.date,
                        end: s.date,
                        score: s.score,
                        samples: 1,
                    },
                });
            }
            _ => {
                if let Some(run) = current.take() {
                    windows.push(close(run)?);
                }
            }
        }
    }
    if let Some(run) = current {
        if windows.len() < cap {
            windows.push(close(run)?);
        }
    }
    Ok(windows)
}
