//! Position provider seam.
//!
//! The engine never computes planetary positions itself. A provider reports
//! the factors that hold on a date: transits against the natal chart,
//! progressed positions, and calendar (panchang) elements.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use muhurta_core::{FactorSignal, Graha, NatalChart};

use crate::error::ProviderError;

/// Source of per-date factor signals.
///
/// Implementations must be deterministic in the date and safe to call from
/// several threads at once.
pub trait AstronomicalPositionProvider: Sync {
    /// Transit factors for `date`.
    fn transits(&self, date: NaiveDate) -> Result<Vec<FactorSignal>, ProviderError>;

    /// Progressed factors for `date`, grouped by progressed body.
    fn progressions(
        &self,
        date: NaiveDate,
    ) -> Result<BTreeMap<Graha, Vec<FactorSignal>>, ProviderError>;

    /// Calendar factors (tithi, nakshatra, yoga, karana, vaar) for `date`.
    fn calendar(&self, _date: NaiveDate) -> Result<Vec<FactorSignal>, ProviderError> {
        Ok(Vec::new())
    }

    /// Natal chart the factors are computed against, if the provider has one.
    fn natal_chart(&self) -> Option<&NatalChart> {
        None
    }
}

/// All factors for one date, in transit, progression, calendar order.
pub(crate) fn collect_signals<P>(
    provider: &P,
    date: NaiveDate,
) -> Result<Vec<FactorSignal>, ProviderError>
where
    P: AstronomicalPositionProvider + ?Sized,
{
    let mut signals = provider.transits(date)?;
    for (_, progressed) in provider.progressions(date)? {
        signals.extend(progressed);
    }
    signals.extend(provider.calendar(date)?);
    Ok(signals)
}
