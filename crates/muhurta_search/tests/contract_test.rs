//! Malformed signals from outside the crate are rejected, never clamped.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use muhurta_core::{CoreError, Domain, FactorCatalog, FactorSignal, Graha, NeverAligned, aggregate};
use muhurta_search::{
    AnalysisError, AstronomicalPositionProvider, DomainProfile, ProviderError, SearchConfig,
    SearchError, TimingEngine, WindowSearch,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn purnima(strength: f64) -> FactorSignal {
    let json = format!(r#"{{"key":{{"Tithi":"Purnima"}},"present":true,"strength":{strength}}}"#);
    serde_json::from_str(&json).unwrap()
}

#[test]
fn deserialized_strength_above_one_is_rejected() {
    let catalog = FactorCatalog::builtin(Domain::Charity).unwrap();
    assert_eq!(
        aggregate(&[purnima(1.5)], &catalog),
        Err(CoreError::StrengthOutOfRange {
            identity: "Purnima".into(),
            strength: 1.5,
        })
    );
}

#[test]
fn deserialized_negative_strength_is_rejected() {
    let engine = TimingEngine::new(DomainProfile::charity().unwrap()).unwrap();
    assert!(matches!(
        engine.aggregate(&[purnima(-0.25)]),
        Err(CoreError::StrengthOutOfRange { .. })
    ));
    assert!(engine.aggregate(&[purnima(1.0)]).is_ok());
}

/// Valid calendar signals, except one malformed signal on `bad_day`.
struct Corrupt {
    bad_day: NaiveDate,
}

impl AstronomicalPositionProvider for Corrupt {
    fn transits(&self, _date: NaiveDate) -> Result<Vec<FactorSignal>, ProviderError> {
        Ok(Vec::new())
    }

    fn progressions(
        &self,
        _date: NaiveDate,
    ) -> Result<BTreeMap<Graha, Vec<FactorSignal>>, ProviderError> {
        Ok(BTreeMap::new())
    }

    fn calendar(&self, date: NaiveDate) -> Result<Vec<FactorSignal>, ProviderError> {
        let strength = if date == self.bad_day { 2.0 } else { 0.5 };
        Ok(vec![purnima(strength)])
    }
}

#[test]
fn malformed_signal_mid_search_aborts_the_run() {
    let catalog = FactorCatalog::builtin(Domain::Charity).unwrap();
    let provider = Corrupt {
        bad_day: date(2026, 1, 10),
    };
    for parallel in [false, true] {
        let cfg = SearchConfig {
            horizon_days: 20,
            parallel,
            ..SearchConfig::default()
        };
        let search = WindowSearch::new(&catalog, &NeverAligned, cfg).unwrap();
        assert_eq!(
            search.run(&provider, date(2026, 1, 1)),
            Err(SearchError::Contract(CoreError::StrengthOutOfRange {
                identity: "Purnima".into(),
                strength: 2.0,
            }))
        );
    }
}

#[test]
fn malformed_signal_fails_analysis_instead_of_skipping() {
    let engine = TimingEngine::new(DomainProfile::charity().unwrap()).unwrap();
    let provider = Corrupt {
        bad_day: date(2026, 1, 10),
    };
    assert!(matches!(
        engine.analyze(&provider, date(2026, 1, 1)),
        Err(AnalysisError::WindowSearch(SearchError::Contract(
            CoreError::StrengthOutOfRange { .. }
        )))
    ));

    let on_reference = Corrupt {
        bad_day: date(2026, 1, 1),
    };
    assert!(matches!(
        engine.analyze(&on_reference, date(2026, 1, 1)),
        Err(AnalysisError::Contract(CoreError::StrengthOutOfRange { .. }))
    ));
}
