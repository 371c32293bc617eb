//! End-to-end timing analysis tests.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use muhurta_core::{
    ALL_DOMAINS, Contact, CoreError, FactorKey, FactorSignal, Graha, NatalChart, Rating,
};
use muhurta_search::{
    AnalysisError, AstronomicalPositionProvider, CurrentStatus, DomainProfile, MeanMotionProvider,
    OptimalDateKind, ProviderError, SearchConfig, SearchError, TimingEngine,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Same transit signals every day, optionally with a chart and an outage.
struct Fixed {
    transits: Vec<FactorSignal>,
    chart: Option<NatalChart>,
    outage: Option<NaiveDate>,
}

impl Fixed {
    fn new(transits: Vec<FactorSignal>) -> Self {
        Self {
            transits,
            chart: None,
            outage: None,
        }
    }
}

impl AstronomicalPositionProvider for Fixed {
    fn transits(&self, date: NaiveDate) -> Result<Vec<FactorSignal>, ProviderError> {
        if self.outage == Some(date) {
            return Err(ProviderError::Unavailable {
                date,
                reason: "maintenance".into(),
            });
        }
        Ok(self.transits.clone())
    }

    fn progressions(
        &self,
        _date: NaiveDate,
    ) -> Result<BTreeMap<Graha, Vec<FactorSignal>>, ProviderError> {
        Ok(BTreeMap::new())
    }

    fn natal_chart(&self) -> Option<&NatalChart> {
        self.chart.as_ref()
    }
}

fn in_house(body: Graha, house: u8) -> FactorSignal {
    FactorSignal::present(
        FactorKey::Transit {
            body,
            contact: Contact::House(house),
        },
        1.0,
    )
    .unwrap()
}

#[test]
fn saturn_and_jupiter_in_tenth_favor_career() {
    let engine = TimingEngine::new(DomainProfile::career().unwrap()).unwrap();
    let provider = Fixed::new(vec![in_house(Graha::Shani, 10), in_house(Graha::Guru, 10)]);
    let a = engine.analyze(&provider, date(2026, 10, 17)).unwrap();

    let current = a.current_timing.scored().unwrap();
    assert!(current.rating >= Rating::VeryGood);
    assert!(a.counseling.current_advice.contains("favorable"));
    assert!(a.counseling.decision_making.starts_with("High confidence"));
    assert_eq!(a.future_windows.len(), 1);
    assert_eq!(a.future_windows[0].samples(), 91);
    assert!(a.challenging_periods.is_empty());
    assert_eq!(a.catalog, "career@v1");
}

#[test]
fn zero_factors_means_caution() {
    let engine = TimingEngine::new(DomainProfile::marriage().unwrap()).unwrap();
    let a = engine.analyze(&Fixed::new(Vec::new()), date(2026, 10, 17)).unwrap();

    let current = a.current_timing.scored().unwrap();
    assert_eq!(current.score, 0.0);
    assert_eq!(current.rating, Rating::Difficult);
    assert!(a.counseling.current_advice.contains("caution"));
    assert!(a.future_windows.is_empty());
    assert!(a.counseling.long_term_planning.contains("revisit"));
}

#[test]
fn chart_missing_required_planet_is_a_contract_error() {
    let engine = TimingEngine::new(DomainProfile::marriage().unwrap()).unwrap();
    let chart = NatalChart::new(
        date(1990, 5, 14),
        10.0,
        BTreeMap::from([(Graha::Surya, 30.0), (Graha::Chandra, 120.0)]),
    )
    .unwrap();
    let provider = Fixed {
        chart: Some(chart),
        ..Fixed::new(Vec::new())
    };
    let err = engine.analyze(&provider, date(2026, 10, 17)).unwrap_err();
    assert_eq!(err, AnalysisError::Contract(CoreError::MissingGraha("Shukra")));
}

#[test]
fn reference_date_outage_keeps_the_search() {
    let engine = TimingEngine::new(DomainProfile::career().unwrap()).unwrap();
    let reference = date(2026, 10, 17);
    let provider = Fixed {
        outage: Some(reference),
        ..Fixed::new(vec![in_house(Graha::Guru, 10), in_house(Graha::Shani, 10)])
    };
    let a = engine.analyze(&provider, reference).unwrap();

    match &a.current_timing {
        CurrentStatus::Unavailable { date, reason } => {
            assert_eq!(*date, reference);
            assert!(matches!(reason, ProviderError::Unavailable { .. }));
        }
        other => panic!("expected unavailable, got {other:?}"),
    }
    assert_eq!(a.coverage.scored, 90);
    assert_eq!(a.coverage.skipped[0].date, reference);
    assert_eq!(a.future_windows.len(), 1);
    assert_eq!(a.future_windows[0].start(), date(2026, 10, 18));
    assert!(a.counseling.current_advice.contains("could not be evaluated"));
    assert!(a.counseling.long_term_planning.contains("2026-10-18"));

    let json = serde_json::to_string(&a).unwrap();
    assert!(json.contains("\"status\":\"unavailable\""));
}

#[test]
fn score_date_reports_reference_outage() {
    let engine = TimingEngine::new(DomainProfile::career().unwrap()).unwrap();
    let reference = date(2026, 10, 17);
    let provider = Fixed {
        outage: Some(reference),
        ..Fixed::new(vec![in_house(Graha::Guru, 10)])
    };
    assert!(matches!(
        engine.score_date(&provider, reference),
        Err(AnalysisError::CurrentTiming { date, .. }) if date == reference
    ));
}

/// Fails on every date.
struct Offline;

impl AstronomicalPositionProvider for Offline {
    fn transits(&self, date: NaiveDate) -> Result<Vec<FactorSignal>, ProviderError> {
        Err(ProviderError::OutOfRange { date })
    }

    fn progressions(
        &self,
        _date: NaiveDate,
    ) -> Result<BTreeMap<Graha, Vec<FactorSignal>>, ProviderError> {
        Ok(BTreeMap::new())
    }
}

#[test]
fn total_outage_fails_the_window_search() {
    let engine = TimingEngine::new(DomainProfile::career().unwrap()).unwrap();
    assert!(matches!(
        engine.analyze(&Offline, date(2026, 10, 17)),
        Err(AnalysisError::WindowSearch(SearchError::AllSamplesFailed { samples: 91, .. }))
    ));
}

#[test]
fn later_outage_is_recorded_in_coverage() {
    let engine = TimingEngine::new(DomainProfile::career().unwrap()).unwrap();
    let provider = Fixed {
        outage: Some(date(2026, 10, 20)),
        ..Fixed::new(vec![in_house(Graha::Guru, 10), in_house(Graha::Shani, 10)])
    };
    let a = engine.analyze(&provider, date(2026, 10, 17)).unwrap();
    assert!(!a.coverage.is_complete());
    assert_eq!(a.coverage.skipped[0].date, date(2026, 10, 20));
    assert_eq!(a.future_windows.len(), 2);
}

#[test]
fn invalid_search_config_rejected_at_construction() {
    let profile = DomainProfile::career().unwrap().with_search(SearchConfig {
        favorable_threshold: 120.0,
        ..SearchConfig::default()
    });
    assert!(TimingEngine::new(profile).is_err());
}

#[test]
fn engine_classify_and_aggregate() {
    let engine = TimingEngine::new(DomainProfile::career().unwrap()).unwrap();
    assert_eq!(engine.classify(80.0).unwrap(), Rating::Excellent);
    assert!(engine.classify(101.0).is_err());
    let b = engine
        .aggregate(&[in_house(Graha::Guru, 10), in_house(Graha::Shani, 10)])
        .unwrap();
    assert!((b.normalized_score() - 80.0).abs() < 1e-9);
}

fn mean_motion_provider() -> MeanMotionProvider {
    MeanMotionProvider::new(NatalChart::from_mean_motion(date(1990, 5, 14), 112.5).unwrap())
}

#[test]
fn mean_motion_analysis_for_every_domain() {
    let provider = mean_motion_provider();
    for d in ALL_DOMAINS {
        let engine = TimingEngine::new(DomainProfile::builtin(d).unwrap()).unwrap();
        let a = engine.analyze(&provider, date(2026, 10, 17)).unwrap();
        assert_eq!(a.domain, d);
        let current = a.current_timing.scored().unwrap();
        assert!((0.0..=100.0).contains(&current.score));
        assert_eq!(a.coverage.sampled, 91);
        assert!(a.coverage.is_complete());
        assert!(a.optimal_dates.len() <= 20);
        let json = serde_json::to_string(&a).unwrap();
        assert!(json.contains("\"current_timing\""));
    }
}

#[test]
fn fasting_finds_ekadashi_observances() {
    let profile = DomainProfile::fasting().unwrap().with_search(SearchConfig {
        max_optimal_dates: 200,
        ..SearchConfig::default()
    });
    let engine = TimingEngine::new(profile).unwrap();
    let a = engine.analyze(&mean_motion_provider(), date(2026, 10, 17)).unwrap();
    assert!(
        a.optimal_dates
            .iter()
            .any(|o| o.kind == OptimalDateKind::Observance)
    );
}

#[test]
fn analysis_is_deterministic() {
    let engine = TimingEngine::new(DomainProfile::marriage().unwrap()).unwrap();
    let provider = mean_motion_provider();
    let a = engine.analyze(&provider, date(2026, 10, 17)).unwrap();
    let b = engine.analyze(&provider, date(2026, 10, 17)).unwrap();
    assert_eq!(a, b);
}
