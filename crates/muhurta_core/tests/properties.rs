//! Property tests for scoring, classification and alignment.

use chrono::{Days, NaiveDate};
use muhurta_core::{
    ALL_DOMAINS, ALL_GRAHAS, AlignmentPredicate, Contact, DayOfMonthAlignment, FactorCatalog,
    FactorKey, FactorSignal, MeanTithiAlignment, RatingTable, Tithi, aggregate,
};
use proptest::prelude::*;

fn signal_strategy() -> impl Strategy<Value = FactorSignal> {
    prop_oneof![
        (0usize..9, 1u8..=12, 0.0f64..=1.0).prop_map(|(g, h, s)| {
            FactorSignal::present(
                FactorKey::Transit {
                    body: ALL_GRAHAS[g],
                    contact: Contact::House(h),
                },
                s,
            )
            .unwrap()
        }),
        (0usize..9, 0usize..9, 0.0f64..=1.0).prop_map(|(a, b, s)| {
            FactorSignal::present(FactorKey::pair(ALL_GRAHAS[a], ALL_GRAHAS[b]), s).unwrap()
        }),
        (0usize..30, any::<bool>()).prop_map(|(t, present)| {
            let key = FactorKey::Tithi(Tithi::all()[t]);
            if present {
                FactorSignal::present(key, 1.0).unwrap()
            } else {
                FactorSignal::absent(key)
            }
        }),
    ]
}

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0u64..20_000).prop_map(|d| {
        NaiveDate::from_ymd_opt(1990, 1, 1)
            .unwrap()
            .checked_add_days(Days::new(d))
            .unwrap()
    })
}

proptest! {
    #[test]
    fn score_stays_in_range(signals in prop::collection::vec(signal_strategy(), 0..40), d in 0usize..5) {
        let catalog = FactorCatalog::builtin(ALL_DOMAINS[d]).unwrap();
        let b = aggregate(&signals, &catalog).unwrap();
        prop_assert!((0.0..=100.0).contains(&b.normalized_score()));
        prop_assert!((0.0..=1.0).contains(&b.raw_score()));
    }

    #[test]
    fn adding_a_present_factor_never_lowers_score(
        signals in prop::collection::vec(signal_strategy(), 0..20),
        extra in signal_strategy(),
    ) {
        let catalog = FactorCatalog::builtin(ALL_DOMAINS[0]).unwrap();
        let before = aggregate(&signals, &catalog).unwrap().normalized_score();
        let mut more = signals.clone();
        more.push(extra);
        let after = aggregate(&more, &catalog).unwrap().normalized_score();
        prop_assert!(after + 1e-9 >= before);
    }

    #[test]
    fn classifier_is_total_and_monotonic(a in 0.0f64..=100.0, b in 0.0f64..=100.0) {
        let t = RatingTable::reference();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let r_lo = t.classify(lo).unwrap();
        let r_hi = t.classify(hi).unwrap();
        prop_assert!(r_lo <= r_hi);
    }

    #[test]
    fn alignment_is_pure(date in date_strategy()) {
        let dom = DayOfMonthAlignment::shukra_guru();
        let tithi = MeanTithiAlignment::ekadashi();
        prop_assert_eq!(dom.is_aligned(date), dom.is_aligned(date));
        prop_assert_eq!(tithi.is_aligned(date), tithi.is_aligned(date));
    }
}
