//! Weighted factor aggregation.
//!
//! Each catalog category fills up to its saturation point:
//!
//! ```text
//! fill_c     = min(Σ weight(f) × strength(f) / saturation_c, 1)   over present f in c
//! raw        = Σ category_weight_c × fill_c                      ∈ [0, 1]
//! normalized = 100 × raw                                         ∈ [0, 100]
//! ```
//!
//! The map is fixed per catalog version, so identical signals under the same
//! catalog always produce identical breakdowns.

use serde::Serialize;
use tracing::debug;

use crate::catalog::FactorCatalog;
use crate::error::CoreError;
use crate::factor::{Factor, FactorSignal};

/// Points earned by one catalog category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryScore {
    pub name: String,
    pub weight: f64,
    /// Saturation fill in [0, 1].
    pub fill: f64,
    /// `100 × weight × fill`.
    pub points: f64,
}

/// Result of aggregating one date's factors. Only [`aggregate`] builds these.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    factors: Vec<Factor>,
    categories: Vec<CategoryScore>,
    raw_score: f64,
    normalized_score: f64,
    catalog: String,
}

impl ScoreBreakdown {
    pub fn factors(&self) -> &[Factor] {
        &self.factors
    }

    pub fn categories(&self) -> &[CategoryScore] {
        &self.categories
    }

    /// Weighted sum in [0, 1].
    pub fn raw_score(&self) -> f64 {
        self.raw_score
    }

    /// Score in [0, 100].
    pub fn normalized_score(&self) -> f64 {
        self.normalized_score
    }

    /// `name@vN` of the catalog that produced this breakdown.
    pub fn catalog(&self) -> &str {
        &self.catalog
    }

    /// Present factor with the largest contribution; the earliest wins ties.
    pub fn dominant(&self) -> Option<&Factor> {
        self.factors
            .iter()
            .filter(|f| f.present && f.contribution > 0.0)
            .fold(None, |best: Option<&Factor>, f| match best {
                Some(b) if b.contribution >= f.contribution => Some(b),
                _ => Some(f),
            })
    }

    pub fn present_count(&self) -> usize {
        self.factors.iter().filter(|f| f.present).count()
    }
}

/// Aggregate a date's factor signals under a catalog.
///
/// Factors whose kind no category scores are kept with `category = None` and
/// contribute nothing. Empty or all-absent input scores 0.
pub fn aggregate(
    signals: &[FactorSignal],
    catalog: &FactorCatalog,
) -> Result<ScoreBreakdown, CoreError> {
    let cats = catalog.categories();
    let mut mass = vec![0.0_f64; cats.len()];
    let mut resolved = Vec::with_capacity(signals.len());

    for signal in signals {
        signal.validate()?;
        let key = signal.key();
        let weight = catalog.weight(key);
        let slot = catalog.category_of(signal.kind());
        let product = if signal.is_present() {
            weight * signal.strength()
        } else {
            0.0
        };
        if let Some((idx, _)) = slot {
            mass[idx] += product;
        }
        resolved.push((
            Factor {
                kind: signal.kind(),
                identity: key.identity(),
                weight,
                present: signal.is_present(),
                strength: signal.strength(),
                category: slot.map(|(_, c)| c.name.clone()),
                contribution: 0.0,
            },
            slot.map(|(idx, _)| idx),
            product,
        ));
    }

    let categories: Vec<CategoryScore> = cats
        .iter()
        .zip(&mass)
        .map(|(c, m)| {
            let fill = (m / c.saturation).min(1.0);
            CategoryScore {
                name: c.name.clone(),
                weight: c.weight,
                fill,
                points: 100.0 * c.weight * fill,
            }
        })
        .collect();

    // Category weights sum to 1 only within tolerance.
    let raw_score = categories
        .iter()
        .map(|c| c.weight * c.fill)
        .sum::<f64>()
        .clamp(0.0, 1.0);
    let normalized_score = (100.0 * raw_score).clamp(0.0, 100.0);

    let factors = resolved
        .into_iter()
        .map(|(mut factor, idx, product)| {
            if let Some(idx) = idx {
                if mass[idx] > 0.0 {
                    factor.contribution = categories[idx].points * product / mass[idx];
                }
            }
            factor
        })
        .collect();

    debug!(
        catalog = %catalog.label(),
        signals = signals.len(),
        score = normalized_score,
        "aggregated factors"
    );

    Ok(ScoreBreakdown {
        factors,
        categories,
        raw_score,
        normalized_score,
        catalog: catalog.label(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogSpec, CategorySpec, QualityWeights};
    use crate::domain::Domain;
    use crate::factor::{Contact, FactorKey};
    use crate::graha::Graha;
    use crate::tithi::Tithi;
    use crate::vaar::Vaar;
    use std::collections::BTreeMap;

    fn catalog() -> FactorCatalog {
        FactorCatalog::new(CatalogSpec {
            name: "unit".into(),
            version: 3,
            unknown_weight: 0.0,
            categories: vec![
                CategorySpec {
                    name: "transits".into(),
                    weight: 0.5,
                    saturation: 1.0,
                    kinds: vec!["transit".into()],
                },
                CategorySpec {
                    name: "calendar".into(),
                    weight: 0.5,
                    saturation: 2.0,
                    kinds: vec!["tithi".into(), "vaar".into()],
                },
            ],
            aspects: BTreeMap::new(),
            planets: BTreeMap::from([("Guru".into(), 1.0), ("Shani".into(), 0.5)]),
            houses: BTreeMap::from([("10".into(), 1.0)]),
            pairs: BTreeMap::new(),
            quality: QualityWeights::default(),
            overrides: BTreeMap::new(),
            ratings: Vec::new(),
        })
        .unwrap()
    }

    fn house(body: Graha, h: u8) -> FactorKey {
        FactorKey::Transit {
            body,
            contact: Contact::House(h),
        }
    }

    #[test]
    fn empty_input_scores_zero() {
        let b = aggregate(&[], &catalog()).unwrap();
        assert_eq!(b.normalized_score(), 0.0);
        assert!(b.dominant().is_none());
        assert_eq!(b.catalog(), "unit@v3");
    }

    #[test]
    fn all_absent_scores_zero() {
        let signals = [
            FactorSignal::absent(house(Graha::Guru, 10)),
            FactorSignal::absent(FactorKey::Tithi(Tithi::Purnima)),
        ];
        let b = aggregate(&signals, &catalog()).unwrap();
        assert_eq!(b.normalized_score(), 0.0);
        assert_eq!(b.factors().len(), 2);
        assert_eq!(b.present_count(), 0);
    }

    #[test]
    fn category_saturates() {
        let signals = [
            FactorSignal::present(house(Graha::Guru, 10), 1.0).unwrap(),
            FactorSignal::present(house(Graha::Shani, 10), 1.0).unwrap(),
        ];
        let b = aggregate(&signals, &catalog()).unwrap();
        assert!((b.normalized_score() - 50.0).abs() < 1e-9);
        assert_eq!(b.categories()[0].fill, 1.0);
    }

    #[test]
    fn partial_fill() {
        // Shani: 0.5 × 1.0 × 0.8 = 0.4 of a 1.0 saturation, in a 0.5 category.
        let signals = [FactorSignal::present(house(Graha::Shani, 10), 0.8).unwrap()];
        let b = aggregate(&signals, &catalog()).unwrap();
        assert!((b.normalized_score() - 20.0).abs() < 1e-9);
        assert!((b.raw_score() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn contributions_sum_to_score() {
        let signals = [
            FactorSignal::present(house(Graha::Guru, 10), 0.6).unwrap(),
            FactorSignal::present(FactorKey::Tithi(Tithi::ShuklaDwitiya), 1.0).unwrap(),
            FactorSignal::present(FactorKey::Vaar(Vaar::Guruvara), 1.0).unwrap(),
        ];
        let b = aggregate(&signals, &catalog()).unwrap();
        let total: f64 = b.factors().iter().map(|f| f.contribution).sum();
        assert!((total - b.normalized_score()).abs() < 1e-9);
        assert_eq!(b.dominant().unwrap().identity, "Guru in house 10");
    }

    #[test]
    fn unscored_kind_is_listed_without_category() {
        let signals =
            [FactorSignal::present(FactorKey::pair(Graha::Guru, Graha::Shukra), 1.0).unwrap()];
        let b = aggregate(&signals, &catalog()).unwrap();
        assert_eq!(b.normalized_score(), 0.0);
        assert_eq!(b.factors()[0].category, None);
        assert_eq!(b.factors()[0].contribution, 0.0);
    }

    #[test]
    fn deterministic_under_builtin_catalog() {
        let cat = FactorCatalog::builtin(Domain::Career).unwrap();
        let signals = [
            FactorSignal::present(house(Graha::Guru, 10), 1.0).unwrap(),
            FactorSignal::present(house(Graha::Shani, 10), 1.0).unwrap(),
        ];
        let a = aggregate(&signals, &cat).unwrap();
        let b = aggregate(&signals, &cat).unwrap();
        assert_eq!(a, b);
        assert!((a.normalized_score() - 80.0).abs() < 1e-9);
    }
}
