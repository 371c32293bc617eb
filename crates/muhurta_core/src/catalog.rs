//! Factor weight catalogs.
//!
//! A [`FactorCatalog`] is an immutable, versioned, validated set of weight
//! tables plus the scoring categories and rating bands of one decision
//! domain. It is built once from a [`CatalogSpec`] (usually TOML) and passed
//! by reference to the aggregator; nothing mutates it afterwards.
//!
//! Weight lookup for a [`FactorKey`], in order of precedence:
//! 1. `overrides[identity]`
//! 2. structured rule for the key:
//!    - aspect contact: `aspect × mean(planet(body), planet(natal))`
//!    - house contact: `planet(body) × house(h)`
//!    - planetary pair: `pairs[pair]`
//!    - panchang element: `quality[element.quality()]`
//! 3. `unknown_weight` for any table entry the catalog does not list.
//!
//! Aspects the catalog leaves out fall back to [`Aspect::default_weight`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::aspect::{ALL_ASPECTS, Aspect};
use crate::domain::Domain;
use crate::error::CatalogError;
use crate::factor::{Contact, FactorKey, FactorKind};
use crate::graha::Graha;
use crate::quality::Quality;
use crate::rating::{RatingBand, RatingTable};
use crate::util::is_unit_interval;

/// Allowed deviation of the category weight sum from 1.0.
pub const CATEGORY_SUM_TOLERANCE: f64 = 1e-5;

fn default_unknown_weight() -> f64 {
    0.0
}

fn default_saturation() -> f64 {
    1.0
}

/// Serialized form of a catalog, as written in catalog TOML files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogSpec {
    pub name: String,
    pub version: u32,
    /// Weight for identities no table lists. Explicit; defaults to 0.
    #[serde(default = "default_unknown_weight")]
    pub unknown_weight: f64,
    pub categories: Vec<CategorySpec>,
    /// Aspect name -> weight.
    #[serde(default)]
    pub aspects: BTreeMap<String, f64>,
    /// Graha name (Sanskrit or English) -> relevance weight.
    #[serde(default)]
    pub planets: BTreeMap<String, f64>,
    /// House number ("1".."12") -> relevance weight.
    #[serde(default)]
    pub houses: BTreeMap<String, f64>,
    /// "Graha-Graha" -> pair weight.
    #[serde(default)]
    pub pairs: BTreeMap<String, f64>,
    #[serde(default)]
    pub quality: QualityWeights,
    /// Factor identity -> weight, overriding every rule.
    #[serde(default)]
    pub overrides: BTreeMap<String, f64>,
    /// Rating bands; empty means the reference table.
    #[serde(default)]
    pub ratings: Vec<RatingBand>,
}

/// A named scoring category over one or more factor kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategorySpec {
    pub name: String,
    pub weight: f64,
    /// Sum of `weight × strength` over the category's present factors at
    /// which the category is full.
    #[serde(default = "default_saturation")]
    pub saturation: f64,
    pub kinds: Vec<String>,
}

/// Weight of a panchang element by its traditional quality.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QualityWeights {
    pub auspicious: f64,
    pub neutral: f64,
    pub inauspicious: f64,
}

impl Default for QualityWeights {
    fn default() -> Self {
        Self {
            auspicious: 1.0,
            neutral: 0.25,
            inauspicious: 0.0,
        }
    }
}

impl QualityWeights {
    pub fn weight(&self, quality: Quality) -> f64 {
        match quality {
            Quality::Auspicious => self.auspicious,
            Quality::Neutral => self.neutral,
            Quality::Inauspicious => self.inauspicious,
        }
    }
}

/// Validated scoring category.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    pub weight: f64,
    pub saturation: f64,
    pub kinds: Vec<FactorKind>,
}

/// Immutable, validated weight catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorCatalog {
    name: String,
    version: u32,
    unknown_weight: f64,
    categories: Vec<Category>,
    kind_category: BTreeMap<FactorKind, usize>,
    aspects: BTreeMap<Aspect, f64>,
    planets: BTreeMap<Graha, f64>,
    houses: BTreeMap<u8, f64>,
    pairs: BTreeMap<FactorKey, f64>,
    quality: QualityWeights,
    overrides: BTreeMap<String, f64>,
    ratings: RatingTable,
}

impl FactorCatalog {
    /// Validate a [`CatalogSpec`] into a catalog.
    pub fn new(spec: CatalogSpec) -> Result<Self, CatalogError> {
        let catalog = spec.name.clone();
        let check = |field: String, value: f64| -> Result<f64, CatalogError> {
            if is_unit_interval(value) {
                Ok(value)
            } else {
                Err(CatalogError::WeightOutOfRange {
                    catalog: catalog.clone(),
                    field,
                    value,
                })
            }
        };
        let unknown = |what: &'static str, name: &str| CatalogError::UnknownName {
            catalog: catalog.clone(),
            what,
            name: name.to_string(),
        };

        check("unknown_weight".into(), spec.unknown_weight)?;

        if spec.categories.is_empty() {
            return Err(CatalogError::NoCategories {
                catalog: catalog.clone(),
            });
        }
        let mut categories = Vec::with_capacity(spec.categories.len());
        let mut kind_category: BTreeMap<FactorKind, usize> = BTreeMap::new();
        for (idx, c) in spec.categories.iter().enumerate() {
            if categories.iter().any(|seen: &Category| seen.name == c.name) {
                return Err(CatalogError::DuplicateCategory {
                    catalog: catalog.clone(),
                    category: c.name.clone(),
                });
            }
            check(format!("categories.{}.weight", c.name), c.weight)?;
            if !c.saturation.is_finite() || c.saturation <= 0.0 {
                return Err(CatalogError::InvalidSaturation {
                    catalog: catalog.clone(),
                    category: c.name.clone(),
                    value: c.saturation,
                });
            }
            let mut kinds = Vec::with_capacity(c.kinds.len());
            for k in &c.kinds {
                let kind = FactorKind::from_name(k).ok_or_else(|| unknown("factor kind", k))?;
                if let Some(&prev) = kind_category.get(&kind) {
                    return Err(CatalogError::DuplicateKind {
                        catalog: catalog.clone(),
                        kind: kind.name().to_string(),
                        first: spec.categories[prev].name.clone(),
                        second: c.name.clone(),
                    });
                }
                kind_category.insert(kind, idx);
                kinds.push(kind);
            }
            categories.push(Category {
                name: c.name.clone(),
                weight: c.weight,
                saturation: c.saturation,
                kinds,
            });
        }
        let sum: f64 = categories.iter().map(|c| c.weight).sum();
        if (sum - 1.0).abs() > CATEGORY_SUM_TOLERANCE {
            return Err(CatalogError::CategorySum {
                catalog: catalog.clone(),
                sum,
            });
        }

        let mut aspects: BTreeMap<Aspect, f64> =
            ALL_ASPECTS.iter().map(|a| (*a, a.default_weight())).collect();
        for (name, w) in &spec.aspects {
            let aspect = Aspect::from_name(name).ok_or_else(|| unknown("aspect", name))?;
            aspects.insert(aspect, check(format!("aspects.{name}"), *w)?);
        }

        let mut planets = BTreeMap::new();
        for (name, w) in &spec.planets {
            let graha = Graha::from_name(name).ok_or_else(|| unknown("graha", name))?;
            planets.insert(graha, check(format!("planets.{name}"), *w)?);
        }

        let mut houses = BTreeMap::new();
        for (name, w) in &spec.houses {
            let house = name
                .trim()
                .parse::<u8>()
                .ok()
                .filter(|h| (1..=12).contains(h))
                .ok_or_else(|| CatalogError::InvalidHouse {
                    catalog: catalog.clone(),
                    house: name.clone(),
                })?;
            houses.insert(house, check(format!("houses.{name}"), *w)?);
        }

        let mut pairs = BTreeMap::new();
        for (name, w) in &spec.pairs {
            let (a, b) = name
                .split_once('-')
                .and_then(|(a, b)| Some((Graha::from_name(a)?, Graha::from_name(b)?)))
                .ok_or_else(|| unknown("planetary pair", name))?;
            pairs.insert(FactorKey::pair(a, b), check(format!("pairs.{name}"), *w)?);
        }

        let q = spec.quality;
        check("quality.auspicious".into(), q.auspicious)?;
        check("quality.neutral".into(), q.neutral)?;
        check("quality.inauspicious".into(), q.inauspicious)?;

        let mut overrides = BTreeMap::new();
        for (identity, w) in &spec.overrides {
            overrides.insert(identity.clone(), check(format!("overrides.{identity}"), *w)?);
        }

        let ratings = if spec.ratings.is_empty() {
            RatingTable::reference()
        } else {
            RatingTable::new(spec.ratings.clone())?
        };

        Ok(Self {
            name: spec.name,
            version: spec.version,
            unknown_weight: spec.unknown_weight,
            categories,
            kind_category,
            aspects,
            planets,
            houses,
            pairs,
            quality: q,
            overrides,
            ratings,
        })
    }

    /// Parse and validate a catalog TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, CatalogError> {
        let spec: CatalogSpec =
            toml::from_str(text).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(spec)
    }

    /// Built-in catalog for a domain.
    pub fn builtin(domain: Domain) -> Result<Self, CatalogError> {
        let text = match domain {
            Domain::Marriage => include_str!("../catalogs/marriage.toml"),
            Domain::Career => include_str!("../catalogs/career.toml"),
            Domain::Finance => include_str!("../catalogs/finance.toml"),
            Domain::Charity => include_str!("../catalogs/charity.toml"),
            Domain::Fasting => include_str!("../catalogs/fasting.toml"),
        };
        Self::from_toml_str(text)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// `name@vN`, recorded in every score breakdown.
    pub fn label(&self) -> String {
        format!("{}@v{}", self.name, self.version)
    }

    pub fn unknown_weight(&self) -> f64 {
        self.unknown_weight
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Category scoring a factor kind, if any.
    pub fn category_of(&self, kind: FactorKind) -> Option<(usize, &Category)> {
        self.kind_category
            .get(&kind)
            .map(|&idx| (idx, &self.categories[idx]))
    }

    pub fn ratings(&self) -> &RatingTable {
        &self.ratings
    }

    pub fn aspect_weight(&self, aspect: Aspect) -> f64 {
        self.aspects
            .get(&aspect)
            .copied()
            .unwrap_or(aspect.default_weight())
    }

    pub fn planet_weight(&self, graha: Graha) -> f64 {
        self.planets
            .get(&graha)
            .copied()
            .unwrap_or(self.unknown_weight)
    }

    pub fn house_weight(&self, house: u8) -> f64 {
        self.houses.get(&house).copied().unwrap_or(self.unknown_weight)
    }

    /// Weight of a factor identity, always in [0, 1].
    pub fn weight(&self, key: &FactorKey) -> f64 {
        if !self.overrides.is_empty() {
            if let Some(w) = self.overrides.get(&key.identity()) {
                return *w;
            }
        }
        match key {
            FactorKey::Transit { body, contact } | FactorKey::Progression { body, contact } => {
                match contact {
                    Contact::Aspect { aspect, natal } => {
                        self.aspect_weight(*aspect)
                            * (self.planet_weight(*body) + self.planet_weight(*natal))
                            / 2.0
                    }
                    Contact::House(h) => self.planet_weight(*body) * self.house_weight(*h),
                }
            }
            FactorKey::PlanetaryPair { .. } => {
                self.pairs.get(key).copied().unwrap_or(self.unknown_weight)
            }
            FactorKey::Tithi(t) => self.quality.weight(t.quality()),
            FactorKey::Nakshatra(n) => self.quality.weight(n.quality()),
            FactorKey::Yoga(y) => self.quality.weight(y.quality()),
            FactorKey::Karana(k) => self.quality.weight(k.quality()),
            FactorKey::Vaar(v) => self.quality.weight(v.quality()),
        }
    }
}
