//! Domain profiles: one engine, parameterized per decision domain.

use std::sync::Arc;

use muhurta_core::{
    AlignmentPredicate, CatalogError, DayOfMonthAlignment, Domain, FactorCatalog, Graha,
    MeanTithiAlignment, NeverAligned,
};

use crate::compose::RecommendationComposer;
use crate::window_types::SearchConfig;

/// Everything that distinguishes one domain's timing analysis from another.
#[derive(Debug, Clone)]
pub struct DomainProfile {
    pub domain: Domain,
    pub catalog: FactorCatalog,
    pub search: SearchConfig,
    pub alignment: Arc<dyn AlignmentPredicate>,
    pub composer: RecommendationComposer,
    /// Grahas the natal chart must contain for the analysis to run.
    pub required_planets: Vec<Graha>,
}

impl DomainProfile {
    /// Built-in profile for a domain.
    pub fn builtin(domain: Domain) -> Result<Self, CatalogError> {
        let (alignment, required_planets): (Arc<dyn AlignmentPredicate>, Vec<Graha>) =
            match domain {
                Domain::Marriage => (
                    Arc::new(DayOfMonthAlignment::shukra_guru()),
                    vec![Graha::Surya, Graha::Chandra, Graha::Shukra, Graha::Guru, Graha::Mangal],
                ),
                Domain::Career => (
                    Arc::new(NeverAligned),
                    vec![Graha::Surya, Graha::Buddh, Graha::Guru, Graha::Shani],
                ),
                Domain::Finance => (
                    Arc::new(NeverAligned),
                    vec![Graha::Buddh, Graha::Guru, Graha::Shukra],
                ),
                Domain::Charity => (Arc::new(MeanTithiAlignment::full_and_new_moon()), Vec::new()),
                Domain::Fasting => (Arc::new(MeanTithiAlignment::ekadashi()), Vec::new()),
            };
        Ok(Self {
            domain,
            catalog: FactorCatalog::builtin(domain)?,
            search: SearchConfig::default(),
            alignment,
            composer: RecommendationComposer::for_domain(domain),
            required_planets,
        })
    }

    pub fn marriage() -> Result<Self, CatalogError> {
        Self::builtin(Domain::Marriage)
    }

    pub fn career() -> Result<Self, CatalogError> {
        Self::builtin(Domain::Career)
    }

    pub fn finance() -> Result<Self, CatalogError> {
        Self::builtin(Domain::Finance)
    }

    pub fn charity() -> Result<Self, CatalogError> {
        Self::builtin(Domain::Charity)
    }

    pub fn fasting() -> Result<Self, CatalogError> {
        Self::builtin(Domain::Fasting)
    }

    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    pub fn with_catalog(mut self, catalog: FactorCatalog) -> Self {
        self.catalog = catalog;
        self
    }
}
