//! Core scoring layer for muhurta (auspicious timing) analysis.
//!
//! This crate provides:
//! - Grahas, aspects and the five panchang limbs with their traditional quality
//! - The factor model reported by position providers
//! - Versioned weight catalogs per decision domain
//! - Weighted aggregation into a 0-100 score and rating classification
//! - Calendar alignment predicates
//! - Mean-motion longitudes as a stand-in position source
//!
//! Everything here is pure and synchronous.

pub mod aggregate;
pub mod alignment;
pub mod aspect;
pub mod catalog;
pub mod chart;
pub mod domain;
pub mod error;
pub mod factor;
pub mod graha;
pub mod karana;
pub mod mean_motion;
pub mod nakshatra;
pub mod quality;
pub mod rating;
pub mod tithi;
pub mod util;
pub mod vaar;
pub mod yoga;

pub use aggregate::{CategoryScore, ScoreBreakdown, aggregate};
pub use alignment::{AlignmentPredicate, DayOfMonthAlignment, MeanTithiAlignment, NeverAligned};
pub use aspect::{ALL_ASPECTS, Aspect, AspectMatch, aspect_between};
pub use catalog::{
    CATEGORY_SUM_TOLERANCE, CatalogSpec, Category, CategorySpec, FactorCatalog, QualityWeights,
};
pub use chart::{ChartSpec, ChartSpecError, NatalChart};
pub use domain::{ALL_DOMAINS, Domain};
pub use error::{CatalogError, CoreError};
pub use factor::{ALL_FACTOR_KINDS, Contact, Factor, FactorKey, FactorKind, FactorSignal};
pub use graha::{ALL_GRAHAS, Graha, SAPTA_GRAHAS};
pub use karana::{ALL_KARANAS, Karana, KaranaPosition, karana_from_elongation};
pub use mean_motion::{
    MeanPanchang, days_since_j2000, mean_elongation, mean_panchang, mean_sidereal_longitude,
};
pub use nakshatra::{ALL_NAKSHATRAS_27, Nakshatra, NakshatraInfo, nakshatra_from_longitude};
pub use quality::Quality;
pub use rating::{ALL_RATINGS, Rating, RatingBand, RatingTable};
pub use tithi::{ALL_TITHIS, Paksha, Tithi, TithiPosition, tithi_from_elongation};
pub use util::{angular_separation, normalize_360};
pub use vaar::{ALL_VAARS, Vaar, vaar_from_weekday};
pub use yoga::{ALL_YOGAS, Yoga, yoga_from_sum};
