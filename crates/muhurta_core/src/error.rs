//! Error types for catalog construction and scoring contracts.

use chrono::NaiveDate;

/// Configuration errors: a catalog or rating table that violates its
/// invariants. Fatal at load time; no engine can be built from it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog {catalog}: no categories defined")]
    NoCategories { catalog: String },

    #[error("catalog {catalog}: category weights sum to {sum}, expected 1.0")]
    CategorySum { catalog: String, sum: f64 },

    #[error("catalog {catalog}: {field} = {value} is outside [0, 1]")]
    WeightOutOfRange {
        catalog: String,
        field: String,
        value: f64,
    },

    #[error("catalog {catalog}: category {category} has invalid saturation {value}")]
    InvalidSaturation {
        catalog: String,
        category: String,
        value: f64,
    },

    #[error("catalog {catalog}: duplicate category {category}")]
    DuplicateCategory { catalog: String, category: String },

    #[error("catalog {catalog}: factor kind {kind} assigned to both {first} and {second}")]
    DuplicateKind {
        catalog: String,
        kind: String,
        first: String,
        second: String,
    },

    #[error("catalog {catalog}: unknown {what} {name:?}")]
    UnknownName {
        catalog: String,
        what: &'static str,
        name: String,
    },

    #[error("catalog {catalog}: house {house} outside 1..=12")]
    InvalidHouse { catalog: String, house: String },

    #[error("alignment day {0} outside 1..=31")]
    InvalidAlignmentDay(u32),

    #[error("alignment has no days")]
    EmptyAlignment,

    #[error("invalid rating table: {0}")]
    InvalidRatingTable(&'static str),

    #[error("catalog parse error: {0}")]
    Parse(String),
}

/// Input contract violations. Rejected immediately, never coerced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    #[error("factor {identity}: strength {strength} is outside [0, 1]")]
    StrengthOutOfRange { identity: String, strength: f64 },

    #[error("score {0} is outside [0, 100]")]
    ScoreOutOfRange(f64),

    #[error("window end {end} precedes start {start}")]
    InvertedWindow { start: NaiveDate, end: NaiveDate },

    #[error("natal chart is missing {0}")]
    MissingGraha(&'static str),

    #[error("natal chart: invalid longitude {value} for {what}")]
    InvalidLongitude { what: &'static str, value: f64 },
}
