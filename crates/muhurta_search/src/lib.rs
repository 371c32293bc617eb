//! Favorable-window search and timing analysis.
//!
//! This crate provides:
//! - The position provider seam and a mean-motion reference provider
//! - Bounded-horizon window search with optimal-date detection
//! - Template-based counseling text
//! - Per-domain profiles and the `TimingEngine` that ties them together

pub mod analysis;
pub mod analysis_types;
pub mod compose;
pub mod error;
pub mod mean_motion_provider;
pub mod profile;
pub mod provider;
pub mod window;
pub mod window_types;

pub use analysis::TimingEngine;
pub use analysis_types::{CurrentStatus, CurrentTiming, TimingAnalysis};
pub use compose::{CompositionInput, Counseling, RecommendationComposer};
pub use error::{AnalysisError, ProviderError, SampleError, SearchError};
pub use mean_motion_provider::{
    DEFAULT_PROGRESSION_ORB_DEG, DEFAULT_TRANSIT_ORB_DEG, MeanMotionProvider,
};
pub use profile::DomainProfile;
pub use provider::AstronomicalPositionProvider;
pub use window::WindowSearch;
pub use window_types::{
    OptimalDate, OptimalDateKind, Sample, SearchConfig, SearchCoverage, SearchOutcome,
    SkippedSample, Window,
};
