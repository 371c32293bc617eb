//! Settings for the muhurta timing engine.
//!
//! A settings file layers search overrides on the built-in defaults, first
//! globally under `[search]` and then per domain under `[domains.<name>]`,
//! and can swap a domain's built-in catalog for a TOML file.

pub mod error;
pub mod settings;
pub mod validation;

pub use error::ConfigError;
pub use settings::{
    CONFIG_ENV, DomainSettings, LOCAL_CONFIG, LoggingSettings, SearchOverrides, Settings,
};
pub use validation::{ValidationWarning, known_config_keys, suggest_correction, unknown_keys};
