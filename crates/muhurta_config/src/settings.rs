//! Engine settings loaded from TOML.
//!
//! Load with [`Settings::load`], which searches:
//! 1. `$MUHURTA_CONFIG`
//! 2. `./muhurta.toml`
//! 3. Built-in defaults
//!
//! ```toml
//! [logging]
//! level = "info"
//!
//! [search]
//! horizon_days = 120
//!
//! [domains.marriage]
//! catalog = "catalogs/marriage_v2.toml"
//! favorable_threshold = 75
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use muhurta_core::{Domain, FactorCatalog};
use muhurta_search::{DomainProfile, SearchConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ConfigError;
use crate::validation::{ValidationWarning, unknown_keys};

/// Environment variable naming a settings file.
pub const CONFIG_ENV: &str = "MUHURTA_CONFIG";

/// Settings file looked up in the working directory.
pub const LOCAL_CONFIG: &str = "muhurta.toml";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter level when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Partial [`SearchConfig`]; unset fields keep the value underneath.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchOverrides {
    pub horizon_days: Option<u32>,
    pub step_days: Option<u32>,
    pub favorable_threshold: Option<f64>,
    pub challenging_threshold: Option<f64>,
    pub max_favorable_windows: Option<usize>,
    pub max_challenging_windows: Option<usize>,
    pub peak_threshold: Option<f64>,
    pub max_optimal_dates: Option<usize>,
    pub parallel: Option<bool>,
}

impl SearchOverrides {
    pub fn apply(&self, base: SearchConfig) -> SearchConfig {
        SearchConfig {
            horizon_days: self.horizon_days.unwrap_or(base.horizon_days),
            step_days: self.step_days.unwrap_or(base.step_days),
            favorable_threshold: self.favorable_threshold.unwrap_or(base.favorable_threshold),
            challenging_threshold: self
                .challenging_threshold
                .unwrap_or(base.challenging_threshold),
            max_favorable_windows: self
                .max_favorable_windows
                .unwrap_or(base.max_favorable_windows),
            max_challenging_windows: self
                .max_challenging_windows
                .unwrap_or(base.max_challenging_windows),
            peak_threshold: self.peak_threshold.unwrap_or(base.peak_threshold),
            max_optimal_dates: self.max_optimal_dates.unwrap_or(base.max_optimal_dates),
            parallel: self.parallel.unwrap_or(base.parallel),
        }
    }
}

/// Per-domain settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainSettings {
    /// Catalog file replacing the built-in one. Relative paths resolve
    /// against the settings file's directory.
    pub catalog: Option<PathBuf>,
    #[serde(flatten)]
    pub search: SearchOverrides,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub search: SearchOverrides,
    pub domains: BTreeMap<String, DomainSettings>,
    #[serde(skip)]
    base_dir: Option<PathBuf>,
    #[serde(skip)]
    warnings: Vec<ValidationWarning>,
    #[serde(skip)]
    source: Option<PathBuf>,
}

impl Settings {
    /// Load settings using the standard search order. Never fails: an
    /// unreadable or invalid file is logged and the next source is tried.
    pub fn load() -> Self {
        let mut candidates = Vec::with_capacity(2);
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let p = PathBuf::from(&path);
            if p.exists() {
                candidates.push(p);
            } else {
                warn!(path = %path, "{CONFIG_ENV} points to a missing file, falling back");
            }
        }
        candidates.push(PathBuf::from(LOCAL_CONFIG));
        Self::load_first(&candidates)
    }

    /// The first candidate that exists and loads cleanly, or the defaults.
    pub fn load_first(candidates: &[PathBuf]) -> Self {
        for path in candidates {
            if !path.exists() {
                debug!(path = %path.display(), "no settings file");
                continue;
            }
            match Self::load_from_file(path) {
                Ok(settings) => {
                    info!(path = %path.display(), "loaded settings");
                    return settings;
                }
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "failed to load settings, falling back"
                    );
                }
            }
        }
        info!("no settings file found, using built-in defaults");
        Self::default()
    }

    /// Load and validate a settings file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings = Self::parse(&contents, &path.display().to_string())?;
        settings.base_dir = path.parent().map(Path::to_path_buf);
        settings.source = Some(path.to_path_buf());
        settings.validate()?;
        Ok(settings)
    }

    /// Parse and validate settings from a string. Relative catalog paths
    /// resolve against the working directory.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let settings = Self::parse(contents, "<string>")?;
        settings.validate()?;
        Ok(settings)
    }

    fn parse(contents: &str, origin: &str) -> Result<Self, ConfigError> {
        let warnings = unknown_keys(contents);
        for w in &warnings {
            warn!(origin, "{w}");
        }
        let mut settings: Self = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            origin: origin.to_string(),
            source,
        })?;
        settings.warnings = warnings;
        Ok(settings)
    }

    /// File these settings were read from; `None` for defaults and strings.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Unknown-key warnings found while parsing.
    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    /// Check every value that can be checked without reading catalogs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !LOG_LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            errors.push(format!(
                "logging.level {:?} is not one of {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            ));
        }
        if let Err(e) = self.search.apply(SearchConfig::default()).validate() {
            errors.push(format!("search: {e}"));
        }
        let mut seen: BTreeMap<Domain, &str> = BTreeMap::new();
        for name in self.domains.keys() {
            let Some(domain) = Domain::from_name(name) else {
                errors.push(format!("domains.{name}: unknown domain"));
                continue;
            };
            if let Some(first) = seen.insert(domain, name) {
                errors.push(format!("domains.{name}: duplicates domains.{first}"));
                continue;
            }
            if let Err(e) = self.search_config(domain).validate() {
                errors.push(format!("domains.{name}: {e}"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn domain(&self, domain: Domain) -> Option<&DomainSettings> {
        self.domains
            .iter()
            .find(|(name, _)| Domain::from_name(name) == Some(domain))
            .map(|(_, s)| s)
    }

    /// Effective search configuration: defaults, then `[search]`, then
    /// `[domains.<name>]`.
    pub fn search_config(&self, domain: Domain) -> SearchConfig {
        let global = self.search.apply(SearchConfig::default());
        match self.domain(domain) {
            Some(d) => d.search.apply(global),
            None => global,
        }
    }

    /// Catalog path for a domain, resolved against the settings file.
    pub fn catalog_path(&self, domain: Domain) -> Option<PathBuf> {
        let path = self.domain(domain)?.catalog.as_ref()?;
        Some(match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.clone(),
        })
    }

    /// Validated profile for a domain with every override applied.
    pub fn profile(&self, domain: Domain) -> Result<DomainProfile, ConfigError> {
        let search = self.search_config(domain);
        search
            .validate()
            .map_err(|e| ConfigError::Validation(vec![format!("domains.{domain}: {e}")]))?;

        let mut profile = DomainProfile::builtin(domain)?.with_search(search);
        if let Some(path) = self.catalog_path(domain) {
            let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
                path: path.clone(),
                source,
            })?;
            let catalog = FactorCatalog::from_toml_str(&text)?;
            info!(
                %domain,
                catalog = %catalog.label(),
                path = %path.display(),
                "using custom catalog"
            );
            profile = profile.with_catalog(catalog);
        }
        Ok(profile)
    }
}
