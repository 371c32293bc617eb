//! Settings errors.

use std::path::PathBuf;

use muhurta_core::CatalogError;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("config I/O error ({}): {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config parse error ({origin}): {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
