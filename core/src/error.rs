use std::path::PathBuf;
use thiserror::Error;

/// Failure while reading or parsing one of the external resources. Callers
/// recover by substituting an empty table; nothing here is fatal.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse `{}` as JSON", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to parse `{}` as TOML", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
