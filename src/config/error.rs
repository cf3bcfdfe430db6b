// Error definitions for configuration loading.

use std::path::PathBuf;

/// Startup-fatal failures of [`super::Config::load`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
