use std::path::PathBuf;

/// Everything that can go wrong while provisioning.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A certificate file could not be read.
    #[error("Failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The provisioning template could not be read.
    #[error("Failed to read provisioning template {path}: {source}")]
    Template {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A request failed the local check before submission.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The remote service rejected a call or could not be reached.
    #[error("{operation} failed: {message}")]
    Remote {
        operation: &'static str,
        message: String,
    },

    /// The request dispatcher could not be created.
    #[error("Failed to create request dispatcher: {0}")]
    HttpClient(String),

    #[error("Configuration issue: {0}")]
    Config(String),

    #[error("Failed to read config file {path}: {source}")]
    ConfigFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Unknown region: {0}")]
    Region(String),

    #[error("Logger initialization error: {0}")]
    Logging(#[from] log::SetLoggerError),
}

impl Error {
    /// Wraps a rusoto error from `operation`.
    pub fn remote<E: std::fmt::Display>(operation: &'static str, err: E) -> Self {
        Error::Remote {
            operation,
            message: err.to_string(),
        }
    }
}
