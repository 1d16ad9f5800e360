//! Error types for agentid

/// Result type alias using agentid's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for agentid operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Rule database build errors
    #[error("database build error: {0}")]
    Build(#[from] BuildError),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML (de)serialization errors
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON (de)serialization errors
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Reasons a rule database generation is rejected.
///
/// A rejected build never touches the generation that is currently active.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// A mandatory section is entirely absent
    #[error("missing mandatory section [{0}]")]
    MissingSection(&'static str),

    /// A pattern source could not be compiled
    #[error("invalid pattern #{index} in [{section}] ({pattern:?}): {source}")]
    InvalidPattern {
        section: &'static str,
        index: usize,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// An entry cannot be interpreted for its table
    #[error("malformed entry {key:?} in [{section}]: {reason}")]
    MalformedEntry {
        section: &'static str,
        key: String,
        reason: String,
    },
}

impl BuildError {
    /// Create a new malformed entry error
    pub fn malformed(section: &'static str, key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedEntry {
            section,
            key: key.into(),
            reason: reason.into(),
        }
    }
}
