use thiserror::Error;

/// Failure to fetch or decode a catalog resource.
///
/// Cloneable so one in-flight load can be shared by every caller waiting on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("network error loading {url}: {message}")]
    Network { url: String, message: String },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("could not decode {url}: {message}")]
    Decode { url: String, message: String },

    #[error("unknown category {0}")]
    UnknownCategory(String),

    #[error("{0}")]
    Unavailable(String),
}

impl LoadError {
    /// Short text suitable for an inline error state.
    pub fn user_message(&self) -> &'static str {
        match self {
            LoadError::Network { .. } | LoadError::Unavailable(_) => {
                "Couldn't reach the catalog. Check your connection and try again."
            }
            LoadError::Status { .. } | LoadError::Decode { .. } => {
                "The catalog data couldn't be read. Try again in a moment."
            }
            LoadError::UnknownCategory(_) => "That category is no longer available.",
        }
    }
}

/// Failure writing to the persistent key-value backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not serialize value for {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("storage backend rejected {key}: {message}")]
    Backend { key: String, message: String },
}

/// A stored document whose shape matches no known schema version.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("unrecognised {what} layout")]
    Unrecognised { what: &'static str },

    #[error("{what} schema version {version} is newer than this build")]
    FutureVersion { what: &'static str, version: u64 },
}
