//! Error types for type resolution and file generation.

use thiserror::Error;

/// Error raised while resolving a single schema site.
///
/// Malformed schemas never end up here: they resolve to a generic fallback.
/// Only conditions that would otherwise corrupt the output or exhaust the
/// stack are reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Nesting went past the configured depth limit.
    #[error("schema nesting depth {depth} exceeds the limit of {limit}")]
    DepthExceeded {
        /// Depth at which resolution stopped.
        depth: usize,
        /// Configured limit.
        limit: usize,
    },

    /// Two different literal sets derived the same enum name.
    #[error("enum name '{name}' is derived from both {existing} and {incoming}")]
    EnumCollision {
        /// Derived enum name.
        name: String,
        /// Declaration already registered under that name.
        existing: String,
        /// Declaration that tried to reuse the name.
        incoming: String,
    },
}

/// Error type for a generation run.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON document could not be parsed.
    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML document could not be parsed.
    #[error("invalid YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration file could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// A schema site failed to resolve.
    #[error("failed to resolve {site}: {source}")]
    Resolve {
        /// Human-readable location of the site.
        site: String,
        /// Underlying resolution error.
        #[source]
        source: ResolveError,
    },

    /// Two operations share one identifier.
    #[error("duplicate operationId '{0}'; each operation must have a unique identifier")]
    DuplicateOperation(String),
}

impl GenerateError {
    /// Wraps a resolution error with the site it came from.
    pub fn at(site: impl Into<String>, source: ResolveError) -> Self {
        Self::Resolve {
            site: site.into(),
            source,
        }
    }
}
