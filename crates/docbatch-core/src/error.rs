use thiserror::Error;

/// Core error type shared across docbatch crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A placeholder definition violates internal invariants.
    #[error("invalid placeholder: {0}")]
    InvalidPlaceholder(String),
    /// A placeholder could not be turned into a match pattern.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Convenience alias for results returned by docbatch crates.
pub type Result<T> = std::result::Result<T, Error>;
