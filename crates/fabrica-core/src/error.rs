use thiserror::Error;

/// Errors raised by the factory engine.
#[derive(Debug, Error)]
pub enum Error {
    /// A field received both a direct and a scoped override in the same call.
    #[error("conflicting overrides for field '{0}'")]
    OverrideConflict(String),
    /// A value generator was consumed past its end.
    #[error("generator for field '{0}' is exhausted")]
    Exhausted(String),
    /// A lazy constructor failed to produce a usable attribute.
    #[error("invalid constructor for field '{field}': {reason}")]
    InvalidConstructor { field: String, reason: String },
    /// A scoped override was routed to a field that is not a nested factory.
    #[error("field '{0}' is not a nested factory")]
    NotNested(String),
}

/// Convenience alias for results returned by fabrica crates.
pub type Result<T> = std::result::Result<T, Error>;
