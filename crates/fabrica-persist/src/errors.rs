use thiserror::Error;

/// Errors raised by the persistence extension.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The root record failed the backend's persistability check.
    #[error("record is not persistable")]
    NotPersistable,
    /// Record construction failed before any backend write.
    #[error("factory error: {0}")]
    Factory(#[from] fabrica_core::Error),
    /// A backend write failed.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Convenience alias for results returned by the persistence extension.
pub type Result<T> = std::result::Result<T, PersistError>;
