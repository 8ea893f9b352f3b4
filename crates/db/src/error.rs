use studio_core::error::CoreError;

/// Failure of a booking engine operation.
///
/// Either a domain rule rejected the request, or the database did. In both
/// cases the surrounding transaction has been rolled back.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;
