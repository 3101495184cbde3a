//! Result alias for the unified error type.

use crate::error::AppError;

/// Result type used across all JoinIn crates.
pub type AppResult<T> = Result<T, AppError>;
