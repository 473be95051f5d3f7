//! Result alias used across the crate.

use super::error::PaleoError;

/// Convenient result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PaleoError>;
