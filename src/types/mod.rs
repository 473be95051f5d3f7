//! Core data types for the query pipeline.
//!
//! Defines fundamental types used throughout the system:
//! - `ExtractedQuery`: validated parameter set handed to the compiler
//! - `Resolution`, `OverlapMode`: enumerated parameter values
//! - `PaleoError`: Error types for all operations
//! - `Result`: Convenient result type alias

pub mod error;
pub mod params;
pub mod result;

pub use error::{PaleoError, Stage, StoreFailure};
pub use params::{ExtractedQuery, OverlapMode, Resolution};
pub use result::Result;
