//! Error types for the search crate.
//!
//! Scoring and ranking never fail; these errors only come from building an
//! engine or decoding input values.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while setting up a search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Configuration rejected by validation
    #[error(transparent)]
    Config(#[from] staybook_core::Error),

    /// Scoring pool could not be started
    #[error("Failed to build scoring pool: {0}")]
    ThreadPool(String),

    /// Accommodation type code or label not recognised
    #[error("Unknown accommodation type: {0}")]
    UnknownAccommodationType(String),
}

/// Error code for integration with staybook-core error handling.
/// Range: 5xxx for search errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchErrorCode {
    /// Configuration rejected
    Config = 5001,
    /// Scoring pool failure
    ThreadPool = 5002,
    /// Unknown accommodation type
    UnknownAccommodationType = 5003,
}

impl SearchError {
    /// Returns the error code for this error.
    pub fn code(&self) -> SearchErrorCode {
        match self {
            SearchError::Config(_) => SearchErrorCode::Config,
            SearchError::ThreadPool(_) => SearchErrorCode::ThreadPool,
            SearchError::UnknownAccommodationType(_) => SearchErrorCode::UnknownAccommodationType,
        }
    }
}
