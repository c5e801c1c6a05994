//! Core utilities for the Staybook search tools
//!
//! This crate provides the functionality shared by the engine and its binaries:
//!
//! - **Error handling**: errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with serde defaults
//! - **Validation**: collect every configuration problem before failing
//!
//! # Example
//!
//! ```rust,no_run
//! use staybook_core::config::Config;
//!
//! let config = Config::load(None).expect("invalid configuration");
//! assert_eq!(config.schema.search.weights.name, 30);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod validation;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema, KeywordsConfig, LoggingConfig, SearchConfig, TieBreak, WeightsConfig};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::validation::{ValidationResult, Validator};
}
