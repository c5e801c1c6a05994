//! Configuration loading and schema definitions
//!
//! One TOML file configures the search engine and the binaries' logging.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
