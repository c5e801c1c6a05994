//! Terminal output helpers for Staybook command-line tools
//!
//! - Status messages
//! - Result table rows
//! - Duration and count formatting

#![warn(missing_docs)]

pub mod output;
