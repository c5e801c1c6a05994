//! Free-text relevance search for Staybook accommodation listings.
//!
//! This crate provides:
//! - Accent-insensitive text normalization
//! - An approximate "closest known value" index
//! - Property type and star rating detection from query text
//! - Weighted relevance scoring with a per-signal breakdown
//! - Parallel ranking on a bounded thread pool
//!
//! # Example
//!
//! ```
//! use staybook_search::{AccommodationType, Candidate, SearchEngine};
//!
//! let corpus = vec![Candidate {
//!     id: 1,
//!     name: "Khách sạn Biển Xanh".into(),
//!     kind: Some(AccommodationType::Hotel),
//!     star_category: Some(3),
//!     province: "Đà Nẵng".into(),
//!     ..Default::default()
//! }];
//!
//! let engine = SearchEngine::with_defaults().unwrap();
//! let results = engine.rank("khách sạn 3 sao Đà Nẵng", &corpus);
//! assert!(results[0].score >= 48);
//! ```

mod engine;
mod error;
mod filter;
mod fuzzy;
mod index;
mod model;
mod normalize;
mod query;
mod relevance;

pub use engine::{ScoredResult, SearchEngine, SearchRequest};
pub use error::{Result, SearchError, SearchErrorCode};
pub use filter::SearchFilter;
pub use fuzzy::{levenshtein_distance, similarity};
pub use index::{CorpusIndexes, MatchIndex};
pub use model::{AccommodationType, Benefit, Candidate};
pub use normalize::normalize;
pub use query::{extract_rating, ParsedQuery, QueryInterpreter};
pub use relevance::{score, QueryContext, ScoreBreakdown, Scorer};

pub use staybook_core::config::{SearchConfig, TieBreak};
