//! Configuration schema definitions
//!
//! Every key has a serde default, so an empty file is a valid configuration.

use crate::error::Result;
use crate::validation::Validator;
use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// Search engine settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Logging settings for binaries
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConfigSchema {
    /// Validate every section, reporting all problems at once
    pub fn validate(&self) -> Result<()> {
        self.search.validate()
    }
}

/// How equal scores are ordered in a ranked result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TieBreak {
    /// Ascending candidate id
    #[default]
    Id,
    /// Position in the corpus handed to the engine
    Corpus,
}

/// Search engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Substring lengths used by the approximate match index
    #[serde(default = "default_substring_sizes")]
    pub substring_sizes: Vec<usize>,

    /// Similarity above which a benefit counts as mentioned
    #[serde(default = "default_benefit_similarity_threshold")]
    pub benefit_similarity_threshold: f64,

    /// Upper bound on scoring threads (0 = available parallelism)
    #[serde(default)]
    pub max_workers: usize,

    /// Secondary ordering for equal scores
    #[serde(default)]
    pub tie_break: TieBreak,

    /// Score contributed by each signal
    #[serde(default)]
    pub weights: WeightsConfig,

    /// Property-type synonym lists
    #[serde(default)]
    pub keywords: KeywordsConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            substring_sizes: default_substring_sizes(),
            benefit_similarity_threshold: default_benefit_similarity_threshold(),
            max_workers: 0,
            tie_break: TieBreak::default(),
            weights: WeightsConfig::default(),
            keywords: KeywordsConfig::default(),
        }
    }
}

impl SearchConfig {
    /// Validate the search section
    pub fn validate(&self) -> Result<()> {
        let mut validator = Validator::new()
            .non_empty("search.substring_sizes", &self.substring_sizes)
            .range(
                "search.benefit_similarity_threshold",
                self.benefit_similarity_threshold,
                0.0,
                1.0,
            )
            .keywords("search.keywords.hotel", &self.keywords.hotel)
            .keywords("search.keywords.homestay", &self.keywords.homestay)
            .keywords("search.keywords.villa", &self.keywords.villa);

        for size in &self.substring_sizes {
            validator = validator.range("search.substring_sizes", *size, 1, 16);
        }

        let w = &self.weights;
        let weights = [
            ("search.weights.name", w.name),
            ("search.weights.kind", w.kind),
            ("search.weights.rating", w.rating),
            ("search.weights.province", w.province),
            ("search.weights.district", w.district),
            ("search.weights.ward", w.ward),
            ("search.weights.benefit", w.benefit),
            ("search.weights.benefit_cap", w.benefit_cap),
        ];
        for (field, weight) in weights {
            validator = validator.range(field, weight, 0, MAX_WEIGHT);
        }

        validator.validate()
    }
}

/// Upper bound for any single configured weight
pub const MAX_WEIGHT: u32 = 1000;

fn default_substring_sizes() -> Vec<usize> {
    vec![2, 3, 4]
}

fn default_benefit_similarity_threshold() -> f64 {
    0.7
}

/// Score weights per signal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightsConfig {
    /// Query names this accommodation
    #[serde(default = "default_name_weight")]
    pub name: u32,
    /// Query mentions the accommodation type
    #[serde(default = "default_kind_weight")]
    pub kind: u32,
    /// Query mentions the star rating
    #[serde(default = "default_rating_weight")]
    pub rating: u32,
    /// Query names the province
    #[serde(default = "default_province_weight")]
    pub province: u32,
    /// Query names the district
    #[serde(default = "default_district_weight")]
    pub district: u32,
    /// Query names the ward
    #[serde(default = "default_ward_weight")]
    pub ward: u32,
    /// Each benefit mentioned by the query
    #[serde(default = "default_benefit_weight")]
    pub benefit: u32,
    /// Ceiling for the summed benefit contribution
    #[serde(default = "default_benefit_cap")]
    pub benefit_cap: u32,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            name: default_name_weight(),
            kind: default_kind_weight(),
            rating: default_rating_weight(),
            province: default_province_weight(),
            district: default_district_weight(),
            ward: default_ward_weight(),
            benefit: default_benefit_weight(),
            benefit_cap: default_benefit_cap(),
        }
    }
}

impl WeightsConfig {
    /// Highest score a candidate can reach with these weights
    pub fn max_score(&self) -> u32 {
        [self.kind, self.rating, self.province, self.district, self.ward, self.benefit_cap]
            .into_iter()
            .fold(self.name, u32::saturating_add)
    }
}

fn default_name_weight() -> u32 {
    30
}

fn default_kind_weight() -> u32 {
    20
}

fn default_rating_weight() -> u32 {
    15
}

fn default_province_weight() -> u32 {
    13
}

fn default_district_weight() -> u32 {
    8
}

fn default_ward_weight() -> u32 {
    1
}

fn default_benefit_weight() -> u32 {
    4
}

fn default_benefit_cap() -> u32 {
    12
}

/// Property-type synonym lists, matched in the order hotel, homestay, villa
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordsConfig {
    /// Hotel synonyms
    #[serde(default = "default_hotel_keywords")]
    pub hotel: Vec<String>,
    /// Homestay synonyms
    #[serde(default = "default_homestay_keywords")]
    pub homestay: Vec<String>,
    /// Villa synonyms
    #[serde(default = "default_villa_keywords")]
    pub villa: Vec<String>,
}

impl Default for KeywordsConfig {
    fn default() -> Self {
        Self {
            hotel: default_hotel_keywords(),
            homestay: default_homestay_keywords(),
            villa: default_villa_keywords(),
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn default_hotel_keywords() -> Vec<String> {
    strings(&["khách sạn", "hotel", "khach san", "ks"])
}

fn default_homestay_keywords() -> Vec<String> {
    strings(&["homestay", "căn hộ", "nhà", "nhà nguyên căn", "can ho"])
}

fn default_villa_keywords() -> Vec<String> {
    strings(&["villa", "biệt thự", "nhà nguyên căn"])
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of the compact format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
