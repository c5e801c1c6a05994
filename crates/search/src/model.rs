//! Accommodation records as handed over by the listing service.
//!
//! Field names follow the listing service's JSON (`type`, `num`, `numBed`).

use crate::error::SearchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum AccommodationType {
    /// Hotel (code 0)
    Hotel = 0,
    /// Homestay or apartment (code 1)
    Homestay = 1,
    /// Villa (code 2)
    Villa = 2,
}

impl AccommodationType {
    /// All types, in the priority order used when a query mentions several.
    pub const PRIORITY: [AccommodationType; 3] = [Self::Hotel, Self::Homestay, Self::Villa];

    /// Lowercase label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Hotel => "hotel",
            Self::Homestay => "homestay",
            Self::Villa => "villa",
        }
    }
}

impl TryFrom<u8> for AccommodationType {
    type Error = SearchError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Hotel),
            1 => Ok(Self::Homestay),
            2 => Ok(Self::Villa),
            other => Err(SearchError::UnknownAccommodationType(other.to_string())),
        }
    }
}

impl From<AccommodationType> for u8 {
    fn from(kind: AccommodationType) -> Self {
        kind as u8
    }
}

impl FromStr for AccommodationType {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "hotel" => Ok(Self::Hotel),
            "1" | "homestay" => Ok(Self::Homestay),
            "2" | "villa" => Ok(Self::Villa),
            _ => Err(SearchError::UnknownAccommodationType(s.to_string())),
        }
    }
}

impl fmt::Display for AccommodationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An amenity offered by an accommodation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Benefit {
    /// Benefit id
    #[serde(default)]
    pub id: u64,
    /// Display name, e.g. "Hồ bơi"
    #[serde(default)]
    pub name: String,
}

impl Benefit {
    /// Creates a benefit.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

/// One accommodation record, read-only to the engine.
///
/// Every field except `id` may be missing; a missing field simply never
/// contributes to a score.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Accommodation id
    pub id: u64,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Property kind
    #[serde(rename = "type", default)]
    pub kind: Option<AccommodationType>,
    /// Star category
    #[serde(rename = "num", default)]
    pub star_category: Option<u32>,
    /// Province or city
    #[serde(default)]
    pub province: String,
    /// District
    #[serde(default)]
    pub district: String,
    /// Ward
    #[serde(default)]
    pub ward: String,
    /// Amenities, in listing order
    #[serde(default)]
    pub benefits: Vec<Benefit>,
    /// Listing status code
    #[serde(default)]
    pub status: i32,
    /// Guest capacity
    #[serde(default)]
    pub people: u32,
    /// Number of beds
    #[serde(default)]
    pub num_bed: u32,
    /// Number of bathrooms
    #[serde(default)]
    pub num_tolet: u32,
}
