//! Structured hints read out of a free-text query.
//!
//! Two hints are recognised: the property type ("khách sạn", "villa", ...)
//! and the star rating ("3 sao").

use crate::index::MatchIndex;
use crate::model::AccommodationType;
use crate::normalize::normalize;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use staybook_core::config::KeywordsConfig;

/// An ASCII integer followed by the star unit, on normalized text.
static RATING_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9]+)\s*sao").unwrap());

/// What the interpreter understood from a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedQuery {
    /// Normalized query text
    pub normalized: String,
    /// Property type mentioned by the query
    pub kind: Option<AccommodationType>,
    /// Star rating mentioned by the query, only kept alongside a type
    pub rating: Option<u32>,
}

impl ParsedQuery {
    /// True when the query has no text left after normalization.
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}

/// Extract the star rating from normalized text, e.g. `"ks 4 sao"` gives 4.
pub fn extract_rating(normalized: &str) -> Option<u32> {
    RATING_PATTERN
        .captures(normalized)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Detects property type and star rating.
///
/// Holds one synonym index per type, built once and reused for every query.
#[derive(Debug, Clone)]
pub struct QueryInterpreter {
    categories: Vec<(AccommodationType, MatchIndex)>,
}

impl QueryInterpreter {
    /// Build the synonym indexes.
    pub fn new(keywords: &KeywordsConfig, substring_sizes: &[usize]) -> Self {
        let categories = AccommodationType::PRIORITY
            .into_iter()
            .map(|kind| {
                let synonyms = match kind {
                    AccommodationType::Hotel => &keywords.hotel,
                    AccommodationType::Homestay => &keywords.homestay,
                    AccommodationType::Villa => &keywords.villa,
                };
                (kind, MatchIndex::new(synonyms, substring_sizes))
            })
            .collect();

        Self { categories }
    }

    /// First type whose synonym list is empty once normalized.
    pub(crate) fn undetectable_kind(&self) -> Option<AccommodationType> {
        self.categories
            .iter()
            .find(|(_, index)| index.is_empty())
            .map(|(kind, _)| *kind)
    }

    /// Interpret a raw query.
    ///
    /// Types are tried hotel, homestay, villa; the first whose closest synonym
    /// literally occurs in the query wins, even when a later type matches
    /// better. Without a type, the rating is dropped too.
    pub fn parse(&self, query: &str) -> ParsedQuery {
        let normalized = normalize(query);

        match self.detect_kind(&normalized) {
            Some(kind) => {
                let rating = extract_rating(&normalized);
                ParsedQuery { normalized, kind: Some(kind), rating }
            }
            None => ParsedQuery { normalized, kind: None, rating: None },
        }
    }

    fn detect_kind(&self, normalized: &str) -> Option<AccommodationType> {
        self.categories.iter().find_map(|(kind, index)| {
            index
                .closest(normalized)
                .filter(|synonym| normalized.contains(synonym))
                .map(|_| *kind)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interpreter() -> QueryInterpreter {
        QueryInterpreter::new(&KeywordsConfig::default(), &[2, 3, 4])
    }

    #[test]
    fn test_extract_rating() {
        assert_eq!(extract_rating("khach san 3 sao"), Some(3));
        assert_eq!(extract_rating("5sao da nang"), Some(5));
        assert_eq!(extract_rating("khach san da nang"), None);
        assert_eq!(extract_rating("99999999999999999999 sao"), None);
    }

    #[test]
    fn test_extract_rating_ascii_digits_only() {
        assert_eq!(extract_rating("\u{0663}5 sao"), Some(5));
        assert_eq!(extract_rating("\u{0663} sao"), None);
    }

    #[test]
    fn test_hotel_with_rating() {
        let parsed = interpreter().parse("Khách sạn 3 sao Đà Nẵng");
        assert_eq!(parsed.normalized, "khach san 3 sao da nang");
        assert_eq!(parsed.kind, Some(AccommodationType::Hotel));
        assert_eq!(parsed.rating, Some(3));
    }

    #[test]
    fn test_villa() {
        let parsed = interpreter().parse("Biệt thự Vũng Tàu");
        assert_eq!(parsed.kind, Some(AccommodationType::Villa));
        assert_eq!(parsed.rating, None);
    }

    #[test]
    fn test_homestay() {
        let parsed = interpreter().parse("homestay Sapa");
        assert_eq!(parsed.kind, Some(AccommodationType::Homestay));
    }

    #[test]
    fn test_hotel_wins_over_later_types() {
        let parsed = interpreter().parse("hotel hoac villa");
        assert_eq!(parsed.kind, Some(AccommodationType::Hotel));
    }

    #[test]
    fn test_shared_synonym_resolves_to_homestay() {
        // "nhà nguyên căn" is listed for both homestay and villa
        let parsed = interpreter().parse("Nhà nguyên căn Đà Lạt");
        assert_eq!(parsed.kind, Some(AccommodationType::Homestay));
    }

    #[test]
    fn test_rating_without_type_is_dropped() {
        let parsed = interpreter().parse("4 sao gan bien");
        assert_eq!(parsed.kind, None);
        assert_eq!(parsed.rating, None);
    }

    #[test]
    fn test_empty_query() {
        let parsed = interpreter().parse("   ");
        assert!(parsed.is_empty());
        assert_eq!(parsed.kind, None);
    }
}
