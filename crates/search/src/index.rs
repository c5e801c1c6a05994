//! Approximate "closest known value" lookup over a fixed set of strings.
//!
//! Values and queries are split into overlapping character substrings
//! (2, 3 and 4 characters by default). Every substring a query shares with a
//! value earns that value `1 + 1000 / len(value) + 1000 / n`, where `n` is
//! how many values contain the substring, so short values and rare
//! substrings weigh more. The best total wins.
//!
//! An index is immutable once built and can be shared across scoring threads.

use crate::model::Candidate;
use crate::normalize::normalize;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Substring index answering [`MatchIndex::closest`].
#[derive(Debug, Clone, Default)]
pub struct MatchIndex {
    values: Vec<String>,
    lengths: Vec<usize>,
    substring_sizes: Vec<usize>,
    postings: HashMap<String, Vec<usize>>,
}

impl MatchIndex {
    /// Build an index over `values`.
    ///
    /// Values are normalized; empty values and duplicates are dropped.
    pub fn new<I, S>(values: I, substring_sizes: &[usize]) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let values: Vec<String> = values
            .into_iter()
            .map(|v| normalize(v.as_ref()))
            .filter(|v| !v.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut postings: HashMap<String, Vec<usize>> = HashMap::new();
        for (id, value) in values.iter().enumerate() {
            for substring in substrings(value, substring_sizes) {
                postings.entry(substring).or_default().push(id);
            }
        }

        let lengths = values.iter().map(|v| v.chars().count()).collect();

        Self {
            values,
            lengths,
            substring_sizes: substring_sizes.to_vec(),
            postings,
        }
    }

    /// Build an index over the distinct values of one candidate field.
    pub fn from_field<F>(corpus: &[Candidate], field: F, substring_sizes: &[usize]) -> Self
    where
        F: Fn(&Candidate) -> &str,
    {
        Self::new(corpus.iter().map(field), substring_sizes)
    }

    /// The known value nearest to an already-normalized `query`.
    ///
    /// Returns `None` when the index is empty or no value shares a substring
    /// with the query. Equal totals resolve to the alphabetically first value.
    pub fn closest(&self, query: &str) -> Option<&str> {
        if self.values.is_empty() {
            return None;
        }

        let mut totals = vec![0usize; self.values.len()];
        for substring in substrings(query, &self.substring_sizes) {
            if let Some(ids) = self.postings.get(&substring) {
                let rarity = 1000 / ids.len();
                for &id in ids {
                    totals[id] += 1 + 1000 / self.lengths[id] + rarity;
                }
            }
        }

        let mut best: Option<(usize, usize)> = None;
        for (id, &total) in totals.iter().enumerate() {
            if total > 0 && best.is_none_or(|(_, top)| total > top) {
                best = Some((id, total));
            }
        }

        best.map(|(id, _)| self.values[id].as_str())
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the index holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Distinct normalized values, sorted.
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// Overlapping substrings of each size, skipping whitespace-only ones.
///
/// Text shorter than every size is its own single substring.
fn substrings(text: &str, sizes: &[usize]) -> HashSet<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = HashSet::new();

    for &size in sizes {
        if size == 0 || size > chars.len() {
            continue;
        }
        for window in chars.windows(size) {
            if window.iter().all(|c| c.is_whitespace()) {
                continue;
            }
            out.insert(window.iter().collect());
        }
    }

    if out.is_empty() && !text.trim().is_empty() {
        out.insert(text.to_string());
    }

    out
}

/// The four per-corpus indexes shared by every candidate in one request.
#[derive(Debug, Clone, Default)]
pub struct CorpusIndexes {
    /// Distinct provinces
    pub province: MatchIndex,
    /// Distinct districts
    pub district: MatchIndex,
    /// Distinct wards
    pub ward: MatchIndex,
    /// Distinct accommodation names
    pub name: MatchIndex,
}

impl CorpusIndexes {
    /// Index the location and name fields of `corpus`.
    pub fn build(corpus: &[Candidate], substring_sizes: &[usize]) -> Self {
        Self {
            province: MatchIndex::from_field(corpus, |c| &c.province, substring_sizes),
            district: MatchIndex::from_field(corpus, |c| &c.district, substring_sizes),
            ward: MatchIndex::from_field(corpus, |c| &c.ward, substring_sizes),
            name: MatchIndex::from_field(corpus, |c| &c.name, substring_sizes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZES: &[usize] = &[2, 3, 4];

    fn provinces() -> MatchIndex {
        MatchIndex::new(["Đà Nẵng", "Hà Nội", "Hồ Chí Minh", "Đà Lạt", "Hà Nội", ""], SIZES)
    }

    #[test]
    fn test_values_are_normalized_and_distinct() {
        let index = provinces();
        assert_eq!(index.len(), 4);
        assert_eq!(index.values(), &["da lat", "da nang", "ha noi", "ho chi minh"]);
    }

    #[test]
    fn test_closest_picks_mentioned_value() {
        let index = provinces();
        assert_eq!(index.closest("khach san 3 sao da nang"), Some("da nang"));
        assert_eq!(index.closest("homestay ha noi"), Some("ha noi"));
    }

    #[test]
    fn test_closest_tolerates_typos() {
        let index = provinces();
        assert_eq!(index.closest("ho chi mnh"), Some("ho chi minh"));
    }

    #[test]
    fn test_closest_empty_index() {
        let index = MatchIndex::new(Vec::<String>::new(), SIZES);
        assert!(index.is_empty());
        assert_eq!(index.closest("da nang"), None);
    }

    #[test]
    fn test_closest_no_shared_substring() {
        let index = provinces();
        assert_eq!(index.closest("xyz"), None);
        assert_eq!(index.closest(""), None);
    }

    #[test]
    fn test_short_value_indexed_whole() {
        let index = MatchIndex::new(["a", "villa"], SIZES);
        assert_eq!(index.closest("a"), Some("a"));
    }

    #[test]
    fn test_ties_resolve_alphabetically() {
        let index = MatchIndex::new(["zz", "yy"], SIZES);
        // each value shares exactly one equally weighted substring
        assert_eq!(index.closest("yy zz"), Some("yy"));
    }

    #[test]
    fn test_corpus_indexes_skip_empty_fields() {
        let corpus = vec![
            Candidate { id: 1, province: "Đà Nẵng".into(), ..Default::default() },
            Candidate { id: 2, name: "Villa Sen".into(), ..Default::default() },
        ];
        let indexes = CorpusIndexes::build(&corpus, SIZES);
        assert_eq!(indexes.province.len(), 1);
        assert_eq!(indexes.name.len(), 1);
        assert!(indexes.ward.is_empty());
    }
}
