//! Relevance scoring of one candidate against one query.
//!
//! The score is a sum of independent signals:
//!
//! | Signal    | Default | Awarded when                                         |
//! |-----------|---------|------------------------------------------------------|
//! | name      | 30      | the name index's closest value is this name          |
//! | kind      | 20      | the query mentions this property type                |
//! | rating    | 15      | the query mentions this star rating                  |
//! | province  | 13      | the province index's closest value is this province  |
//! | district  | 8       | same, district                                       |
//! | ward      | 1       | same, ward                                           |
//! | benefits  | 4 each  | a benefit is similar to or contained in the query, capped at 12 |

use crate::fuzzy::similarity;
use crate::index::CorpusIndexes;
use crate::model::{Benefit, Candidate};
use crate::normalize::normalize;
use crate::query::{ParsedQuery, QueryInterpreter};
use serde::Serialize;
use staybook_core::config::{SearchConfig, WeightsConfig};

/// Per-signal contributions to a score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    /// Name signal
    pub name: u32,
    /// Property type signal
    pub kind: u32,
    /// Star rating signal
    pub rating: u32,
    /// Province signal
    pub province: u32,
    /// District signal
    pub district: u32,
    /// Ward signal
    pub ward: u32,
    /// Capped benefit signal
    pub benefits: u32,
}

impl ScoreBreakdown {
    /// Sum of all signals.
    pub fn total(&self) -> u32 {
        [self.kind, self.rating, self.province, self.district, self.ward, self.benefits]
            .into_iter()
            .fold(self.name, u32::saturating_add)
    }
}

/// Candidate-independent view of a query: the parsed hints plus the closest
/// corpus value for each indexed field.
///
/// Computed once per request and shared by every scorer.
#[derive(Debug, Clone)]
pub struct QueryContext<'i> {
    /// Parsed hints
    pub parsed: ParsedQuery,
    name: Option<&'i str>,
    province: Option<&'i str>,
    district: Option<&'i str>,
    ward: Option<&'i str>,
}

impl<'i> QueryContext<'i> {
    /// Resolve the query against the corpus indexes.
    pub fn new(parsed: ParsedQuery, indexes: &'i CorpusIndexes) -> Self {
        let q = parsed.normalized.as_str();
        let name = indexes.name.closest(q);
        let province = indexes.province.closest(q);
        let district = indexes.district.closest(q);
        let ward = indexes.ward.closest(q);

        Self { parsed, name, province, district, ward }
    }
}

/// Applies the configured weights to a candidate.
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'c> {
    weights: &'c WeightsConfig,
    benefit_threshold: f64,
}

impl<'c> Scorer<'c> {
    /// Scorer using the weights and benefit threshold of `config`.
    pub fn new(config: &'c SearchConfig) -> Self {
        Self {
            weights: &config.weights,
            benefit_threshold: config.benefit_similarity_threshold,
        }
    }

    /// Score broken down by signal.
    pub fn breakdown(&self, ctx: &QueryContext<'_>, candidate: &Candidate) -> ScoreBreakdown {
        let w = self.weights;
        let parsed = &ctx.parsed;

        ScoreBreakdown {
            name: award(field_matches(ctx.name, &candidate.name), w.name),
            kind: award(parsed.kind.is_some() && parsed.kind == candidate.kind, w.kind),
            rating: award(
                parsed.rating.is_some() && parsed.rating == candidate.star_category,
                w.rating,
            ),
            province: award(field_matches(ctx.province, &candidate.province), w.province),
            district: award(field_matches(ctx.district, &candidate.district), w.district),
            ward: award(field_matches(ctx.ward, &candidate.ward), w.ward),
            benefits: self.benefit_score(&parsed.normalized, &candidate.benefits),
        }
    }

    /// Total score.
    pub fn score(&self, ctx: &QueryContext<'_>, candidate: &Candidate) -> u32 {
        self.breakdown(ctx, candidate).total()
    }

    /// Benefits in listing order, each worth `benefit` points, stopping at the cap.
    fn benefit_score(&self, query: &str, benefits: &[Benefit]) -> u32 {
        let cap = self.weights.benefit_cap;
        let mut total = 0;

        for benefit in benefits {
            if total >= cap {
                break;
            }
            let name = normalize(&benefit.name);
            if name.is_empty() {
                continue;
            }
            if similarity(query, &name) > self.benefit_threshold || query.contains(name.as_str()) {
                total = total.saturating_add(self.weights.benefit);
            }
        }

        total.min(cap)
    }
}

/// An index hit only counts for the candidate whose own value it is.
fn field_matches(closest: Option<&str>, value: &str) -> bool {
    closest.is_some_and(|hit| hit == normalize(value))
}

fn award(hit: bool, weight: u32) -> u32 {
    if hit { weight } else { 0 }
}

/// Score one candidate from scratch.
///
/// Convenience for single lookups; the ranker resolves the query once per
/// request instead.
pub fn score(
    query: &str,
    candidate: &Candidate,
    indexes: &CorpusIndexes,
    interpreter: &QueryInterpreter,
    config: &SearchConfig,
) -> u32 {
    let ctx = QueryContext::new(interpreter.parse(query), indexes);
    Scorer::new(config).score(&ctx, candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AccommodationType;

    fn config() -> SearchConfig {
        SearchConfig::default()
    }

    fn hotel_da_nang() -> Candidate {
        Candidate {
            id: 1,
            name: "Khách sạn Biển Xanh".into(),
            kind: Some(AccommodationType::Hotel),
            star_category: Some(3),
            province: "Đà Nẵng".into(),
            district: "Sơn Trà".into(),
            ward: "An Hải Bắc".into(),
            ..Default::default()
        }
    }

    fn corpus() -> Vec<Candidate> {
        vec![
            hotel_da_nang(),
            Candidate {
                id: 2,
                name: "Sapa Homestay".into(),
                kind: Some(AccommodationType::Homestay),
                province: "Lào Cai".into(),
                district: "Sa Pa".into(),
                ..Default::default()
            },
            Candidate {
                id: 3,
                name: "Villa Hoa Sen".into(),
                kind: Some(AccommodationType::Villa),
                province: "Hà Nội".into(),
                district: "Tây Hồ".into(),
                ..Default::default()
            },
        ]
    }

    fn score_of(query: &str, candidate: &Candidate, corpus: &[Candidate]) -> ScoreBreakdown {
        score_with(&config(), query, candidate, corpus)
    }

    fn score_with(config: &SearchConfig, query: &str, candidate: &Candidate, corpus: &[Candidate]) -> ScoreBreakdown {
        let indexes = CorpusIndexes::build(corpus, &config.substring_sizes);
        let interpreter = QueryInterpreter::new(&config.keywords, &config.substring_sizes);
        let ctx = QueryContext::new(interpreter.parse(query), &indexes);
        Scorer::new(config).breakdown(&ctx, candidate)
    }

    #[test]
    fn test_type_rating_province() {
        let corpus = corpus();
        let b = score_of("khách sạn 3 sao Đà Nẵng", &corpus[0], &corpus);

        assert_eq!(b.kind, 20);
        assert_eq!(b.rating, 15);
        assert_eq!(b.province, 13);
        assert!(b.total() >= 48);
    }

    #[test]
    fn test_unrelated_candidate_scores_zero() {
        let corpus = corpus();
        let b = score_of("khách sạn 3 sao Đà Nẵng", &corpus[2], &corpus);
        assert_eq!(b.kind, 0);
        assert_eq!(b.province, 0);
        assert_eq!(b.name, 0);
    }

    #[test]
    fn test_name_match() {
        let corpus = corpus();
        let b = score_of("villa hoa sen", &corpus[2], &corpus);
        assert_eq!(b.name, 30);
        assert_eq!(b.kind, 20);
    }

    #[test]
    fn test_benefit_contained_in_query() {
        let mut candidate = hotel_da_nang();
        candidate.benefits = vec![Benefit::new(1, "Hồ bơi"), Benefit::new(2, "Sân golf")];
        let corpus = vec![candidate.clone()];

        let b = score_of("khach san co ho boi", &candidate, &corpus);
        assert_eq!(b.benefits, 4);
    }

    #[test]
    fn test_benefit_cap() {
        let mut candidate = hotel_da_nang();
        candidate.benefits = ["wifi", "ho boi", "bai do xe", "gym", "spa"]
            .iter()
            .enumerate()
            .map(|(i, name)| Benefit::new(i as u64, *name))
            .collect();
        let corpus = vec![candidate.clone()];

        let b = score_of("wifi ho boi bai do xe gym spa", &candidate, &corpus);
        assert_eq!(b.benefits, 12);
    }

    #[test]
    fn test_benefit_cap_not_a_multiple_of_weight() {
        let mut config = config();
        config.weights.benefit = 5;
        let mut candidate = hotel_da_nang();
        candidate.benefits = ["wifi", "gym", "spa"]
            .iter()
            .enumerate()
            .map(|(i, name)| Benefit::new(i as u64, *name))
            .collect();
        let corpus = vec![candidate.clone()];

        let b = score_with(&config, "wifi gym spa", &candidate, &corpus);
        assert_eq!(b.benefits, 12);
    }

    #[test]
    fn test_huge_benefit_weights_saturate() {
        let mut config = config();
        config.weights.benefit = 3_000_000_000;
        config.weights.benefit_cap = u32::MAX;
        let mut candidate = hotel_da_nang();
        candidate.benefits = vec![Benefit::new(1, "wifi"), Benefit::new(2, "spa")];
        let corpus = vec![candidate.clone()];

        let b = score_with(&config, "wifi spa", &candidate, &corpus);
        assert_eq!(b.benefits, u32::MAX);
    }

    #[test]
    fn test_total_saturates() {
        let b = ScoreBreakdown { name: u32::MAX, province: 10, ..Default::default() };
        assert_eq!(b.total(), u32::MAX);
    }

    #[test]
    fn test_benefit_similar_to_whole_query() {
        let mut candidate = hotel_da_nang();
        candidate.benefits = vec![Benefit::new(1, "Hồ bơi")];
        let corpus = vec![candidate.clone()];

        // one typo in six characters keeps similarity above 0.7
        let b = score_of("ho boy", &candidate, &corpus);
        assert_eq!(b.benefits, 4);
    }

    #[test]
    fn test_empty_fields_never_match() {
        let blank = Candidate { id: 9, ..Default::default() };
        let corpus = vec![blank.clone(), hotel_da_nang()];

        let b = score_of("zzz qqq", &blank, &corpus);
        assert_eq!(b.total(), 0);
    }

    #[test]
    fn test_blank_benefit_ignored() {
        let mut candidate = hotel_da_nang();
        candidate.benefits = vec![Benefit::new(1, "   ")];
        let corpus = vec![candidate.clone()];

        let b = score_of("anything", &candidate, &corpus);
        assert_eq!(b.benefits, 0);
    }

    #[test]
    fn test_score_matches_breakdown_and_is_repeatable() {
        let config = config();
        let corpus = corpus();
        let indexes = CorpusIndexes::build(&corpus, &config.substring_sizes);
        let interpreter = QueryInterpreter::new(&config.keywords, &config.substring_sizes);

        let first = score("khách sạn Đà Nẵng", &corpus[0], &indexes, &interpreter, &config);
        let second = score("khách sạn Đà Nẵng", &corpus[0], &indexes, &interpreter, &config);
        let breakdown = score_of("khách sạn Đà Nẵng", &corpus[0], &corpus);

        assert_eq!(first, second);
        assert_eq!(first, breakdown.total());
    }
}
