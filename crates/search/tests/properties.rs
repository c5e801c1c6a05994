//! Property tests for normalization, similarity and scoring bounds.

use proptest::prelude::*;
use staybook_search::{
    normalize, similarity, AccommodationType, Benefit, Candidate, SearchConfig, SearchEngine,
};

const VIETNAMESE_TEXT: &str = "[a-zA-Z0-9 àáạảãâầấậẩẫăằắặẳẵèéẹẻẽêềếệểễìíịỉĩòóọỏõôồốộổỗơờớợởỡùúụủũưừứựửữỳýỵỷỹđĐÀÁÂĂÊÔƠƯ]{0,30}";

fn kind_strategy() -> impl Strategy<Value = Option<AccommodationType>> {
    prop_oneof![
        Just(None),
        Just(Some(AccommodationType::Hotel)),
        Just(Some(AccommodationType::Homestay)),
        Just(Some(AccommodationType::Villa)),
    ]
}

prop_compose! {
    fn candidate_strategy()(
        id in 0u64..1000,
        name in VIETNAMESE_TEXT,
        kind in kind_strategy(),
        stars in proptest::option::of(0u32..6),
        province in VIETNAMESE_TEXT,
        district in VIETNAMESE_TEXT,
        ward in VIETNAMESE_TEXT,
        benefits in proptest::collection::vec(VIETNAMESE_TEXT, 0..8),
    ) -> Candidate {
        Candidate {
            id,
            name,
            kind,
            star_category: stars,
            province,
            district,
            ward,
            benefits: benefits
                .into_iter()
                .enumerate()
                .map(|(i, name)| Benefit::new(i as u64, name))
                .collect(),
            ..Default::default()
        }
    }
}

proptest! {
    #[test]
    fn normalize_is_idempotent(s in VIETNAMESE_TEXT) {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_output_is_ascii(s in VIETNAMESE_TEXT) {
        prop_assert!(normalize(&s).is_ascii());
    }

    #[test]
    fn similarity_with_self_is_one(s in VIETNAMESE_TEXT) {
        prop_assert_eq!(similarity(&s, &s), 1.0);
    }

    #[test]
    fn similarity_in_unit_range(a in VIETNAMESE_TEXT, b in VIETNAMESE_TEXT) {
        let s = similarity(&a, &b);
        prop_assert!((0.0..=1.0).contains(&s));
    }

    #[test]
    fn scores_bounded_and_ranking_sorted(
        query in VIETNAMESE_TEXT,
        corpus in proptest::collection::vec(candidate_strategy(), 0..12),
    ) {
        let engine = SearchEngine::new(SearchConfig { max_workers: 2, ..Default::default() }).unwrap();
        let max = engine.config().weights.max_score();
        let indexes = engine.indexes(&corpus);

        let results = engine.rank_with_indexes(&query, &corpus, &indexes);

        for pair in results.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
        for result in &results {
            prop_assert!(result.score > 0);
            prop_assert!(result.score <= max);
            prop_assert_eq!(engine.explain(&query, result.candidate, &indexes).total(), result.score);
        }
        for candidate in &corpus {
            let b = engine.explain(&query, candidate, &indexes);
            prop_assert!(b.total() <= 99);
            prop_assert_eq!(b.total(), engine.explain(&query, candidate, &indexes).total());
        }
    }
}
