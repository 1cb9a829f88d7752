//! Property-based tests for the currency search scorer.

use kconvert::builtin_catalog;
use kconvert::services::search::{score, search};
use proptest::prelude::*;

proptest! {
    /// Result size honors the caps: 10 unscored records for a blank
    /// query, at most 8 otherwise.
    #[test]
    fn search_respects_result_caps(query in ".{0,40}") {
        let catalog = builtin_catalog();
        let results = search(&catalog, &query);

        if query.trim().is_empty() {
            prop_assert_eq!(results.len(), 10);
        } else {
            prop_assert!(results.len() <= 8);
        }
    }

    /// Non-empty results are sorted by descending score and every
    /// returned record scored above zero.
    #[test]
    fn search_results_sorted_descending(query in ".{1,40}") {
        let catalog = builtin_catalog();
        let results = search(&catalog, &query);

        if !query.trim().is_empty() {
            for m in &results {
                prop_assert!(m.score > 0);
            }
        }
        for pair in results.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }

    /// The same query against the same catalog always yields the same
    /// ordered list.
    #[test]
    fn search_is_deterministic(query in ".{0,40}") {
        let catalog = builtin_catalog();
        prop_assert_eq!(search(&catalog, &query), search(&catalog, &query));
    }

    /// Scoring is insensitive to case and surrounding whitespace.
    #[test]
    fn score_ignores_case_and_padding(query in "[a-zA-Z ]{1,20}") {
        let catalog = builtin_catalog();
        let padded = format!("  {}  ", query.to_uppercase());
        for record in &catalog {
            prop_assert_eq!(score(record, &query), score(record, &padded));
        }
    }
}
