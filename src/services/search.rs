//! Fuzzy currency search with additive relevance scoring.
//!
//! A pure function of (query, catalog): every applicable bonus from the
//! scoring table is summed per record, records with a zero score are
//! dropped, and ties keep catalog order. The same query against the
//! same catalog always yields the same ordering.

use crate::domain::models::currency::CurrencyRecord;

/// Result cap for a non-empty query.
const MAX_RESULTS: usize = 8;

/// Number of records returned, unscored, for an empty query.
const DEFAULT_RESULTS: usize = 10;

/// Two-letter abbreviation expansions: a query equal to the key scores
/// any record whose code, name, or country contains one of the terms.
const SMART_ABBREVIATIONS: &[(&str, &[&str])] = &[
    ("us", &["usd", "united states", "america", "dollar"]),
    ("eu", &["eur", "euro", "europe"]),
    ("uk", &["gbp", "british", "pound", "england"]),
    ("jp", &["jpy", "japan", "yen"]),
    ("cn", &["cny", "china", "yuan"]),
    ("au", &["aud", "australia", "australian"]),
    ("ca", &["cad", "canada", "canadian"]),
    ("sg", &["sgd", "singapore"]),
    ("in", &["inr", "india", "rupee"]),
    ("kr", &["krw", "korea", "won"]),
    ("br", &["brl", "brazil", "real"]),
    ("ru", &["rub", "russia", "ruble"]),
    ("ch", &["chf", "switzerland", "franc"]),
    ("se", &["sek", "sweden", "krona"]),
    ("no", &["nok", "norway", "krone"]),
    ("dk", &["dkk", "denmark", "krone"]),
    ("mx", &["mxn", "mexico", "peso"]),
    ("tr", &["try", "turkey", "lira"]),
    ("za", &["zar", "south africa", "rand"]),
    ("th", &["thb", "thailand", "baht"]),
    ("my", &["myr", "malaysia", "ringgit"]),
    ("id", &["idr", "indonesia", "rupiah"]),
    ("ph", &["php", "philippines", "peso"]),
    ("vn", &["vnd", "vietnam", "dong"]),
    ("hk", &["hkd", "hong kong"]),
    ("tw", &["twd", "taiwan"]),
    ("nz", &["nzd", "new zealand"]),
    ("il", &["ils", "israel", "shekel"]),
    ("ae", &["aed", "uae", "dirham"]),
    ("sa", &["sar", "saudi", "riyal"]),
];

/// Phonetic keywords: each key contained in the query scores records
/// whose code, name, or country contains one of the mapped terms.
const PHONETIC_KEYWORDS: &[(&str, &[&str])] = &[
    ("dollar", &["usd", "us", "america"]),
    ("euro", &["eur", "eu", "europe"]),
    ("pound", &["gbp", "uk", "british"]),
    ("yen", &["jpy", "jp", "japan"]),
    ("yuan", &["cny", "cn", "china"]),
    ("rupee", &["inr", "in", "india"]),
    ("won", &["krw", "kr", "korea"]),
    ("franc", &["chf", "ch", "switzerland"]),
    ("krona", &["sek", "se", "sweden"]),
    ("peso", &["mxn", "mx", "mexico"]),
];

/// A catalog record paired with its per-query relevance score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredMatch {
    /// The matched currency.
    pub currency: CurrencyRecord,
    /// Additive relevance score; zero for empty-query listings.
    pub score: u32,
}

/// Compute the relevance score of one record for a query.
pub fn score(record: &CurrencyRecord, query: &str) -> u32 {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return 0;
    }

    let code = record.code.to_lowercase();
    let name = record.name.to_lowercase();
    let country = record.country.to_lowercase();

    let mut total = 0;

    // Exact matches rank highest.
    if code == q {
        total += 100;
    }
    if name == q {
        total += 90;
    }
    if country == q {
        total += 85;
    }

    if code.starts_with(&q) {
        total += 80;
    }
    if name.starts_with(&q) {
        total += 70;
    }
    if country.starts_with(&q) {
        total += 65;
    }

    if code.contains(&q) {
        total += 60;
    }
    if name.contains(&q) {
        total += 50;
    }
    if country.contains(&q) {
        total += 45;
    }

    let field_contains =
        |term: &str| code.contains(term) || name.contains(term) || country.contains(term);

    if let Some((_, terms)) = SMART_ABBREVIATIONS.iter().find(|(key, _)| *key == q) {
        if terms.iter().any(|term| field_contains(term)) {
            total += 75;
        }
    }

    for (keyword, terms) in PHONETIC_KEYWORDS {
        if q.contains(keyword) && terms.iter().any(|term| field_contains(term)) {
            total += 40;
        }
    }

    // Partial word matching for multi-word queries.
    for word in q.split_whitespace() {
        if word.len() > 2 && (name.contains(word) || country.contains(word)) {
            total += 30;
        }
    }

    total
}

/// Rank the catalog against a free-text query.
///
/// An empty or blank query returns the first 10 records in catalog
/// order; otherwise at most 8 scored records, sorted by descending
/// score with ties in catalog order.
pub fn search(catalog: &[CurrencyRecord], query: &str) -> Vec<ScoredMatch> {
    if query.trim().is_empty() {
        return catalog
            .iter()
            .take(DEFAULT_RESULTS)
            .map(|currency| ScoredMatch {
                currency: currency.clone(),
                score: 0,
            })
            .collect();
    }

    let mut matches: Vec<ScoredMatch> = catalog
        .iter()
        .map(|currency| ScoredMatch {
            currency: currency.clone(),
            score: score(currency, query),
        })
        .filter(|m| m.score > 0)
        .collect();

    // Stable sort keeps catalog order for equal scores.
    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches.truncate(MAX_RESULTS);
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::currency::builtin_catalog;

    #[test]
    fn test_empty_query_lists_first_ten() {
        let catalog = builtin_catalog();
        let results = search(&catalog, "");

        assert_eq!(results.len(), 10);
        for (result, expected) in results.iter().zip(catalog.iter()) {
            assert_eq!(result.currency, *expected);
            assert_eq!(result.score, 0);
        }

        let blank = search(&catalog, "   ");
        assert_eq!(blank.len(), 10);
    }

    #[test]
    fn test_us_query_ranks_usd_first() {
        let catalog = builtin_catalog();
        let results = search(&catalog, "us");

        assert_eq!(results[0].currency.code, "USD");
        // code "usd" starts with and contains "us", country "us" is an
        // exact match, name "us dollar" starts with it, and the smart
        // abbreviation adds its bonus on top.
        assert_eq!(results[0].score, 80 + 60 + 85 + 65 + 45 + 70 + 50 + 75);
    }

    #[test]
    fn test_exact_code_match_score() {
        let catalog = builtin_catalog();
        let jpy = catalog.iter().find(|c| c.code == "JPY").expect("JPY");

        // exact + starts-with + contains on the code field only.
        assert_eq!(score(jpy, "jpy"), 100 + 80 + 60);
        assert_eq!(score(jpy, "JPY"), 100 + 80 + 60);
    }

    #[test]
    fn test_phonetic_keyword_matches() {
        let catalog = builtin_catalog();
        let chf = catalog.iter().find(|c| c.code == "CHF").expect("CHF");

        // "franc" is contained in the name, counts as a word match, and
        // the phonetic table maps it onto CHF.
        let franc_score = score(chf, "franc");
        assert_eq!(franc_score, 50 + 40 + 30);
    }

    #[test]
    fn test_multi_word_query_scores_per_word() {
        let record = CurrencyRecord::new("NZD", "New Zealand Dollar", "nz");
        // "new zealand" as a whole matches the name (starts-with +
        // contains), then each word longer than two chars adds 30.
        assert_eq!(score(&record, "new zealand"), 70 + 50 + 30 + 30);
    }

    #[test]
    fn test_results_capped_at_eight_and_sorted() {
        let catalog = builtin_catalog();
        // "a" substring-matches far more than eight records.
        let results = search(&catalog, "a");

        assert!(results.len() <= 8);
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_search_is_deterministic() {
        let catalog = builtin_catalog();
        let first = search(&catalog, "us");
        let second = search(&catalog, "us");
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_match_returns_empty() {
        let catalog = builtin_catalog();
        assert!(search(&catalog, "zzzz").is_empty());
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let catalog = vec![
            CurrencyRecord::new("SEK", "Swedish Krona", "se"),
            CurrencyRecord::new("NOK", "Norwegian Krone", "no"),
            CurrencyRecord::new("DKK", "Danish Krone", "dk"),
        ];
        // "kron" scores NOK and DKK identically; SEK's "krona" also
        // contains it. Equal-scored entries must not be reordered.
        let results = search(&catalog, "kron");
        let codes: Vec<&str> = results.iter().map(|m| m.currency.code.as_str()).collect();
        assert_eq!(codes, vec!["SEK", "NOK", "DKK"]);
    }
}
