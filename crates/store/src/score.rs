//! Keyword-overlap scoring.
//!
//! Similarity is the Jaccard index over lowercase whitespace-delimited
//! token sets. Single pass, no stemming, no stop-word handling: the corpus
//! is small enough that recomputing token sets per query is fine.

use std::collections::HashSet;

/// Jaccard similarity between the token sets of two texts.
///
/// `|intersection| / |union|`, defined as 0.0 when the union is empty
/// (both texts tokenize to nothing).
pub(crate) fn jaccard(a: &str, b: &str) -> f64 {
    let a_tokens = token_set(a);
    let b_tokens = token_set(b);

    let union = a_tokens.union(&b_tokens).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = a_tokens.intersection(&b_tokens).count();
    intersection as f64 / union as f64
}

/// Lowercase whitespace-delimited tokens of `text`.
fn token_set(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_texts_score_one() {
        assert!((jaccard("annual leave", "annual leave") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn disjoint_texts_score_zero() {
        assert_eq!(jaccard("alpha beta", "gamma delta"), 0.0);
    }

    #[test]
    fn both_empty_score_zero() {
        assert_eq!(jaccard("", ""), 0.0);
        assert_eq!(jaccard("   ", "\t\n"), 0.0);
    }

    #[test]
    fn one_empty_scores_zero() {
        assert_eq!(jaccard("", "some document text"), 0.0);
        assert_eq!(jaccard("a query", ""), 0.0);
    }

    #[test]
    fn case_insensitive() {
        assert!((jaccard("Annual LEAVE", "annual leave") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_overlap_exact_value() {
        // tokens {a, b} vs {b, c}: intersection 1, union 3
        let score = jaccard("a b", "b c");
        assert!((score - 1.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn repeated_tokens_count_once() {
        // sets collapse repeats: {a} vs {a} is a perfect match
        assert!((jaccard("a a a", "a") - 1.0).abs() < f64::EPSILON);
    }
}
