//! Supporting terms for a score.
//!
//! Given a [`VectorSpace`] built from `(resume, job description)`, reports
//! which shared terms drive the similarity and which job-description terms
//! the resume lacks.

use serde::Serialize;
use std::cmp::Ordering;

use crate::vectorize::VectorSpace;

/// A term present in both documents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermContribution {
    pub term: String,
    pub weight_a: f64,
    pub weight_b: f64,
    /// `weight_a × weight_b`, this term's share of the dot product.
    pub contribution: f64,
}

/// A term present only in the second document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermWeight {
    pub term: String,
    pub weight: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchExplanation {
    /// Shared terms, largest contribution first.
    pub shared_terms: Vec<TermContribution>,
    /// Terms of document B missing from document A, heaviest first.
    pub missing_terms: Vec<TermWeight>,
}

/// Explain a vector space, keeping at most `limit` terms per list.
///
/// Ties are broken by term so output is stable.
pub fn explain(space: &VectorSpace, limit: usize) -> MatchExplanation {
    let mut shared_terms: Vec<TermContribution> = space
        .terms()
        .filter(|(_, a, b)| *a > 0.0 && *b > 0.0)
        .map(|(term, a, b)| TermContribution {
            term: term.to_string(),
            weight_a: a,
            weight_b: b,
            contribution: a * b,
        })
        .collect();
    shared_terms.sort_by(|x, y| by_weight_then_term(x.contribution, &x.term, y.contribution, &y.term));
    shared_terms.truncate(limit);

    let mut missing_terms: Vec<TermWeight> = space
        .terms()
        .filter(|(_, a, b)| *a == 0.0 && *b > 0.0)
        .map(|(term, _, b)| TermWeight {
            term: term.to_string(),
            weight: b,
        })
        .collect();
    missing_terms.sort_by(|x, y| by_weight_then_term(x.weight, &x.term, y.weight, &y.term));
    missing_terms.truncate(limit);

    MatchExplanation {
        shared_terms,
        missing_terms,
    }
}

fn by_weight_then_term(wx: f64, tx: &str, wy: f64, ty: &str) -> Ordering {
    wy.partial_cmp(&wx)
        .unwrap_or(Ordering::Equal)
        .then_with(|| tx.cmp(ty))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use crate::vectorize::vectorize_pair;

    fn space(a: &str, b: &str) -> VectorSpace {
        vectorize_pair(&normalize(a).join(), &normalize(b).join()).unwrap()
    }

    fn shared(e: &MatchExplanation) -> Vec<&str> {
        e.shared_terms.iter().map(|t| t.term.as_str()).collect()
    }

    fn missing(e: &MatchExplanation) -> Vec<&str> {
        e.missing_terms.iter().map(|t| t.term.as_str()).collect()
    }

    #[test]
    fn reports_shared_and_missing_terms() {
        let s = space(
            "Experienced software engineer skilled in Python and distributed systems",
            "Looking for a software engineer with distributed systems experience",
        );
        let e = explain(&s, 10);
        assert_eq!(
            shared(&e),
            vec!["distributed", "engineer", "software", "systems"]
        );
        assert_eq!(missing(&e), vec!["experience", "looking"]);
    }

    #[test]
    fn repeated_terms_contribute_more() {
        let s = space("rust rust rust go", "rust go");
        let e = explain(&s, 10);
        assert_eq!(shared(&e), vec!["rust", "go"]);
        assert_eq!(e.shared_terms[0].contribution, 3.0);
        assert!(e.missing_terms.is_empty());
    }

    #[test]
    fn limit_truncates_both_lists() {
        let s = space("alpha beta gamma", "alpha beta gamma delta epsilon");
        let e = explain(&s, 1);
        assert_eq!(shared(&e), vec!["alpha"]);
        assert_eq!(missing(&e), vec!["delta"]);
    }

    #[test]
    fn disjoint_pair_has_no_shared_terms() {
        let s = space("pastry chef", "backend engineer");
        let e = explain(&s, 5);
        assert!(e.shared_terms.is_empty());
        assert_eq!(missing(&e), vec!["backend", "engineer"]);
    }
}
