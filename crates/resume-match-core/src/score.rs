//! Cosine similarity scorer.
//!
//! Compares the two dense vectors of a [`VectorSpace`](crate::VectorSpace)
//! and maps the cosine onto a 0–100 [`SimilarityScore`].

use crate::models::SimilarityScore;

/// Compute cosine similarity between two weight vectors.
///
/// Returns a value in `[-1.0, 1.0]`:
/// - `1.0` = identical direction
/// - `0.0` = orthogonal (no shared terms)
/// - `-1.0` = opposite direction
///
/// Returns `0.0` for empty vectors, vectors of different lengths, or when
/// either vector has zero magnitude.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < f64::EPSILON {
        return 0.0;
    }

    dot / denom
}

/// Score two TF-IDF vectors as a percentage.
///
/// A document with no terms has zero magnitude and scores 0 against
/// anything. The result is clamped to `[0, 100]`.
pub fn score(vector_a: &[f64], vector_b: &[f64]) -> SimilarityScore {
    SimilarityScore::from_cosine(cosine_similarity(vector_a, vector_b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use crate::vectorize::vectorize_pair;

    fn score_texts(a: &str, b: &str) -> f64 {
        let space = vectorize_pair(&normalize(a).join(), &normalize(b).join()).unwrap();
        score(space.vector_a(), space.vector_b()).value()
    }

    #[test]
    fn test_cosine_identical() {
        let v = vec![1.0, 2.0, 3.0];
        let sim = cosine_similarity(&v, &v);
        assert!((sim - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        assert!(cosine_similarity(&a, &b).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_zero_magnitude() {
        let a = vec![0.0, 0.0];
        let b = vec![1.0, 2.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
        assert_eq!(score(&a, &b).value(), 0.0);
    }

    #[test]
    fn test_cosine_empty_and_mismatched() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0]), 0.0);
    }

    #[test]
    fn negative_cosine_clamps_to_zero() {
        assert_eq!(score(&[1.0, 0.0], &[-1.0, 0.0]).value(), 0.0);
    }

    #[test]
    fn self_pair_scores_one_hundred() {
        let text = "Rust engineer building distributed storage engines and query planners";
        assert!((score_texts(text, text) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn scoring_is_symmetric() {
        let a = "Backend engineer with Kafka and Postgres experience";
        let b = "We need a Postgres engineer comfortable with streaming";
        assert!((score_texts(a, b) - score_texts(b, a)).abs() < 1e-12);
    }

    #[test]
    fn overlapping_resume_and_job_score_well() {
        let resume = "Experienced software engineer skilled in Python and distributed systems";
        let job = "Looking for a software engineer with distributed systems experience";
        let s = score_texts(resume, job);
        // four shared terms out of seven and six
        assert!((s - 45.0).abs() < 0.5, "score was {s}");
        assert!(s > score_texts("Pastry chef with ten years baking experience", job));
    }

    #[test]
    fn disjoint_vocabularies_score_low() {
        let s = score_texts(
            "Pastry chef with ten years baking experience",
            "Senior backend engineer, cloud infrastructure",
        );
        assert!(s < 20.0, "score was {s}");
        assert_eq!(s, 0.0);
    }

    #[test]
    fn scores_stay_in_range() {
        let docs = [
            "rust rust rust",
            "go",
            "rust go python java",
            "distributed systems engineer",
            "",
        ];
        for a in docs {
            for b in docs {
                let (na, nb) = (normalize(a).join(), normalize(b).join());
                if let Ok(space) = vectorize_pair(&na, &nb) {
                    let s = score(space.vector_a(), space.vector_b()).value();
                    assert!((0.0..=100.0).contains(&s), "{a:?} vs {b:?} gave {s}");
                }
            }
        }
    }
}
