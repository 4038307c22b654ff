//! Cosine similarity scoring
//!
//! Full cosine (not a bare dot product), so scores stay correct when a
//! provider's normalization is imperfect.

use crate::error::{Result, SearchError};

/// Cosine similarity between two vectors of equal length.
///
/// Fails with [`SearchError::DimensionMismatch`] when the lengths differ,
/// with [`SearchError::ZeroMagnitude`] when either vector has zero norm and
/// with [`SearchError::InvalidArgument`] when a component is NaN or infinite,
/// so a NaN never reaches the ranker. The result is clamped to `[-1, 1]`.
pub fn cosine_similarity(p: &[f32], q: &[f32]) -> Result<f32> {
    if p.len() != q.len() {
        return Err(SearchError::DimensionMismatch {
            left: p.len(),
            right: q.len(),
        });
    }

    let mut dot = 0.0_f64;
    let mut norm_p = 0.0_f64;
    let mut norm_q = 0.0_f64;
    for (&a, &b) in p.iter().zip(q) {
        let (a, b) = (f64::from(a), f64::from(b));
        dot += a * b;
        norm_p += a * a;
        norm_q += b * b;
    }

    if !(dot.is_finite() && norm_p.is_finite() && norm_q.is_finite()) {
        return Err(SearchError::invalid_argument(
            "vector has a non-finite component",
        ));
    }
    if norm_p == 0.0 || norm_q == 0.0 {
        return Err(SearchError::ZeroMagnitude);
    }

    let similarity = dot / (norm_p.sqrt() * norm_q.sqrt());
    Ok(similarity.clamp(-1.0, 1.0) as f32)
}

/// Euclidean norm of a vector
pub fn l2_norm(v: &[f32]) -> f32 {
    v.iter()
        .map(|&x| f64::from(x) * f64::from(x))
        .sum::<f64>()
        .sqrt() as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity_identical() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &b).unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        assert!(cosine_similarity(&a, &b).unwrap().abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_opposite() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![-1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &b).unwrap() + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_self_similarity_unnormalized() {
        let p = vec![3.0, -4.5, 12.25, 0.001];
        assert!((cosine_similarity(&p, &p).unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_symmetric_and_deterministic() {
        let p = vec![0.3, 0.1, -0.7, 2.0];
        let q = vec![1.5, -0.2, 0.4, 0.9];
        let pq = cosine_similarity(&p, &q).unwrap();
        let qp = cosine_similarity(&q, &p).unwrap();
        assert_eq!(pq, qp);
        assert_eq!(pq, cosine_similarity(&p, &q).unwrap());
        assert!((-1.0..=1.0).contains(&pq));
    }

    #[test]
    fn test_scale_invariant() {
        let p = vec![1.0, 2.0, 3.0];
        let q = vec![2.0, 4.0, 6.0];
        assert!((cosine_similarity(&p, &q).unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = cosine_similarity(&[1.0, 2.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(
            err,
            SearchError::DimensionMismatch { left: 2, right: 3 }
        ));
    }

    #[test]
    fn test_zero_magnitude() {
        let err = cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]).unwrap_err();
        assert!(matches!(err, SearchError::ZeroMagnitude));

        let err = cosine_similarity(&[1.0, 0.0], &[0.0, 0.0]).unwrap_err();
        assert!(matches!(err, SearchError::ZeroMagnitude));
    }

    #[test]
    fn test_empty_vectors_have_zero_magnitude() {
        let err = cosine_similarity(&[], &[]).unwrap_err();
        assert!(matches!(err, SearchError::ZeroMagnitude));
    }

    #[test]
    fn test_non_finite_rejected() {
        for bad in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let err = cosine_similarity(&[bad, 1.0], &[1.0, 0.0]).unwrap_err();
            assert!(matches!(err, SearchError::InvalidArgument(_)));

            let err = cosine_similarity(&[1.0, 0.0], &[0.0, bad]).unwrap_err();
            assert!(matches!(err, SearchError::InvalidArgument(_)));
        }
    }

    #[test]
    fn test_large_components_stay_finite() {
        // f64 accumulation does not overflow at f32::MAX
        let p = vec![f32::MAX; 4];
        assert!((cosine_similarity(&p, &p).unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_l2_norm() {
        assert!((l2_norm(&[3.0, 4.0]) - 5.0).abs() < 1e-6);
        assert_eq!(l2_norm(&[]), 0.0);
    }
}
