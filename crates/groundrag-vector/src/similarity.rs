/// Dot product over the common prefix of `a` and `b`.
///
/// Vectors from different embedder versions may differ in length; the
/// shorter one decides how many dimensions take part.
pub fn dot(a: &[f32], b: &[f32]) -> f64 {
    a.iter().zip(b).map(|(x, y)| f64::from(*x) * f64::from(*y)).sum()
}

/// Euclidean norm, floored at 1 so near-zero vectors never blow up a ratio.
pub fn l2_norm(v: &[f32]) -> f32 {
    let sq: f64 = v.iter().map(|x| f64::from(*x) * f64::from(*x)).sum();
    (sq.sqrt() as f32).max(1.0)
}

/// Cosine similarity with both norms precomputed (and already floored).
///
/// Empty vectors score 0.
pub fn cosine_with_norm(query: &[f32], query_norm: f32, chunk: &[f32], chunk_norm: f32) -> f32 {
    if query.is_empty() || chunk.is_empty() {
        return 0.0;
    }
    let denom = f64::from(query_norm.max(1.0)) * f64::from(chunk_norm.max(1.0));
    (dot(query, chunk) / denom) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn norm_floors_at_one() {
        assert_eq!(l2_norm(&[]), 1.0);
        assert_eq!(l2_norm(&[0.1, 0.2]), 1.0);
        assert!((l2_norm(&[3.0, 4.0]) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn dot_uses_common_prefix() {
        assert_eq!(dot(&[1.0, 2.0, 3.0], &[4.0, 5.0]), 14.0);
    }

    #[test]
    fn empty_side_scores_zero() {
        assert_eq!(cosine_with_norm(&[], 1.0, &[1.0], 1.0), 0.0);
        assert_eq!(cosine_with_norm(&[1.0], 1.0, &[], 1.0), 0.0);
    }

    #[test]
    fn self_similarity_is_one_above_unit_norm() {
        let v = [2.0f32, 1.0, -2.0];
        let n = l2_norm(&v);
        assert!((cosine_with_norm(&v, n, &v, n) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn unit_vectors_behave_like_plain_cosine() {
        let a = [1.0f32, 0.0];
        let b = [0.6f32, 0.8];
        assert!((cosine_with_norm(&a, l2_norm(&a), &b, l2_norm(&b)) - 0.6).abs() < 1e-6);
    }
}
