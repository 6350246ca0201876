//! Cosine similarity and stable best-score selection.

/// Cosine similarity between two equal-length vectors.
///
/// Returns `None` when either vector has zero norm, where the cosine is
/// undefined; callers decide how to surface that instead of receiving NaN.
///
/// Both slices must have the same length.
///
/// ```rust
/// use ragprobe::retrieval::cosine_similarity;
///
/// let sim = cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]).unwrap();
/// assert!((sim - 1.0).abs() < 1e-6);
/// assert!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]).is_none());
/// ```
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f32> {
    debug_assert_eq!(a.len(), b.len(), "cosine over mismatched dimensions");
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return None;
    }
    Some(dot / (norm_a.sqrt() * norm_b.sqrt()))
}

/// Index of the first maximal score (stable argmax).
///
/// Later entries replace the champion only when strictly greater, so exact
/// ties resolve to the earliest index. NaN entries never win; an empty slice,
/// or one holding only NaNs, yields `None`.
#[must_use]
pub fn stable_argmax(scores: &[f32]) -> Option<usize> {
    let mut best: Option<usize> = None;
    let mut best_score = f32::NEG_INFINITY;
    for (idx, &score) in scores.iter().enumerate() {
        if score.is_nan() {
            continue;
        }
        if best.is_none() || score > best_score {
            best = Some(idx);
            best_score = score;
        }
    }
    best
}
