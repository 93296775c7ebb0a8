//! Narrow seams for swappable algorithms

/// String similarity as a percentage
///
/// Implementations must be pure: the same pair always yields the same score.
pub trait SimilarityMetric: Send + Sync {
    /// Similarity of `a` and `b` in [0, 100]
    fn similarity(&self, a: &str, b: &str) -> f64;
}

impl<M: SimilarityMetric + ?Sized> SimilarityMetric for &M {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        (**self).similarity(a, b)
    }
}

impl<M: SimilarityMetric + ?Sized> SimilarityMetric for Box<M> {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        (**self).similarity(a, b)
    }
}
