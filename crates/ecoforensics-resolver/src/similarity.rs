//! String similarity metrics

use ecoforensics_domain::SimilarityMetric;

/// Character-level edit distance
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, ca) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// `100 × (1 − distance / max_len)`
///
/// Two empty strings are identical (100).
#[derive(Debug, Clone, Copy, Default)]
pub struct LevenshteinRatio;

impl SimilarityMetric for LevenshteinRatio {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        let max_len = a.chars().count().max(b.chars().count());
        if max_len == 0 {
            return 100.0;
        }
        let distance = levenshtein_distance(a, b);
        (100.0 * (1.0 - distance as f64 / max_len as f64)).clamp(0.0, 100.0)
    }
}

/// Sorts whitespace-separated tokens before applying an inner metric
///
/// Makes word order irrelevant: "PULP RIAU" and "RIAU PULP" score 100.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenSortRatio<M = LevenshteinRatio> {
    inner: M,
}

impl<M: SimilarityMetric> TokenSortRatio<M> {
    /// Wrap an inner metric
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

impl<M: SimilarityMetric> SimilarityMetric for TokenSortRatio<M> {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        self.inner.similarity(&sorted_tokens(a), &sorted_tokens(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("flaw", "lawn"), 2);
    }

    #[test]
    fn test_levenshtein_ratio() {
        let metric = LevenshteinRatio;
        assert_eq!(metric.similarity("ACME", "ACME"), 100.0);
        assert_eq!(metric.similarity("", ""), 100.0);
        assert_eq!(metric.similarity("ABC", ""), 0.0);
        assert_eq!(metric.similarity("ABCD", "ABCE"), 75.0);
    }

    #[test]
    fn test_token_sort_ignores_order() {
        let metric = TokenSortRatio::<LevenshteinRatio>::default();
        assert_eq!(metric.similarity("RIAU PULP", "PULP RIAU"), 100.0);
        assert!(LevenshteinRatio.similarity("RIAU PULP", "PULP RIAU") < 100.0);
    }

    #[test]
    fn test_unicode_counts_chars() {
        assert_eq!(levenshtein_distance("SÃO", "SAO"), 1);
        assert_eq!(LevenshteinRatio.similarity("SÃO", "SAO"), 100.0 * (1.0 - 1.0 / 3.0));
    }
}
