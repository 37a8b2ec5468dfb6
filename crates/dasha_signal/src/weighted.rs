//! Weighted combination shared by level composites and chart combination.

/// A score paired with its relative weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weighted {
    pub score: f64,
    pub weight: f64,
}

impl Weighted {
    pub const fn new(score: f64, weight: f64) -> Self {
        Self { score, weight }
    }
}

/// `Σ w·s / Σ w`. Returns `None` when the weights sum to zero.
///
/// A single entry yields its score unchanged.
pub fn weighted_mean(items: &[Weighted]) -> Option<f64> {
    if let [only] = items {
        return (only.weight > 0.0).then_some(only.score);
    }
    let total: f64 = items.iter().map(|w| w.weight).sum();
    if total <= 0.0 {
        return None;
    }
    Some(items.iter().map(|w| w.score * w.weight).sum::<f64>() / total)
}

/// Pair `scores` with `weights` positionally and combine.
///
/// Extra scores beyond the weight list are ignored.
pub fn weighted_zip(scores: &[f64], weights: &[f64]) -> Option<f64> {
    let items: Vec<Weighted> = scores
        .iter()
        .zip(weights)
        .map(|(s, w)| Weighted::new(*s, *w))
        .collect();
    weighted_mean(&items)
}
