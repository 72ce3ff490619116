//! Linear rescaling of per-entity scores onto a visual-weight range.

use riskgraph_core::config::WeightRange;

/// Map `values` linearly from their own `[min, max]` onto `range`.
///
/// When every value is identical there is no spread to divide by and each
/// entry gets `range.flat`. Outputs are clamped to the range.
pub fn rescale(values: &[f64], range: &WeightRange) -> Vec<f64> {
    let Some(first) = values.first() else {
        return Vec::new();
    };
    let (lo, hi) = values
        .iter()
        .fold((*first, *first), |(lo, hi), &v| (lo.min(v), hi.max(v)));

    if hi == lo {
        return vec![range.flat; values.len()];
    }

    let k = range.span() / (hi - lo);
    values
        .iter()
        .map(|&v| (range.min + k * (v - lo)).clamp(range.min, range.max))
        .collect()
}
