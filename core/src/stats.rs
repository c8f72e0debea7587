//! Descriptive statistics over payment amounts.

/// Arithmetic mean. None for an empty slice — the caller decides how an
/// undefined mean is rendered.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Linear-interpolation percentile (the "R-7" method, the numpy default).
///
/// `sorted` must be in ascending order and `p` in `[0.0, 1.0]`. The rank
/// is `p * (n - 1)`, interpolated between the adjacent elements.
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    match sorted {
        [] => None,
        [only] => Some(*only),
        _ => {
            let rank = p * (sorted.len() - 1) as f64;
            let lo = rank.floor() as usize;
            let hi = rank.ceil() as usize;
            let weight = rank - lo as f64;
            Some(sorted[lo] + (sorted[hi] - sorted[lo]) * weight)
        }
    }
}
