//! Shared statistics helpers for the analytics components

/// Arithmetic mean; empty input yields zero
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation; fewer than two samples yield zero
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Gini coefficient of a distribution (0 = perfectly equal, 1 = maximal
/// inequality).
///
/// Computed as `G = (Σ (2(i+1) - n - 1) * x_i) / (n² * mean)` over values
/// sorted ascending. Degenerate inputs (empty, single value, all-zero)
/// yield zero.
pub fn gini(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(values);
    if m == 0.0 {
        return 0.0;
    }

    let mut sorted: Vec<f64> = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let numerator: f64 = sorted
        .iter()
        .enumerate()
        .map(|(i, x)| (2.0 * (i as f64 + 1.0) - n as f64 - 1.0) * x)
        .sum();

    numerator / (n as f64 * n as f64 * m)
}

/// Share of completed items; empty input yields zero
pub fn completion_rate(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    completed as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn std_dev_of_constant_series_is_zero() {
        assert_eq!(std_dev(&[4.0, 4.0, 4.0]), 0.0);
    }

    #[test]
    fn gini_uniform_distribution_is_zero() {
        let g = gini(&[5.0, 5.0, 5.0, 5.0]);
        assert!(g.abs() < 1e-9, "expected ~0, got {}", g);
    }

    #[test]
    fn gini_dominant_contributor_is_high() {
        let g = gini(&[1.0, 1.0, 1.0, 27.0]);
        assert!(g > 0.4, "expected > 0.4, got {}", g);
    }

    #[test]
    fn gini_is_order_independent() {
        assert_eq!(gini(&[1.0, 9.0, 3.0]), gini(&[9.0, 3.0, 1.0]));
    }
}
