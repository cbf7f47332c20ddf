/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Rounds to `decimals` places, sending exact halves to the even neighbour.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_mean_values() {
        assert_eq!(mean(&[4.0, 2.0]), 3.0);
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), 2.5);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(7.0 / 3.0, 2), 2.33);
        assert_eq!(round_to(11.0 / 3.0, 2), 3.67);
        assert_eq!(round_to(6.0, 1), 6.0);
        assert_eq!(round_to(0.25, 1), 0.2);
        assert_eq!(round_to(0.35, 0), 0.0);
    }
}
