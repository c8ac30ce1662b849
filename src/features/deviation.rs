//! Standardized deviation of an amount from its trailing mean.

/// `(amount - mean) / std_dev`, or `None` when `std_dev` is missing or zero.
/// Not clamped.
pub fn deviation_score(amount: f64, mean: f64, std_dev: Option<f64>) -> Option<f64> {
    match std_dev {
        Some(sd) if sd != 0.0 => Some((amount - mean) / sd),
        _ => None,
    }
}
