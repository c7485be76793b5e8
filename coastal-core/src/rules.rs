//! Closed-form annual update rules shared by the leaf models.
//!
//! Each rule maps the value of a quantity at year `t` (plus fixed parameters) to its value
//! at `t + 1`. They are evaluated once per step; there is no iteration or convergence loop.

use num::Float;

/// Additive drift: `value + rate`
pub fn drift<T: Float>(value: T, rate: T) -> T {
    value + rate
}

/// Multiplicative compounding: `value * (1 + rate)`
pub fn compound<T: Float>(value: T, rate: T) -> T {
    value * (T::one() + rate)
}

/// Compounding followed by a damping factor: `value * (1 + rate) * factor`
pub fn damped_growth<T: Float>(value: T, rate: T, factor: T) -> T {
    compound(value, rate) * factor
}

/// Compounding that saturates at `cap`: `min(value * (1 + rate), cap)`
pub fn capped_growth<T: Float>(value: T, rate: T, cap: T) -> T {
    compound(value, rate).min(cap)
}

/// Proportional loss plus a constant inflow: `value * (1 - loss) + inflow`
pub fn decay_with_inflow<T: Float>(value: T, loss: T, inflow: T) -> T {
    value * (T::one() - loss) + inflow
}

/// Several proportional losses applied together: `value * (1 - l0 - l1 - ...)`
pub fn combined_decay<T: Float>(value: T, losses: &[T]) -> T {
    value * losses.iter().fold(T::one(), |acc, l| acc - *l)
}

/// Growth net of a proportional loss: `value * (1 + gain - loss)`
pub fn net_growth<T: Float>(value: T, gain: T, loss: T) -> T {
    value * (T::one() + gain - loss)
}

/// Proportional loss offset by a proportional gain: `value * (1 - loss + gain)`
pub fn offset_decay<T: Float>(value: T, loss: T, gain: T) -> T {
    value * (T::one() - loss + gain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use is_close::is_close;

    #[test]
    fn additive_drift() {
        assert_eq!(drift(0.0, 0.5), 0.5);
        assert_eq!(drift(0.0, 0.03), 0.03);
    }

    #[test]
    fn compounding() {
        assert!(is_close!(compound(100.0, 0.02), 102.0));
        assert!(is_close!(compound(100.0, -0.03), 97.0));
    }

    #[test]
    fn damped() {
        assert!(is_close!(damped_growth(1.0, 0.05, 0.7), 0.735));
    }

    #[test]
    fn capped_growth_saturates() {
        assert!(is_close!(capped_growth(0.1, 0.15, 5.0), 0.115));
        assert_eq!(capped_growth(4.9, 0.15, 5.0), 5.0);
        assert_eq!(capped_growth(5.0, 0.15, 5.0), 5.0);
    }

    #[test]
    fn decay_and_inflow() {
        assert!(is_close!(decay_with_inflow(100.0, 0.013, 0.02), 98.72));
        assert!(is_close!(combined_decay(100.0, &[0.01, 0.015]), 97.5));
        assert_eq!(combined_decay(100.0, &[]), 100.0);
    }

    #[test]
    fn growth_net_of_loss() {
        assert!(is_close!(net_growth(35.0, 0.015, 0.02), 34.825));
        assert!(is_close!(net_growth(100.0, 0.08, 0.05), 103.0));
    }

    #[test]
    fn loss_is_applied_before_gain() {
        assert!(is_close!(offset_decay(100.0, 0.05, 0.08), 103.0));
        assert_eq!(offset_decay(100.0, 0.05, 0.08), 100.0 * (1.0 - 0.05 + 0.08));
        assert_eq!(offset_decay(1.0, 0.0, 0.0), 1.0);
    }
}
