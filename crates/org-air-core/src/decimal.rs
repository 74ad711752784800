//! Fixed-precision arithmetic helpers shared by every calculator.
//!
//! All score math runs on [`rust_decimal::Decimal`] quantized to four
//! decimal places with round-half-up, so persisted scores stay bit-identical
//! across runs and hosts. Floating point is confined to the normal-quantile
//! solver in the confidence module.

use crate::error::ScoringError;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;

/// Intermediate values are rounded half-up at four decimal places.
pub const SCALE: u32 = 4;

/// Quantize a decimal to the engine precision.
pub fn quantize(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert a float to the engine's fixed precision.
///
/// Non-finite input must be rejected at the boundary before calling this;
/// out-of-range floats saturate and are handled by the callers' clamps.
pub fn to_decimal(value: f64) -> Decimal {
    match Decimal::from_f64(value) {
        Some(d) => quantize(d),
        None if value > 0.0 => Decimal::MAX,
        None => Decimal::MIN,
    }
}

/// Convert a float supplied by a caller, rejecting NaN and infinities.
pub fn try_to_decimal(value: f64, field: &'static str) -> Result<Decimal, ScoringError> {
    if !value.is_finite() {
        return Err(ScoringError::NonFiniteInput { field, value });
    }
    Ok(to_decimal(value))
}

/// Clamp a value to `[min, max]`.
pub fn clamp(value: Decimal, min: Decimal, max: Decimal) -> Decimal {
    value.max(min).min(max)
}

/// Clamp a score to the canonical `[0, 100]` band.
pub fn clamp_score(value: Decimal) -> Decimal {
    clamp(value, Decimal::ZERO, dec!(100))
}

/// Clamp a ratio to `[0, 1]`.
pub fn clamp_unit(value: Decimal) -> Decimal {
    clamp(value, Decimal::ZERO, Decimal::ONE)
}

/// Weighted mean of paired values and weights, quantized to engine precision.
///
/// The slices must be the same length; weights are expected to sum to 1.0
/// but no renormalization is performed.
pub fn weighted_mean(values: &[Decimal], weights: &[Decimal]) -> Decimal {
    debug_assert_eq!(values.len(), weights.len());
    if values.is_empty() {
        return Decimal::ZERO;
    }
    let total: Decimal = values.iter().zip(weights).map(|(v, w)| v * w).sum();
    quantize(total)
}

/// Weighted population standard deviation around a precomputed mean.
///
///   sigma_w = sqrt( sum(w_i * (v_i - mean)^2) / sum(w_i) )
///
/// Returns zero for empty input or all-zero weights.
pub fn weighted_std_dev(values: &[Decimal], weights: &[Decimal], mean: Decimal) -> Decimal {
    debug_assert_eq!(values.len(), weights.len());
    if values.is_empty() {
        return Decimal::ZERO;
    }
    let total_weight: Decimal = weights.iter().copied().sum();
    if total_weight.is_zero() {
        return Decimal::ZERO;
    }
    let variance: Decimal = values
        .iter()
        .zip(weights)
        .map(|(v, w)| {
            let diff = v - mean;
            w * diff * diff
        })
        .sum::<Decimal>()
        / total_weight;
    quantize(variance.sqrt().unwrap_or(Decimal::ZERO))
}

/// Coefficient of variation with zero-division protection.
pub fn coefficient_of_variation(std_dev: Decimal, mean: Decimal) -> Decimal {
    if mean.is_zero() {
        return Decimal::ZERO;
    }
    quantize(std_dev / mean)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_decimal_rounds_half_up_at_four_places() {
        assert_eq!(to_decimal(1.00005), dec!(1.0001));
        assert_eq!(to_decimal(1.00004), dec!(1.0000));
        assert_eq!(to_decimal(-1.00005), dec!(-1.0001));
    }

    #[test]
    fn try_to_decimal_rejects_non_finite() {
        assert!(try_to_decimal(f64::NAN, "score").is_err());
        assert!(try_to_decimal(f64::INFINITY, "score").is_err());
        assert!(try_to_decimal(70.0, "score").is_ok());
    }

    #[test]
    fn clamp_respects_bounds() {
        assert_eq!(clamp_score(dec!(120)), dec!(100));
        assert_eq!(clamp_score(dec!(-3)), Decimal::ZERO);
        assert_eq!(clamp_unit(dec!(0.5)), dec!(0.5));
    }

    #[test]
    fn weighted_mean_matches_hand_computation() {
        let values = [dec!(70), dec!(50)];
        let weights = [dec!(0.75), dec!(0.25)];
        assert_eq!(weighted_mean(&values, &weights), dec!(65.0000));
    }

    #[test]
    fn weighted_mean_empty_is_zero() {
        assert_eq!(weighted_mean(&[], &[]), Decimal::ZERO);
    }

    #[test]
    fn weighted_std_dev_uniform_values_is_zero() {
        let values = [dec!(70); 4];
        let weights = [dec!(0.25); 4];
        assert_eq!(weighted_std_dev(&values, &weights, dec!(70)), Decimal::ZERO);
    }

    #[test]
    fn weighted_std_dev_zero_weights_is_zero() {
        let values = [dec!(10), dec!(20)];
        let weights = [Decimal::ZERO, Decimal::ZERO];
        assert_eq!(weighted_std_dev(&values, &weights, dec!(15)), Decimal::ZERO);
    }

    #[test]
    fn cv_guards_zero_mean() {
        assert_eq!(coefficient_of_variation(dec!(5), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(coefficient_of_variation(dec!(10), dec!(50)), dec!(0.2000));
    }
}
