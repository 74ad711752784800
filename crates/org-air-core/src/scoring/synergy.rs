//! Synergy: the interaction term between V^R and H^R.
//!
//!   Synergy = (V^R * H^R / 100) * alignment * timing
//!
//! with timing clamped to [0.8, 1.2] and the result to [0, 100].

use crate::decimal::{clamp, clamp_score, clamp_unit, quantize};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::info;

const TIMING_MIN: Decimal = dec!(0.8);
const TIMING_MAX: Decimal = dec!(1.2);

/// Synergy calculation result.
#[derive(Debug, Clone, Serialize)]
pub struct SynergyResult {
    pub synergy_score: Decimal,
    /// V^R * H^R / 100, before alignment and timing.
    pub interaction: Decimal,
    pub alignment_factor: Decimal,
    /// Timing multiplier after clamping.
    pub timing_factor: Decimal,
}

/// Calculates the synergy interaction between V^R and H^R.
#[derive(Debug, Clone, Copy, Default)]
pub struct SynergyCalculator;

impl SynergyCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Calculate synergy.
    ///
    /// `alignment` reflects strategic alignment in (0, 1]; `timing_factor`
    /// is a market-timing multiplier clamped to [0.8, 1.2].
    pub fn calculate(
        &self,
        vr_score: Decimal,
        hr_score: Decimal,
        alignment: Decimal,
        timing_factor: Decimal,
    ) -> SynergyResult {
        let alignment_factor = clamp_unit(alignment);
        let timing = clamp(timing_factor, TIMING_MIN, TIMING_MAX);

        let interaction = quantize(vr_score * hr_score / dec!(100));
        let synergy_score = clamp_score(quantize(interaction * alignment_factor * timing));

        let result = SynergyResult {
            synergy_score,
            interaction,
            alignment_factor,
            timing_factor: timing,
        };
        info!(
            synergy_score = %result.synergy_score,
            interaction = %result.interaction,
            alignment = %result.alignment_factor,
            timing = %result.timing_factor,
            "synergy calculated"
        );
        result
    }
}
