//! V^R (Idiosyncratic Readiness).
//!
//!   V^R = D_w * (1 - lambda * cv_D) * TalentRiskAdj
//!
//! where D_w is the weighted mean of the seven dimension scores, cv_D the
//! coefficient of variation around it, and TalentRiskAdj discounts for
//! talent concentration above its threshold. The CV penalty is
//! non-compensatory: uneven dimension scores lower V^R even when the mean
//! is high.

use crate::decimal::{
    clamp, clamp_score, clamp_unit, coefficient_of_variation, quantize, weighted_mean,
    weighted_std_dev,
};
use crate::dimension::Dimension;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

/// Non-compensatory CV penalty coefficient (lambda).
pub const LAMBDA_PENALTY: Decimal = dec!(0.25);
/// Per-unit talent-concentration penalty above the threshold.
pub const TALENT_RISK_COEFF: Decimal = dec!(0.15);
/// Talent concentration below this carries no penalty.
pub const TALENT_THRESHOLD: Decimal = dec!(0.25);

/// Full V^R calculation result with audit trail.
#[derive(Debug, Clone, Serialize)]
pub struct VrResult {
    pub vr_score: Decimal,
    pub weighted_mean: Decimal,
    pub std_dev: Decimal,
    #[serde(rename = "cv")]
    pub coefficient_of_variation: Decimal,
    pub penalty_factor: Decimal,
    pub talent_concentration: Decimal,
    #[serde(rename = "talent_risk_adj")]
    pub talent_risk_adjustment: Decimal,
    /// Dimension scores as actually used (clamped, defaults filled in).
    pub dimension_scores: BTreeMap<Dimension, Decimal>,
    /// Per-dimension weight * score.
    pub dimension_contributions: BTreeMap<Dimension, Decimal>,
}

/// Computes V^R from dimension scores and talent concentration.
///
/// Weights and lambda default to the calibrated values but can be overridden
/// for sector-specific calibration.
#[derive(Debug, Clone)]
pub struct VrCalculator {
    weights: BTreeMap<Dimension, Decimal>,
    lambda_penalty: Decimal,
    talent_risk_coeff: Decimal,
    talent_threshold: Decimal,
}

impl Default for VrCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl VrCalculator {
    pub fn new() -> Self {
        Self::with_weights(
            Dimension::ordered()
                .into_iter()
                .map(|d| (d, d.default_weight()))
                .collect(),
        )
    }

    pub fn with_weights(weights: BTreeMap<Dimension, Decimal>) -> Self {
        Self {
            weights,
            lambda_penalty: LAMBDA_PENALTY,
            talent_risk_coeff: TALENT_RISK_COEFF,
            talent_threshold: TALENT_THRESHOLD,
        }
    }

    pub fn with_lambda(mut self, lambda_penalty: Decimal) -> Self {
        self.lambda_penalty = lambda_penalty;
        self
    }

    /// Calculate V^R.
    ///
    /// Dimensions missing from the map default to 50; every score is clamped
    /// to [0, 100] before use. `talent_concentration` is clamped to [0, 1].
    pub fn calculate(
        &self,
        dimension_scores: &BTreeMap<Dimension, Decimal>,
        talent_concentration: Decimal,
    ) -> VrResult {
        let mut resolved = BTreeMap::new();
        for dimension in Dimension::ordered() {
            let raw = dimension_scores
                .get(&dimension)
                .copied()
                .unwrap_or(dec!(50));
            resolved.insert(dimension, clamp_score(raw));
        }

        let ordered_scores: Vec<Decimal> = Dimension::ordered()
            .into_iter()
            .map(|d| resolved[&d])
            .collect();
        let ordered_weights: Vec<Decimal> = Dimension::ordered()
            .into_iter()
            .map(|d| self.weights.get(&d).copied().unwrap_or(Decimal::ZERO))
            .collect();

        let d_w = clamp_score(weighted_mean(&ordered_scores, &ordered_weights));
        let std_dev = weighted_std_dev(&ordered_scores, &ordered_weights, d_w);
        let cv = coefficient_of_variation(std_dev, d_w);

        let penalty = clamp(
            Decimal::ONE - self.lambda_penalty * cv,
            Decimal::ZERO,
            Decimal::ONE,
        );

        let tc = clamp_unit(talent_concentration);
        let tc_excess = (tc - self.talent_threshold).max(Decimal::ZERO);
        let talent_risk_adjustment = clamp(
            Decimal::ONE - self.talent_risk_coeff * tc_excess,
            Decimal::ZERO,
            Decimal::ONE,
        );

        let vr_score = clamp_score(quantize(d_w * penalty * talent_risk_adjustment));

        let dimension_contributions = Dimension::ordered()
            .into_iter()
            .map(|d| {
                let weight = self.weights.get(&d).copied().unwrap_or(Decimal::ZERO);
                (d, quantize(resolved[&d] * weight))
            })
            .collect();

        let result = VrResult {
            vr_score,
            weighted_mean: d_w,
            std_dev,
            coefficient_of_variation: cv,
            penalty_factor: penalty,
            talent_concentration: tc,
            talent_risk_adjustment,
            dimension_scores: resolved,
            dimension_contributions,
        };

        info!(
            vr_score = %result.vr_score,
            weighted_mean = %result.weighted_mean,
            cv = %result.coefficient_of_variation,
            penalty_factor = %result.penalty_factor,
            talent_risk_adj = %result.talent_risk_adjustment,
            "vr calculated"
        );
        result
    }
}
