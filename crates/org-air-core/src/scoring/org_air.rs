//! The Org-AI-R composite.
//!
//!   Org-AI-R = (1 - beta) * [alpha * V^R + (1 - alpha) * H^R] + beta * Synergy
//!
//! with alpha = 0.60 and beta = 0.12. The constants and the parameter
//! version string are fixed; any recalibration must bump the version so
//! persisted scores stay comparable across runs.

use crate::decimal::{clamp_score, quantize};
use crate::error::ScoringError;
use crate::scoring::confidence::{ConfidenceCalculator, ConfidenceInterval, ScoreType};
use crate::scoring::hr::HrResult;
use crate::scoring::synergy::SynergyResult;
use crate::scoring::vr::VrResult;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

/// V^R weight in the inner aggregation (alpha).
pub const ALPHA: Decimal = dec!(0.60);
/// Synergy weight in the outer aggregation (beta).
pub const BETA: Decimal = dec!(0.12);
/// Bumped whenever any scoring constant changes.
pub const PARAMETER_VERSION: &str = "3.0.0";

/// Complete Org-AI-R scoring result.
#[derive(Debug, Clone, Serialize)]
pub struct OrgAirResult {
    pub score_id: Uuid,
    pub company_id: String,
    pub sector: String,
    pub timestamp: DateTime<Utc>,
    pub final_score: Decimal,
    pub vr_result: VrResult,
    pub hr_result: HrResult,
    pub synergy_result: SynergyResult,
    pub confidence_interval: ConfidenceInterval,
    pub alpha: Decimal,
    pub beta: Decimal,
    pub parameter_version: &'static str,
}

impl OrgAirResult {
    /// Flat primitive summary for persistence or logging; field names are
    /// the audit wire contract and must not drift.
    pub fn summary(&self) -> serde_json::Value {
        json!({
            "score_id": self.score_id.to_string(),
            "company_id": self.company_id,
            "sector": self.sector,
            "timestamp": self.timestamp.to_rfc3339(),
            "final_score": self.final_score,
            "vr_score": self.vr_result.vr_score,
            "hr_score": self.hr_result.hr_score,
            "synergy_score": self.synergy_result.synergy_score,
            "ci_lower": self.confidence_interval.ci_lower,
            "ci_upper": self.confidence_interval.ci_upper,
            "ci_width": self.confidence_interval.ci_width(),
            "sem": self.confidence_interval.sem,
            "reliability": self.confidence_interval.reliability,
            "evidence_count": self.confidence_interval.evidence_count,
            "alpha": self.alpha,
            "beta": self.beta,
            "parameter_version": self.parameter_version,
        })
    }
}

/// Aggregates V^R, H^R, and Synergy into the final composite.
#[derive(Debug, Clone)]
pub struct OrgAirCalculator {
    alpha: Decimal,
    beta: Decimal,
    ci_calc: ConfidenceCalculator,
}

impl Default for OrgAirCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl OrgAirCalculator {
    pub fn new() -> Self {
        Self {
            alpha: ALPHA,
            beta: BETA,
            ci_calc: ConfidenceCalculator::new(),
        }
    }

    pub fn with_confidence_calculator(mut self, ci_calc: ConfidenceCalculator) -> Self {
        self.ci_calc = ci_calc;
        self
    }

    /// Calculate the Org-AI-R score and its confidence interval.
    ///
    /// `evidence_count` is the total number of evidence items behind the
    /// assessment and drives the interval width. Fails only for a
    /// confidence level outside (0, 1).
    #[allow(clippy::too_many_arguments)]
    pub fn calculate(
        &self,
        company_id: &str,
        sector: &str,
        vr_result: VrResult,
        hr_result: HrResult,
        synergy_result: SynergyResult,
        evidence_count: u32,
        confidence_level: f64,
    ) -> Result<OrgAirResult, ScoringError> {
        let weighted = self.alpha * vr_result.vr_score
            + (Decimal::ONE - self.alpha) * hr_result.hr_score;
        let final_score = clamp_score(quantize(
            (Decimal::ONE - self.beta) * weighted + self.beta * synergy_result.synergy_score,
        ));

        let confidence_interval = self.ci_calc.calculate(
            final_score,
            ScoreType::OrgAir,
            evidence_count,
            None,
            confidence_level,
        )?;

        let result = OrgAirResult {
            score_id: Uuid::new_v4(),
            company_id: company_id.to_string(),
            sector: sector.to_string(),
            timestamp: Utc::now(),
            final_score,
            vr_result,
            hr_result,
            synergy_result,
            confidence_interval,
            alpha: self.alpha,
            beta: self.beta,
            parameter_version: PARAMETER_VERSION,
        };

        info!(
            score_id = %result.score_id,
            company_id,
            sector,
            final_score = %result.final_score,
            vr_score = %result.vr_result.vr_score,
            hr_score = %result.hr_result.hr_score,
            synergy_score = %result.synergy_result.synergy_score,
            parameter_version = result.parameter_version,
            "org_air calculated"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::Dimension;
    use crate::scoring::hr::HrCalculator;
    use crate::scoring::synergy::SynergyCalculator;
    use crate::scoring::vr::VrCalculator;
    use std::collections::BTreeMap;

    fn fixtures(vr: Decimal, hr: Decimal, synergy: Decimal) -> (VrResult, HrResult, SynergyResult) {
        // Uniform dimension maps reproduce the requested vr exactly.
        let dims: BTreeMap<Dimension, Decimal> =
            Dimension::ordered().into_iter().map(|d| (d, vr)).collect();
        let vr_result = VrCalculator::new().calculate(&dims, Decimal::ZERO);
        assert_eq!(vr_result.vr_score, crate::decimal::quantize(vr));

        let hr_result = HrCalculator::new().calculate("technology", Decimal::ZERO, Some(hr));
        assert_eq!(hr_result.hr_score, crate::decimal::quantize(hr));

        // alignment 1 and timing 1 make synergy = vr*hr/100; instead force
        // the requested value through an explicit interaction.
        let synergy_result = SynergyResult {
            synergy_score: synergy,
            interaction: synergy,
            alignment_factor: Decimal::ONE,
            timing_factor: Decimal::ONE,
        };
        (vr_result, hr_result, synergy_result)
    }

    #[test]
    fn composite_matches_the_documented_scenario() {
        let (vr, hr, synergy) = fixtures(dec!(70), dec!(60), dec!(43.2));
        let result = OrgAirCalculator::new()
            .calculate("company-1", "technology", vr, hr, synergy, 10, 0.95)
            .expect("valid level");
        // weighted = 0.6*70 + 0.4*60 = 66; final = 0.88*66 + 0.12*43.2
        assert_eq!(result.final_score, dec!(63.2640));
        assert_eq!(result.parameter_version, "3.0.0");
        assert_eq!(result.alpha, dec!(0.60));
        assert_eq!(result.beta, dec!(0.12));
    }

    #[test]
    fn interval_brackets_the_final_score() {
        let (vr, hr, synergy) = fixtures(dec!(70), dec!(60), dec!(43.2));
        let result = OrgAirCalculator::new()
            .calculate("company-1", "technology", vr, hr, synergy, 25, 0.95)
            .expect("valid level");
        let ci = &result.confidence_interval;
        assert!(ci.ci_lower <= result.final_score);
        assert!(result.final_score <= ci.ci_upper);
        assert_eq!(ci.point_estimate, result.final_score);
    }

    #[test]
    fn summary_exposes_the_flat_audit_fields() {
        let (vr, hr, synergy) = fixtures(dec!(70), dec!(60), dec!(43.2));
        let result = OrgAirCalculator::new()
            .calculate("company-9", "healthcare", vr, hr, synergy, 10, 0.95)
            .expect("valid level");
        let summary = result.summary();
        for field in [
            "score_id",
            "company_id",
            "sector",
            "timestamp",
            "final_score",
            "vr_score",
            "hr_score",
            "synergy_score",
            "ci_lower",
            "ci_upper",
            "ci_width",
            "sem",
            "reliability",
            "evidence_count",
            "alpha",
            "beta",
            "parameter_version",
        ] {
            assert!(summary.get(field).is_some(), "missing field {field}");
        }
        assert_eq!(summary["company_id"], "company-9");
        assert_eq!(summary["parameter_version"], "3.0.0");
    }

    #[test]
    fn invalid_confidence_level_propagates() {
        let (vr, hr, synergy) = fixtures(dec!(50), dec!(50), dec!(25));
        let err = OrgAirCalculator::new()
            .calculate("company-1", "retail", vr, hr, synergy, 10, 1.2)
            .unwrap_err();
        assert!(matches!(err, ScoringError::InvalidConfidenceLevel(_)));
    }

    #[test]
    fn extreme_component_scores_stay_clamped() {
        let (vr, hr, synergy) = fixtures(dec!(100), dec!(100), dec!(100));
        let result = OrgAirCalculator::new()
            .calculate("company-1", "technology", vr, hr, synergy, 10, 0.95)
            .expect("valid level");
        assert!(result.final_score <= dec!(100));
    }
}
