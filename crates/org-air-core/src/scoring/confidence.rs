//! SEM-based confidence intervals.
//!
//! Reliability comes from the Spearman-Brown prophecy formula over the
//! evidence count, the standard error of measurement from a per-score-type
//! population sigma, and the quantile from a self-contained standard-normal
//! inverse CDF. The quantile solver is deliberately not a platform statistics
//! function: downstream interval audits depend on its exact tie-breaking and
//! precision staying fixed.

use crate::decimal::{clamp, clamp_score, quantize, to_decimal};
use crate::error::ScoringError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::f64::consts::{FRAC_2_SQRT_PI, SQRT_2};
use tracing::info;

/// Average inter-item correlation used when the caller supplies none.
pub const DEFAULT_ITEM_CORRELATION: Decimal = dec!(0.30);
/// Reliability is capped below 1 so the SEM never collapses to zero.
const MAX_RELIABILITY: Decimal = dec!(0.99);
const DEFAULT_SD: Decimal = dec!(15.0);

/// Which score a confidence interval is sized for; selects the population
/// standard deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreType {
    Vr,
    Hr,
    Synergy,
    OrgAir,
}

impl ScoreType {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Vr => "vr",
            Self::Hr => "hr",
            Self::Synergy => "synergy",
            Self::OrgAir => "org_air",
        }
    }

    /// Calibrated population standard deviation for this score type.
    pub fn population_sd(self) -> Decimal {
        match self {
            Self::Vr => dec!(15.0),
            Self::Hr => dec!(12.0),
            Self::Synergy => dec!(10.0),
            Self::OrgAir => dec!(14.0),
        }
    }
}

/// Error function via its Maclaurin series.
///
///   erf(x) = 2/sqrt(pi) * sum((-1)^n x^(2n+1) / (n! (2n+1)))
///
/// Terms are accumulated until they drop below 1e-17; past |x| > 6 the
/// function is 1 to within f64 resolution.
fn erf(x: f64) -> f64 {
    if x.abs() > 6.0 {
        return 1.0_f64.copysign(x);
    }
    let mut term = x;
    let mut sum = 0.0_f64;
    for n in 0..200_u32 {
        let contribution = term / f64::from(2 * n + 1);
        sum += contribution;
        if contribution.abs() < 1e-17 {
            break;
        }
        term *= -x * x / f64::from(n + 1);
    }
    FRAC_2_SQRT_PI * sum
}

/// Inverse of erf, solved by Newton-Raphson on erf(x) - y = 0 with
/// derivative 2/sqrt(pi) * exp(-x^2). Callers must pass y in (-1, 1).
/// Converges in a handful of iterations from x = 0 for the quantiles the
/// engine uses; after 50 iterations the best estimate is returned.
fn erfinv(y: f64) -> f64 {
    let mut x = 0.0_f64;
    for _ in 0..50 {
        let err = erf(x) - y;
        if err.abs() < 1e-12 {
            return x;
        }
        x -= err / (FRAC_2_SQRT_PI * (-x * x).exp());
    }
    x
}

/// Standard normal quantile: z with P(Z <= z) = p for Z ~ N(0, 1).
/// Callers must pass p in (0, 1).
fn norm_ppf(p: f64) -> f64 {
    SQRT_2 * erfinv(2.0 * p - 1.0)
}

/// SEM-based confidence interval details.
#[derive(Debug, Clone)]
pub struct ConfidenceInterval {
    pub point_estimate: Decimal,
    pub ci_lower: Decimal,
    pub ci_upper: Decimal,
    pub sem: Decimal,
    pub reliability: Decimal,
    pub evidence_count: u32,
    pub confidence_level: f64,
}

impl ConfidenceInterval {
    pub fn ci_width(&self) -> Decimal {
        self.ci_upper - self.ci_lower
    }
}

impl Serialize for ConfidenceInterval {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ConfidenceInterval", 8)?;
        state.serialize_field("point_estimate", &self.point_estimate)?;
        state.serialize_field("ci_lower", &self.ci_lower)?;
        state.serialize_field("ci_upper", &self.ci_upper)?;
        state.serialize_field("sem", &self.sem)?;
        state.serialize_field("reliability", &self.reliability)?;
        state.serialize_field("evidence_count", &self.evidence_count)?;
        state.serialize_field("ci_width", &self.ci_width())?;
        state.serialize_field("confidence_level", &self.confidence_level)?;
        state.end()
    }
}

/// Calculates SEM-based confidence intervals for the component scores.
#[derive(Debug, Clone)]
pub struct ConfidenceCalculator {
    population_sd: BTreeMap<ScoreType, Decimal>,
    default_r: Decimal,
}

impl Default for ConfidenceCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfidenceCalculator {
    pub fn new() -> Self {
        Self {
            population_sd: [ScoreType::Vr, ScoreType::Hr, ScoreType::Synergy, ScoreType::OrgAir]
                .into_iter()
                .map(|t| (t, t.population_sd()))
                .collect(),
            default_r: DEFAULT_ITEM_CORRELATION,
        }
    }

    /// Calculator over a recalibrated sigma map and/or item correlation.
    pub fn with_calibration(
        population_sd: BTreeMap<ScoreType, Decimal>,
        default_item_correlation: Decimal,
    ) -> Self {
        Self {
            population_sd,
            default_r: default_item_correlation,
        }
    }

    /// Calculate the SEM-based interval around `score`.
    ///
    ///   rho = (n * r) / (1 + (n - 1) * r), capped at 0.99
    ///   SEM = sigma * sqrt(1 - rho)
    ///   CI  = score -/+ z * SEM, clamped to [0, 100]
    ///
    /// A zero evidence count is treated as one. Returns an error only for a
    /// confidence level outside (0, 1).
    pub fn calculate(
        &self,
        score: Decimal,
        score_type: ScoreType,
        evidence_count: u32,
        item_correlation: Option<Decimal>,
        confidence_level: f64,
    ) -> Result<ConfidenceInterval, ScoringError> {
        if !(confidence_level > 0.0 && confidence_level < 1.0) {
            return Err(ScoringError::InvalidConfidenceLevel(confidence_level));
        }

        let r = item_correlation.unwrap_or(self.default_r);
        let n = evidence_count.max(1);
        let n_dec = Decimal::from(n);

        let rho = clamp(
            (n_dec * r) / (Decimal::ONE + (n_dec - Decimal::ONE) * r),
            Decimal::ZERO,
            MAX_RELIABILITY,
        );

        let sigma = self
            .population_sd
            .get(&score_type)
            .copied()
            .unwrap_or(DEFAULT_SD);
        let variance_left = (Decimal::ONE - rho).to_f64().unwrap_or_default();
        let sem = quantize(sigma * to_decimal(variance_left.sqrt()));

        let z = to_decimal(norm_ppf((1.0 + confidence_level) / 2.0));
        let margin = quantize(z * sem);
        let ci_lower = clamp_score(score - margin);
        let ci_upper = clamp_score(score + margin);

        let ci = ConfidenceInterval {
            point_estimate: score,
            ci_lower,
            ci_upper,
            sem,
            reliability: rho,
            evidence_count: n,
            confidence_level,
        };
        info!(
            point_estimate = %ci.point_estimate,
            ci_lower = %ci.ci_lower,
            ci_upper = %ci.ci_upper,
            sem = %ci.sem,
            reliability = %ci.reliability,
            evidence_count = ci.evidence_count,
            score_type = score_type.key(),
            "confidence interval calculated"
        );
        Ok(ci)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn erf_matches_reference_values() {
        assert_eq!(erf(0.0), 0.0);
        assert!((erf(1.0) - 0.842_700_792_949_714_9).abs() < 1e-12);
        assert!((erf(-1.0) + 0.842_700_792_949_714_9).abs() < 1e-12);
        assert!((erf(2.0) - 0.995_322_265_018_952_7).abs() < 1e-12);
        assert_eq!(erf(7.0), 1.0);
        assert_eq!(erf(-7.0), -1.0);
    }

    #[test]
    fn erfinv_round_trips_through_erf() {
        for y in [-0.9, -0.5, -0.1, 0.0, 0.1, 0.5, 0.9, 0.99] {
            let x = erfinv(y);
            assert!((erf(x) - y).abs() < 1e-10, "round trip failed at y={y}");
        }
    }

    #[test]
    fn normal_quantile_matches_textbook_z_scores() {
        assert!((norm_ppf(0.975) - 1.959_963_984_540_054).abs() < 1e-9);
        assert!((norm_ppf(0.995) - 2.575_829_303_548_901).abs() < 1e-9);
        assert!(norm_ppf(0.5).abs() < 1e-12);
        assert!((norm_ppf(0.025) + 1.959_963_984_540_054).abs() < 1e-9);
    }

    #[test]
    fn single_evidence_item_keeps_reliability_at_r() {
        let calc = ConfidenceCalculator::new();
        let ci = calc
            .calculate(dec!(70), ScoreType::Vr, 1, None, 0.95)
            .expect("valid level");
        assert_eq!(ci.reliability, dec!(0.3));
        // sem = 15 * sqrt(0.7), with the root quantized to engine precision
        assert_eq!(ci.sem, dec!(12.5505));
        assert!(ci.ci_lower <= ci.point_estimate && ci.point_estimate <= ci.ci_upper);
    }

    #[test]
    fn more_evidence_narrows_the_interval() {
        let calc = ConfidenceCalculator::new();
        let sparse = calc
            .calculate(dec!(60), ScoreType::OrgAir, 2, None, 0.95)
            .expect("valid level");
        let rich = calc
            .calculate(dec!(60), ScoreType::OrgAir, 40, None, 0.95)
            .expect("valid level");
        assert!(rich.ci_width() < sparse.ci_width());
        assert!(rich.reliability > sparse.reliability);
    }

    #[test]
    fn reliability_caps_below_one() {
        let calc = ConfidenceCalculator::new();
        let ci = calc
            .calculate(dec!(50), ScoreType::Hr, 10_000, None, 0.95)
            .expect("valid level");
        assert!(ci.reliability <= dec!(0.99));
        assert!(ci.sem > Decimal::ZERO);
    }

    #[test]
    fn bounds_clamp_to_the_score_band() {
        let calc = ConfidenceCalculator::new();
        let low = calc
            .calculate(dec!(2), ScoreType::Vr, 1, None, 0.99)
            .expect("valid level");
        assert_eq!(low.ci_lower, Decimal::ZERO);
        let high = calc
            .calculate(dec!(99), ScoreType::Vr, 1, None, 0.99)
            .expect("valid level");
        assert_eq!(high.ci_upper, dec!(100));
    }

    #[test]
    fn invalid_confidence_level_is_rejected() {
        let calc = ConfidenceCalculator::new();
        assert!(calc.calculate(dec!(50), ScoreType::Vr, 5, None, 0.0).is_err());
        assert!(calc.calculate(dec!(50), ScoreType::Vr, 5, None, 1.0).is_err());
        assert!(calc.calculate(dec!(50), ScoreType::Vr, 5, None, 1.5).is_err());
    }

    #[test]
    fn zero_evidence_count_behaves_as_one() {
        let calc = ConfidenceCalculator::new();
        let zero = calc
            .calculate(dec!(50), ScoreType::Synergy, 0, None, 0.95)
            .expect("valid level");
        let one = calc
            .calculate(dec!(50), ScoreType::Synergy, 1, None, 0.95)
            .expect("valid level");
        assert_eq!(zero.reliability, one.reliability);
        assert_eq!(zero.evidence_count, 1);
    }

    #[test]
    fn serialized_interval_carries_its_width() {
        let calc = ConfidenceCalculator::new();
        let ci = calc
            .calculate(dec!(63.264), ScoreType::OrgAir, 10, None, 0.95)
            .expect("valid level");
        let json = serde_json::to_value(&ci).expect("serializes");
        assert!(json.get("ci_width").is_some());
        assert!(json.get("point_estimate").is_some());
        assert_eq!(json["evidence_count"], 10);
    }
}
