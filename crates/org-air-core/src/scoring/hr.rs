//! H^R (Systematic Opportunity).
//!
//!   H^R = baseline * (1 + delta * PF), clamped to [0, 100]
//!
//! The baseline is an explicit industry figure when the caller has one, or
//! the sector default table otherwise.

use crate::decimal::{clamp_score, quantize};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use tracing::info;

/// Position-adjustment factor (delta).
pub const DELTA: Decimal = dec!(0.15);

const DEFAULT_HR_BASELINE: Decimal = dec!(50);

static SECTOR_HR_BASELINES: OnceLock<BTreeMap<&'static str, Decimal>> = OnceLock::new();

/// Sector baseline H^R scores used when no industry figure is supplied.
fn sector_hr_baselines() -> &'static BTreeMap<&'static str, Decimal> {
    SECTOR_HR_BASELINES.get_or_init(|| {
        BTreeMap::from([
            ("technology", dec!(70)),
            ("financial_services", dec!(60)),
            ("healthcare", dec!(55)),
            ("business_services", dec!(50)),
            ("retail", dec!(48)),
            ("manufacturing", dec!(45)),
        ])
    })
}

/// H^R calculation result.
#[derive(Debug, Clone, Serialize)]
pub struct HrResult {
    pub hr_score: Decimal,
    pub baseline: Decimal,
    pub position_factor: Decimal,
    #[serde(rename = "delta")]
    pub delta_used: Decimal,
}

/// Computes H^R for a company.
#[derive(Debug, Clone)]
pub struct HrCalculator {
    sector_baselines: BTreeMap<String, Decimal>,
    delta: Decimal,
}

impl Default for HrCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl HrCalculator {
    pub fn new() -> Self {
        Self {
            sector_baselines: sector_hr_baselines()
                .iter()
                .map(|(sector, baseline)| ((*sector).to_string(), *baseline))
                .collect(),
            delta: DELTA,
        }
    }

    pub fn with_baselines(sector_baselines: BTreeMap<String, Decimal>) -> Self {
        Self {
            sector_baselines,
            delta: DELTA,
        }
    }

    pub fn with_delta(mut self, delta: Decimal) -> Self {
        self.delta = delta;
        self
    }

    /// Calculate H^R.
    ///
    /// `baseline_override` takes priority over the sector table (it is where
    /// an industry-level figure from a reference dataset enters). Sectors
    /// are matched case-insensitively.
    pub fn calculate(
        &self,
        sector: &str,
        position_factor: Decimal,
        baseline_override: Option<Decimal>,
    ) -> HrResult {
        let baseline = baseline_override.unwrap_or_else(|| {
            self.sector_baselines
                .get(sector.to_lowercase().as_str())
                .copied()
                .unwrap_or(DEFAULT_HR_BASELINE)
        });

        let hr_score = clamp_score(quantize(
            baseline * (Decimal::ONE + self.delta * position_factor),
        ));

        let result = HrResult {
            hr_score,
            baseline,
            position_factor,
            delta_used: self.delta,
        };
        info!(
            hr_score = %result.hr_score,
            baseline = %result.baseline,
            position_factor = %result.position_factor,
            delta = %result.delta_used,
            sector,
            "hr calculated"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_leader_position_lifts_baseline_by_delta() {
        let calc = HrCalculator::new();
        let result = calc.calculate("business_services", Decimal::ONE, Some(dec!(50)));
        assert_eq!(result.hr_score, dec!(57.5000));
        assert_eq!(result.baseline, dec!(50));
    }

    #[test]
    fn neutral_position_returns_the_baseline() {
        let calc = HrCalculator::new();
        let result = calc.calculate("technology", Decimal::ZERO, None);
        assert_eq!(result.hr_score, dec!(70.0000));
    }

    #[test]
    fn laggard_position_discounts_the_baseline() {
        let calc = HrCalculator::new();
        let result = calc.calculate("retail", dec!(-1), None);
        // 48 * (1 - 0.15) = 40.8
        assert_eq!(result.hr_score, dec!(40.8000));
    }

    #[test]
    fn override_beats_the_sector_table() {
        let calc = HrCalculator::new();
        let result = calc.calculate("technology", Decimal::ZERO, Some(dec!(62.5)));
        assert_eq!(result.baseline, dec!(62.5));
        assert_eq!(result.hr_score, dec!(62.5000));
    }

    #[test]
    fn unknown_sector_falls_back_to_fifty() {
        let calc = HrCalculator::new();
        let result = calc.calculate("mining", Decimal::ZERO, None);
        assert_eq!(result.baseline, dec!(50));
    }

    #[test]
    fn serialized_result_names_delta() {
        let calc = HrCalculator::new();
        let result = calc.calculate("healthcare", dec!(0.4), None);
        let json = serde_json::to_value(&result).expect("serializes");
        assert!(json.get("delta").is_some());
        assert!(json.get("delta_used").is_none());
    }
}
