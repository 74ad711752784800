//! Position factor: a company's standing relative to sector peers.
//!
//!   PF = 0.6 * vr_component + 0.4 * mcap_component, bounded to [-1, 1]
//!
//! +1 reads as a clear leader, 0 as average, -1 as a laggard.

use crate::decimal::{clamp, quantize, to_decimal};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use tracing::info;

const VR_WEIGHT: Decimal = dec!(0.6);
const MCAP_WEIGHT: Decimal = dec!(0.4);
const DEFAULT_SECTOR_AVG: Decimal = dec!(50);

static SECTOR_AVG_VR: OnceLock<BTreeMap<&'static str, Decimal>> = OnceLock::new();

/// Calibrated sector-average V^R scores. Unknown sectors fall back to 50.
fn sector_avg_vr() -> &'static BTreeMap<&'static str, Decimal> {
    SECTOR_AVG_VR.get_or_init(|| {
        BTreeMap::from([
            ("technology", dec!(65)),
            ("financial_services", dec!(55)),
            ("healthcare", dec!(52)),
            ("business_services", dec!(50)),
            ("retail", dec!(48)),
            ("manufacturing", dec!(45)),
        ])
    })
}

/// Computes the position factor consumed by the H^R calculator.
#[derive(Debug, Clone)]
pub struct PositionFactorCalculator {
    sector_avg_vr: BTreeMap<String, Decimal>,
}

impl Default for PositionFactorCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionFactorCalculator {
    pub fn new() -> Self {
        Self {
            sector_avg_vr: sector_avg_vr()
                .iter()
                .map(|(sector, avg)| ((*sector).to_string(), *avg))
                .collect(),
        }
    }

    /// Calculator over recalibrated sector averages.
    pub fn with_sector_averages(sector_avg_vr: BTreeMap<String, Decimal>) -> Self {
        Self { sector_avg_vr }
    }

    /// Position factor in [-1, 1].
    ///
    /// `market_cap_percentile` is the company's in-sector market-cap rank in
    /// [0, 1] (0 = smallest, 1 = largest); a 0.5 percentile is neutral.
    /// Sectors are matched case-insensitively; unknown sectors use the
    /// neutral average of 50.
    pub fn calculate_position_factor(
        &self,
        vr_score: Decimal,
        sector: &str,
        market_cap_percentile: Decimal,
    ) -> Decimal {
        let sector_avg = self
            .sector_avg_vr
            .get(sector.to_lowercase().as_str())
            .copied()
            .unwrap_or(DEFAULT_SECTOR_AVG);

        let vr_component = clamp(
            quantize((vr_score - sector_avg) / dec!(50)),
            dec!(-1),
            Decimal::ONE,
        );
        let mcap_component = (market_cap_percentile - dec!(0.5)) * dec!(2);

        let pf = clamp(
            quantize(VR_WEIGHT * vr_component + MCAP_WEIGHT * mcap_component),
            dec!(-1),
            Decimal::ONE,
        );

        info!(
            %vr_score,
            sector,
            %sector_avg,
            %market_cap_percentile,
            %vr_component,
            %mcap_component,
            position_factor = %pf,
            "position factor calculated"
        );
        pf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_company_in_known_sector_sits_at_zero() {
        let calc = PositionFactorCalculator::new();
        let pf = calc.calculate_position_factor(dec!(65), "technology", dec!(0.5));
        assert_eq!(pf, dec!(0.0000));
    }

    #[test]
    fn sector_match_is_case_insensitive() {
        let calc = PositionFactorCalculator::new();
        let lower = calc.calculate_position_factor(dec!(70), "technology", dec!(0.6));
        let upper = calc.calculate_position_factor(dec!(70), "Technology", dec!(0.6));
        assert_eq!(lower, upper);
    }

    #[test]
    fn unknown_sector_uses_neutral_average() {
        let calc = PositionFactorCalculator::new();
        // vr_component = (50 - 50)/50 = 0, mcap neutral: PF = 0.
        let pf = calc.calculate_position_factor(dec!(50), "agriculture", dec!(0.5));
        assert_eq!(pf, dec!(0.0000));
    }

    #[test]
    fn leader_saturates_at_plus_one() {
        let calc = PositionFactorCalculator::new();
        let pf = calc.calculate_position_factor(dec!(100), "manufacturing", Decimal::ONE);
        assert_eq!(pf, Decimal::ONE);
    }

    #[test]
    fn laggard_saturates_at_minus_one() {
        let calc = PositionFactorCalculator::new();
        let pf = calc.calculate_position_factor(Decimal::ZERO, "technology", Decimal::ZERO);
        assert_eq!(pf, dec!(-1));
    }

    #[test]
    fn components_weight_sixty_forty() {
        let calc = PositionFactorCalculator::new();
        // vr_component = (60 - 50)/50 = 0.2; mcap = (0.75 - 0.5)*2 = 0.5.
        // PF = 0.6*0.2 + 0.4*0.5 = 0.32
        let pf = calc.calculate_position_factor(dec!(60), "business_services", dec!(0.75));
        assert_eq!(pf, dec!(0.3200));
    }
}
