//! Closed tag sets for the seven readiness dimensions and the known
//! evidence sources, plus the default dimension weights.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// The seven dimensions of AI readiness.
///
/// Aggregation matches exhaustively over this enum, so every output map is
/// guaranteed to carry exactly these seven keys.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    DataInfrastructure,
    AiGovernance,
    TechnologyStack,
    TalentSkills,
    LeadershipVision,
    UseCasePortfolio,
    CultureChange,
}

impl Dimension {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::DataInfrastructure,
            Self::AiGovernance,
            Self::TechnologyStack,
            Self::TalentSkills,
            Self::LeadershipVision,
            Self::UseCasePortfolio,
            Self::CultureChange,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::DataInfrastructure => "data_infrastructure",
            Self::AiGovernance => "ai_governance",
            Self::TechnologyStack => "technology_stack",
            Self::TalentSkills => "talent_skills",
            Self::LeadershipVision => "leadership_vision",
            Self::UseCasePortfolio => "use_case_portfolio",
            Self::CultureChange => "culture_change",
        }
    }

    pub fn from_key(raw: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|dimension| dimension.key() == raw.trim())
    }

    /// Default aggregation weight; the seven weights sum to exactly 1.0.
    pub fn default_weight(self) -> Decimal {
        match self {
            Self::DataInfrastructure => dec!(0.25),
            Self::AiGovernance => dec!(0.20),
            Self::TechnologyStack => dec!(0.15),
            Self::TalentSkills => dec!(0.15),
            Self::LeadershipVision => dec!(0.10),
            Self::UseCasePortfolio => dec!(0.10),
            Self::CultureChange => dec!(0.05),
        }
    }
}

/// External evidence sources the mapping table knows how to weight.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SignalSource {
    TechnologyHiring,
    InnovationActivity,
    DigitalPresence,
    LeadershipSignals,
    #[serde(rename = "sec_item_1")]
    SecItem1,
    #[serde(rename = "sec_item_1a")]
    SecItem1a,
    #[serde(rename = "sec_item_7")]
    SecItem7,
    GlassdoorReviews,
    BoardComposition,
}

impl SignalSource {
    pub const fn ordered() -> [Self; 9] {
        [
            Self::TechnologyHiring,
            Self::InnovationActivity,
            Self::DigitalPresence,
            Self::LeadershipSignals,
            Self::SecItem1,
            Self::SecItem1a,
            Self::SecItem7,
            Self::GlassdoorReviews,
            Self::BoardComposition,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::TechnologyHiring => "technology_hiring",
            Self::InnovationActivity => "innovation_activity",
            Self::DigitalPresence => "digital_presence",
            Self::LeadershipSignals => "leadership_signals",
            Self::SecItem1 => "sec_item_1",
            Self::SecItem1a => "sec_item_1a",
            Self::SecItem7 => "sec_item_7",
            Self::GlassdoorReviews => "glassdoor_reviews",
            Self::BoardComposition => "board_composition",
        }
    }

    pub fn from_key(raw: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|source| source.key() == raw.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn default_weights_sum_to_one() {
        let total: Decimal = Dimension::ordered()
            .into_iter()
            .map(Dimension::default_weight)
            .sum();
        assert_eq!(total, Decimal::ONE);
    }

    #[test]
    fn dimension_keys_round_trip() {
        for dimension in Dimension::ordered() {
            assert_eq!(Dimension::from_key(dimension.key()), Some(dimension));
        }
        assert_eq!(Dimension::from_key("not_a_dimension"), None);
    }

    #[test]
    fn source_keys_round_trip() {
        for source in SignalSource::ordered() {
            assert_eq!(SignalSource::from_key(source.key()), Some(source));
        }
    }

    #[test]
    fn serde_names_match_wire_contract() {
        let json = serde_json::to_string(&SignalSource::SecItem1a).expect("serializes");
        assert_eq!(json, "\"sec_item_1a\"");
        let json = serde_json::to_string(&Dimension::LeadershipVision).expect("serializes");
        assert_eq!(json, "\"leadership_vision\"");
    }
}
