//! Ordered keyword rubric scoring for filing-section text.
//!
//! Converts a blob of evidence text plus optional quantitative metrics into
//! a single dimension's (level, score, confidence). Never fails: when no
//! level is satisfied the scorer falls back to the nascent band.

mod criteria;

use crate::decimal::{quantize, to_decimal};
use crate::dimension::Dimension;
use criteria::{criteria_for, CriteriaRow};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// The five ordinal maturity bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreLevel {
    Nascent,
    Developing,
    Adequate,
    Good,
    Excellent,
}

impl ScoreLevel {
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Nascent => 1,
            Self::Developing => 2,
            Self::Adequate => 3,
            Self::Good => 4,
            Self::Excellent => 5,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Nascent => "Nascent",
            Self::Developing => "Developing",
            Self::Adequate => "Adequate",
            Self::Good => "Good",
            Self::Excellent => "Excellent",
        }
    }

    /// Lower edge of the level's score band.
    pub fn min_score(self) -> Decimal {
        match self {
            Self::Nascent => Decimal::ZERO,
            Self::Developing => dec!(20),
            Self::Adequate => dec!(40),
            Self::Good => dec!(60),
            Self::Excellent => dec!(80),
        }
    }

    /// Upper edge of the level's score band.
    pub fn max_score(self) -> Decimal {
        match self {
            Self::Nascent => dec!(19),
            Self::Developing => dec!(39),
            Self::Adequate => dec!(59),
            Self::Good => dec!(79),
            Self::Excellent => dec!(100),
        }
    }
}

/// Outcome of scoring one dimension against its rubric.
#[derive(Debug, Clone, Serialize)]
pub struct RubricResult {
    pub dimension: Dimension,
    pub level: ScoreLevel,
    pub score: Decimal,
    pub matched_keywords: Vec<&'static str>,
    pub keyword_match_count: usize,
    pub confidence: Decimal,
    pub rationale: String,
}

/// Scores free evidence text against the per-dimension keyword rubrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct RubricScorer;

impl RubricScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score a dimension from evidence text and optional quantitative
    /// metrics.
    ///
    /// Levels are evaluated 5 down to 1; a level is satisfied when the
    /// keyword hit count reaches its minimum and the strongest quantitative
    /// metric reaches its gate (a zero gate is always open). The score is
    /// interpolated inside the winning band by hit surplus. Total over its
    /// whole input domain.
    pub fn score_dimension(
        &self,
        dimension: Dimension,
        evidence_text: &str,
        quantitative_metrics: &BTreeMap<String, f64>,
    ) -> RubricResult {
        let text = evidence_text.to_lowercase();
        let quant_value = quantitative_metrics
            .values()
            .copied()
            .filter(|value| value.is_finite())
            .fold(0.0_f64, f64::max);

        for row in criteria_for(dimension) {
            let matched: Vec<&'static str> = row
                .keywords
                .iter()
                .copied()
                .filter(|keyword| text.contains(keyword))
                .collect();
            let hits = matched.len();

            let keyword_gate = hits >= row.min_keyword_matches;
            let quant_gate =
                row.quantitative_threshold == 0.0 || quant_value >= row.quantitative_threshold;
            if !(keyword_gate && quant_gate) {
                continue;
            }

            let result = Self::build_result(dimension, row, matched, hits);
            debug!(
                dimension = dimension.key(),
                level = result.level.ordinal(),
                hits,
                "rubric level selected"
            );
            return result;
        }

        // No level satisfied (possible only with stricter custom gates):
        // settle at the nascent band with low confidence.
        RubricResult {
            dimension,
            level: ScoreLevel::Nascent,
            score: dec!(10),
            matched_keywords: Vec::new(),
            keyword_match_count: 0,
            confidence: dec!(0.3),
            rationale: "no rubric level satisfied".to_string(),
        }
    }

    fn build_result(
        dimension: Dimension,
        row: &CriteriaRow,
        matched: Vec<&'static str>,
        hits: usize,
    ) -> RubricResult {
        let surplus = hits.saturating_sub(row.min_keyword_matches);
        let headroom = row.keywords.len().saturating_sub(row.min_keyword_matches).max(1);
        let ratio = Decimal::ONE.min(to_decimal(surplus as f64 / headroom as f64));

        let min_score = row.level.min_score();
        let max_score = row.level.max_score();
        let score = quantize(min_score + ratio * (max_score - min_score));

        let confidence =
            Decimal::ONE.min(to_decimal(hits as f64 / row.min_keyword_matches.max(1) as f64));

        let rationale = format!(
            "{} keyword hit(s) against level {} ({})",
            hits,
            row.level.ordinal(),
            row.level.label()
        );

        RubricResult {
            dimension,
            level: row.level,
            score,
            matched_keywords: matched,
            keyword_match_count: hits,
            confidence,
            rationale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }

    #[test]
    fn strong_text_and_metric_reach_level_five() {
        let scorer = RubricScorer::new();
        let text = "The platform runs MLOps on Kubernetes with real-time inference, \
                    a GPU cluster, vector search, and a feature store.";
        let result = scorer.score_dimension(
            Dimension::TechnologyStack,
            text,
            &metrics(&[("ai_intensity", 0.85)]),
        );
        assert_eq!(result.level, ScoreLevel::Excellent);
        assert!(result.score >= dec!(80));
        assert!(result.keyword_match_count >= 4);
        assert_eq!(result.confidence, Decimal::ONE);
    }

    #[test]
    fn quantitative_gate_holds_back_keyword_rich_text() {
        let scorer = RubricScorer::new();
        let text = "MLOps kubernetes model serving real-time inference gpu cluster vector search";
        // Plenty of level-5 keywords but the metric misses the 0.80 gate.
        let result = scorer.score_dimension(
            Dimension::TechnologyStack,
            text,
            &metrics(&[("ai_intensity", 0.50)]),
        );
        assert!(result.level.ordinal() < 5);
    }

    #[test]
    fn empty_text_lands_in_the_nascent_band() {
        let scorer = RubricScorer::new();
        let result =
            scorer.score_dimension(Dimension::DataInfrastructure, "", &BTreeMap::new());
        assert_eq!(result.level, ScoreLevel::Nascent);
        assert!(result.score <= ScoreLevel::Nascent.max_score());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let scorer = RubricScorer::new();
        let lower = scorer.score_dimension(
            Dimension::DataInfrastructure,
            "data warehouse, data lake, and a data pipeline on snowflake",
            &metrics(&[("coverage", 0.65)]),
        );
        let upper = scorer.score_dimension(
            Dimension::DataInfrastructure,
            "DATA WAREHOUSE, DATA LAKE, and a DATA PIPELINE on SNOWFLAKE",
            &metrics(&[("coverage", 0.65)]),
        );
        assert_eq!(lower.level, upper.level);
        assert_eq!(lower.score, upper.score);
    }

    #[test]
    fn score_interpolates_inside_the_band() {
        let scorer = RubricScorer::new();
        // Exactly the minimum hits pins the score to the band floor.
        let floor = scorer.score_dimension(
            Dimension::CultureChange,
            "change management plus digital awareness",
            &metrics(&[("signal", 0.45)]),
        );
        assert_eq!(floor.level, ScoreLevel::Adequate);
        assert_eq!(floor.score, ScoreLevel::Adequate.min_score());

        // Extra hits move the score up without leaving the band.
        let higher = scorer.score_dimension(
            Dimension::CultureChange,
            "change management, digital awareness, some innovation, learning programs",
            &metrics(&[("signal", 0.45)]),
        );
        assert_eq!(higher.level, ScoreLevel::Adequate);
        assert!(higher.score > floor.score);
        assert!(higher.score <= ScoreLevel::Adequate.max_score());
    }

    #[test]
    fn confidence_scales_with_hits_up_to_one() {
        let scorer = RubricScorer::new();
        let result = scorer.score_dimension(
            Dimension::AiGovernance,
            "data privacy policies under gdpr",
            &metrics(&[("signal", 0.45)]),
        );
        assert_eq!(result.level, ScoreLevel::Adequate);
        assert!(result.confidence <= Decimal::ONE);
        assert!(result.confidence > Decimal::ZERO);
    }

    #[test]
    fn non_finite_metrics_are_ignored() {
        let scorer = RubricScorer::new();
        let result = scorer.score_dimension(
            Dimension::UseCasePortfolio,
            "analytics and process optimization",
            &metrics(&[("bad", f64::NAN), ("ok", 0.42)]),
        );
        assert_eq!(result.level, ScoreLevel::Adequate);
    }
}
