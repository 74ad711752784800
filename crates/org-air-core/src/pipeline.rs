//! End-to-end assessment pipeline.
//!
//! Chains the components for a single company: signal records and rubric
//! scoring over filing text become evidence, evidence becomes dimension
//! scores, then TC -> V^R -> position factor -> H^R -> synergy -> Org-AI-R.
//! One company's bad record never aborts the run: unknown categories are
//! skipped with a warning, and only non-finite numeric input is rejected.

use crate::decimal::{clamp, clamp_unit, quantize, try_to_decimal};
use crate::dimension::{Dimension, SignalSource};
use crate::error::ScoringError;
use crate::evidence::{DimensionScore, EvidenceMapper, EvidenceScore};
use crate::rubric::RubricScorer;
use crate::scoring::hr::HrCalculator;
use crate::scoring::org_air::{OrgAirCalculator, OrgAirResult};
use crate::scoring::position::PositionFactorCalculator;
use crate::scoring::synergy::SynergyCalculator;
use crate::scoring::vr::VrCalculator;
use crate::talent::{JobPosting, TalentConcentrationCalculator};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use serde_json::json;
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Company-level inputs the caller looks up from its reference data.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyContext {
    pub company_id: String,
    pub sector: String,
    /// In-sector market-cap rank in [0, 1].
    pub market_cap_percentile: f64,
    /// Industry-level H^R baseline; the sector default applies when absent.
    #[serde(default)]
    pub industry_baseline: Option<f64>,
    #[serde(default = "default_timing_factor")]
    pub timing_factor: f64,
}

fn default_timing_factor() -> f64 {
    1.0
}

/// A normalized external-signal record as collectors emit them.
#[derive(Debug, Clone, Deserialize)]
pub struct SignalRecord {
    /// Signal source tag, e.g. "technology_hiring".
    pub category: String,
    /// Score in [0, 100].
    pub normalized_score: f64,
    /// Collector confidence in [0, 1].
    pub confidence: f64,
    #[serde(default)]
    pub evidence_count: Option<u32>,
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

/// A filing section to be scored through the keyword rubric.
#[derive(Debug, Clone, Deserialize)]
pub struct FilingSection {
    pub source: SignalSource,
    pub text: String,
    #[serde(default)]
    pub quantitative_metrics: BTreeMap<String, f64>,
}

/// Employee-review aggregates feeding the talent concentration ratio.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ReviewStats {
    #[serde(default)]
    pub individual_mentions: u32,
    #[serde(default)]
    pub review_count: u32,
}

/// Everything needed to score one company.
#[derive(Debug, Clone, Deserialize)]
pub struct AssessmentInput {
    pub company: CompanyContext,
    #[serde(default)]
    pub signals: Vec<SignalRecord>,
    #[serde(default)]
    pub filing_sections: Vec<FilingSection>,
    #[serde(default)]
    pub job_postings: Vec<JobPosting>,
    #[serde(default)]
    pub reviews: ReviewStats,
    #[serde(default = "default_confidence_level")]
    pub confidence_level: f64,
}

fn default_confidence_level() -> f64 {
    0.95
}

/// The full assessment result plus the intermediates worth auditing.
#[derive(Debug, Clone)]
pub struct AssessmentOutcome {
    pub org_air: OrgAirResult,
    pub dimension_scores: BTreeMap<Dimension, DimensionScore>,
    pub talent_concentration: Decimal,
    pub position_factor: Decimal,
    pub alignment: Decimal,
    /// Fingerprint of the mapping table that scored this company.
    pub weights_hash: String,
}

/// Orchestrates one company's scoring run.
#[derive(Debug, Clone, Default)]
pub struct ScoringPipeline {
    mapper: EvidenceMapper,
    rubric: RubricScorer,
    talent: TalentConcentrationCalculator,
    vr: VrCalculator,
    position: PositionFactorCalculator,
    hr: HrCalculator,
    synergy: SynergyCalculator,
    org_air: OrgAirCalculator,
}

impl ScoringPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pipeline over an externally calibrated evidence mapper.
    pub fn with_mapper(mapper: EvidenceMapper) -> Self {
        Self {
            mapper,
            ..Self::default()
        }
    }

    /// Score one company end to end.
    ///
    /// Fails only for non-finite numeric input or an out-of-range
    /// confidence level; everything else clamps or is skipped with a
    /// warning.
    pub fn score(&self, input: &AssessmentInput) -> Result<AssessmentOutcome, ScoringError> {
        let evidence = self.build_evidence(input)?;
        let evidence_count: u32 = evidence
            .iter()
            .map(|e| e.evidence_count)
            .sum::<u32>()
            .max(1);

        let dimension_scores = self.mapper.map_evidence_to_dimensions(&evidence);

        let analysis = self.talent.analyze_job_postings(&input.job_postings);
        let talent_concentration = self.talent.calculate_tc(
            &analysis,
            input.reviews.individual_mentions,
            input.reviews.review_count,
        );

        let score_map: BTreeMap<Dimension, Decimal> = dimension_scores
            .iter()
            .map(|(dimension, score)| (*dimension, score.score))
            .collect();
        let vr_result = self.vr.calculate(&score_map, talent_concentration);

        let market_cap_percentile = clamp_unit(try_to_decimal(
            input.company.market_cap_percentile,
            "market_cap_percentile",
        )?);
        let position_factor = self.position.calculate_position_factor(
            vr_result.vr_score,
            &input.company.sector,
            market_cap_percentile,
        );

        let baseline_override = input
            .company
            .industry_baseline
            .map(|b| try_to_decimal(b, "industry_baseline"))
            .transpose()?;
        let hr_result =
            self.hr
                .calculate(&input.company.sector, position_factor, baseline_override);

        let alignment = alignment_from_dimensions(&score_map);
        let timing_factor = try_to_decimal(input.company.timing_factor, "timing_factor")?;
        let synergy_result =
            self.synergy
                .calculate(vr_result.vr_score, hr_result.hr_score, alignment, timing_factor);

        let org_air = self.org_air.calculate(
            &input.company.company_id,
            &input.company.sector,
            vr_result,
            hr_result,
            synergy_result,
            evidence_count,
            input.confidence_level,
        )?;

        info!(
            company_id = %input.company.company_id,
            final_score = %org_air.final_score,
            evidence_count,
            %talent_concentration,
            %position_factor,
            %alignment,
            "assessment scored"
        );

        Ok(AssessmentOutcome {
            org_air,
            dimension_scores,
            talent_concentration,
            position_factor,
            alignment,
            weights_hash: self.mapper.weights_hash(),
        })
    }

    /// Turn signal records and rubric-scored filing sections into evidence.
    fn build_evidence(
        &self,
        input: &AssessmentInput,
    ) -> Result<Vec<EvidenceScore>, ScoringError> {
        let mut evidence = Vec::with_capacity(input.signals.len() + input.filing_sections.len());

        for signal in &input.signals {
            let Some(source) = SignalSource::from_key(&signal.category) else {
                warn!(category = %signal.category, "unknown signal category, skipping");
                continue;
            };
            let raw_score = try_to_decimal(signal.normalized_score, "normalized_score")?;
            let confidence = try_to_decimal(signal.confidence, "confidence")?;
            evidence.push(EvidenceScore::from_signal(
                source,
                raw_score,
                confidence,
                signal.evidence_count.unwrap_or(1),
                signal.metadata.clone(),
            ));
        }

        for section in &input.filing_sections {
            let Some(mapping) = self.mapper.table().get(&section.source) else {
                warn!(source = section.source.key(), "no mapping row for filing source, skipping");
                continue;
            };
            let rubric_result = self.rubric.score_dimension(
                mapping.primary_dimension,
                &section.text,
                &section.quantitative_metrics,
            );
            let mut metadata = serde_json::Map::new();
            metadata.insert("rubric_level".into(), json!(rubric_result.level.ordinal()));
            metadata.insert(
                "keyword_match_count".into(),
                json!(rubric_result.keyword_match_count),
            );
            metadata.insert("rationale".into(), json!(rubric_result.rationale));
            evidence.push(EvidenceScore::from_signal(
                section.source,
                rubric_result.score,
                rubric_result.confidence,
                1,
                metadata,
            ));
        }

        Ok(evidence)
    }
}

/// Strategic alignment derived from the leadership and governance
/// dimensions, bounded to [0.5, 0.95].
pub fn alignment_from_dimensions(scores: &BTreeMap<Dimension, Decimal>) -> Decimal {
    let leadership = scores
        .get(&Dimension::LeadershipVision)
        .copied()
        .unwrap_or(dec!(50));
    let governance = scores
        .get(&Dimension::AiGovernance)
        .copied()
        .unwrap_or(dec!(50));
    let raw = (dec!(0.6) * leadership + dec!(0.4) * governance) / dec!(100);
    clamp(quantize(raw), dec!(0.5), dec!(0.95))
}
