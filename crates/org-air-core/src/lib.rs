//! Evidence aggregation and Org-AI-R scoring engine.
//!
//! Turns heterogeneous external evidence (job postings, patents, tech-stack
//! detections, leadership text, reviews, board data, SEC filing sections)
//! into a bounded, auditable AI-readiness index with an SEM-based confidence
//! interval. Every component is a pure function over immutable inputs and
//! static reference tables, so the whole engine can be shared freely across
//! threads.

pub mod decimal;
pub mod dimension;
pub mod error;
pub mod evidence;
pub mod pipeline;
pub mod rubric;
pub mod scoring;
pub mod talent;

pub use dimension::{Dimension, SignalSource};
pub use error::ScoringError;
pub use evidence::{DimensionCoverage, DimensionScore, EvidenceMapper, EvidenceScore};
pub use pipeline::{
    alignment_from_dimensions, AssessmentInput, AssessmentOutcome, CompanyContext,
    FilingSection, ReviewStats, ScoringPipeline, SignalRecord,
};
pub use rubric::{RubricResult, RubricScorer, ScoreLevel};
pub use scoring::confidence::{ConfidenceCalculator, ConfidenceInterval, ScoreType};
pub use scoring::hr::{HrCalculator, HrResult};
pub use scoring::org_air::{OrgAirCalculator, OrgAirResult};
pub use scoring::position::PositionFactorCalculator;
pub use scoring::synergy::{SynergyCalculator, SynergyResult};
pub use scoring::vr::{VrCalculator, VrResult};
pub use talent::{JobAnalysis, JobPosting, TalentConcentrationCalculator};
