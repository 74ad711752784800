//! Evidence-to-dimension aggregation.
//!
//! Each evidence item contributes to the dimensions its source maps onto,
//! with the contribution discounted by the item's own confidence and the
//! source's reliability. This is what lets a single weak source move a
//! dimension proportionally less than a strong one.

pub mod mapping;

pub use mapping::{mapping_from_rows, signal_dimension_map, weights_hash};
pub use mapping::{DimensionMapping, MappingRow, MappingTable};

use crate::decimal::{clamp_score, clamp_unit, quantize};
use crate::dimension::{Dimension, SignalSource};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// A score produced by a single evidence source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceScore {
    pub source: SignalSource,
    /// Raw score in [0, 100].
    pub raw_score: Decimal,
    /// Collector confidence in [0, 1].
    pub confidence: Decimal,
    /// Number of underlying evidence items (postings, patents, chunks...).
    pub evidence_count: u32,
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl EvidenceScore {
    /// Build an evidence score from a normalized signal record, clamping the
    /// numeric fields into their documented ranges.
    pub fn from_signal(
        source: SignalSource,
        normalized_score: Decimal,
        confidence: Decimal,
        evidence_count: u32,
        metadata: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        Self {
            source,
            raw_score: clamp_score(normalized_score),
            confidence: clamp_unit(confidence),
            evidence_count: evidence_count.max(1),
            metadata,
        }
    }
}

/// Aggregated score for one dimension.
#[derive(Debug, Clone, Serialize)]
pub struct DimensionScore {
    pub dimension: Dimension,
    pub score: Decimal,
    /// Sources that contributed, deduplicated, in insertion order.
    pub contributing_sources: Vec<SignalSource>,
    pub total_weight: Decimal,
    pub confidence: Decimal,
}

/// Per-dimension evidence coverage, for gap reporting.
#[derive(Debug, Clone, Serialize)]
pub struct DimensionCoverage {
    pub has_evidence: bool,
    pub source_count: usize,
    pub total_weight: Decimal,
    pub confidence: Decimal,
}

/// Spreads per-source evidence scores across the seven dimensions.
#[derive(Debug, Clone)]
pub struct EvidenceMapper {
    table: MappingTable,
}

impl Default for EvidenceMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl EvidenceMapper {
    /// Mapper over the built-in weight table.
    pub fn new() -> Self {
        Self {
            table: signal_dimension_map().clone(),
        }
    }

    /// Mapper over an externally calibrated weight table.
    pub fn with_table(table: MappingTable) -> Self {
        Self { table }
    }

    /// Fingerprint of the weight table this mapper scores with.
    pub fn weights_hash(&self) -> String {
        weights_hash(&self.table)
    }

    /// The weight table this mapper scores with.
    pub fn table(&self) -> &MappingTable {
        &self.table
    }

    /// Aggregate evidence into exactly one [`DimensionScore`] per dimension.
    ///
    /// Dimensions with no usable evidence score 50 with confidence 0; the
    /// output always carries all seven dimension keys, including for empty
    /// input.
    pub fn map_evidence_to_dimensions(
        &self,
        evidence_scores: &[EvidenceScore],
    ) -> BTreeMap<Dimension, DimensionScore> {
        let accumulated = self.accumulate(evidence_scores);

        let mut result = BTreeMap::new();
        for dimension in Dimension::ordered() {
            let acc = &accumulated[&dimension];
            let (score, confidence) = if acc.weight_total > Decimal::ZERO {
                (
                    clamp_score(quantize(acc.weighted_sum / acc.weight_total)),
                    Decimal::ONE.min(quantize(acc.weight_total / dec!(2))),
                )
            } else {
                (dec!(50), Decimal::ZERO)
            };
            result.insert(
                dimension,
                DimensionScore {
                    dimension,
                    score,
                    contributing_sources: acc.sources.clone(),
                    total_weight: acc.weight_total,
                    confidence,
                },
            );
        }

        debug!(
            evidence_items = evidence_scores.len(),
            "mapped evidence onto dimensions"
        );
        result
    }

    /// Coverage report over the same weighting, without producing scores.
    pub fn coverage_report(
        &self,
        evidence_scores: &[EvidenceScore],
    ) -> BTreeMap<Dimension, DimensionCoverage> {
        let accumulated = self.accumulate(evidence_scores);

        Dimension::ordered()
            .into_iter()
            .map(|dimension| {
                let acc = &accumulated[&dimension];
                let has_evidence = acc.weight_total > Decimal::ZERO;
                let confidence = if has_evidence {
                    Decimal::ONE.min(quantize(acc.weight_total / dec!(2)))
                } else {
                    Decimal::ZERO
                };
                (
                    dimension,
                    DimensionCoverage {
                        has_evidence,
                        source_count: acc.sources.len(),
                        total_weight: acc.weight_total,
                        confidence,
                    },
                )
            })
            .collect()
    }

    fn accumulate(&self, evidence_scores: &[EvidenceScore]) -> BTreeMap<Dimension, Accumulator> {
        let mut accumulated: BTreeMap<Dimension, Accumulator> = Dimension::ordered()
            .into_iter()
            .map(|dimension| (dimension, Accumulator::default()))
            .collect();

        for evidence in evidence_scores {
            let Some(mapping) = self.table.get(&evidence.source) else {
                warn!(source = evidence.source.key(), "no mapping row for source, skipping");
                continue;
            };
            for (dimension, weight) in mapping.weight_pairs() {
                let effective_weight = weight * evidence.confidence * mapping.reliability;
                let acc = accumulated.entry(dimension).or_default();
                acc.weighted_sum += evidence.raw_score * effective_weight;
                acc.weight_total += effective_weight;
                if !acc.sources.contains(&evidence.source) {
                    acc.sources.push(evidence.source);
                }
            }
        }

        accumulated
    }
}

#[derive(Debug, Default)]
struct Accumulator {
    weighted_sum: Decimal,
    weight_total: Decimal,
    sources: Vec<SignalSource>,
}
