//! Static source-to-dimension weight table.
//!
//! One row per known signal source, loaded once behind a `OnceLock` and
//! never mutated, so concurrent readers can never observe a partial table.
//! Callers that calibrate weights externally can build an override table
//! from plain rows; the weights hash gives audits a stable fingerprint of
//! whichever table actually scored a company.

use crate::dimension::{Dimension, SignalSource};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::sync::OnceLock;
use tracing::warn;

/// Maps one signal source onto dimensions with weights and a reliability
/// discount applied to every contribution from that source.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionMapping {
    pub source: SignalSource,
    pub primary_dimension: Dimension,
    pub primary_weight: Decimal,
    pub secondary_mappings: BTreeMap<Dimension, Decimal>,
    pub reliability: Decimal,
}

impl DimensionMapping {
    /// Primary pair followed by the secondary pairs in dimension order.
    pub fn weight_pairs(&self) -> Vec<(Dimension, Decimal)> {
        let mut pairs = Vec::with_capacity(1 + self.secondary_mappings.len());
        pairs.push((self.primary_dimension, self.primary_weight));
        pairs.extend(self.secondary_mappings.iter().map(|(d, w)| (*d, *w)));
        pairs
    }
}

/// A flat weight row, e.g. deserialized from a calibration export.
#[derive(Debug, Clone, Deserialize)]
pub struct MappingRow {
    pub signal_source: String,
    pub dimension: String,
    pub weight: f64,
    pub is_primary: bool,
    pub reliability: f64,
}

pub type MappingTable = BTreeMap<SignalSource, DimensionMapping>;

static SIGNAL_TO_DIMENSION_MAP: OnceLock<MappingTable> = OnceLock::new();

/// The built-in source-to-dimension weight table.
pub fn signal_dimension_map() -> &'static MappingTable {
    SIGNAL_TO_DIMENSION_MAP.get_or_init(default_table)
}

fn default_table() -> MappingTable {
    let rows = [
        DimensionMapping {
            source: SignalSource::TechnologyHiring,
            primary_dimension: Dimension::TechnologyStack,
            primary_weight: dec!(0.7),
            secondary_mappings: BTreeMap::from([
                (Dimension::TalentSkills, dec!(0.2)),
                (Dimension::UseCasePortfolio, dec!(0.1)),
            ]),
            reliability: dec!(0.9),
        },
        DimensionMapping {
            source: SignalSource::InnovationActivity,
            primary_dimension: Dimension::UseCasePortfolio,
            primary_weight: dec!(0.8),
            secondary_mappings: BTreeMap::from([
                (Dimension::TechnologyStack, dec!(0.1)),
                (Dimension::CultureChange, dec!(0.1)),
            ]),
            reliability: dec!(0.85),
        },
        DimensionMapping {
            source: SignalSource::DigitalPresence,
            primary_dimension: Dimension::TechnologyStack,
            primary_weight: dec!(0.6),
            secondary_mappings: BTreeMap::from([(
                Dimension::DataInfrastructure,
                dec!(0.4),
            )]),
            reliability: dec!(0.75),
        },
        DimensionMapping {
            source: SignalSource::LeadershipSignals,
            primary_dimension: Dimension::LeadershipVision,
            primary_weight: dec!(0.7),
            secondary_mappings: BTreeMap::from([
                (Dimension::CultureChange, dec!(0.1)),
                (Dimension::AiGovernance, dec!(0.2)),
            ]),
            reliability: dec!(0.95),
        },
        DimensionMapping {
            source: SignalSource::SecItem1,
            primary_dimension: Dimension::UseCasePortfolio,
            primary_weight: dec!(0.5),
            secondary_mappings: BTreeMap::from([
                (Dimension::TechnologyStack, dec!(0.2)),
                (Dimension::LeadershipVision, dec!(0.3)),
            ]),
            reliability: dec!(0.95),
        },
        DimensionMapping {
            source: SignalSource::SecItem1a,
            primary_dimension: Dimension::AiGovernance,
            primary_weight: dec!(0.6),
            secondary_mappings: BTreeMap::from([(
                Dimension::DataInfrastructure,
                dec!(0.4),
            )]),
            reliability: dec!(0.9),
        },
        DimensionMapping {
            source: SignalSource::SecItem7,
            primary_dimension: Dimension::LeadershipVision,
            primary_weight: dec!(0.6),
            secondary_mappings: BTreeMap::from([
                (Dimension::UseCasePortfolio, dec!(0.2)),
                (Dimension::DataInfrastructure, dec!(0.2)),
            ]),
            reliability: dec!(0.9),
        },
        DimensionMapping {
            source: SignalSource::GlassdoorReviews,
            primary_dimension: Dimension::CultureChange,
            primary_weight: dec!(0.7),
            secondary_mappings: BTreeMap::from([
                (Dimension::TalentSkills, dec!(0.2)),
                (Dimension::LeadershipVision, dec!(0.1)),
            ]),
            reliability: dec!(0.6),
        },
        DimensionMapping {
            source: SignalSource::BoardComposition,
            primary_dimension: Dimension::LeadershipVision,
            primary_weight: dec!(0.7),
            secondary_mappings: BTreeMap::from([(Dimension::AiGovernance, dec!(0.3))]),
            reliability: dec!(0.85),
        },
    ];

    rows.into_iter().map(|row| (row.source, row)).collect()
}

/// Build a mapping table from flat rows.
///
/// Rows with unknown source or dimension tags are skipped with a warning;
/// an empty row set falls back to the built-in table.
pub fn mapping_from_rows(rows: &[MappingRow]) -> MappingTable {
    if rows.is_empty() {
        return signal_dimension_map().clone();
    }

    let mut table = MappingTable::new();
    for row in rows {
        let Some(source) = SignalSource::from_key(&row.signal_source) else {
            warn!(signal_source = %row.signal_source, "skipping mapping row with unknown source");
            continue;
        };
        let Some(dimension) = Dimension::from_key(&row.dimension) else {
            warn!(
                signal_source = %row.signal_source,
                dimension = %row.dimension,
                "skipping mapping row with unknown dimension"
            );
            continue;
        };
        let weight = crate::decimal::clamp_unit(crate::decimal::to_decimal(row.weight));
        let reliability =
            crate::decimal::clamp_unit(crate::decimal::to_decimal(row.reliability));

        let entry = table.entry(source).or_insert_with(|| DimensionMapping {
            source,
            primary_dimension: dimension,
            primary_weight: Decimal::ZERO,
            secondary_mappings: BTreeMap::new(),
            reliability,
        });
        if row.is_primary {
            entry.primary_dimension = dimension;
            entry.primary_weight = weight;
            entry.reliability = reliability;
        } else {
            entry.secondary_mappings.insert(dimension, weight);
        }
    }

    if table.is_empty() {
        return signal_dimension_map().clone();
    }
    table
}

/// Deterministic SHA-256 fingerprint of a weight table.
///
/// The digest covers every source, dimension, weight, and reliability in
/// canonical order, so the same calibration always hashes identically and
/// any weight change is visible in audit trails.
pub fn weights_hash(table: &MappingTable) -> String {
    let mut hasher = Sha256::new();
    for (source, mapping) in table {
        hasher.update(source.key().as_bytes());
        hasher.update(b"|");
        hasher.update(mapping.primary_dimension.key().as_bytes());
        hasher.update(b"=");
        hasher.update(mapping.primary_weight.normalize().to_string().as_bytes());
        for (dimension, weight) in &mapping.secondary_mappings {
            hasher.update(b",");
            hasher.update(dimension.key().as_bytes());
            hasher.update(b"=");
            hasher.update(weight.normalize().to_string().as_bytes());
        }
        hasher.update(b"@");
        hasher.update(mapping.reliability.normalize().to_string().as_bytes());
        hasher.update(b";");
    }
    format!("{:x}", hasher.finalize())
}
