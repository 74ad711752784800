//! The chained readiness calculators.
//!
//! V^R (idiosyncratic readiness) feeds the position factor, which feeds
//! H^R (systematic opportunity); synergy captures their interaction and the
//! Org-AI-R composite folds all three together with an SEM-based confidence
//! interval. All calculators are pure and clamp rather than fail.

pub mod confidence;
pub mod hr;
pub mod org_air;
pub mod position;
pub mod synergy;
pub mod vr;
