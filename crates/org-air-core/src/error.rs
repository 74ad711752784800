/// Error raised when malformed numeric input reaches a scoring boundary.
///
/// In-range numeric input never fails: every calculator clamps rather than
/// rejects. Only values that cannot participate in decimal arithmetic at all
/// (NaN, infinities) or parameters outside their open domain surface here,
/// and always before any formula executes.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("value for {field} must be finite, got {value}")]
    NonFiniteInput { field: &'static str, value: f64 },
    #[error("confidence level must be inside (0, 1), got {0}")]
    InvalidConfidenceLevel(f64),
}
