use super::outcome::DealOutcome;

/// Failures that stop a calibration or scoring request.
///
/// Every variant names the attribute or value at fault; none of them are
/// recoverable without recalibrating on a larger or cleaned record set.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LeadScoreError {
    #[error("attribute '{attribute}' has no {} leads to normalize against", .column.label())]
    DataInsufficient {
        attribute: String,
        column: DealOutcome,
    },
    #[error(
        "score range is zero (perfect {perfect_score:.3}, worst {worst_score:.3}); every attribute needs at least two distinct weights"
    )]
    DegenerateRange {
        perfect_score: f64,
        worst_score: f64,
    },
    #[error("attribute '{attribute}' has no calibrated weight for value '{value}'")]
    UnknownCategory { attribute: String, value: String },
    #[error("outcome column '{column}' is missing from the lead data")]
    MissingOutcomeColumn { column: String },
    #[error("attribute '{attribute}' is missing from the lead data")]
    UnknownAttribute { attribute: String },
    #[error("lead score {score} falls outside [-100, 100]")]
    ScoreOutOfRange { score: f64 },
}

impl LeadScoreError {
    /// Stable machine-readable tag for API payloads.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::DataInsufficient { .. } => "data_insufficient",
            Self::DegenerateRange { .. } => "degenerate_range",
            Self::UnknownCategory { .. } => "unknown_category",
            Self::MissingOutcomeColumn { .. } => "missing_outcome_column",
            Self::UnknownAttribute { .. } => "unknown_attribute",
            Self::ScoreOutOfRange { .. } => "score_out_of_range",
        }
    }
}
