//! Lead scoring: outcome counts per attribute value become weights, the
//! weights are calibrated onto `[-100, 100]`, and each lead's score maps to a
//! likelihood band.

pub mod calibration;
pub mod config;
pub mod domain;
pub mod error;
pub mod likelihood;
pub mod model;
pub mod outcome;
pub mod router;
pub mod scorer;
pub mod service;
pub mod tables;
pub mod views;

#[cfg(test)]
mod tests;

pub use calibration::{AttributeWeights, Calibration, ScaleConvention};
pub use config::{ScoringConfig, DEFAULT_ATTRIBUTES, DEFAULT_OUTCOME_COLUMN};
pub use domain::{normalize_column, normalize_value, LeadRecord, RecordSet};
pub use error::LeadScoreError;
pub use likelihood::Likelihood;
pub use model::{AttributeDiagnostics, LeadScoreModel};
pub use outcome::{DealOutcome, OutcomeClassifier, DEFAULT_CLOSED_LABELS};
pub use router::lead_router;
pub use scorer::{LeadScore, LeadScorer, RangePolicy, ScoreComponent, SCORE_MAX, SCORE_MIN};
pub use service::{LeadScoringService, LeadServiceError};
pub use tables::{
    CountTable, OutcomeCounts, PercentShare, PercentTable, WeightRow, WeightTable, WEIGHT_OFFSET,
};
pub use views::{AttributeTablesView, CalibrationSummary, LeadScoreView};
