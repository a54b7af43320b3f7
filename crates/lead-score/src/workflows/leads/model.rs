use chrono::{DateTime, Utc};

use super::calibration::{AttributeWeights, Calibration};
use super::config::ScoringConfig;
use super::domain::{normalize_column, LeadRecord, RecordSet};
use super::error::LeadScoreError;
use super::scorer::{LeadScore, LeadScorer};
use super::tables::{CountTable, PercentTable};
use super::views::{AttributeTablesView, CalibrationSummary};

/// Intermediate tables kept for diagnostics and charting.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDiagnostics {
    pub counts: CountTable,
    pub percents: PercentTable,
}

/// Weight tables and calibration constants derived from one record set.
///
/// The constants are only valid for the bindings they were computed from, so
/// both live here and are rebuilt together by [`LeadScoreModel::calibrate`].
#[derive(Debug, Clone)]
pub struct LeadScoreModel {
    config: ScoringConfig,
    diagnostics: Vec<AttributeDiagnostics>,
    bindings: Vec<AttributeWeights>,
    calibration: Calibration,
    record_count: usize,
    calibrated_at: DateTime<Utc>,
}

impl LeadScoreModel {
    pub fn calibrate(records: &RecordSet, config: &ScoringConfig) -> Result<Self, LeadScoreError> {
        if !records.has_outcome_column() {
            return Err(LeadScoreError::MissingOutcomeColumn {
                column: records.outcome_column().to_string(),
            });
        }

        let classifier = config.classifier();
        let mut diagnostics = Vec::with_capacity(config.attributes.len());
        let mut bindings = Vec::with_capacity(config.attributes.len());

        for attribute in &config.attributes {
            let attribute = normalize_column(attribute);
            let counts = CountTable::tabulate(records, &attribute, &classifier)?;
            let percents = counts.to_percent()?;
            bindings.push(AttributeWeights::new(percents.to_weights()));
            diagnostics.push(AttributeDiagnostics { counts, percents });
        }

        let calibration = Calibration::from_bindings(&bindings, config.scale)?;

        Ok(Self {
            config: config.clone(),
            diagnostics,
            bindings,
            calibration,
            record_count: records.len(),
            calibrated_at: Utc::now(),
        })
    }

    pub fn score(&self, record: &LeadRecord) -> Result<LeadScore, LeadScoreError> {
        LeadScorer::new(&self.bindings, &self.calibration, self.config.range_policy).score(record)
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    pub fn bindings(&self) -> &[AttributeWeights] {
        &self.bindings
    }

    pub fn diagnostics(&self) -> &[AttributeDiagnostics] {
        &self.diagnostics
    }

    pub fn record_count(&self) -> usize {
        self.record_count
    }

    pub fn calibrated_at(&self) -> DateTime<Utc> {
        self.calibrated_at
    }

    pub fn summary(&self) -> CalibrationSummary {
        CalibrationSummary::from_model(self)
    }

    pub fn table_views(&self) -> Vec<AttributeTablesView> {
        self.diagnostics
            .iter()
            .zip(&self.bindings)
            .map(|(diagnostics, binding)| AttributeTablesView::new(diagnostics, binding))
            .collect()
    }
}
