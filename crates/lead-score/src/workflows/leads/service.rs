use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use super::config::ScoringConfig;
use super::domain::{LeadRecord, RecordSet};
use super::error::LeadScoreError;
use super::model::LeadScoreModel;
use super::views::{AttributeTablesView, CalibrationSummary, LeadScoreView};
use crate::workflows::import::{LeadCsvImporter, LeadImportError};

/// Holds the current calibrated model and serves scoring requests against it.
///
/// Recalibration swaps in a fully built model; readers keep whichever model
/// they already hold.
pub struct LeadScoringService {
    config: ScoringConfig,
    model: RwLock<Option<Arc<LeadScoreModel>>>,
}

impl LeadScoringService {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            config,
            model: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn calibrate(&self, records: &RecordSet) -> Result<CalibrationSummary, LeadServiceError> {
        let model = LeadScoreModel::calibrate(records, &self.config)?;
        let summary = model.summary();
        info!(
            leads = summary.record_count,
            attributes = summary.attributes.len(),
            scaler = summary.scaler,
            "lead score model calibrated"
        );

        *self.model.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(model));
        Ok(summary)
    }

    pub fn calibrate_csv(&self, csv: &str) -> Result<CalibrationSummary, LeadServiceError> {
        let records = LeadCsvImporter::from_reader(csv.as_bytes(), &self.config.outcome_column)?;
        self.calibrate(&records)
    }

    pub fn model(&self) -> Option<Arc<LeadScoreModel>> {
        self.model
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn require_model(&self) -> Result<Arc<LeadScoreModel>, LeadServiceError> {
        self.model().ok_or(LeadServiceError::NotCalibrated)
    }

    pub fn score(&self, record: &LeadRecord) -> Result<LeadScoreView, LeadServiceError> {
        let model = self.require_model()?;
        let score = model.score(record)?;
        Ok(LeadScoreView::from(score))
    }

    pub fn summary(&self) -> Result<CalibrationSummary, LeadServiceError> {
        Ok(self.require_model()?.summary())
    }

    pub fn tables(&self) -> Result<Vec<AttributeTablesView>, LeadServiceError> {
        Ok(self.require_model()?.table_views())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LeadServiceError {
    #[error("no lead score model has been calibrated yet")]
    NotCalibrated,
    #[error(transparent)]
    Scoring(#[from] LeadScoreError),
    #[error(transparent)]
    Import(#[from] LeadImportError),
}
