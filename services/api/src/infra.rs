use lead_score::config::AppConfig;
use lead_score::error::AppError;
use lead_score::workflows::import::LeadCsvImporter;
use lead_score::workflows::leads::{
    LeadScoreModel, RangePolicy, RecordSet, ScaleConvention, ScoringConfig,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Command-line adjustments applied on top of the environment's scoring config.
#[derive(Debug, Default)]
pub(crate) struct ScoringOverrides {
    pub(crate) attributes: Vec<String>,
    pub(crate) scale: Option<ScaleConvention>,
    pub(crate) clamp: bool,
}

impl ScoringOverrides {
    pub(crate) fn apply(self, mut config: ScoringConfig) -> ScoringConfig {
        if !self.attributes.is_empty() {
            config.attributes = self.attributes;
        }
        if let Some(scale) = self.scale {
            config.scale = scale;
        }
        if self.clamp {
            config.range_policy = RangePolicy::Clamp;
        }
        config
    }
}

pub(crate) fn scoring_config(overrides: ScoringOverrides) -> Result<ScoringConfig, AppError> {
    let config = AppConfig::load()?;
    Ok(overrides.apply(config.scoring))
}

pub(crate) fn calibrate_export(
    path: &Path,
    config: &ScoringConfig,
) -> Result<(RecordSet, LeadScoreModel), AppError> {
    let records = LeadCsvImporter::from_path(path, &config.outcome_column)?;
    let model = LeadScoreModel::calibrate(&records, config)?;
    Ok((records, model))
}

pub(crate) fn parse_scale(raw: &str) -> Result<ScaleConvention, String> {
    ScaleConvention::parse(raw)
        .ok_or_else(|| format!("expected 'span200' or 'span100', got '{raw}'"))
}
