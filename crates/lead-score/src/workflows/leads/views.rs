use chrono::{DateTime, Utc};
use serde::Serialize;

use super::calibration::{AttributeWeights, ScaleConvention};
use super::likelihood::Likelihood;
use super::model::{AttributeDiagnostics, LeadScoreModel};
use super::scorer::{LeadScore, RangePolicy, ScoreComponent};
use super::tables::{CountTable, PercentTable, WeightTable};

#[derive(Debug, Clone, Serialize)]
pub struct CountRowView {
    pub value: String,
    pub closed: u64,
    pub non_closed: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CountTableView {
    pub rows: Vec<CountRowView>,
    pub total_closed: u64,
    pub total_non_closed: u64,
}

impl From<&CountTable> for CountTableView {
    fn from(table: &CountTable) -> Self {
        Self {
            rows: table
                .rows()
                .map(|(value, counts)| CountRowView {
                    value: value.to_string(),
                    closed: counts.closed,
                    non_closed: counts.non_closed,
                })
                .collect(),
            total_closed: table.total_closed(),
            total_non_closed: table.total_non_closed(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PercentRowView {
    pub value: String,
    pub closed_pct: f64,
    pub non_closed_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PercentTableView {
    pub rows: Vec<PercentRowView>,
}

impl From<&PercentTable> for PercentTableView {
    fn from(table: &PercentTable) -> Self {
        Self {
            rows: table
                .rows()
                .map(|(value, share)| PercentRowView {
                    value: value.to_string(),
                    closed_pct: share.closed,
                    non_closed_pct: share.non_closed,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WeightRowView {
    pub value: String,
    pub difference: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeightTableView {
    pub rows: Vec<WeightRowView>,
    pub min_weight: f64,
    pub max_weight: f64,
    pub mean_weight: f64,
}

impl From<&WeightTable> for WeightTableView {
    fn from(table: &WeightTable) -> Self {
        Self {
            rows: table
                .rows()
                .iter()
                .map(|row| WeightRowView {
                    value: row.value.clone(),
                    difference: row.difference,
                    weight: row.weight,
                })
                .collect(),
            min_weight: table.min_weight(),
            max_weight: table.max_weight(),
            mean_weight: table.mean_weight(),
        }
    }
}

/// Every derived table for one attribute, ready for a charting layer.
#[derive(Debug, Clone, Serialize)]
pub struct AttributeTablesView {
    pub attribute: String,
    pub counts: CountTableView,
    pub percents: PercentTableView,
    pub weights: WeightTableView,
}

impl AttributeTablesView {
    pub fn new(diagnostics: &AttributeDiagnostics, binding: &AttributeWeights) -> Self {
        Self {
            attribute: binding.attribute.clone(),
            counts: CountTableView::from(&diagnostics.counts),
            percents: PercentTableView::from(&diagnostics.percents),
            weights: WeightTableView::from(&binding.table),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CalibrationSummary {
    pub attributes: Vec<String>,
    pub record_count: usize,
    pub perfect_score: f64,
    pub worst_score: f64,
    pub scaler: f64,
    pub convention: ScaleConvention,
    pub range_policy: RangePolicy,
    pub calibrated_at: DateTime<Utc>,
}

impl CalibrationSummary {
    pub(crate) fn from_model(model: &LeadScoreModel) -> Self {
        let calibration = model.calibration();
        Self {
            attributes: model
                .bindings()
                .iter()
                .map(|binding| binding.attribute.clone())
                .collect(),
            record_count: model.record_count(),
            perfect_score: calibration.perfect_score,
            worst_score: calibration.worst_score,
            scaler: calibration.scaler,
            convention: calibration.convention,
            range_policy: model.config().range_policy,
            calibrated_at: model.calibrated_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LeadScoreView {
    pub score: i32,
    pub likelihood: Likelihood,
    pub likelihood_label: &'static str,
    pub raw_score: f64,
    pub components: Vec<ScoreComponent>,
}

impl From<LeadScore> for LeadScoreView {
    fn from(score: LeadScore) -> Self {
        Self {
            score: score.score,
            likelihood: score.likelihood,
            likelihood_label: score.likelihood.label(),
            raw_score: score.raw_score,
            components: score.components,
        }
    }
}
