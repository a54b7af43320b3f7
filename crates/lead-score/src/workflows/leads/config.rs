use serde::{Deserialize, Serialize};

use super::calibration::ScaleConvention;
use super::outcome::{OutcomeClassifier, DEFAULT_CLOSED_LABELS};
use super::scorer::RangePolicy;

/// Attributes scored when nothing else is configured, in scoring order.
pub const DEFAULT_ATTRIBUTES: [&str; 6] = [
    "Equity",
    "Property Condition",
    "Occupancy",
    "How Soon Would You Like to Settle?",
    "Property Type",
    "Assigned  To - Ac Manager - name",
];

pub const DEFAULT_OUTCOME_COLUMN: &str = "DEAL STATUS";

/// Knobs controlling how a lead export is turned into a scoring model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub attributes: Vec<String>,
    pub outcome_column: String,
    pub closed_labels: Vec<String>,
    #[serde(default)]
    pub scale: ScaleConvention,
    #[serde(default)]
    pub range_policy: RangePolicy,
}

impl ScoringConfig {
    pub fn classifier(&self) -> OutcomeClassifier {
        OutcomeClassifier::new(self.closed_labels.iter().cloned())
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            attributes: DEFAULT_ATTRIBUTES.iter().map(|name| name.to_string()).collect(),
            outcome_column: DEFAULT_OUTCOME_COLUMN.to_string(),
            closed_labels: DEFAULT_CLOSED_LABELS
                .iter()
                .map(|label| label.to_string())
                .collect(),
            scale: ScaleConvention::default(),
            range_policy: RangePolicy::default(),
        }
    }
}
