use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Deal statuses that count as a closed deal unless configured otherwise.
pub const DEFAULT_CLOSED_LABELS: [&str; 2] = [
    "Seller Contract Received-Deal For Sale",
    "Closed Deal-No Further Action",
];

/// Binary deal outcome, plus `Unknown` for leads without a recorded status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealOutcome {
    Closed,
    NotClosed,
    Unknown,
}

impl DealOutcome {
    pub const fn label(self) -> &'static str {
        match self {
            DealOutcome::Closed => "closed",
            DealOutcome::NotClosed => "non-closed",
            DealOutcome::Unknown => "unknown",
        }
    }
}

/// Maps raw deal status labels onto [`DealOutcome`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeClassifier {
    closed_labels: BTreeSet<String>,
}

impl OutcomeClassifier {
    pub fn new<I, S>(closed_labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            closed_labels: closed_labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn classify(&self, label: Option<&str>) -> DealOutcome {
        match label.map(str::trim) {
            None | Some("") => DealOutcome::Unknown,
            Some(label) if self.closed_labels.contains(label) => DealOutcome::Closed,
            Some(_) => DealOutcome::NotClosed,
        }
    }

    pub fn closed_labels(&self) -> impl Iterator<Item = &str> {
        self.closed_labels.iter().map(String::as_str)
    }
}

impl Default for OutcomeClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_CLOSED_LABELS)
    }
}
