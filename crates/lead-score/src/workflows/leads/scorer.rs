use serde::{Deserialize, Serialize};
use tracing::warn;

use super::calibration::{AttributeWeights, Calibration};
use super::domain::LeadRecord;
use super::error::LeadScoreError;
use super::likelihood::Likelihood;

pub const SCORE_MIN: i32 = -100;
pub const SCORE_MAX: i32 = 100;

/// What to do with a final score that escapes `[-100, 100]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangePolicy {
    /// Fail the request with [`LeadScoreError::ScoreOutOfRange`].
    #[default]
    Report,
    /// Clamp into range and log a warning.
    Clamp,
}

impl RangePolicy {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Report => "report",
            Self::Clamp => "clamp",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "report" => Some(Self::Report),
            "clamp" => Some(Self::Clamp),
            _ => None,
        }
    }
}

/// One attribute's contribution to a lead score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreComponent {
    pub attribute: String,
    pub value: Option<String>,
    pub weight: f64,
    /// The lead had no value, so the attribute's mean weight was used.
    pub imputed: bool,
}

/// Final score for a lead plus the trail that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadScore {
    pub score: i32,
    pub raw_score: f64,
    pub likelihood: Likelihood,
    pub components: Vec<ScoreComponent>,
}

/// Applies calibrated weights to individual leads.
pub struct LeadScorer<'a> {
    bindings: &'a [AttributeWeights],
    calibration: &'a Calibration,
    policy: RangePolicy,
}

impl<'a> LeadScorer<'a> {
    pub fn new(
        bindings: &'a [AttributeWeights],
        calibration: &'a Calibration,
        policy: RangePolicy,
    ) -> Self {
        Self {
            bindings,
            calibration,
            policy,
        }
    }

    pub fn score(&self, record: &LeadRecord) -> Result<LeadScore, LeadScoreError> {
        let components = self
            .bindings
            .iter()
            .map(|binding| component_for(binding, record))
            .collect::<Result<Vec<_>, _>>()?;

        let raw_score: f64 = components.iter().map(|component| component.weight).sum();
        let rounded = self.calibration.scale(raw_score).round_ties_even();
        let bounds = f64::from(SCORE_MIN)..=f64::from(SCORE_MAX);

        let bounded = if bounds.contains(&rounded) {
            rounded
        } else {
            match self.policy {
                RangePolicy::Report => {
                    return Err(LeadScoreError::ScoreOutOfRange { score: rounded })
                }
                RangePolicy::Clamp => {
                    warn!(score = rounded, raw_score, "clamping out-of-range lead score");
                    rounded.clamp(f64::from(SCORE_MIN), f64::from(SCORE_MAX))
                }
            }
        };
        let score = bounded as i32;

        Ok(LeadScore {
            score,
            raw_score,
            likelihood: Likelihood::from_score(score),
            components,
        })
    }
}

fn component_for(
    binding: &AttributeWeights,
    record: &LeadRecord,
) -> Result<ScoreComponent, LeadScoreError> {
    match record.get(&binding.attribute) {
        None => Ok(ScoreComponent {
            attribute: binding.attribute.clone(),
            value: None,
            weight: binding.table.mean_weight(),
            imputed: true,
        }),
        Some(value) => {
            let weight = binding.table.weight_of(value).ok_or_else(|| {
                LeadScoreError::UnknownCategory {
                    attribute: binding.attribute.clone(),
                    value: value.to_string(),
                }
            })?;
            Ok(ScoreComponent {
                attribute: binding.attribute.clone(),
                value: Some(value.to_string()),
                weight,
                imputed: false,
            })
        }
    }
}
