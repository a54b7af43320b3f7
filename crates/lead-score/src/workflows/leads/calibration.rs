use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::LeadScoreError;
use super::tables::WeightTable;

/// How a calibrated raw score is stretched onto `[-100, 100]`.
///
/// Both conventions produce the same final score; they differ only in the
/// intermediate span the scaler targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleConvention {
    /// Scale onto `[0, 200]`, then subtract 100.
    #[default]
    Span200,
    /// Scale onto `[0, 100]`, subtract 50, then double.
    Span100,
}

impl ScaleConvention {
    pub const fn target_span(self) -> f64 {
        match self {
            Self::Span200 => 200.0,
            Self::Span100 => 100.0,
        }
    }

    /// Map a value in `[0, target_span]` onto `[-100, 100]`.
    pub fn recenter(self, scaled: f64) -> f64 {
        match self {
            Self::Span200 => scaled - 100.0,
            Self::Span100 => (scaled - 50.0) * 2.0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Span200 => "span200",
            Self::Span100 => "span100",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "span200" | "200" => Some(Self::Span200),
            "span100" | "100" => Some(Self::Span100),
            _ => None,
        }
    }
}

/// An attribute paired with its calibrated weight table.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeWeights {
    pub attribute: String,
    pub table: WeightTable,
}

impl AttributeWeights {
    pub fn new(table: WeightTable) -> Self {
        Self {
            attribute: table.attribute().to_string(),
            table,
        }
    }
}

/// Constants that map any achievable raw score linearly onto the output range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Calibration {
    pub scaler: f64,
    pub worst_score: f64,
    pub perfect_score: f64,
    pub convention: ScaleConvention,
}

impl Calibration {
    /// Find the best and worst achievable totals across `bindings`.
    pub fn from_bindings(
        bindings: &[AttributeWeights],
        convention: ScaleConvention,
    ) -> Result<Self, LeadScoreError> {
        let (perfect_score, worst_score) =
            bindings
                .iter()
                .fold((0.0_f64, 0.0_f64), |(perfect, worst), binding| {
                    (
                        perfect + binding.table.max_weight(),
                        worst + binding.table.min_weight(),
                    )
                });

        let score_range = perfect_score - worst_score;
        if score_range.abs() < 1e-9 {
            return Err(LeadScoreError::DegenerateRange {
                perfect_score,
                worst_score,
            });
        }

        let scaler = convention.target_span() / score_range;
        debug!(
            attributes = bindings.len(),
            perfect_score,
            worst_score,
            scaler,
            convention = convention.label(),
            "calibrated score range"
        );

        Ok(Self {
            scaler,
            worst_score,
            perfect_score,
            convention,
        })
    }

    /// Unrounded final score for a raw weight sum.
    pub fn scale(&self, raw_score: f64) -> f64 {
        self.convention
            .recenter((raw_score - self.worst_score) * self.scaler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::leads::tables::CountTable;

    fn binding(attribute: &str, counts: &[(&str, u64, u64)]) -> AttributeWeights {
        let table = CountTable::from_counts(attribute, counts.iter().copied())
            .to_percent()
            .expect("percent table")
            .to_weights();
        AttributeWeights::new(table)
    }

    #[test]
    fn sums_best_and_worst_contributions() {
        let bindings = [
            binding("Size", &[("Small", 10, 0), ("Large", 0, 10)]),
            binding("Occupancy", &[("Vacant", 3, 1), ("Owner", 1, 3)]),
        ];

        let calibration =
            Calibration::from_bindings(&bindings, ScaleConvention::Span200).expect("calibrates");

        assert!((calibration.perfect_score - (200.0 + 150.0)).abs() < 1e-9);
        assert!((calibration.worst_score - (0.0 + 50.0)).abs() < 1e-9);
        assert!((calibration.scaler - 200.0 / 300.0).abs() < 1e-12);
    }

    #[test]
    fn conventions_agree_on_final_score() {
        let bindings = [binding(
            "Equity",
            &[("High", 25, 45), ("Medium", 100, 25), ("Low", 12, 100)],
        )];
        let wide = Calibration::from_bindings(&bindings, ScaleConvention::Span200).expect("200");
        let narrow = Calibration::from_bindings(&bindings, ScaleConvention::Span100).expect("100");

        for raw in [wide.worst_score, wide.perfect_score, 100.0, 137.5] {
            assert!((wide.scale(raw) - narrow.scale(raw)).abs() < 1e-9);
        }
        assert!((wide.scale(wide.perfect_score) - 100.0).abs() < 1e-9);
        assert!((wide.scale(wide.worst_score) + 100.0).abs() < 1e-9);
    }

    #[test]
    fn empty_binding_set_is_degenerate() {
        assert!(matches!(
            Calibration::from_bindings(&[], ScaleConvention::Span200),
            Err(LeadScoreError::DegenerateRange { .. })
        ));
    }

    #[test]
    fn parses_convention_names() {
        assert_eq!(ScaleConvention::parse("SPAN100"), Some(ScaleConvention::Span100));
        assert_eq!(ScaleConvention::parse("200"), Some(ScaleConvention::Span200));
        assert_eq!(ScaleConvention::parse("span50"), None);
    }
}
