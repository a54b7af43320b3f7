use std::collections::HashMap;

use tracing::debug;

use super::domain::RecordSet;
use super::error::LeadScoreError;
use super::outcome::{DealOutcome, OutcomeClassifier};

/// Uniform shift applied to every difference so weights land in `[0, 200]`.
pub const WEIGHT_OFFSET: f64 = 100.0;

/// Closed and non-closed tallies for one attribute value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    pub closed: u64,
    pub non_closed: u64,
}

/// Per-value outcome counts for one attribute, in first-occurrence order.
#[derive(Debug, Clone, PartialEq)]
pub struct CountTable {
    attribute: String,
    rows: Vec<(String, OutcomeCounts)>,
    index: HashMap<String, usize>,
}

impl CountTable {
    pub fn new(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Seed a table from known tallies, preserving the given order.
    pub fn from_counts<I, V>(attribute: impl Into<String>, counts: I) -> Self
    where
        I: IntoIterator<Item = (V, u64, u64)>,
        V: Into<String>,
    {
        let mut table = Self::new(attribute);
        for (value, closed, non_closed) in counts {
            let value: String = value.into();
            let row = table.row_mut(&value);
            row.closed += closed;
            row.non_closed += non_closed;
        }
        table
    }

    /// Count how each observed value of `attribute` splits across outcomes.
    ///
    /// Leads without the attribute are skipped. Leads with the attribute but no
    /// outcome still register the value, without contributing to either column.
    pub fn tabulate(
        records: &RecordSet,
        attribute: &str,
        classifier: &OutcomeClassifier,
    ) -> Result<Self, LeadScoreError> {
        if !records.has_outcome_column() {
            return Err(LeadScoreError::MissingOutcomeColumn {
                column: records.outcome_column().to_string(),
            });
        }
        if !records.has_column(attribute) {
            return Err(LeadScoreError::UnknownAttribute {
                attribute: attribute.to_string(),
            });
        }

        let mut table = Self::new(attribute);
        for record in records.records() {
            let Some(value) = record.get(attribute) else {
                continue;
            };
            let outcome = classifier.classify(records.outcome_label(record));
            table.observe(value, outcome);
        }

        debug!(
            attribute,
            values = table.len(),
            closed = table.total_closed(),
            non_closed = table.total_non_closed(),
            "tabulated attribute outcomes"
        );

        Ok(table)
    }

    /// Register one observation of `value`.
    pub fn observe(&mut self, value: &str, outcome: DealOutcome) {
        let row = self.row_mut(value);
        match outcome {
            DealOutcome::Closed => row.closed += 1,
            DealOutcome::NotClosed => row.non_closed += 1,
            DealOutcome::Unknown => {}
        }
    }

    fn row_mut(&mut self, value: &str) -> &mut OutcomeCounts {
        let position = match self.index.get(value) {
            Some(&position) => position,
            None => {
                let position = self.rows.len();
                self.index.insert(value.to_string(), position);
                self.rows.push((value.to_string(), OutcomeCounts::default()));
                position
            }
        };
        &mut self.rows[position].1
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, OutcomeCounts)> {
        self.rows
            .iter()
            .map(|(value, counts)| (value.as_str(), *counts))
    }

    pub fn get(&self, value: &str) -> Option<OutcomeCounts> {
        self.index.get(value).map(|&position| self.rows[position].1)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total_closed(&self) -> u64 {
        self.rows.iter().map(|(_, counts)| counts.closed).sum()
    }

    pub fn total_non_closed(&self) -> u64 {
        self.rows.iter().map(|(_, counts)| counts.non_closed).sum()
    }

    /// Express each count as a percentage of its outcome column.
    pub fn to_percent(&self) -> Result<PercentTable, LeadScoreError> {
        let total_closed = self.total_closed();
        if total_closed == 0 {
            return Err(LeadScoreError::DataInsufficient {
                attribute: self.attribute.clone(),
                column: DealOutcome::Closed,
            });
        }
        let total_non_closed = self.total_non_closed();
        if total_non_closed == 0 {
            return Err(LeadScoreError::DataInsufficient {
                attribute: self.attribute.clone(),
                column: DealOutcome::NotClosed,
            });
        }

        let rows = self
            .rows
            .iter()
            .map(|(value, counts)| {
                let share = PercentShare {
                    closed: counts.closed as f64 / total_closed as f64 * 100.0,
                    non_closed: counts.non_closed as f64 / total_non_closed as f64 * 100.0,
                };
                (value.clone(), share)
            })
            .collect();

        Ok(PercentTable {
            attribute: self.attribute.clone(),
            rows,
        })
    }
}

/// A value's share of all closed and all non-closed leads, in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PercentShare {
    pub closed: f64,
    pub non_closed: f64,
}

/// Percent view of a [`CountTable`]. Never empty: both outcome columns had a
/// non-zero total when it was built.
#[derive(Debug, Clone, PartialEq)]
pub struct PercentTable {
    attribute: String,
    rows: Vec<(String, PercentShare)>,
}

impl PercentTable {
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, PercentShare)> {
        self.rows.iter().map(|(value, share)| (value.as_str(), *share))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Derive the signed closed-minus-non-closed gap per value, shifted by
    /// [`WEIGHT_OFFSET`].
    pub fn to_weights(&self) -> WeightTable {
        let rows: Vec<WeightRow> = self
            .rows
            .iter()
            .map(|(value, share)| {
                let difference = share.closed - share.non_closed;
                WeightRow {
                    value: value.clone(),
                    difference,
                    weight: difference + WEIGHT_OFFSET,
                }
            })
            .collect();

        WeightTable::from_rows(self.attribute.clone(), rows)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeightRow {
    pub value: String,
    /// Closed percent minus non-closed percent, in `[-100, 100]`.
    pub difference: f64,
    /// `difference` shifted by [`WEIGHT_OFFSET`], in `[0, 200]`.
    pub weight: f64,
}

/// Calibrated weight per observed attribute value.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable {
    attribute: String,
    rows: Vec<WeightRow>,
    index: HashMap<String, usize>,
    min: f64,
    max: f64,
    mean: f64,
}

impl WeightTable {
    fn from_rows(attribute: String, rows: Vec<WeightRow>) -> Self {
        let index = rows
            .iter()
            .enumerate()
            .map(|(position, row)| (row.value.clone(), position))
            .collect();
        let min = rows
            .iter()
            .map(|row| row.weight)
            .fold(f64::INFINITY, f64::min);
        let max = rows
            .iter()
            .map(|row| row.weight)
            .fold(f64::NEG_INFINITY, f64::max);
        let mean = rows.iter().map(|row| row.weight).sum::<f64>() / rows.len() as f64;

        Self {
            attribute,
            rows,
            index,
            min,
            max,
            mean,
        }
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn rows(&self) -> &[WeightRow] {
        &self.rows
    }

    pub fn weight_of(&self, value: &str) -> Option<f64> {
        self.index
            .get(value)
            .map(|&position| self.rows[position].weight)
    }

    pub fn min_weight(&self) -> f64 {
        self.min
    }

    pub fn max_weight(&self) -> f64 {
        self.max
    }

    /// Fallback weight for leads missing this attribute.
    pub fn mean_weight(&self) -> f64 {
        self.mean
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
