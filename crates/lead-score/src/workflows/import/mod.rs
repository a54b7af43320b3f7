//! CSV ingestion of lead exports into a [`RecordSet`].

mod normalizer;
mod parser;

use crate::workflows::leads::RecordSet;
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug)]
pub enum LeadImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    /// Two headers name the same column once normalized.
    DuplicateColumn { column: String },
}

impl std::fmt::Display for LeadImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeadImportError::Io(err) => write!(f, "failed to read lead export: {}", err),
            LeadImportError::Csv(err) => write!(f, "invalid lead CSV data: {}", err),
            LeadImportError::DuplicateColumn { column } => {
                write!(f, "lead export has more than one '{}' column", column)
            }
        }
    }
}

impl std::error::Error for LeadImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LeadImportError::Io(err) => Some(err),
            LeadImportError::Csv(err) => Some(err),
            LeadImportError::DuplicateColumn { .. } => None,
        }
    }
}

impl From<std::io::Error> for LeadImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for LeadImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Loads a lead export where each row is a lead and each column an attribute.
pub struct LeadCsvImporter;

impl LeadCsvImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        outcome_column: &str,
    ) -> Result<RecordSet, LeadImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, outcome_column)
    }

    /// A missing outcome column is not an import failure; it is reported when
    /// the record set is calibrated.
    pub fn from_reader<R: Read>(
        reader: R,
        outcome_column: &str,
    ) -> Result<RecordSet, LeadImportError> {
        let export = parser::parse_export(reader)?;
        debug!(
            columns = export.columns.len(),
            leads = export.records.len(),
            "parsed lead export"
        );
        Ok(RecordSet::new(
            export.columns,
            outcome_column,
            export.records,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn blank_cells_become_null() {
        assert_eq!(normalizer::normalize_cell("   "), None);
        assert_eq!(normalizer::normalize_cell("\u{200b}"), None);
        assert_eq!(
            normalizer::normalize_cell(" High Equity "),
            Some("High Equity")
        );
    }

    #[test]
    fn importer_keeps_row_order_and_nulls() {
        let csv = "\u{feff}Equity,Occupancy,DEAL STATUS\n\
High Equity,Vacant,Closed Deal-No Further Action\n\
,Owner Occupied,Dead Lead\n\
Low Equity,,\n";

        let records =
            LeadCsvImporter::from_reader(Cursor::new(csv), "DEAL STATUS").expect("import succeeds");

        assert_eq!(records.columns(), ["Equity", "Occupancy", "DEAL STATUS"]);
        assert!(records.has_outcome_column());
        assert_eq!(records.len(), 3);
        assert_eq!(records.records()[0].get("Equity"), Some("High Equity"));
        assert_eq!(records.records()[1].get("Equity"), None);
        assert_eq!(records.outcome_label(&records.records()[2]), None);
    }

    #[test]
    fn short_rows_pad_with_nulls() {
        let csv = "Equity,Occupancy,DEAL STATUS\nHigh Equity\n";
        let records =
            LeadCsvImporter::from_reader(Cursor::new(csv), "DEAL STATUS").expect("import succeeds");

        let lead = records.get(0).expect("lead present");
        assert_eq!(lead.get("Equity"), Some("High Equity"));
        assert_eq!(lead.get("Occupancy"), None);
    }

    #[test]
    fn missing_outcome_column_still_imports() {
        let csv = "Equity\nHigh Equity\n";
        let records =
            LeadCsvImporter::from_reader(Cursor::new(csv), "DEAL STATUS").expect("import succeeds");
        assert!(!records.has_outcome_column());
    }

    #[test]
    fn headers_colliding_after_normalization_are_rejected() {
        let csv = "Size,Size ,DEAL STATUS\n\
Small,Large,Closed Deal-No Further Action\n\
Large,,Dead Lead\n";

        let error = LeadCsvImporter::from_reader(Cursor::new(csv), "DEAL STATUS")
            .expect_err("duplicate column");

        match error {
            LeadImportError::DuplicateColumn { column } => assert_eq!(column, "Size"),
            other => panic!("expected duplicate column error, got {other:?}"),
        }
    }

    #[test]
    fn importer_from_path_propagates_io_errors() {
        let error = LeadCsvImporter::from_path("./does-not-exist.csv", "DEAL STATUS")
            .expect_err("expected io error");

        match error {
            LeadImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
