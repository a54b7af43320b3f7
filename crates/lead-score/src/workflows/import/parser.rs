use super::normalizer::{normalize_cell, normalize_header};
use super::LeadImportError;
use crate::workflows::leads::LeadRecord;
use std::collections::HashSet;
use std::io::Read;

pub(crate) struct ParsedExport {
    pub(crate) columns: Vec<String>,
    pub(crate) records: Vec<LeadRecord>,
}

pub(crate) fn parse_export<R: Read>(reader: R) -> Result<ParsedExport, LeadImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let columns: Vec<String> = csv_reader.headers()?.iter().map(normalize_header).collect();
    let mut seen = HashSet::with_capacity(columns.len());
    if let Some(column) = columns.iter().find(|column| !seen.insert(column.as_str())) {
        return Err(LeadImportError::DuplicateColumn {
            column: column.clone(),
        });
    }

    let mut records = Vec::new();

    for row in csv_reader.records() {
        let row = row?;
        let fields = columns
            .iter()
            .zip(row.iter())
            .map(|(column, cell)| (column.as_str(), normalize_cell(cell)));
        records.push(LeadRecord::from_fields(fields));
    }

    Ok(ParsedExport { columns, records })
}
