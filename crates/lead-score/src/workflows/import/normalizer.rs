use crate::workflows::leads::{normalize_column, normalize_value};

pub(crate) fn normalize_header(value: &str) -> String {
    normalize_column(value)
}

/// Blank cells, including ones holding only zero-width characters, are null.
pub(crate) fn normalize_cell(value: &str) -> Option<&str> {
    normalize_value(value)
}
