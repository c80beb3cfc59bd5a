//! Error types surfaced by the datatable runtime.

use thiserror::Error;

/// Errors raised when reshaping a data table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DataTableError {
    /// Raised by [`DataTable::rows_hash`](super::DataTable::rows_hash) when a
    /// row does not have exactly two cells.
    #[error("rowsHash requires exactly 2 columns per row, but got {actual} (row {row_number})")]
    RowsHashArity {
        /// 1-based index of the offending row.
        row_number: usize,
        /// Number of cells present in the offending row.
        actual: usize,
    },
}
