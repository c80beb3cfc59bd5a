//! Data tables attached to steps.
//!
//! A [`DataTable`] owns the raw cell text of a Gherkin table and offers the
//! two common reshapings: a two-column key/value map and a list of records
//! keyed by the header row.

mod error;

use hashbrown::HashMap;

pub use error::DataTableError;

/// Rectangular (or ragged) table of cell text, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTable {
    rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Build a table from rows of cells.
    ///
    /// # Examples
    /// ```
    /// use suitegen::DataTable;
    ///
    /// let table = DataTable::new([["name", "age"], ["Alice", "30"]]);
    /// assert_eq!(table.raw()[1], ["Alice", "30"]);
    /// ```
    pub fn new<R, C>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = C>,
        C: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Rows exactly as written, header included.
    #[must_use]
    pub fn raw(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// First row, when present.
    #[must_use]
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Rows after the header.
    #[must_use]
    pub fn body(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or_default()
    }

    /// Number of rows, header included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` when the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Treat every row as a key/value pair.
    ///
    /// Later rows overwrite earlier rows with the same key.
    ///
    /// # Errors
    /// Returns [`DataTableError::RowsHashArity`] for the first row that does
    /// not have exactly two cells.
    ///
    /// # Examples
    /// ```
    /// use suitegen::DataTable;
    ///
    /// let table = DataTable::new([["host", "localhost"], ["port", "8080"]]);
    /// let map = table.rows_hash().expect("two columns per row");
    /// assert_eq!(map["port"], "8080");
    /// ```
    pub fn rows_hash(&self) -> Result<HashMap<String, String>, DataTableError> {
        let mut map = HashMap::with_capacity(self.rows.len());
        for (index, row) in self.rows.iter().enumerate() {
            let [key, value] = row.as_slice() else {
                return Err(DataTableError::RowsHashArity {
                    row_number: index + 1,
                    actual: row.len(),
                });
            };
            map.insert(key.clone(), value.clone());
        }
        Ok(map)
    }

    /// Convert every body row into a record keyed by the header.
    ///
    /// Missing cells map to the empty string and cells beyond the header are
    /// ignored. Empty and header-only tables yield no records.
    ///
    /// # Examples
    /// ```
    /// use suitegen::DataTable;
    ///
    /// let table = DataTable::new([["name", "age"], ["Alice", "30"]]);
    /// let records = table.hashes();
    /// assert_eq!(records[0]["name"], "Alice");
    /// ```
    #[must_use]
    pub fn hashes(&self) -> Vec<HashMap<String, String>> {
        let Some(header) = self.header() else {
            return Vec::new();
        };
        self.body()
            .iter()
            .map(|row| {
                header
                    .iter()
                    .enumerate()
                    .map(|(column, name)| {
                        let cell = row.get(column).cloned().unwrap_or_default();
                        (name.clone(), cell)
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests;
