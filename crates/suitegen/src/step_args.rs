//! Arguments handed to step handlers.

use derive_more::{Deref, IntoIterator};
use suitegen_patterns::CapturedValue;
use thiserror::Error;

use crate::datatable::DataTable;
use crate::docstring::DocString;

/// One argument passed to a step handler.
///
/// Captures come first in pattern order, followed by the step's data table
/// and then its doc string when present.
#[derive(Debug, Clone, PartialEq)]
pub enum StepArg {
    /// Value of an `{int}` parameter.
    Int(i64),
    /// Value of a `{float}` parameter.
    Float(f64),
    /// Value of a `{string}` or `{word}` parameter, or an untyped capture.
    Text(String),
    /// Data table attached to the step.
    Table(DataTable),
    /// Doc string attached to the step.
    DocString(DocString),
}

impl StepArg {
    fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "an integer",
            Self::Float(_) => "a float",
            Self::Text(_) => "text",
            Self::Table(_) => "a data table",
            Self::DocString(_) => "a doc string",
        }
    }
}

impl From<CapturedValue> for StepArg {
    fn from(value: CapturedValue) -> Self {
        match value {
            CapturedValue::Int(value) => Self::Int(value),
            CapturedValue::Float(value) => Self::Float(value),
            CapturedValue::Text(value) => Self::Text(value),
        }
    }
}

/// Error raised by the typed accessors of [`StepArgs`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// No argument exists at the requested position.
    #[error("step argument {index} is missing")]
    Missing {
        /// Zero-based position requested.
        index: usize,
    },
    /// The argument exists but has a different kind.
    #[error("step argument {index} is {actual}, not {expected}")]
    Mismatch {
        /// Zero-based position requested.
        index: usize,
        /// Kind the handler asked for.
        expected: &'static str,
        /// Kind actually supplied.
        actual: &'static str,
    },
    /// The step carries no data table or doc string.
    #[error("step has no {0}")]
    Absent(&'static str),
}

/// Ordered list of step arguments with typed accessors.
#[derive(Debug, Clone, Default, PartialEq, Deref, IntoIterator)]
pub struct StepArgs(Vec<StepArg>);

impl StepArgs {
    /// Wrap an argument list.
    #[must_use]
    pub fn new(args: Vec<StepArg>) -> Self {
        Self(args)
    }

    /// Append an argument.
    pub fn push(&mut self, arg: StepArg) {
        self.0.push(arg);
    }

    fn at(&self, index: usize) -> Result<&StepArg, ArgumentError> {
        self.0.get(index).ok_or(ArgumentError::Missing { index })
    }

    /// Integer argument at `index`.
    ///
    /// # Errors
    /// Returns [`ArgumentError`] when the argument is missing or not an integer.
    pub fn int(&self, index: usize) -> Result<i64, ArgumentError> {
        match self.at(index)? {
            StepArg::Int(value) => Ok(*value),
            other => Err(mismatch(index, "an integer", other)),
        }
    }

    /// Float argument at `index`.
    ///
    /// # Errors
    /// Returns [`ArgumentError`] when the argument is missing or not a float.
    pub fn float(&self, index: usize) -> Result<f64, ArgumentError> {
        match self.at(index)? {
            StepArg::Float(value) => Ok(*value),
            other => Err(mismatch(index, "a float", other)),
        }
    }

    /// Text argument at `index`.
    ///
    /// # Errors
    /// Returns [`ArgumentError`] when the argument is missing or not text.
    pub fn text(&self, index: usize) -> Result<&str, ArgumentError> {
        match self.at(index)? {
            StepArg::Text(value) => Ok(value),
            other => Err(mismatch(index, "text", other)),
        }
    }

    /// Data table attached to the step.
    ///
    /// # Errors
    /// Returns [`ArgumentError::Absent`] when the step has no table.
    pub fn table(&self) -> Result<&DataTable, ArgumentError> {
        self.0
            .iter()
            .find_map(|arg| match arg {
                StepArg::Table(table) => Some(table),
                _ => None,
            })
            .ok_or(ArgumentError::Absent("data table"))
    }

    /// Doc string attached to the step.
    ///
    /// # Errors
    /// Returns [`ArgumentError::Absent`] when the step has no doc string.
    pub fn doc_string(&self) -> Result<&DocString, ArgumentError> {
        self.0
            .iter()
            .find_map(|arg| match arg {
                StepArg::DocString(doc) => Some(doc),
                _ => None,
            })
            .ok_or(ArgumentError::Absent("doc string"))
    }
}

impl From<Vec<StepArg>> for StepArgs {
    fn from(args: Vec<StepArg>) -> Self {
        Self(args)
    }
}

fn mismatch(index: usize, expected: &'static str, actual: &StepArg) -> ArgumentError {
    ArgumentError::Mismatch {
        index,
        expected,
        actual: actual.kind(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StepArgs {
        StepArgs::new(vec![
            StepArg::Int(5),
            StepArg::Text("hello".into()),
            StepArg::Table(DataTable::new([["a", "b"]])),
        ])
    }

    #[test]
    fn typed_accessors_return_matching_values() {
        let args = sample();
        assert_eq!(args.int(0), Ok(5));
        assert_eq!(args.text(1), Ok("hello"));
        assert_eq!(args.table().map(DataTable::len), Ok(1));
        assert_eq!(args.len(), 3);
    }

    #[test]
    fn accessors_report_mismatches_and_gaps() {
        let args = sample();
        assert_eq!(
            args.float(0),
            Err(ArgumentError::Mismatch {
                index: 0,
                expected: "a float",
                actual: "an integer",
            })
        );
        assert_eq!(args.int(7), Err(ArgumentError::Missing { index: 7 }));
        assert_eq!(args.doc_string(), Err(ArgumentError::Absent("doc string")));
    }
}
