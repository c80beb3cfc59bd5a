//! Errors raised by step and hook handlers and by registration.

use std::error::Error as StdError;
use std::fmt;

use suitegen_patterns::PatternError;
use thiserror::Error;

use crate::datatable::DataTableError;
use crate::step_args::ArgumentError;

/// Failure reported by a step or hook handler.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StepError {
    /// Free-form failure message.
    #[error("{0}")]
    Failed(String),
    /// The handler asked for an argument the step did not supply.
    #[error(transparent)]
    Argument(#[from] ArgumentError),
    /// A data table could not be reshaped.
    #[error(transparent)]
    DataTable(#[from] DataTableError),
    /// Any other error raised by handler code.
    #[error(transparent)]
    Other(Box<dyn StdError + Send + Sync>),
}

impl StepError {
    /// Build a failure from a message.
    ///
    /// # Examples
    /// ```
    /// use suitegen::StepError;
    ///
    /// let err = StepError::msg("expected 3 but got 4");
    /// assert_eq!(err.to_string(), "expected 3 but got 4");
    /// ```
    pub fn msg(message: impl fmt::Display) -> Self {
        Self::Failed(message.to_string())
    }

    /// Wrap an arbitrary error.
    pub fn other(err: impl StdError + Send + Sync + 'static) -> Self {
        Self::Other(Box::new(err))
    }
}

/// Failure to register a step definition.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegistrationError {
    /// The step pattern could not be compiled.
    #[error(transparent)]
    Pattern(#[from] PatternError),
}
