//! Error types for step and hook execution failures.

use std::sync::Arc;

use suitegen_patterns::{ConversionError, StepKeyword};
use thiserror::Error;

use crate::error::{RegistrationError, StepError};
use crate::registry::HookKind;

/// Failure while running a scenario or one of its lifecycle phases.
///
/// Handler errors are wrapped in `Arc` so the enum stays `Clone`.
///
/// # Examples
/// ```
/// use suitegen::{ExecutionError, StepKeyword};
///
/// let error = ExecutionError::StepNotFound {
///     keyword: StepKeyword::Given,
///     text: "an unknown step".into(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "No step definition found for: Given an unknown step"
/// );
/// ```
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum ExecutionError {
    /// No registered definition matches the step.
    #[error("No step definition found for: {keyword} {text}")]
    StepNotFound {
        /// Keyword the step was written with.
        keyword: StepKeyword,
        /// Step text after placeholder substitution.
        text: String,
    },
    /// A capture could not be converted to its declared type.
    #[error("step '{keyword} {text}' has an unconvertible argument: {source}")]
    Conversion {
        /// Keyword the step was written with.
        keyword: StepKeyword,
        /// Step text after placeholder substitution.
        text: String,
        /// Conversion failure.
        #[source]
        source: ConversionError,
    },
    /// The step handler reported a failure.
    #[error("step '{keyword} {text}' failed: {source}")]
    StepFailed {
        /// Keyword the step was written with.
        keyword: StepKeyword,
        /// Step text after placeholder substitution.
        text: String,
        /// Error returned by the handler.
        #[source]
        source: Arc<StepError>,
    },
    /// A hook handler reported a failure.
    #[error("{kind} hook failed: {source}")]
    HookFailed {
        /// Lifecycle point of the failing hook.
        kind: HookKind,
        /// Error returned by the hook.
        #[source]
        source: Arc<StepError>,
    },
    /// A collaborator failed to register its definitions.
    #[error("collaborator '{collaborator}' failed to register: {source}")]
    Registration {
        /// Path of the collaborator file.
        collaborator: String,
        /// Registration failure.
        #[source]
        source: Arc<RegistrationError>,
    },
}

impl ExecutionError {
    /// Wrap a collaborator registration failure.
    pub fn registration(collaborator: impl Into<String>, source: RegistrationError) -> Self {
        Self::Registration {
            collaborator: collaborator.into(),
            source: Arc::new(source),
        }
    }

    /// Returns `true` for [`ExecutionError::StepNotFound`].
    #[must_use]
    pub fn is_step_not_found(&self) -> bool {
        matches!(self, Self::StepNotFound { .. })
    }
}
