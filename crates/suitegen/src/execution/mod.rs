//! Step execution.
//!
//! The [`StepExecutor`] resolves a feature step against a step registry,
//! assembles the handler's arguments and awaits the handler.

mod error;

use std::sync::Arc;

use suitegen_patterns::{Capture, ConversionError, convert};

use crate::context::Context;
use crate::registry::{StepMatch, StepRegistry};
use crate::step_args::{StepArg, StepArgs};
use crate::types::Step;

pub use error::ExecutionError;

/// Runs feature steps against one step registry.
#[derive(Debug, Clone)]
pub struct StepExecutor {
    registry: Arc<StepRegistry>,
}

impl StepExecutor {
    /// Create an executor resolving steps through `registry`.
    #[must_use]
    pub fn new(registry: Arc<StepRegistry>) -> Self {
        Self { registry }
    }

    /// Create an executor over [`StepRegistry::current`].
    #[must_use]
    pub fn current() -> Self {
        Self::new(StepRegistry::current())
    }

    /// Registry used for resolution.
    #[must_use]
    pub fn registry(&self) -> &Arc<StepRegistry> {
        &self.registry
    }

    /// Resolve `step`, build its arguments and run the matching handler
    /// against `context`.
    ///
    /// # Errors
    /// - [`ExecutionError::StepNotFound`] when no definition matches.
    /// - [`ExecutionError::Conversion`] when a capture does not fit its type.
    /// - [`ExecutionError::StepFailed`] when the handler fails.
    pub async fn execute(&self, context: &Context, step: &Step) -> Result<(), ExecutionError> {
        let Some(StepMatch {
            definition,
            captures,
        }) = self.registry.find_match(step.keyword(), step.text())
        else {
            return Err(ExecutionError::StepNotFound {
                keyword: step.keyword(),
                text: step.text().to_string(),
            });
        };
        let args = build_arguments(captures, step).map_err(|source| ExecutionError::Conversion {
            keyword: step.keyword(),
            text: step.text().to_string(),
            source,
        })?;
        log::debug!(
            "executing {} {} via '{}'",
            step.keyword(),
            step.text(),
            definition.pattern().source()
        );
        definition
            .invoke(context.clone(), args)
            .await
            .map_err(|source| ExecutionError::StepFailed {
                keyword: step.keyword(),
                text: step.text().to_string(),
                source: Arc::new(source),
            })
    }
}

/// Assemble handler arguments: converted captures in order, then the data
/// table, then the doc string.
///
/// Captures that did not participate in the match are skipped. Captures
/// without a declared kind are passed as text.
///
/// # Errors
/// Returns [`ConversionError`] when a typed capture cannot be converted.
pub fn build_arguments(captures: Vec<Capture>, step: &Step) -> Result<StepArgs, ConversionError> {
    let mut args = StepArgs::default();
    for Capture { value, kind } in captures {
        let Some(value) = value else {
            continue;
        };
        let arg = match kind {
            Some(kind) => StepArg::from(convert(&value, kind)?),
            None => StepArg::Text(value),
        };
        args.push(arg);
    }
    if let Some(table) = step.table() {
        args.push(StepArg::Table(table.clone()));
    }
    if let Some(doc_string) = step.doc_string() {
        args.push(StepArg::DocString(doc_string.clone()));
    }
    Ok(args)
}
