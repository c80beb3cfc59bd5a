//! Core runtime types shared by the registries, executor and generated code.

use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use regex::Regex;
use suitegen_patterns::{PatternError, StepKeyword, StepPattern};

use crate::context::Context;
use crate::datatable::DataTable;
use crate::docstring::DocString;
use crate::error::StepError;
use crate::step_args::StepArgs;

/// Future returned by step and hook handlers.
pub type StepFuture = LocalBoxFuture<'static, Result<(), StepError>>;

/// Type-erased step handler.
pub type StepHandler = Arc<dyn Fn(Context, StepArgs) -> StepFuture + Send + Sync>;

/// Type-erased hook handler.
pub type HookHandler = Arc<dyn Fn(Context) -> StepFuture + Send + Sync>;

/// Erase a step handler closure or function.
///
/// # Examples
/// ```
/// use suitegen::{Context, StepArgs, StepError, step_handler};
///
/// let handler = step_handler(|context: Context, args: StepArgs| async move {
///     context.insert("total", args.int(0)?);
///     Ok::<_, StepError>(())
/// });
/// # let _ = handler;
/// ```
pub fn step_handler<F, Fut>(handler: F) -> StepHandler
where
    F: Fn(Context, StepArgs) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), StepError>> + 'static,
{
    Arc::new(move |context, args| handler(context, args).boxed_local())
}

/// Erase a hook handler closure or function.
pub fn hook_handler<F, Fut>(handler: F) -> HookHandler
where
    F: Fn(Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), StepError>> + 'static,
{
    Arc::new(move |context| handler(context).boxed_local())
}

/// Values accepted as step patterns: expression text or a precompiled regex.
pub trait IntoStepPattern {
    /// Compile `self` into a [`StepPattern`].
    ///
    /// # Errors
    /// Returns [`PatternError`] when an expression cannot be compiled.
    fn into_step_pattern(self) -> Result<StepPattern, PatternError>;
}

impl IntoStepPattern for &str {
    fn into_step_pattern(self) -> Result<StepPattern, PatternError> {
        StepPattern::expression(self)
    }
}

impl IntoStepPattern for String {
    fn into_step_pattern(self) -> Result<StepPattern, PatternError> {
        StepPattern::expression(&self)
    }
}

impl IntoStepPattern for Regex {
    fn into_step_pattern(self) -> Result<StepPattern, PatternError> {
        Ok(StepPattern::from(self))
    }
}

impl IntoStepPattern for StepPattern {
    fn into_step_pattern(self) -> Result<StepPattern, PatternError> {
        Ok(self)
    }
}

/// A feature step as emitted by the code generator.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    keyword: StepKeyword,
    text: String,
    table: Option<DataTable>,
    doc_string: Option<DocString>,
}

impl Step {
    /// Create a step without attachments.
    pub fn new(keyword: StepKeyword, text: impl Into<String>) -> Self {
        Self {
            keyword,
            text: text.into(),
            table: None,
            doc_string: None,
        }
    }

    /// Attach a data table.
    #[must_use]
    pub fn with_table(mut self, table: DataTable) -> Self {
        self.table = Some(table);
        self
    }

    /// Attach a doc string.
    #[must_use]
    pub fn with_doc_string(mut self, doc_string: DocString) -> Self {
        self.doc_string = Some(doc_string);
        self
    }

    /// Keyword the step was written with.
    #[must_use]
    pub fn keyword(&self) -> StepKeyword {
        self.keyword
    }

    /// Step text after placeholder substitution.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Attached data table, if any.
    #[must_use]
    pub fn table(&self) -> Option<&DataTable> {
        self.table.as_ref()
    }

    /// Attached doc string, if any.
    #[must_use]
    pub fn doc_string(&self) -> Option<&DocString> {
        self.doc_string.as_ref()
    }
}
