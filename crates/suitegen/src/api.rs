//! Registration functions resolving against the current registries.
//!
//! These target [`StepRegistry::current`] and [`HookRegistry::current`]: the
//! active feature context when one exists, otherwise the global registries
//! (with an advisory). Collaborators that receive a [`FeatureScope`] should
//! register through it instead.
//!
//! [`FeatureScope`]: crate::FeatureScope

use std::future::Future;

use suitegen_patterns::StepKeyword;

use crate::context::Context;
use crate::error::{RegistrationError, StepError};
use crate::registry::{HookKind, HookRegistry, StepRegistry};
use crate::step_args::StepArgs;
use crate::types::IntoStepPattern;

fn step<P, F, Fut>(keyword: StepKeyword, pattern: P, handler: F) -> Result<(), RegistrationError>
where
    P: IntoStepPattern,
    F: Fn(Context, StepArgs) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), StepError>> + 'static,
{
    StepRegistry::current()
        .define(keyword, pattern, handler)
        .map(drop)
}

fn hook<F, Fut>(kind: HookKind, handler: F)
where
    F: Fn(Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), StepError>> + 'static,
{
    HookRegistry::current().define(kind, handler);
}

/// Register a `Given` step in the current registry.
///
/// # Errors
/// Returns [`RegistrationError`] when the pattern cannot be compiled.
pub fn given<P, F, Fut>(pattern: P, handler: F) -> Result<(), RegistrationError>
where
    P: IntoStepPattern,
    F: Fn(Context, StepArgs) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), StepError>> + 'static,
{
    step(StepKeyword::Given, pattern, handler)
}

/// Register a `When` step in the current registry.
///
/// # Errors
/// Returns [`RegistrationError`] when the pattern cannot be compiled.
pub fn when<P, F, Fut>(pattern: P, handler: F) -> Result<(), RegistrationError>
where
    P: IntoStepPattern,
    F: Fn(Context, StepArgs) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), StepError>> + 'static,
{
    step(StepKeyword::When, pattern, handler)
}

/// Register a `Then` step in the current registry.
///
/// # Errors
/// Returns [`RegistrationError`] when the pattern cannot be compiled.
pub fn then<P, F, Fut>(pattern: P, handler: F) -> Result<(), RegistrationError>
where
    P: IntoStepPattern,
    F: Fn(Context, StepArgs) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), StepError>> + 'static,
{
    step(StepKeyword::Then, pattern, handler)
}

/// Register an `And` step in the current registry.
///
/// # Errors
/// Returns [`RegistrationError`] when the pattern cannot be compiled.
pub fn and<P, F, Fut>(pattern: P, handler: F) -> Result<(), RegistrationError>
where
    P: IntoStepPattern,
    F: Fn(Context, StepArgs) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), StepError>> + 'static,
{
    step(StepKeyword::And, pattern, handler)
}

/// Register a `But` step in the current registry.
///
/// # Errors
/// Returns [`RegistrationError`] when the pattern cannot be compiled.
pub fn but<P, F, Fut>(pattern: P, handler: F) -> Result<(), RegistrationError>
where
    P: IntoStepPattern,
    F: Fn(Context, StepArgs) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), StepError>> + 'static,
{
    step(StepKeyword::But, pattern, handler)
}

/// Register a `Before` hook in the current registry.
pub fn before<F, Fut>(handler: F)
where
    F: Fn(Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), StepError>> + 'static,
{
    hook(HookKind::Before, handler);
}

/// Register an `After` hook in the current registry.
pub fn after<F, Fut>(handler: F)
where
    F: Fn(Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), StepError>> + 'static,
{
    hook(HookKind::After, handler);
}

/// Register a `BeforeAll` hook in the current registry.
pub fn before_all<F, Fut>(handler: F)
where
    F: Fn(Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), StepError>> + 'static,
{
    hook(HookKind::BeforeAll, handler);
}

/// Register an `AfterAll` hook in the current registry.
pub fn after_all<F, Fut>(handler: F)
where
    F: Fn(Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), StepError>> + 'static,
{
    hook(HookKind::AfterAll, handler);
}
