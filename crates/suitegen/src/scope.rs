//! Feature scopes and the ambient feature context.
//!
//! A [`FeatureScope`] pairs the step and hook registries of one generated
//! suite. While a [`FeatureContextGuard`] is alive, its scope is the ambient
//! feature context: [`StepRegistry::current`] and [`HookRegistry::current`]
//! resolve to it instead of the global registries. Activation is serialised
//! process-wide, so two suites never load their collaborators at the same
//! time.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use suitegen_patterns::StepKeyword;

use crate::context::Context;
use crate::error::{RegistrationError, StepError};
use crate::registry::{HookKind, HookRegistry, StepRegistry, rearm_lookup_advisories};
use crate::step_args::StepArgs;
use crate::types::IntoStepPattern;

static AMBIENT: RwLock<Option<FeatureScope>> = RwLock::new(None);
static ACTIVATION: Mutex<()> = Mutex::new(());

/// The step and hook registries owned by one generated suite.
///
/// Cloning yields another handle to the same registries.
#[derive(Debug, Clone)]
pub struct FeatureScope {
    steps: Arc<StepRegistry>,
    hooks: Arc<HookRegistry>,
}

impl Default for FeatureScope {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureScope {
    /// Allocate a fresh pair of feature-scoped registries.
    #[must_use]
    pub fn new() -> Self {
        Self {
            steps: StepRegistry::feature_scoped(),
            hooks: HookRegistry::feature_scoped(),
        }
    }

    /// Step registry of this scope.
    #[must_use]
    pub fn steps(&self) -> &Arc<StepRegistry> {
        &self.steps
    }

    /// Hook registry of this scope.
    #[must_use]
    pub fn hooks(&self) -> &Arc<HookRegistry> {
        &self.hooks
    }

    fn step<P, F, Fut>(
        &self,
        keyword: StepKeyword,
        pattern: P,
        handler: F,
    ) -> Result<(), RegistrationError>
    where
        P: IntoStepPattern,
        F: Fn(Context, StepArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), StepError>> + 'static,
    {
        self.steps.define(keyword, pattern, handler).map(drop)
    }

    /// Register a `Given` step.
    ///
    /// # Errors
    /// Returns [`RegistrationError`] when the pattern cannot be compiled.
    ///
    /// # Examples
    /// ```
    /// use suitegen::{Context, FeatureScope, StepArgs, StepError, StepKeyword};
    ///
    /// let scope = FeatureScope::new();
    /// scope
    ///     .given("total is {int}", |ctx: Context, args: StepArgs| async move {
    ///         ctx.insert("total", args.int(0)?);
    ///         Ok::<_, StepError>(())
    ///     })
    ///     .expect("pattern compiles");
    /// assert!(scope.steps().find_match(StepKeyword::Given, "total is 0").is_some());
    /// ```
    pub fn given<P, F, Fut>(&self, pattern: P, handler: F) -> Result<(), RegistrationError>
    where
        P: IntoStepPattern,
        F: Fn(Context, StepArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), StepError>> + 'static,
    {
        self.step(StepKeyword::Given, pattern, handler)
    }

    /// Register a `When` step.
    ///
    /// # Errors
    /// Returns [`RegistrationError`] when the pattern cannot be compiled.
    pub fn when<P, F, Fut>(&self, pattern: P, handler: F) -> Result<(), RegistrationError>
    where
        P: IntoStepPattern,
        F: Fn(Context, StepArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), StepError>> + 'static,
    {
        self.step(StepKeyword::When, pattern, handler)
    }

    /// Register a `Then` step.
    ///
    /// # Errors
    /// Returns [`RegistrationError`] when the pattern cannot be compiled.
    pub fn then<P, F, Fut>(&self, pattern: P, handler: F) -> Result<(), RegistrationError>
    where
        P: IntoStepPattern,
        F: Fn(Context, StepArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), StepError>> + 'static,
    {
        self.step(StepKeyword::Then, pattern, handler)
    }

    /// Register an `And` step. Only `And` and `But` feature steps can reach it.
    ///
    /// # Errors
    /// Returns [`RegistrationError`] when the pattern cannot be compiled.
    pub fn and<P, F, Fut>(&self, pattern: P, handler: F) -> Result<(), RegistrationError>
    where
        P: IntoStepPattern,
        F: Fn(Context, StepArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), StepError>> + 'static,
    {
        self.step(StepKeyword::And, pattern, handler)
    }

    /// Register a `But` step. Only `And` and `But` feature steps can reach it.
    ///
    /// # Errors
    /// Returns [`RegistrationError`] when the pattern cannot be compiled.
    pub fn but<P, F, Fut>(&self, pattern: P, handler: F) -> Result<(), RegistrationError>
    where
        P: IntoStepPattern,
        F: Fn(Context, StepArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), StepError>> + 'static,
    {
        self.step(StepKeyword::But, pattern, handler)
    }

    /// Register a hook run before every scenario.
    pub fn before<F, Fut>(&self, handler: F)
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), StepError>> + 'static,
    {
        self.hooks.define(HookKind::Before, handler);
    }

    /// Register a hook run after every scenario.
    pub fn after<F, Fut>(&self, handler: F)
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), StepError>> + 'static,
    {
        self.hooks.define(HookKind::After, handler);
    }

    /// Register a hook run once before the first scenario.
    pub fn before_all<F, Fut>(&self, handler: F)
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), StepError>> + 'static,
    {
        self.hooks.define(HookKind::BeforeAll, handler);
    }

    /// Register a hook run once after the last scenario.
    pub fn after_all<F, Fut>(&self, handler: F)
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), StepError>> + 'static,
    {
        self.hooks.define(HookKind::AfterAll, handler);
    }

    /// Empty both registries.
    pub fn clear(&self) {
        self.steps.clear();
        self.hooks.clear();
    }

    /// Return a guard that empties both registries when dropped, including
    /// during unwinding.
    #[must_use = "the registries are cleared when the guard is dropped"]
    pub fn clear_on_drop(&self) -> ClearOnDrop {
        ClearOnDrop {
            scope: self.clone(),
        }
    }

    /// Returns `true` when both handles share the same registries.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.steps, &other.steps) && Arc::ptr_eq(&self.hooks, &other.hooks)
    }
}

/// Empties a [`FeatureScope`] on drop.
#[derive(Debug)]
pub struct ClearOnDrop {
    scope: FeatureScope,
}

impl Drop for ClearOnDrop {
    fn drop(&mut self) {
        self.scope.clear();
        log::debug!("feature-scoped registries cleared");
    }
}

/// Keeps a [`FeatureScope`] installed as the ambient feature context.
///
/// Only one guard exists at a time across the process; activating a second
/// one blocks until the first is dropped, so a guard must not be activated
/// again from the thread already holding one.
#[derive(Debug)]
pub struct FeatureContextGuard {
    _serial: MutexGuard<'static, ()>,
}

impl FeatureContextGuard {
    /// Install `scope` as the ambient feature context until the guard drops.
    #[must_use = "the feature context is cleared when the guard is dropped"]
    pub fn activate(scope: &FeatureScope) -> Self {
        let serial = ACTIVATION.lock().unwrap_or_else(PoisonError::into_inner);
        set_ambient(Some(scope.clone()));
        rearm_lookup_advisories();
        Self { _serial: serial }
    }
}

impl Drop for FeatureContextGuard {
    fn drop(&mut self) {
        set_ambient(None);
    }
}

fn set_ambient(scope: Option<FeatureScope>) {
    *AMBIENT.write().unwrap_or_else(PoisonError::into_inner) = scope;
}

/// Scope of the active feature context, if any.
#[must_use]
pub fn current_feature_scope() -> Option<FeatureScope> {
    AMBIENT
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn noop(_: Context, _: StepArgs) -> std::future::Ready<Result<(), StepError>> {
        std::future::ready(Ok(()))
    }

    #[test]
    #[serial]
    fn guard_switches_current_registries() {
        let first = FeatureScope::new();
        let second = FeatureScope::new();
        {
            let _guard = FeatureContextGuard::activate(&first);
            let Some(active) = current_feature_scope() else {
                panic!("expected an active scope");
            };
            assert!(active.same_as(&first));
            assert!(Arc::ptr_eq(&StepRegistry::current(), first.steps()));
            assert!(Arc::ptr_eq(&HookRegistry::current(), first.hooks()));
        }
        assert!(current_feature_scope().is_none());
        {
            let _guard = FeatureContextGuard::activate(&second);
            assert!(Arc::ptr_eq(&StepRegistry::current(), second.steps()));
        }
        assert!(current_feature_scope().is_none());
    }

    #[test]
    #[serial]
    fn resolved_references_survive_context_switches() {
        let scope = FeatureScope::new();
        let resolved = {
            let _guard = FeatureContextGuard::activate(&scope);
            StepRegistry::current()
        };
        let other = FeatureScope::new();
        let _guard = FeatureContextGuard::activate(&other);
        assert!(
            resolved
                .define(StepKeyword::Given, "late registration", noop)
                .is_ok()
        );
        assert_eq!(scope.steps().len(), 1);
        assert!(other.steps().is_empty());
    }

    #[test]
    fn clear_on_drop_empties_both_registries() {
        let scope = FeatureScope::new();
        assert!(scope.given("a step", noop).is_ok());
        scope.before(|_| async { Ok(()) });
        {
            let _clear = scope.clear_on_drop();
        }
        assert!(scope.steps().is_empty());
        assert!(scope.hooks().is_empty());
    }
}
