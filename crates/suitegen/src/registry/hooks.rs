//! Lifecycle hook storage and execution.

use std::fmt;
use std::future::Future;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use super::Scope;
use super::advisory::{GLOBAL_HOOK_REGISTRATION, HOOK_LOOKUP_OUTSIDE_FEATURE};
use crate::context::Context;
use crate::error::StepError;
use crate::execution::ExecutionError;
use crate::scope::current_feature_scope;
use crate::types::{HookHandler, hook_handler};

static GLOBAL_HOOKS: LazyLock<Arc<HookRegistry>> =
    LazyLock::new(|| Arc::new(HookRegistry::with_scope(Scope::Global)));

/// Point in the lifecycle at which a hook runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    /// Before every scenario, ahead of any background steps.
    Before,
    /// After every scenario, whether or not its steps succeeded.
    After,
    /// Once per feature, before its first scenario.
    BeforeAll,
    /// Once per feature, after its last scenario.
    AfterAll,
}

impl HookKind {
    /// Every kind, in lifecycle declaration order.
    pub const ALL: [Self; 4] = [Self::Before, Self::After, Self::BeforeAll, Self::AfterAll];

    /// Name used in log and error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Before => "Before",
            Self::After => "After",
            Self::BeforeAll => "BeforeAll",
            Self::AfterAll => "AfterAll",
        }
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered hook.
pub struct HookDefinition {
    kind: HookKind,
    handler: HookHandler,
}

impl HookDefinition {
    /// Bundle a kind and a handler.
    #[must_use]
    pub fn new(kind: HookKind, handler: HookHandler) -> Self {
        Self { kind, handler }
    }

    /// Lifecycle point of the hook.
    #[must_use]
    pub fn kind(&self) -> HookKind {
        self.kind
    }
}

impl fmt::Debug for HookDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookDefinition")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Hooks grouped by kind, each group in registration order.
///
/// Scoping mirrors [`StepRegistry`](super::StepRegistry).
pub struct HookRegistry {
    scope: Scope,
    hooks: RwLock<Vec<Arc<HookDefinition>>>,
}

impl HookRegistry {
    fn with_scope(scope: Scope) -> Self {
        Self {
            scope,
            hooks: RwLock::new(Vec::new()),
        }
    }

    /// Allocate a new, empty registry owned by one generated suite.
    #[must_use]
    pub fn feature_scoped() -> Arc<Self> {
        Arc::new(Self::with_scope(Scope::Feature))
    }

    /// Return the registry of the active feature context, falling back to the
    /// global registry with a one-time advisory.
    #[must_use]
    pub fn current() -> Arc<Self> {
        if let Some(scope) = current_feature_scope() {
            return Arc::clone(scope.hooks());
        }
        HOOK_LOOKUP_OUTSIDE_FEATURE.emit();
        Arc::clone(&GLOBAL_HOOKS)
    }

    /// Returns `true` for registries created by [`HookRegistry::feature_scoped`].
    #[must_use]
    pub fn is_feature_scoped(&self) -> bool {
        self.scope == Scope::Feature
    }

    /// Append a hook definition.
    pub fn register(&self, definition: HookDefinition) {
        if self.scope == Scope::Global {
            GLOBAL_HOOK_REGISTRATION.emit();
        }
        self.hooks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(definition));
    }

    /// Register `handler` to run at `kind`.
    pub fn define<F, Fut>(&self, kind: HookKind, handler: F)
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), StepError>> + 'static,
    {
        self.register(HookDefinition::new(kind, hook_handler(handler)));
    }

    /// Hooks of `kind` in registration order.
    #[must_use]
    pub fn hooks(&self, kind: HookKind) -> Vec<Arc<HookDefinition>> {
        self.hooks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|hook| hook.kind == kind)
            .cloned()
            .collect()
    }

    /// Run every hook of `kind` against `context`, one after another.
    ///
    /// Each hook is awaited before the next starts. The hooks are snapshotted
    /// first, so a hook registering further hooks does not affect this run.
    ///
    /// # Errors
    /// Returns [`ExecutionError::HookFailed`] for the first failing hook; the
    /// remaining hooks of that kind are skipped.
    pub async fn execute(&self, kind: HookKind, context: &Context) -> Result<(), ExecutionError> {
        let hooks = self.hooks(kind);
        log::debug!("running {} {kind} hook(s)", hooks.len());
        for hook in hooks {
            (hook.handler)(context.clone())
                .await
                .map_err(|source| ExecutionError::HookFailed {
                    kind,
                    source: Arc::new(source),
                })?;
        }
        Ok(())
    }

    /// Number of stored hooks across all kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` when no hook is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every hook, keeping the registry itself.
    pub fn clear(&self) {
        self.hooks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("scope", &self.scope)
            .field("len", &self.len())
            .finish()
    }
}
