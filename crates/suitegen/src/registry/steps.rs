//! Step definition storage and lookup.

use std::fmt;
use std::future::Future;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use hashbrown::HashSet;
use suitegen_patterns::{Capture, StepKeyword, StepPattern};

use super::Scope;
use super::advisory::{GLOBAL_STEP_REGISTRATION, STEP_LOOKUP_OUTSIDE_FEATURE};
use crate::context::Context;
use crate::error::{RegistrationError, StepError};
use crate::scope::current_feature_scope;
use crate::step_args::StepArgs;
use crate::types::{IntoStepPattern, StepFuture, StepHandler, step_handler};

static GLOBAL_STEPS: LazyLock<Arc<StepRegistry>> =
    LazyLock::new(|| Arc::new(StepRegistry::with_scope(Scope::Global)));

/// A registered step: keyword, pattern and handler.
pub struct StepDefinition {
    keyword: StepKeyword,
    pattern: StepPattern,
    handler: StepHandler,
}

impl StepDefinition {
    /// Bundle a keyword, pattern and handler.
    #[must_use]
    pub fn new(keyword: StepKeyword, pattern: StepPattern, handler: StepHandler) -> Self {
        Self {
            keyword,
            pattern,
            handler,
        }
    }

    /// Keyword the definition was registered under.
    #[must_use]
    pub fn keyword(&self) -> StepKeyword {
        self.keyword
    }

    /// Pattern matched against step text.
    #[must_use]
    pub fn pattern(&self) -> &StepPattern {
        &self.pattern
    }

    /// Run the handler.
    pub fn invoke(&self, context: Context, args: StepArgs) -> StepFuture {
        (self.handler)(context, args)
    }
}

impl fmt::Debug for StepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDefinition")
            .field("keyword", &self.keyword)
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

/// Successful lookup: the first matching definition and its captures.
#[derive(Debug, Clone)]
pub struct StepMatch {
    /// Definition that matched.
    pub definition: Arc<StepDefinition>,
    /// One entry per capture group of the definition's pattern.
    pub captures: Vec<Capture>,
}

/// Outcome of [`StepRegistry::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registered {
    /// First definition with this keyword and pattern source.
    New,
    /// Same keyword and pattern source as an earlier definition. It is stored
    /// but never matched ahead of the earlier one.
    Duplicate,
}

#[derive(Default)]
struct Definitions {
    ordered: Vec<Arc<StepDefinition>>,
    seen: HashSet<(StepKeyword, String)>,
}

/// Ordered store of step definitions.
///
/// Feature-scoped registries are isolated from each other and from the global
/// registry.
pub struct StepRegistry {
    scope: Scope,
    definitions: RwLock<Definitions>,
}

impl StepRegistry {
    fn with_scope(scope: Scope) -> Self {
        Self {
            scope,
            definitions: RwLock::new(Definitions::default()),
        }
    }

    /// Allocate a new, empty registry owned by one generated suite.
    #[must_use]
    pub fn feature_scoped() -> Arc<Self> {
        Arc::new(Self::with_scope(Scope::Feature))
    }

    /// Return the registry of the active feature context, falling back to the
    /// global registry.
    ///
    /// The fallback logs a deprecation advisory once per stretch of lookups
    /// made without an active feature context.
    #[must_use]
    pub fn current() -> Arc<Self> {
        if let Some(scope) = current_feature_scope() {
            return Arc::clone(scope.steps());
        }
        STEP_LOOKUP_OUTSIDE_FEATURE.emit();
        Arc::clone(&GLOBAL_STEPS)
    }

    /// Returns `true` for registries created by [`StepRegistry::feature_scoped`].
    #[must_use]
    pub fn is_feature_scoped(&self) -> bool {
        self.scope == Scope::Feature
    }

    /// Append a definition.
    ///
    /// A definition repeating the keyword and pattern source of an earlier one
    /// is logged as a duplicate and stored anyway.
    pub fn register(&self, definition: StepDefinition) -> Registered {
        if self.scope == Scope::Global {
            GLOBAL_STEP_REGISTRATION.emit();
        }
        let key = (definition.keyword, definition.pattern.source().to_string());
        let mut definitions = self
            .definitions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let outcome = if definitions.seen.insert(key) {
            Registered::New
        } else {
            log::warn!(
                "duplicate step definition: {} '{}' is already registered; the first \
                 registration wins",
                definition.keyword,
                definition.pattern.source()
            );
            Registered::Duplicate
        };
        definitions.ordered.push(Arc::new(definition));
        outcome
    }

    /// Compile `pattern` and register `handler` under `keyword`.
    ///
    /// # Errors
    /// Returns [`RegistrationError`] when the pattern cannot be compiled.
    ///
    /// # Examples
    /// ```
    /// use suitegen::{Context, StepArgs, StepError, StepKeyword, StepRegistry};
    ///
    /// let registry = StepRegistry::feature_scoped();
    /// registry
    ///     .define(StepKeyword::Given, "total is {int}", |ctx: Context, args: StepArgs| async move {
    ///         ctx.insert("total", args.int(0)?);
    ///         Ok::<_, StepError>(())
    ///     })
    ///     .expect("pattern compiles");
    /// assert!(registry.find_match(StepKeyword::Given, "total is 0").is_some());
    /// ```
    pub fn define<P, F, Fut>(
        &self,
        keyword: StepKeyword,
        pattern: P,
        handler: F,
    ) -> Result<Registered, RegistrationError>
    where
        P: IntoStepPattern,
        F: Fn(Context, StepArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), StepError>> + 'static,
    {
        let pattern = pattern.into_step_pattern()?;
        Ok(self.register(StepDefinition::new(
            keyword,
            pattern,
            step_handler(handler),
        )))
    }

    /// Find the first definition, in registration order, accepting `keyword`
    /// and fully matching `text`.
    #[must_use]
    pub fn find_match(&self, keyword: StepKeyword, text: &str) -> Option<StepMatch> {
        let definitions = self
            .definitions
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        definitions
            .ordered
            .iter()
            .filter(|definition| keyword.accepts(definition.keyword))
            .find_map(|definition| {
                let captures = definition.pattern.captures(text)?;
                Some(StepMatch {
                    definition: Arc::clone(definition),
                    captures,
                })
            })
    }

    /// Snapshot of the stored definitions in registration order.
    #[must_use]
    pub fn definitions(&self) -> Vec<Arc<StepDefinition>> {
        self.definitions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .ordered
            .clone()
    }

    /// Number of stored definitions, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .ordered
            .len()
    }

    /// Returns `true` when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every definition, keeping the registry itself.
    pub fn clear(&self) {
        let mut definitions = self
            .definitions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        definitions.ordered.clear();
        definitions.seen.clear();
    }
}

impl fmt::Debug for StepRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepRegistry")
            .field("scope", &self.scope)
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    fn noop(_: Context, _: StepArgs) -> std::future::Ready<Result<(), StepError>> {
        std::future::ready(Ok(()))
    }

    fn define(registry: &StepRegistry, keyword: StepKeyword, pattern: &str) -> Registered {
        registry
            .define(keyword, pattern, noop)
            .unwrap_or_else(|err| panic!("pattern {pattern:?} should compile: {err}"))
    }

    #[test]
    fn duplicates_are_stored_but_first_wins() {
        let registry = StepRegistry::feature_scoped();
        assert_eq!(
            registry.define(StepKeyword::Given, "a value", |ctx: Context, _| async move {
                ctx.insert("winner", "first");
                Ok(())
            })
            .ok(),
            Some(Registered::New)
        );
        assert_eq!(
            registry.define(StepKeyword::Given, "a value", |ctx: Context, _| async move {
                ctx.insert("winner", "second");
                Ok(())
            })
            .ok(),
            Some(Registered::Duplicate)
        );
        assert_eq!(registry.len(), 2);

        let Some(found) = registry.find_match(StepKeyword::Given, "a value") else {
            panic!("expected a match");
        };
        let context = Context::new();
        let result = block_on(found.definition.invoke(context.clone(), StepArgs::default()));
        assert!(result.is_ok());
        assert_eq!(context.get::<&str>("winner"), Some("first"));
    }

    #[test]
    fn same_source_under_another_keyword_is_not_a_duplicate() {
        let registry = StepRegistry::feature_scoped();
        assert_eq!(define(&registry, StepKeyword::Given, "x"), Registered::New);
        assert_eq!(define(&registry, StepKeyword::Then, "x"), Registered::New);
    }

    #[test]
    fn conjunctions_match_any_keyword_but_others_are_exact() {
        let registry = StepRegistry::feature_scoped();
        define(&registry, StepKeyword::Then, "the result is {int}");
        assert!(registry.find_match(StepKeyword::And, "the result is 5").is_some());
        assert!(registry.find_match(StepKeyword::But, "the result is 5").is_some());
        assert!(registry.find_match(StepKeyword::Then, "the result is 5").is_some());
        assert!(registry.find_match(StepKeyword::Given, "the result is 5").is_none());
    }

    #[test]
    fn clear_empties_the_same_instance() {
        let registry = StepRegistry::feature_scoped();
        define(&registry, StepKeyword::When, "I add {int} and {int}");
        assert!(registry.find_match(StepKeyword::When, "I add 2 and 3").is_some());
        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.find_match(StepKeyword::When, "I add 2 and 3").is_none());
        assert_eq!(
            define(&registry, StepKeyword::When, "I add {int} and {int}"),
            Registered::New
        );
    }

    #[test]
    fn feature_scoped_registries_are_independent() {
        let first = StepRegistry::feature_scoped();
        let second = StepRegistry::feature_scoped();
        define(&first, StepKeyword::Given, "only in first");
        assert!(first.is_feature_scoped());
        assert!(second.find_match(StepKeyword::Given, "only in first").is_none());
        assert!(second.is_empty());
    }
}
