//! Per-scenario shared state.
//!
//! A [`Context`] is a cheaply clonable handle to a string-keyed map of values.
//! Clones share storage, so the hooks, background steps and scenario steps of
//! one scenario observe each other's writes. A [`ContextManager`] lazily builds
//! a context from the process-wide world constructor.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::{Arc, PoisonError, RwLock};

use hashbrown::HashMap;

type WorldConstructor = Arc<dyn Fn() -> Context + Send + Sync>;

static WORLD_CONSTRUCTOR: RwLock<Option<WorldConstructor>> = RwLock::new(None);

/// Mutable state shared by every step of one scenario.
#[derive(Clone, Default)]
pub struct Context {
    values: Rc<RefCell<HashMap<String, Box<dyn Any>>>>,
}

impl Context {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Context::insert`].
    ///
    /// # Examples
    /// ```
    /// use suitegen::Context;
    ///
    /// let context = Context::new().with_value("total", 0_i64);
    /// assert_eq!(context.get::<i64>("total"), Some(0));
    /// ```
    #[must_use]
    pub fn with_value<T: Any>(self, key: impl Into<String>, value: T) -> Self {
        self.insert(key, value);
        self
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn insert<T: Any>(&self, key: impl Into<String>, value: T) {
        self.values.borrow_mut().insert(key.into(), Box::new(value));
    }

    /// Clone the value stored under `key` when it has type `T`.
    #[must_use]
    pub fn get<T: Any + Clone>(&self, key: &str) -> Option<T> {
        self.with(key, T::clone)
    }

    /// Borrow the value stored under `key` when it has type `T`.
    ///
    /// The context must not be modified from within `f`.
    pub fn with<T: Any, R>(&self, key: &str, f: impl FnOnce(&T) -> R) -> Option<R> {
        let values = self.values.borrow();
        values.get(key)?.downcast_ref::<T>().map(f)
    }

    /// Mutably borrow the value stored under `key` when it has type `T`.
    ///
    /// The context must not be accessed from within `f`.
    ///
    /// # Examples
    /// ```
    /// use suitegen::Context;
    ///
    /// let context = Context::new().with_value("items", vec![1, 2]);
    /// context.with_mut("items", |items: &mut Vec<i32>| items.push(3));
    /// assert_eq!(context.get::<Vec<i32>>("items"), Some(vec![1, 2, 3]));
    /// ```
    pub fn with_mut<T: Any, R>(&self, key: &str, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut values = self.values.borrow_mut();
        values.get_mut(key)?.downcast_mut::<T>().map(f)
    }

    /// Returns `true` when a value is stored under `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.borrow().contains_key(key)
    }

    /// Remove the value stored under `key`, returning whether one existed.
    pub fn remove(&self, key: &str) -> bool {
        self.values.borrow_mut().remove(key).is_some()
    }

    /// Stored keys in lexical order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.values.borrow().keys().cloned().collect();
        keys.sort_unstable();
        keys
    }

    /// Number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    /// Returns `true` when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }

    /// Returns `true` when both handles share storage.
    #[must_use]
    pub fn shares_state_with(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.values, &other.values)
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("keys", &self.keys())
            .finish()
    }
}

/// Install the constructor used for every new scenario context.
///
/// The constructor replaces any previous one and applies process-wide.
///
/// # Examples
/// ```
/// use suitegen::{Context, ContextManager, clear_world_constructor, set_world_constructor};
///
/// set_world_constructor(|| Context::new().with_value("total", 0_i64));
/// let mut manager = ContextManager::new();
/// assert_eq!(manager.context().get::<i64>("total"), Some(0));
/// clear_world_constructor();
/// ```
pub fn set_world_constructor<F>(constructor: F)
where
    F: Fn() -> Context + Send + Sync + 'static,
{
    let mut slot = WORLD_CONSTRUCTOR
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    *slot = Some(Arc::new(constructor));
}

/// Install a world type: each new context stores `W::default()` under `key`.
pub fn set_world_type<W: Default + 'static>(key: &'static str) {
    set_world_constructor(move || Context::new().with_value(key, W::default()));
}

/// Restore the default constructor, which yields empty contexts.
pub fn clear_world_constructor() {
    let mut slot = WORLD_CONSTRUCTOR
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    *slot = None;
}

fn construct_world() -> Context {
    let constructor = WORLD_CONSTRUCTOR
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone();
    constructor.map_or_else(Context::new, |build| build())
}

/// Owns the context of the scenario currently executing.
#[derive(Debug, Default)]
pub struct ContextManager {
    context: Option<Context>,
}

impl ContextManager {
    /// Create a manager; no context is built until one is requested.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the current context, constructing it on first use.
    pub fn context(&mut self) -> Context {
        self.context.get_or_insert_with(construct_world).clone()
    }

    /// Replace the current context with a freshly constructed one.
    pub fn reset(&mut self) {
        self.context = Some(construct_world());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Calculator {
        total: i64,
    }

    #[test]
    fn clones_share_storage() {
        let context = Context::new();
        let alias = context.clone();
        alias.insert("answer", 42_u32);
        assert_eq!(context.get::<u32>("answer"), Some(42));
        assert!(context.shares_state_with(&alias));
    }

    #[test]
    fn typed_lookups_reject_other_types() {
        let context = Context::new().with_value("answer", 42_u32);
        assert_eq!(context.get::<String>("answer"), None);
        assert!(context.contains("answer"));
        assert!(context.remove("answer"));
        assert!(context.is_empty());
    }

    #[test]
    #[serial]
    fn manager_builds_context_lazily_and_reuses_it() {
        clear_world_constructor();
        let mut manager = ContextManager::new();
        let first = manager.context();
        first.insert("seen", true);
        let second = manager.context();
        assert!(first.shares_state_with(&second));
        manager.reset();
        assert!(!manager.context().contains("seen"));
    }

    #[test]
    #[serial]
    fn world_constructor_applies_to_new_contexts() {
        set_world_type::<Calculator>("calculator");
        let mut manager = ContextManager::new();
        let context = manager.context();
        context.with_mut("calculator", |calc: &mut Calculator| calc.total += 3);
        assert_eq!(
            context.get::<Calculator>("calculator"),
            Some(Calculator { total: 3 })
        );
        manager.reset();
        assert_eq!(
            manager.context().get::<Calculator>("calculator"),
            Some(Calculator::default())
        );
        clear_world_constructor();
        assert!(ContextManager::new().context().is_empty());
    }
}
