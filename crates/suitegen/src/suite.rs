//! Feature-level lifecycle for generated suites.
//!
//! libtest has no notion of a suite, so every generated feature module owns a
//! static [`FeatureSuite`]. The first scenario to run performs the feature
//! setup (collaborator registration and `BeforeAll` hooks); the last one to
//! finish performs the teardown (`AfterAll` hooks, then clearing the feature
//! registries). Scenarios of one feature run one at a time.

use std::any::Any;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, OnceLock, PoisonError};

use futures::FutureExt;
use futures::executor::block_on;
use futures::future::LocalBoxFuture;

use crate::execution::ExecutionError;
use crate::panic::panic_message;
use crate::scope::FeatureScope;

/// Feature-level phase emitted by the code generator.
pub type SuitePhase = fn(FeatureScope) -> LocalBoxFuture<'static, Result<(), ExecutionError>>;

enum Failure {
    Error(String),
    Panic(Box<dyn Any + Send>),
}

/// Shared lifecycle state of one generated feature suite.
///
/// Teardown is driven by a countdown of the feature's generated tests, so it
/// only happens when every one of them runs. A filtered run such as
/// `cargo test some_name` leaves the count above zero: `AfterAll` hooks are
/// skipped and the feature registries stay populated until the process exits.
pub struct FeatureSuite {
    name: &'static str,
    scope: FeatureScope,
    setup: SuitePhase,
    teardown: SuitePhase,
    setup_outcome: OnceLock<Result<(), String>>,
    remaining: AtomicUsize,
    serial: Mutex<()>,
}

impl FeatureSuite {
    /// Describe a suite of `scenarios` test cases with its setup and teardown
    /// phases. A fresh [`FeatureScope`] is allocated for the suite.
    #[must_use]
    pub fn new(
        name: &'static str,
        scenarios: usize,
        setup: SuitePhase,
        teardown: SuitePhase,
    ) -> Self {
        Self {
            name,
            scope: FeatureScope::new(),
            setup,
            teardown,
            setup_outcome: OnceLock::new(),
            remaining: AtomicUsize::new(scenarios),
            serial: Mutex::new(()),
        }
    }

    /// Feature name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Registries owned by the suite.
    #[must_use]
    pub fn scope(&self) -> &FeatureScope {
        &self.scope
    }

    /// Number of scenarios still expected to run.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.remaining.load(Ordering::Acquire)
    }

    /// Run one scenario body, performing suite setup first and suite teardown
    /// after the final scenario.
    ///
    /// # Panics
    /// Panics when setup, the scenario body or the final teardown fails, which
    /// is how libtest learns of the failure. A panic raised by the body is
    /// resumed unchanged.
    pub fn run_scenario<F, Fut>(&self, scenario: &str, body: F)
    where
        F: FnOnce(FeatureScope) -> Fut,
        Fut: Future<Output = Result<(), ExecutionError>>,
    {
        let serial = self.serial.lock().unwrap_or_else(PoisonError::into_inner);
        let failure = match self.setup_outcome.get_or_init(|| self.run_setup()) {
            Ok(()) => {
                log::debug!("running scenario '{scenario}' of feature '{}'", self.name);
                let scope = self.scope.clone();
                match panic::catch_unwind(AssertUnwindSafe(|| block_on(body(scope)))) {
                    Ok(Ok(())) => None,
                    Ok(Err(err)) => Some(Failure::Error(format!(
                        "scenario '{scenario}' of feature '{}' failed: {err}",
                        self.name
                    ))),
                    Err(payload) => Some(Failure::Panic(payload)),
                }
            }
            Err(message) => Some(Failure::Error(format!(
                "feature '{}' setup failed: {message}",
                self.name
            ))),
        };
        let teardown = self.finish_scenario();
        drop(serial);

        match (failure, teardown) {
            (Some(Failure::Panic(payload)), _) => panic::resume_unwind(payload),
            (Some(Failure::Error(message)), _) | (None, Some(message)) => panic!("{message}"),
            (None, None) => {}
        }
    }

    fn run_setup(&self) -> Result<(), String> {
        log::debug!(
            "setting up feature '{}'; teardown runs once all {} generated tests have run",
            self.name,
            self.remaining()
        );
        match panic::catch_unwind(AssertUnwindSafe(|| block_on((self.setup)(self.scope.clone()))))
        {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => Err(err.to_string()),
            Err(payload) => Err(panic_message(payload.as_ref())),
        }
    }

    /// Count the scenario as finished and tear the suite down after the last
    /// one. Returns the teardown failure, if any.
    fn finish_scenario(&self) -> Option<String> {
        let previous = self
            .remaining
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
            .ok()?;
        if previous != 1 {
            return None;
        }
        log::debug!("tearing down feature '{}'", self.name);
        let _clear = self.scope.clear_on_drop();
        let outcome =
            panic::catch_unwind(AssertUnwindSafe(|| block_on((self.teardown)(self.scope.clone()))));
        let message = match outcome {
            Ok(Ok(())) => return None,
            Ok(Err(err)) => err.to_string(),
            Err(payload) => panic_message(payload.as_ref()),
        };
        log::error!("feature '{}' teardown failed: {message}", self.name);
        Some(format!("feature '{}' teardown failed: {message}", self.name))
    }
}

impl std::fmt::Debug for FeatureSuite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureSuite")
            .field("name", &self.name)
            .field("remaining", &self.remaining())
            .finish_non_exhaustive()
    }
}

/// Result of a scenario body, held until the `After` hooks have run.
///
/// `After` hooks always run: a failing or panicking body is recorded, the
/// hooks run, and only then is the original failure reported.
pub struct ScenarioOutcome {
    result: Result<Result<(), ExecutionError>, Box<dyn Any + Send>>,
}

impl ScenarioOutcome {
    /// Await `body`, capturing both its error and any panic it raises.
    pub async fn capture<Fut>(body: Fut) -> Self
    where
        Fut: Future<Output = Result<(), ExecutionError>>,
    {
        Self {
            result: AssertUnwindSafe(body).catch_unwind().await,
        }
    }

    /// Combine the body's result with the result of the `After` hooks.
    ///
    /// A body panic is resumed and a body error takes precedence over a hook
    /// error; the hook error is logged in both cases.
    ///
    /// # Errors
    /// Returns the body's error, or else the `After` hooks' error.
    pub fn finish(self, after: Result<(), ExecutionError>) -> Result<(), ExecutionError> {
        match self.result {
            Ok(Ok(())) => after,
            Ok(Err(err)) => {
                if let Err(after_err) = after {
                    log::error!("After hooks also failed: {after_err}");
                }
                Err(err)
            }
            Err(payload) => {
                if let Err(after_err) = after {
                    log::error!("After hooks also failed: {after_err}");
                }
                panic::resume_unwind(payload)
            }
        }
    }
}

impl std::fmt::Debug for ScenarioOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &self.result {
            Ok(Ok(())) => "passed",
            Ok(Err(_)) => "failed",
            Err(_) => "panicked",
        };
        f.debug_struct("ScenarioOutcome")
            .field("state", &state)
            .finish()
    }
}
