//! Runtime support for test suites generated from Gherkin features.
//!
//! Generated feature modules and the collaborator files they load use this
//! crate to register step definitions and lifecycle hooks in feature-scoped
//! registries, to hold per-scenario [`Context`] state and to execute steps.
//!
//! A collaborator exposes a `register` function receiving the suite's
//! [`FeatureScope`]:
//!
//! ```
//! use suitegen::{Context, FeatureScope, RegistrationError, StepArgs, StepError};
//!
//! pub fn register(scope: &FeatureScope) -> Result<(), RegistrationError> {
//!     scope.before(|ctx: Context| async move {
//!         ctx.insert("total", 0_i64);
//!         Ok(())
//!     });
//!     scope.when("I add {int}", |ctx: Context, args: StepArgs| async move {
//!         let amount = args.int(0)?;
//!         ctx.with_mut("total", |total: &mut i64| *total += amount);
//!         Ok::<_, StepError>(())
//!     })?;
//!     Ok(())
//! }
//! # register(&FeatureScope::new()).expect("registration succeeds");
//! ```

mod api;
pub mod config;
mod context;
mod datatable;
mod docstring;
mod error;
mod execution;
mod panic;
mod registry;
mod scope;
mod step_args;
mod suite;
mod types;

pub use api::{after, after_all, and, before, before_all, but, given, then, when};
pub use context::{
    Context, ContextManager, clear_world_constructor, set_world_constructor, set_world_type,
};
pub use datatable::{DataTable, DataTableError};
pub use docstring::DocString;
pub use error::{RegistrationError, StepError};
pub use execution::{ExecutionError, StepExecutor, build_arguments};
pub use futures::executor::block_on;
pub use futures::future::LocalBoxFuture;
pub use panic::panic_message;
pub use registry::{
    HookDefinition, HookKind, HookRegistry, Registered, StepDefinition, StepMatch, StepRegistry,
    reset_advisories,
};
pub use scope::{ClearOnDrop, FeatureContextGuard, FeatureScope, current_feature_scope};
pub use step_args::{ArgumentError, StepArg, StepArgs};
pub use suite::{FeatureSuite, ScenarioOutcome, SuitePhase};
pub use suitegen_patterns::{ParameterKind, StepKeyword, StepPattern};
pub use types::{
    HookHandler, IntoStepPattern, Step, StepFuture, StepHandler, hook_handler, step_handler,
};
