//! Step and hook registries.
//!
//! Every generated suite owns a pair of feature-scoped registries. A global
//! pair still exists for registration made outside any feature context; using
//! it logs advisories because nothing ever clears it.

mod advisory;
mod hooks;
mod steps;

pub use advisory::reset_advisories;
pub(crate) use advisory::rearm_lookup_advisories;
pub use hooks::{HookDefinition, HookKind, HookRegistry};
pub use steps::{Registered, StepDefinition, StepMatch, StepRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Global,
    Feature,
}
