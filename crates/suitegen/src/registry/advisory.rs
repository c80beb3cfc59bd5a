//! One-time advisories about legacy registry usage.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::config;

/// A warning logged at most once until re-armed.
pub(crate) struct Advisory {
    fired: AtomicBool,
    message: &'static str,
}

impl Advisory {
    pub(crate) const fn new(message: &'static str) -> Self {
        Self {
            fired: AtomicBool::new(false),
            message,
        }
    }

    /// Log the advisory unless it already fired or advisories are disabled.
    ///
    /// Returns `true` when a warning was logged.
    pub(crate) fn emit(&self) -> bool {
        if !config::advisories_enabled() || self.fired.swap(true, Ordering::AcqRel) {
            return false;
        }
        log::warn!("{}", self.message);
        true
    }

    pub(crate) fn rearm(&self) {
        self.fired.store(false, Ordering::Release);
    }
}

pub(crate) static STEP_LOOKUP_OUTSIDE_FEATURE: Advisory = Advisory::new(
    "StepRegistry::current() was called outside of feature context; using the global step \
     registry. Definitions stored there are never cleared and cause memory leaks when many \
     features share one process. Register steps through the FeatureScope handed to register().",
);

pub(crate) static HOOK_LOOKUP_OUTSIDE_FEATURE: Advisory = Advisory::new(
    "HookRegistry::current() was called outside of feature context; using the global hook \
     registry. Hooks stored there are never cleared and cause memory leaks when many features \
     share one process. Register hooks through the FeatureScope handed to register().",
);

pub(crate) static GLOBAL_STEP_REGISTRATION: Advisory = Advisory::new(
    "registering steps in the global step registry is deprecated and leaks memory across \
     generated suites; use a feature-scoped registry instead",
);

pub(crate) static GLOBAL_HOOK_REGISTRATION: Advisory = Advisory::new(
    "registering hooks in the global hook registry is deprecated and leaks memory across \
     generated suites; use a feature-scoped registry instead",
);

/// Re-arm the lookup advisories once a feature context becomes active.
pub(crate) fn rearm_lookup_advisories() {
    STEP_LOOKUP_OUTSIDE_FEATURE.rearm();
    HOOK_LOOKUP_OUTSIDE_FEATURE.rearm();
}

/// Re-arm every advisory so each can fire again.
///
/// Intended for tests asserting on advisory output.
pub fn reset_advisories() {
    rearm_lookup_advisories();
    GLOBAL_STEP_REGISTRATION.rearm();
    GLOBAL_HOOK_REGISTRATION.rearm();
}
