//! Registry isolation between feature scopes and the global fallback.

use std::sync::Arc;

use serial_test::serial;
use suitegen::{
    Context, FeatureContextGuard, FeatureScope, HookRegistry, StepArgs, StepError, StepKeyword,
    StepRegistry, config, current_feature_scope, given,
};

fn noop(_: Context, _: StepArgs) -> std::future::Ready<Result<(), StepError>> {
    std::future::ready(Ok(()))
}

#[test]
#[serial]
fn free_functions_register_into_the_active_feature() {
    let scope = FeatureScope::new();
    {
        let _guard = FeatureContextGuard::activate(&scope);
        assert!(given("registered through the shim", noop).is_ok());
    }
    assert!(
        scope
            .steps()
            .find_match(StepKeyword::Given, "registered through the shim")
            .is_some()
    );
    assert!(
        StepRegistry::current()
            .find_match(StepKeyword::Given, "registered through the shim")
            .is_none()
    );
}

#[test]
#[serial]
fn lookups_outside_a_feature_use_the_global_registries() {
    config::set_advisories_enabled(false);
    assert!(current_feature_scope().is_none());
    let steps = StepRegistry::current();
    let hooks = HookRegistry::current();
    assert!(!steps.is_feature_scoped());
    assert!(!hooks.is_feature_scoped());
    assert!(Arc::ptr_eq(&steps, &StepRegistry::current()));
    config::clear_advisories_override();
}

#[test]
#[serial]
fn scopes_active_at_different_times_stay_isolated() {
    let first = FeatureScope::new();
    let second = FeatureScope::new();
    {
        let _guard = FeatureContextGuard::activate(&first);
        assert!(given("a step of the first feature", noop).is_ok());
    }
    {
        let _guard = FeatureContextGuard::activate(&second);
        assert!(given("a step of the second feature", noop).is_ok());
    }
    assert!(
        first
            .steps()
            .find_match(StepKeyword::Given, "a step of the second feature")
            .is_none()
    );
    assert!(
        second
            .steps()
            .find_match(StepKeyword::Given, "a step of the first feature")
            .is_none()
    );
    assert_eq!(first.steps().len(), 1);
    assert_eq!(second.steps().len(), 1);
}
