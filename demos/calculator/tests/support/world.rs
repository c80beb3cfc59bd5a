//! Every scenario context starts with a fresh calculator.

use calculator_demo::Calculator;
use suitegen::{Context, FeatureScope, RegistrationError, StepError, set_world_type};

pub fn register(scope: &FeatureScope) -> Result<(), RegistrationError> {
    set_world_type::<Calculator>("calculator");
    scope.before(|ctx: Context| async move {
        if ctx.contains("calculator") {
            Ok(())
        } else {
            Err(StepError::msg("the world type did not provide a calculator"))
        }
    });
    scope.after(|ctx: Context| async move {
        ctx.remove("calculator");
        Ok(())
    });
    Ok(())
}
