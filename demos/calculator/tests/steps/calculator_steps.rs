//! Step definitions for the calculator features.

use calculator_demo::{Calculator, CalculatorError};
use suitegen::{Context, DocString, FeatureScope, RegistrationError, StepArgs, StepError};

fn with_calculator<R>(ctx: &Context, f: impl FnOnce(&mut Calculator) -> R) -> Result<R, StepError> {
    ctx.with_mut("calculator", f)
        .ok_or_else(|| StepError::msg("no calculator in this scenario"))
}

fn expect_eq<T: PartialEq + std::fmt::Debug>(actual: T, expected: T) -> Result<(), StepError> {
    if actual == expected {
        Ok(())
    } else {
        Err(StepError::msg(format!("expected {expected:?}, got {actual:?}")))
    }
}

pub fn register(scope: &FeatureScope) -> Result<(), RegistrationError> {
    scope.given("a calculator", |ctx: Context, _args: StepArgs| async move {
        with_calculator(&ctx, |calc| calc.clear())
    })?;
    scope.given("the total is {int}", |ctx: Context, args: StepArgs| async move {
        let amount = args.int(0)?;
        with_calculator(&ctx, |calc| calc.add(amount))?.map_err(StepError::other)?;
        Ok::<_, StepError>(())
    })?;
    scope.when("I add {int}", |ctx: Context, args: StepArgs| async move {
        let amount = args.int(0)?;
        with_calculator(&ctx, |calc| calc.add(amount))?.map_err(StepError::other)?;
        Ok::<_, StepError>(())
    })?;
    scope.when("I subtract {int}", |ctx: Context, args: StepArgs| async move {
        let amount = args.int(0)?;
        with_calculator(&ctx, |calc| calc.subtract(amount))?.map_err(StepError::other)?;
        Ok::<_, StepError>(())
    })?;
    scope.when("I undo", |ctx: Context, _args: StepArgs| async move {
        with_calculator(&ctx, |calc| calc.undo())?.map_err(StepError::other)?;
        Ok::<_, StepError>(())
    })?;
    scope.when("I enter the amounts", |ctx: Context, args: StepArgs| async move {
        for row in args.table()?.hashes() {
            let amount: i64 = row
                .get("amount")
                .ok_or_else(|| StepError::msg("missing amount column"))?
                .parse()
                .map_err(StepError::other)?;
            with_calculator(&ctx, |calc| calc.add(amount))?.map_err(StepError::other)?;
        }
        Ok::<_, StepError>(())
    })?;
    scope.then("the total is {int}", |ctx: Context, args: StepArgs| async move {
        let expected = args.int(0)?;
        expect_eq(with_calculator(&ctx, |calc| calc.total())?, expected)
    })?;
    scope.then("the history has {int} entries", |ctx: Context, args: StepArgs| async move {
        let expected = usize::try_from(args.int(0)?).map_err(StepError::other)?;
        expect_eq(with_calculator(&ctx, |calc| calc.history_len())?, expected)
    })?;
    scope.but("nothing is left to undo", |ctx: Context, _args: StepArgs| async move {
        let undone = with_calculator(&ctx, |calc| calc.undo())?;
        expect_eq(undone, Err(CalculatorError::NothingToUndo))
    })?;
    scope.given("the memo", |ctx: Context, args: StepArgs| async move {
        ctx.insert("memo", args.doc_string()?.clone());
        Ok::<_, StepError>(())
    })?;
    scope.then("the memo has type {string}", |ctx: Context, args: StepArgs| async move {
        let expected = args.text(0)?.to_string();
        let actual = ctx.with("memo", |memo: &DocString| {
            memo.content_type().map(ToString::to_string)
        });
        expect_eq(actual.flatten(), Some(expected))
    })?;
    scope.then("the memo mentions {string}", |ctx: Context, args: StepArgs| async move {
        let needle = args.text(0)?.to_string();
        let found = ctx.with("memo", |memo: &DocString| memo.content().contains(&needle));
        expect_eq(found, Some(true))
    })?;
    Ok(())
}
