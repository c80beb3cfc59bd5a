//! Backgrounds, scenarios, outlines and rules.
//!
//! Items are emitted relative to the feature module: `depth` counts the
//! nested modules between an item and the feature module, and the nearest
//! background is remembered by the depth it was defined at so callers can
//! reach it through `super::`.

use hashbrown::HashSet;
use proc_macro2::TokenStream;
use quote::quote;

use crate::model::{Background, Rule, Scenario, Step};
use crate::placeholder::ExampleRow;

use super::step::{executor, step_calls};
use super::suite::doc_lines;
use super::{RESERVED_ITEMS, item_ident, supers};

#[derive(Clone, Copy)]
pub(super) struct Scope<'a> {
    rt: &'a syn::Path,
    depth: usize,
    background: Option<usize>,
}

impl<'a> Scope<'a> {
    pub(super) fn root(rt: &'a syn::Path, has_background: bool) -> Self {
        Self {
            rt,
            depth: 0,
            background: has_background.then_some(0),
        }
    }

    fn nested(self) -> Self {
        Self {
            depth: self.depth.saturating_add(1),
            ..self
        }
    }

    /// Items of the feature module: its background, scenarios and rules.
    pub(super) fn items(
        self,
        background: Option<&Background>,
        scenarios: &[Scenario],
        rules: &[Rule],
        used: &mut HashSet<String>,
    ) -> Vec<TokenStream> {
        let mut items = Vec::new();
        if let Some(background) = background {
            items.push(self.background_fn(&background.steps, None));
        }
        items.extend(self.scenarios(scenarios, used));
        items.extend(rules.iter().map(|rule| self.rule(rule, used)));
        items
    }

    fn scenarios(self, scenarios: &[Scenario], used: &mut HashSet<String>) -> Vec<TokenStream> {
        scenarios
            .iter()
            .map(|scenario| {
                if scenario.is_outline() {
                    self.outline(scenario, used)
                } else {
                    let docs = scenario_docs("Scenario", &scenario.name, &scenario.tags);
                    self.test_fn(&scenario.name, &scenario.name, docs, &scenario.steps, used)
                }
            })
            .collect()
    }

    /// Per-scenario setup shared by the scenarios of this scope: `Before`
    /// hooks (or the enclosing background, which ran them) followed by the
    /// background steps.
    fn background_fn(self, steps: &[Step], parent: Option<usize>) -> TokenStream {
        let rt = self.rt;
        let prelude = match parent {
            Some(depth) => {
                let path = supers(self.depth.saturating_sub(depth));
                quote! { #path __suitegen_background(scope, context).await?; }
            }
            None => quote! { scope.hooks().execute(#rt::HookKind::Before, context).await?; },
        };
        let executor = executor(rt, steps);
        let calls = step_calls(rt, steps, &quote! { context });
        quote! {
            async fn __suitegen_background(
                scope: &#rt::FeatureScope,
                context: &#rt::Context,
            ) -> ::core::result::Result<(), #rt::ExecutionError> {
                #prelude
                #executor
                #calls
                ::core::result::Result::Ok(())
            }
        }
    }

    fn rule(self, rule: &Rule, used: &mut HashSet<String>) -> TokenStream {
        let module = item_ident(&rule.name, used);
        let docs = scenario_docs("Rule", &rule.name, &rule.tags);
        let mut inner = self.nested();
        let mut items = Vec::new();
        let has_tests = rule.scenarios.iter().any(|s| s.test_count() > 0);
        if let Some(background) = rule.background.as_ref().filter(|_| has_tests) {
            items.push(inner.background_fn(&background.steps, self.background));
            inner.background = Some(inner.depth);
        }
        let mut rule_used = reserved();
        items.extend(inner.scenarios(&rule.scenarios, &mut rule_used));
        quote! {
            #docs
            mod #module {
                #(#items)*
            }
        }
    }

    fn outline(self, outline: &Scenario, used: &mut HashSet<String>) -> TokenStream {
        let module = item_ident(&outline.name, used);
        let docs = scenario_docs("Scenario Outline", &outline.name, &outline.tags);
        let inner = self.nested();
        let mut row_used = reserved();
        let mut tests = Vec::new();
        for examples in &outline.examples {
            for values in &examples.rows {
                let row = ExampleRow::new(&examples.headers, values);
                let title = row.title();
                let steps: Vec<Step> = outline
                    .steps
                    .iter()
                    .map(|step| row.substitute_step(step))
                    .collect();
                let mut tags = outline.tags.clone();
                tags.extend(examples.tags.iter().cloned());
                let docs = scenario_docs("", &title, &tags);
                let display = format!("{} / {title}", outline.name);
                tests.push(inner.test_fn(&title, &display, docs, &steps, &mut row_used));
            }
        }
        quote! {
            #docs
            mod #module {
                #(#tests)*
            }
        }
    }

    /// One `#[test]` function. `After` hooks run whatever the body returns.
    fn test_fn(
        self,
        title: &str,
        display: &str,
        docs: TokenStream,
        steps: &[Step],
        used: &mut HashSet<String>,
    ) -> TokenStream {
        let rt = self.rt;
        let name = item_ident(title, used);
        log::debug!("test '{display}' generated as `{name}`");
        let suite = supers(self.depth);
        let prelude = match self.background {
            Some(depth) => {
                let path = supers(self.depth.saturating_sub(depth));
                quote! { #path __suitegen_background(&scope, &context).await?; }
            }
            None => quote! { scope.hooks().execute(#rt::HookKind::Before, &context).await?; },
        };
        let executor = executor(rt, steps);
        let calls = step_calls(rt, steps, &quote! { &context });
        quote! {
            #docs
            #[test]
            fn #name() {
                #suite __SUITEGEN.run_scenario(#display, |scope| async move {
                    let mut manager = #rt::ContextManager::new();
                    let context = manager.context();
                    #executor
                    let outcome = #rt::ScenarioOutcome::capture(async {
                        #prelude
                        #calls
                        ::core::result::Result::<(), #rt::ExecutionError>::Ok(())
                    })
                    .await;
                    let after = scope.hooks().execute(#rt::HookKind::After, &context).await;
                    outcome.finish(after)
                });
            }
        }
    }
}

fn reserved() -> HashSet<String> {
    RESERVED_ITEMS.iter().map(ToString::to_string).collect()
}

fn scenario_docs(kind: &str, name: &str, tags: &[String]) -> TokenStream {
    let mut lines = vec![if kind.is_empty() {
        name.to_string()
    } else {
        format!("{kind}: {name}")
    }];
    if !tags.is_empty() {
        lines.push(String::new());
        lines.push(format!("Tags: {}", tags.join(" ")));
    }
    doc_lines(&lines)
}
