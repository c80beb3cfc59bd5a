//! Feature-level items: docs, collaborator modules, setup and teardown.

use camino::Utf8PathBuf;
use hashbrown::HashSet;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::model::Feature;

/// Doc attributes describing the feature.
pub(super) fn feature_docs(feature: &Feature) -> TokenStream {
    let mut lines = vec![format!("Feature: {}", feature.name)];
    if let Some(description) = &feature.description {
        lines.push(String::new());
        lines.extend(description.lines().map(|line| line.trim().to_string()));
    }
    if !feature.tags.is_empty() {
        lines.push(String::new());
        lines.push(format!("Tags: {}", feature.tags.join(" ")));
    }
    doc_lines(&lines)
}

/// One `#[doc]` attribute per line.
pub(super) fn doc_lines(lines: &[String]) -> TokenStream {
    quote! { #(#[doc = #lines])* }
}

/// `#[path]` module declarations, one per collaborator in load order.
pub(super) fn collaborator_modules(
    collaborators: &[Utf8PathBuf],
    used: &mut HashSet<String>,
) -> Vec<TokenStream> {
    collaborators
        .iter()
        .enumerate()
        .map(|(index, path)| {
            let module = format_ident!("collaborator_{}", index);
            used.insert(module.to_string());
            let path = path.as_str();
            quote! {
                #[path = #path]
                mod #module;
            }
        })
        .collect()
}

/// Suite setup: register every collaborator while the suite's scope is the
/// ambient feature context, then run the `BeforeAll` hooks.
pub(super) fn setup_phase(rt: &syn::Path, collaborators: &[Utf8PathBuf]) -> TokenStream {
    let registrations = collaborators.iter().enumerate().map(|(index, path)| {
        let module = format_ident!("collaborator_{}", index);
        let path = path.as_str();
        quote! {
            #module::register(&scope)
                .map_err(|err| #rt::ExecutionError::registration(#path, err))?;
        }
    });
    quote! {
        fn __suitegen_setup(
            scope: #rt::FeatureScope,
        ) -> #rt::LocalBoxFuture<'static, ::core::result::Result<(), #rt::ExecutionError>> {
            ::std::boxed::Box::pin(async move {
                {
                    let _guard = #rt::FeatureContextGuard::activate(&scope);
                    #(#registrations)*
                }
                let context = #rt::ContextManager::new().context();
                scope.hooks().execute(#rt::HookKind::BeforeAll, &context).await
            })
        }
    }
}

/// Suite teardown: run the `AfterAll` hooks. The runtime clears the
/// registries afterwards whatever the hooks return.
pub(super) fn teardown_phase(rt: &syn::Path) -> TokenStream {
    quote! {
        fn __suitegen_teardown(
            scope: #rt::FeatureScope,
        ) -> #rt::LocalBoxFuture<'static, ::core::result::Result<(), #rt::ExecutionError>> {
            ::std::boxed::Box::pin(async move {
                let context = #rt::ContextManager::new().context();
                scope.hooks().execute(#rt::HookKind::AfterAll, &context).await
            })
        }
    }
}

/// The static suite every test of the feature runs through.
pub(super) fn suite_static(rt: &syn::Path, feature_name: &str, test_count: usize) -> TokenStream {
    quote! {
        static __SUITEGEN: ::std::sync::LazyLock<#rt::FeatureSuite> =
            ::std::sync::LazyLock::new(|| {
                #rt::FeatureSuite::new(
                    #feature_name,
                    #test_count,
                    __suitegen_setup,
                    __suitegen_teardown,
                )
            });
    }
}
