//! Emission of runtime step values.

use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;

use crate::model::Step;

/// Expression building the runtime `Step` for `step`.
pub(super) fn step_value(rt: &syn::Path, step: &Step) -> TokenStream {
    let keyword = Ident::new(step.keyword.as_str(), Span::call_site());
    let text = &step.text;
    let mut value = quote! { #rt::Step::new(#rt::StepKeyword::#keyword, #text) };
    if let Some(rows) = &step.table {
        let table = if rows.is_empty() {
            quote! { #rt::DataTable::default() }
        } else {
            let rows = rows.iter().map(|row| quote! { ::std::vec![#(#row),*] });
            quote! { #rt::DataTable::new(::std::vec![#(#rows),*]) }
        };
        value = quote! { #value.with_table(#table) };
    }
    if let Some(doc) = &step.doc_string {
        let content = &doc.content;
        let mut doc_string = quote! { #rt::DocString::new(#content) };
        if let Some(content_type) = &doc.content_type {
            doc_string = quote! { #doc_string.with_content_type(#content_type) };
        }
        value = quote! { #value.with_doc_string(#doc_string) };
    }
    value
}

/// Executor construction, emitted only when there are steps to run.
pub(super) fn executor(rt: &syn::Path, steps: &[Step]) -> TokenStream {
    if steps.is_empty() {
        return TokenStream::new();
    }
    quote! {
        let executor = #rt::StepExecutor::new(::std::sync::Arc::clone(scope.steps()));
    }
}

/// One awaited execution per step, in order, against `context`.
pub(super) fn step_calls(rt: &syn::Path, steps: &[Step], context: &TokenStream) -> TokenStream {
    let calls = steps.iter().map(|step| {
        let value = step_value(rt, step);
        quote! { executor.execute(#context, &#value).await?; }
    });
    quote! { #(#calls)* }
}
