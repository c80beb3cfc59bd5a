//! Generation of libtest source from a parsed feature.
//!
//! One feature becomes one module. The module declares the collaborator files
//! as child modules, owns a static `FeatureSuite` driving setup and teardown,
//! and holds one `#[test]` function per scenario or examples row. Rules and
//! outlines become nested modules.

mod scenario;
mod step;
mod suite;

use camino::Utf8PathBuf;
use hashbrown::HashSet;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use thiserror::Error;

use crate::ident::{dedupe_name, sanitize_ident};
use crate::model::Feature;

use self::scenario::Scope;

/// Default path generated code reaches the runtime through.
pub const DEFAULT_RUNTIME_MODULE: &str = "suitegen";

/// Header written at the top of every generated file.
pub const GENERATED_HEADER: &str = "// @generated by suitegen-codegen; do not edit.";

/// Names generated modules reserve for their own items.
const RESERVED_ITEMS: &[&str] = &[
    "__suitegen_setup",
    "__suitegen_teardown",
    "__suitegen_background",
    "__SUITEGEN",
];

/// Errors raised while generating source.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The configured runtime module is not a Rust path.
    #[error("invalid runtime module path '{module}': {source}")]
    InvalidRuntimeModule {
        /// Path as configured.
        module: String,
        /// Parser diagnostic.
        source: syn::Error,
    },
}

/// Deterministic feature-to-source generator.
#[derive(Debug, Clone)]
pub struct CodeGenerator {
    runtime_module: String,
    module_name: Option<String>,
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGenerator {
    /// Generator reaching the runtime through [`DEFAULT_RUNTIME_MODULE`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            runtime_module: DEFAULT_RUNTIME_MODULE.to_string(),
            module_name: None,
        }
    }

    /// Reach the runtime through another path, such as `crate::bdd`.
    #[must_use]
    pub fn with_runtime_module(mut self, module: impl Into<String>) -> Self {
        self.runtime_module = module.into();
        self
    }

    /// Name the generated feature module instead of deriving it from the
    /// feature title.
    #[must_use]
    pub fn with_module_name(mut self, name: impl Into<String>) -> Self {
        self.module_name = Some(name.into());
        self
    }

    /// Render `feature` as Rust source.
    ///
    /// `collaborators` are declared and registered in the order given, so
    /// support files must precede step files. Identical inputs always render
    /// byte-identical output.
    ///
    /// # Errors
    /// Returns [`GenerateError::InvalidRuntimeModule`] when the runtime module
    /// is not a valid Rust path.
    pub fn generate(
        &self,
        feature: &Feature,
        collaborators: &[Utf8PathBuf],
    ) -> Result<String, GenerateError> {
        let tokens = self.generate_tokens(feature, collaborators)?;
        Ok(format!("{GENERATED_HEADER}\n{tokens}\n"))
    }

    /// Render `feature` as a token stream.
    ///
    /// # Errors
    /// See [`CodeGenerator::generate`].
    pub fn generate_tokens(
        &self,
        feature: &Feature,
        collaborators: &[Utf8PathBuf],
    ) -> Result<TokenStream, GenerateError> {
        let rt = self.runtime_path()?;
        let module_name = sanitize_ident(self.module_name.as_deref().unwrap_or(&feature.name));
        let module = format_ident!("{}", module_name);
        let docs = suite::feature_docs(feature);

        let test_count = feature.test_count();
        if test_count == 0 {
            log::debug!("feature '{}' has no scenarios", feature.name);
            return Ok(quote! {
                #docs
                mod #module {}
            });
        }

        let mut used: HashSet<String> = RESERVED_ITEMS.iter().map(ToString::to_string).collect();
        let collaborator_items = suite::collaborator_modules(collaborators, &mut used);
        let setup = suite::setup_phase(&rt, collaborators);
        let teardown = suite::teardown_phase(&rt);
        let suite_static = suite::suite_static(&rt, &feature.name, test_count);

        let root = Scope::root(&rt, feature.background.is_some());
        let items = root.items(
            feature.background.as_ref(),
            &feature.scenarios,
            &feature.rules,
            &mut used,
        );

        log::debug!(
            "generated module `{module_name}` for feature '{}' with {test_count} tests",
            feature.name
        );
        Ok(quote! {
            #docs
            mod #module {
                #(#collaborator_items)*
                #setup
                #teardown
                #suite_static
                #(#items)*
            }
        })
    }

    fn runtime_path(&self) -> Result<syn::Path, GenerateError> {
        syn::parse_str::<syn::Path>(&self.runtime_module).map_err(|source| {
            GenerateError::InvalidRuntimeModule {
                module: self.runtime_module.clone(),
                source,
            }
        })
    }
}

/// `super::` repeated `depth` times.
fn supers(depth: usize) -> TokenStream {
    let segments = std::iter::repeat_n(quote! { super:: }, depth);
    quote! { #(#segments)* }
}

/// Reserve an identifier for `title` in `used`.
fn item_ident(title: &str, used: &mut HashSet<String>) -> proc_macro2::Ident {
    format_ident!("{}", dedupe_name(&sanitize_ident(title), used))
}
