//! Generation of libtest suites from Gherkin feature files.
//!
//! A feature file is parsed into the [`model`] types, its collaborator files
//! (support files first, then step-definition files) are discovered, and the
//! [`CodeGenerator`] renders a module in which every scenario, and every
//! examples row of an outline, is a `#[test]` function running against the
//! `suitegen` runtime.
//!
//! Build scripts normally go through [`build::generate_features`]:
//!
//! ```no_run
//! use camino::Utf8PathBuf;
//! use suitegen_codegen::{TransformConfig, build};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let root = Utf8PathBuf::from(std::env::var("CARGO_MANIFEST_DIR")?);
//! let out_dir = Utf8PathBuf::from(std::env::var("OUT_DIR")?);
//! let config = TransformConfig::from_env(root)?.with_features(["tests/features/**/*.feature"]);
//! let report = build::generate_features(&config, &out_dir)?;
//! report.emit_directives(&mut std::io::stdout().lock())?;
//! # Ok(())
//! # }
//! ```

pub mod build;
mod config;
mod discovery;
mod generator;
mod ident;
pub mod model;
mod parser;
mod placeholder;
mod transformer;

pub use config::{
    ConfigError, ConfigOverrides, DEFAULT_FEATURE_GLOB, DEFAULT_STEPS_DIR, RUNTIME_MODULE_VAR,
    STEPS_VAR, SUPPORT_VAR, TransformConfig, VERBOSE_VAR,
};
pub use discovery::{Collaborators, DiscoveryError, discover_collaborators, discover_features};
pub use generator::{
    CodeGenerator, DEFAULT_RUNTIME_MODULE, GENERATED_HEADER, GenerateError,
};
pub use model::Feature;
pub use parser::{ParseError, parse_feature};
pub use transformer::{FeatureTransformer, TransformError};
