//! Build-script driver.
//!
//! A test target's `build.rs` calls [`generate_features`] and forwards the
//! returned directives to Cargo; the test target then includes the index:
//!
//! ```ignore
//! include!(concat!(env!("OUT_DIR"), "/suitegen_features.rs"));
//! ```

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use hashbrown::HashSet;

use crate::config::TransformConfig;
use crate::discovery::discover_features;
use crate::generator::GENERATED_HEADER;
use crate::ident::{dedupe_name, sanitize_ident};
use crate::transformer::{FeatureTransformer, TransformError};

/// Name of the index file written to the output directory.
pub const INDEX_FILE: &str = "suitegen_features.rs";

/// Subdirectory of the output directory holding one file per feature.
pub const FEATURES_DIR: &str = "suitegen";

/// Outcome of [`generate_features`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Feature files that were transformed.
    pub features: Vec<Utf8PathBuf>,
    /// Generated module files, parallel to `features`.
    pub generated: Vec<Utf8PathBuf>,
    /// Collaborator files in load order.
    pub collaborators: Vec<Utf8PathBuf>,
    /// Directories whose contents affect the output.
    pub watched_dirs: Vec<Utf8PathBuf>,
    /// Index file including every generated module.
    pub index: Utf8PathBuf,
}

impl BuildReport {
    /// Paths Cargo should watch to rerun the build script.
    pub fn rerun_paths(&self) -> impl Iterator<Item = &Utf8Path> {
        self.features
            .iter()
            .chain(&self.collaborators)
            .chain(&self.watched_dirs)
            .map(Utf8PathBuf::as_path)
    }

    /// Write `cargo:rerun-if-changed` directives to `out`.
    ///
    /// # Errors
    /// Returns any error raised by `out`.
    pub fn emit_directives(&self, out: &mut impl Write) -> std::io::Result<()> {
        for path in self.rerun_paths() {
            writeln!(out, "cargo:rerun-if-changed={path}")?;
        }
        Ok(())
    }
}

/// Transform every feature matched by `config` into `out_dir`.
///
/// Each feature becomes `<out_dir>/suitegen/<module>.rs`, with module names
/// derived from feature titles and made unique across the run. The index
/// file `<out_dir>/suitegen_features.rs` includes all of them in feature path
/// order. Files whose content is unchanged are not rewritten.
///
/// # Errors
/// Returns [`TransformError`] when discovery, parsing, generation or writing
/// fails.
pub fn generate_features(
    config: &TransformConfig,
    out_dir: &Utf8Path,
) -> Result<BuildReport, TransformError> {
    let transformer = FeatureTransformer::new(config.clone());
    let features = discover_features(config)?;
    let found = transformer.collaborators()?;
    let collaborators = found.ordered();

    let features_dir = out_dir.join(FEATURES_DIR);
    std::fs::create_dir_all(&features_dir)
        .map_err(|err| TransformError::io(&features_dir, err))?;

    let mut used = HashSet::new();
    let mut generated = Vec::with_capacity(features.len());
    let mut index = format!("{GENERATED_HEADER}\n");
    for path in &features {
        let text = std::fs::read_to_string(path).map_err(|err| TransformError::io(path, err))?;
        let feature = transformer.parse(&text, path)?;
        let module = dedupe_name(&sanitize_ident(&feature.name), &mut used);
        let source = transformer.render(&feature, &collaborators, Some(&module))?;
        let target = features_dir.join(format!("{module}.rs"));
        write_if_changed(&target, &source)?;
        index.push_str(&format!("include!({:?});\n", target.as_str()));
        generated.push(target);
    }
    let index_path = out_dir.join(INDEX_FILE);
    write_if_changed(&index_path, &index)?;

    let mut watched_dirs = vec![config.resolve(&config.steps)];
    watched_dirs.extend(found.support.iter().filter_map(|p| p.parent().map(Utf8Path::to_path_buf)));
    watched_dirs.extend(features.iter().filter_map(|p| p.parent().map(Utf8Path::to_path_buf)));
    watched_dirs.sort();
    watched_dirs.dedup();

    log::log!(
        config.log_level(),
        "generated {} feature modules into {features_dir}",
        generated.len()
    );
    Ok(BuildReport {
        features,
        generated,
        collaborators,
        watched_dirs,
        index: index_path,
    })
}

fn write_if_changed(path: &Utf8Path, contents: &str) -> Result<(), TransformError> {
    if std::fs::read_to_string(path).is_ok_and(|existing| existing == contents) {
        return Ok(());
    }
    std::fs::write(path, contents).map_err(|err| TransformError::io(path, err))
}
