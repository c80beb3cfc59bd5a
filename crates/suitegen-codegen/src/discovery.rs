//! Collaborator and feature file discovery.
//!
//! Support files (world factories, hooks, shared state) are loaded before
//! step-definition files. Both sets are sorted and deduplicated so generated
//! output does not depend on directory iteration order.

use std::collections::BTreeSet;
use std::path::PathBuf;

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::config::TransformConfig;

/// Support locations tried, relative to the root, after the directories next
/// to and inside the steps directory.
const FALLBACK_SUPPORT_DIRS: &[&str] = &["tests/e2e/support", "tests/support"];

/// Directories never searched for feature files.
const EXCLUDED_FEATURE_DIRS: &[&str] = &["!target/**", "!**/target/**"];

/// Errors raised while searching the file system.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// A directory could not be traversed.
    #[error("failed to walk {path}: {source}")]
    Walk {
        /// Directory being walked.
        path: Utf8PathBuf,
        /// Underlying error.
        source: walkdir::Error,
    },
    /// A path could not be made absolute.
    #[error("failed to resolve {path}: {source}")]
    Resolve {
        /// Path being resolved.
        path: Utf8PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// A discovered path is not valid UTF-8.
    #[error("path is not valid UTF-8: {}", .0.display())]
    NonUtf8(PathBuf),
    /// The feature globs could not be compiled.
    #[error("invalid feature glob: {0}")]
    Glob(#[from] globwalk::GlobError),
}

/// Collaborator files of a feature suite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collaborators {
    /// Support files, sorted.
    pub support: Vec<Utf8PathBuf>,
    /// Step-definition files, sorted, never containing a support file.
    pub steps: Vec<Utf8PathBuf>,
}

impl Collaborators {
    /// Load order: every support file, then every step file.
    #[must_use]
    pub fn ordered(&self) -> Vec<Utf8PathBuf> {
        self.support.iter().chain(&self.steps).cloned().collect()
    }

    /// Number of collaborator files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.support.len().saturating_add(self.steps.len())
    }

    /// Returns `true` when no collaborator was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.support.is_empty() && self.steps.is_empty()
    }
}

/// Find the support and step files for `config`.
///
/// Explicit support directories are used exclusively. Without them the first
/// existing directory among `<steps>/../support`, `<steps>/support`,
/// `tests/e2e/support` and `tests/support` is used. Every `.rs` file under
/// the steps directory that is not a support file is a step file. Returned
/// paths are absolute.
///
/// # Errors
/// Returns [`DiscoveryError`] when a directory cannot be walked or a path
/// cannot be resolved.
pub fn discover_collaborators(config: &TransformConfig) -> Result<Collaborators, DiscoveryError> {
    let level = config.log_level();
    let steps_dir = config.resolve(&config.steps);
    let support_dirs = support_dirs(config, &steps_dir);
    log::log!(level, "support directories: {support_dirs:?}");

    let mut support = BTreeSet::new();
    for dir in &support_dirs {
        support.extend(rust_files(dir)?);
    }
    let steps: BTreeSet<Utf8PathBuf> = rust_files(&steps_dir)?
        .into_iter()
        .filter(|path| !support.contains(path))
        .collect();

    let found = Collaborators {
        support: support.into_iter().collect(),
        steps: steps.into_iter().collect(),
    };
    log::log!(
        level,
        "discovered {} support and {} step files under {steps_dir}",
        found.support.len(),
        found.steps.len()
    );
    Ok(found)
}

fn support_dirs(config: &TransformConfig, steps_dir: &Utf8Path) -> Vec<Utf8PathBuf> {
    if let Some(explicit) = &config.support {
        return explicit
            .iter()
            .map(|dir| config.resolve(dir))
            .filter(|dir| {
                let exists = dir.is_dir();
                if !exists {
                    log::warn!("support directory {dir} does not exist");
                }
                exists
            })
            .collect();
    }
    let sibling = steps_dir.parent().map(|parent| parent.join("support"));
    let nested = Some(steps_dir.join("support"));
    let fallbacks = FALLBACK_SUPPORT_DIRS
        .iter()
        .map(|dir| Some(config.root.join(dir)));
    [sibling, nested]
        .into_iter()
        .chain(fallbacks)
        .flatten()
        .find(|dir| dir.is_dir())
        .into_iter()
        .collect()
}

/// Absolute paths of every `.rs` file under `dir`; empty when `dir` does not
/// exist.
fn rust_files(dir: &Utf8Path) -> Result<BTreeSet<Utf8PathBuf>, DiscoveryError> {
    let mut files = BTreeSet::new();
    if !dir.is_dir() {
        return Ok(files);
    }
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry.map_err(|source| DiscoveryError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = utf8(entry.into_path())?;
        if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("rs")) {
            files.insert(absolute(&path)?);
        }
    }
    Ok(files)
}

/// Feature files matching the configured globs under the root, sorted and
/// absolute. `target/` directories are never searched.
///
/// # Errors
/// Returns [`DiscoveryError`] when a glob is invalid or a match cannot be
/// resolved.
pub fn discover_features(config: &TransformConfig) -> Result<Vec<Utf8PathBuf>, DiscoveryError> {
    let patterns: Vec<&str> = config
        .features
        .iter()
        .map(String::as_str)
        .chain(EXCLUDED_FEATURE_DIRS.iter().copied())
        .collect();
    let walker = globwalk::GlobWalkerBuilder::from_patterns(&config.root, &patterns)
        .file_type(globwalk::FileType::FILE)
        .build()?;
    let mut features = BTreeSet::new();
    for entry in walker {
        let entry = entry.map_err(|source| DiscoveryError::Walk {
            path: config.root.clone(),
            source,
        })?;
        features.insert(absolute(&utf8(entry.into_path())?)?);
    }
    log::log!(config.log_level(), "discovered {} feature files", features.len());
    Ok(features.into_iter().collect())
}

fn utf8(path: PathBuf) -> Result<Utf8PathBuf, DiscoveryError> {
    Utf8PathBuf::from_path_buf(path).map_err(DiscoveryError::NonUtf8)
}

fn absolute(path: &Utf8Path) -> Result<Utf8PathBuf, DiscoveryError> {
    path.canonicalize_utf8()
        .map_err(|source| DiscoveryError::Resolve {
            path: path.to_path_buf(),
            source,
        })
}
