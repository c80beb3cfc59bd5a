//! Feature text in, generated test source out.

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

use crate::config::{ConfigError, TransformConfig};
use crate::discovery::{Collaborators, DiscoveryError, discover_collaborators};
use crate::generator::{CodeGenerator, GenerateError};
use crate::model::Feature;
use crate::parser::{ParseError, parse_feature};

/// Errors raised while transforming a feature.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The feature text could not be parsed.
    #[error("{path}: {source}")]
    Parse {
        /// Feature file.
        path: Utf8PathBuf,
        /// Parser failure.
        source: ParseError,
    },
    /// A file could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File involved.
        path: Utf8PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// Collaborator or feature discovery failed.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    /// The configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Source generation failed.
    #[error(transparent)]
    Generate(#[from] GenerateError),
}

impl TransformError {
    pub(crate) fn io(path: &Utf8Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Parses feature files, discovers their collaborators and renders tests.
#[derive(Debug, Clone)]
pub struct FeatureTransformer {
    config: TransformConfig,
}

impl FeatureTransformer {
    /// Transformer for `config`.
    #[must_use]
    pub fn new(config: TransformConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Collaborator files in load order: support files, then step files.
    ///
    /// # Errors
    /// Returns [`TransformError::Discovery`] when the file system search
    /// fails.
    pub fn discover_collaborators(&self) -> Result<Vec<Utf8PathBuf>, TransformError> {
        Ok(self.collaborators()?.ordered())
    }

    /// Collaborator files split by kind.
    ///
    /// # Errors
    /// See [`FeatureTransformer::discover_collaborators`].
    pub fn collaborators(&self) -> Result<Collaborators, TransformError> {
        Ok(discover_collaborators(&self.config)?)
    }

    /// Parse `text`, read from `path`, and render its test module with the
    /// discovered collaborators.
    ///
    /// # Errors
    /// Returns [`TransformError`] when parsing, discovery or generation fails.
    pub fn transform(&self, text: &str, path: &Utf8Path) -> Result<String, TransformError> {
        let feature = self.parse(text, path)?;
        let collaborators = self.discover_collaborators()?;
        self.render(&feature, &collaborators, None)
    }

    /// Read and transform the feature file at `path`.
    ///
    /// # Errors
    /// Returns [`TransformError::Io`] when the file cannot be read, otherwise
    /// as [`FeatureTransformer::transform`].
    pub fn transform_file(&self, path: &Utf8Path) -> Result<String, TransformError> {
        let text = std::fs::read_to_string(path).map_err(|err| TransformError::io(path, err))?;
        self.transform(&text, path)
    }

    /// Parse feature text, attributing failures to `path`.
    ///
    /// # Errors
    /// Returns [`TransformError::Parse`] when the text is not a feature.
    pub fn parse(&self, text: &str, path: &Utf8Path) -> Result<Feature, TransformError> {
        parse_feature(text).map_err(|source| TransformError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Render an already parsed feature, optionally naming its module.
    ///
    /// # Errors
    /// Returns [`TransformError::Generate`] when the runtime module is not a
    /// Rust path.
    pub fn render(
        &self,
        feature: &Feature,
        collaborators: &[Utf8PathBuf],
        module_name: Option<&str>,
    ) -> Result<String, TransformError> {
        let mut generator = CodeGenerator::new().with_runtime_module(&self.config.runtime_module);
        if let Some(name) = module_name {
            generator = generator.with_module_name(name);
        }
        log::log!(
            self.config.log_level(),
            "rendering feature '{}' with {} collaborators",
            feature.name,
            collaborators.len()
        );
        Ok(generator.generate(feature, collaborators)?)
    }
}
