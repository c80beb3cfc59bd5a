//! Configuration consumed by the orchestrator and the build helper.

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

use crate::generator::DEFAULT_RUNTIME_MODULE;

/// Steps directory used when none is configured.
pub const DEFAULT_STEPS_DIR: &str = "tests/steps";
/// Feature glob used when none is configured.
pub const DEFAULT_FEATURE_GLOB: &str = "**/*.feature";

/// Environment variable naming the steps directory.
pub const STEPS_VAR: &str = "SUITEGEN_STEPS";
/// Environment variable listing support directories, separated by `,`.
pub const SUPPORT_VAR: &str = "SUITEGEN_SUPPORT";
/// Environment variable naming the runtime module path.
pub const RUNTIME_MODULE_VAR: &str = "SUITEGEN_RUNTIME_MODULE";
/// Environment variable enabling verbose diagnostics.
pub const VERBOSE_VAR: &str = "SUITEGEN_VERBOSE";

/// Errors raised while reading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A boolean variable held something other than a recognised spelling.
    #[error("{var} must be one of 1/true/yes/on or 0/false/no/off, got '{value}'")]
    InvalidBool {
        /// Variable name.
        var: &'static str,
        /// Rejected value.
        value: String,
    },
    /// A path variable was set but empty.
    #[error("{var} is set but empty")]
    Empty {
        /// Variable name.
        var: &'static str,
    },
}

/// Orchestrator configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformConfig {
    /// Step-definition directory, relative to `root` unless absolute.
    pub steps: Utf8PathBuf,
    /// Explicit support directories; disables support auto-detection.
    pub support: Option<Vec<Utf8PathBuf>>,
    /// Path generated code reaches the runtime through.
    pub runtime_module: String,
    /// Log discovery and generation at `info` instead of `debug`.
    pub verbose: bool,
    /// Feature globs, relative to `root`.
    pub features: Vec<String>,
    /// Base directory for relative paths.
    pub root: Utf8PathBuf,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            steps: Utf8PathBuf::from(DEFAULT_STEPS_DIR),
            support: None,
            runtime_module: DEFAULT_RUNTIME_MODULE.to_string(),
            verbose: false,
            features: vec![DEFAULT_FEATURE_GLOB.to_string()],
            root: Utf8PathBuf::from("."),
        }
    }
}

/// Values given on the command line, taking precedence over configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Replacement steps directory.
    pub steps: Option<Utf8PathBuf>,
    /// Replacement support directories; ignored when empty.
    pub support: Vec<Utf8PathBuf>,
    /// Replacement runtime module.
    pub runtime_module: Option<String>,
    /// Forces verbose diagnostics on.
    pub verbose: bool,
    /// Replacement feature globs; ignored when empty.
    pub features: Vec<String>,
}

impl TransformConfig {
    /// Default configuration rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Set the steps directory.
    #[must_use]
    pub fn with_steps(mut self, steps: impl Into<Utf8PathBuf>) -> Self {
        self.steps = steps.into();
        self
    }

    /// Use exactly these support directories.
    #[must_use]
    pub fn with_support<I, P>(mut self, support: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Utf8PathBuf>,
    {
        self.support = Some(support.into_iter().map(Into::into).collect());
        self
    }

    /// Set the runtime module path.
    #[must_use]
    pub fn with_runtime_module(mut self, module: impl Into<String>) -> Self {
        self.runtime_module = module.into();
        self
    }

    /// Enable or disable verbose diagnostics.
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Replace the feature globs.
    #[must_use]
    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }

    /// Configuration rooted at `root` with `SUITEGEN_*` variables applied.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when a variable holds an unusable value.
    pub fn from_env(root: impl Into<Utf8PathBuf>) -> Result<Self, ConfigError> {
        Self::from_lookup(root, |var| std::env::var(var).ok())
    }

    /// Like [`TransformConfig::from_env`], reading variables through
    /// `lookup`.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when a variable holds an unusable value.
    pub fn from_lookup<F>(root: impl Into<Utf8PathBuf>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(root);
        if let Some(steps) = lookup(STEPS_VAR) {
            config.steps = non_empty(STEPS_VAR, &steps)?.into();
        }
        if let Some(support) = lookup(SUPPORT_VAR) {
            let dirs: Vec<Utf8PathBuf> = support
                .split(',')
                .map(str::trim)
                .filter(|dir| !dir.is_empty())
                .map(Utf8PathBuf::from)
                .collect();
            if dirs.is_empty() {
                return Err(ConfigError::Empty { var: SUPPORT_VAR });
            }
            config.support = Some(dirs);
        }
        if let Some(module) = lookup(RUNTIME_MODULE_VAR) {
            config.runtime_module = non_empty(RUNTIME_MODULE_VAR, &module)?.to_string();
        }
        if let Some(verbose) = lookup(VERBOSE_VAR) {
            config.verbose = parse_bool(VERBOSE_VAR, &verbose)?;
        }
        Ok(config)
    }

    /// Apply command-line values over this configuration.
    #[must_use]
    pub fn apply_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(steps) = overrides.steps {
            self.steps = steps;
        }
        if !overrides.support.is_empty() {
            self.support = Some(overrides.support);
        }
        if let Some(module) = overrides.runtime_module {
            self.runtime_module = module;
        }
        self.verbose |= overrides.verbose;
        if !overrides.features.is_empty() {
            self.features = overrides.features;
        }
        self
    }

    /// `path` resolved against `root`.
    #[must_use]
    pub fn resolve(&self, path: &Utf8Path) -> Utf8PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Log level for discovery and generation diagnostics.
    #[must_use]
    pub fn log_level(&self) -> log::Level {
        if self.verbose {
            log::Level::Info
        } else {
            log::Level::Debug
        }
    }
}

fn non_empty<'a>(var: &'static str, value: &'a str) -> Result<&'a str, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ConfigError::Empty { var })
    } else {
        Ok(trimmed)
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbrown::HashMap;
    use rstest::rstest;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn defaults_match_the_conventional_layout() {
        let config = TransformConfig::default();
        assert_eq!(config.steps, "tests/steps");
        assert_eq!(config.support, None);
        assert_eq!(config.runtime_module, "suitegen");
        assert_eq!(config.features, ["**/*.feature"]);
        assert!(!config.verbose);
    }

    #[test]
    fn reads_every_variable() {
        let config = TransformConfig::from_lookup(
            "/work",
            lookup(&[
                (STEPS_VAR, "tests/e2e/steps"),
                (SUPPORT_VAR, "tests/a, tests/b,"),
                (RUNTIME_MODULE_VAR, "crate::bdd"),
                (VERBOSE_VAR, "Yes"),
            ]),
        )
        .unwrap_or_else(|err| panic!("config should load: {err}"));
        assert_eq!(config.steps, "tests/e2e/steps");
        assert_eq!(
            config.support,
            Some(vec![Utf8PathBuf::from("tests/a"), Utf8PathBuf::from("tests/b")])
        );
        assert_eq!(config.runtime_module, "crate::bdd");
        assert!(config.verbose);
        assert_eq!(config.root, "/work");
    }

    #[rstest]
    #[case("maybe")]
    #[case("")]
    fn rejects_unknown_booleans(#[case] value: &str) {
        let result = TransformConfig::from_lookup(".", lookup(&[(VERBOSE_VAR, value)]));
        assert_eq!(
            result,
            Err(ConfigError::InvalidBool {
                var: VERBOSE_VAR,
                value: value.to_string(),
            })
        );
    }

    #[rstest]
    #[case(STEPS_VAR, " ")]
    #[case(SUPPORT_VAR, " , ")]
    #[case(RUNTIME_MODULE_VAR, "")]
    fn rejects_empty_values(#[case] var: &'static str, #[case] value: &str) {
        let result = TransformConfig::from_lookup(".", lookup(&[(var, value)]));
        assert_eq!(result, Err(ConfigError::Empty { var }));
    }

    #[test]
    fn overrides_take_precedence() {
        let config = TransformConfig::new("/work")
            .with_support(["tests/support"])
            .apply_overrides(ConfigOverrides {
                steps: Some("bdd/steps".into()),
                support: vec!["bdd/support".into()],
                runtime_module: None,
                verbose: true,
                features: Vec::new(),
            });
        assert_eq!(config.steps, "bdd/steps");
        assert_eq!(config.support, Some(vec![Utf8PathBuf::from("bdd/support")]));
        assert_eq!(config.runtime_module, "suitegen");
        assert_eq!(config.features, ["**/*.feature"]);
        assert_eq!(config.log_level(), log::Level::Info);
    }

    #[test]
    fn resolves_relative_paths_against_the_root() {
        let config = TransformConfig::new("/work");
        assert_eq!(config.resolve(Utf8Path::new("tests/steps")), "/work/tests/steps");
        assert_eq!(config.resolve(Utf8Path::new("/abs")), "/abs");
    }
}
