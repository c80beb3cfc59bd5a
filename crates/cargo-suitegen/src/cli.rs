//! Command dispatch for the `cargo suitegen` entrypoint.

use std::ffi::OsString;
use std::io::{self, Write};

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use eyre::{Context, Result};
use suitegen_codegen::{ConfigOverrides, FeatureTransformer, TransformConfig};

use crate::logging::init_logging;
use crate::output::{write_collaborators, write_file, write_source};

/// Generate libtest suites from Gherkin feature files.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Render the test module for one feature file.
    Generate(GenerateArgs),
    /// List collaborator files in load order.
    Discover(CommonArgs),
}

#[derive(Debug, Args)]
pub(crate) struct GenerateArgs {
    /// Feature file to transform.
    feature: Utf8PathBuf,
    /// Write the module here instead of stdout.
    #[arg(long, short)]
    out: Option<Utf8PathBuf>,
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Debug, Args)]
pub(crate) struct CommonArgs {
    /// Step-definition directory.
    #[arg(long)]
    steps: Option<Utf8PathBuf>,
    /// Support directory; repeat to use several. Disables auto-detection.
    #[arg(long)]
    support: Vec<Utf8PathBuf>,
    /// Path generated code reaches the runtime through.
    #[arg(long)]
    runtime_module: Option<String>,
    /// Log discovery and generation details.
    #[arg(long, short)]
    verbose: bool,
}

impl CommonArgs {
    fn config(&self) -> Result<TransformConfig> {
        let root = std::env::current_dir().wrap_err("failed to read the current directory")?;
        let root = Utf8PathBuf::from_path_buf(root)
            .map_err(|path| eyre::eyre!("current directory {} is not UTF-8", path.display()))?;
        let config = TransformConfig::from_env(root).wrap_err("invalid SUITEGEN_* variable")?;
        Ok(config.apply_overrides(ConfigOverrides {
            steps: self.steps.clone(),
            support: self.support.clone(),
            runtime_module: self.runtime_module.clone(),
            verbose: self.verbose,
            features: Vec::new(),
        }))
    }
}

/// Drop the subcommand name Cargo inserts when run as `cargo suitegen`.
fn cli_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    args.into_iter()
        .enumerate()
        .filter(|(index, arg)| !(*index == 1 && arg == "suitegen"))
        .map(|(_, arg)| arg)
        .collect()
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse_from(cli_args(std::env::args_os()));
    match cli.command {
        Commands::Generate(args) => handle_generate(&args),
        Commands::Discover(args) => handle_discover(&args),
    }
}

fn handle_generate(args: &GenerateArgs) -> Result<()> {
    let config = args.common.config()?;
    init_logging(config.verbose);
    let feature = config.resolve(&args.feature);
    let source = FeatureTransformer::new(config)
        .transform_file(&feature)
        .wrap_err_with(|| format!("failed to generate tests for {feature}"))?;
    if let Some(out) = &args.out {
        write_file(out, &source)?;
        tracing::info!("wrote {out}");
        return Ok(());
    }
    let mut stdout = io::stdout().lock();
    write_source(&mut stdout, &source)?;
    stdout.flush().wrap_err("failed to flush generated source")
}

fn handle_discover(args: &CommonArgs) -> Result<()> {
    let config = args.config()?;
    init_logging(config.verbose);
    let found = FeatureTransformer::new(config)
        .collaborators()
        .wrap_err("failed to discover collaborator files")?;
    let mut stdout = io::stdout().lock();
    write_collaborators(&mut stdout, &found)?;
    stdout.flush().wrap_err("failed to flush collaborator listing")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rstest::rstest;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[rstest]
    #[case(&["cargo-suitegen", "suitegen", "discover"], &["cargo-suitegen", "discover"])]
    #[case(&["cargo-suitegen", "discover"], &["cargo-suitegen", "discover"])]
    #[case(
        &["cargo-suitegen", "generate", "suitegen"],
        &["cargo-suitegen", "generate", "suitegen"]
    )]
    fn strips_the_cargo_subcommand_name(#[case] input: &[&str], #[case] expected: &[&str]) {
        let args = cli_args(input.iter().map(OsString::from));
        let expected: Vec<OsString> = expected.iter().map(OsString::from).collect();
        assert_eq!(args, expected);
    }

    #[test]
    fn repeated_support_flags_accumulate() {
        let cli = Cli::try_parse_from([
            "cargo-suitegen",
            "discover",
            "--support",
            "a",
            "--support",
            "b",
            "--verbose",
        ])
        .unwrap_or_else(|err| panic!("arguments should parse: {err}"));
        let Commands::Discover(args) = cli.command else {
            panic!("expected discover");
        };
        assert_eq!(args.support, [Utf8PathBuf::from("a"), Utf8PathBuf::from("b")]);
        assert!(args.verbose);
    }
}
