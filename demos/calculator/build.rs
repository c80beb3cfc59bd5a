//! Generates the feature suites run by `tests/features.rs`.

use camino::Utf8PathBuf;
use suitegen_codegen::TransformConfig;
use suitegen_codegen::build::generate_features;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let root = Utf8PathBuf::from(std::env::var("CARGO_MANIFEST_DIR")?);
    let out_dir = Utf8PathBuf::from(std::env::var("OUT_DIR")?);
    let config = TransformConfig::from_env(root)?.with_features(["tests/features/**/*.feature"]);
    let report = generate_features(&config, &out_dir)?;
    report.emit_directives(&mut std::io::stdout().lock())?;
    Ok(())
}
