//! Rendering of command results.

use std::io::Write;

use camino::Utf8Path;
use eyre::{Context, Result};
use suitegen_codegen::Collaborators;

pub(crate) fn write_source(writer: &mut dyn Write, source: &str) -> Result<()> {
    writer
        .write_all(source.as_bytes())
        .wrap_err("failed to write generated source")
}

pub(crate) fn write_file(path: &Utf8Path, source: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create directory {parent}"))?;
    }
    std::fs::write(path, source).wrap_err_with(|| format!("failed to write {path}"))
}

/// One line per collaborator in load order, tagged with its kind.
pub(crate) fn write_collaborators(writer: &mut dyn Write, found: &Collaborators) -> Result<()> {
    let tagged = found
        .support
        .iter()
        .map(|path| ("support", path))
        .chain(found.steps.iter().map(|path| ("steps", path)));
    for (kind, path) in tagged {
        write_line(writer, kind, path)?;
    }
    Ok(())
}

fn write_line(writer: &mut dyn Write, kind: &str, path: &Utf8Path) -> Result<()> {
    writeln!(writer, "{kind:<8}{path}").wrap_err_with(|| format!("failed to write {path}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    #[test]
    fn support_files_are_listed_first() {
        let found = Collaborators {
            support: vec![Utf8PathBuf::from("/p/tests/support/world.rs")],
            steps: vec![Utf8PathBuf::from("/p/tests/steps/a.rs")],
        };
        let mut out = Vec::new();
        write_collaborators(&mut out, &found).unwrap_or_else(|err| panic!("write: {err}"));
        let text = String::from_utf8(out).unwrap_or_else(|err| panic!("utf8: {err}"));
        assert_eq!(
            text,
            "support /p/tests/support/world.rs\nsteps   /p/tests/steps/a.rs\n"
        );
    }
}
