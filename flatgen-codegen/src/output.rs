//! Writing generated units to disk.

use crate::error::CodegenError;
use crate::generator::GeneratedUnit;
use std::fs;
use std::path::{Path, PathBuf};

/// What [`write_unit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The unit was [`GeneratedUnit::Skip`]; nothing was touched.
    Skipped,
    /// The file already held identical content.
    Unchanged(PathBuf),
    /// The file was created or replaced.
    Written(PathBuf),
}

impl WriteOutcome {
    /// Returns the path of the generated file, unless the unit was skipped.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Skipped => None,
            Self::Unchanged(path) | Self::Written(path) => Some(path),
        }
    }
}

/// Returns the file name of the unit generated for schema `name`.
#[must_use]
pub fn generated_file_name(name: &str) -> String {
    format!("{}.rs", name)
}

/// Writes `unit` to `<dir>/<name>.rs`.
///
/// The file is left alone when its content already matches, keeping its
/// modification time stable for build tools.
///
/// # Errors
/// Returns `CodegenError` if `name` is empty or the file cannot be
/// read or written.
pub fn write_unit(dir: &Path, name: &str, unit: &GeneratedUnit) -> Result<WriteOutcome, CodegenError> {
    if name.is_empty() {
        return Err(CodegenError::generation("schema name is empty"));
    }

    let Some(code) = unit.code() else {
        tracing::info!("Nothing to generate for {}", name);
        return Ok(WriteOutcome::Skipped);
    };

    let path = dir.join(generated_file_name(name));
    if path.exists() && fs::read_to_string(&path)? == code {
        tracing::info!("{} is up to date", path.display());
        return Ok(WriteOutcome::Unchanged(path));
    }

    fs::create_dir_all(dir)?;
    fs::write(&path, code)?;
    tracing::info!("Wrote {}", path.display());
    Ok(WriteOutcome::Written(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_file_name() {
        assert_eq!(generated_file_name("monster"), "monster.rs");
    }

    #[test]
    fn test_write_unit_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let unit = GeneratedUnit::Code("pub struct A;\n".to_string());

        let outcome = write_unit(dir.path(), "monster", &unit).unwrap();
        let path = dir.path().join("monster.rs");
        assert_eq!(outcome, WriteOutcome::Written(path.clone()));
        assert_eq!(fs::read_to_string(&path).unwrap(), "pub struct A;\n");
    }

    #[test]
    fn test_write_unit_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let unit = GeneratedUnit::Code("pub struct A;\n".to_string());

        write_unit(dir.path(), "monster", &unit).unwrap();
        let outcome = write_unit(dir.path(), "monster", &unit).unwrap();
        assert!(matches!(outcome, WriteOutcome::Unchanged(_)));

        let changed = GeneratedUnit::Code("pub struct B;\n".to_string());
        let outcome = write_unit(dir.path(), "monster", &changed).unwrap();
        assert!(matches!(outcome, WriteOutcome::Written(_)));
        assert_eq!(
            fs::read_to_string(outcome.path().unwrap()).unwrap(),
            "pub struct B;\n"
        );
    }

    #[test]
    fn test_write_unit_skip() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = write_unit(dir.path(), "monster", &GeneratedUnit::Skip).unwrap();

        assert_eq!(outcome, WriteOutcome::Skipped);
        assert_eq!(outcome.path(), None);
        assert!(!dir.path().join("monster.rs").exists());
    }

    #[test]
    fn test_write_unit_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("gen").join("schema");
        let unit = GeneratedUnit::Code("// empty\n".to_string());

        write_unit(&nested, "monster", &unit).unwrap();
        assert!(nested.join("monster.rs").exists());
    }

    #[test]
    fn test_write_unit_empty_name() {
        let dir = tempfile::tempdir().unwrap();
        let unit = GeneratedUnit::Code(String::new());

        let err = write_unit(dir.path(), "", &unit).unwrap_err();
        assert!(matches!(err, CodegenError::Generation { .. }));
    }
}
