//! Idempotent synchronization of generated scripts into the destination
//! tree.
//!
//! Generated text is first written to a scratch file outside the
//! destination tree, then reconciled against the destination file by full
//! content comparison. A byte-identical destination is left completely
//! untouched so modification times stay stable for downstream
//! incremental builds; only a genuine change deletes and replaces the
//! file.

use std::fs;
use std::path::{Path, PathBuf};

use ddlforge_core::Dialect;
use tracing::debug;

use crate::error::{DdlError, Result};

/// Reconciles one dialect's generated text against the destination tree.
///
/// Returns the destination path and whether its content changed.
///
/// # Errors
///
/// - [`DdlError::DestinationConflict`] when `output_dir` is occupied by a
///   non-directory entry.
/// - [`DdlError::Io`] when scratch or destination IO fails.
pub fn sync(
    dialect: Dialect,
    script: &str,
    output_dir: &Path,
    scratch_dir: &Path,
) -> Result<(PathBuf, bool)> {
    if output_dir.exists() && !output_dir.is_dir() {
        return Err(DdlError::DestinationConflict(output_dir.to_path_buf()));
    }
    // Tolerates concurrent creation by sibling dialect tasks.
    fs::create_dir_all(output_dir)?;

    let file_name = format!("{}.sql", dialect.id());
    let scratch_path = scratch_dir.join(&file_name);
    fs::write(&scratch_path, script)?;

    let destination = output_dir.join(&file_name);
    if !destination.exists() {
        fs::copy(&scratch_path, &destination)?;
        debug!(path = %destination.display(), "created destination file");
        return Ok((destination, true));
    }

    let existing = fs::read_to_string(&destination)?;
    let generated = fs::read_to_string(&scratch_path)?;
    if existing == generated {
        debug!(path = %destination.display(), "destination unchanged");
        return Ok((destination, false));
    }

    fs::remove_file(&destination)?;
    fs::copy(&scratch_path, &destination)?;
    debug!(path = %destination.display(), "destination rewritten");
    Ok((destination, true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_missing_destination() {
        let scratch = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let dest_dir = out.path().join("ddl");

        let (path, changed) =
            sync(Dialect::Hsql, "CREATE TABLE \"a\" ();\n", &dest_dir, scratch.path()).unwrap();

        assert!(changed);
        assert_eq!(path, dest_dir.join("hsql.sql"));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "CREATE TABLE \"a\" ();\n"
        );
    }

    #[test]
    fn identical_content_leaves_destination_untouched() {
        let scratch = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();

        let script = "CREATE TABLE \"a\" ();\n";
        let (path, first) = sync(Dialect::Hsql, script, out.path(), scratch.path()).unwrap();
        assert!(first);

        let mtime_before = fs::metadata(&path).unwrap().modified().unwrap();
        std::thread::sleep(std::time::Duration::from_millis(20));

        let (_, second) = sync(Dialect::Hsql, script, out.path(), scratch.path()).unwrap();
        assert!(!second);
        let mtime_after = fs::metadata(&path).unwrap().modified().unwrap();
        assert_eq!(mtime_before, mtime_after);
    }

    #[test]
    fn changed_content_replaces_destination() {
        let scratch = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();

        sync(Dialect::Hsql, "old\n", out.path(), scratch.path()).unwrap();
        let (path, changed) = sync(Dialect::Hsql, "new\n", out.path(), scratch.path()).unwrap();

        assert!(changed);
        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn non_directory_destination_is_a_conflict() {
        let scratch = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let occupied = out.path().join("ddl");
        fs::write(&occupied, "not a directory").unwrap();

        let err = sync(Dialect::Hsql, "x\n", &occupied, scratch.path()).unwrap_err();
        assert!(matches!(err, DdlError::DestinationConflict(_)));
    }
}
