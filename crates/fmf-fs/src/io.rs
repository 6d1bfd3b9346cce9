//! Atomic file replacement
//!
//! Content is written to a sibling temp file in the destination's directory
//! and then renamed over the destination, so readers only ever see the old
//! file or the complete new one. No locking is performed: two concurrent
//! operations of the same kind on the same path share a temp name and race.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// The operation a temp file belongs to.
///
/// Each kind appends a fixed suffix to the destination path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TempKind {
    /// Writing a new frontmatter file
    Write,
    /// Stripping frontmatter in place
    Strip,
    /// Inserting or replacing frontmatter in place
    Insert,
    /// Writing a plain YAML file
    Yaml,
}

impl TempKind {
    /// Suffix appended to the destination path.
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Write => ".fmf.write.tmp",
            Self::Strip => ".fmf.strip.tmp",
            Self::Insert => ".fmf.insert.tmp",
            Self::Yaml => ".yml.tmp",
        }
    }

    /// Temp path for `path`, e.g. `notes.md` -> `notes.md.fmf.write.tmp`.
    pub fn temp_path(&self, path: &Path) -> PathBuf {
        let mut name = OsString::from(path.as_os_str());
        name.push(self.suffix());
        PathBuf::from(name)
    }
}

/// Create the parent directories of `path` if they are missing.
pub fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))
        }
        _ => Ok(()),
    }
}

/// Atomically replace `path` with whatever `fill` writes.
///
/// `fill` receives a buffered writer over the temp file. If it fails, or
/// flushing or renaming fails, the temp file is removed and the original
/// error is returned; the destination is left untouched.
pub fn write_atomic<F, E>(path: &Path, kind: TempKind, fill: F) -> std::result::Result<(), E>
where
    F: FnOnce(&mut BufWriter<File>) -> std::result::Result<(), E>,
    E: From<Error>,
{
    let temp_path = kind.temp_path(path);

    let result = replace_with(path, &temp_path, fill);
    if result.is_err() {
        remove_temp(&temp_path);
    }
    result
}

fn replace_with<F, E>(path: &Path, temp_path: &Path, fill: F) -> std::result::Result<(), E>
where
    F: FnOnce(&mut BufWriter<File>) -> std::result::Result<(), E>,
    E: From<Error>,
{
    let file = File::create(temp_path).map_err(|e| Error::io(temp_path, e))?;
    let mut writer = BufWriter::new(file);

    fill(&mut writer)?;

    let file = writer
        .into_inner()
        .map_err(|e| Error::io(temp_path, e.into_error()))?;
    file.sync_all().map_err(|e| Error::io(temp_path, e))?;
    drop(file);

    tracing::trace!(temp = %temp_path.display(), dest = %path.display(), "renaming temp file");
    fs::rename(temp_path, path).map_err(|e| Error::io(path, e))?;

    Ok(())
}

/// Best-effort removal of a temp file. A missing file is expected.
fn remove_temp(temp_path: &Path) {
    match fs::remove_file(temp_path) {
        Ok(()) => tracing::trace!(temp = %temp_path.display(), "removed temp file"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(
            temp = %temp_path.display(),
            error = %e,
            "failed to remove temp file"
        ),
    }
}

/// Write bytes to `path` atomically.
pub fn write_bytes(path: &Path, kind: TempKind, content: &[u8]) -> Result<()> {
    write_atomic(path, kind, |w| {
        w.write_all(content).map_err(|e| Error::io(path, e))
    })
}

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_path_appends_suffix() {
        let path = Path::new("/tmp/notes/readme.md");
        assert_eq!(
            TempKind::Write.temp_path(path),
            PathBuf::from("/tmp/notes/readme.md.fmf.write.tmp")
        );
        assert_eq!(
            TempKind::Yaml.temp_path(Path::new("config.yml")),
            PathBuf::from("config.yml.yml.tmp")
        );
    }

    #[test]
    fn temp_kinds_have_distinct_suffixes() {
        let kinds = [TempKind::Write, TempKind::Strip, TempKind::Insert, TempKind::Yaml];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a.suffix(), b.suffix());
            }
        }
    }

    #[test]
    fn failed_fill_removes_temp_and_keeps_original() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        fs::write(&path, "original").unwrap();

        let result: Result<()> = write_atomic(&path, TempKind::Insert, |w| {
            w.write_all(b"half of the new").map_err(|e| Error::io(&path, e))?;
            w.flush().map_err(|e| Error::io(&path, e))?;
            Err(Error::io(
                &path,
                std::io::Error::other("simulated failure mid-write"),
            ))
        });

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "original");
        assert!(!TempKind::Insert.temp_path(&path).exists());
    }

    #[test]
    fn ensure_parent_accepts_bare_file_name() {
        ensure_parent(Path::new("file.txt")).unwrap();
    }
}
