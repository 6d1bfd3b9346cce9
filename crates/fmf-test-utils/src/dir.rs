//! [`TestDir`] fixture for file-based test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory with helpers for writing, reading, and asserting on
/// files by relative name.
///
/// # Example
///
/// ```rust,no_run
/// use fmf_test_utils::TestDir;
///
/// let dir = TestDir::new();
/// let path = dir.write("notes.md", "---\ntitle: Hi\n---\nbody");
/// dir.assert_file_content("notes.md", "---\ntitle: Hi\n---\nbody");
/// dir.assert_no_temp_files();
/// # let _ = path;
/// ```
pub struct TestDir {
    temp_dir: TempDir,
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDir {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `name` inside the directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }

    /// Write `content` to `name`, creating parent directories. Returns the path.
    pub fn write(&self, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Read `name` as UTF-8 text.
    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path(name))
            .unwrap_or_else(|e| panic!("failed to read {name}: {e}"))
    }

    /// Read `name` as raw bytes.
    pub fn read_bytes(&self, name: &str) -> Vec<u8> {
        fs::read(self.path(name)).unwrap_or_else(|e| panic!("failed to read {name}: {e}"))
    }

    /// Assert that `name` exists.
    pub fn assert_file_exists(&self, name: &str) {
        assert!(self.path(name).exists(), "expected {name} to exist");
    }

    /// Assert that `name` holds exactly `expected`.
    pub fn assert_file_content(&self, name: &str, expected: &str) {
        assert_eq!(self.read(name), expected, "unexpected content in {name}");
    }

    /// Names of leftover `*.tmp` files anywhere under the directory.
    pub fn temp_files(&self) -> Vec<String> {
        let mut found = Vec::new();
        collect_temp_files(self.root(), &mut found);
        found.sort();
        found
    }

    /// Assert that no `*.tmp` files remain.
    pub fn assert_no_temp_files(&self) {
        let found = self.temp_files();
        assert!(found.is_empty(), "temp files left behind: {found:?}");
    }
}

fn collect_temp_files(dir: &Path, found: &mut Vec<String>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_temp_files(&path, found);
        } else if entry.file_name().to_string_lossy().ends_with(".tmp") {
            found.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
}
