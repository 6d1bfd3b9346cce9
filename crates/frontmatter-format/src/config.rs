//! Persistent defaults for writing frontmatter

use std::path::Path;

use fmf_fs::ConfigStore;
use fmf_yaml::{KeySort, YamlFormatter};
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::style::Style;
use crate::write::WriteOptions;

/// Write defaults, loadable from a `.toml`, `.json`, or `.yaml` file.
///
/// ```toml
/// style = "hash"
/// priority_keys = ["title", "date"]
/// make_parents = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FmfConfig {
    pub style: Style,
    /// Keys written first, in this order
    pub priority_keys: Vec<String>,
    pub make_parents: bool,
    pub stringify_unknown: bool,
}

impl Default for FmfConfig {
    fn default() -> Self {
        Self {
            style: Style::Yaml,
            priority_keys: Vec::new(),
            make_parents: true,
            stringify_unknown: false,
        }
    }
}

impl FmfConfig {
    /// Load from a config file; the format follows the extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(ConfigStore::new().load(path.as_ref())?)
    }

    pub fn key_sort(&self) -> Option<KeySort> {
        if self.priority_keys.is_empty() {
            None
        } else {
            Some(KeySort::priority(self.priority_keys.iter().cloned()))
        }
    }

    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            style: self.style,
            key_sort: self.key_sort(),
            make_parents: self.make_parents,
            stringify_unknown: self.stringify_unknown,
        }
    }

    pub fn formatter(&self) -> YamlFormatter {
        self.write_options().formatter()
    }
}
