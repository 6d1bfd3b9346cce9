//! YAML formatting for frontmatter-format
//!
//! Wraps `serde_yaml` with explicit rendering rules: caller-defined key
//! ordering, suppression of empty values, block-style collections, literal
//! block scalars for multi-line strings, and an opt-in fallback that turns
//! values plain YAML cannot carry into strings.

pub mod error;
pub mod formatter;
pub mod util;

pub use error::{Error, Result};
pub use formatter::{FormatterOptions, KeySort, Suppress, YamlFormatter};
pub use util::{
    dump_yaml, from_yaml_string, read_yaml_file, to_yaml_string, write_yaml_file,
};
