//! One-call YAML helpers over [`YamlFormatter`].
//!
//! Input goes through a default formatter; output takes the key order and
//! unknown-value policy per call.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde_yaml::Value;

use crate::{FormatterOptions, KeySort, Result, YamlFormatter};

fn formatter(key_sort: Option<KeySort>, stringify_unknown: bool) -> YamlFormatter {
    YamlFormatter::new(
        FormatterOptions::new()
            .key_sort(key_sort)
            .stringify_unknown(stringify_unknown),
    )
}

/// Read a YAML string into a value.
pub fn from_yaml_string(text: &str) -> Result<Value> {
    YamlFormatter::default().deserialize(text)
}

/// Read a YAML file into a value.
pub fn read_yaml_file(path: impl AsRef<Path>) -> Result<Value> {
    YamlFormatter::default().deserialize_from_file(path.as_ref())
}

/// Convert a value to a YAML string.
pub fn to_yaml_string<T: Serialize + ?Sized>(
    value: &T,
    key_sort: Option<KeySort>,
    stringify_unknown: bool,
) -> Result<String> {
    formatter(key_sort, stringify_unknown).serialize(value)
}

/// Write a value to a YAML stream.
pub fn dump_yaml<T, W>(
    value: &T,
    writer: W,
    key_sort: Option<KeySort>,
    stringify_unknown: bool,
) -> Result<()>
where
    T: Serialize + ?Sized,
    W: Write,
{
    formatter(key_sort, stringify_unknown).serialize_to_writer(value, writer)
}

/// Write a value to a YAML file, replacing it atomically.
pub fn write_yaml_file<T: Serialize + ?Sized>(
    value: &T,
    path: impl AsRef<Path>,
    key_sort: Option<KeySort>,
    stringify_unknown: bool,
) -> Result<()> {
    formatter(key_sort, stringify_unknown).serialize_to_file(value, path.as_ref())
}
