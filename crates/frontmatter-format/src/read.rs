//! Reading body and metadata together

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use serde_yaml::Value;

use crate::metadata::Frontmatter;
use crate::raw::read_frontmatter_raw;
use crate::{Error, Result};

/// Read the body text and the unparsed metadata text of a file.
pub fn read_raw(path: impl AsRef<Path>) -> Result<(String, Option<String>)> {
    let path = path.as_ref();
    let raw = read_frontmatter_raw(path)?;

    let mut file = File::open(path).map_err(|e| Error::io(path, e))?;
    file.seek(SeekFrom::Start(raw.offset))
        .map_err(|e| Error::io(path, e))?;
    let mut body = String::new();
    file.read_to_string(&mut body)
        .map_err(|e| Error::io(path, e))?;

    Ok((body, raw.metadata))
}

/// Read the body text and parsed metadata of a file.
///
/// Metadata is `None` when the file has no frontmatter or an empty block.
pub fn read(path: impl AsRef<Path>) -> Result<(String, Option<Frontmatter>)> {
    let path = path.as_ref();
    let (body, metadata) = read_raw(path)?;

    let metadata = match metadata.as_deref() {
        Some(text) if !text.is_empty() => Some(parse_metadata(text, path)?),
        _ => None,
    };
    Ok((body, metadata))
}

/// Parse metadata text, requiring a mapping at the top level.
pub fn parse_metadata(text: &str, path: &Path) -> Result<Frontmatter> {
    let value = fmf_yaml::from_yaml_string(text)
        .map_err(|e| Error::format(path, format!("Error parsing YAML metadata: {e}")))?;

    match value {
        Value::Mapping(mapping) => Ok(mapping),
        other => Err(Error::format(
            path,
            format!("Invalid metadata type: expected a mapping, found {}", kind(&other)),
        )),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
