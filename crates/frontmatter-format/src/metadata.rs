//! Metadata values accepted on write

use std::borrow::Cow;

use fmf_yaml::YamlFormatter;
use serde::Serialize;
use serde_yaml::Value;

use crate::Result;

/// Parsed frontmatter: a YAML mapping in file order.
pub type Frontmatter = serde_yaml::Mapping;

/// Metadata to write, either already-serialized text or a mapping to format.
#[derive(Debug, Clone, PartialEq)]
pub enum Metadata {
    /// Written verbatim, without going through the formatter
    Raw(String),
    /// Serialized with the configured formatter
    Parsed(Frontmatter),
}

impl Metadata {
    /// Build parsed metadata from any serializable value whose YAML form is a
    /// mapping. Returns `None` for other shapes.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Option<Self>> {
        let value = serde_yaml::to_value(value).map_err(fmf_yaml::Error::Serialize)?;
        Ok(match value {
            Value::Mapping(mapping) => Some(Self::Parsed(mapping)),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Raw(text) => text.is_empty(),
            Self::Parsed(mapping) => mapping.is_empty(),
        }
    }

    /// Metadata text as it goes between the markers, before line prefixes.
    pub fn render(&self, formatter: &YamlFormatter) -> Result<Cow<'_, str>> {
        match self {
            Self::Raw(text) => Ok(Cow::Borrowed(text)),
            Self::Parsed(mapping) => Ok(Cow::Owned(formatter.serialize(mapping)?)),
        }
    }
}

impl From<Frontmatter> for Metadata {
    fn from(mapping: Frontmatter) -> Self {
        Self::Parsed(mapping)
    }
}

impl From<String> for Metadata {
    fn from(text: String) -> Self {
        Self::Raw(text)
    }
}

impl From<&str> for Metadata {
    fn from(text: &str) -> Self {
        Self::Raw(text.to_string())
    }
}
