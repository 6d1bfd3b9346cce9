//! Configurable YAML formatter
//!
//! Rendering behaviour is a pure function of [`FormatterOptions`]; nothing is
//! registered globally, so two formatters with different options never
//! interfere with each other.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_yaml::value::TaggedValue;
use serde_yaml::{Mapping, Value};

use fmf_fs::io::TempKind;

use crate::{Error, Result};

type KeyCompare = dyn Fn(&str, &str) -> Ordering + Send + Sync;
type ValuePredicate = dyn Fn(&Value) -> bool + Send + Sync;

/// Ordering applied to mapping keys at serialization time.
#[derive(Clone)]
pub struct KeySort(Arc<KeyCompare>);

impl KeySort {
    /// Order keys with an arbitrary comparator.
    ///
    /// The comparator must be a total order; keys comparing equal keep their
    /// original relative order.
    pub fn by<F>(compare: F) -> Self
    where
        F: Fn(&str, &str) -> Ordering + Send + Sync + 'static,
    {
        Self(Arc::new(compare))
    }

    /// Plain lexicographic key order.
    pub fn alphabetical() -> Self {
        Self::by(|a, b| a.cmp(b))
    }

    /// Listed keys first, in list order; all other keys after them in their
    /// original order.
    pub fn priority<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut rank: HashMap<String, usize> = HashMap::new();
        for (i, key) in keys.into_iter().enumerate() {
            rank.entry(key.into()).or_insert(i);
        }
        Self::by(move |a, b| {
            let ra = rank.get(a).copied().unwrap_or(usize::MAX);
            let rb = rank.get(b).copied().unwrap_or(usize::MAX);
            ra.cmp(&rb)
        })
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        (self.0)(a, b)
    }

    fn sort(&self, mapping: Mapping) -> Mapping {
        let mut entries: Vec<(Value, Value)> = mapping.into_iter().collect();
        entries.sort_by(|(a, _), (b, _)| self.compare(&key_text(a), &key_text(b)));
        entries.into_iter().collect()
    }
}

impl fmt::Debug for KeySort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KeySort(..)")
    }
}

/// Predicate deciding which mapping entries are left out of the output.
#[derive(Clone)]
pub struct Suppress(Arc<ValuePredicate>);

impl Suppress {
    pub fn by<F>(predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(predicate))
    }

    /// Drop entries whose value is null or an empty mapping.
    pub fn null_or_empty_mapping() -> Self {
        Self::by(|v| match v {
            Value::Null => true,
            Value::Mapping(m) => m.is_empty(),
            _ => false,
        })
    }

    /// Keep every entry.
    pub fn never() -> Self {
        Self::by(|_| false)
    }

    pub fn matches(&self, value: &Value) -> bool {
        (self.0)(value)
    }
}

impl Default for Suppress {
    fn default() -> Self {
        Self::null_or_empty_mapping()
    }
}

impl fmt::Debug for Suppress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Suppress(..)")
    }
}

/// Options for a [`YamlFormatter`].
#[derive(Debug, Clone, Default)]
pub struct FormatterOptions {
    /// Key order for every mapping; `None` keeps insertion order.
    pub key_sort: Option<KeySort>,
    /// Entries to leave out of every mapping.
    pub suppress: Suppress,
    /// Render tagged values as plain strings instead of failing.
    pub stringify_unknown: bool,
}

impl FormatterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_sort(mut self, key_sort: Option<KeySort>) -> Self {
        self.key_sort = key_sort;
        self
    }

    pub fn suppress(mut self, suppress: Suppress) -> Self {
        self.suppress = suppress;
        self
    }

    pub fn stringify_unknown(mut self, enabled: bool) -> Self {
        self.stringify_unknown = enabled;
        self
    }
}

/// A YAML serializer configured once and reused across calls.
///
/// Output is always block style. Strings containing a newline come out as
/// literal block scalars (`|`), which `serde_yaml` does for any multi-line
/// string.
#[derive(Debug, Clone, Default)]
pub struct YamlFormatter {
    options: FormatterOptions,
}

impl YamlFormatter {
    pub fn new(options: FormatterOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FormatterOptions {
        &self.options
    }

    /// Convert `value` to a YAML tree with the rendering rules applied.
    pub fn render<T: Serialize + ?Sized>(&self, value: &T) -> Result<Value> {
        let value = serde_yaml::to_value(value).map_err(Error::Serialize)?;
        self.prepare(value)
    }

    fn prepare(&self, value: Value) -> Result<Value> {
        match value {
            Value::Mapping(mapping) => {
                let mut out = Mapping::with_capacity(mapping.len());
                for (key, val) in mapping {
                    if self.options.suppress.matches(&val) {
                        continue;
                    }
                    out.insert(key, self.prepare(val)?);
                }
                Ok(match &self.options.key_sort {
                    Some(sort) => Value::Mapping(sort.sort(out)),
                    None => Value::Mapping(out),
                })
            }
            Value::Sequence(items) => items
                .into_iter()
                .map(|item| self.prepare(item))
                .collect::<Result<Vec<_>>>()
                .map(Value::Sequence),
            Value::Tagged(tagged) => self.unknown(*tagged),
            other => Ok(other),
        }
    }

    fn unknown(&self, tagged: TaggedValue) -> Result<Value> {
        if !self.options.stringify_unknown {
            return Err(Error::Unrepresentable {
                tag: tagged.tag.to_string(),
            });
        }
        let text = serde_yaml::to_string(&Value::Tagged(Box::new(tagged)))
            .map_err(Error::Serialize)?;
        Ok(Value::String(text.trim_end().to_string()))
    }

    /// Serialize `value` to a YAML string.
    pub fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let value = self.render(value)?;
        // An empty top-level mapping would otherwise come out as flow `{}`.
        if matches!(&value, Value::Mapping(m) if m.is_empty()) {
            return Ok(String::new());
        }
        serde_yaml::to_string(&value).map_err(Error::Serialize)
    }

    /// Serialize `value` into `writer`.
    pub fn serialize_to_writer<T, W>(&self, value: &T, writer: W) -> Result<()>
    where
        T: Serialize + ?Sized,
        W: Write,
    {
        let value = self.render(value)?;
        serde_yaml::to_writer(writer, &value).map_err(Error::Serialize)
    }

    /// Serialize `value` to `path`, replacing the file atomically.
    pub fn serialize_to_file<T: Serialize + ?Sized>(&self, value: &T, path: &Path) -> Result<()> {
        let value = self.render(value)?;
        fmf_fs::write_atomic(path, TempKind::Yaml, |w| {
            serde_yaml::to_writer(w, &value).map_err(Error::Serialize)
        })
    }

    /// Parse a YAML string.
    pub fn deserialize<T: DeserializeOwned>(&self, text: &str) -> Result<T> {
        serde_yaml::from_str(text).map_err(Error::Parse)
    }

    /// Parse a YAML file.
    pub fn deserialize_from_file<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let file = File::open(path).map_err(|e| fmf_fs::Error::io(path, e))?;
        serde_yaml::from_reader(BufReader::new(file)).map_err(Error::Parse)
    }
}

/// Text used to order a key. Non-scalar keys sort as the empty string.
fn key_text(key: &Value) -> Cow<'_, str> {
    match key {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Number(n) => Cow::Owned(n.to_string()),
        Value::Bool(b) => Cow::Owned(b.to_string()),
        _ => Cow::Borrowed(""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_yaml::value::Tag;

    fn keys(value: &Value) -> Vec<String> {
        value
            .as_mapping()
            .unwrap()
            .keys()
            .map(|k| k.as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn priority_sort_keeps_other_keys_in_original_order() {
        let sort = KeySort::priority(["k1", "k2"]);
        let mut mapping = Mapping::new();
        for key in ["z", "k2", "a", "k1", "m"] {
            mapping.insert(key.into(), 1.into());
        }

        let sorted = sort.sort(mapping);

        let order: Vec<_> = sorted.keys().map(|k| k.as_str().unwrap()).collect();
        assert_eq!(order, vec!["k1", "k2", "z", "a", "m"]);
    }

    #[test]
    fn priority_sort_first_occurrence_wins() {
        let sort = KeySort::priority(["b", "a", "b"]);
        assert_eq!(sort.compare("b", "a"), Ordering::Less);
    }

    #[test]
    fn default_suppress_drops_null_and_empty_mapping() {
        let suppress = Suppress::default();
        assert!(suppress.matches(&Value::Null));
        assert!(suppress.matches(&Value::Mapping(Mapping::new())));
        assert!(!suppress.matches(&Value::Sequence(vec![])));
        assert!(!suppress.matches(&Value::String(String::new())));
    }

    #[test]
    fn prepare_applies_rules_to_nested_mappings() {
        let formatter = YamlFormatter::new(
            FormatterOptions::new().key_sort(Some(KeySort::alphabetical())),
        );
        let value: Value =
            serde_yaml::from_str("b: 1\na:\n  y: ~\n  x: 2\nc: {}\n").unwrap();

        let prepared = formatter.prepare(value).unwrap();

        assert_eq!(keys(&prepared), vec!["a", "b"]);
        assert_eq!(keys(&prepared["a"]), vec!["x"]);
    }

    #[test]
    fn tagged_value_fails_by_default() {
        let tagged = Value::Tagged(Box::new(TaggedValue {
            tag: Tag::new("Color"),
            value: Value::String("red".into()),
        }));

        let err = YamlFormatter::default().prepare(tagged).unwrap_err();

        assert!(matches!(err, Error::Unrepresentable { ref tag } if tag.contains("Color")));
    }

    #[test]
    fn tagged_value_is_stringified_when_enabled() {
        let formatter = YamlFormatter::new(FormatterOptions::new().stringify_unknown(true));
        let tagged = Value::Tagged(Box::new(TaggedValue {
            tag: Tag::new("Color"),
            value: Value::String("red".into()),
        }));

        let value = formatter.prepare(tagged).unwrap();

        let text = value.as_str().unwrap();
        assert!(text.contains("Color"), "unexpected text {text:?}");
        assert!(text.contains("red"), "unexpected text {text:?}");
    }

    #[test]
    fn fully_suppressed_mapping_serializes_to_nothing() {
        let value: Value = serde_yaml::from_str("gone: ~\nalso: {}\n").unwrap();
        assert_eq!(YamlFormatter::default().serialize(&value).unwrap(), "");
    }
}
