//! Writing, stripping, and replacing frontmatter
//!
//! Every operation writes a sibling temp file and renames it over the
//! destination. On failure the temp file is removed and the destination keeps
//! its previous content.

use std::fs::File;
use std::io::{self, BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use fmf_fs::io::{TempKind, ensure_parent};
use fmf_yaml::{FormatterOptions, KeySort, YamlFormatter};

use crate::metadata::Metadata;
use crate::raw::read_frontmatter_raw;
use crate::style::Style;
use crate::{Error, Result};

/// Options shared by the write operations.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    pub style: Style,
    pub key_sort: Option<KeySort>,
    /// Create missing parent directories (only used by [`write`])
    pub make_parents: bool,
    /// Render values plain YAML cannot carry as strings instead of failing
    pub stringify_unknown: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            style: Style::Yaml,
            key_sort: None,
            make_parents: true,
            stringify_unknown: false,
        }
    }
}

impl WriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn key_sort(mut self, key_sort: KeySort) -> Self {
        self.key_sort = Some(key_sort);
        self
    }

    pub fn make_parents(mut self, make_parents: bool) -> Self {
        self.make_parents = make_parents;
        self
    }

    pub fn stringify_unknown(mut self, enabled: bool) -> Self {
        self.stringify_unknown = enabled;
        self
    }

    pub fn formatter(&self) -> YamlFormatter {
        YamlFormatter::new(
            FormatterOptions::new()
                .key_sort(self.key_sort.clone())
                .stringify_unknown(self.stringify_unknown),
        )
    }

    /// The complete frontmatter block for `metadata` in this style.
    pub fn frontmatter_block(&self, metadata: &Metadata) -> Result<String> {
        let text = metadata.render(&self.formatter())?;
        Ok(self.style.format_block(&text))
    }
}

/// Write `body` to `path` with `metadata` as frontmatter.
///
/// No block is written when `metadata` is `None` or empty.
pub fn write(
    path: impl AsRef<Path>,
    body: &str,
    metadata: Option<&Metadata>,
    options: &WriteOptions,
) -> Result<()> {
    let path = path.as_ref();
    let block = match metadata {
        Some(metadata) if !metadata.is_empty() => Some(options.frontmatter_block(metadata)?),
        _ => None,
    };

    if options.make_parents {
        ensure_parent(path)?;
    }

    fmf_fs::write_atomic(path, TempKind::Write, |w| {
        if let Some(block) = &block {
            w.write_all(block.as_bytes())
                .map_err(|e| Error::io(path, e))?;
        }
        w.write_all(body.as_bytes()).map_err(|e| Error::io(path, e))
    })?;

    tracing::debug!(path = %path.display(), style = %options.style, frontmatter = block.is_some(), "wrote file");
    Ok(())
}

/// Remove the frontmatter from the file at `path`, keeping the body.
///
/// The metadata is not parsed. Files without frontmatter are left untouched.
pub fn strip_frontmatter(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let raw = read_frontmatter_raw(path)?;
    if raw.offset == 0 {
        return Ok(());
    }

    fmf_fs::write_atomic(path, TempKind::Strip, |w| copy_body(path, raw.offset, w))?;

    tracing::debug!(path = %path.display(), removed = raw.offset, "stripped frontmatter");
    Ok(())
}

/// Put `metadata` at the top of the file at `path`, replacing any existing
/// frontmatter and keeping the body byte for byte.
///
/// Does nothing when `metadata` is `None`.
pub fn insert_frontmatter(
    path: impl AsRef<Path>,
    metadata: Option<&Metadata>,
    options: &WriteOptions,
) -> Result<()> {
    let Some(metadata) = metadata else {
        return Ok(());
    };
    let path = path.as_ref();

    let block = options.frontmatter_block(metadata)?;
    let raw = read_frontmatter_raw(path)?;

    fmf_fs::write_atomic(path, TempKind::Insert, |w| {
        w.write_all(block.as_bytes())
            .map_err(|e| Error::io(path, e))?;
        copy_body(path, raw.offset, w)
    })?;

    tracing::debug!(
        path = %path.display(),
        style = %options.style,
        replaced = raw.is_present(),
        "inserted frontmatter"
    );
    Ok(())
}

/// Copy everything from `offset` to the end of `path` into `out`.
fn copy_body(path: &Path, offset: u64, out: &mut BufWriter<File>) -> Result<()> {
    let mut source = File::open(path).map_err(|e| Error::io(path, e))?;
    source
        .seek(SeekFrom::Start(offset))
        .map_err(|e| Error::io(path, e))?;
    io::copy(&mut source, out).map_err(|e| Error::io(path, e))?;
    Ok(())
}
