//! Frontmatter detection without reading the body
//!
//! The file is scanned line by line from the start. Only the metadata lines
//! are kept in memory; the scan stops right after the end marker and reports
//! the byte offset where the body starts.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::style::Style;
use crate::{Error, Result};

/// Unparsed frontmatter and the location of the body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFrontmatter {
    /// Metadata text with line prefixes removed, or `None` if the file has
    /// no recognized frontmatter
    pub metadata: Option<String>,
    /// Byte offset of the first body byte; 0 without frontmatter
    pub offset: u64,
    /// Style detected from the first line
    pub style: Option<Style>,
}

impl RawFrontmatter {
    pub fn is_present(&self) -> bool {
        self.style.is_some()
    }
}

/// Read the raw frontmatter of the file at `path`.
///
/// Returns an empty [`RawFrontmatter`] (offset 0) when the first line is not
/// a known start marker, including for an empty file. Fails with
/// [`Error::Format`] when the end marker is missing.
pub fn read_frontmatter_raw(path: impl AsRef<Path>) -> Result<RawFrontmatter> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let raw = scan(BufReader::new(file), path)?;

    tracing::debug!(
        path = %path.display(),
        style = ?raw.style,
        offset = raw.offset,
        "read frontmatter"
    );
    Ok(raw)
}

/// Scan `reader` from its start. `path` is only used in error messages.
pub(crate) fn scan<R: BufRead>(mut reader: R, path: &Path) -> Result<RawFrontmatter> {
    let mut line = Vec::new();
    let mut offset = read_line(&mut reader, &mut line, path)?;

    let Some(style) = Style::detect(trim_terminator(&line)) else {
        return Ok(RawFrontmatter::default());
    };

    let end = style.end().as_bytes();
    let mut metadata = String::new();
    loop {
        line.clear();
        let read = read_line(&mut reader, &mut line, path)?;
        if read == 0 {
            break;
        }
        offset += read;

        let content = trim_terminator(&line);
        if content == end {
            return Ok(RawFrontmatter {
                metadata: Some(metadata),
                offset,
                style: Some(style),
            });
        }

        let text = std::str::from_utf8(content)
            .map_err(|e| Error::format(path, format!("Frontmatter is not valid UTF-8: {e}")))?;
        metadata.push_str(style.strip_prefix(text));
        metadata.push('\n');
    }

    Err(Error::format(
        path,
        format!("Delimiter `{end}` for end of frontmatter not found", end = style.end()),
    ))
}

fn read_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>, path: &Path) -> Result<u64> {
    let read = reader
        .read_until(b'\n', buf)
        .map_err(|e| Error::io(path, e))?;
    Ok(read as u64)
}

/// Strip a trailing `\n` or `\r\n`. Other whitespace is significant.
fn trim_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
