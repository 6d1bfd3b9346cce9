//! Frontmatter delimiter styles

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Markers and line prefixes that make up one style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters {
    /// First line of the block, matched exactly
    pub start: &'static str,
    /// Last line of the block, matched exactly
    pub end: &'static str,
    /// Prepended to each metadata line on write
    pub prefix: &'static str,
    /// Removed from metadata lines on read; first match wins
    pub strip_prefixes: &'static [&'static str],
}

/// How frontmatter is demarcated in a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    /// Jekyll-style `---` for Markdown
    #[default]
    Yaml,
    /// `<!---` / `--->` for HTML
    Html,
    /// `#---` with `# ` prefixed lines for Python, shell, and similar
    Hash,
    /// `//---` with `// ` prefixed lines for C-family and JavaScript
    Slash,
    /// `/*---` / `---*/` for CSS and C block comments
    SlashStar,
    /// `----` with `-- ` prefixed lines for SQL and Lua
    Dash,
}

impl Style {
    /// Every style, in declaration order.
    pub const ALL: [Style; 6] = [
        Self::Yaml,
        Self::Html,
        Self::Hash,
        Self::Slash,
        Self::SlashStar,
        Self::Dash,
    ];

    /// Styles recognized when reading, in detection priority order.
    ///
    /// The remaining styles can be written but are not detected on read.
    pub const DETECTED: [Style; 3] = [Self::Yaml, Self::Html, Self::Hash];

    pub const fn delimiters(self) -> Delimiters {
        match self {
            Self::Yaml => Delimiters {
                start: "---",
                end: "---",
                prefix: "",
                strip_prefixes: &[],
            },
            Self::Html => Delimiters {
                start: "<!---",
                end: "--->",
                prefix: "",
                strip_prefixes: &[],
            },
            Self::Hash => Delimiters {
                start: "#---",
                end: "#---",
                prefix: "# ",
                strip_prefixes: &["# ", "#"],
            },
            Self::Slash => Delimiters {
                start: "//---",
                end: "//---",
                prefix: "// ",
                strip_prefixes: &["// ", "//"],
            },
            Self::SlashStar => Delimiters {
                start: "/*---",
                end: "---*/",
                prefix: "",
                strip_prefixes: &[],
            },
            Self::Dash => Delimiters {
                start: "----",
                end: "----",
                prefix: "-- ",
                strip_prefixes: &["-- ", "--"],
            },
        }
    }

    pub const fn start(self) -> &'static str {
        self.delimiters().start
    }

    pub const fn end(self) -> &'static str {
        self.delimiters().end
    }

    pub const fn prefix(self) -> &'static str {
        self.delimiters().prefix
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Html => "html",
            Self::Hash => "hash",
            Self::Slash => "slash",
            Self::SlashStar => "slash_star",
            Self::Dash => "dash",
        }
    }

    /// Detect the style whose start marker is exactly `first_line`.
    pub fn detect(first_line: &[u8]) -> Option<Self> {
        Self::DETECTED
            .into_iter()
            .find(|style| style.start().as_bytes() == first_line)
    }

    /// Remove the first matching legacy prefix from `line`.
    ///
    /// Lines without any known prefix are returned unchanged.
    pub fn strip_prefix(self, line: &str) -> &str {
        self.delimiters()
            .strip_prefixes
            .iter()
            .find_map(|prefix| line.strip_prefix(prefix))
            .unwrap_or(line)
    }

    /// Build the full frontmatter block for already-serialized metadata text:
    /// start line, each metadata line with the prefix, end line.
    pub fn format_block(self, metadata: &str) -> String {
        let Delimiters {
            start, end, prefix, ..
        } = self.delimiters();

        let mut block = String::with_capacity(start.len() + end.len() + metadata.len() + 2);
        block.push_str(start);
        block.push('\n');
        for line in metadata.lines() {
            block.push_str(prefix);
            block.push_str(line);
            block.push('\n');
        }
        block.push_str(end);
        block.push('\n');
        block
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognized style name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown frontmatter style: {0}")]
pub struct UnknownStyle(pub String);

impl FromStr for Style {
    type Err = UnknownStyle;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|style| style.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownStyle(s.to_string()))
    }
}
