//! Frontmatter format: YAML metadata at the top of text files
//!
//! Reads and writes a block of YAML metadata placed ahead of a file's body,
//! delimited in a way that suits the file type:
//!
//! ```text
//! ---                 <!---               #---
//! title: Notes        title: Page         # title: Script
//! ---                 --->                #---
//! body...             <p>body</p>         print("body")
//! ```
//!
//! Detection reads only the metadata lines; the body is located by byte
//! offset and copied or read separately. All in-place mutations go through a
//! temp file and an atomic rename.

pub mod config;
pub mod error;
pub mod metadata;
pub mod raw;
pub mod read;
pub mod style;
pub mod write;

pub use config::FmfConfig;
pub use error::{Error, Result};
pub use fmf_yaml::KeySort;
pub use metadata::{Frontmatter, Metadata};
pub use raw::{RawFrontmatter, read_frontmatter_raw};
pub use read::{read, read_raw};
pub use style::{Delimiters, Style};
pub use write::{WriteOptions, insert_frontmatter, strip_frontmatter, write};
