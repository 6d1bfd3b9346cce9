//! Filesystem helpers for frontmatter-format
//!
//! Provides atomic temp-file-plus-rename replacement and format-agnostic
//! config loading.

pub mod config;
pub mod error;
pub mod io;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use io::{TempKind, write_atomic};
