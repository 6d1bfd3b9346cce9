//! Shared test utilities for the frontmatter-format workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only and is never published.
//!
//! # Modules
//!
//! - [`dir`]: [`TestDir`] fixture for temp-directory file scenarios
//! - [`logging`]: idempotent tracing subscriber for test runs

pub mod dir;
pub mod logging;

pub use dir::TestDir;
pub use logging::init_tracing;
