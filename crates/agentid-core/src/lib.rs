//! agentid Core
//!
//! Core types shared across agentid components.
//!
//! This crate provides:
//! - The structured section/entry model produced by the rule-file parser
//! - Error types and result handling
//! - Helpers for pattern sources as they appear in the rule file

pub mod error;
pub mod section;

pub use error::{BuildError, Error, Result};
pub use section::{strip_pattern_delimiters, Entry, Section, SectionKind};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{BuildError, Error, Result};
    pub use crate::section::{Entry, Section, SectionKind};
}
