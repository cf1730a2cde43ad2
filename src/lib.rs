// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. document::DocumentStats)
    clippy::module_name_repetitions
)]

//! # Seoedit
//!
//! Keep track of SEO copy changes and hand them around as plain text.
//!
//! A document is a list of pages; each page holds named blocks, and each block
//! holds tags: a short label (`h1`, `meta`, ...) with the old and the new
//! content. Documents travel as a markdown file with one table per block, so
//! reviewers can read and edit them anywhere.
//!
//! ## Architecture
//!
//! Editing follows The Elm Architecture (TEA) pattern:
//! - **Model**: the page tree plus the current page and the tag being edited
//! - **Message**: the editing commands
//! - **Update**: pure state transitions
//!
//! ## Modules
//!
//! - [`document`]: Page/Block/Tag types and the markdown codec
//! - [`app`]: Editing state, commands and import/export
//! - [`ids`]: Identifier generation
//! - [`config`]: rc-file defaults

pub mod app;
pub mod config;
pub mod document;
pub mod ids;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model, update};
    pub use crate::document::{Block, Page, Tag, TagStatus, decode, encode};
    pub use crate::ids::{Id, IdGenerator};
}
