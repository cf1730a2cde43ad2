//! SEO change documents and their markdown interchange format.
//!
//! This module handles:
//! - The Page → Block → Tag tree ([`Page`], [`Block`], [`Tag`])
//! - Encoding that tree as a markdown table document ([`encode`])
//! - Decoding such a document back into a tree ([`decode`])

mod format;
mod parser;
mod types;
mod writer;

pub use format::{ColumnLabels, DEFAULT_TITLE, EMPTY_CELL};
pub use parser::{decode, decode_with};
pub use types::{
    Block, BlockPatch, DEFAULT_PAGE_NAME, DocumentStats, NEW_BLOCK_NAME, NEW_PAGE_NAME, Page,
    PagePatch, Tag, TagPatch, TagStatus,
};
pub use writer::{EncodeOptions, encode, encode_with};
