//! Markdown export.

use std::fmt::Write as _;

use super::format::{
    BLOCK_PREFIX, ColumnLabels, DEFAULT_TITLE, PAGE_PREFIX, escape_cell, header_labels,
    heading_text,
};
use super::types::{Block, Page, Tag};

/// Options for [`encode_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Leading `# ` title line; `None` omits it
    pub title: Option<String>,
    /// Column header labels
    pub labels: ColumnLabels,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            title: Some(DEFAULT_TITLE.to_string()),
            labels: ColumnLabels::default(),
        }
    }
}

/// Encode pages into the markdown interchange format.
///
/// # Example
///
/// ```
/// use seoedit::document::{Page, decode_with, encode};
/// use seoedit::ids::{Id, SequentialIds};
///
/// let text = encode(&[Page::new(Id::new("p"), "Home")]);
/// assert!(text.contains("## Page: Home"));
///
/// let pages = decode_with(&text, &mut SequentialIds::default());
/// assert_eq!(pages[0].name, "Home");
/// ```
pub fn encode(pages: &[Page]) -> String {
    encode_with(pages, &EncodeOptions::default())
}

/// Encode pages with explicit title and column labels.
pub fn encode_with(pages: &[Page], options: &EncodeOptions) -> String {
    let mut out = String::new();
    if let Some(title) = &options.title {
        let _ = writeln!(out, "# {}", heading_text(title));
        out.push('\n');
    }
    for page in pages {
        write_page(&mut out, page, options.labels);
    }
    tracing::debug!(pages = pages.len(), bytes = out.len(), "encoded document");
    out
}

fn write_page(out: &mut String, page: &Page, labels: ColumnLabels) {
    let _ = writeln!(out, "{PAGE_PREFIX}{}", heading_text(&page.name));
    out.push('\n');
    for (index, block) in page.blocks.iter().enumerate() {
        write_block(out, index + 1, block, labels);
    }
}

fn write_block(out: &mut String, number: usize, block: &Block, labels: ColumnLabels) {
    let _ = writeln!(out, "{BLOCK_PREFIX}{number}: {}", heading_text(&block.name));
    out.push('\n');
    if block.tags.is_empty() {
        return;
    }
    let [kind, old, new] = labels.labels();
    let _ = writeln!(out, "| {kind} | {old} | {new} |");
    out.push_str("| --- | --- | --- |\n");
    for tag in &block.tags {
        write_row(out, tag);
    }
    out.push('\n');
}

/// A row that would read back as a header gets its first cell escaped.
fn write_row(out: &mut String, tag: &Tag) {
    let kind = escape_cell(&tag.kind);
    let old = escape_cell(&tag.old_content);
    let new = escape_cell(&tag.new_content);
    let mut row = format!("| {kind} | {old} | {new} |");
    if header_labels(&row).is_some() {
        row = format!("| \\{kind} | {old} | {new} |");
    }
    out.push_str(&row);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::Id;

    fn sample() -> Vec<Page> {
        let mut block = Block::new(Id::new("b1"), "Title");
        block
            .tags
            .push(Tag::new(Id::new("t1"), "h1", "Old Title", "New Title"));
        block.tags.push(Tag::new(Id::new("t2"), "meta", "", "Fresh"));
        let mut page = Page::new(Id::new("p1"), "首頁");
        page.blocks.push(block);
        page.blocks.push(Block::new(Id::new("b2"), "Footer"));
        vec![page]
    }

    #[test]
    fn test_encode_full_layout() {
        let text = encode(&sample());
        let expected = "\
# SEO 內容變更

## Page: 首頁

### Block 1: Title

| 標籤類型 | 原始內容 | 更新內容 |
| --- | --- | --- |
| h1 | Old Title | New Title |
| meta | - | Fresh |

### Block 2: Footer

";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_encode_empty_page_list_is_title_only() {
        assert_eq!(encode(&[]), "# SEO 內容變更\n\n");
    }

    #[test]
    fn test_encode_page_without_blocks_keeps_heading() {
        let text = encode(&[Page::new(Id::new("p"), "Empty")]);
        assert!(text.contains("## Page: Empty\n"));
        assert!(!text.contains('|'));
    }

    #[test]
    fn test_encode_block_numbers_restart_per_page() {
        let mut pages = sample();
        let mut second = Page::new(Id::new("p2"), "About");
        second.blocks.push(Block::new(Id::new("b3"), "Intro"));
        pages.push(second);
        let text = encode(&pages);
        assert!(text.contains("### Block 1: Intro"));
    }

    #[test]
    fn test_encode_with_english_labels_and_no_title() {
        let options = EncodeOptions {
            title: None,
            labels: ColumnLabels::En,
        };
        let text = encode_with(&sample(), &options);
        assert!(text.starts_with("## Page: 首頁"));
        assert!(text.contains("| Type | Original Content | Updated Content |"));
    }

    #[test]
    fn test_tag_spelling_out_header_labels_survives() {
        let mut block = Block::new(Id::new("b"), "B");
        block.tags.push(Tag::new(
            Id::new("t"),
            "Type",
            "Original Content",
            "Updated Content",
        ));
        let mut page = Page::new(Id::new("p"), "P");
        page.blocks.push(block);
        let text = encode(&[page]);
        assert!(text.contains("| \\Type | Original Content | Updated Content |"));

        let decoded = crate::document::decode(&text);
        let tag = &decoded[0].blocks[0].tags[0];
        assert_eq!(tag.kind, "Type");
        assert_eq!(tag.old_content, "Original Content");
        assert_eq!(tag.new_content, "Updated Content");
    }

    #[test]
    fn test_encode_multiline_names_stay_on_heading_line() {
        let text = encode(&[Page::new(Id::new("p"), "Landing\npage")]);
        assert!(text.contains("## Page: Landing page\n"));
    }
}
