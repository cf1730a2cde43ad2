//! Markdown import.
//!
//! A line scanner with three states. Headings are recognised in any state;
//! table lines only count when they follow a recognised header and separator.
//! Nothing here can fail: lines that do not fit are skipped.

use std::sync::LazyLock;

use regex::Regex;

use super::format::{
    header_labels, is_header_separator, is_separator, is_table_line, split_cells, unescape_cell,
};
use super::types::{Block, Page, Tag};
use crate::ids::{IdGenerator, UuidIds};

static PAGE_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^##\s+Page:\s?(.*)$").expect("page heading pattern is valid")
});

static BLOCK_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^###\s+Block\s+(\d+)\s*:\s?(.*)$").expect("block heading pattern is valid")
});

/// Where the scanner is relative to a tag table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Scanning,
    HeaderSeen,
    InRows,
}

/// Decode markdown text into pages, generating fresh UUIDs.
///
/// Always returns at least one page.
pub fn decode(text: &str) -> Vec<Page> {
    decode_with(text, &mut UuidIds)
}

/// Decode markdown text into pages using the given id source.
pub fn decode_with(text: &str, ids: &mut impl IdGenerator) -> Vec<Page> {
    let mut scanner = Scanner::new(ids);
    for (index, line) in text.lines().enumerate() {
        scanner.feed(index + 1, line);
    }
    scanner.finish()
}

struct Scanner<'a, G: IdGenerator> {
    ids: &'a mut G,
    pages: Vec<Page>,
    state: ScanState,
    /// Whether a block heading has been seen since the last page heading
    has_block: bool,
    skipped_rows: usize,
}

impl<'a, G: IdGenerator> Scanner<'a, G> {
    fn new(ids: &'a mut G) -> Self {
        Self {
            ids,
            pages: Vec::new(),
            state: ScanState::Scanning,
            has_block: false,
            skipped_rows: 0,
        }
    }

    fn feed(&mut self, line_no: usize, line: &str) {
        let line = line.trim_end();

        if let Some(caps) = PAGE_HEADING.captures(line) {
            let name = caps.get(1).map_or("", |m| m.as_str()).trim();
            self.open_page(name);
            return;
        }
        if let Some(caps) = BLOCK_HEADING.captures(line) {
            let name = caps.get(2).map_or("", |m| m.as_str()).trim();
            self.open_block(name);
            return;
        }

        match self.state {
            ScanState::Scanning => {
                if self.has_block && header_labels(line).is_some() {
                    self.state = ScanState::HeaderSeen;
                } else if !line.trim().is_empty() {
                    tracing::trace!(line = line_no, "ignoring line outside a table");
                }
            }
            ScanState::HeaderSeen => {
                self.state = if is_header_separator(line) {
                    ScanState::InRows
                } else {
                    tracing::debug!(line = line_no, "table header without separator");
                    ScanState::Scanning
                };
            }
            ScanState::InRows => {
                if is_separator(line) {
                    return;
                }
                if !is_table_line(line) {
                    self.state = ScanState::Scanning;
                    return;
                }
                if header_labels(line).is_some() {
                    self.state = ScanState::HeaderSeen;
                    return;
                }
                self.push_row(line_no, line);
            }
        }
    }

    fn open_page(&mut self, name: &str) {
        let page = Page::new(self.ids.next_id(), name);
        self.pages.push(page);
        self.has_block = false;
        self.state = ScanState::Scanning;
    }

    fn open_block(&mut self, name: &str) {
        let block = Block::new(self.ids.next_id(), name);
        if self.pages.is_empty() {
            let page = Page::default_page(&mut *self.ids);
            self.pages.push(page);
        }
        if let Some(page) = self.pages.last_mut() {
            page.blocks.push(block);
        }
        self.has_block = true;
        self.state = ScanState::Scanning;
    }

    /// Extra cells past the third are dropped.
    fn push_row(&mut self, line_no: usize, line: &str) {
        let cells = split_cells(line);
        let [kind, old, new, ..] = cells.as_slice() else {
            tracing::debug!(
                line = line_no,
                cells = cells.len(),
                "skipping row with fewer than three cells"
            );
            self.skipped_rows += 1;
            return;
        };
        if cells.len() > 3 {
            tracing::debug!(line = line_no, cells = cells.len(), "truncating extra cells");
        }
        let tag = Tag::new(
            self.ids.next_id(),
            unescape_cell(kind),
            unescape_cell(old),
            unescape_cell(new),
        );
        if let Some(block) = self.pages.last_mut().and_then(|p| p.blocks.last_mut()) {
            block.tags.push(tag);
        }
    }

    fn finish(mut self) -> Vec<Page> {
        if self.pages.is_empty() {
            tracing::debug!("no page heading found, using a default page");
            self.pages.push(Page::default_page(&mut *self.ids));
        }
        tracing::debug!(
            pages = self.pages.len(),
            skipped_rows = self.skipped_rows,
            "decoded document"
        );
        self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::types::DEFAULT_PAGE_NAME;
    use crate::ids::{Id, SequentialIds};

    fn parse(text: &str) -> Vec<Page> {
        decode_with(text, &mut SequentialIds::default())
    }

    const SCENARIO: &str = "\
## Page: 首頁
### Block 1: Title
| 標籤類型 | 原始內容 | 更新內容 |
| --- | --- | --- |
| h1 | Old Title | New Title |
";

    #[test]
    fn test_decode_scenario() {
        let pages = parse(SCENARIO);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].name, "首頁");
        assert_eq!(pages[0].blocks.len(), 1);
        let block = &pages[0].blocks[0];
        assert_eq!(block.name, "Title");
        assert_eq!(block.tags.len(), 1);
        assert_eq!(block.tags[0].kind, "h1");
        assert_eq!(block.tags[0].old_content, "Old Title");
        assert_eq!(block.tags[0].new_content, "New Title");
    }

    #[test]
    fn test_decode_empty_text_gives_one_default_page() {
        let pages = parse("");
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].name, DEFAULT_PAGE_NAME);
        assert!(pages[0].blocks.is_empty());
    }

    #[test]
    fn test_decode_garbage_gives_one_default_page() {
        let pages = parse("hello\n| a | b | c |\n---\n## Not a page\n");
        assert_eq!(pages.len(), 1);
        assert!(pages[0].blocks.is_empty());
    }

    #[test]
    fn test_block_before_any_page_creates_default_page() {
        let pages = parse("### Block 1: Hero\n");
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].name, DEFAULT_PAGE_NAME);
        assert_eq!(pages[0].blocks[0].name, "Hero");
    }

    #[test]
    fn test_placeholder_maps_to_empty() {
        let text = format!("{SCENARIO}| meta | - | Fresh |\n");
        let pages = parse(&text);
        let tag = &pages[0].blocks[0].tags[1];
        assert_eq!(tag.old_content, "");
        assert_eq!(tag.new_content, "Fresh");
    }

    #[test]
    fn test_all_placeholder_row_is_a_pending_tag() {
        let text = format!("{SCENARIO}| - | - | - |\n");
        let pages = parse(&text);
        let tag = &pages[0].blocks[0].tags[1];
        assert_eq!(tag, &Tag::empty(tag.id.clone()));
    }

    #[test]
    fn test_extra_cells_are_truncated() {
        let text = format!("{SCENARIO}| p | a | b | c | d |\n");
        let pages = parse(&text);
        let tag = &pages[0].blocks[0].tags[1];
        assert_eq!((tag.kind.as_str(), tag.old_content.as_str()), ("p", "a"));
        assert_eq!(tag.new_content, "b");
    }

    #[test]
    fn test_short_rows_are_skipped() {
        let text = format!("{SCENARIO}| p | only |\n| title | x | y |\n");
        let pages = parse(&text);
        let kinds: Vec<_> = pages[0].blocks[0].tags.iter().map(|t| t.kind.as_str()).collect();
        assert_eq!(kinds, vec!["h1", "title"]);
    }

    #[test]
    fn test_rows_without_header_are_ignored() {
        let text = "## Page: A\n### Block 1: B\n| h1 | x | y |\n";
        let pages = parse(text);
        assert!(pages[0].blocks[0].tags.is_empty());
    }

    #[test]
    fn test_header_without_separator_is_ignored() {
        let text = "## Page: A\n### Block 1: B\n| 標籤類型 | 原始內容 | 更新內容 |\n| h1 | x | y |\n";
        let pages = parse(text);
        assert!(pages[0].blocks[0].tags.is_empty());
    }

    #[test]
    fn test_short_separator_under_header() {
        for rule in ["|-|-|-|", "|:-:|--|--|"] {
            let text = format!(
                "## Page: A\n### Block 1: B\n| Type | Original Content | Updated Content |\n{rule}\n| h1 | x | y |\n"
            );
            let pages = parse(&text);
            assert_eq!(pages[0].blocks[0].tags.len(), 1, "rule {rule}");
            assert_eq!(pages[0].blocks[0].tags[0].kind, "h1");
        }
    }

    #[test]
    fn test_second_header_in_block_starts_new_table() {
        let text = format!(
            "{SCENARIO}| Type | Original Content | Updated Content |\n|-|-|-|\n| h2 | z | w |\n"
        );
        let pages = parse(&text);
        let kinds: Vec<_> = pages[0].blocks[0].tags.iter().map(|t| t.kind.as_str()).collect();
        assert_eq!(kinds, vec!["h1", "h2"]);
    }

    #[test]
    fn test_non_table_line_ends_rows() {
        let text = format!("{SCENARIO}\n| h2 | stray | row |\n");
        let pages = parse(&text);
        assert_eq!(pages[0].blocks[0].tags.len(), 1);
    }

    #[test]
    fn test_header_before_any_block_is_ignored() {
        let text = "## Page: A\n| Type | Original Content | Updated Content |\n| --- | --- | --- |\n| h1 | x | y |\n### Block 1: B\n";
        let pages = parse(text);
        assert_eq!(pages[0].blocks.len(), 1);
        assert!(pages[0].blocks[0].tags.is_empty());
    }

    #[test]
    fn test_page_heading_resets_block_context() {
        let text = "## Page: A\n### Block 1: B\n## Page: C\n| Type | Original Content | Updated Content |\n| --- | --- | --- |\n| h1 | x | y |\n";
        let pages = parse(text);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].blocks[0].tags.len(), 0);
        assert!(pages[1].blocks.is_empty());
    }

    #[test]
    fn test_block_index_is_ignored_for_ordering() {
        let text = "## Page: A\n### Block 7: First\n### Block 2: Second\n";
        let names: Vec<_> = parse(text)[0].blocks.iter().map(|b| b.name.clone()).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn test_title_and_blank_lines_are_ignored() {
        let text = "# SEO 內容變更\n\n\n\n## Page: A\n\n\n### Block 1: B\n";
        let pages = parse(text);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].blocks[0].name, "B");
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = SCENARIO.replace('\n', "\r\n");
        let pages = parse(&text);
        assert_eq!(pages[0].blocks[0].tags[0].new_content, "New Title");
    }

    #[test]
    fn test_empty_page_name() {
        let pages = parse("## Page: \n## Page:\n");
        assert_eq!(pages.len(), 2);
        assert!(pages.iter().all(|p| p.name.is_empty()));
    }

    #[test]
    fn test_ids_come_from_generator() {
        let pages = decode_with(SCENARIO, &mut SequentialIds::new("x"));
        assert_eq!(pages[0].id, Id::new("x-1"));
        assert_eq!(pages[0].blocks[0].id, Id::new("x-2"));
        assert_eq!(pages[0].blocks[0].tags[0].id, Id::new("x-3"));
    }
}
