//! Line format shared by the encoder and the decoder.
//!
//! ```text
//! # SEO 內容變更
//!
//! ## Page: 首頁
//!
//! ### Block 1: Title
//!
//! | 標籤類型 | 原始內容 | 更新內容 |
//! | --- | --- | --- |
//! | h1 | Old Title | New Title |
//! ```

use serde::{Deserialize, Serialize};

pub const PAGE_PREFIX: &str = "## Page: ";
pub const BLOCK_PREFIX: &str = "### Block ";
pub const DEFAULT_TITLE: &str = "SEO 內容變更";

/// Stands in for an empty cell.
pub const EMPTY_CELL: &str = "-";
const LINE_BREAK: &str = "<br>";

/// Minimum run of dashes for a cell to count as a separator cell.
const SEPARATOR_MIN_DASHES: usize = 3;

/// Column header label sets.
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnLabels {
    #[default]
    Zh,
    En,
}

impl ColumnLabels {
    pub const ALL: [Self; 2] = [Self::Zh, Self::En];

    pub const fn labels(self) -> [&'static str; 3] {
        match self {
            Self::Zh => ["標籤類型", "原始內容", "更新內容"],
            Self::En => ["Type", "Original Content", "Updated Content"],
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Zh => "zh",
            Self::En => "en",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "zh" => Some(Self::Zh),
            "en" => Some(Self::En),
            _ => None,
        }
    }
}

/// Render a field as table cell text.
///
/// Empty (or whitespace-only) content becomes the placeholder. Pipes,
/// backslashes and literal `<br>` are escaped and line breaks become `<br>`,
/// so a cell always stays on one line. Content made only of dashes and
/// colons gets a leading backslash so it is never read back as the
/// placeholder or as a separator cell.
pub fn escape_cell(content: &str) -> String {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return EMPTY_CELL.to_string();
    }
    if trimmed.chars().all(|c| c == '-' || c == ':') {
        return format!("\\{trimmed}");
    }
    let mut out = String::with_capacity(trimmed.len());
    let mut rest = trimmed;
    while let Some(ch) = rest.chars().next() {
        if rest.starts_with(LINE_BREAK) {
            out.push('\\');
            out.push_str(LINE_BREAK);
            rest = &rest[LINE_BREAK.len()..];
            continue;
        }
        if rest.starts_with("\r\n") {
            out.push_str(LINE_BREAK);
            rest = &rest[2..];
            continue;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '|' => out.push_str("\\|"),
            '\n' | '\r' => out.push_str(LINE_BREAK),
            _ => out.push(ch),
        }
        rest = &rest[ch.len_utf8()..];
    }
    out
}

/// Inverse of [`escape_cell`] for a trimmed, non-empty cell.
pub fn unescape_cell(cell: &str) -> String {
    if cell == EMPTY_CELL {
        return String::new();
    }
    let mut out = String::with_capacity(cell.len());
    let mut rest = cell;
    while let Some(ch) = rest.chars().next() {
        if rest.starts_with(LINE_BREAK) {
            out.push('\n');
            rest = &rest[LINE_BREAK.len()..];
            continue;
        }
        rest = &rest[ch.len_utf8()..];
        if ch == '\\' {
            if let Some(next) = rest.chars().next() {
                if rest.starts_with(LINE_BREAK) {
                    out.push_str(LINE_BREAK);
                    rest = &rest[LINE_BREAK.len()..];
                } else {
                    out.push(next);
                    rest = &rest[next.len_utf8()..];
                }
                continue;
            }
        }
        out.push(ch);
    }
    out
}

/// Single-line form of a page or block name.
pub fn heading_text(name: &str) -> String {
    name.split(['\r', '\n'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether the line looks like a pipe table line at all.
pub fn is_table_line(line: &str) -> bool {
    line.trim_start().starts_with('|')
}

/// Split a table line on unescaped pipes.
///
/// Returns the trimmed cells with empty fragments removed; escapes are kept
/// so [`unescape_cell`] can resolve them.
pub fn split_cells(line: &str) -> Vec<&str> {
    let line = line.trim();
    let mut cells = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (i, ch) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '|' => {
                cells.push(&line[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    cells.push(&line[start..]);
    cells
        .into_iter()
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .collect()
}

/// A separator row: every cell is a run of dashes, optionally with alignment
/// colons.
///
/// Among data rows a separator needs runs of at least three dashes, so a
/// `| - | - | - |` placeholder row stays a row.
pub fn is_separator(line: &str) -> bool {
    is_dash_row(line, SEPARATOR_MIN_DASHES)
}

/// The separator directly under a header, where any dash run counts
/// (`|-|-|-|`, `|:-:|--|--|`).
pub fn is_header_separator(line: &str) -> bool {
    is_dash_row(line, 1)
}

fn is_dash_row(line: &str, min_dashes: usize) -> bool {
    if !is_table_line(line) {
        return false;
    }
    let cells = split_cells(line);
    !cells.is_empty()
        && cells.iter().all(|cell| {
            let dashes = cell.trim_start_matches(':').trim_end_matches(':');
            dashes.len() >= min_dashes && dashes.chars().all(|c| c == '-')
        })
}

/// The label set a header row uses, if it carries all three labels in order.
pub fn header_labels(line: &str) -> Option<ColumnLabels> {
    if !is_table_line(line) {
        return None;
    }
    let cells = split_cells(line);
    ColumnLabels::ALL.into_iter().find(|set| {
        let mut wanted = set.labels().into_iter().peekable();
        for cell in &cells {
            if let Some(label) = wanted.peek()
                && cell.eq_ignore_ascii_case(label)
            {
                wanted.next();
            }
        }
        wanted.peek().is_none()
    })
}
