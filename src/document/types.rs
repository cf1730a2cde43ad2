//! Core document types.

use serde::{Deserialize, Serialize};

use crate::ids::{Id, IdGenerator};

/// Name given to the page a fresh document starts with.
pub const DEFAULT_PAGE_NAME: &str = "首頁";
/// Name given to pages created with `AddPage`.
pub const NEW_PAGE_NAME: &str = "新頁面";
/// Name given to blocks created with `AddBlock`.
pub const NEW_BLOCK_NAME: &str = "新區塊";

/// A single change record: a semantic label plus an old/new content pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: Id,
    /// Free-form short label such as `h1` or `meta`
    #[serde(rename = "type")]
    pub kind: String,
    pub old_content: String,
    pub new_content: String,
}

/// Change status derived from a tag's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagStatus {
    Added,
    Removed,
    Modified,
    Pending,
}

impl TagStatus {
    pub const ALL: [Self; 4] = [Self::Added, Self::Removed, Self::Modified, Self::Pending];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Modified => "modified",
            Self::Pending => "pending",
        }
    }
}

impl Tag {
    /// Create a tag with all fields empty.
    pub fn empty(id: Id) -> Self {
        Self {
            id,
            kind: String::new(),
            old_content: String::new(),
            new_content: String::new(),
        }
    }

    pub fn new(
        id: Id,
        kind: impl Into<String>,
        old_content: impl Into<String>,
        new_content: impl Into<String>,
    ) -> Self {
        Self {
            id,
            kind: kind.into(),
            old_content: old_content.into(),
            new_content: new_content.into(),
        }
    }

    /// Whitespace-only content counts as empty.
    pub fn status(&self) -> TagStatus {
        let has_old = !self.old_content.trim().is_empty();
        let has_new = !self.new_content.trim().is_empty();
        match (has_old, has_new) {
            (false, true) => TagStatus::Added,
            (true, false) => TagStatus::Removed,
            (true, true) => TagStatus::Modified,
            (false, false) => TagStatus::Pending,
        }
    }

    pub fn apply(&mut self, patch: TagPatch) {
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(old_content) = patch.old_content {
            self.old_content = old_content;
        }
        if let Some(new_content) = patch.new_content {
            self.new_content = new_content;
        }
    }
}

/// A named grouping of tag edits within a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: Id,
    pub name: String,
    pub tags: Vec<Tag>,
}

impl Block {
    pub fn new(id: Id, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tags: Vec::new(),
        }
    }

    pub fn tag(&self, id: &Id) -> Option<&Tag> {
        self.tags.iter().find(|t| &t.id == id)
    }

    pub fn tag_mut(&mut self, id: &Id) -> Option<&mut Tag> {
        self.tags.iter_mut().find(|t| &t.id == id)
    }

    pub fn apply(&mut self, patch: BlockPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
    }
}

/// Top-level container of blocks for one target page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: Id,
    pub name: String,
    pub blocks: Vec<Block>,
}

impl Page {
    pub fn new(id: Id, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            blocks: Vec::new(),
        }
    }

    /// The page a document falls back to when nothing else is known.
    pub fn default_page(ids: &mut impl IdGenerator) -> Self {
        Self::new(ids.next_id(), DEFAULT_PAGE_NAME)
    }

    pub fn block(&self, id: &Id) -> Option<&Block> {
        self.blocks.iter().find(|b| &b.id == id)
    }

    pub fn block_mut(&mut self, id: &Id) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| &b.id == id)
    }

    pub fn tag_count(&self) -> usize {
        self.blocks.iter().map(|b| b.tags.len()).sum()
    }

    pub fn apply(&mut self, patch: PagePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
    }
}

/// Partial update for a page. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PagePatch {
    pub name: Option<String>,
}

impl PagePatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

/// Partial update for a block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockPatch {
    pub name: Option<String>,
}

impl BlockPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

/// Partial update for a tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagPatch {
    pub kind: Option<String>,
    pub old_content: Option<String>,
    pub new_content: Option<String>,
}

impl TagPatch {
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    #[must_use]
    pub fn with_old_content(mut self, content: impl Into<String>) -> Self {
        self.old_content = Some(content.into());
        self
    }

    #[must_use]
    pub fn with_new_content(mut self, content: impl Into<String>) -> Self {
        self.new_content = Some(content.into());
        self
    }
}

/// Totals across a page list, as shown next to import/export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DocumentStats {
    pub pages: usize,
    pub blocks: usize,
    pub tags: usize,
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    pub pending: usize,
}

impl DocumentStats {
    pub fn collect(pages: &[Page]) -> Self {
        let mut stats = Self {
            pages: pages.len(),
            ..Self::default()
        };
        for block in pages.iter().flat_map(|p| &p.blocks) {
            stats.blocks += 1;
            for tag in &block.tags {
                stats.tags += 1;
                match tag.status() {
                    TagStatus::Added => stats.added += 1,
                    TagStatus::Removed => stats.removed += 1,
                    TagStatus::Modified => stats.modified += 1,
                    TagStatus::Pending => stats.pending += 1,
                }
            }
        }
        stats
    }

    pub const fn count(&self, status: TagStatus) -> usize {
        match status {
            TagStatus::Added => self.added,
            TagStatus::Removed => self.removed,
            TagStatus::Modified => self.modified,
            TagStatus::Pending => self.pending,
        }
    }
}
