use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::{Block, DocumentStats, Page, Tag};
use crate::ids::{Id, IdGenerator};

/// A structural rule the model breaks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("document has no pages")]
    NoPages,
    #[error("id {0} is used more than once")]
    DuplicateId(Id),
    #[error("current page {0} does not exist")]
    DanglingCurrentPage(Id),
    #[error("edited tag {0} does not exist")]
    DanglingEditingTag(Id),
}

/// The complete editing state.
///
/// All state lives here. The host owns the value (and any undo history or
/// persistence); [`update`](fn@super::update) produces the next one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub pages: Vec<Page>,
    /// Page whose blocks are being worked on
    pub current_page_id: Option<Id>,
    /// The one tag open for editing, if any
    pub editing_tag_id: Option<Id>,
}

impl Model {
    /// A fresh document: one default page, which is current.
    pub fn new(ids: &mut impl IdGenerator) -> Self {
        Self::from_pages(vec![Page::default_page(ids)])
    }

    /// Wrap an existing page list, pointing at its first page.
    pub fn from_pages(pages: Vec<Page>) -> Self {
        let current_page_id = pages.first().map(|p| p.id.clone());
        Self {
            pages,
            current_page_id,
            editing_tag_id: None,
        }
    }

    /// Whether a tag is open for editing.
    pub const fn is_locked(&self) -> bool {
        self.editing_tag_id.is_some()
    }

    pub fn page(&self, id: &Id) -> Option<&Page> {
        self.pages.iter().find(|p| &p.id == id)
    }

    pub(super) fn page_mut(&mut self, id: &Id) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| &p.id == id)
    }

    pub fn current_page(&self) -> Option<&Page> {
        self.current_page_id.as_ref().and_then(|id| self.page(id))
    }

    /// Find a block on any page.
    pub fn find_block(&self, id: &Id) -> Option<(&Page, &Block)> {
        self.pages
            .iter()
            .find_map(|page| page.block(id).map(|block| (page, block)))
    }

    pub(super) fn block_mut(&mut self, id: &Id) -> Option<&mut Block> {
        self.pages.iter_mut().find_map(|page| page.block_mut(id))
    }

    /// Find a tag anywhere in the document.
    pub fn find_tag(&self, id: &Id) -> Option<(&Block, &Tag)> {
        self.pages
            .iter()
            .flat_map(|page| &page.blocks)
            .find_map(|block| block.tag(id).map(|tag| (block, tag)))
    }

    pub fn editing_tag(&self) -> Option<&Tag> {
        self.editing_tag_id
            .as_ref()
            .and_then(|id| self.find_tag(id))
            .map(|(_, tag)| tag)
    }

    pub fn stats(&self) -> DocumentStats {
        DocumentStats::collect(&self.pages)
    }

    /// Clear the edited-tag pointer if its tag is gone.
    pub(super) fn release_missing_editing_tag(&mut self) {
        if let Some(id) = &self.editing_tag_id
            && self.find_tag(id).is_none()
        {
            tracing::debug!(tag = %id, "edited tag removed, releasing lock");
            self.editing_tag_id = None;
        }
    }

    /// Check every structural rule of a complete document.
    ///
    /// Used when a model arrives from outside (a saved snapshot) rather than
    /// from [`update`](fn@super::update).
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.pages.is_empty() {
            return Err(ModelError::NoPages);
        }
        let mut seen = HashSet::new();
        let all_ids = self.pages.iter().flat_map(|page| {
            std::iter::once(&page.id).chain(page.blocks.iter().flat_map(|block| {
                std::iter::once(&block.id).chain(block.tags.iter().map(|tag| &tag.id))
            }))
        });
        for id in all_ids {
            if !seen.insert(id) {
                return Err(ModelError::DuplicateId(id.clone()));
            }
        }
        if let Some(id) = &self.current_page_id
            && self.page(id).is_none()
        {
            return Err(ModelError::DanglingCurrentPage(id.clone()));
        }
        if let Some(id) = &self.editing_tag_id
            && self.find_tag(id).is_none()
        {
            return Err(ModelError::DanglingEditingTag(id.clone()));
        }
        Ok(())
    }
}
