use crate::app::Model;
use crate::document::{
    Block, BlockPatch, NEW_BLOCK_NAME, NEW_PAGE_NAME, Page, PagePatch, Tag, TagPatch,
};
use crate::ids::{Id, IdGenerator};

/// All commands that change the document.
///
/// Commands naming an id that does not exist leave the model unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Pages
    /// Replace the whole page list; the first page becomes current
    SetPages(Vec<Page>),
    /// Append a new empty page and make it current
    AddPage,
    /// Merge a patch into a page
    UpdatePage(Id, PagePatch),
    /// Remove a page, unless it is the last one
    DeletePage(Id),
    /// Point at another page
    SetCurrentPage(Id),

    // Blocks
    /// Append an empty block to the current page
    AddBlock,
    /// Merge a patch into a block on any page
    UpdateBlock(Id, BlockPatch),
    /// Remove a block and its tags
    DeleteBlock(Id),

    // Tags
    /// Append an empty tag to a block and open it for editing
    AddTag(Id),
    /// Merge a patch into a tag
    UpdateTag {
        block_id: Id,
        tag_id: Id,
        patch: TagPatch,
    },
    /// Remove a tag
    DeleteTag { block_id: Id, tag_id: Id },
    /// Open a tag for editing, or close the open one with `None`
    SetEditingTag(Option<Id>),
}

/// Pure function that updates the model based on a message.
///
/// All document transitions happen here. New entities take their ids from
/// `ids`; nothing else leaves the function.
pub fn update(mut model: Model, msg: Message, ids: &mut impl IdGenerator) -> Model {
    match msg {
        // Pages
        Message::SetPages(pages) => {
            tracing::debug!(pages = pages.len(), "replacing page list");
            model = Model::from_pages(pages);
        }
        Message::AddPage => {
            let page = Page::new(ids.next_id(), NEW_PAGE_NAME);
            model.current_page_id = Some(page.id.clone());
            model.pages.push(page);
        }
        Message::UpdatePage(id, patch) => {
            if let Some(page) = model.page_mut(&id) {
                page.apply(patch);
            } else {
                tracing::debug!(page = %id, "update for unknown page ignored");
            }
        }
        Message::DeletePage(id) => delete_page(&mut model, &id),
        Message::SetCurrentPage(id) => {
            if model.page(&id).is_some() {
                model.current_page_id = Some(id);
            } else {
                tracing::debug!(page = %id, "cannot select unknown page");
            }
        }

        // Blocks
        Message::AddBlock => {
            let Some(current) = model.current_page_id.clone() else {
                tracing::debug!("no current page to add a block to");
                return model;
            };
            if let Some(page) = model.page_mut(&current) {
                page.blocks.push(Block::new(ids.next_id(), NEW_BLOCK_NAME));
            }
        }
        Message::UpdateBlock(id, patch) => {
            if let Some(block) = model.block_mut(&id) {
                block.apply(patch);
            } else {
                tracing::debug!(block = %id, "update for unknown block ignored");
            }
        }
        Message::DeleteBlock(id) => {
            let mut removed = false;
            for page in &mut model.pages {
                let before = page.blocks.len();
                page.blocks.retain(|b| b.id != id);
                removed |= page.blocks.len() != before;
            }
            if removed {
                model.release_missing_editing_tag();
            }
        }

        // Tags
        Message::AddTag(block_id) => add_tag(&mut model, &block_id, ids),
        Message::UpdateTag {
            block_id,
            tag_id,
            patch,
        } => {
            match model
                .block_mut(&block_id)
                .and_then(|block| block.tag_mut(&tag_id))
            {
                Some(tag) => tag.apply(patch),
                None => tracing::debug!(block = %block_id, tag = %tag_id, "update for unknown tag ignored"),
            }
        }
        Message::DeleteTag { block_id, tag_id } => {
            let Some(block) = model.block_mut(&block_id) else {
                tracing::debug!(block = %block_id, "cannot delete tag from unknown block");
                return model;
            };
            block.tags.retain(|t| t.id != tag_id);
            model.release_missing_editing_tag();
        }
        Message::SetEditingTag(None) => {
            model.editing_tag_id = None;
        }
        Message::SetEditingTag(Some(tag_id)) => {
            if model.find_tag(&tag_id).is_none() {
                tracing::debug!(tag = %tag_id, "cannot edit unknown tag");
            } else if model
                .editing_tag_id
                .as_ref()
                .is_some_and(|editing| editing != &tag_id)
            {
                tracing::debug!(tag = %tag_id, "another tag is being edited");
            } else {
                model.editing_tag_id = Some(tag_id);
            }
        }
    }

    model
}

/// The last remaining page cannot be deleted.
fn delete_page(model: &mut Model, id: &Id) {
    if model.page(id).is_none() {
        tracing::debug!(page = %id, "delete for unknown page ignored");
        return;
    }
    if model.pages.len() <= 1 {
        tracing::debug!(page = %id, "refusing to delete the only page");
        return;
    }
    model.pages.retain(|p| &p.id != id);
    if model.current_page_id.as_ref() == Some(id) {
        model.current_page_id = model.pages.first().map(|p| p.id.clone());
    }
    model.release_missing_editing_tag();
}

/// Refused while a different tag is open for editing.
fn add_tag(model: &mut Model, block_id: &Id, ids: &mut impl IdGenerator) {
    if model.is_locked() {
        tracing::debug!(block = %block_id, "another tag is being edited, not adding");
        return;
    }
    let Some(block) = model.block_mut(block_id) else {
        tracing::debug!(block = %block_id, "cannot add tag to unknown block");
        return;
    };
    let tag = Tag::empty(ids.next_id());
    let tag_id = tag.id.clone();
    block.tags.push(tag);
    model.editing_tag_id = Some(tag_id);
}
