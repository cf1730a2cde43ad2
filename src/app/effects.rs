use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::app::{App, Message, Model};
use crate::document::{DocumentStats, decode_with, encode_with};
use crate::ids::IdGenerator;

/// Something the host may want to tell the user after an effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Warning(String),
}

impl<G: IdGenerator> App<G> {
    /// Replace the document with one decoded from `text`.
    ///
    /// Decoding finishes before the model is touched, so an import is all or
    /// nothing.
    pub fn import_markdown(&mut self, text: &str) -> DocumentStats {
        let pages = decode_with(text, &mut self.ids);
        let stats = DocumentStats::collect(&pages);
        self.dispatch(Message::SetPages(pages));
        tracing::info!(
            pages = stats.pages,
            blocks = stats.blocks,
            tags = stats.tags,
            "imported document"
        );
        stats
    }

    /// Read a markdown file and import it. The model is untouched if the
    /// file cannot be read.
    pub fn import_file(&mut self, path: &Path) -> Result<DocumentStats> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(self.import_markdown(&text))
    }

    /// Encode the document. The notice is a warning when there is nothing
    /// to review.
    pub fn export_markdown(&self) -> (String, Notice) {
        let text = encode_with(&self.model.pages, &self.encode_options);
        let stats = self.model.stats();
        let notice = if stats.tags == 0 {
            Notice::Warning(format!("Exported {} page(s) without any tags", stats.pages))
        } else {
            Notice::Info(format!(
                "Exported {} tag(s) in {} block(s) across {} page(s)",
                stats.tags, stats.blocks, stats.pages
            ))
        };
        (text, notice)
    }

    /// Encode the document and write it to `path`.
    pub fn export_file(&self, path: &Path) -> Result<Notice> {
        let (text, notice) = self.export_markdown();
        write_creating_parent(path, &text)?;
        tracing::info!(path = %path.display(), bytes = text.len(), "exported document");
        Ok(notice)
    }

    /// Save the whole model, ids included, as JSON.
    pub fn save_snapshot(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.model).context("Failed to serialize model")?;
        write_creating_parent(path, &json)
    }

    /// Load a model saved with [`App::save_snapshot`].
    pub fn load_snapshot(path: &Path, ids: G) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
        let model: Model = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse snapshot {}", path.display()))?;
        model
            .validate()
            .with_context(|| format!("Invalid snapshot {}", path.display()))?;
        Ok(Self::from_model(model, ids))
    }
}

fn write_creating_parent(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}
