//! Editing state and the commands that change it.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete editing state
//! - [`Message`]: All commands that change it
//! - [`update`]: Pure function for state transitions
//! - [`App`]: Host-side owner of the model, with import/export effects

mod effects;
mod model;
mod update;

pub use effects::Notice;
pub use model::{Model, ModelError};
pub use update::{Message, update};

use crate::document::EncodeOptions;
use crate::ids::{IdGenerator, UuidIds};

/// Owns the current model and the id source, and runs commands against them.
#[derive(Debug)]
pub struct App<G: IdGenerator = UuidIds> {
    model: Model,
    ids: G,
    encode_options: EncodeOptions,
}

impl App<UuidIds> {
    /// Create an application with a fresh one-page document.
    pub fn new() -> Self {
        Self::with_ids(UuidIds)
    }
}

impl Default for App<UuidIds> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: IdGenerator> App<G> {
    /// Create an application drawing ids from `ids`.
    pub fn with_ids(mut ids: G) -> Self {
        let model = Model::new(&mut ids);
        Self {
            model,
            ids,
            encode_options: EncodeOptions::default(),
        }
    }

    /// Start from an existing model.
    pub fn from_model(model: Model, ids: G) -> Self {
        Self {
            model,
            ids,
            encode_options: EncodeOptions::default(),
        }
    }

    /// Set the title and column labels used on export.
    #[must_use]
    pub fn with_encode_options(mut self, options: EncodeOptions) -> Self {
        self.encode_options = options;
        self
    }

    pub const fn model(&self) -> &Model {
        &self.model
    }

    pub fn into_model(self) -> Model {
        self.model
    }

    /// Apply one command.
    pub fn dispatch(&mut self, msg: Message) -> &Model {
        let model = std::mem::replace(&mut self.model, Model::from_pages(Vec::new()));
        self.model = update(model, msg, &mut self.ids);
        &self.model
    }
}
