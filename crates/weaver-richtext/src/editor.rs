//! The editor component: an engine, a keymap and a store wired together.

use crate::config::EditorConfig;
use crate::engine::{Engine, MemoryEngine};
use crate::format::FormatCommand;
use crate::html;
use crate::keymap::{self, EditorCommand, KeyCombo, KeybindingConfig, KeydownResult};
use crate::link;
use crate::node::Node;
use crate::path::Selection;
use crate::storage::{self, DocumentStore};

/// A rich-text editor persisting its document to `S`.
///
/// Every operation that changes the document writes it back to the store
/// under the configured key. Selection changes are not saved.
pub struct RichTextEditor<S: DocumentStore> {
    engine: MemoryEngine,
    store: S,
    config: EditorConfig,
    keybindings: KeybindingConfig,
    saved_version: u64,
}

impl<S: DocumentStore> RichTextEditor<S> {
    /// Load the document from `store`, or start from an empty paragraph.
    pub fn open(store: S, config: EditorConfig) -> Self {
        let document = storage::load_document(&store, &config.storage_key);
        let engine = MemoryEngine::new(document).with_void_kinds(config.void_kinds.iter().cloned());
        let keybindings = config.keybindings();
        tracing::debug!(key = %config.storage_key, "opened editor");
        Self {
            saved_version: engine.version(),
            engine,
            store,
            config,
            keybindings,
        }
    }

    pub fn engine(&self) -> &MemoryEngine {
        &self.engine
    }

    /// Direct engine access. Changes made here are saved on the next
    /// editor operation.
    pub fn engine_mut(&mut self) -> &mut MemoryEngine {
        &mut self.engine
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn keybindings(&self) -> &KeybindingConfig {
        &self.keybindings
    }

    pub fn document(&self) -> &[Node] {
        self.engine.document()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.engine.selection()
    }

    pub fn select(&mut self, selection: Selection) {
        self.engine.select(selection);
    }

    pub fn deselect(&mut self) {
        self.engine.deselect();
    }

    pub fn is_active(&self, command: FormatCommand) -> bool {
        command.is_active(&self.engine)
    }

    pub fn is_link_active(&self) -> bool {
        link::is_link_active(&self.engine)
    }

    pub fn execute(&mut self, command: &EditorCommand) {
        command.execute(&mut self.engine);
        self.autosave();
    }

    pub fn toggle(&mut self, command: FormatCommand) {
        self.execute(&EditorCommand::Format(command));
    }

    pub fn handle_keydown(&mut self, combo: &KeyCombo) -> KeydownResult {
        let result = keymap::handle_keydown(&mut self.engine, &self.keybindings, combo);
        if result == KeydownResult::Handled {
            self.autosave();
        }
        result
    }

    pub fn insert_link(&mut self, url: Option<&str>) {
        link::insert_link(&mut self.engine, url);
        self.autosave();
    }

    pub fn remove_link(&mut self, at: Option<Selection>) {
        link::remove_link(&mut self.engine, at);
        self.autosave();
    }

    pub fn insert_text(&mut self, text: &str) {
        self.engine.insert_text(text);
        self.autosave();
    }

    pub fn to_html(&self) -> String {
        html::serialize_document(self.engine.document())
    }

    /// Write the document to the store if it changed since the last save.
    ///
    /// A failed write is logged and not retried; the next change tries again.
    fn autosave(&mut self) {
        let version = self.engine.version();
        if version == self.saved_version {
            return;
        }
        self.saved_version = version;
        let key = self.config.storage_key.as_str();
        match storage::save_document(&self.store, key, self.engine.document()) {
            Ok(()) => tracing::trace!(key, version, "saved document"),
            Err(e) => tracing::warn!(key, version, error = %e, "failed to save document"),
        }
    }
}
