//! Persistence of the document as JSON under a string key.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{RichTextError, Result};
use crate::node::{Node, default_document};

/// Key the document is saved under unless configured otherwise.
pub const CONTENT_KEY: &str = "content";

/// A string key-value store holding serialized documents.
pub trait DocumentStore {
    /// The stored value, or `None` if nothing was saved under `key`.
    fn load(&self, key: &str) -> Result<Option<String>>;

    fn save(&self, key: &str, value: &str) -> Result<()>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for &S {
    fn load(&self, key: &str) -> Result<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        (**self).save(key, value)
    }
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key))
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a new [`FileStore`] rooted at `dir`. The directory is created
    /// on first save.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl DocumentStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(RichTextError::Io { path, source }),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir).map_err(|source| RichTextError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.path_for(key);
        std::fs::write(&path, value).map_err(|source| RichTextError::Io { path, source })
    }
}

pub fn parse_document(json: &str) -> Result<Vec<Node>> {
    Ok(serde_json::from_str(json)?)
}

/// Load the document saved under `key`.
///
/// Anything that cannot produce a document (missing key, store failure,
/// malformed json, an empty node list) yields the default document.
pub fn load_document(store: &impl DocumentStore, key: &str) -> Vec<Node> {
    let stored = match store.load(key) {
        Ok(Some(stored)) => stored,
        Ok(None) => {
            tracing::debug!(key, "no saved document, starting empty");
            return default_document();
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to load document, starting empty");
            return default_document();
        }
    };
    match parse_document(&stored) {
        Ok(nodes) if !nodes.is_empty() => nodes,
        Ok(_) => default_document(),
        Err(e) => {
            tracing::warn!(key, error = %e, "saved document is malformed, starting empty");
            default_document()
        }
    }
}

pub fn save_document(store: &impl DocumentStore, key: &str, nodes: &[Node]) -> Result<()> {
    let json = serde_json::to_string(nodes)?;
    store.save(key, &json)
}
