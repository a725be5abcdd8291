//! weaver-richtext: rich-text document toggling and HTML export.
//!
//! This crate provides:
//! - `Node` tree with a Slate-compatible JSON form
//! - `Engine` trait, the narrow editing surface the formatters need, and
//!   `MemoryEngine` implementing it over an owned tree
//! - Mark/block toggling (`FormatCommand`) and the link protocol
//! - HTML fragment serialization
//! - Keyboard shortcuts, persistence and the `RichTextEditor` tying them together

pub mod config;
pub mod editor;
pub mod engine;
pub mod error;
pub mod format;
pub mod html;
pub mod keymap;
pub mod link;
pub mod node;
pub mod path;
pub mod storage;

pub use config::EditorConfig;
pub use editor::RichTextEditor;
pub use engine::{Engine, MemoryEngine, SetAttrs};
pub use error::{Result, RichTextError};
pub use format::{
    FormatCommand, FormatTarget, UnknownCommand, is_block_active, is_mark_active, toggle_block,
    toggle_mark,
};
pub use html::{escape_html, render, serialize_document};
pub use keymap::{EditorCommand, Key, KeyCombo, KeybindingConfig, KeydownResult, Modifiers};
pub use link::{insert_link, is_link_active, remove_link};
pub use node::{Alignment, Element, ElementKind, Mark, Marks, Node, Text, default_document};
pub use path::{ParsePointError, Path, Point, Selection};
pub use smol_str::SmolStr;
pub use storage::{
    CONTENT_KEY, DocumentStore, FileStore, MemoryStore, load_document, parse_document,
    save_document,
};
