use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RichTextError, Result};
use crate::keymap::KeybindingConfig;
use crate::node::ElementKind;
use crate::storage::CONTENT_KEY;

/// Editor settings. Every field is optional in the JSON form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Store key the document is loaded from and saved under.
    pub storage_key: String,
    /// Use Cmd instead of Ctrl as the shortcut modifier.
    pub is_mac: bool,
    /// Element kinds that hold no editable text, such as embeds.
    pub void_kinds: Vec<ElementKind>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            storage_key: CONTENT_KEY.to_owned(),
            is_mac: false,
            void_kinds: Vec::new(),
        }
    }
}

impl EditorConfig {
    /// Read a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| RichTextError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| RichTextError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn keybindings(&self) -> KeybindingConfig {
        KeybindingConfig::default_for_platform(self.is_mac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::{Key, KeyCombo};

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: EditorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.storage_key, "content");

        let config: EditorConfig =
            serde_json::from_str(r#"{"is_mac":true,"void_kinds":["image"]}"#).unwrap();
        assert!(config.is_mac);
        assert_eq!(config.storage_key, "content");
        assert_eq!(config.void_kinds, vec![ElementKind::from("image")]);
    }

    #[test]
    fn test_keybindings_follow_platform() {
        let config = EditorConfig {
            is_mac: true,
            ..EditorConfig::default()
        };
        let bindings = config.keybindings();
        assert!(bindings.lookup(&KeyCombo::primary(Key::character("b"), true)).is_some());
        assert!(bindings.lookup(&KeyCombo::primary(Key::character("b"), false)).is_none());
    }

    #[test]
    fn test_load_reports_bad_files() {
        let dir = std::env::temp_dir().join(format!("weaver-richtext-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let missing = dir.join("missing.json");
        assert!(matches!(EditorConfig::load(&missing), Err(RichTextError::Io { .. })));

        let bad = dir.join("bad.json");
        std::fs::write(&bad, r#"{"is_mac":"yes"}"#).unwrap();
        assert!(matches!(EditorConfig::load(&bad), Err(RichTextError::Config { .. })));

        let good = dir.join("good.json");
        std::fs::write(&good, r#"{"storage_key":"draft"}"#).unwrap();
        assert_eq!(EditorConfig::load(&good).unwrap().storage_key, "draft");

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
