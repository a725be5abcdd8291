//! Keyboard shortcuts.
//!
//! Platform code converts native key events into a [`KeyCombo`]; the
//! [`KeybindingConfig`] maps combos to [`EditorCommand`]s.

use std::collections::HashMap;
use std::fmt;

use smol_str::SmolStr;

use crate::engine::Engine;
use crate::format::FormatCommand;

/// Platform-agnostic key value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// A character key.
    Character(SmolStr),

    /// Unknown/unidentified key.
    Unidentified,

    // === Editing ===
    Backspace,
    Delete,
    Enter,
    Tab,
    Escape,

    // === Navigation ===
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,

    // === Modifiers ===
    Alt,
    AltGraph,
    CapsLock,
    Control,
    Meta,
    Shift,
}

impl Key {
    pub fn character(s: impl Into<SmolStr>) -> Self {
        Self::Character(s.into())
    }

    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::ArrowLeft
                | Self::ArrowRight
                | Self::ArrowUp
                | Self::ArrowDown
                | Self::Home
                | Self::End
                | Self::PageUp
                | Self::PageDown
        )
    }

    pub fn is_modifier(&self) -> bool {
        matches!(
            self,
            Self::Alt | Self::AltGraph | Self::CapsLock | Self::Control | Self::Meta | Self::Shift
        )
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Character(c) => f.write_str(c),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Modifier key state for a key combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    pub const META: Self = Self {
        meta: true,
        ..Self::NONE
    };

    /// Cmd on Mac, Ctrl elsewhere.
    pub fn primary(is_mac: bool) -> Self {
        if is_mac { Self::META } else { Self::CTRL }
    }
}

/// A key plus the modifiers held with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyCombo {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn primary(key: Key, is_mac: bool) -> Self {
        Self {
            key,
            modifiers: Modifiers::primary(is_mac),
        }
    }

    /// The same combo with Shift released and a character key lowercased.
    fn without_shift(&self) -> Option<KeyCombo> {
        if !self.modifiers.shift {
            return None;
        }
        let key = match &self.key {
            Key::Character(c) => Key::Character(c.to_lowercase().into()),
            other => other.clone(),
        };
        Some(KeyCombo {
            key,
            modifiers: Modifiers {
                shift: false,
                ..self.modifiers
            },
        })
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Modifiers {
            ctrl,
            alt,
            shift,
            meta,
        } = self.modifiers;
        if ctrl {
            f.write_str("Ctrl+")?;
        }
        if meta {
            f.write_str("Cmd+")?;
        }
        if alt {
            f.write_str("Alt+")?;
        }
        if shift {
            f.write_str("Shift+")?;
        }
        write!(f, "{}", self.key)
    }
}

/// What a bound key does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorCommand {
    Format(FormatCommand),
    /// Replace the selection with literal text.
    InsertText(SmolStr),
}

impl EditorCommand {
    pub fn execute<E: Engine + ?Sized>(&self, editor: &mut E) {
        match self {
            EditorCommand::Format(command) => command.toggle(editor),
            EditorCommand::InsertText(text) => editor.insert_text(text),
        }
    }
}

impl fmt::Display for EditorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorCommand::Format(command) => write!(f, "{command}"),
            EditorCommand::InsertText(text) => write!(f, "insert {text:?}"),
        }
    }
}

/// Result of handling a keydown event.
#[derive(Debug, Clone, PartialEq)]
pub enum KeydownResult {
    /// Event was handled, prevent default.
    Handled,
    /// Event was not a keybinding, let platform handle it.
    NotHandled,
    /// Event should be passed through (navigation, etc.).
    PassThrough,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeybindingConfig {
    pub bindings: HashMap<KeyCombo, EditorCommand>,
}

impl KeybindingConfig {
    pub fn default_for_platform(is_mac: bool) -> Self {
        let shortcuts = [
            ("`", FormatCommand::Code),
            ("b", FormatCommand::Bold),
            ("i", FormatCommand::Italic),
            ("u", FormatCommand::Underline),
            ("s", FormatCommand::Strikethrough),
            ("l", FormatCommand::AlignLeft),
            ("e", FormatCommand::AlignCenter),
            ("r", FormatCommand::AlignRight),
        ];
        let mut bindings: HashMap<_, _> = shortcuts
            .into_iter()
            .map(|(key, command)| {
                (
                    KeyCombo::primary(Key::character(key), is_mac),
                    EditorCommand::Format(command),
                )
            })
            .collect();
        bindings.insert(
            KeyCombo::new(Key::character("&")),
            EditorCommand::InsertText(SmolStr::new_static("and")),
        );
        Self { bindings }
    }

    /// Find the command bound to `combo`.
    ///
    /// Falls back to the unshifted combo, so a shortcut still fires with
    /// Caps Lock or Shift held.
    pub fn lookup(&self, combo: &KeyCombo) -> Option<&EditorCommand> {
        self.bindings.get(combo).or_else(|| {
            combo
                .without_shift()
                .and_then(|unshifted| self.bindings.get(&unshifted))
        })
    }
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self::default_for_platform(false)
    }
}

/// Run the command bound to `combo`, if any.
///
/// Navigation and bare modifier presses pass through to the platform; other
/// unbound keys are left for regular text input.
pub fn handle_keydown<E: Engine + ?Sized>(
    editor: &mut E,
    config: &KeybindingConfig,
    combo: &KeyCombo,
) -> KeydownResult {
    if let Some(command) = config.lookup(combo) {
        tracing::debug!(%combo, %command, "keybinding");
        command.execute(editor);
        return KeydownResult::Handled;
    }

    if combo.key.is_navigation() || combo.key.is_modifier() {
        return KeydownResult::PassThrough;
    }

    KeydownResult::NotHandled
}
