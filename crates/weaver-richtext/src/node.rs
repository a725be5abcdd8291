//! Document model: text runs and elements.
//!
//! The JSON form matches what browser editors built on Slate persist, so a
//! stored document can move between the two without conversion:
//!
//! ```json
//! [{"type":"paragraph","children":[{"text":"hi","bold":true}]}]
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Element(Element),
    Text(Text),
}

impl Node {
    /// Plain text run with no marks.
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(Text::new(text))
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Node::Text(t) => Some(t),
            Node::Element(_) => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut Text> {
        match self {
            Node::Text(t) => Some(t),
            Node::Element(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        }
    }

    /// Concatenated text of this node and all descendants.
    pub fn string(&self) -> String {
        match self {
            Node::Text(t) => t.text.clone(),
            Node::Element(e) => e.children.iter().map(Node::string).collect(),
        }
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// A leaf holding a run of characters that share the same marks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Text {
    pub text: String,
    #[serde(flatten)]
    pub marks: Marks,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: Marks::default(),
        }
    }

    pub fn with_mark(mut self, mark: Mark) -> Self {
        self.marks.set(mark, true);
        self
    }

    /// Length in characters (NOT bytes).
    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Character-level formatting of a text run.
///
/// A mark is either on or off. Off is written by omitting the field, and both
/// `false` and `null` read back as off.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Marks {
    #[serde(default, deserialize_with = "flag", skip_serializing_if = "is_off")]
    pub bold: bool,
    #[serde(default, deserialize_with = "flag", skip_serializing_if = "is_off")]
    pub italic: bool,
    #[serde(default, deserialize_with = "flag", skip_serializing_if = "is_off")]
    pub underline: bool,
    #[serde(default, deserialize_with = "flag", skip_serializing_if = "is_off")]
    pub strikethrough: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Alignment>,
}

impl Marks {
    pub fn get(&self, mark: Mark) -> bool {
        match mark {
            Mark::Bold => self.bold,
            Mark::Italic => self.italic,
            Mark::Underline => self.underline,
            Mark::Strikethrough => self.strikethrough,
        }
    }

    pub fn set(&mut self, mark: Mark, value: bool) {
        let slot = match mark {
            Mark::Bold => &mut self.bold,
            Mark::Italic => &mut self.italic,
            Mark::Underline => &mut self.underline,
            Mark::Strikethrough => &mut self.strikethrough,
        };
        *slot = value;
    }
}

fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

fn is_off(value: &bool) -> bool {
    !*value
}

/// A character mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Strikethrough,
}

impl Mark {
    pub const ALL: [Mark; 4] = [Mark::Bold, Mark::Italic, Mark::Underline, Mark::Strikethrough];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mark::Bold => "bold",
            Mark::Italic => "italic",
            Mark::Underline => "underline",
            Mark::Strikethrough => "strikethrough",
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text alignment carried on a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

/// A container node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    #[serde(rename = "type", default)]
    pub kind: ElementKind,
    /// Link target, only meaningful for [`ElementKind::Link`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(kind: ElementKind, children: Vec<Node>) -> Self {
        Self {
            kind,
            url: None,
            children,
        }
    }

    pub fn paragraph(children: Vec<Node>) -> Self {
        Self::new(ElementKind::Paragraph, children)
    }

    /// An empty paragraph: one element holding one empty text run.
    pub fn empty_paragraph() -> Self {
        Self::paragraph(vec![Node::text("")])
    }

    pub fn link(url: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            kind: ElementKind::Link,
            url: Some(url.into()),
            children,
        }
    }

    pub fn is_inline(&self) -> bool {
        self.kind.is_inline()
    }
}

/// The structural tag of an element.
///
/// Kinds this crate does not know are kept verbatim in `Other` so a document
/// written by a newer editor survives a load/save cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementKind {
    #[default]
    Paragraph,
    Code,
    Blockquote,
    AlignLeft,
    AlignCenter,
    AlignRight,
    Link,
    Other(String),
}

impl ElementKind {
    pub fn as_str(&self) -> &str {
        match self {
            ElementKind::Paragraph => "paragraph",
            ElementKind::Code => "code",
            ElementKind::Blockquote => "blockquote",
            ElementKind::AlignLeft => "align-left",
            ElementKind::AlignCenter => "align-center",
            ElementKind::AlignRight => "align-right",
            ElementKind::Link => "link",
            ElementKind::Other(s) => s,
        }
    }

    /// Links flow inside blocks; every other kind is a block.
    pub fn is_inline(&self) -> bool {
        matches!(self, ElementKind::Link)
    }

    /// The alignment an align-* kind stands for.
    pub fn alignment(&self) -> Option<Alignment> {
        match self {
            ElementKind::AlignLeft => Some(Alignment::Left),
            ElementKind::AlignCenter => Some(Alignment::Center),
            ElementKind::AlignRight => Some(Alignment::Right),
            _ => None,
        }
    }
}

impl From<String> for ElementKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "paragraph" => ElementKind::Paragraph,
            "code" => ElementKind::Code,
            "blockquote" => ElementKind::Blockquote,
            "align-left" => ElementKind::AlignLeft,
            "align-center" => ElementKind::AlignCenter,
            "align-right" => ElementKind::AlignRight,
            "link" => ElementKind::Link,
            _ => ElementKind::Other(s),
        }
    }
}

impl From<&str> for ElementKind {
    fn from(s: &str) -> Self {
        ElementKind::from(s.to_string())
    }
}

impl From<ElementKind> for String {
    fn from(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The document a fresh editor starts with: a single empty paragraph.
pub fn default_document() -> Vec<Node> {
    vec![Node::Element(Element::empty_paragraph())]
}
