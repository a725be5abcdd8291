//! Mark and block toggling.
//!
//! Every toolbar command has the same shape: ask whether the format is active
//! across the selection, then apply the inverse. Marks are written onto text
//! runs; block kinds are written onto the enclosing block and reset to
//! `paragraph` when switched off. Block kinds overwrite one another, so an
//! aligned code block cannot be expressed.

use std::fmt;
use std::str::FromStr;

use crate::engine::{Engine, SetAttrs};
use crate::node::{ElementKind, Mark, Node};

/// Whether any selected text run carries `mark`.
pub fn is_mark_active<E: Engine + ?Sized>(editor: &E, mark: Mark) -> bool {
    !editor
        .find_nodes(&|node: &Node| matches!(node, Node::Text(t) if t.marks.get(mark)))
        .is_empty()
}

/// Set `mark` on exactly the selected characters, or clear it if any of them
/// already has it. No-op without a selection.
pub fn toggle_mark<E: Engine + ?Sized>(editor: &mut E, mark: Mark) {
    if editor.selection().is_none() {
        return;
    }
    let active = is_mark_active(editor, mark);
    tracing::debug!(%mark, active, "toggle mark");
    editor.set_nodes(
        SetAttrs::Mark {
            mark,
            value: !active,
        },
        true,
    );
}

/// Whether any element intersecting the selection has `kind`.
pub fn is_block_active<E: Engine + ?Sized>(editor: &E, kind: &ElementKind) -> bool {
    !editor
        .find_nodes(&|node: &Node| matches!(node, Node::Element(e) if e.kind == *kind))
        .is_empty()
}

/// Switch the enclosing blocks to `kind`, or back to a paragraph if `kind` is
/// already active. No-op without a selection.
pub fn toggle_block<E: Engine + ?Sized>(editor: &mut E, kind: ElementKind) {
    if editor.selection().is_none() {
        return;
    }
    let active = is_block_active(editor, &kind);
    tracing::debug!(%kind, active, "toggle block");
    let kind = if active { ElementKind::Paragraph } else { kind };
    editor.set_nodes(SetAttrs::Kind(kind), false);
}

/// A formatting command exposed on the toolbar and through shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatCommand {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Code,
    Blockquote,
    AlignLeft,
    AlignCenter,
    AlignRight,
}

/// What a [`FormatCommand`] writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatTarget {
    Mark(Mark),
    Block(ElementKind),
}

impl FormatCommand {
    pub const ALL: [FormatCommand; 9] = [
        FormatCommand::Bold,
        FormatCommand::Italic,
        FormatCommand::Underline,
        FormatCommand::Strikethrough,
        FormatCommand::Code,
        FormatCommand::Blockquote,
        FormatCommand::AlignLeft,
        FormatCommand::AlignCenter,
        FormatCommand::AlignRight,
    ];

    pub fn target(&self) -> FormatTarget {
        match self {
            FormatCommand::Bold => FormatTarget::Mark(Mark::Bold),
            FormatCommand::Italic => FormatTarget::Mark(Mark::Italic),
            FormatCommand::Underline => FormatTarget::Mark(Mark::Underline),
            FormatCommand::Strikethrough => FormatTarget::Mark(Mark::Strikethrough),
            FormatCommand::Code => FormatTarget::Block(ElementKind::Code),
            FormatCommand::Blockquote => FormatTarget::Block(ElementKind::Blockquote),
            FormatCommand::AlignLeft => FormatTarget::Block(ElementKind::AlignLeft),
            FormatCommand::AlignCenter => FormatTarget::Block(ElementKind::AlignCenter),
            FormatCommand::AlignRight => FormatTarget::Block(ElementKind::AlignRight),
        }
    }

    pub fn is_active<E: Engine + ?Sized>(&self, editor: &E) -> bool {
        match self.target() {
            FormatTarget::Mark(mark) => is_mark_active(editor, mark),
            FormatTarget::Block(kind) => is_block_active(editor, &kind),
        }
    }

    pub fn toggle<E: Engine + ?Sized>(&self, editor: &mut E) {
        match self.target() {
            FormatTarget::Mark(mark) => toggle_mark(editor, mark),
            FormatTarget::Block(kind) => toggle_block(editor, kind),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FormatCommand::Bold => "bold",
            FormatCommand::Italic => "italic",
            FormatCommand::Underline => "underline",
            FormatCommand::Strikethrough => "strikethrough",
            FormatCommand::Code => "code",
            FormatCommand::Blockquote => "blockquote",
            FormatCommand::AlignLeft => "align-left",
            FormatCommand::AlignCenter => "align-center",
            FormatCommand::AlignRight => "align-right",
        }
    }
}

impl fmt::Display for FormatCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown format command `{0}`")]
pub struct UnknownCommand(pub String);

impl FromStr for FormatCommand {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormatCommand::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCommand(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MemoryEngine;
    use crate::node::{Element, Text};
    use crate::path::{Point, Selection};

    fn para(children: Vec<Node>) -> Node {
        Node::Element(Element::paragraph(children))
    }

    fn engine_with(doc: Vec<Node>, anchor: Point, focus: Point) -> MemoryEngine {
        let mut engine = MemoryEngine::new(doc);
        engine.select(Selection::new(anchor, focus));
        engine
    }

    #[test]
    fn test_toggle_bold_twice_restores_tree() {
        let doc = vec![para(vec![Node::text("hello world")])];
        let mut engine = engine_with(doc.clone(), Point::new([0, 0], 2), Point::new([0, 0], 7));

        toggle_mark(&mut engine, Mark::Bold);
        assert_ne!(engine.document(), doc.as_slice());
        toggle_mark(&mut engine, Mark::Bold);
        assert_eq!(engine.document(), doc.as_slice());
    }

    #[test]
    fn test_is_active_flips_for_every_mark() {
        for mark in Mark::ALL {
            let doc = vec![para(vec![
                Node::text("plain "),
                Node::Text(Text::new("marked").with_mark(mark)),
            ])];
            // Selection straddles a marked and an unmarked run.
            let mut engine =
                engine_with(doc, Point::new([0, 0], 3), Point::new([0, 1], 3));

            for _ in 0..3 {
                let before = is_mark_active(&engine, mark);
                toggle_mark(&mut engine, mark);
                assert_eq!(is_mark_active(&engine, mark), !before, "{mark}");
            }
        }
    }

    #[test]
    fn test_mark_changes_only_selected_characters() {
        let doc = vec![para(vec![Node::text("abcdef")])];
        let mut engine = engine_with(doc, Point::new([0, 0], 4), Point::new([0, 0], 1));
        toggle_mark(&mut engine, Mark::Italic);

        assert_eq!(
            engine.document(),
            &[para(vec![
                Node::text("a"),
                Node::Text(Text::new("bcd").with_mark(Mark::Italic)),
                Node::text("ef"),
            ])]
        );
    }

    #[test]
    fn test_partially_active_mark_is_cleared() {
        let doc = vec![para(vec![
            Node::Text(Text::new("ab").with_mark(Mark::Bold)),
            Node::text("cd"),
        ])];
        let mut engine = engine_with(doc, Point::new([0, 0], 0), Point::new([0, 1], 2));
        assert!(is_mark_active(&engine, Mark::Bold));

        toggle_mark(&mut engine, Mark::Bold);
        assert_eq!(engine.document(), &[para(vec![Node::text("abcd")])]);
    }

    #[test]
    fn test_marks_combine() {
        let doc = vec![para(vec![Node::text("x")])];
        let mut engine = engine_with(doc, Point::new([0, 0], 0), Point::new([0, 0], 1));
        toggle_mark(&mut engine, Mark::Bold);
        toggle_mark(&mut engine, Mark::Underline);

        let run = engine.document()[0].as_element().unwrap().children[0]
            .as_text()
            .unwrap();
        assert!(run.marks.bold && run.marks.underline);
        assert!(!run.marks.italic);
    }

    #[test]
    fn test_collapsed_cursor_marks_its_run() {
        let doc = vec![para(vec![Node::text("word")])];
        let point = Point::new([0, 0], 2);
        let mut engine = engine_with(doc, point.clone(), point);

        toggle_mark(&mut engine, Mark::Strikethrough);
        assert!(is_mark_active(&engine, Mark::Strikethrough));
        toggle_mark(&mut engine, Mark::Strikethrough);
        assert!(!is_mark_active(&engine, Mark::Strikethrough));
    }

    #[test]
    fn test_no_selection_is_noop() {
        let mut engine = MemoryEngine::new(vec![para(vec![Node::text("x")])]);
        let before = engine.document().to_vec();

        toggle_mark(&mut engine, Mark::Bold);
        toggle_block(&mut engine, ElementKind::Code);

        assert_eq!(engine.document(), before.as_slice());
        assert_eq!(engine.version(), 0);
        assert!(!FormatCommand::Bold.is_active(&engine));
    }

    #[test]
    fn test_toggle_code_block() {
        let doc = vec![para(vec![Node::text("let x = 1;")])];
        let point = Point::new([0, 0], 3);
        let mut engine = engine_with(doc, point.clone(), point);

        toggle_block(&mut engine, ElementKind::Code);
        assert!(is_block_active(&engine, &ElementKind::Code));
        assert_eq!(
            engine.document()[0].as_element().unwrap().kind,
            ElementKind::Code
        );

        toggle_block(&mut engine, ElementKind::Code);
        assert!(!is_block_active(&engine, &ElementKind::Code));
        assert_eq!(
            engine.document()[0].as_element().unwrap().kind,
            ElementKind::Paragraph
        );
    }

    #[test]
    fn test_block_kinds_overwrite() {
        let doc = vec![para(vec![Node::text("x")])];
        let point = Point::new([0, 0], 0);
        let mut engine = engine_with(doc, point.clone(), point);

        FormatCommand::AlignCenter.toggle(&mut engine);
        FormatCommand::Code.toggle(&mut engine);

        assert!(FormatCommand::Code.is_active(&engine));
        assert!(!FormatCommand::AlignCenter.is_active(&engine));
    }

    #[test]
    fn test_block_toggle_spans_blocks() {
        let doc = vec![
            para(vec![Node::text("one")]),
            Node::Element(Element::new(ElementKind::Blockquote, vec![Node::text("two")])),
            para(vec![Node::text("three")]),
        ];
        let mut engine = engine_with(doc, Point::new([0, 0], 1), Point::new([1, 0], 1));

        // One of the two selected blocks is a quote, so the toggle clears it.
        assert!(FormatCommand::Blockquote.is_active(&engine));
        FormatCommand::Blockquote.toggle(&mut engine);

        let kinds: Vec<_> = engine
            .document()
            .iter()
            .map(|n| n.as_element().unwrap().kind.clone())
            .collect();
        assert_eq!(kinds, vec![ElementKind::Paragraph; 3]);

        FormatCommand::Blockquote.toggle(&mut engine);
        let kinds: Vec<_> = engine
            .document()
            .iter()
            .map(|n| n.as_element().unwrap().kind.clone())
            .collect();
        assert_eq!(
            kinds,
            vec![
                ElementKind::Blockquote,
                ElementKind::Blockquote,
                ElementKind::Paragraph
            ]
        );
    }

    #[test]
    fn test_parse_command() {
        for command in FormatCommand::ALL {
            assert_eq!(command.as_str().parse::<FormatCommand>(), Ok(command));
        }
        assert!("heading".parse::<FormatCommand>().is_err());
    }
}
