//! Link insertion and removal.
//!
//! Inserting a link is not a plain toggle. Depending on where the selection
//! is, the link is appended as a new paragraph, placed after a void element,
//! inserted at the cursor, or wrapped around the selected text.

use crate::engine::Engine;
use crate::node::{Element, ElementKind, Node};
use crate::path::Selection;

fn is_link(element: &Element) -> bool {
    element.kind == ElementKind::Link
}

/// Whether a link intersects the selection.
pub fn is_link_active<E: Engine + ?Sized>(editor: &E) -> bool {
    !editor
        .find_nodes(&|node: &Node| matches!(node, Node::Element(e) if is_link(e)))
        .is_empty()
}

/// Insert a link to `url` at the selection.
///
/// An empty or missing `url` does nothing. Links never nest: every link the
/// selection touches is removed first, so a partly selected link keeps none
/// of its old target.
pub fn insert_link<E: Engine + ?Sized>(editor: &mut E, url: Option<&str>) {
    let Some(url) = url.filter(|url| !url.is_empty()) else {
        tracing::debug!("ignoring link without a url");
        return;
    };
    let link = Element::link(url, vec![Node::text(url)]);

    if editor.selection().is_none() {
        tracing::debug!(url, "no selection, appending link paragraph");
        editor.insert_nodes(
            Node::Element(Element::paragraph(vec![Node::Element(link)])),
            None,
            false,
        );
        return;
    }

    if is_link_active(editor) {
        remove_link(editor, None);
    }

    let Some(selection) = editor.selection().cloned() else {
        return;
    };
    let void_parent = editor
        .parent(&selection.focus.path)
        .filter(|(_, parent)| editor.is_void(parent))
        .and_then(|(path, _)| path.next());

    if let Some(after) = void_parent {
        tracing::debug!(url, at = %after, "inserting link after void element");
        editor.insert_nodes(
            Node::Element(Element::paragraph(vec![Node::Element(link)])),
            Some(after),
            true,
        );
    } else if selection.is_collapsed() {
        tracing::debug!(url, "inserting link at cursor");
        editor.insert_nodes(Node::Element(link), None, true);
    } else {
        tracing::debug!(url, "wrapping selection in link");
        editor.wrap_nodes(Element::link(url, Vec::new()), true);
        editor.collapse_to_end();
    }
}

/// Unwrap the links intersecting the selection back into plain text, moving
/// the selection to `at` first when given.
pub fn remove_link<E: Engine + ?Sized>(editor: &mut E, at: Option<Selection>) {
    editor.unwrap_nodes(&is_link, at);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MemoryEngine;
    use crate::path::{Path, Point};

    fn para(children: Vec<Node>) -> Node {
        Node::Element(Element::paragraph(children))
    }

    fn link(url: &str, text: &str) -> Node {
        Node::Element(Element::link(url, vec![Node::text(text)]))
    }

    #[test]
    fn test_insert_at_cursor_then_remove() {
        let mut engine = MemoryEngine::new(vec![para(vec![Node::text("see  here")])]);
        engine.select(Selection::collapsed(Point::new([0, 0], 4)));

        insert_link(&mut engine, Some("https://a.example"));
        assert_eq!(
            engine.document(),
            &[para(vec![
                Node::text("see "),
                link("https://a.example", "https://a.example"),
                Node::text(" here"),
            ])]
        );
        assert!(is_link_active(&engine));

        remove_link(&mut engine, None);
        assert_eq!(
            engine.document(),
            &[para(vec![Node::text("see https://a.example here")])]
        );
        assert!(!is_link_active(&engine));
    }

    #[test]
    fn test_empty_url_is_noop() {
        let doc = vec![para(vec![Node::text("x")])];
        let mut engine = MemoryEngine::new(doc.clone());
        engine.select(Selection::collapsed(Point::new([0, 0], 1)));

        insert_link(&mut engine, Some(""));
        insert_link(&mut engine, None);

        assert_eq!(engine.document(), doc.as_slice());
        assert_eq!(engine.version(), 0);
    }

    #[test]
    fn test_wrap_selection_and_collapse() {
        let mut engine = MemoryEngine::new(vec![para(vec![Node::text("read the docs")])]);
        engine.select(Selection::new(
            Point::new([0, 0], 9),
            Point::new([0, 0], 13),
        ));

        insert_link(&mut engine, Some("https://docs.rs"));
        assert_eq!(
            engine.document(),
            &[para(vec![Node::text("read the "), link("https://docs.rs", "docs")])]
        );
        let selection = engine.selection().unwrap();
        assert!(selection.is_collapsed());
        assert_eq!(selection.focus, Point::new([0, 1, 0], 4));
    }

    #[test]
    fn test_no_selection_appends_paragraph() {
        let mut engine = MemoryEngine::new(vec![para(vec![Node::text("x")])]);
        insert_link(&mut engine, Some("https://b.example"));

        assert_eq!(
            engine.document(),
            &[
                para(vec![Node::text("x")]),
                para(vec![link("https://b.example", "https://b.example")]),
            ]
        );
    }

    #[test]
    fn test_relinking_replaces_enclosing_link() {
        let mut engine = MemoryEngine::new(vec![para(vec![
            Node::text("a"),
            link("https://old", "old"),
            Node::text("b"),
        ])]);
        engine.select(Selection::collapsed(Point::new([0, 1, 0], 3)));

        insert_link(&mut engine, Some("https://new"));

        let links: Vec<_> = engine.document()[0]
            .as_element()
            .unwrap()
            .children
            .iter()
            .filter_map(Node::as_element)
            .map(|e| e.url.clone().unwrap())
            .collect();
        assert_eq!(links, vec!["https://new".to_string()]);
        assert_eq!(engine.document()[0].string(), "aoldhttps://newb");
    }

    #[test]
    fn test_relinking_across_link_edge_drops_old_target() {
        let mut engine = MemoryEngine::new(vec![para(vec![
            Node::text("a"),
            link("https://old", "bcd"),
            Node::text("e"),
        ])]);
        engine.select(Selection::new(
            Point::new([0, 1, 0], 1),
            Point::new([0, 2], 1),
        ));

        insert_link(&mut engine, Some("https://new"));

        assert_eq!(
            engine.document(),
            &[para(vec![Node::text("ab"), link("https://new", "cde")])]
        );
        insta::assert_snapshot!(
            crate::html::serialize_document(engine.document()),
            @r#"<p>ab<a href="https://new">cde</a></p>"#
        );
        assert_eq!(
            engine.selection(),
            Some(&Selection::collapsed(Point::new([0, 1, 0], 3)))
        );
    }

    #[test]
    fn test_void_parent_gets_following_paragraph() {
        let image = Node::Element(Element::new(
            ElementKind::from("image"),
            vec![Node::text("")],
        ));
        let mut engine = MemoryEngine::new(vec![image.clone(), para(vec![Node::text("after")])])
            .with_void_kinds([ElementKind::from("image")]);
        engine.select(Selection::collapsed(Point::new([0, 0], 0)));

        insert_link(&mut engine, Some("https://c.example"));

        assert_eq!(
            engine.document(),
            &[
                image,
                para(vec![link("https://c.example", "https://c.example")]),
                para(vec![Node::text("after")]),
            ]
        );
        assert_eq!(
            engine.selection().map(|s| s.focus.path.clone()),
            Some(Path::from([1, 0, 0]))
        );
    }

    #[test]
    fn test_remove_at_explicit_location() {
        let mut engine = MemoryEngine::new(vec![
            para(vec![link("https://x", "x")]),
            para(vec![Node::text("elsewhere")]),
        ]);
        engine.select(Selection::collapsed(Point::new([1, 0], 2)));

        remove_link(
            &mut engine,
            Some(Selection::collapsed(Point::new([0, 0, 0], 1))),
        );
        assert_eq!(engine.document()[0], para(vec![Node::text("x")]));
        assert_eq!(
            engine.selection(),
            Some(&Selection::collapsed(Point::new([0, 0], 1)))
        );
    }
}
