//! HTML export.
//!
//! Produces a fragment only: no doctype, no head, no wrapper around the
//! document. Unknown element kinds render their children unwrapped.

use crate::node::{Element, ElementKind, Node, Text};

/// Render the whole document, top-level nodes concatenated with no separator.
pub fn serialize_document(nodes: &[Node]) -> String {
    let mut html = String::new();
    for node in nodes {
        render_node(&mut html, node);
    }
    html
}

/// Render one node and its descendants.
pub fn render(node: &Node) -> String {
    let mut html = String::new();
    render_node(&mut html, node);
    html
}

fn render_node(html: &mut String, node: &Node) {
    match node {
        Node::Text(text) => render_text(html, text),
        Node::Element(element) => render_element(html, element),
    }
}

/// Marks nest with bold innermost and strikethrough outermost.
fn render_text(html: &mut String, text: &Text) {
    let marks = &text.marks;
    if marks.strikethrough {
        html.push_str("<s>");
    }
    if marks.underline {
        html.push_str("<u>");
    }
    if marks.italic {
        html.push_str("<i>");
    }
    if marks.bold {
        html.push_str("<b>");
    }
    escape_html(html, &text.text);
    if marks.bold {
        html.push_str("</b>");
    }
    if marks.italic {
        html.push_str("</i>");
    }
    if marks.underline {
        html.push_str("</u>");
    }
    if marks.strikethrough {
        html.push_str("</s>");
    }
}

fn render_element(html: &mut String, element: &Element) {
    match &element.kind {
        ElementKind::Paragraph => {
            html.push_str("<p>");
            render_children(html, element);
            html.push_str("</p>");
        }
        ElementKind::Code => {
            html.push_str("<pre><code>");
            render_children(html, element);
            html.push_str("</code></pre>");
        }
        ElementKind::Blockquote => {
            html.push_str("<blockquote>");
            render_children(html, element);
            html.push_str("</blockquote>");
        }
        kind @ (ElementKind::AlignLeft | ElementKind::AlignCenter | ElementKind::AlignRight) => {
            let align = kind.alignment().map(|a| a.as_str()).unwrap_or("left");
            html.push_str("<p style=\"text-align: ");
            html.push_str(align);
            html.push_str("\">");
            render_children(html, element);
            html.push_str("</p>");
        }
        ElementKind::Link => {
            html.push_str("<a href=\"");
            escape_html(html, element.url.as_deref().unwrap_or_default());
            html.push_str("\">");
            render_children(html, element);
            html.push_str("</a>");
        }
        ElementKind::Other(kind) => {
            tracing::trace!(%kind, "rendering unknown element kind unwrapped");
            render_children(html, element);
        }
    }
}

fn render_children(html: &mut String, element: &Element) {
    for child in &element.children {
        render_node(html, child);
    }
}

/// Append `text` to `out` with `& < > " '` escaped.
pub fn escape_html(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Mark;

    fn unescape(html: &str) -> String {
        html.replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&amp;", "&")
    }

    #[test]
    fn test_all_marks_nest_in_fixed_order() {
        let text = Text::new("x")
            .with_mark(Mark::Strikethrough)
            .with_mark(Mark::Italic)
            .with_mark(Mark::Bold)
            .with_mark(Mark::Underline);
        insta::assert_snapshot!(render(&Node::Text(text)), @"<s><u><i><b>x</b></i></u></s>");
    }

    #[test]
    fn test_code_block_escapes_content() {
        let code = Element::new(ElementKind::Code, vec![Node::text("a < b")]);
        insta::assert_snapshot!(render(&Node::Element(code)), @"<pre><code>a &lt; b</code></pre>");
    }

    #[test]
    fn test_escape_round_trips() {
        let samples = ["&", "<tag>", "\"quoted\"", "it's", "a & b < c > d \"e\" 'f'", "&amp;"];
        for sample in samples {
            let html = render(&Node::text(sample));
            assert!(!html.contains('<') || sample.is_empty(), "{html}");
            assert!(!html.contains('"') && !html.contains('\''), "{html}");
            assert_eq!(unescape(&html), sample);
        }
    }

    #[test]
    fn test_element_kinds() {
        let cases = [
            (ElementKind::Paragraph, "<p>t</p>"),
            (ElementKind::Blockquote, "<blockquote>t</blockquote>"),
            (ElementKind::AlignLeft, "<p style=\"text-align: left\">t</p>"),
            (ElementKind::AlignCenter, "<p style=\"text-align: center\">t</p>"),
            (ElementKind::AlignRight, "<p style=\"text-align: right\">t</p>"),
        ];
        for (kind, expected) in cases {
            let element = Element::new(kind, vec![Node::text("t")]);
            assert_eq!(render(&Node::Element(element)), expected);
        }
    }

    #[test]
    fn test_link_href_is_escaped() {
        let link = Element::link("https://x.example/?a=1&b=\"2\"", vec![Node::text("go")]);
        insta::assert_snapshot!(
            render(&Node::Element(link)),
            @r#"<a href="https://x.example/?a=1&amp;b=&quot;2&quot;">go</a>"#
        );
    }

    #[test]
    fn test_unknown_kind_renders_children_unwrapped() {
        let element = Element::new(
            ElementKind::from("heading-one"),
            vec![
                Node::text("a"),
                Node::Text(Text::new("b").with_mark(Mark::Bold)),
            ],
        );
        assert_eq!(render(&Node::Element(element)), "a<b>b</b>");
    }

    #[test]
    fn test_document_is_a_bare_fragment() {
        let doc = vec![
            Node::Element(Element::paragraph(vec![
                Node::text("Hi "),
                Node::Element(Element::link("https://a", vec![Node::text("there")])),
            ])),
            Node::Element(Element::new(ElementKind::Code, vec![Node::text("x")])),
        ];
        insta::assert_snapshot!(
            serialize_document(&doc),
            @r#"<p>Hi <a href="https://a">there</a></p><pre><code>x</code></pre>"#
        );
        assert_eq!(serialize_document(&[]), "");
    }
}
