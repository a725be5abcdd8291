//! The editing engine seen by the formatting layer.
//!
//! `Engine` covers node queries over the selection, attribute rewrites,
//! wrap/unwrap, insertion and a void predicate. Anything that owns a tree and
//! a selection can implement it. `MemoryEngine` is the in-process
//! implementation used by the editor.

use std::collections::{BTreeSet, HashSet};

use crate::node::{Element, ElementKind, Mark, Node, Text, default_document};
use crate::path::{Path, Point, Selection};

/// Attributes written by [`Engine::set_nodes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetAttrs {
    /// Set or clear a mark on the selected text runs.
    Mark { mark: Mark, value: bool },
    /// Rewrite the kind of the block enclosing each selected run.
    Kind(ElementKind),
}

/// Tree and selection primitives the formatting commands are written against.
pub trait Engine {
    /// Top-level nodes of the document.
    fn document(&self) -> &[Node];

    fn selection(&self) -> Option<&Selection>;

    fn select(&mut self, selection: Selection);

    fn deselect(&mut self);

    /// Collapse the selection onto its end point.
    fn collapse_to_end(&mut self);

    /// Every node intersecting the selection that matches `predicate`,
    /// ancestors included, in document order.
    ///
    /// Returns nothing when there is no selection.
    fn find_nodes(&self, predicate: &dyn Fn(&Node) -> bool) -> Vec<(Path, &Node)>;

    /// Apply `attrs` across the selection.
    ///
    /// Marks go to text runs only; with `split` the runs are first cut at the
    /// selection edges so exactly the selected characters change. Kinds go to
    /// the nearest block element enclosing each selected run.
    fn set_nodes(&mut self, attrs: SetAttrs, split: bool);

    /// Wrap the selected content of each block in a copy of `wrapper`.
    ///
    /// `wrapper` is a template: its children are replaced by the wrapped nodes.
    fn wrap_nodes(&mut self, wrapper: Element, split: bool);

    /// Replace every element matching `predicate` that intersects the
    /// selection with its children. `at` is selected first when given.
    fn unwrap_nodes(&mut self, predicate: &dyn Fn(&Element) -> bool, at: Option<Selection>);

    /// Insert `node` at `at`, or at the selection when `at` is `None`, or at
    /// the end of the document when there is no selection either. With
    /// `select` the cursor moves to the end of the inserted node.
    fn insert_nodes(&mut self, node: Node, at: Option<Path>, select: bool);

    /// Insert literal text at the cursor, replacing any selected content.
    fn insert_text(&mut self, text: &str);

    /// The element containing the node at `path`.
    fn parent(&self, path: &Path) -> Option<(Path, &Element)>;

    /// Whether the engine treats `element` as a non-editable leaf.
    fn is_void(&self, element: &Element) -> bool;
}

/// In-memory document tree with a selection.
#[derive(Debug, Clone)]
pub struct MemoryEngine {
    children: Vec<Node>,
    selection: Option<Selection>,
    void_kinds: HashSet<ElementKind>,
    version: u64,
}

impl Default for MemoryEngine {
    fn default() -> Self {
        Self::new(default_document())
    }
}

/// Character range of one text run covered by a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LeafRange {
    path: Path,
    start: usize,
    end: usize,
}

/// A point expressed relative to its enclosing block, which survives
/// splitting, merging and wrapping of the runs inside that block.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BlockPoint {
    block: Path,
    offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bias {
    Backward,
    Forward,
}

#[derive(Debug, Clone)]
struct SavedSelection {
    start: BlockPoint,
    end: BlockPoint,
    collapsed: bool,
    backwards: bool,
}

impl MemoryEngine {
    /// Create an engine over `children`, normalizing the tree.
    pub fn new(children: Vec<Node>) -> Self {
        let mut engine = Self {
            children,
            selection: None,
            void_kinds: HashSet::new(),
            version: 0,
        };
        normalize_children(&mut engine.children, true);
        engine
    }

    /// Treat elements of these kinds as void.
    pub fn with_void_kinds(mut self, kinds: impl IntoIterator<Item = ElementKind>) -> Self {
        self.void_kinds.extend(kinds);
        self
    }

    /// Incremented by every change to the tree. Selection changes do not count.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn node(&self, path: &Path) -> Option<&Node> {
        node_at(&self.children, path)
    }

    pub fn into_document(self) -> Vec<Node> {
        self.children
    }

    /// Remove the selected content, collapsing the selection to its start.
    ///
    /// When the selection spans sibling blocks, the remainder of the last one
    /// is joined onto the first.
    pub fn delete_fragment(&mut self) {
        let Some(selection) = self.selection.clone() else {
            return;
        };
        if selection.is_collapsed() {
            return;
        }
        let Some(saved_start) = to_block_point(&self.children, selection.start()) else {
            return;
        };
        let ranges = self.covered(&selection);
        for range in ranges.iter().rev() {
            if let Some(Node::Text(text)) = node_at_mut(&mut self.children, &range.path) {
                let from = char_to_byte(&text.text, range.start);
                let to = char_to_byte(&text.text, range.end);
                text.text.replace_range(from..to, "");
            }
        }

        let start_block = saved_start.block.clone();
        let end_block = block_of(&self.children, &selection.end().path);
        if start_block != end_block && start_block.parent() == end_block.parent() {
            if let (Some(parent), Some(lo), Some(hi)) =
                (start_block.parent(), start_block.last(), end_block.last())
            {
                if let Some(siblings) = children_at_mut(&mut self.children, &parent) {
                    if lo < hi && hi < siblings.len() {
                        let removed: Vec<Node> = siblings.drain(lo + 1..=hi).collect();
                        let tail = match removed.into_iter().last() {
                            Some(Node::Element(e)) => e.children,
                            _ => Vec::new(),
                        };
                        if let Some(Node::Element(first)) = siblings.get_mut(lo) {
                            first.children.extend(tail);
                        }
                    }
                }
            }
        }

        self.selection = from_block_point(&self.children, &saved_start, Bias::Backward)
            .map(Selection::collapsed);
        self.version += 1;
        self.commit();
    }

    // === Selection bookkeeping ===

    fn save_selection(&self) -> Option<SavedSelection> {
        let selection = self.selection.as_ref()?;
        Some(SavedSelection {
            start: to_block_point(&self.children, selection.start())?,
            end: to_block_point(&self.children, selection.end())?,
            collapsed: selection.is_collapsed(),
            backwards: selection.is_backwards(),
        })
    }

    fn restore_selection(&mut self, saved: Option<SavedSelection>) {
        self.selection = saved.and_then(|saved| {
            if saved.collapsed {
                let point = from_block_point(&self.children, &saved.start, Bias::Backward)?;
                return Some(Selection::collapsed(point));
            }
            let start = from_block_point(&self.children, &saved.start, Bias::Forward)?;
            let end = from_block_point(&self.children, &saved.end, Bias::Backward)?;
            Some(if saved.backwards {
                Selection::new(end, start)
            } else {
                Selection::new(start, end)
            })
        });
    }

    /// Normalize the tree, carrying the current selection across.
    fn commit(&mut self) {
        let saved = self.save_selection();
        normalize_children(&mut self.children, true);
        self.restore_selection(saved);
    }

    // === Selection coverage ===

    /// Every text run between the selection edges, with the covered range.
    fn span(&self, selection: &Selection) -> Vec<LeafRange> {
        let leaves = leaves_under(&self.children, &Path::root());
        let (start, end) = (selection.start(), selection.end());
        let Some(first) = leaves.iter().position(|p| *p == start.path) else {
            return Vec::new();
        };
        let Some(last) = leaves.iter().position(|p| *p == end.path) else {
            return Vec::new();
        };

        leaves[first..=last]
            .iter()
            .filter_map(|path| {
                let len = node_at(&self.children, path)?.as_text()?.len_chars();
                let from = if *path == start.path {
                    start.offset.min(len)
                } else {
                    0
                };
                let to = if *path == end.path {
                    end.offset.min(len)
                } else {
                    len
                };
                Some(LeafRange {
                    path: path.clone(),
                    start: from,
                    end: to.max(from),
                })
            })
            .collect()
    }

    /// The runs a command acts on.
    ///
    /// An expanded selection drops runs it only touches at an edge, so a
    /// selection starting at the very end of a run does not pick that run up.
    fn covered(&self, selection: &Selection) -> Vec<LeafRange> {
        let span = self.span(selection);
        if selection.is_collapsed() {
            return span;
        }
        let trimmed: Vec<LeafRange> = span
            .iter()
            .filter(|r| r.start < r.end)
            .cloned()
            .collect();
        if trimmed.is_empty() { span } else { trimmed }
    }

    /// Cut runs at the selection edges and return the paths of the selected
    /// runs afterwards. The selection is moved onto the cut runs.
    fn split_selection(&mut self, selection: &Selection) -> Vec<Path> {
        let ranges = self.covered(selection);
        if selection.is_collapsed() {
            return ranges.into_iter().map(|r| r.path).collect();
        }

        let saved = self.save_selection();
        for range in ranges.iter().rev() {
            split_leaf(&mut self.children, &range.path, range.start, range.end);
        }
        self.restore_selection(saved);

        match self.selection.clone() {
            Some(selection) => self
                .covered(&selection)
                .into_iter()
                .map(|r| r.path)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Distinct blocks enclosing the covered runs, in document order.
    fn selected_blocks(&self, selection: &Selection) -> Vec<Path> {
        let mut blocks: Vec<Path> = Vec::new();
        for range in self.covered(selection) {
            let block = block_of(&self.children, &range.path);
            if !blocks.contains(&block) {
                blocks.push(block);
            }
        }
        blocks
    }

    fn end_of(&self, path: &Path) -> Option<Point> {
        let leaf = leaves_under(&self.children, path).pop()?;
        let len = node_at(&self.children, &leaf)?.as_text()?.len_chars();
        Some(Point::new(leaf, len))
    }
}

impl Engine for MemoryEngine {
    fn document(&self) -> &[Node] {
        &self.children
    }

    fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    fn select(&mut self, selection: Selection) {
        self.selection = Some(selection);
    }

    fn deselect(&mut self) {
        self.selection = None;
    }

    fn collapse_to_end(&mut self) {
        if let Some(end) = self.selection.as_ref().map(|s| s.end().clone()) {
            self.selection = Some(Selection::collapsed(end));
        }
    }

    fn find_nodes(&self, predicate: &dyn Fn(&Node) -> bool) -> Vec<(Path, &Node)> {
        let Some(selection) = &self.selection else {
            return Vec::new();
        };
        let mut paths = BTreeSet::new();
        for range in self.covered(selection) {
            for depth in 1..=range.path.len() {
                paths.insert(Path::new(&range.path[..depth]));
            }
        }
        paths
            .into_iter()
            .filter_map(|path| {
                let node = node_at(&self.children, &path)?;
                predicate(node).then_some((path, node))
            })
            .collect()
    }

    fn set_nodes(&mut self, attrs: SetAttrs, split: bool) {
        let Some(selection) = self.selection.clone() else {
            return;
        };
        match attrs {
            SetAttrs::Mark { mark, value } => {
                let targets = if split {
                    self.split_selection(&selection)
                } else {
                    self.covered(&selection).into_iter().map(|r| r.path).collect()
                };
                if targets.is_empty() {
                    return;
                }
                tracing::trace!(%mark, value, runs = targets.len(), "set mark");
                for path in targets {
                    if let Some(Node::Text(text)) = node_at_mut(&mut self.children, &path) {
                        text.marks.set(mark, value);
                    }
                }
            }
            SetAttrs::Kind(kind) => {
                let blocks = self.selected_blocks(&selection);
                if blocks.is_empty() {
                    return;
                }
                tracing::trace!(%kind, blocks = blocks.len(), "set block kind");
                for path in blocks {
                    if let Some(Node::Element(element)) = node_at_mut(&mut self.children, &path) {
                        element.kind = kind.clone();
                    }
                }
            }
        }
        self.version += 1;
        self.commit();
    }

    fn wrap_nodes(&mut self, wrapper: Element, split: bool) {
        let Some(selection) = self.selection.clone() else {
            return;
        };
        if selection.is_collapsed() {
            return;
        }
        let leaves = if split {
            self.split_selection(&selection)
        } else {
            self.covered(&selection).into_iter().map(|r| r.path).collect()
        };

        // Child index ranges per block, collected before any path moves.
        let mut groups: Vec<(Path, usize, usize)> = Vec::new();
        for leaf in leaves {
            let block = block_of(&self.children, &leaf);
            let Some(&index) = leaf.get(block.len()) else {
                continue;
            };
            if let Some((last, lo, hi)) = groups.last_mut() {
                if *last == block {
                    *lo = (*lo).min(index);
                    *hi = (*hi).max(index);
                    continue;
                }
            }
            groups.push((block, index, index));
        }
        if groups.is_empty() {
            return;
        }

        let saved = self.save_selection();
        for (block, lo, hi) in groups.into_iter().rev() {
            let Some(children) = children_at_mut(&mut self.children, &block) else {
                continue;
            };
            if hi >= children.len() {
                continue;
            }
            let mut inner = Vec::new();
            for node in children.drain(lo..=hi) {
                match node {
                    // No nesting: an existing wrapper of the same kind dissolves
                    // into the new one.
                    Node::Element(e) if e.kind == wrapper.kind => inner.extend(e.children),
                    other => inner.push(other),
                }
            }
            let mut element = wrapper.clone();
            element.children = inner;
            children.insert(lo, Node::Element(element));
        }
        self.restore_selection(saved);
        tracing::trace!(kind = %wrapper.kind, "wrapped selection");
        self.version += 1;
        self.commit();
    }

    fn unwrap_nodes(&mut self, predicate: &dyn Fn(&Element) -> bool, at: Option<Selection>) {
        if let Some(at) = at {
            self.select(at);
        }
        let targets: Vec<Path> = self
            .find_nodes(&|node: &Node| matches!(node, Node::Element(e) if predicate(e)))
            .into_iter()
            .map(|(path, _)| path)
            .collect();
        if targets.is_empty() {
            return;
        }

        let saved = self.save_selection();
        // Later and deeper paths first keeps the earlier ones valid.
        for path in targets.iter().rev() {
            let (Some(parent), Some(index)) = (path.parent(), path.last()) else {
                continue;
            };
            let Some(siblings) = children_at_mut(&mut self.children, &parent) else {
                continue;
            };
            if index >= siblings.len() {
                continue;
            }
            if let Node::Element(element) = siblings.remove(index) {
                siblings.splice(index..index, element.children);
            }
        }
        self.restore_selection(saved);
        self.version += 1;
        self.commit();
    }

    fn insert_nodes(&mut self, node: Node, at: Option<Path>, select: bool) {
        if at.is_none() && self.selection.as_ref().is_some_and(|s| !s.is_collapsed()) {
            self.delete_fragment();
        }

        let inserted_at = match at {
            Some(path) => {
                let (Some(parent), Some(index)) = (path.parent(), path.last()) else {
                    return;
                };
                let Some(siblings) = children_at_mut(&mut self.children, &parent) else {
                    return;
                };
                let index = index.min(siblings.len());
                siblings.insert(index, node);
                parent.child(index)
            }
            None => match self.selection.clone() {
                None => {
                    self.children.push(node);
                    Path::new([self.children.len() - 1])
                }
                Some(selection) => {
                    let cursor = selection.start().clone();
                    let is_block = matches!(&node, Node::Element(e) if !e.is_inline());
                    if is_block {
                        let block = block_of(&self.children, &cursor.path);
                        let (Some(parent), Some(index)) = (block.parent(), block.last()) else {
                            return;
                        };
                        let Some(siblings) = children_at_mut(&mut self.children, &parent) else {
                            return;
                        };
                        if index >= siblings.len() {
                            return;
                        }
                        siblings.insert(index + 1, node);
                        parent.child(index + 1)
                    } else {
                        match insert_at_point(&mut self.children, &cursor, node) {
                            Some(path) => path,
                            None => return,
                        }
                    }
                }
            },
        };

        if select {
            self.selection = self.end_of(&inserted_at).map(Selection::collapsed);
        } else if let Some(selection) = self.selection.take() {
            self.selection = Some(Selection::new(
                shift_past(selection.anchor, &inserted_at),
                shift_past(selection.focus, &inserted_at),
            ));
        }
        self.version += 1;
        self.commit();
    }

    fn insert_text(&mut self, text: &str) {
        if self.selection.as_ref().is_some_and(|s| !s.is_collapsed()) {
            self.delete_fragment();
        }
        let Some(cursor) = self.selection.as_ref().map(|s| s.start().clone()) else {
            return;
        };
        let Some(Node::Text(run)) = node_at_mut(&mut self.children, &cursor.path) else {
            return;
        };
        let offset = cursor.offset.min(run.len_chars());
        let at = char_to_byte(&run.text, offset);
        run.text.insert_str(at, text);
        self.selection = Some(Selection::collapsed(Point::new(
            cursor.path,
            offset + text.chars().count(),
        )));
        self.version += 1;
        self.commit();
    }

    fn parent(&self, path: &Path) -> Option<(Path, &Element)> {
        let parent = path.parent()?;
        if parent.is_empty() {
            return None;
        }
        let element = node_at(&self.children, &parent)?.as_element()?;
        Some((parent, element))
    }

    fn is_void(&self, element: &Element) -> bool {
        self.void_kinds.contains(&element.kind)
    }
}

// === Tree helpers ===

fn node_at<'a>(nodes: &'a [Node], path: &Path) -> Option<&'a Node> {
    let (first, rest) = path.split_first()?;
    let mut node = nodes.get(*first)?;
    for index in rest {
        node = node.as_element()?.children.get(*index)?;
    }
    Some(node)
}

fn node_at_mut<'a>(nodes: &'a mut [Node], path: &Path) -> Option<&'a mut Node> {
    let (first, rest) = path.split_first()?;
    let mut node = nodes.get_mut(*first)?;
    for index in rest {
        node = node.as_element_mut()?.children.get_mut(*index)?;
    }
    Some(node)
}

/// The child list of the node at `parent`; the root list for the empty path.
fn children_at_mut<'a>(nodes: &'a mut Vec<Node>, parent: &Path) -> Option<&'a mut Vec<Node>> {
    if parent.is_empty() {
        return Some(nodes);
    }
    Some(&mut node_at_mut(nodes, parent)?.as_element_mut()?.children)
}

/// Paths of all text runs under `path` (the whole document for the root), in
/// document order.
fn leaves_under(nodes: &[Node], path: &Path) -> Vec<Path> {
    fn collect(node: &Node, path: Path, out: &mut Vec<Path>) {
        match node {
            Node::Text(_) => out.push(path),
            Node::Element(e) => {
                for (i, child) in e.children.iter().enumerate() {
                    collect(child, path.child(i), out);
                }
            }
        }
    }

    let mut out = Vec::new();
    if path.is_empty() {
        for (i, node) in nodes.iter().enumerate() {
            collect(node, Path::new([i]), &mut out);
        }
    } else if let Some(node) = node_at(nodes, path) {
        collect(node, path.clone(), &mut out);
    }
    out
}

/// The nearest non-inline element enclosing the node at `path`.
fn block_of(nodes: &[Node], path: &Path) -> Path {
    for depth in (1..path.len()).rev() {
        let ancestor = Path::new(&path[..depth]);
        if let Some(Node::Element(e)) = node_at(nodes, &ancestor) {
            if !e.is_inline() {
                return ancestor;
            }
        }
    }
    Path::new(&path[..path.len().min(1)])
}

fn to_block_point(nodes: &[Node], point: &Point) -> Option<BlockPoint> {
    let block = block_of(nodes, &point.path);
    let mut offset = 0;
    for leaf in leaves_under(nodes, &block) {
        let len = node_at(nodes, &leaf)?.as_text()?.len_chars();
        if leaf == point.path {
            return Some(BlockPoint {
                block,
                offset: offset + point.offset.min(len),
            });
        }
        offset += len;
    }
    None
}

fn from_block_point(nodes: &[Node], point: &BlockPoint, bias: Bias) -> Option<Point> {
    let leaves = leaves_under(nodes, &point.block);
    let mut acc = 0;
    let mut last = None;
    for leaf in leaves {
        let len = node_at(nodes, &leaf)?.as_text()?.len_chars();
        let hit = match bias {
            Bias::Backward => point.offset <= acc + len,
            Bias::Forward => point.offset < acc + len,
        };
        if hit {
            return Some(Point::new(leaf, point.offset.saturating_sub(acc)));
        }
        acc += len;
        last = Some((leaf, len));
    }
    last.map(|(leaf, len)| Point::new(leaf, len))
}

fn char_to_byte(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Replace the run at `path` with its pieces before, inside and after
/// `start..end`, dropping empty outer pieces.
fn split_leaf(nodes: &mut Vec<Node>, path: &Path, start: usize, end: usize) {
    let (Some(parent), Some(index)) = (path.parent(), path.last()) else {
        return;
    };
    let Some(siblings) = children_at_mut(nodes, &parent) else {
        return;
    };
    let Some(Node::Text(run)) = siblings.get(index) else {
        return;
    };
    let (from, to) = (char_to_byte(&run.text, start), char_to_byte(&run.text, end));
    let piece = |s: &str| {
        Node::Text(Text {
            text: s.to_string(),
            marks: run.marks.clone(),
        })
    };
    let mut pieces = Vec::with_capacity(3);
    if from > 0 {
        pieces.push(piece(&run.text[..from]));
    }
    pieces.push(piece(&run.text[from..to]));
    if to < run.text.len() {
        pieces.push(piece(&run.text[to..]));
    }
    siblings.splice(index..=index, pieces);
}

/// Move `point` past a sibling inserted at `inserted` ahead of it.
fn shift_past(mut point: Point, inserted: &Path) -> Point {
    let depth = inserted.len().saturating_sub(1);
    if point.path.len() > depth
        && point.path[..depth] == inserted[..depth]
        && point.path[depth] >= inserted[depth]
    {
        point.path.0[depth] += 1;
    }
    point
}

/// Insert an inline `node` at `point`, splitting the run there. Returns the
/// path of the inserted node.
fn insert_at_point(nodes: &mut Vec<Node>, point: &Point, node: Node) -> Option<Path> {
    let parent = point.path.parent()?;
    let index = point.path.last()?;
    let siblings = children_at_mut(nodes, &parent)?;
    let Some(Node::Text(run)) = siblings.get(index) else {
        return None;
    };
    let at = char_to_byte(&run.text, point.offset);
    let left = Text {
        text: run.text[..at].to_string(),
        marks: run.marks.clone(),
    };
    let right = Text {
        text: run.text[at..].to_string(),
        marks: run.marks.clone(),
    };
    siblings.splice(
        index..=index,
        [Node::Text(left), node, Node::Text(right)],
    );
    Some(parent.child(index + 1))
}

/// Restore the tree invariants after an edit.
///
/// Childless elements are dropped, root-level runs and inline elements get a
/// paragraph, empty runs next to other content are dropped, equal-marked
/// neighbours are merged, and the root is never left empty.
fn normalize_children(nodes: &mut Vec<Node>, root: bool) {
    if root {
        for node in nodes.iter_mut() {
            let loose = match node {
                Node::Text(_) => true,
                Node::Element(element) => element.is_inline(),
            };
            if loose {
                let run = std::mem::replace(node, Node::text(""));
                *node = Node::Element(Element::paragraph(vec![run]));
            }
        }
    }

    for node in nodes.iter_mut() {
        if let Node::Element(element) = node {
            normalize_children(&mut element.children, false);
        }
    }
    nodes.retain(|n| !matches!(n, Node::Element(e) if e.children.is_empty()));

    let is_empty_run = |n: &Node| matches!(n, Node::Text(t) if t.is_empty());
    if nodes.iter().any(|n| !is_empty_run(n)) {
        nodes.retain(|n| !is_empty_run(n));
    } else {
        nodes.truncate(1);
    }

    let mut merged: Vec<Node> = Vec::with_capacity(nodes.len());
    for node in nodes.drain(..) {
        if let (Some(Node::Text(prev)), Node::Text(next)) = (merged.last_mut(), &node) {
            if prev.marks == next.marks {
                prev.text.push_str(&next.text);
                continue;
            }
        }
        merged.push(node);
    }
    *nodes = merged;

    if root && nodes.is_empty() {
        nodes.push(Node::Element(Element::empty_paragraph()));
    }
}
