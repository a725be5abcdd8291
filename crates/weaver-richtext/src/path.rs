//! Positions in the document tree: paths, points and selections.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

/// Child indices from the root down to a node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Path(pub Vec<usize>);

impl Path {
    pub fn new(indices: impl Into<Vec<usize>>) -> Self {
        Self(indices.into())
    }

    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn parent(&self) -> Option<Path> {
        if self.0.is_empty() {
            return None;
        }
        Some(Path(self.0[..self.0.len() - 1].to_vec()))
    }

    pub fn child(&self, index: usize) -> Path {
        let mut indices = self.0.clone();
        indices.push(index);
        Path(indices)
    }

    /// The path of the following sibling.
    pub fn next(&self) -> Option<Path> {
        let (last, rest) = self.0.split_last()?;
        let mut indices = rest.to_vec();
        indices.push(last + 1);
        Some(Path(indices))
    }

    /// Index of this node within its parent.
    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// True if `self` is a strict prefix of `other`.
    pub fn is_ancestor_of(&self, other: &Path) -> bool {
        self.0.len() < other.0.len() && other.0.starts_with(&self.0)
    }
}

impl Deref for Path {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for Path {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl<const N: usize> From<[usize; N]> for Path {
    fn from(indices: [usize; N]) -> Self {
        Self(indices.to_vec())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for index in &self.0 {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{index}")?;
            first = false;
        }
        Ok(())
    }
}

/// A position inside a text node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Point {
    /// Path of a text node.
    pub path: Path,
    /// Character offset in the text (NOT byte offset!)
    pub offset: usize,
}

impl Point {
    pub fn new(path: impl Into<Path>, offset: usize) -> Self {
        Self {
            path: path.into(),
            offset,
        }
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.path
            .cmp(&other.path)
            .then(self.offset.cmp(&other.offset))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path, self.offset)
    }
}

/// Error parsing a point from its `path:offset` form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid point `{0}`, expected `path:offset` such as `0.1:4`")]
pub struct ParsePointError(pub String);

impl FromStr for Point {
    type Err = ParsePointError;

    /// Parses `0.1:4` (text node `[0, 1]`, offset 4).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePointError(s.to_string());
        let (path, offset) = s.split_once(':').ok_or_else(err)?;
        let offset = offset.trim().parse().map_err(|_| err())?;
        let indices = path
            .split('.')
            .map(|part| part.trim().parse::<usize>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| err())?;
        if indices.is_empty() {
            return Err(err());
        }
        Ok(Point::new(indices, offset))
    }
}

/// Text selection with anchor and focus points.
///
/// The anchor is where the selection started, the focus is where the cursor
/// is now. They may be in any order - use `start()` and `end()` for ordered
/// bounds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selection {
    pub anchor: Point,
    pub focus: Point,
}

impl Selection {
    pub fn new(anchor: Point, focus: Point) -> Self {
        Self { anchor, focus }
    }

    /// A collapsed selection (cursor position).
    pub fn collapsed(point: Point) -> Self {
        Self {
            anchor: point.clone(),
            focus: point,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    pub fn is_backwards(&self) -> bool {
        self.focus < self.anchor
    }

    pub fn start(&self) -> &Point {
        if self.is_backwards() {
            &self.focus
        } else {
            &self.anchor
        }
    }

    pub fn end(&self) -> &Point {
        if self.is_backwards() {
            &self.anchor
        } else {
            &self.focus
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_relations() {
        let p = Path::from([0, 2]);
        assert_eq!(p.parent(), Some(Path::from([0])));
        assert_eq!(p.next(), Some(Path::from([0, 3])));
        assert_eq!(p.child(1), Path::from([0, 2, 1]));
        assert!(Path::from([0]).is_ancestor_of(&p));
        assert!(!p.is_ancestor_of(&p));
        assert!(Path::root().next().is_none());
    }

    #[test]
    fn test_path_order_is_document_order() {
        assert!(Path::from([0]) < Path::from([0, 0]));
        assert!(Path::from([0, 5]) < Path::from([1]));
    }

    #[test]
    fn test_selection_bounds() {
        let sel = Selection::new(Point::new([0, 0], 5), Point::new([0, 0], 2));
        assert!(sel.is_backwards());
        assert_eq!(sel.start().offset, 2);
        assert_eq!(sel.end().offset, 5);
        assert!(!sel.is_collapsed());

        let sel = Selection::collapsed(Point::new([1, 0], 3));
        assert!(sel.is_collapsed());
        assert_eq!(sel.start(), sel.end());
    }

    #[test]
    fn test_parse_point() {
        let point: Point = "0.1:4".parse().unwrap();
        assert_eq!(point, Point::new([0, 1], 4));
        assert_eq!(point.to_string(), "0.1:4");
        assert!("0.1".parse::<Point>().is_err());
        assert!("a:1".parse::<Point>().is_err());
    }
}
