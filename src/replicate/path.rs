//! Positions inside an expression tree.

use std::fmt;

/// A path from the root to a node: one child index per level.
///
/// The root's path is empty. In `f(x, y**2)` the path to `2` is `1.1`
/// (second argument of `f`, then the exponent of the power).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprPath(Vec<usize>);

impl ExprPath {
    #[must_use]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// Path of the `index`-th child of this node.
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        let mut indices = Vec::with_capacity(self.0.len() + 1);
        indices.extend_from_slice(&self.0);
        indices.push(index);
        Self(indices)
    }

    /// Path of the parent node, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.0
            .split_last()
            .map(|(_, init)| Self(init.to_vec()))
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of levels below the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Check if `self` is a prefix of `other` (or equal)
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        other.0.starts_with(&self.0)
    }
}

impl From<Vec<usize>> for ExprPath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for ExprPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("root");
        }
        for (i, idx) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{idx}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_display() {
        assert_eq!(ExprPath::root().to_string(), "root");
        assert_eq!(ExprPath::from(vec![0, 1, 2]).to_string(), "0.1.2");
    }

    #[test]
    fn test_child_and_parent() {
        let p = ExprPath::root().child(1).child(0);
        assert_eq!(p.indices(), &[1, 0]);
        assert_eq!(p.depth(), 2);
        assert_eq!(p.parent(), Some(ExprPath::from(vec![1])));
        assert_eq!(ExprPath::root().parent(), None);
    }

    #[test]
    fn test_prefix() {
        let path = ExprPath::from(vec![0, 1, 2]);
        assert!(ExprPath::from(vec![0, 1]).is_prefix_of(&path));
        assert!(path.is_prefix_of(&path));
        assert!(ExprPath::root().is_prefix_of(&path));
        assert!(!ExprPath::from(vec![0, 2]).is_prefix_of(&path));
        assert!(!path.is_prefix_of(&ExprPath::from(vec![0, 1])));
    }
}
