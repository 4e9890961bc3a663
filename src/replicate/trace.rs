//! Bookkeeping tree mirroring an expression.
//!
//! [`TraceTree::build`] walks an expression depth-first (pre-order) and stores
//! one [`TraceNode`] per expression occurrence in a slot-map arena. Nodes refer
//! to their parent and children by [`NodeKey`]; nothing is linked by address.
//!
//! Each node owns an empty fragment slot. Replication fills it exactly once
//! with the rebuilt expression for that node.

use std::cell::OnceCell;
use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use slotmap::SlotMap;

use super::Limits;
use super::error::ReplicateError;
use super::path::ExprPath;
use crate::Expr;

slotmap::new_key_type! {
    /// Key of a node inside a [`TraceTree`].
    pub struct NodeKey;
}

/// One occurrence of an expression node.
#[derive(Debug)]
pub struct TraceNode<'e> {
    expr: &'e Expr,
    path: ExprPath,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
    fragment: OnceCell<Arc<Expr>>,
}

impl<'e> TraceNode<'e> {
    fn new(expr: &'e Expr, path: ExprPath, parent: Option<NodeKey>) -> Self {
        Self {
            expr,
            path,
            parent,
            children: Vec::new(),
            fragment: OnceCell::new(),
        }
    }

    #[must_use]
    pub const fn expr(&self) -> &'e Expr {
        self.expr
    }

    #[must_use]
    pub const fn path(&self) -> &ExprPath {
        &self.path
    }

    #[must_use]
    pub const fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The rebuilt expression, once set.
    #[must_use]
    pub fn fragment(&self) -> Option<&Arc<Expr>> {
        self.fragment.get()
    }

    /// Store the rebuilt expression. A fragment is never overwritten.
    pub(crate) fn set_fragment(&self, rebuilt: Arc<Expr>) -> Result<(), ReplicateError> {
        self.fragment.set(rebuilt).map_err(|_| {
            ReplicateError::Internal(format!("fragment at {} was already set", self.path))
        })
    }
}

/// Arena of [`TraceNode`]s for one expression.
#[derive(Debug)]
pub struct TraceTree<'e> {
    nodes: SlotMap<NodeKey, TraceNode<'e>>,
    order: Vec<NodeKey>,
    root: NodeKey,
}

impl<'e> TraceTree<'e> {
    /// Mirror `root` into a new tree.
    ///
    /// Stack-safe: uses an explicit stack, not recursion.
    ///
    /// # Errors
    /// Returns `MaxDepthExceeded` or `MaxNodesExceeded` when the expression is
    /// larger than `limits` allow.
    pub fn build(root: &'e Expr, limits: Limits) -> Result<Self, ReplicateError> {
        let mut nodes = SlotMap::with_key();
        let root_key = nodes.insert(TraceNode::new(root, ExprPath::root(), None));
        let mut order = Vec::new();
        let mut stack = vec![root_key];

        while let Some(key) = stack.pop() {
            order.push(key);
            let node = &nodes[key];
            let expr = node.expr;
            if node.path.depth() > limits.max_depth {
                return Err(ReplicateError::MaxDepthExceeded {
                    limit: limits.max_depth,
                });
            }
            let path = node.path.clone();

            let mut children = Vec::with_capacity(expr.args().len());
            for (i, arg) in expr.args().iter().enumerate() {
                if nodes.len() >= limits.max_nodes {
                    return Err(ReplicateError::MaxNodesExceeded {
                        limit: limits.max_nodes,
                    });
                }
                children.push(nodes.insert(TraceNode::new(arg, path.child(i), Some(key))));
            }
            // Reverse so the first child is popped (visited) first
            stack.extend(children.iter().rev().copied());
            nodes[key].children = children;
        }

        Ok(Self {
            nodes,
            order,
            root: root_key,
        })
    }

    #[must_use]
    pub const fn root(&self) -> NodeKey {
        self.root
    }

    #[must_use]
    pub fn get(&self, key: NodeKey) -> Option<&TraceNode<'e>> {
        self.nodes.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree holds at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in depth-first pre-order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeKey, &TraceNode<'e>)> + '_ {
        self.order.iter().map(|&k| (k, &self.nodes[k]))
    }

    /// Keys of childless nodes, in pre-order.
    pub fn leaves(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.iter()
            .filter(|(_, node)| node.is_leaf())
            .map(|(key, _)| key)
    }

    /// Display adapter printing one node with its parent and child positions.
    #[must_use]
    pub fn display_node(&self, key: NodeKey) -> NodeDisplay<'_, 'e> {
        NodeDisplay { tree: self, key }
    }

    /// Consume the tree, returning the root's fragment if it was set.
    pub(crate) fn into_root_fragment(mut self) -> Option<Arc<Expr>> {
        self.nodes
            .remove(self.root)
            .and_then(|node| node.fragment.into_inner())
    }
}

impl<'e> Index<NodeKey> for TraceTree<'e> {
    type Output = TraceNode<'e>;

    fn index(&self, key: NodeKey) -> &Self::Output {
        &self.nodes[key]
    }
}

/// See [`TraceTree::display_node`].
pub struct NodeDisplay<'t, 'e> {
    tree: &'t TraceTree<'e>,
    key: NodeKey,
}

impl fmt::Display for NodeDisplay<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(node) = self.tree.get(self.key) else {
            return f.write_str("Node <removed>");
        };
        let marker = if node.fragment().is_some() { "*" } else { "" };
        let name = node
            .expr
            .constructor()
            .map_or_else(|| node.expr.kind_name(), |c| c.name);
        write!(f, "Node{marker} {} [{}]: n:{name}, p:", node.path, node.expr)?;
        match node.parent.and_then(|p| self.tree.get(p)) {
            Some(parent) => write!(f, "{}", parent.path)?,
            None => f.write_str("None")?,
        }
        f.write_str(", c:[")?;
        for (i, child) in node.children.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", self.tree[*child].path)?;
        }
        f.write_str("]")
    }
}
