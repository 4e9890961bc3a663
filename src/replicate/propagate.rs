//! Bottom-up rebuild of internal nodes.
//!
//! Every internal node waits on a counter of children still missing a
//! fragment. Finished nodes release their parent; a parent whose counter hits
//! zero joins the ready queue. Each node is built exactly once.

use std::collections::VecDeque;
use std::sync::Arc;

use slotmap::SecondaryMap;
use tracing::trace;

use super::error::ReplicateError;
use super::namespace::Namespace;
use super::trace::{NodeKey, TraceTree};
use crate::{Expr, Head};

/// Rebuild all internal nodes of `tree` once its leaves carry fragments.
///
/// Returns the number of nodes built.
///
/// # Errors
/// Constructor errors pass through as `ReplicateError::Construct`.
pub(crate) fn propagate(
    tree: &TraceTree<'_>,
    namespace: &mut Namespace,
) -> Result<usize, ReplicateError> {
    let mut pending: SecondaryMap<NodeKey, usize> = SecondaryMap::with_capacity(tree.len());
    for (key, node) in tree.iter() {
        pending.insert(key, node.children().len());
    }

    let mut ready = VecDeque::new();
    for leaf in tree.leaves() {
        release_parent(tree, leaf, &mut pending, &mut ready)?;
    }

    let mut built = 0;
    while let Some(key) = ready.pop_front() {
        let node = &tree[key];
        let head = node.expr().head().ok_or_else(|| {
            ReplicateError::Internal(format!("internal node at {} has no head", node.path()))
        })?;

        let args = node
            .children()
            .iter()
            .map(|&child| {
                tree[child].fragment().cloned().ok_or_else(|| {
                    ReplicateError::Internal(format!(
                        "child {} of {} was released without a fragment",
                        tree[child].path(),
                        node.path()
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let rebuilt = build_node(&head, args)?;
        let ctor = head.constructor();
        trace!(path = %node.path(), constructor = %ctor, "rebuilt node");
        namespace.record(ctor);
        node.set_fragment(Arc::new(rebuilt))?;
        built += 1;

        release_parent(tree, key, &mut pending, &mut ready)?;
    }

    let root = &tree[tree.root()];
    if root.fragment().is_none() {
        return Err(ReplicateError::Internal(
            "work queue drained before the root was rebuilt".to_owned(),
        ));
    }
    Ok(built)
}

/// Invoke `head` on rebuilt children with evaluation off.
fn build_node(head: &Head, args: Vec<Arc<Expr>>) -> Result<Expr, ReplicateError> {
    head.build(args, false).map_err(ReplicateError::from)
}

fn release_parent(
    tree: &TraceTree<'_>,
    key: NodeKey,
    pending: &mut SecondaryMap<NodeKey, usize>,
    ready: &mut VecDeque<NodeKey>,
) -> Result<(), ReplicateError> {
    let Some(parent) = tree[key].parent() else {
        return Ok(());
    };
    let count = pending
        .get_mut(parent)
        .ok_or_else(|| ReplicateError::Internal(format!("no counter for parent of {}", tree[key].path())))?;
    *count = count
        .checked_sub(1)
        .ok_or_else(|| ReplicateError::Internal(format!("parent of {} released twice", tree[key].path())))?;
    if *count == 0 {
        ready.push_back(parent);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replicate::Limits;
    use crate::replicate::leaf::rebuild_leaves;
    use crate::{ExprError, ExprKind};

    fn run(e: &Expr) -> (TraceTree<'_>, Namespace, usize) {
        let tree = TraceTree::build(e, Limits::default()).unwrap();
        let mut ns = Namespace::new();
        rebuild_leaves(&tree, &mut ns).unwrap();
        let built = propagate(&tree, &mut ns).unwrap();
        (tree, ns, built)
    }

    #[test]
    fn test_every_node_gets_fragment() {
        let x = Expr::symbol("x");
        let e = Expr::add_unevaluated(vec![
            Expr::mul_unevaluated(vec![Expr::integer(2), x.clone()]),
            Expr::pow_unevaluated(x, Expr::integer(3)),
        ]);
        let (tree, _, built) = run(&e);
        assert_eq!(built, 3);
        for (_, node) in tree.iter() {
            let fragment = node.fragment().unwrap();
            assert_eq!(**fragment, *node.expr());
        }
    }

    #[test]
    fn test_root_leaf_builds_nothing() {
        let e = Expr::symbol("x");
        let (tree, ns, built) = run(&e);
        assert_eq!(built, 0);
        assert!(tree[tree.root()].fragment().is_some());
        assert!(ns.contains_module("core.symbol"));
    }

    #[test]
    fn test_keeps_unevaluated_structure() {
        let e = Expr::add_unevaluated(vec![Expr::integer(2), Expr::integer(3)]);
        let (tree, _, _) = run(&e);
        let root = tree[tree.root()].fragment().unwrap();
        assert!(matches!(root.kind(), ExprKind::Add(args) if args.len() == 2));
    }

    #[test]
    fn test_records_heads() {
        let e = Expr::function(
            "f",
            vec![Expr::mul_unevaluated(vec![Expr::symbol("a"), Expr::symbol("b")])],
        );
        let (_, ns, built) = run(&e);
        assert_eq!(built, 2);
        assert_eq!(
            ns.modules(),
            vec!["core.function", "core.mul", "core.symbol"]
        );
        assert_eq!(ns.constructors("core.function").collect::<Vec<_>>(), vec!["f"]);
    }

    #[test]
    fn test_shared_subtree_rebuilt_per_occurrence() {
        let x = Arc::new(Expr::symbol("x"));
        let shared = Arc::new(Expr::pow_unevaluated(Expr::symbol("y"), Expr::integer(2)));
        let e = Expr::new(ExprKind::Add(vec![
            Arc::clone(&shared),
            x,
            Arc::clone(&shared),
        ]));
        let (tree, _, built) = run(&e);
        assert_eq!(built, 3);
        let root = tree[tree.root()].fragment().unwrap();
        let args = root.args();
        assert_eq!(args[0], args[2]);
        assert_ne!(args[0].id(), args[2].id());
    }

    #[test]
    fn test_build_node_passes_constructor_error_through() {
        let args = vec![
            Arc::new(Expr::symbol("x")),
            Arc::new(Expr::integer(2)),
            Arc::new(Expr::integer(3)),
        ];
        let err = build_node(&Head::Pow, args).unwrap_err();
        let expected = ExprError::Arity {
            head: "Pow",
            expected: 2,
            got: 3,
        };
        assert_eq!(err.to_string(), expected.to_string());
        assert_eq!(err, ReplicateError::Construct(expected));
    }

    #[test]
    fn test_build_node_keeps_single_argument_sum() {
        let args = vec![Arc::new(Expr::symbol("x"))];
        let built = build_node(&Head::Add, args).unwrap();
        assert!(matches!(built.kind(), ExprKind::Add(a) if a.len() == 1));
    }
}
