use std::fmt::Debug;

use proptest::prelude::*;

use crate::{compare::Compare, tree::Tree};

/// Keys are drawn from [0..[`KEY_MAX`]).
pub(crate) const KEY_MAX: u32 = 64;

/// Generate arbitrary keys from a small domain, encouraging operations to act
/// on the same keys.
pub(crate) fn arbitrary_key() -> impl Strategy<Value = u32> {
    0..KEY_MAX
}

/// Assert the BST and link invariants of `t`, ensuring the tree is
/// well-formed.
pub(crate) fn validate_tree_structure<K, V, C>(t: &Tree<K, V, C>)
where
    K: Debug,
    C: Compare<K>,
{
    let nodes = t.nodes();

    let root = match t.root() {
        Some(v) => v,
        None => {
            assert_eq!(t.len(), 0, "empty tree reports non-zero length");
            assert!(t.is_empty());
            return;
        }
    };

    assert_eq!(nodes[root].parent, None, "root has a parent link");

    // Perform a pre-order traversal of the tree.
    let mut reachable = 0;
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        reachable += 1;
        let n = &nodes[id];

        // Invariant 1: every child links back to the node that owns it.
        for child in [n.left, n.right].into_iter().flatten() {
            assert_eq!(
                nodes[child].parent,
                Some(id),
                "child {:?} of {:?} has a mismatched parent link",
                nodes[child].key(),
                n.key(),
            );
            stack.push(child);
        }

        // Invariant 2: the left child is never ordered after this node, and
        // the right child is never ordered before it.
        if let Some(l) = n.left {
            assert!(!t.compare().less(n.key(), nodes[l].key()));
        }
        if let Some(r) = n.right {
            assert!(!t.compare().less(nodes[r].key(), n.key()));
        }
    }

    // Invariant 3: the length is the number of nodes reachable from the root.
    assert_eq!(reachable, t.len());

    // Invariant 4: the in-order walk is non-decreasing, and walking backwards
    // visits the same nodes.
    let forwards = t.iter().collect::<Vec<_>>();
    assert_eq!(forwards.len(), t.len());
    for window in forwards.windows(2) {
        assert!(
            !t.compare().less(window[1].key(), window[0].key()),
            "{:?} visited before {:?}",
            window[0].key(),
            window[1].key(),
        );
    }

    let backwards = t.iter().rev().collect::<Vec<_>>();
    assert!(forwards
        .iter()
        .zip(backwards.iter().rev())
        .all(|(a, b)| std::ptr::eq(*a, *b)));
}
