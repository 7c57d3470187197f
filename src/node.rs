use std::{
    mem,
    ops::{Deref, DerefMut},
};

use triple_arena::{ptr_struct, Arena};

ptr_struct!(NodeId);

/// The arena every [`Node`] of a tree lives in.
///
/// A [`NodeId`] carries the generation of the slot it was issued for, so
/// once its node is released the handle never resolves again, even after
/// the slot is reused.
#[derive(Debug, Clone)]
pub(crate) struct Nodes<K, V>(Arena<NodeId, Node<K, V>>);

impl<K, V> Nodes<K, V> {
    pub(crate) fn new() -> Self {
        Self(Arena::new())
    }

    /// The theoretical upper bound on the number of nodes.
    pub(crate) fn max_len() -> usize {
        isize::MAX as usize / mem::size_of::<Node<K, V>>().max(1)
    }
}

impl<K, V> Deref for Nodes<K, V> {
    type Target = Arena<NodeId, Node<K, V>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<K, V> DerefMut for Nodes<K, V> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Which child link of a [`Node`] to follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub(crate) struct Node<K, V> {
    key: K,
    value: V,

    /// Owning child links.
    ///
    /// Every node is reachable from the root through exactly one chain of
    /// child links.
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,

    /// Back-reference to the node holding a child link to this node, or
    /// [`None`] for the root.
    ///
    /// Used only to walk upwards.
    pub(crate) parent: Option<NodeId>,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(key: K, value: V, parent: Option<NodeId>) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
            parent,
        }
    }

    pub(crate) fn key(&self) -> &K {
        &self.key
    }

    pub(crate) fn value(&self) -> &V {
        &self.value
    }

    pub(crate) fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Returns the key and a mutable reference to the value.
    pub(crate) fn pair_mut(&mut self) -> (&K, &mut V) {
        (&self.key, &mut self.value)
    }

    pub(crate) fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn child_mut(&mut self, side: Side) -> &mut Option<NodeId> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Explode this [`Node`] into the key and value it contains.
    pub(crate) fn into_tuple(self) -> (K, V) {
        (self.key, self.value)
    }
}

/// In-order navigation over parent-linked nodes.
///
/// None of these walks allocate; the parent links stand in for a traversal
/// stack.
impl<K, V> Nodes<K, V> {
    /// The left-most (minimum) node of the subtree rooted at `id`.
    pub(crate) fn subtree_min(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self[id].left {
            id = left;
        }
        id
    }

    /// The right-most (maximum) node of the subtree rooted at `id`.
    pub(crate) fn subtree_max(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self[id].right {
            id = right;
        }
        id
    }

    /// The node visited after `id` in an in-order walk, or [`None`] if `id`
    /// is the last node.
    pub(crate) fn successor(&self, id: NodeId) -> Option<NodeId> {
        self.step(id, Side::Right)
    }

    /// The node visited before `id` in an in-order walk, or [`None`] if `id`
    /// is the first node.
    pub(crate) fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        self.step(id, Side::Left)
    }

    /// Take one in-order step towards `side`.
    ///
    /// If `id` has a child on `side`, the answer is the nearest node of that
    /// subtree (its extreme in the opposite direction). Otherwise ascend until
    /// arriving from the opposite side of a parent, which is then the answer.
    fn step(&self, id: NodeId, side: Side) -> Option<NodeId> {
        if let Some(child) = self[id].child(side) {
            return Some(match side {
                Side::Right => self.subtree_min(child),
                Side::Left => self.subtree_max(child),
            });
        }

        let mut current = id;
        let mut parent = self[current].parent;
        while let Some(p) = parent {
            if self[p].child(side) != Some(current) {
                break;
            }
            current = p;
            parent = self[p].parent;
        }

        parent
    }
}
