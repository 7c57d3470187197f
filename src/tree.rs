use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, trace};

use crate::{
    compare::Compare,
    error::{Error, Result},
    iter::{OwnedIter, RawIter},
    node::{Node, NodeId, Nodes, Side},
    position::Position,
};

/// How [`Tree::insert()`] treats a key equivalent to one already stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Duplicates {
    /// Leave the tree unchanged and report the existing node.
    Reject,

    /// Overwrite the value of the existing node in place.
    Assign,

    /// Store the key as an additional node.
    ///
    /// The new node is placed in the left subtree of the equivalent node, so
    /// equivalent keys are visited most-recently-inserted first by an
    /// in-order walk.
    Permit,
}

/// A parent-linked binary search tree over arena-allocated nodes.
///
/// The tree is not self-balancing: its height depends on the insertion
/// order, degrading to a linked chain for sorted input. No operation recurses
/// over the tree height, so a degenerate shape costs time but never call
/// stack depth.
///
/// An in-order walk yields keys in non-decreasing order under `C`.
#[derive(Debug)]
pub(crate) struct Tree<K, V, C> {
    nodes: Nodes<K, V>,
    root: Option<NodeId>,
    compare: C,

    /// Identifies this tree in the [`Position`] values it issues.
    ///
    /// Node handles are only unique within one arena, so a position is
    /// resolved only by the tree whose tag it carries.
    tag: u64,
}

/// Hands out a distinct tag to every new, cloned or cleared tree.
fn next_tag() -> u64 {
    static NEXT: AtomicU64 = AtomicU64::new(0);
    NEXT.fetch_add(1, Ordering::Relaxed)
}

impl<K, V, C> Clone for Tree<K, V, C>
where
    K: Clone,
    V: Clone,
    C: Clone,
{
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            root: self.root,
            compare: self.compare.clone(),
            tag: next_tag(),
        }
    }
}

impl<K, V, C> Default for Tree<K, V, C>
where
    C: Default,
{
    fn default() -> Self {
        Self::new(C::default())
    }
}

impl<K, V, C> Tree<K, V, C> {
    pub(crate) fn new(compare: C) -> Self {
        Self {
            nodes: Nodes::new(),
            root: None,
            compare,
            tag: next_tag(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The theoretical upper bound on the number of nodes.
    pub(crate) fn max_len() -> usize {
        Nodes::<K, V>::max_len()
    }

    #[cfg(test)]
    pub(crate) fn compare(&self) -> &C {
        &self.compare
    }

    pub(crate) fn nodes(&self) -> &Nodes<K, V> {
        &self.nodes
    }

    /// Mutable access to the nodes, for value updates only.
    ///
    /// Callers must not modify the links or reorder keys.
    pub(crate) fn nodes_mut(&mut self) -> &mut Nodes<K, V> {
        &mut self.nodes
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub(crate) fn first(&self) -> Option<NodeId> {
        self.root.map(|v| self.nodes.subtree_min(v))
    }

    pub(crate) fn last(&self) -> Option<NodeId> {
        self.root.map(|v| self.nodes.subtree_max(v))
    }

    /// The position of `id` (or the end sentinel for [`None`]), issued by
    /// this tree.
    pub(crate) fn position(&self, id: impl Into<Option<NodeId>>) -> Position {
        Position::new(self.tag, id.into())
    }

    /// Resolve `pos` to a live node.
    ///
    /// A position issued by another tree is as stale as one whose element
    /// was erased.
    pub(crate) fn resolve(&self, pos: Position) -> Result<NodeId> {
        let (tag, id) = pos.get().ok_or(Error::EndPosition)?;
        if tag != self.tag || !self.nodes.contains(id) {
            return Err(Error::StalePosition);
        }
        Ok(id)
    }

    /// Like [`Tree::resolve()`], but mapping the end sentinel to [`None`].
    fn resolve_or_end(&self, pos: Position) -> Result<Option<NodeId>> {
        if pos.is_end() {
            return Ok(None);
        }
        self.resolve(pos).map(Some)
    }

    pub(crate) fn node(&self, pos: Position) -> Result<&Node<K, V>> {
        let id = self.resolve(pos)?;
        Ok(&self.nodes[id])
    }

    pub(crate) fn node_mut(&mut self, pos: Position) -> Result<&mut Node<K, V>> {
        let id = self.resolve(pos)?;
        Ok(&mut self.nodes[id])
    }

    /// The position after `pos`, which is the end sentinel when `pos` is the
    /// last element.
    pub(crate) fn next(&self, pos: Position) -> Result<Position> {
        let id = self.resolve(pos)?;
        Ok(self.position(self.nodes.successor(id)))
    }

    /// The position before `pos`.
    ///
    /// Stepping back from the end sentinel yields the last element, and
    /// stepping back from the first element yields the end sentinel.
    pub(crate) fn prev(&self, pos: Position) -> Result<Position> {
        match self.resolve_or_end(pos)? {
            None => self
                .last()
                .map(|id| self.position(id))
                .ok_or(Error::EndPosition),
            Some(id) => Ok(self.position(self.nodes.predecessor(id))),
        }
    }

    pub(crate) fn iter(&self) -> RawIter<'_, K, V> {
        RawIter::new(&self.nodes, self.first(), self.last())
    }

    /// Unlink the node `id` and release it, returning the node.
    ///
    /// Returns [`None`] if `id` is stale. The identity of every other node is
    /// preserved: a node with two children is replaced by re-linking its
    /// in-order predecessor into its place.
    pub(crate) fn remove(&mut self, id: NodeId) -> Option<Node<K, V>> {
        let node = self.nodes.get(id)?;
        let (left, right, parent) = (node.left, node.right, node.parent);

        match (left, right) {
            (None, None) => {
                trace!("erase leaf node");
                self.replace_child(parent, id, None);
            }
            (Some(child), None) | (None, Some(child)) => {
                trace!("erase node with one child");

                // Splice the only child into the position of the removed
                // node.
                self.nodes[child].parent = parent;
                self.replace_child(parent, id, Some(child));
            }
            (Some(left), Some(right)) => {
                // The in-order predecessor (the right-most node of the left
                // subtree) replaces the removed node.
                //
                // ```text
                //          parent                     parent
                //            |                          |
                //           id                         max
                //          /  \                       /   \
                //       left   right    ---->      left   right
                //       /  \                       /  \
                //      .    p                     .    p
                //            \                          \
                //            max                        max.left
                //            /
                //        max.left
                // ```
                //
                // When "left" is itself the predecessor, it has no right child
                // and simply moves up, keeping its own left subtree.
                let max = self.nodes.subtree_max(left);
                trace!(
                    predecessor_is_child = max == left,
                    "erase node with two children"
                );

                if max != left {
                    debug_assert!(self.nodes[max].right.is_none());

                    // Detach "max", lifting its left subtree (if any) into
                    // its old position.
                    let max_parent = self.nodes[max].parent;
                    let max_left = self.nodes[max].left;
                    if let Some(v) = max_left {
                        self.nodes[v].parent = max_parent;
                    }
                    self.replace_child(max_parent, max, max_left);

                    self.nodes[max].left = Some(left);
                    self.nodes[left].parent = Some(max);
                }

                self.nodes[max].right = Some(right);
                self.nodes[right].parent = Some(max);
                self.nodes[max].parent = parent;
                self.replace_child(parent, id, Some(max));
            }
        }

        let old = self.nodes.remove(id);
        debug_assert!(old.is_some());
        old
    }

    /// Erase the element at `pos`.
    ///
    /// Erasing the end sentinel is a no-op returning `Ok(None)`.
    pub(crate) fn erase(&mut self, pos: Position) -> Result<Option<(K, V)>> {
        let Some(id) = self.resolve_or_end(pos)? else {
            return Ok(None);
        };

        Ok(self.remove(id).map(Node::into_tuple))
    }

    /// Release every node. Positions issued before the call are stale
    /// afterwards.
    pub(crate) fn clear(&mut self) {
        trace!(len = self.len(), "clearing tree");
        self.nodes.clear();
        self.root = None;
        self.tag = next_tag();
    }

    pub(crate) fn into_iter(self) -> OwnedIter<K, V> {
        OwnedIter::new(self.nodes, self.root)
    }

    /// Point the link that referenced `old` (a child link of `parent`, or the
    /// root) at `new`.
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        let link = match parent {
            None => {
                debug_assert_eq!(self.root, Some(old));
                &mut self.root
            }
            Some(p) => {
                let p = &mut self.nodes[p];
                if p.left == Some(old) {
                    &mut p.left
                } else {
                    debug_assert_eq!(p.right, Some(old));
                    &mut p.right
                }
            }
        };

        *link = new;
    }
}

impl<K, V, C> Tree<K, V, C>
where
    C: Compare<K>,
{
    /// Insert `key` and `value`, returning the node holding `key` and whether
    /// a new node was created.
    ///
    /// Keys equivalent to an existing key are handled according to `policy`.
    pub(crate) fn insert(&mut self, key: K, value: V, policy: Duplicates) -> (NodeId, bool) {
        let Some(mut current) = self.root else {
            let id = self.nodes.insert(Node::new(key, value, None));
            self.root = Some(id);
            return (id, true);
        };

        loop {
            let node = &self.nodes[current];

            let side = if self.compare.less(&key, node.key()) {
                Side::Left
            } else if self.compare.less(node.key(), &key) {
                Side::Right
            } else {
                match policy {
                    Duplicates::Reject => return (current, false),
                    Duplicates::Assign => {
                        *self.nodes[current].value_mut() = value;
                        return (current, false);
                    }
                    Duplicates::Permit => Side::Left,
                }
            };

            match self.nodes[current].child(side) {
                Some(child) => current = child,
                None => {
                    let id = self.nodes.insert(Node::new(key, value, Some(current)));
                    *self.nodes[current].child_mut(side) = Some(id);
                    return (id, true);
                }
            }
        }
    }

    /// Walk the half-open range of positions `[first, last)`.
    ///
    /// Returns [`Error::InvalidRange`] if `first` follows `last` in the
    /// in-order sequence.
    pub(crate) fn span(&self, first: Position, last: Position) -> Result<RawIter<'_, K, V>> {
        let front = self.resolve_or_end(first)?;
        let end = self.resolve_or_end(last)?;

        if front == end {
            return Ok(RawIter::empty(&self.nodes));
        }

        // Only the end sentinel may follow every element.
        let Some(front) = front else {
            return Err(Error::InvalidRange);
        };

        let back = match end {
            Some(end) if !self.precedes(front, end) => return Err(Error::InvalidRange),
            Some(end) => self.nodes.predecessor(end),
            None => self.last(),
        };

        Ok(RawIter::new(&self.nodes, Some(front), back))
    }

    /// Returns true if the distinct nodes `a` and `b` are visited in that
    /// order.
    ///
    /// Keys decide unless they are equivalent, in which case the run of
    /// equivalent keys after `a` is walked looking for `b`.
    fn precedes(&self, a: NodeId, b: NodeId) -> bool {
        let (ka, kb) = (self.nodes[a].key(), self.nodes[b].key());
        if self.compare.less(ka, kb) {
            return true;
        }
        if self.compare.less(kb, ka) {
            return false;
        }

        let mut ptr = self.nodes.successor(a);
        while let Some(id) = ptr {
            if id == b {
                return true;
            }
            if self.compare.less(ka, self.nodes[id].key()) {
                return false;
            }
            ptr = self.nodes.successor(id);
        }

        false
    }

    /// The first node in order whose key is not less than `key`.
    pub(crate) fn lower_bound(&self, key: &K) -> Option<NodeId> {
        let mut candidate = None;
        let mut ptr = self.root;

        while let Some(id) = ptr {
            let node = &self.nodes[id];
            if self.compare.less(node.key(), key) {
                ptr = node.right;
            } else {
                // Any earlier match must be in the left subtree.
                candidate = Some(id);
                ptr = node.left;
            }
        }

        candidate
    }

    /// The first node in order whose key is strictly greater than `key`.
    pub(crate) fn upper_bound(&self, key: &K) -> Option<NodeId> {
        let mut candidate = None;
        let mut ptr = self.root;

        while let Some(id) = ptr {
            let node = &self.nodes[id];
            if self.compare.less(key, node.key()) {
                candidate = Some(id);
                ptr = node.left;
            } else {
                ptr = node.right;
            }
        }

        candidate
    }

    /// The first node in order holding a key equivalent to `key`.
    pub(crate) fn find(&self, key: &K) -> Option<NodeId> {
        self.lower_bound(key)
            .filter(|&id| !self.compare.less(key, self.nodes[id].key()))
    }

    pub(crate) fn count(&self, key: &K) -> usize {
        let mut n = 0;
        let mut ptr = self.lower_bound(key);

        while let Some(id) = ptr {
            if self.compare.less(key, self.nodes[id].key()) {
                break;
            }
            n += 1;
            ptr = self.nodes.successor(id);
        }

        n
    }

    /// Move every element of `other` accepted by `policy` into `self`,
    /// returning the number of elements moved.
    ///
    /// Under [`Duplicates::Reject`] elements whose key already exists in
    /// `self` stay in `other`.
    pub(crate) fn merge(&mut self, other: &mut Self, policy: Duplicates) -> usize {
        let mut moved = 0;
        let mut ptr = other.first();

        while let Some(id) = ptr {
            // Removing "id" never invalidates its successor.
            ptr = other.nodes.successor(id);

            if policy != Duplicates::Permit && self.find(other.nodes[id].key()).is_some() {
                continue;
            }

            if let Some(node) = other.remove(id) {
                let (key, value) = node.into_tuple();
                self.insert(key, value, policy);
                moved += 1;
            }
        }

        debug!(moved, kept = other.len(), "merged trees");
        moved
    }
}
