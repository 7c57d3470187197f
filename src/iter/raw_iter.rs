use crate::node::{Node, NodeId, Nodes};

/// A double-ended, in-order walk over the nodes between `front` and `back`
/// (inclusive).
///
/// Each step follows child and parent links directly, so the walk holds no
/// traversal stack.
#[derive(Debug)]
pub(crate) struct RawIter<'a, K, V> {
    nodes: &'a Nodes<K, V>,
    front: Option<NodeId>,
    back: Option<NodeId>,
}

impl<K, V> Clone for RawIter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            front: self.front,
            back: self.back,
        }
    }
}

impl<'a, K, V> RawIter<'a, K, V> {
    /// Walk from `front` to `back`, which must either both be [`None`] or
    /// both be set with `front` preceding (or equal to) `back`.
    pub(crate) fn new(nodes: &'a Nodes<K, V>, front: Option<NodeId>, back: Option<NodeId>) -> Self {
        debug_assert_eq!(front.is_some(), back.is_some());
        Self { nodes, front, back }
    }

    pub(crate) fn empty(nodes: &'a Nodes<K, V>) -> Self {
        Self::new(nodes, None, None)
    }

    fn finish(&mut self) {
        self.front = None;
        self.back = None;
    }
}

impl<'a, K, V> Iterator for RawIter<'a, K, V> {
    type Item = &'a Node<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.front?;

        if self.front == self.back {
            // The two ends met.
            self.finish();
        } else {
            self.front = self.nodes.successor(id);
        }

        Some(&self.nodes[id])
    }
}

impl<K, V> DoubleEndedIterator for RawIter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let id = self.back?;

        if self.front == self.back {
            self.finish();
        } else {
            self.back = self.nodes.predecessor(id);
        }

        Some(&self.nodes[id])
    }
}

impl<K, V> std::iter::FusedIterator for RawIter<'_, K, V> {}
