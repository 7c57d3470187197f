use crate::node::{NodeId, Nodes};

/// An iterator of owned key/value pairs as the underlying tree `into_iter()`
/// impl.
///
/// Nodes are released from the arena as they are yielded.
#[derive(Debug)]
pub(crate) struct OwnedIter<K, V> {
    nodes: Nodes<K, V>,
    stack: Vec<NodeId>,
}

impl<K, V> OwnedIter<K, V> {
    pub(crate) fn new(nodes: Nodes<K, V>, root: Option<NodeId>) -> Self {
        let mut this = Self {
            nodes,
            stack: vec![],
        };

        // Descend down the left side of the tree.
        if let Some(root) = root {
            this.push_subtree(root);
        }

        this
    }

    fn push_subtree(&mut self, subtree_root: NodeId) {
        let mut ptr = Some(subtree_root);

        while let Some(v) = ptr {
            self.stack.push(v);
            ptr = self.nodes[v].left;
        }
    }
}

impl<K, V> Iterator for OwnedIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let v = self.nodes.remove(self.stack.pop()?)?;

        // Descend down the left side of the right hand child of this node, if
        // any.
        if let Some(right) = v.right {
            self.push_subtree(right);
        }

        Some(v.into_tuple())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.nodes.len(), Some(self.nodes.len()))
    }
}

impl<K, V> ExactSizeIterator for OwnedIter<K, V> {}
