use crate::node::NodeId;

/// A bidirectional cursor into a container's in-order sequence.
///
/// A [`Position`] is a plain copyable handle: it borrows nothing, and remains
/// meaningful across mutations of the container that produced it except the
/// erasure of the element it refers to. Using a position after its element
/// has been erased fails with [`Error::StalePosition`] rather than reading
/// another element.
///
/// Two positions are equal when they refer to the same element (not merely
/// equivalent keys), or are both the past-the-end sentinel.
///
/// Positions are only meaningful for the container instance that issued
/// them. Passing an element position to any other container, including a
/// clone of the issuing one, also fails with [`Error::StalePosition`]. The
/// end sentinel is shared by all containers.
///
/// [`Error::StalePosition`]: crate::Error::StalePosition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position(Option<(u64, NodeId)>);

impl Position {
    pub(crate) const END: Self = Self(None);

    /// The position of `id` within the tree tagged `tag`.
    pub(crate) fn new(tag: u64, id: Option<NodeId>) -> Self {
        Self(id.map(|id| (tag, id)))
    }

    /// The issuing tree's tag and the node, or [`None`] for the end sentinel.
    pub(crate) fn get(self) -> Option<(u64, NodeId)> {
        self.0
    }

    /// Returns true if this is the past-the-end sentinel.
    pub fn is_end(&self) -> bool {
        self.0.is_none()
    }
}
