//! An ordered collection of keys permitting duplicates.

use std::{
    fmt::{self, Debug},
    iter::FusedIterator,
};

use crate::{
    compare::{Compare, Less},
    error::Result,
    iter::{OwnedIter, RawIter},
    node::Node,
    position::Position,
    tree::{Duplicates, Tree},
};

/// An ordered collection of keys that may contain several equivalent keys.
///
/// Each inserted key is kept as a distinct element with its own
/// [`Position`]. Among equivalent keys, the most recently inserted is visited
/// first.
///
/// ```
/// use ordtree::Multiset;
///
/// let mut s = Multiset::from([333, 222, 111]);
/// s.insert(222);
///
/// assert_eq!(s.count(&222), 2);
/// assert_eq!(s.iter().copied().collect::<Vec<_>>(), [111, 222, 222, 333]);
/// ```
#[derive(Clone)]
pub struct Multiset<K, C = Less> {
    tree: Tree<K, (), C>,
}

impl<K, C> Default for Multiset<K, C>
where
    C: Default,
{
    fn default() -> Self {
        Self {
            tree: Tree::default(),
        }
    }
}

impl<K> Multiset<K> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K, C> Multiset<K, C> {
    /// Construct an empty multiset ordered by `compare`.
    pub fn with_compare(compare: C) -> Self {
        Self {
            tree: Tree::new(compare),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// The number of elements, counting each duplicate.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn max_size(&self) -> usize {
        Tree::<K, (), C>::max_len()
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.tree, &mut other.tree);
    }

    pub fn begin(&self) -> Position {
        self.tree.position(self.tree.first())
    }

    pub fn end(&self) -> Position {
        Position::END
    }

    pub fn next(&self, pos: Position) -> Result<Position> {
        self.tree.next(pos)
    }

    pub fn prev(&self, pos: Position) -> Result<Position> {
        self.tree.prev(pos)
    }

    pub fn key_at(&self, pos: Position) -> Result<&K> {
        self.tree.node(pos).map(Node::key)
    }

    /// Remove the single element at `pos`, leaving any equivalent keys in
    /// place.
    pub fn erase(&mut self, pos: Position) -> Result<Option<K>> {
        Ok(self.tree.erase(pos)?.map(|(k, _)| k))
    }

    pub fn first(&self) -> Option<&K> {
        self.iter().next()
    }

    pub fn last(&self) -> Option<&K> {
        self.iter().next_back()
    }

    /// Iterate over every element in ascending order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            raw: self.tree.iter(),
        }
    }
}

impl<K, C> Multiset<K, C>
where
    C: Compare<K>,
{
    /// Insert `key` and return its position.
    ///
    /// Insertion always succeeds; the new element is placed before any
    /// existing equivalent keys.
    pub fn insert(&mut self, key: K) -> Position {
        let id = self.tree.insert(key, (), Duplicates::Permit).0;
        self.tree.position(id)
    }

    /// Construct a key from `arg` and insert it.
    pub fn emplace<A>(&mut self, arg: A) -> Position
    where
        K: From<A>,
    {
        self.insert(K::from(arg))
    }

    /// Remove a single element equivalent to `key`, returning true if one was
    /// present.
    ///
    /// The first such element in order (the most recently inserted) is
    /// removed.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.tree.find(key) {
            Some(id) => self.tree.remove(id).is_some(),
            None => false,
        }
    }

    /// The position of the first element equivalent to `key`, or
    /// [`Multiset::end()`] if absent.
    pub fn find(&self, key: &K) -> Position {
        self.tree.position(self.tree.find(key))
    }

    pub fn contains(&self, key: &K) -> bool {
        self.tree.find(key).is_some()
    }

    /// The number of elements equivalent to `key`.
    pub fn count(&self, key: &K) -> usize {
        self.tree.count(key)
    }

    /// The position of the first element not ordered before `key`.
    pub fn lower_bound(&self, key: &K) -> Position {
        self.tree.position(self.tree.lower_bound(key))
    }

    /// The position of the first element ordered after `key`.
    pub fn upper_bound(&self, key: &K) -> Position {
        self.tree.position(self.tree.upper_bound(key))
    }

    /// The range of positions holding keys equivalent to `key`.
    ///
    /// ```
    /// use ordtree::Multiset;
    ///
    /// let s = Multiset::from([1, 2, 2, 2, 3]);
    /// let (lo, hi) = s.equal_range(&2);
    ///
    /// assert_eq!(s.span(lo, hi).unwrap().count(), 3);
    /// assert_eq!(s.key_at(hi), Ok(&3));
    /// ```
    pub fn equal_range(&self, key: &K) -> (Position, Position) {
        (self.lower_bound(key), self.upper_bound(key))
    }

    /// Iterate over the elements in the half-open position range
    /// `[first, last)`, as produced by [`Multiset::equal_range()`].
    ///
    /// Returns [`Error::InvalidRange`](crate::Error::InvalidRange) if `first`
    /// comes after `last`. Order is decided by visiting order, even among
    /// equivalent keys.
    pub fn span(&self, first: Position, last: Position) -> Result<Iter<'_, K>> {
        Ok(Iter {
            raw: self.tree.span(first, last)?,
        })
    }

    /// Move every element of `other` into `self`, leaving `other` empty.
    ///
    /// Every position issued by `other` is stale afterwards.
    pub fn merge(&mut self, other: &mut Self) {
        self.tree.merge(&mut other.tree, Duplicates::Permit);
    }
}

impl<K, C> Debug for Multiset<K, C>
where
    K: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<K, C> PartialEq for Multiset<K, C>
where
    K: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K, C> Eq for Multiset<K, C> where K: Eq {}

impl<K, C> FromIterator<K> for Multiset<K, C>
where
    C: Compare<K> + Default,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut s = Self::default();
        s.extend(iter);
        s
    }
}

impl<K, C> Extend<K> for Multiset<K, C>
where
    C: Compare<K>,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for k in iter {
            self.insert(k);
        }
    }
}

impl<K, const N: usize> From<[K; N]> for Multiset<K>
where
    K: Ord,
{
    fn from(v: [K; N]) -> Self {
        v.into_iter().collect()
    }
}

impl<'a, K, C> IntoIterator for &'a Multiset<K, C> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, C> IntoIterator for Multiset<K, C> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.tree.into_iter(),
        }
    }
}

/// An iterator over the elements of a [`Multiset`] in ascending order.
#[derive(Debug)]
pub struct Iter<'a, K> {
    raw: RawIter<'a, K, ()>,
}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.raw.next().map(Node::key)
    }
}

impl<K> DoubleEndedIterator for Iter<'_, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.raw.next_back().map(Node::key)
    }
}

impl<K> FusedIterator for Iter<'_, K> {}

/// An owning iterator over the elements of a [`Multiset`].
#[derive(Debug)]
pub struct IntoIter<K> {
    inner: OwnedIter<K, ()>,
}

impl<K> Iterator for IntoIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> ExactSizeIterator for IntoIter<K> {}
