//! An ordered set of unique keys.

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

/// An ordered set of unique keys, stored in a parent-linked binary search
/// tree.
///
/// Keys are ordered by the comparator `C`, which defaults to the key's
/// [`Ord`] implementation. Inserting a key equivalent to one already present
/// leaves the set unchanged.
///
/// The tree is not self-balancing, so inserting keys in sorted order produces
/// a tree of linear height. Lookups, bound queries and inserts are
/// proportional to the tree height.
///
/// ```
/// use ordtree::Set;
///
/// let mut s = Set::from([10, 7, 9, 12, 6]);
///
/// assert!(s.insert(11).1);
/// assert!(!s.insert(7).1); // Already present
///
/// assert_eq!(s.iter().copied().collect::<Vec<_>>(), [6, 7, 9, 10, 11, 12]);
/// ```
#[derive(Clone)]
pub struct Set<K, C = Less> {
    tree: Tree<K, (), C>,
}

impl<K, C> Default for Set<K, C>
where
    C: Default,
{
    fn default() -> Self {
        Self {
            tree: Tree::default(),
        }
    }
}

impl<K> Set<K> {
    /// Construct an empty set ordered by `K`'s [`Ord`] implementation.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K, C> Set<K, C> {
    /// Construct an empty set ordered by `compare`.
    pub fn with_compare(compare: C) -> Self {
        Self {
            tree: Tree::new(compare),
        }
    }

    /// Returns true if the set contains no keys.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// The number of keys in the set.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// The theoretical maximum number of keys the set can address.
    ///
    /// This is a ceiling derived from the node size, not an enforced limit.
    pub fn max_size(&self) -> usize {
        Tree::<K, (), C>::max_len()
    }

    /// Remove all keys, invalidating every outstanding [`Position`].
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Exchange the contents of `self` and `other`.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.tree, &mut other.tree);
    }

    /// The position of the first key, or [`Set::end()`] if empty.
    pub fn begin(&self) -> Position {
        self.tree.position(self.tree.first())
    }

    /// The past-the-end position.
    pub fn end(&self) -> Position {
        Position::END
    }

    /// The position following `pos`.
    pub fn next(&self, pos: Position) -> Result<Position> {
        self.tree.next(pos)
    }

    /// The position preceding `pos`; the last key when `pos` is the end.
    pub fn prev(&self, pos: Position) -> Result<Position> {
        self.tree.prev(pos)
    }

    /// The key at `pos`.
    ///
    /// # Errors
    ///
    /// Fails if `pos` is the end position, or its key has been erased.
    pub fn key_at(&self, pos: Position) -> Result<&K> {
        self.tree.node(pos).map(Node::key)
    }

    /// Remove the key at `pos`, returning it.
    ///
    /// Erasing the end position is a no-op returning `Ok(None)`. All other
    /// positions remain valid.
    pub fn erase(&mut self, pos: Position) -> Result<Option<K>> {
        Ok(self.tree.erase(pos)?.map(|(k, _)| k))
    }

    /// The smallest key.
    pub fn first(&self) -> Option<&K> {
        self.iter().next()
    }

    /// The largest key.
    pub fn last(&self) -> Option<&K> {
        self.iter().next_back()
    }

    /// Iterate over the keys in ascending order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            raw: self.tree.iter(),
        }
    }

}

impl<K, C> Set<K, C>
where
    C: Compare<K>,
{
    /// Insert `key`, returning its position and true if it was not already
    /// present.
    ///
    /// If an equivalent key exists, the set is unchanged and the position of
    /// the existing key is returned with false.
    pub fn insert(&mut self, key: K) -> (Position, bool) {
        let (id, inserted) = self.tree.insert(key, (), Duplicates::Reject);
        (self.tree.position(id), inserted)
    }

    /// Construct a key from `arg` and insert it.
    pub fn emplace<A>(&mut self, arg: A) -> (Position, bool)
    where
        K: From<A>,
    {
        self.insert(K::from(arg))
    }

    /// Remove `key`, returning true if it was present.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.tree.find(key) {
            Some(id) => self.tree.remove(id).is_some(),
            None => false,
        }
    }

    /// The position of `key`, or [`Set::end()`] if absent.
    pub fn find(&self, key: &K) -> Position {
        self.tree.position(self.tree.find(key))
    }

    pub fn contains(&self, key: &K) -> bool {
        self.tree.find(key).is_some()
    }

    /// The number of keys equivalent to `key`, either 0 or 1.
    pub fn count(&self, key: &K) -> usize {
        self.tree.count(key)
    }

    /// The position of the first key not ordered before `key`.
    pub fn lower_bound(&self, key: &K) -> Position {
        self.tree.position(self.tree.lower_bound(key))
    }

    /// The position of the first key ordered after `key`.
    pub fn upper_bound(&self, key: &K) -> Position {
        self.tree.position(self.tree.upper_bound(key))
    }

    /// The pair `(lower_bound(key), upper_bound(key))`.
    pub fn equal_range(&self, key: &K) -> (Position, Position) {
        (self.lower_bound(key), self.upper_bound(key))
    }

    /// Iterate over the keys in the half-open position range `[first, last)`.
    ///
    /// A range whose `first` comes after `last` is rejected.
    ///
    /// ```
    /// use ordtree::{Error, Set};
    ///
    /// let s = Set::from([1, 2, 3, 4, 5]);
    /// let from = s.find(&2);
    /// let to = s.find(&5);
    ///
    /// assert_eq!(s.span(from, to).unwrap().copied().collect::<Vec<_>>(), [2, 3, 4]);
    /// assert!(matches!(s.span(to, from), Err(Error::InvalidRange)));
    /// ```
    pub fn span(&self, first: Position, last: Position) -> Result<Iter<'_, K>> {
        Ok(Iter {
            raw: self.tree.span(first, last)?,
        })
    }

    /// Move every key of `other` that is not already present into `self`.
    ///
    /// Keys that collide with a key in `self` remain in `other`. Positions
    /// that `other` issued for the moved keys are stale in both sets
    /// afterwards.
    ///
    /// ```
    /// use ordtree::Set;
    ///
    /// let mut a = Set::from([1, 2, 3]);
    /// let mut b = Set::from([3, 4]);
    ///
    /// a.merge(&mut b);
    ///
    /// assert_eq!(a.len(), 4);
    /// assert_eq!(b.iter().collect::<Vec<_>>(), [&3]);
    /// ```
    pub fn merge(&mut self, other: &mut Self) {
        self.tree.merge(&mut other.tree, Duplicates::Reject);
    }
}

impl<K, C> Debug for Set<K, C>
where
    K: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K, C> PartialEq for Set<K, C>
where
    K: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K, C> Eq for Set<K, C> where K: Eq {}

impl<K, C> FromIterator<K> for Set<K, C>
where
    C: Compare<K> + Default,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut s = Self::default();
        s.extend(iter);
        s
    }
}

impl<K, C> Extend<K> for Set<K, C>
where
    C: Compare<K>,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for k in iter {
            self.insert(k);
        }
    }
}

impl<K, const N: usize> From<[K; N]> for Set<K>
where
    K: Ord,
{
    fn from(v: [K; N]) -> Self {
        v.into_iter().collect()
    }
}

impl<'a, K, C> IntoIterator for &'a Set<K, C> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, C> IntoIterator for Set<K, C> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.tree.into_iter(),
        }
    }
}

/// An iterator over the keys of a [`Set`] in ascending order.
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

/// An owning iterator over the keys of a [`Set`] in ascending order.
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
