//! An ordered map of unique keys to values.

use std::{
    fmt::{self, Debug},
    iter::FusedIterator,
};

pub use crate::entry::{Entry, OccupiedEntry, VacantEntry};
use crate::{
    compare::{Compare, Less},
    error::{Error, Result},
    iter::{OwnedIter, RawIter},
    node::Node,
    position::Position,
    tree::{Duplicates, Tree},
};

/// An ordered map from unique keys to values, stored in a parent-linked
/// binary search tree.
///
/// Keys are ordered by the comparator `C`, which defaults to the key's
/// [`Ord`] implementation. The tree is not self-balancing; operations are
/// proportional to its height, which depends on the insertion order.
///
/// Elements are addressed either by key, or by a [`Position`] obtained from
/// a lookup or traversal. A position remains valid until the element it
/// refers to is removed.
///
/// ```
/// use ordtree::Map;
///
/// let mut m = Map::new();
/// m.insert(3, "three");
/// m.insert(1, "one");
/// m.insert(2, "two");
///
/// assert_eq!(m.get(&2), Some(&"two"));
/// assert_eq!(m.keys().copied().collect::<Vec<_>>(), [1, 2, 3]);
///
/// // Step through the map by position.
/// let pos = m.find(&2);
/// let next = m.next(pos).unwrap();
/// assert_eq!(m.pair_at(next), Ok((&3, &"three")));
/// ```
#[derive(Clone)]
pub struct Map<K, V, C = Less> {
    tree: Tree<K, V, C>,
}

impl<K, V, C> Default for Map<K, V, C>
where
    C: Default,
{
    fn default() -> Self {
        Self {
            tree: Tree::default(),
        }
    }
}

impl<K, V> Map<K, V> {
    /// Construct an empty map ordered by `K`'s [`Ord`] implementation.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K, V, C> Map<K, V, C> {
    /// Construct an empty map ordered by `compare`.
    pub fn with_compare(compare: C) -> Self {
        Self {
            tree: Tree::new(compare),
        }
    }

    pub(crate) fn tree(&self) -> &Tree<K, V, C> {
        &self.tree
    }

    pub(crate) fn tree_mut(&mut self) -> &mut Tree<K, V, C> {
        &mut self.tree
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// The number of key-value pairs in the map.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// The theoretical maximum number of elements the map can address.
    pub fn max_size(&self) -> usize {
        Tree::<K, V, C>::max_len()
    }

    /// Remove all elements, invalidating every outstanding [`Position`].
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Exchange the contents of `self` and `other`.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.tree, &mut other.tree);
    }

    /// The position of the element with the smallest key, or [`Map::end()`]
    /// if empty.
    pub fn begin(&self) -> Position {
        self.tree.position(self.tree.first())
    }

    /// The past-the-end position.
    pub fn end(&self) -> Position {
        Position::END
    }

    /// The position following `pos`.
    ///
    /// # Errors
    ///
    /// Advancing the end position returns [`Error::EndPosition`], and a
    /// position of an erased element returns [`Error::StalePosition`].
    pub fn next(&self, pos: Position) -> Result<Position> {
        self.tree.next(pos)
    }

    /// The position preceding `pos`.
    ///
    /// Stepping back from the end yields the last element, and stepping back
    /// from the first element yields the end.
    pub fn prev(&self, pos: Position) -> Result<Position> {
        self.tree.prev(pos)
    }

    /// The key and value at `pos`.
    pub fn pair_at(&self, pos: Position) -> Result<(&K, &V)> {
        self.tree.node(pos).map(|n| (n.key(), n.value()))
    }

    /// The key and a mutable reference to the value at `pos`.
    ///
    /// Keys are never exposed mutably; changing a key in place could break
    /// the ordering of the tree.
    pub fn value_at_mut(&mut self, pos: Position) -> Result<(&K, &mut V)> {
        self.tree.node_mut(pos).map(Node::pair_mut)
    }

    /// Remove the element at `pos`, returning it.
    ///
    /// Erasing the end position is a no-op returning `Ok(None)`. Positions of
    /// all other elements remain valid.
    ///
    /// ```
    /// use ordtree::Map;
    ///
    /// let mut m = Map::from([(1, "a"), (2, "b"), (3, "c")]);
    ///
    /// let pos = m.next(m.begin()).unwrap();
    /// assert_eq!(m.erase(pos), Ok(Some((2, "b"))));
    /// assert_eq!(m.len(), 2);
    /// ```
    pub fn erase(&mut self, pos: Position) -> Result<Option<(K, V)>> {
        self.tree.erase(pos)
    }

    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.iter().next()
    }

    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.iter().next_back()
    }

    /// Iterate over the key-value pairs in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            raw: self.tree.iter(),
        }
    }

    /// Iterate over the keys in ascending order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Iterate over the values in ascending key order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }
}

impl<K, V, C> Map<K, V, C>
where
    C: Compare<K>,
{
    /// Insert `key` and `value` if `key` is not already present.
    ///
    /// Returns the position of the element holding `key`, and true if it was
    /// newly inserted. An existing element is left unchanged and `value` is
    /// dropped.
    pub fn insert(&mut self, key: K, value: V) -> (Position, bool) {
        let (id, inserted) = self.tree.insert(key, value, Duplicates::Reject);
        (self.tree.position(id), inserted)
    }

    /// Insert `key` and `value`, overwriting the value of an existing element
    /// with an equivalent key.
    ///
    /// Returns the position of the element and true if it was newly
    /// inserted, or false if an existing value was replaced.
    ///
    /// ```
    /// use ordtree::Map;
    ///
    /// let mut m = Map::new();
    ///
    /// assert!(m.insert_or_assign(1, "a").1);
    /// assert!(!m.insert_or_assign(1, "b").1);
    /// assert_eq!(m.get(&1), Some(&"b"));
    /// ```
    pub fn insert_or_assign(&mut self, key: K, value: V) -> (Position, bool) {
        let (id, inserted) = self.tree.insert(key, value, Duplicates::Assign);
        (self.tree.position(id), inserted)
    }

    /// Construct the key and value from `key` and `value`, and insert them
    /// as [`Map::insert()`] does.
    pub fn emplace<A, B>(&mut self, key: A, value: B) -> (Position, bool)
    where
        K: From<A>,
        V: From<B>,
    {
        self.insert(K::from(key), V::from(value))
    }

    /// Remove `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Remove `key`, returning the stored key and value if it was present.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let id = self.tree.find(key)?;
        self.tree.remove(id).map(Node::into_tuple)
    }

    /// The position of `key`, or [`Map::end()`] if absent.
    pub fn find(&self, key: &K) -> Position {
        self.tree.position(self.tree.find(key))
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.tree.find(key).is_some()
    }

    /// The number of elements with a key equivalent to `key`, either 0 or 1.
    pub fn count(&self, key: &K) -> usize {
        self.tree.count(key)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        let id = self.tree.find(key)?;
        Some(self.tree.nodes()[id].value())
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = self.tree.find(key)?;
        Some(self.tree.nodes_mut()[id].value_mut())
    }

    /// The value of `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if `key` is absent.
    pub fn at(&self, key: &K) -> Result<&V> {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// A mutable reference to the value of `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if `key` is absent.
    pub fn at_mut(&mut self, key: &K) -> Result<&mut V> {
        self.get_mut(key).ok_or(Error::KeyNotFound)
    }

    /// A mutable reference to the value of `key`, inserting
    /// [`V::default()`](Default::default) first if `key` is absent.
    ///
    /// ```
    /// use ordtree::Map;
    ///
    /// let mut m = Map::<u32, String>::new();
    ///
    /// assert_eq!(m.get_or_insert_default(555), "");
    /// assert_eq!(m.len(), 1);
    ///
    /// *m.get_or_insert_default(555) = "BIK".to_string();
    /// assert_eq!(m.get(&555).map(String::as_str), Some("BIK"));
    /// ```
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.entry(key).or_default()
    }

    /// Get the [`Entry`] for `key` for in-place manipulation.
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V, C> {
        Entry::new(key, self)
    }

    /// The position of the first element whose key is not ordered before
    /// `key`.
    pub fn lower_bound(&self, key: &K) -> Position {
        self.tree.position(self.tree.lower_bound(key))
    }

    /// The position of the first element whose key is ordered after `key`.
    pub fn upper_bound(&self, key: &K) -> Position {
        self.tree.position(self.tree.upper_bound(key))
    }

    /// The pair `(lower_bound(key), upper_bound(key))`.
    pub fn equal_range(&self, key: &K) -> (Position, Position) {
        (self.lower_bound(key), self.upper_bound(key))
    }

    /// Iterate over the pairs in the half-open position range
    /// `[first, last)`.
    ///
    /// Returns [`Error::InvalidRange`] if `first` comes after `last`, and
    /// [`Error::StalePosition`] if either position no longer refers to an
    /// element of this map.
    pub fn span(&self, first: Position, last: Position) -> Result<Iter<'_, K, V>> {
        Ok(Iter {
            raw: self.tree.span(first, last)?,
        })
    }

    /// Move every element of `other` whose key is absent from `self` into
    /// `self`.
    ///
    /// Elements whose key is already present stay in `other`, and the
    /// values in `self` are not overwritten. Positions that `other` issued
    /// for the moved elements are stale in both maps afterwards.
    pub fn merge(&mut self, other: &mut Self) {
        self.tree.merge(&mut other.tree, Duplicates::Reject);
    }
}

impl<K, V, C> Debug for Map<K, V, C>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C> PartialEq for Map<K, V, C>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K, V, C> Eq for Map<K, V, C>
where
    K: Eq,
    V: Eq,
{
}

impl<K, V, C> FromIterator<(K, V)> for Map<K, V, C>
where
    C: Compare<K> + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut m = Self::default();
        m.extend(iter);
        m
    }
}

/// Pairs whose key is already present are dropped; the first value wins.
impl<K, V, C> Extend<(K, V)> for Map<K, V, C>
where
    C: Compare<K>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Map<K, V>
where
    K: Ord,
{
    fn from(v: [(K, V); N]) -> Self {
        v.into_iter().collect()
    }
}

impl<'a, K, V, C> IntoIterator for &'a Map<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C> IntoIterator for Map<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.tree.into_iter(),
        }
    }
}

/// An iterator over the pairs of a [`Map`] in ascending key order.
#[derive(Debug)]
pub struct Iter<'a, K, V> {
    raw: RawIter<'a, K, V>,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.raw.next().map(|n| (n.key(), n.value()))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.raw.next_back().map(|n| (n.key(), n.value()))
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// An iterator over the keys of a [`Map`].
#[derive(Debug)]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// An iterator over the values of a [`Map`], in key order.
#[derive(Debug)]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

/// An owning iterator over the pairs of a [`Map`] in ascending key order.
#[derive(Debug)]
pub struct IntoIter<K, V> {
    inner: OwnedIter<K, V>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use proptest::prelude::*;

    use super::*;
    use crate::test_utils::{arbitrary_key, validate_tree_structure};

    fn int_str() -> Map<i32, String> {
        [(1, "aboba"), (2, "shleppa"), (3, "amogus"), (4, "abobus")]
            .into_iter()
            .map(|(k, v)| (k, v.to_string()))
            .collect()
    }

    fn int_int() -> Map<i32, i32> {
        [10, 7, 9, 12, 6, 14, 11, 3, 4]
            .into_iter()
            .map(|v| (v, v))
            .collect()
    }

    fn keys<V, C>(m: &Map<i32, V, C>) -> Vec<i32> {
        m.keys().copied().collect()
    }

    #[test]
    fn test_construct_ordered() {
        let m = int_int();

        assert_eq!(m.len(), 9);
        assert_eq!(keys(&m), [3, 4, 6, 7, 9, 10, 11, 12, 14]);
        assert_eq!(m.first_key_value(), Some((&3, &3)));
        assert_eq!(m.last_key_value(), Some((&14, &14)));
        validate_tree_structure(&m.tree);
    }

    #[test]
    fn test_empty() {
        let m = Map::<i32, i32>::new();

        assert!(m.is_empty());
        assert_eq!(m.begin(), m.end());
        assert_eq!(m.first_key_value(), None);
        assert_eq!(m.prev(m.end()), Err(Error::EndPosition));
    }

    #[test]
    fn test_at() {
        let mut m = int_str();

        assert_eq!(m.at(&1).map(String::as_str), Ok("aboba"));
        assert_eq!(m.at(&2213), Err(Error::KeyNotFound));

        m.at_mut(&1).unwrap().push('!');
        assert_eq!(m.at(&1).map(String::as_str), Ok("aboba!"));
        assert_eq!(m.at_mut(&2213), Err(Error::KeyNotFound));
    }

    /// Indexing a missing key inserts a default value.
    #[test]
    fn test_get_or_insert_default() {
        let mut m = int_str();

        assert_eq!(m.get_or_insert_default(1), "aboba");
        assert_eq!(m.get_or_insert_default(555), "");
        assert_eq!(m.len(), 5);

        *m.get_or_insert_default(555) = "BIK".to_string();
        assert_eq!(m.get_or_insert_default(555), "BIK");
        assert_eq!(m.len(), 5);
    }

    #[test]
    fn test_get_or_insert_default_empty() {
        let mut m = Map::<i32, i32>::new();

        assert_eq!(*m.get_or_insert_default(5), 0);
        assert_eq!(m.len(), 1);

        *m.get_or_insert_default(5) = 42;
        assert_eq!(m.get(&5), Some(&42));
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn test_insert() {
        let mut m = int_int();

        let (pos, inserted) = m.insert(311, 113);
        assert!(inserted);
        assert_eq!(m.pair_at(pos), Ok((&311, &113)));

        // The existing value is kept.
        let (pos, inserted) = m.insert(10, 0);
        assert!(!inserted);
        assert_eq!(m.pair_at(pos), Ok((&10, &10)));
        assert_eq!(m.len(), 10);
    }

    #[test]
    fn test_insert_or_assign() {
        let mut m = int_int();

        let (pos, inserted) = m.insert_or_assign(311, 113);
        assert!(inserted);
        assert_eq!(m.pair_at(pos), Ok((&311, &113)));

        let (pos, inserted) = m.insert_or_assign(10, 1);
        assert!(!inserted);
        assert_eq!(m.pair_at(pos), Ok((&10, &1)));
        assert_eq!(m.len(), 10);
    }

    #[test]
    fn test_emplace() {
        let mut m = Map::<String, String>::new();

        assert!(m.emplace("Genom", "Vault").1);
        assert!(m.emplace("Univers", "Progress").1);
        assert!(!m.emplace("Genom", "ignored").1);

        assert_eq!(
            m.get(&"Genom".to_string()).map(String::as_str),
            Some("Vault")
        );
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn test_erase_third() {
        let mut m = int_str();

        let mut pos = m.begin();
        pos = m.next(pos).unwrap();
        pos = m.next(pos).unwrap();

        assert_eq!(m.erase(pos), Ok(Some((3, "amogus".to_string()))));
        assert_eq!(keys(&m), [1, 2, 4]);
        validate_tree_structure(&m.tree);
    }

    #[test]
    fn test_erase_keeps_other_positions() {
        let mut m = int_int();
        let positions = [3, 4, 6, 7, 9, 10, 11, 12, 14].map(|k| (k, m.find(&k)));

        // Erase a node with two children.
        m.erase(m.find(&10)).unwrap();

        for (k, pos) in positions {
            if k == 10 {
                assert_eq!(m.pair_at(pos), Err(Error::StalePosition));
            } else {
                assert_eq!(m.pair_at(pos), Ok((&k, &k)));
            }
        }
    }

    #[test]
    fn test_remove() {
        let mut m = int_str();

        assert_eq!(m.remove(&2).as_deref(), Some("shleppa"));
        assert_eq!(m.remove(&2), None);
        assert_eq!(m.remove_entry(&1), Some((1, "aboba".to_string())));
        assert_eq!(keys(&m), [3, 4]);
    }

    #[test]
    fn test_value_at_mut() {
        let mut m = int_int();
        let pos = m.find(&9);

        let (k, v) = m.value_at_mut(pos).unwrap();
        assert_eq!(*k, 9);
        *v = 99;

        assert_eq!(m.get(&9), Some(&99));
        assert_eq!(m.value_at_mut(m.end()), Err(Error::EndPosition));
    }

    #[test]
    fn test_bounds() {
        let m = int_int();

        assert_eq!(m.pair_at(m.lower_bound(&8)), Ok((&9, &9)));
        assert_eq!(m.pair_at(m.upper_bound(&9)), Ok((&10, &10)));

        let (lo, hi) = m.equal_range(&12);
        assert_eq!(
            m.span(lo, hi).unwrap().collect::<Vec<_>>(),
            [(&12, &12)]
        );
        assert!(m.lower_bound(&100).is_end());
        assert_eq!(m.count(&12), 1);
        assert_eq!(m.count(&13), 0);

        assert!(matches!(m.span(hi, lo), Err(Error::InvalidRange)));
        assert!(matches!(m.span(m.end(), lo), Err(Error::InvalidRange)));
    }

    #[test]
    fn test_merge() {
        let mut a = int_int();
        let mut b: Map<_, _> = [(3, 300), (100, 100), (200, 200)].into();

        a.merge(&mut b);

        assert_eq!(a.len(), 11);
        assert_eq!(a.get(&3), Some(&3));
        assert_eq!(a.get(&200), Some(&200));

        assert_eq!(b.iter().collect::<Vec<_>>(), [(&3, &300)]);
        validate_tree_structure(&a.tree);
        validate_tree_structure(&b.tree);
    }

    #[test]
    fn test_merge_positions() {
        let mut a = Map::from([(1, "a")]);
        let mut b = Map::from([(1, "x"), (2, "b")]);
        let kept = b.find(&1);
        let moved = b.find(&2);

        a.merge(&mut b);

        // The colliding element stays put, and its position stays valid.
        assert_eq!(b.pair_at(kept), Ok((&1, &"x")));
        assert_eq!(b.pair_at(moved), Err(Error::StalePosition));
        assert_eq!(a.pair_at(moved), Err(Error::StalePosition));
        assert_eq!(a.pair_at(kept), Err(Error::StalePosition));
        assert_eq!(a.pair_at(a.find(&2)), Ok((&2, &"b")));
    }

    #[test]
    fn test_copy_is_deep() {
        let m = int_str();
        let mut copy = m.clone();

        assert_eq!(copy, m);
        copy.get_mut(&1).unwrap().clear();

        assert_ne!(copy, m);
        assert_eq!(m.get(&1).map(String::as_str), Some("aboba"));
    }

    #[test]
    fn test_move_drains_source() {
        let mut m = int_str();
        let first = m.first_key_value().map(|(k, v)| (*k, v.clone()));

        let moved = std::mem::take(&mut m);

        assert!(m.is_empty());
        assert_eq!(moved.first_key_value().map(|(k, v)| (*k, v.clone())), first);
    }

    #[test]
    fn test_swap() {
        let mut a = int_int();
        let mut b = Map::from([(1, 1)]);

        a.swap(&mut b);

        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 9);
    }

    #[test]
    fn test_clear() {
        let mut m = Map::from([("one", 1), ("two", 2)]);
        m.clear();

        assert!(m.is_empty());
        assert_eq!(m.iter().count(), 0);
        assert_eq!(m.keys().next_back(), None);
    }

    #[test]
    fn test_iterators() {
        let m = int_int();

        assert_eq!(
            m.values().rev().copied().collect::<Vec<_>>(),
            [14, 12, 11, 10, 9, 7, 6, 4, 3]
        );

        let mut n = 0;
        for (k, v) in &m {
            assert_eq!(k, v);
            n += 1;
        }
        assert_eq!(n, m.len());

        let owned = m.into_iter().collect::<Vec<_>>();
        assert_eq!(owned.len(), 9);
        assert_eq!(owned[0], (3, 3));
    }

    #[test]
    fn test_string_keys() {
        let mut m = Map::new();
        m.insert("Terra".to_string(), 3);
        m.insert("Aer".to_string(), 1);
        m.insert("Ignis".to_string(), 2);

        assert_eq!(m.values().copied().collect::<Vec<_>>(), [1, 2, 3]);
    }

    #[test]
    fn test_debug() {
        assert_eq!(format!("{:?}", Map::from([(2, 'b'), (1, 'a')])), "{1: 'a', 2: 'b'}");
    }

    #[derive(Debug, Clone)]
    enum Op {
        Insert(u32, u8),
        Assign(u32, u8),
        Remove(u32),
        Erase(u32),
    }

    fn arbitrary_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (arbitrary_key(), any::<u8>()).prop_map(|(k, v)| Op::Insert(k, v)),
            (arbitrary_key(), any::<u8>()).prop_map(|(k, v)| Op::Assign(k, v)),
            arbitrary_key().prop_map(Op::Remove),
            arbitrary_key().prop_map(Op::Erase),
        ]
    }

    proptest! {
        /// Apply a sequence of operations to both a Map and a BTreeMap (a
        /// control model) and assert they agree after each step.
        #[test]
        fn prop_map_model(ops in prop::collection::vec(arbitrary_op(), 1..200)) {
            let mut m = Map::new();
            let mut model = BTreeMap::new();

            for op in ops {
                match op {
                    Op::Insert(k, v) => {
                        let want = !model.contains_key(&k);
                        model.entry(k).or_insert(v);
                        assert_eq!(m.insert(k, v).1, want);
                    }
                    Op::Assign(k, v) => {
                        let want = model.insert(k, v).is_none();
                        assert_eq!(m.insert_or_assign(k, v).1, want);
                    }
                    Op::Remove(k) => {
                        assert_eq!(m.remove(&k), model.remove(&k));
                    }
                    Op::Erase(k) => {
                        let pos = m.find(&k);
                        let got = m.erase(pos).unwrap();
                        assert_eq!(got, model.remove_entry(&k));
                    }
                }

                assert_eq!(m.len(), model.len());
            }

            validate_tree_structure(&m.tree);
            assert!(m.iter().eq(model.iter()));
        }

        /// Bound queries agree with the range queries of a BTreeMap.
        #[test]
        fn prop_bounds(
            keys in prop::collection::vec(arbitrary_key(), 0..100),
            needle in arbitrary_key(),
        ) {
            let m = keys.iter().map(|&k| (k, ())).collect::<Map<_, _>>();
            let model = keys.iter().map(|&k| (k, ())).collect::<BTreeMap<_, _>>();

            let want = model.range(needle..).next().map(|(k, _)| *k);
            assert_eq!(m.pair_at(m.lower_bound(&needle)).ok().map(|(k, _)| *k), want);

            let want = model.range(needle + 1..).next().map(|(k, _)| *k);
            assert_eq!(m.pair_at(m.upper_bound(&needle)).ok().map(|(k, _)| *k), want);
        }
    }
}
