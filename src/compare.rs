use std::fmt::Debug;

/// A strict weak ordering over keys of type `K`.
///
/// Two keys `a` and `b` are treated as equivalent when neither
/// `less(a, b)` nor `less(b, a)` holds. No other notion of key equality is
/// used by the containers in this crate.
pub trait Compare<K: ?Sized> {
    /// Returns true when `a` is ordered strictly before `b`.
    fn less(&self, a: &K, b: &K) -> bool;

    /// Returns true when `a` and `b` occupy the same position in the order.
    fn equivalent(&self, a: &K, b: &K) -> bool {
        !self.less(a, b) && !self.less(b, a)
    }
}

/// Ascending order of the key's [`Ord`] implementation.
///
/// This is the default comparator of all containers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Less;

impl<K> Compare<K> for Less
where
    K: Ord + ?Sized,
{
    fn less(&self, a: &K, b: &K) -> bool {
        a < b
    }
}

/// Descending order of the key's [`Ord`] implementation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Greater;

impl<K> Compare<K> for Greater
where
    K: Ord + ?Sized,
{
    fn less(&self, a: &K, b: &K) -> bool {
        a > b
    }
}

/// A comparator backed by a "less than" closure.
///
/// ```
/// use ordtree::{ByFn, Set};
///
/// // Order strings by length only.
/// let mut s = Set::with_compare(ByFn(|a: &&str, b: &&str| a.len() < b.len()));
/// s.insert("ccc");
/// s.insert("a");
/// s.insert("bb");
///
/// // "zz" is equivalent to "bb" under this ordering.
/// assert!(s.contains(&"zz"));
/// assert_eq!(s.iter().copied().collect::<Vec<_>>(), ["a", "bb", "ccc"]);
/// ```
#[derive(Clone, Copy)]
pub struct ByFn<F>(pub F);

impl<K, F> Compare<K> for ByFn<F>
where
    K: ?Sized,
    F: Fn(&K, &K) -> bool,
{
    fn less(&self, a: &K, b: &K) -> bool {
        (self.0)(a, b)
    }
}

impl<F> Debug for ByFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ByFn").finish_non_exhaustive()
    }
}
