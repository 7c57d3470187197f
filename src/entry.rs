use crate::{
    compare::Compare,
    map::Map,
    node::{Node, NodeId},
    tree::Duplicates,
};

/// A view into a single entry in a [`Map`], which may either be vacant or
/// occupied.
///
/// This `enum` is constructed from the [`entry`] method on [`Map`].
///
/// [`entry`]: Map::entry
#[derive(Debug)]
pub enum Entry<'a, K, V, C> {
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V, C>),
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V, C>),
}

/// A view into a vacant entry in a [`Map`].
/// It is part of the [`Entry`] enum.
#[derive(Debug)]
pub struct VacantEntry<'a, K, V, C> {
    key: K,
    map: &'a mut Map<K, V, C>,
}

/// A view into an occupied entry in a [`Map`].
/// It is part of the [`Entry`] enum.
#[derive(Debug)]
pub struct OccupiedEntry<'a, K, V, C> {
    id: NodeId,
    map: &'a mut Map<K, V, C>,
}

impl<'a, K, V, C> VacantEntry<'a, K, V, C>
where
    C: Compare<K>,
{
    /// Gets a reference to the key that would be used when inserting a value
    /// through the VacantEntry.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Take ownership of the key.
    #[inline]
    pub fn into_key(self) -> K {
        self.key
    }

    /// Sets the value of the entry with the VacantEntry's key,
    /// and returns a mutable reference to it.
    #[inline]
    pub fn insert(self, value: V) -> &'a mut V {
        self.insert_entry(value).into_mut()
    }

    /// Sets the value of the entry and returns an [`OccupiedEntry`] for it.
    #[inline]
    pub fn insert_entry(self, value: V) -> OccupiedEntry<'a, K, V, C> {
        let (id, inserted) = self
            .map
            .tree_mut()
            .insert(self.key, value, Duplicates::Reject);
        debug_assert!(inserted, "vacant entry key already present");

        OccupiedEntry { id, map: self.map }
    }
}

impl<'a, K, V, C> OccupiedEntry<'a, K, V, C> {
    fn node(&self) -> &Node<K, V> {
        &self.map.tree().nodes()[self.id]
    }

    /// Gets a reference to the key in the entry.
    #[inline]
    pub fn key(&self) -> &K {
        self.node().key()
    }

    /// Gets a reference to the value in the entry.
    #[inline]
    pub fn get(&self) -> &V {
        self.node().value()
    }

    /// Gets a mutable reference to the value in the entry.
    #[inline]
    pub fn get_mut(&mut self) -> &mut V {
        self.map.tree_mut().nodes_mut()[self.id].value_mut()
    }

    /// Converts the entry into a mutable reference to its value.
    #[inline]
    pub fn into_mut(self) -> &'a mut V {
        let map = self.map;
        map.tree_mut().nodes_mut()[self.id].value_mut()
    }

    /// Sets the value of the entry, and returns the entry's old value.
    #[inline]
    pub fn insert(&mut self, value: V) -> V {
        std::mem::replace(self.get_mut(), value)
    }

    /// Takes the value of the entry out of the map, and returns it.
    #[inline]
    pub fn remove(self) -> V {
        self.remove_entry().1
    }

    /// Takes the key and value of the entry out of the map.
    pub fn remove_entry(self) -> (K, V) {
        match self.map.tree_mut().remove(self.id) {
            Some(node) => node.into_tuple(),
            None => unreachable!("occupied entry refers to a removed node"),
        }
    }
}

impl<'a, K, V, C> Entry<'a, K, V, C>
where
    C: Compare<K>,
{
    /// Create a new Entry for the given key and map.
    pub(crate) fn new(key: K, map: &'a mut Map<K, V, C>) -> Self {
        match map.tree().find(&key) {
            Some(id) => Entry::Occupied(OccupiedEntry { id, map }),
            None => Entry::Vacant(VacantEntry { key, map }),
        }
    }

    /// Returns a reference to this entry's key.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::Map;
    ///
    /// let mut map: Map<&str, u32> = Map::new();
    /// assert_eq!(map.entry("poneyland").key(), &"poneyland");
    /// ```
    #[inline]
    pub fn key(&self) -> &K {
        match self {
            Entry::Vacant(entry) => entry.key(),
            Entry::Occupied(entry) => entry.key(),
        }
    }

    /// Ensures a value is in the entry by inserting the default if empty,
    /// and returns a mutable reference to the value in the entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::Map;
    ///
    /// let mut map: Map<&str, u32> = Map::new();
    ///
    /// map.entry("poneyland").or_insert(42);
    /// assert_eq!(map.get(&"poneyland"), Some(&42));
    ///
    /// *map.entry("poneyland").or_insert(100) += 1;
    /// assert_eq!(map.get(&"poneyland"), Some(&43));
    /// ```
    #[inline]
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Ensures a value is in the entry by inserting the result of the default
    /// function if empty, and returns a mutable reference to the value in the
    /// entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::Map;
    ///
    /// let mut map: Map<&str, String> = Map::new();
    /// let s = "hello".to_string();
    ///
    /// map.entry("poneyland").or_insert_with(|| s);
    ///
    /// assert_eq!(map.get(&"poneyland"), Some(&"hello".to_string()));
    /// ```
    #[inline]
    pub fn or_insert_with<F: FnOnce() -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Ensures a value is in the entry by inserting, if empty, the result of
    /// the default function, which is given a reference to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::Map;
    ///
    /// let mut map: Map<&str, usize> = Map::new();
    ///
    /// map.entry("poneyland").or_insert_with_key(|key| key.chars().count());
    ///
    /// assert_eq!(map.get(&"poneyland"), Some(&9));
    /// ```
    #[inline]
    pub fn or_insert_with_key<F: FnOnce(&K) -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let value = default(entry.key());
                entry.insert(value)
            }
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts into the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::Map;
    ///
    /// let mut map: Map<&str, u32> = Map::new();
    ///
    /// map.entry("poneyland")
    ///     .and_modify(|v| *v += 1)
    ///     .or_insert(42);
    /// assert_eq!(map.get(&"poneyland"), Some(&42));
    ///
    /// map.entry("poneyland")
    ///     .and_modify(|v| *v += 1)
    ///     .or_insert(42);
    /// assert_eq!(map.get(&"poneyland"), Some(&43));
    /// ```
    #[inline]
    pub fn and_modify<F: FnOnce(&mut V)>(mut self, f: F) -> Self {
        if let Entry::Occupied(entry) = &mut self {
            f(entry.get_mut());
        }
        self
    }

    /// Sets the value of the entry, and returns an OccupiedEntry.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::Map;
    ///
    /// let mut map: Map<&str, &str> = Map::new();
    /// let entry = map.entry("poneyland").insert_entry("hoho");
    ///
    /// assert_eq!(entry.key(), &"poneyland");
    /// assert_eq!(entry.get(), &"hoho");
    /// ```
    #[inline]
    pub fn insert_entry(self, value: V) -> OccupiedEntry<'a, K, V, C> {
        match self {
            Entry::Occupied(mut entry) => {
                entry.insert(value);
                entry
            }
            Entry::Vacant(entry) => entry.insert_entry(value),
        }
    }
}

impl<'a, K, V, C> Entry<'a, K, V, C>
where
    C: Compare<K>,
    V: Default,
{
    /// Ensures a value is in the entry by inserting the default value if empty,
    /// and returns a mutable reference to the value in the entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::Map;
    ///
    /// let mut map: Map<&str, Option<u32>> = Map::new();
    /// map.entry("poneyland").or_default();
    ///
    /// assert_eq!(map.get(&"poneyland"), Some(&None));
    /// ```
    #[inline]
    pub fn or_default(self) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(V::default()),
        }
    }
}
