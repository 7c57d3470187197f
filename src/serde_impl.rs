//! [`serde`] support, enabled by the `serde` feature.
//!
//! A [`Map`] is encoded as a map, while [`Set`] and [`Multiset`] are encoded
//! as sequences in ascending order.
//!
//! Decoding inserts elements one at a time. For maps a later duplicate key
//! overwrites the earlier value, while sets keep the first of any duplicate
//! keys.

use std::{fmt, marker::PhantomData};

use serde::{
    de::{MapAccess, SeqAccess, Visitor},
    ser::{SerializeMap, SerializeSeq},
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::{compare::Compare, map::Map, multiset::Multiset, set::Set};

impl<K, V, C> Serialize for Map<K, V, C>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct MapVisitor<K, V, C> {
    marker: PhantomData<fn() -> Map<K, V, C>>,
}

impl<'de, K, V, C> Visitor<'de> for MapVisitor<K, V, C>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
    C: Compare<K> + Default,
{
    type Value = Map<K, V, C>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = Map::default();
        while let Some((key, value)) = access.next_entry()? {
            map.insert_or_assign(key, value);
        }
        Ok(map)
    }
}

impl<'de, K, V, C> Deserialize<'de> for Map<K, V, C>
where
    K: Deserialize<'de>,
    V: Deserialize<'de>,
    C: Compare<K> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(MapVisitor {
            marker: PhantomData,
        })
    }
}

fn serialize_keys<'a, K, I, S>(len: usize, keys: I, serializer: S) -> Result<S::Ok, S::Error>
where
    K: Serialize + 'a,
    I: Iterator<Item = &'a K>,
    S: Serializer,
{
    let mut seq = serializer.serialize_seq(Some(len))?;
    for key in keys {
        seq.serialize_element(key)?;
    }
    seq.end()
}

impl<K, C> Serialize for Set<K, C>
where
    K: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_keys(self.len(), self.iter(), serializer)
    }
}

impl<K, C> Serialize for Multiset<K, C>
where
    K: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_keys(self.len(), self.iter(), serializer)
    }
}

/// Decodes any sequence into a collection built through [`Extend`].
struct SeqVisitor<T, K> {
    expecting: &'static str,
    marker: PhantomData<fn() -> (T, K)>,
}

impl<'de, T, K> Visitor<'de> for SeqVisitor<T, K>
where
    T: Default + Extend<K>,
    K: Deserialize<'de>,
{
    type Value = T;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.expecting)
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut out = T::default();
        while let Some(key) = access.next_element()? {
            out.extend(std::iter::once(key));
        }
        Ok(out)
    }
}

impl<'de, K, C> Deserialize<'de> for Set<K, C>
where
    K: Deserialize<'de>,
    C: Compare<K> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(SeqVisitor::<Self, K> {
            expecting: "a sequence of set keys",
            marker: PhantomData,
        })
    }
}

impl<'de, K, C> Deserialize<'de> for Multiset<K, C>
where
    K: Deserialize<'de>,
    C: Compare<K> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(SeqVisitor::<Self, K> {
            expecting: "a sequence of multiset keys",
            marker: PhantomData,
        })
    }
}
