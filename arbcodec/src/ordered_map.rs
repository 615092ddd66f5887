//! An insertion-ordered string-keyed map.
//!
//! Output determinism depends on it: ARB documents must keep `@@locale`
//! first and message/attribute pairs adjacent, and placeholder metadata must
//! serialize in first-seen-in-text order. `serde_json` objects do not keep
//! document order, so this map stores an explicit key list next to the
//! values and serializes oldest-to-newest.

use std::collections::HashMap;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderedMap<V> {
    keys: Vec<String>,
    values: HashMap<String, V>,
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        OrderedMap {
            keys: Vec::new(),
            values: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.values.get(key)
    }

    /// Inserts a value. A key that is already present keeps its original
    /// position; only the value is replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        if !self.values.contains_key(&key) {
            self.keys.push(key.clone());
        }
        self.values.insert(key, value);
    }

    /// Iterates entries oldest-to-newest.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &V)> {
        self.keys.iter().map(|key| (key, &self.values[key]))
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.keys.iter()
    }
}

impl<V> FromIterator<(String, V)> for OrderedMap<V> {
    fn from_iter<T: IntoIterator<Item = (String, V)>>(iter: T) -> Self {
        let mut map = OrderedMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedMapVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
            type Value = OrderedMap<V>;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                // serde visits object entries in document order, which is
                // exactly the order we want to keep.
                let mut map = OrderedMap::new();
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_preserves_order() {
        let mut map = OrderedMap::new();
        map.insert("zebra", 1);
        map.insert("apple", 2);
        map.insert("mango", 3);

        let keys: Vec<&String> = map.keys().collect();
        assert_eq!(keys, ["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut map = OrderedMap::new();
        map.insert("a", 1);
        map.insert("b", 2);
        map.insert("a", 3);

        let entries: Vec<(&String, &i32)> = map.iter().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, "a");
        assert_eq!(*entries[0].1, 3);
    }

    #[test]
    fn test_serialize_in_insertion_order() {
        let mut map = OrderedMap::new();
        map.insert("zebra", 1);
        map.insert("apple", 2);

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"zebra":1,"apple":2}"#);
    }

    #[test]
    fn test_deserialize_keeps_document_order() {
        let map: OrderedMap<i32> = serde_json::from_str(r#"{"z":1,"a":2,"m":3}"#).unwrap();
        let keys: Vec<&String> = map.keys().collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn test_get_and_contains() {
        let mut map = OrderedMap::new();
        map.insert("key", "value");
        assert!(map.contains_key("key"));
        assert_eq!(map.get("key"), Some(&"value"));
        assert_eq!(map.get("missing"), None);
    }
}
