//! Serialization and Deserialization implementation

use std::collections::HashMap;

use ::serde::de::Error as _;
use ::serde::ser::SerializeStruct;
use ::serde::{Deserialize, Deserializer, Serialize, Serializer};
use ipnet::IpNet;

use super::*;

impl<P: Prefix + Serialize, T: Serialize> Serialize for PrefixTree<P, T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

impl<'de, P, T> Deserialize<'de> for PrefixTree<P, T>
where
    P: Prefix + Deserialize<'de> + Eq + std::hash::Hash,
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map: HashMap<P, T> = HashMap::deserialize(deserializer)?;
        let mut tree = Self::new();
        for (prefix, value) in map {
            // two keys that only differ in their host bits are the same route.
            tree.insert(prefix, value).map_err(D::Error::custom)?;
        }
        Ok(tree)
    }
}

/// The routes of a table, as a map from network to payload.
struct Routes<'a, T>(&'a TrieTable<T>);

impl<T: Serialize> Serialize for Routes<'_, T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.0.iter())
    }
}

impl<T: Serialize> Serialize for TrieTable<T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut table = serializer.serialize_struct("TrieTable", 2)?;
        table.serialize_field("config", &self.config())?;
        table.serialize_field("routes", &Routes(self))?;
        table.end()
    }
}

#[derive(Deserialize)]
struct RawTable<T> {
    #[serde(default)]
    config: TableConfig,
    routes: HashMap<IpNet, T>,
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for TrieTable<T> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: RawTable<T> = RawTable::deserialize(deserializer)?;
        let mut table = TrieTable::with_config(raw.config);
        for (net, payload) in raw.routes {
            table
                .insert_net(net.trunc(), payload)
                .map_err(D::Error::custom)?;
        }
        Ok(table)
    }
}
