//! Construction-time settings of a [`TrieTable`](crate::TrieTable).

use crate::parse::AddressFamily;

/// How a delete request is matched against the stored routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RemoveMode {
    /// Only the route with the same canonical prefix and length is removed.
    #[default]
    Strict,
    /// If no route matches strictly, remove the single route whose network address equals the
    /// address written in the request, whatever its length. `1.1.1.1/24` then removes
    /// `1.1.1.1/32`. If several routes share that network address, nothing is removed.
    Loose,
}

/// Settings of a route table.
///
/// ```
/// # use route_trie::*;
/// let config = TableConfig::new(AddressFamily::Ipv6).remove_mode(RemoveMode::Loose);
/// let table: TrieTable<u32> = TrieTable::with_config(config);
/// assert_eq!(table.family(), AddressFamily::Ipv6);
/// assert_eq!(TableConfig::default().remove_mode, RemoveMode::Strict);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TableConfig {
    /// Address family of all routes in the table.
    pub family: AddressFamily,
    /// Matching rule of deletions.
    pub remove_mode: RemoveMode,
}

impl TableConfig {
    /// Strict configuration for the given family.
    pub fn new(family: AddressFamily) -> Self {
        Self {
            family,
            remove_mode: RemoveMode::Strict,
        }
    }

    /// Replace the matching rule of deletions.
    pub fn remove_mode(mut self, remove_mode: RemoveMode) -> Self {
        self.remove_mode = remove_mode;
        self
    }
}
