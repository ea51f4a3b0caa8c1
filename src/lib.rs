//! This crate provides a bitwise route table for IPv4 and IPv6 prefixes. Any lookup performs
//! longest-prefix match. Routes are addressed by CIDR text (`"192.168.1.0/24"`), normalized to
//! their network address, and carry an arbitrary payload.
//!
//! The crate has two layers:
//!
//! - [`PrefixTree`] is a binary trie over the bits of a single address family. It works on any
//!   type implementing [`Prefix`], which includes [`ipnet::Ipv4Net`], [`ipnet::Ipv6Net`], and any
//!   tuple `(R, u8)`, where `R` is an unsigned primitive integer (`u8`, `u16`, `u32`, `u64`, or
//!   `u128`).
//! - [`TrieTable`] wraps one tree per table and adds parsing of the textual routes, strict
//!   duplicate detection, and a text dump. [`SharedTrieTable`] shares a table between threads.
//!
//! ```
//! # use route_trie::*;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut table = TrieTable::new(false);
//! table.add("192.168.1.0/16", 99)?;
//! table.add("192.168.1.1/32", 1100)?;
//! table.add("0.0.0.0/0", 222)?;
//!
//! let (net, payload) = table.find("192.168.7.7")?;
//! assert_eq!((net.to_string(), *payload), ("192.168.0.0/16".to_string(), 99));
//!
//! assert_eq!(table.del("192.168.1.1/24"), Err(Error::RouteNotFound));
//! assert_eq!(table.del("192.168.1.1/32"), Ok(1100));
//! # Ok(())
//! # }
//! ```
//!
//! # Description of the Tree
//!
//! The tree has exactly one level per address bit. The root sits at depth 0 and stores the
//! default route, if any. Descending from a node at depth `d`, we look at bit `d` of the key
//! (counted from the most significant bit). If it is not set, we take the left branch, and
//! otherwise the right one. A route of length `l` is stored in the node at depth `l` on the path
//! of its network address. Host bits are discarded before any operation, so `10.1.2.3/8` and
//! `10.0.0.0/8` denote the same route.
//!
//! Nodes live in a single vector and refer to their children by index. Freed indices are kept in
//! a free list and reused by later inserts.
//!
//! # Operations on the tree
//!
//! The following are the computational complexities of the functions, where `w` is the width of
//! the address (32 or 128) and `n` is the number of routes in the tree.
//!
//! | Operation                            | Complexity |
//! |--------------------------------------|------------|
//! | `insert`, `remove`                   | `O(w)`     |
//! | `get`, `get_mut`, `contains_key`     | `O(w)`     |
//! | `lookup`, `get_lpm`                  | `O(w)`     |
//! | `iter`, `walk`, `dump`               | `O(n * w)` |
//! | `clear` (calling `drop` on `T`)      | `O(n)`     |
//! | `len` and `is_empty`                 | `O(1)`     |
//!
//! Inserting a prefix that is already stored fails with [`Error::DuplicateRoute`] and keeps the
//! existing payload. Removing a route prunes every node that is left without a value and without
//! children, walking back toward the root. Hence, a tree that had every route removed again
//! consists of the root only, independent of the order of insertions and removals.
//!
//! # Longest-prefix match
//!
//! [`PrefixTree::lookup`] and [`TrieTable::find`] descend along the bits of an address and
//! return the deepest node carrying a value. The returned prefix is rebuilt from the path, so it
//! is always the canonical form of the stored route.
//!
//! # Concurrency
//!
//! [`TrieTable`] has no interior locking. Mutations need `&mut self`, lookups `&self`. Wrap it in
//! a [`SharedTrieTable`] to serve lookups from many threads while a single writer adds or removes
//! routes.

#![deny(missing_docs)]

mod config;
pub mod error;
mod parse;
mod prefix;
#[cfg(feature = "serde")]
mod serde;
mod table;
mod tree;

#[cfg(test)]
mod fuzzing;

pub use config::{RemoveMode, TableConfig};
pub use error::Error;
pub use parse::{parse_address, parse_network, parse_prefix, AddressFamily};
pub use prefix::{bit_at, mask_from_prefix_len, Prefix};
pub use table::{RouteVisitor, SharedTrieTable, TrieTable};
pub use tree::{Covering, Iter, Keys, PrefixTree, Values};
