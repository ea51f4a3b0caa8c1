//! A route table behind a reader-writer lock.

use std::sync::Arc;

use ipnet::IpNet;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::TableConfig;
use crate::error::Result;

use super::{RouteVisitor, TrieTable};

/// Handle to a [`TrieTable`] that can be cloned and shared between threads. Adding and deleting
/// routes take the lock exclusively, while lookups and dumps share it. Tables of different
/// families are separate handles with separate locks.
///
/// ```
/// # use route_trie::*;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let table = SharedTrieTable::new(false);
/// let writer = table.clone();
/// std::thread::spawn(move || writer.add("10.0.0.0/8", 10))
///     .join()
///     .unwrap()?;
/// assert_eq!(table.find("10.1.2.3")?.1, 10);
/// # Ok(())
/// # }
/// ```
pub struct SharedTrieTable<T> {
    inner: Arc<RwLock<TrieTable<T>>>,
}

impl<T> Clone for SharedTrieTable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> From<TrieTable<T>> for SharedTrieTable<T> {
    fn from(table: TrieTable<T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(table)),
        }
    }
}

impl<T> SharedTrieTable<T> {
    /// Create an empty table for IPv6 routes if `is_ipv6`, and for IPv4 routes otherwise.
    pub fn new(is_ipv6: bool) -> Self {
        TrieTable::new(is_ipv6).into()
    }

    /// Create an empty table with the given settings.
    pub fn with_config(config: TableConfig) -> Self {
        TrieTable::with_config(config).into()
    }

    /// See [`TrieTable::add`].
    pub fn add(&self, route: &str, payload: T) -> Result<()> {
        self.inner.write().add(route, payload)
    }

    /// See [`TrieTable::del`].
    pub fn del(&self, route: &str) -> Result<T> {
        self.inner.write().del(route)
    }

    /// See [`TrieTable::find`]. The payload is cloned so that the lock is released on return.
    pub fn find(&self, addr: &str) -> Result<(IpNet, T)>
    where
        T: Clone,
    {
        self.inner
            .read()
            .find(addr)
            .map(|(net, payload)| (net, payload.clone()))
    }

    /// Check if the canonical form of `route` is stored.
    pub fn contains(&self, route: &str) -> Result<bool> {
        self.inner.read().get(route).map(|payload| payload.is_some())
    }

    /// See [`TrieTable::dump`].
    pub fn dump<V>(&self, visitor: &mut V)
    where
        V: RouteVisitor<T> + ?Sized,
    {
        self.inner.read().dump(visitor)
    }

    /// Number of stored routes.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// `true` if no route is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hold the shared lock, for several lookups against the same state.
    pub fn read(&self) -> RwLockReadGuard<'_, TrieTable<T>> {
        self.inner.read()
    }

    /// Hold the exclusive lock, for a batch of changes that readers must see at once.
    pub fn write(&self) -> RwLockWriteGuard<'_, TrieTable<T>> {
        self.inner.write()
    }
}
