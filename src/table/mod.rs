//! The user-facing route table, addressed by CIDR text.

use std::fmt::Display;
use std::net::IpAddr;

use either::{for_both, Either};
use ipnet::{IpNet, Ipv4Net, Ipv6Net};
use log::{debug, trace};

use crate::config::{RemoveMode, TableConfig};
use crate::error::{Error, Result};
use crate::parse::{parse_address, parse_network, AddressFamily};
use crate::tree::PrefixTree;

mod shared;

pub use shared::SharedTrieTable;

/// Receiver of [`TrieTable::dump`]. The table asks the visitor to format each payload, and then
/// hands it the finished line `<network>/<length> : <payload>`.
pub trait RouteVisitor<T> {
    /// Receive one formatted route.
    fn on_route(&mut self, line: &str);

    /// Render a payload as text.
    fn format_payload(&self, payload: &T) -> String;
}

/// Collects the dumped lines.
impl<T: Display> RouteVisitor<T> for Vec<String> {
    fn on_route(&mut self, line: &str) {
        self.push(line.to_string())
    }

    fn format_payload(&self, payload: &T) -> String {
        payload.to_string()
    }
}

/// Longest-prefix-match table for the routes of one address family. Each route carries an
/// opaque payload of type `T`.
///
/// The table has no internal locking: mutations take `&mut self` and lookups `&self`. Use
/// [`SharedTrieTable`] to share a table between threads.
///
/// ```
/// # use route_trie::*;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut table = TrieTable::new(false);
/// table.add("192.168.1.0/8", 1)?;
/// table.add("0.0.0.0/0", 222)?;
/// assert_eq!(table.add("192.0.0.0/8", 2), Err(Error::DuplicateRoute));
///
/// let (net, payload) = table.find("192.41.3.1")?;
/// assert_eq!((net.to_string(), *payload), ("192.0.0.0/8".to_string(), 1));
/// let (net, payload) = table.find("195.41.3.1")?;
/// assert_eq!((net.to_string(), *payload), ("0.0.0.0/0".to_string(), 222));
///
/// assert_eq!(table.del("0.0.0.0/0")?, 222);
/// assert_eq!(table.find("195.41.3.1"), Err(Error::NotFound));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TrieTable<T> {
    config: TableConfig,
    tree: Either<PrefixTree<Ipv4Net, T>, PrefixTree<Ipv6Net, T>>,
}

impl<T> TrieTable<T> {
    /// Create an empty table for IPv6 routes if `is_ipv6`, and for IPv4 routes otherwise.
    pub fn new(is_ipv6: bool) -> Self {
        let family = if is_ipv6 {
            AddressFamily::Ipv6
        } else {
            AddressFamily::Ipv4
        };
        Self::with_config(TableConfig::new(family))
    }

    /// Create an empty table with the given settings.
    pub fn with_config(config: TableConfig) -> Self {
        let tree = match config.family {
            AddressFamily::Ipv4 => Either::Left(PrefixTree::new()),
            AddressFamily::Ipv6 => Either::Right(PrefixTree::new()),
        };
        Self { config, tree }
    }

    /// Settings the table was created with.
    pub fn config(&self) -> TableConfig {
        self.config
    }

    /// Address family of the table.
    pub fn family(&self) -> AddressFamily {
        self.config.family
    }

    /// Number of stored routes.
    pub fn len(&self) -> usize {
        for_both!(&self.tree, tree => tree.len())
    }

    /// `true` if no route is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of live tree nodes, including the root. It is 1 for an empty table.
    pub fn node_count(&self) -> usize {
        for_both!(&self.tree, tree => tree.node_count())
    }

    /// Add a route. Host bits beyond the prefix length are ignored, and a bare address is a host
    /// route.
    pub fn add(&mut self, route: &str, payload: T) -> Result<()> {
        let net = parse_network(route, self.family())?.trunc();
        match self.insert_net(net, payload) {
            Ok(()) => {
                trace!("added route {net}");
                Ok(())
            }
            Err(e) => {
                debug!("rejected route {route}: {e}");
                Err(e)
            }
        }
    }

    /// Delete a route and return its payload. Matching follows the configured [`RemoveMode`].
    ///
    /// ```
    /// # use route_trie::*;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut strict = TrieTable::new(false);
    /// strict.add("1.1.1.1/32", 1212)?;
    /// assert_eq!(strict.del("1.1.1.1/24"), Err(Error::RouteNotFound));
    ///
    /// let mut loose = TrieTable::with_config(TableConfig::default().remove_mode(RemoveMode::Loose));
    /// loose.add("1.1.1.1/32", 1212)?;
    /// assert_eq!(loose.del("1.1.1.1/24"), Ok(1212));
    /// # Ok(())
    /// # }
    /// ```
    pub fn del(&mut self, route: &str) -> Result<T> {
        let net = parse_network(route, self.family())?;
        let removed = match self.remove_net(net.trunc()) {
            Err(Error::RouteNotFound) if self.config.remove_mode == RemoveMode::Loose => {
                self.remove_loose(net.addr())
            }
            res => res,
        };
        match &removed {
            Ok(_) => trace!("deleted route {route}"),
            Err(e) => debug!("cannot delete route {route}: {e}"),
        }
        removed
    }

    /// Longest-prefix match of a bare address. Returns the canonical matching network and its
    /// payload.
    pub fn find(&self, addr: &str) -> Result<(IpNet, &T)> {
        let addr = parse_address(addr, self.family())?;
        let found = match (&self.tree, addr) {
            (Either::Left(tree), IpAddr::V4(a)) => {
                tree.lookup(a.into()).map(|(p, v)| (IpNet::V4(p), v))
            }
            (Either::Right(tree), IpAddr::V6(a)) => {
                tree.lookup(a.into()).map(|(p, v)| (IpNet::V6(p), v))
            }
            _ => None,
        };
        found.ok_or(Error::NotFound)
    }

    /// Exact match of a route, after canonicalization.
    pub fn get(&self, route: &str) -> Result<Option<&T>> {
        let net = parse_network(route, self.family())?.trunc();
        Ok(match (&self.tree, net) {
            (Either::Left(tree), IpNet::V4(p)) => tree.get(&p),
            (Either::Right(tree), IpNet::V6(p)) => tree.get(&p),
            _ => None,
        })
    }

    /// All routes in lexicographic order, each with its canonical network.
    pub fn iter(&self) -> impl Iterator<Item = (IpNet, &T)> + '_ {
        match &self.tree {
            Either::Left(tree) => Either::Left(tree.iter().map(|(p, v)| (IpNet::V4(p), v))),
            Either::Right(tree) => Either::Right(tree.iter().map(|(p, v)| (IpNet::V6(p), v))),
        }
    }

    /// Emit one line per route to `visitor`, in the order of [`Self::iter`]. The visitor formats
    /// the payload before the line is composed.
    ///
    /// ```
    /// # use route_trie::*;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut table = TrieTable::new(false);
    /// table.add("8.8.8.8/32", 1200)?;
    /// table.add("0.0.0.0/0", 222)?;
    /// let mut lines: Vec<String> = Vec::new();
    /// table.dump(&mut lines);
    /// assert_eq!(lines, vec!["0.0.0.0/0 : 222", "8.8.8.8/32 : 1200"]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn dump<V>(&self, visitor: &mut V)
    where
        V: RouteVisitor<T> + ?Sized,
    {
        for (net, payload) in self.iter() {
            let payload = visitor.format_payload(payload);
            visitor.on_route(&format!("{net} : {payload}"));
        }
    }

    /// Remove all routes.
    pub fn clear(&mut self) {
        for_both!(&mut self.tree, tree => tree.clear())
    }

    /// Insert an already canonical network of the table's family.
    pub(crate) fn insert_net(&mut self, net: IpNet, payload: T) -> Result<()> {
        match (&mut self.tree, net) {
            (Either::Left(tree), IpNet::V4(p)) => tree.insert(p, payload),
            (Either::Right(tree), IpNet::V6(p)) => tree.insert(p, payload),
            _ => Err(Error::MalformedPrefix(net.to_string())),
        }
    }

    fn remove_net(&mut self, net: IpNet) -> Result<T> {
        match (&mut self.tree, net) {
            (Either::Left(tree), IpNet::V4(p)) => tree.remove(&p),
            (Either::Right(tree), IpNet::V6(p)) => tree.remove(&p),
            _ => Err(Error::RouteNotFound),
        }
    }

    /// Remove the only route whose network address is `addr`.
    fn remove_loose(&mut self, addr: IpAddr) -> Result<T> {
        let candidates: Vec<IpNet> = match (&self.tree, addr) {
            (Either::Left(tree), IpAddr::V4(a)) => tree
                .covering(a.into())
                .map(|(p, _)| IpNet::V4(p))
                .filter(|p| p.network() == addr)
                .collect(),
            (Either::Right(tree), IpAddr::V6(a)) => tree
                .covering(a.into())
                .map(|(p, _)| IpNet::V6(p))
                .filter(|p| p.network() == addr)
                .collect(),
            _ => Vec::new(),
        };
        match candidates.as_slice() {
            [] => Err(Error::RouteNotFound),
            [net] => {
                trace!("loose delete of {addr} matched {net}");
                self.remove_net(*net)
            }
            many => Err(Error::AmbiguousRoute(many.len())),
        }
    }
}
