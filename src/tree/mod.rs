//! The bitwise prefix tree of a single address family.

use std::marker::PhantomData;

use log::trace;

use crate::error::{Error, Result};
use crate::prefix::{bit_at, mask_from_prefix_len, Prefix};

mod fmt;
mod iter;

pub use iter::*;

/// Binary trie with one level per address bit. Node `0` is the root at depth 0. It is never
/// removed and carries the default route, if any.
///
/// Every stored route owns exactly one node at the depth of its prefix length. Nodes that neither
/// carry a route nor have any children are removed as soon as a removal leaves them dead.
#[derive(Clone)]
pub struct PrefixTree<P, T> {
    pub(crate) table: Vec<Node<T>>,
    free: Vec<usize>,
    len: usize,
    _prefix: PhantomData<P>,
}

impl<P, T> Default for PrefixTree<P, T>
where
    P: Prefix,
{
    fn default() -> Self {
        Self {
            table: vec![Node::new(0)],
            free: Vec::new(),
            len: 0,
            _prefix: PhantomData,
        }
    }
}

impl<P, T> PrefixTree<P, T>
where
    P: Prefix,
{
    /// Create an empty tree, holding only the root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored routes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` if no route is stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of live nodes, including the root. An empty tree has exactly one node.
    ///
    /// ```
    /// # use route_trie::*;
    /// # use ipnet::Ipv4Net;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut tree: PrefixTree<Ipv4Net, _> = PrefixTree::new();
    /// tree.insert("10.0.0.0/8".parse()?, 1)?;
    /// assert_eq!(tree.node_count(), 9);
    /// tree.remove(&"10.0.0.0/8".parse()?)?;
    /// assert_eq!(tree.node_count(), 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn node_count(&self) -> usize {
        self.table.len() - self.free.len()
    }

    /// Store `value` under the canonical form of `prefix`. Nodes missing on the path are created.
    /// If the prefix is already present, the tree stays unmodified and
    /// [`Error::DuplicateRoute`] is returned. A prefix length beyond [`Prefix::width`] is
    /// [`Error::MalformedPrefix`].
    ///
    /// ```
    /// # use route_trie::*;
    /// # use ipnet::Ipv4Net;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut tree: PrefixTree<Ipv4Net, _> = PrefixTree::new();
    /// tree.insert("192.168.1.0/16".parse()?, 99)?;
    /// assert_eq!(tree.insert("192.168.0.0/16".parse()?, 1), Err(Error::DuplicateRoute));
    /// assert_eq!(tree.get(&"192.168.0.0/16".parse()?), Some(&99));
    /// # Ok(())
    /// # }
    /// ```
    pub fn insert(&mut self, prefix: P, value: T) -> Result<()> {
        let len = checked_len(&prefix)?;
        let key = prefix.mask();
        let mut idx = 0;
        for bit in 0..len {
            let right = bit_at(key, bit);
            idx = match self.table[idx].child(right) {
                Some(next) => next,
                None => {
                    let new = self.new_node(bit + 1);
                    self.table[idx].set_child(right, new);
                    new
                }
            };
        }
        // a node that carries a value was never created above, so rejecting here leaves the
        // tree exactly as it was.
        let node = &mut self.table[idx];
        if node.value.is_some() {
            return Err(Error::DuplicateRoute);
        }
        node.value = Some(value);
        self.len += 1;
        Ok(())
    }

    /// Remove the route stored under the canonical form of `prefix` and return its value. All
    /// nodes left without a value and without children are pruned, walking back toward the
    /// root.
    ///
    /// ```
    /// # use route_trie::*;
    /// # use ipnet::Ipv4Net;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut tree: PrefixTree<Ipv4Net, _> = PrefixTree::new();
    /// tree.insert("192.0.0.0/8".parse()?, 1)?;
    /// assert_eq!(tree.remove(&"192.168.1.0/8".parse()?), Ok(1));
    /// assert_eq!(tree.remove(&"192.0.0.0/8".parse()?), Err(Error::RouteNotFound));
    /// # Ok(())
    /// # }
    /// ```
    pub fn remove(&mut self, prefix: &P) -> Result<T> {
        let len = checked_len(prefix)?;
        let key = prefix.mask();
        // every node entered on the way down, together with the branch taken from it.
        let mut path: Vec<(usize, bool)> = Vec::with_capacity(len as usize);
        let mut idx = 0;
        for bit in 0..len {
            let right = bit_at(key, bit);
            match self.table[idx].child(right) {
                Some(next) => {
                    path.push((idx, right));
                    idx = next;
                }
                None => return Err(Error::RouteNotFound),
            }
        }
        let value = self.table[idx].value.take().ok_or(Error::RouteNotFound)?;
        self.len -= 1;

        let mut pruned = 0;
        let mut child = idx;
        while let Some((parent, right)) = path.pop() {
            if !self.table[child].is_dead() {
                break;
            }
            self.table[parent].clear_child(right);
            self.free.push(child);
            pruned += 1;
            child = parent;
        }
        trace!("removed route at depth {len}, pruned {pruned} nodes");
        Ok(value)
    }

    /// Get the value of a route by matching exactly on the canonical prefix.
    pub fn get(&self, prefix: &P) -> Option<&T> {
        self.find_node(prefix)
            .and_then(|idx| self.table[idx].value.as_ref())
    }

    /// Get a mutable reference to the value of a route by matching exactly on the canonical
    /// prefix.
    pub fn get_mut(&mut self, prefix: &P) -> Option<&mut T> {
        self.find_node(prefix)
            .and_then(|idx| self.table[idx].value.as_mut())
    }

    /// Check if the canonical prefix is stored.
    pub fn contains_key(&self, prefix: &P) -> bool {
        self.get(prefix).is_some()
    }

    /// Longest-prefix match of a single address. The address is used unmasked, all of its bits
    /// are consumed until the path ends. The returned prefix is the canonical form of the
    /// matching route.
    ///
    /// ```
    /// # use route_trie::*;
    /// # use ipnet::Ipv4Net;
    /// # use std::net::Ipv4Addr;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut tree: PrefixTree<Ipv4Net, _> = PrefixTree::new();
    /// tree.insert("192.0.0.0/8".parse()?, 1)?;
    /// tree.insert("0.0.0.0/0".parse()?, 222)?;
    /// let addr: u32 = Ipv4Addr::new(192, 41, 3, 1).into();
    /// assert_eq!(tree.lookup(addr), Some(("192.0.0.0/8".parse()?, &1)));
    /// let addr: u32 = Ipv4Addr::new(195, 41, 3, 1).into();
    /// assert_eq!(tree.lookup(addr), Some(("0.0.0.0/0".parse()?, &222)));
    /// # Ok(())
    /// # }
    /// ```
    pub fn lookup(&self, addr: P::R) -> Option<(P, &T)> {
        self.longest_match(addr, P::width())
    }

    /// Longest-prefix match of a prefix: the longest stored route that contains `prefix`
    /// (including `prefix` itself).
    pub fn get_lpm(&self, prefix: &P) -> Option<(P, &T)> {
        checked_len(prefix).ok()?;
        self.longest_match(prefix.mask(), prefix.prefix_len())
    }

    /// All stored routes that contain `addr`, from the shortest to the longest.
    ///
    /// ```
    /// # use route_trie::*;
    /// # use ipnet::Ipv4Net;
    /// # use std::net::Ipv4Addr;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut tree: PrefixTree<Ipv4Net, _> = PrefixTree::new();
    /// tree.insert("192.168.0.0/16".parse()?, 99)?;
    /// tree.insert("192.0.0.0/8".parse()?, 1)?;
    /// tree.insert("10.0.0.0/8".parse()?, 2)?;
    /// let addr: u32 = Ipv4Addr::new(192, 168, 1, 1).into();
    /// let routes: Vec<_> = tree.covering(addr).map(|(p, v)| (p.to_string(), *v)).collect();
    /// assert_eq!(routes, vec![("192.0.0.0/8".to_string(), 1), ("192.168.0.0/16".to_string(), 99)]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn covering(&self, addr: P::R) -> Covering<'_, P, T> {
        Covering {
            tree: self,
            addr,
            node: Some(0),
        }
    }

    /// Visit every stored route in lexicographic order (shorter prefixes before the longer ones
    /// they contain, the `0` branch before the `1` branch).
    pub fn walk<F>(&self, mut f: F)
    where
        F: FnMut(P, &T),
    {
        for (prefix, value) in self.iter() {
            f(prefix, value)
        }
    }

    /// Remove all routes, leaving only the root.
    pub fn clear(&mut self) {
        self.table.clear();
        self.free.clear();
        self.table.push(Node::new(0));
        self.len = 0;
    }
}

/// Private function implementations
impl<P, T> PrefixTree<P, T>
where
    P: Prefix,
{
    /// Descend along the canonical key of `prefix` and return the node at its depth.
    fn find_node(&self, prefix: &P) -> Option<usize> {
        let len = checked_len(prefix).ok()?;
        let key = prefix.mask();
        let mut idx = 0;
        for bit in 0..len {
            idx = self.table[idx].child(bit_at(key, bit))?;
        }
        Some(idx)
    }

    /// Descend along `key` for at most `limit` bits, remembering the deepest node with a value.
    fn longest_match(&self, key: P::R, limit: u8) -> Option<(P, &T)> {
        let mut idx = 0;
        let mut best: Option<(u8, &T)> = None;
        loop {
            let node = &self.table[idx];
            if let Some(value) = node.value.as_ref() {
                best = Some((node.depth, value));
            }
            if node.depth >= limit {
                break;
            }
            match node.child(bit_at(key, node.depth)) {
                Some(next) => idx = next,
                None => break,
            }
        }
        best.map(|(depth, value)| {
            let repr = key & mask_from_prefix_len(depth);
            (P::from_repr_len(repr, depth), value)
        })
    }

    /// insert a new node into the table and return its index.
    #[inline(always)]
    fn new_node(&mut self, depth: u8) -> usize {
        if let Some(idx) = self.free.pop() {
            self.table[idx] = Node::new(depth);
            idx
        } else {
            self.table.push(Node::new(depth));
            self.table.len() - 1
        }
    }
}

/// Prefix length of `prefix`, rejecting lengths beyond the width of the key.
fn checked_len<P: Prefix>(prefix: &P) -> Result<u8> {
    let len = prefix.prefix_len();
    if len > P::width() {
        return Err(Error::MalformedPrefix(format!(
            "prefix length {len} exceeds {} bits",
            P::width()
        )));
    }
    Ok(len)
}

impl<P, T> PartialEq for PrefixTree<P, T>
where
    P: Prefix + PartialEq,
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<P, T> Eq for PrefixTree<P, T>
where
    P: Prefix + Eq,
    T: Eq,
{
}

/// A trie node at some depth. `children[0]` follows a cleared bit, `children[1]` a set bit.
#[derive(Clone)]
pub(crate) struct Node<T> {
    pub(crate) depth: u8,
    pub(crate) value: Option<T>,
    pub(crate) children: [Option<usize>; 2],
}

impl<T> Node<T> {
    fn new(depth: u8) -> Self {
        Self {
            depth,
            value: None,
            children: [None, None],
        }
    }

    #[inline(always)]
    pub(crate) fn child(&self, right: bool) -> Option<usize> {
        self.children[right as usize]
    }

    #[inline(always)]
    fn set_child(&mut self, right: bool, child: usize) {
        self.children[right as usize] = Some(child);
    }

    #[inline(always)]
    fn clear_child(&mut self, right: bool) {
        self.children[right as usize] = None;
    }

    /// A node without a value and without children must not stay in the tree.
    fn is_dead(&self) -> bool {
        self.value.is_none() && self.children.iter().all(Option::is_none)
    }
}

/// Iterator over all stored routes containing an address, shortest first. See
/// [`PrefixTree::covering`].
pub struct Covering<'a, P: Prefix, T> {
    tree: &'a PrefixTree<P, T>,
    addr: P::R,
    node: Option<usize>,
}

impl<'a, P: Prefix, T> Iterator for Covering<'a, P, T> {
    type Item = (P, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(idx) = self.node {
            let node = &self.tree.table[idx];
            self.node = if node.depth < P::width() {
                node.child(bit_at(self.addr, node.depth))
            } else {
                None
            };
            if let Some(value) = node.value.as_ref() {
                let repr = self.addr & mask_from_prefix_len(node.depth);
                return Some((P::from_repr_len(repr, node.depth), value));
            }
        }
        None
    }
}
