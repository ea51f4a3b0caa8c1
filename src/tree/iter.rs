//! Traversals over all stored routes.

use num_traits::Zero;

use crate::prefix::{with_bit, Prefix};

use super::PrefixTree;

/// An iterator over all routes of a [`PrefixTree`] in lexicographic order. The prefix of each
/// route is rebuilt from the bits taken on the way down.
pub struct Iter<'a, P: Prefix, T> {
    tree: &'a PrefixTree<P, T>,
    nodes: Vec<(usize, P::R)>,
}

impl<P: Prefix, T> Clone for Iter<'_, P, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            nodes: self.nodes.clone(),
        }
    }
}

impl<'a, P: Prefix, T> Iterator for Iter<'a, P, T> {
    type Item = (P, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((cur, key)) = self.nodes.pop() {
            let node = &self.tree.table[cur];
            if let Some(right) = node.child(true) {
                self.nodes.push((right, with_bit(key, node.depth)));
            }
            if let Some(left) = node.child(false) {
                self.nodes.push((left, key));
            }
            if let Some(v) = &node.value {
                return Some((P::from_repr_len(key, node.depth), v));
            }
        }
        None
    }
}

/// An iterator over all prefixes of a [`PrefixTree`] in lexicographic order.
#[derive(Clone)]
pub struct Keys<'a, P: Prefix, T> {
    inner: Iter<'a, P, T>,
}

impl<P: Prefix, T> Iterator for Keys<'_, P, T> {
    type Item = P;

    fn next(&mut self) -> Option<P> {
        self.inner.next().map(|(k, _)| k)
    }
}

/// An iterator over all values of a [`PrefixTree`] in lexicographic order of their prefixes.
#[derive(Clone)]
pub struct Values<'a, P: Prefix, T> {
    inner: Iter<'a, P, T>,
}

impl<'a, P: Prefix, T> Iterator for Values<'a, P, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next().map(|(_, v)| v)
    }
}

impl<'a, P: Prefix, T> IntoIterator for &'a PrefixTree<P, T> {
    type Item = (P, &'a T);

    type IntoIter = Iter<'a, P, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<P: Prefix, T> PrefixTree<P, T> {
    /// An iterator visiting all routes in lexicographic order. Every call starts a fresh
    /// traversal.
    ///
    /// ```
    /// # use route_trie::*;
    /// # use ipnet::Ipv4Net;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut tree: PrefixTree<Ipv4Net, _> = PrefixTree::new();
    /// tree.insert("192.168.0.0/22".parse()?, 1)?;
    /// tree.insert("192.168.0.0/23".parse()?, 2)?;
    /// tree.insert("192.168.2.0/23".parse()?, 3)?;
    /// tree.insert("192.168.0.0/24".parse()?, 4)?;
    /// tree.insert("192.168.2.0/24".parse()?, 5)?;
    /// assert_eq!(
    ///     tree.iter().collect::<Vec<_>>(),
    ///     vec![
    ///         ("192.168.0.0/22".parse()?, &1),
    ///         ("192.168.0.0/23".parse()?, &2),
    ///         ("192.168.0.0/24".parse()?, &4),
    ///         ("192.168.2.0/23".parse()?, &3),
    ///         ("192.168.2.0/24".parse()?, &5),
    ///     ]
    /// );
    /// # Ok(())
    /// # }
    /// ```
    pub fn iter(&self) -> Iter<'_, P, T> {
        Iter {
            tree: self,
            nodes: vec![(0, P::R::zero())],
        }
    }

    /// An iterator visiting all prefixes in lexicographic order.
    pub fn keys(&self) -> Keys<'_, P, T> {
        Keys { inner: self.iter() }
    }

    /// An iterator visiting all values in lexicographic order of their prefixes.
    pub fn values(&self) -> Values<'_, P, T> {
        Values { inner: self.iter() }
    }
}
