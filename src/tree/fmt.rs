//! Formatting implementation for the PrefixTree

use std::fmt::{Debug, Formatter, Result};

use num_traits::Zero;

use crate::prefix::{with_bit, Prefix};

use super::PrefixTree;

impl<P: Prefix + Debug, T: Debug> Debug for PrefixTree<P, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        DebugNode(self, 0, P::R::zero()).fmt(f)
    }
}

/// A node of the tree, together with the key bits that lead to it.
struct DebugNode<'a, P: Prefix, T>(&'a PrefixTree<P, T>, usize, P::R);

impl<P: Prefix + Debug, T: Debug> Debug for DebugNode<'_, P, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let tree = self.0;
        let node = &tree.table[self.1];
        let key = self.2;
        let prefix = P::from_repr_len(key, node.depth);
        let left = node.child(false).map(|idx| Self(tree, idx, key));
        let right = node
            .child(true)
            .map(|idx| Self(tree, idx, with_bit(key, node.depth)));
        match (node.value.as_ref(), left, right) {
            (None, None, None) => prefix.fmt(f),
            (None, None, Some(child)) | (None, Some(child), None) => {
                f.debug_map().entry(&prefix, &child).finish()
            }
            (None, Some(left), Some(right)) => {
                f.debug_map().entry(&prefix, &(left, right)).finish()
            }
            (Some(v), None, None) => f.debug_map().entry(&prefix, v).finish(),
            (Some(v), None, Some(child)) | (Some(v), Some(child), None) => {
                f.debug_map().entry(&prefix, &(v, child)).finish()
            }
            (Some(v), Some(left), Some(right)) => {
                f.debug_map().entry(&prefix, &(v, left, right)).finish()
            }
        }
    }
}
