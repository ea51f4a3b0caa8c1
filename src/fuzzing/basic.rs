use std::collections::{HashMap, HashSet};

use super::*;
use itertools::Itertools;

qc!(new, _new);
fn _new(list: Vec<(TestPrefix, i32)>) -> bool {
    let mut tree = PrefixTree::new();
    let mut hmap = HashMap::new();

    for (p, t) in list {
        let added = tree.insert(p, t).is_ok();
        let fresh = !hmap.contains_key(&p);
        if fresh {
            hmap.insert(p, t);
        }
        if added != fresh {
            return false;
        }
    }

    tree.len() == hmap.len() && tree.iter().map(|(p, t)| (p, *t)).eq(hmap.into_iter().sorted())
}

qc!(new_mods, _new_mods);
fn _new_mods(list: Vec<Operation<TestPrefix, i32>>) -> bool {
    let mut tree = PrefixTree::new();
    let mut hmap = HashMap::new();

    for op in list {
        match op {
            Operation::Add(p, t) => {
                let fresh = !hmap.contains_key(&p);
                if fresh {
                    hmap.insert(p, t);
                }
                if tree.insert(p, t).is_ok() != fresh {
                    return false;
                }
            }
            Operation::Remove(p) => {
                if tree.remove(&p).ok() != hmap.remove(&p) {
                    return false;
                }
            }
        }
    }

    tree.len() == hmap.len() && tree.iter().map(|(p, t)| (p, *t)).eq(hmap.into_iter().sorted())
}

qc!(no_dead_nodes, _no_dead_nodes);
fn _no_dead_nodes(list: Vec<Operation<TestPrefix, i32>>) -> bool {
    let mut tree = PrefixTree::new();
    for op in list {
        match op {
            Operation::Add(p, t) => {
                let _ = tree.insert(p, t);
            }
            Operation::Remove(p) => {
                let _ = tree.remove(&p);
            }
        }
    }

    // exactly the nodes on the paths of the stored routes survive, plus the root.
    let positions: HashSet<(u32, u8)> = tree
        .keys()
        .flat_map(|p| (0..=p.1).map(move |d| (Prefix::mask(&(p.0, d)), d)))
        .chain(std::iter::once((0, 0)))
        .collect();
    tree.node_count() == positions.len()
}

qc!(remove_all, _remove_all);
fn _remove_all(list: Vec<(TestPrefix, i32)>) -> bool {
    let mut tree = build(list.clone());
    let mut keys = list.into_iter().map(|(p, _)| p).unique().collect::<Vec<_>>();
    // remove in a different order than inserted
    keys.reverse();
    for p in keys {
        if tree.remove(&p).is_err() {
            return false;
        }
    }
    tree.is_empty() && tree.node_count() == 1 && tree.iter().next().is_none()
}

qc!(failed_insert_is_noop, _failed_insert_is_noop);
fn _failed_insert_is_noop((tree, p): (PrefixTree<TestPrefix, i32>, TestPrefix)) -> bool {
    let mut tree = tree;
    if !tree.contains_key(&p) {
        return true;
    }
    let nodes = tree.node_count();
    let before = tree.clone();
    tree.insert(p, -1) == Err(Error::DuplicateRoute)
        && tree == before
        && tree.node_count() == nodes
}

qc!(failed_remove_is_noop, _failed_remove_is_noop);
fn _failed_remove_is_noop((tree, p): (PrefixTree<TestPrefix, i32>, TestPrefix)) -> bool {
    let mut tree = tree;
    if tree.contains_key(&p) {
        return true;
    }
    let nodes = tree.node_count();
    let before = tree.clone();
    tree.remove(&p) == Err(Error::RouteNotFound) && tree == before && tree.node_count() == nodes
}

qc!(equality, _equality);
fn _equality(list: Vec<Operation<TestPrefix, i32>>) -> bool {
    let mut tree = PrefixTree::default();
    for op in list {
        match op {
            Operation::Add(p, t) => {
                let _ = tree.insert(p, t);
            }
            Operation::Remove(p) => {
                let _ = tree.remove(&p);
            }
        }
    }

    // a tree rebuilt from scratch holds the same routes in the same nodes.
    let rebuilt = build(tree.iter().map(|(p, t)| (p, *t)).collect());
    tree == rebuilt && tree.node_count() == rebuilt.node_count()
}
