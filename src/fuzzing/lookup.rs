use super::*;

/// Longest stored prefix containing `addr`, found by scanning every route.
fn naive_lpm(tree: &PrefixTree<TestPrefix, i32>, addr: u32) -> Option<(TestPrefix, i32)> {
    tree.iter()
        .filter(|(p, _)| p.contains(&TestPrefix(addr, 32)))
        .max_by_key(|(p, _)| p.1)
        .map(|(p, t)| (p, *t))
}

qc!(lookup, _lookup);
fn _lookup((tree, addrs): (PrefixTree<TestPrefix, i32>, Vec<u32>)) -> bool {
    addrs
        .into_iter()
        .all(|addr| tree.lookup(addr).map(|(p, t)| (p, *t)) == naive_lpm(&tree, addr))
}

qc!(lookup_stored_routes, _lookup_stored_routes);
fn _lookup_stored_routes(tree: PrefixTree<TestPrefix, i32>) -> bool {
    // a stored route is its own best match for its network address, unless a longer route
    // shares that address.
    tree.iter().all(|(p, _)| match tree.lookup(p.0) {
        Some((q, _)) => q.1 >= p.1 && q.contains(&TestPrefix(p.0, 32)),
        None => false,
    })
}

qc!(get_lpm, _get_lpm);
fn _get_lpm((tree, prefix): (PrefixTree<TestPrefix, i32>, TestPrefix)) -> bool {
    let want = tree
        .iter()
        .filter(|(p, _)| p.contains(&prefix))
        .max_by_key(|(p, _)| p.1)
        .map(|(p, t)| (p, *t));
    tree.get_lpm(&prefix).map(|(p, t)| (p, *t)) == want
}

qc!(covering, _covering);
fn _covering((tree, addr): (PrefixTree<TestPrefix, i32>, u32)) -> bool {
    let want = tree
        .iter()
        .filter(|(p, _)| p.contains(&TestPrefix(addr, 32)))
        .map(|(p, t)| (p, *t))
        .collect::<Vec<_>>();
    tree.covering(addr).map(|(p, t)| (p, *t)).eq(want)
}

impl Arbitrary for PrefixTree<TestPrefix, i32> {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        build(<Vec<(TestPrefix, i32)> as Arbitrary>::arbitrary(g))
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let routes = self.iter().map(|(p, t)| (p, *t)).collect::<Vec<_>>();
        Box::new(routes.shrink().map(build))
    }
}
