use std::net::Ipv4Addr;

use route_trie::*;

use rand::prelude::*;

fn main() {
    let mut table = TrieTable::<u32>::new(false);

    let mut rng = thread_rng();
    let mut rejected = 0usize;

    for _ in 0..1_000_000 {
        let route = format!(
            "{}/{}",
            Ipv4Addr::new(rng.gen(), rng.gen(), 0, 0),
            rng.gen_range(0..=16)
        );

        let result = if rng.gen_bool(0.6) {
            table.add(&route, rng.gen::<u8>() as u32)
        } else if rng.gen_bool(0.5) {
            table.del(&route).map(|_| ())
        } else {
            let addr = Ipv4Addr::new(rng.gen(), rng.gen(), rng.gen(), rng.gen());
            table.find(&addr.to_string()).map(|_| ())
        };
        if result.is_err() {
            rejected += 1;
        }
    }

    println!(
        "{} routes in {} nodes, {rejected} operations rejected",
        table.len(),
        table.node_count()
    );
}
