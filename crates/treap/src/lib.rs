mod arena;
mod error;
mod iter;
mod rng;
mod tree;

pub use error::InsertError;
pub use iter::Iter;
pub use rng::{PrioritySource, XorShift64};
pub use tree::Treap;

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;
    use std::collections::BTreeMap;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::{InsertError, Treap};

    fn ord(a: &u64, b: &u64) -> Ordering {
        a.cmp(b)
    }

    #[test]
    fn random_operations_match_btreemap() {
        let mut rng = StdRng::seed_from_u64(0x5EED_2026);
        let mut tree = Treap::with_seed(12);
        let mut oracle = BTreeMap::new();

        const OPS: usize = 20_000;
        // Narrow key space so hits, duplicates, and removals all happen.
        const KEY_SPACE: u64 = 2_000;

        for step in 0..OPS {
            let roll = rng.random_range(0..100);
            let key = rng.random_range(0..KEY_SPACE);
            if roll < 40 {
                let value: u64 = rng.random();
                match tree.insert(ord, key, value) {
                    Ok(()) => {
                        assert_eq!(oracle.insert(key, value), None);
                    }
                    Err(InsertError::DuplicateKey) => {
                        assert!(oracle.contains_key(&key));
                    }
                    Err(other) => panic!("unexpected insert failure: {other}"),
                }
            } else if roll < 60 {
                let got = tree.remove(ord, &key);
                let expect = oracle.remove(&key).map(|v| (key, v));
                assert_eq!(got, expect);
            } else if roll < 85 {
                assert_eq!(tree.lookup(ord, &key), oracle.get(&key));
            } else if roll < 95 {
                let got = tree.first().map(|(&k, &v)| (k, v));
                let expect = oracle.first_key_value().map(|(&k, &v)| (k, v));
                assert_eq!(got, expect);
            } else {
                let got = tree.pop_first();
                let expect = oracle.pop_first();
                assert_eq!(got, expect);
            }

            assert_eq!(tree.len(), oracle.len());
            if step % 1_000 == 0 {
                let got: Vec<(u64, u64)> = tree.iter().map(|(&k, &v)| (k, v)).collect();
                let expect: Vec<(u64, u64)> = oracle.iter().map(|(&k, &v)| (k, v)).collect();
                assert_eq!(got, expect);
            }
        }

        let got: Vec<(u64, u64)> = tree.iter().map(|(&k, &v)| (k, v)).collect();
        let expect: Vec<(u64, u64)> = oracle.iter().map(|(&k, &v)| (k, v)).collect();
        assert_eq!(got, expect);
    }

    #[test]
    fn insert_lookup_round_trip() {
        let mut rng = StdRng::seed_from_u64(0xB0B);
        let mut tree = Treap::with_seed(13);
        let mut keys = Vec::new();
        for _ in 0..1_000 {
            let key: u64 = rng.random();
            if tree.insert(ord, key, key ^ 1).is_ok() {
                keys.push(key);
            }
        }
        for &key in &keys {
            assert_eq!(tree.lookup(ord, &key), Some(&(key ^ 1)));
        }
    }

    #[test]
    fn drain_via_pop_first_is_sorted() {
        let mut rng = StdRng::seed_from_u64(0xCAFE);
        let mut tree = Treap::with_seed(14);
        for _ in 0..1_000 {
            let _ = tree.insert(ord, rng.random_range(0..10_000), ());
        }
        let mut prev = None;
        while let Some((k, ())) = tree.pop_first() {
            if let Some(p) = prev {
                assert!(p < k);
            }
            prev = Some(k);
        }
        assert!(tree.is_empty());
    }
}
