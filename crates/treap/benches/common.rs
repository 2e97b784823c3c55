use std::time::Duration;

use criterion::BenchmarkGroup;
use criterion::measurement::Measurement;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const SIZES: [usize; 3] = [1_000, 16_000, 64_000];

const SAMPLE_SIZE: usize = 15;
const WARM_UP_MS: u64 = 100;
const MEASURE_MS: u64 = 300;
const RNG_SEED: u64 = 0x5EED_2026;

pub fn apply_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(Duration::from_millis(WARM_UP_MS));
    group.measurement_time(Duration::from_millis(MEASURE_MS));
}

pub fn default_rng() -> StdRng {
    StdRng::seed_from_u64(RNG_SEED)
}

/// Distinct pseudo-random keys in a scrambled order.
pub fn random_keys(rng: &mut StdRng, n: usize) -> Vec<u64> {
    let mut keys: Vec<u64> = (0..n as u64).map(|i| mix(i ^ rng.random::<u64>())).collect();
    keys.sort_unstable();
    keys.dedup();
    // Collisions over u64 are vanishingly rare, but keep the count exact.
    while keys.len() < n {
        keys.push(rng.random());
        keys.sort_unstable();
        keys.dedup();
    }
    let mut order: Vec<u64> = keys;
    for i in (1..order.len()).rev() {
        order.swap(i, rng.random_range(0..=i));
    }
    order
}

fn mix(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
