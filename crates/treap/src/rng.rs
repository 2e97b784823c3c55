const DEFAULT_SEED: u64 = 0x5EED_7EA2_2026;

/// Source of node priorities.
///
/// - Draws should be uniform over `u64`; the domain is wide enough that
///   exact ties are negligible in practice (and ties are still handled
///   correctly, they only cost expected depth).
/// - The source is injected into the tree so tests can pin priorities to a
///   deterministic or degenerate sequence.
pub trait PrioritySource {
    fn next_priority(&mut self) -> u64;
}

/// Seeded xorshift generator, the default priority source.
#[derive(Clone, Copy, Debug)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    pub fn new(seed: u64) -> Self {
        // Scrambling keeps a zero seed usable (xorshift state must be
        // non-zero) and decorrelates nearby seeds.
        Self {
            state: mix_seed(seed),
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

impl Default for XorShift64 {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl PrioritySource for XorShift64 {
    fn next_priority(&mut self) -> u64 {
        self.next_u64()
    }
}

fn mix_seed(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
