use rand::{rngs::OsRng, Rng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

/// Seeded random workload generator.
///
/// Uses xoshiro256** so a failing run can be replayed from its printed seed.
pub struct Fuzzer {
    pub seed: [u8; 32],
    rng: Xoshiro256StarStar,
}

impl Fuzzer {
    /// Create a fuzzer; without a seed one is drawn from `OsRng`.
    pub fn new(seed: Option<[u8; 32]>) -> Self {
        let seed = seed.unwrap_or_else(|| {
            let mut bytes = [0u8; 32];
            OsRng.fill_bytes(&mut bytes);
            bytes
        });
        Self {
            seed,
            rng: Xoshiro256StarStar::from_seed(seed),
        }
    }

    pub fn from_u64(seed: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&seed.to_le_bytes());
        Self::new(Some(bytes))
    }

    /// Random integer in `[min, max]`.
    pub fn random_int(&mut self, min: i64, max: i64) -> i64 {
        self.rng.gen_range(min..=max)
    }

    /// Random float in `[0, 1)`.
    pub fn random(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    pub fn pick<'a, T>(&mut self, elements: &'a [T]) -> &'a T {
        let idx = self.rng.gen_range(0..elements.len());
        &elements[idx]
    }

    /// Fisher-Yates shuffle in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.rng.gen_range(0..=i);
            items.swap(i, j);
        }
    }
}
