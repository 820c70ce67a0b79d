//! Seeded PRNG for simulated latency and article shuffling.

/// Simple LCG PRNG. Deterministic for a given seed.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(1),
        }
    }

    /// Seed from a random v4 UUID.
    pub fn from_entropy() -> Self {
        let (hi, lo) = uuid::Uuid::new_v4().as_u64_pair();
        Self::new(hi ^ lo)
    }

    pub fn next_u64(&mut self) -> u64 {
        // LCG parameters from Numerical Recipes
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        // Low bits of an LCG cycle quickly; hand out the high half mixed in.
        self.state ^ (self.state >> 33)
    }

    /// Uniform value in `[min, max)`. Returns `min` when the range is empty.
    pub fn next_range(&mut self, min: u64, max: u64) -> u64 {
        if max <= min {
            return min;
        }
        min + (self.next_u64() % (max - min))
    }

    /// Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_range(0, i as u64 + 1) as usize;
            items.swap(i, j);
        }
    }
}
