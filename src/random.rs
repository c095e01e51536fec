//! Small xorshift128 generator for stochastic effects
//!
//! Not cryptographic. The state advances on every draw, so sequences depend
//! on how many draws happened before, not only on the seed.

use rand_core::{RngCore, SeedableRng, impls};

const DEFAULT_STATE: [u32; 4] = [123_456_789, 362_436_069, 521_288_629, 88_675_123];

/// xorshift128 pseudo-random source
#[derive(Debug, Clone)]
pub struct Xorshift128 {
    x: u32,
    y: u32,
    z: u32,
    w: u32,
}

impl Default for Xorshift128 {
    fn default() -> Self {
        Self::new()
    }
}

impl Xorshift128 {
    pub const fn new() -> Self {
        let [x, y, z, w] = DEFAULT_STATE;
        Self { x, y, z, w }
    }

    /// Advance the state and return the next raw word
    pub fn next_word(&mut self) -> u32 {
        let t = self.x ^ (self.x << 11);
        self.x = self.y;
        self.y = self.z;
        self.z = self.w;
        self.w = self.w ^ (self.w >> 19) ^ (t ^ (t >> 8));
        self.w
    }

    /// Random value in `[0, bound)`, or 0 if `bound` is 0
    #[allow(clippy::cast_possible_truncation)]
    pub fn below(&mut self, bound: u16) -> u16 {
        let word = self.next_word();
        if bound == 0 {
            return 0;
        }
        (word % u32::from(bound)) as u16
    }
}

impl RngCore for Xorshift128 {
    fn next_u32(&mut self) -> u32 {
        self.next_word()
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Xorshift128 {
    type Seed = [u8; 16];

    fn from_seed(seed: Self::Seed) -> Self {
        let mut state = [0u32; 4];
        for (word, chunk) in state.iter_mut().zip(seed.chunks_exact(4)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        // xorshift never leaves the all-zero state
        if state == [0; 4] {
            state = DEFAULT_STATE;
        }
        let [x, y, z, w] = state;
        Self { x, y, z, w }
    }
}
