//! Seeded 1D gradient noise - pure function of seed string and coordinate
//!
//! The whole pipeline is integer/float deterministic: the same seed string
//! produces bit-identical samples on every platform and across restarts.

/// Expand an arbitrary seed string into four 32-bit state words.
///
/// Each character is mixed into four running accumulators with fixed
/// multipliers, followed by a final avalanche step. Non-cryptographic; the
/// only requirement is that nearby seeds diverge.
pub fn hash_seed(seed: &str) -> [u32; 4] {
    let mut h1: u32 = 1779033703;
    let mut h2: u32 = 3144134277;
    let mut h3: u32 = 1013904242;
    let mut h4: u32 = 2773480762;

    for ch in seed.chars() {
        let k = ch as u32;
        h1 = (h2 ^ h1 ^ k).wrapping_mul(597399067);
        h2 = (h3 ^ h2 ^ k).wrapping_mul(2869860233);
        h3 = (h4 ^ h3 ^ k).wrapping_mul(951274213);
        h4 = (h1 ^ h4 ^ k).wrapping_mul(2716044179);
    }

    h1 = (h3 ^ (h1 >> 18)).wrapping_mul(597399067);
    h2 = (h4 ^ (h2 >> 22)).wrapping_mul(2869860233);
    h3 = (h1 ^ (h3 >> 17)).wrapping_mul(951274213);
    h4 = (h2 ^ (h4 >> 19)).wrapping_mul(2716044179);

    [h1 ^ h2 ^ h3 ^ h4, h2 ^ h1, h3 ^ h1, h4 ^ h1]
}

/// Small xorshift-family PRNG (xoshiro128** layout) seeded from the four
/// hash words. Used for the permutation shuffle and per-column placement
/// rolls; never for anything outside generation.
#[derive(Debug, Clone)]
pub struct SeedRng {
    s: [u32; 4],
}

impl SeedRng {
    pub fn new(state: [u32; 4]) -> Self {
        // An all-zero state would be a fixed point.
        if state == [0, 0, 0, 0] {
            Self {
                s: [0x9E3779B9, 0x243F6A88, 0xB7E15162, 0xDEADBEEF],
            }
        } else {
            Self { s: state }
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        let result = self.s[1].wrapping_mul(5).rotate_left(7).wrapping_mul(9);
        let t = self.s[1] << 9;

        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];
        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(11);

        result
    }

    /// Uniform float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform integer in `lo..=hi`
    pub fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        debug_assert!(lo <= hi);
        lo + self.next_u32() % (hi - lo + 1)
    }
}

/// Deterministic 1D Perlin-style noise field.
///
/// Construction shuffles a 256-entry permutation table with a seeded
/// Fisher-Yates pass, doubled to 512 entries so `p[i + 1]` never wraps.
pub struct NoiseField {
    perm: [u8; 512],
}

impl NoiseField {
    pub fn new(seed: &str) -> Self {
        Self::from_state(hash_seed(seed))
    }

    pub fn from_state(state: [u32; 4]) -> Self {
        let mut rng = SeedRng::new(state);

        let mut table = [0u8; 256];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = i as u8;
        }
        for i in (1..256).rev() {
            let j = (rng.next_u32() as usize) % (i + 1);
            table.swap(i, j);
        }

        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = table[i & 255];
        }

        Self { perm }
    }

    /// Sample the field at `x`. Total over all finite inputs (negative and
    /// fractional included); result in [0, 1].
    pub fn sample(&self, x: f64) -> f64 {
        let floor = x.floor();
        let t = x - floor;
        // Wrap the lattice coordinate into the table without sign issues.
        let xi = (floor as i64).rem_euclid(256) as usize;

        // 6t^5 - 15t^4 + 10t^3
        let fade = t * t * t * (t * (t * 6.0 - 15.0) + 10.0);

        let g0 = Self::grad(self.perm[xi], t);
        let g1 = Self::grad(self.perm[xi + 1], t - 1.0);
        let n = g0 + fade * (g1 - g0); // [-1, 1]

        ((n + 1.0) * 0.5).clamp(0.0, 1.0)
    }

    /// Gradient at a lattice point: +-1 selected by the permutation entry.
    fn grad(hash: u8, t: f64) -> f64 {
        if hash & 1 == 0 {
            t
        } else {
            -t
        }
    }
}
