//! Deterministic RNG: MT19937-32 (Mersenne Twister) seeded with a 32-bit value.
//!
//! Every stochastic choice inside the simulation core routes through this RNG.
//! No component may reach for a platform/thread RNG (`rand::thread_rng`,
//! `rand::random`, etc.) — doing so would break the determinism contract in
//! spec §4.1: identical seed ⇒ identical stream, on any platform.

use rand::seq::SliceRandom;
use rand::Rng as _;
use rand_core::{Error, RngCore, SeedableRng};

const N: usize = 624;
const M: usize = 397;
const MATRIX_A: u32 = 0x9908_b0df;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;

/// MT19937-32, the classic 32-bit Mersenne Twister.
///
/// Implements [`RngCore`]/[`SeedableRng`] so it composes with the rest of the
/// `rand` ecosystem (`Rng::gen_range`, `SliceRandom::shuffle`, ...), but the
/// core word generator is hand-rolled rather than delegated to `rand`'s own
/// generators — those are not guaranteed bit-for-bit stable across `rand`
/// versions, which would violate the cross-platform replay contract.
#[derive(Debug, Clone)]
pub struct Mt19937 {
    state: [u32; N],
    index: usize,
    /// Cached second draw from the Box-Muller transform (spec §4.1 `gaussian`).
    gaussian_spare: Option<f32>,
}

impl Mt19937 {
    /// Seed with a 32-bit value. This is the canonical constructor; identical
    /// seeds always produce identical streams.
    pub fn seed_from_u32(seed: u32) -> Self {
        let mut state = [0u32; N];
        state[0] = seed;
        for i in 1..N {
            state[i] = 1_812_433_253u32
                .wrapping_mul(state[i - 1] ^ (state[i - 1] >> 30))
                .wrapping_add(i as u32);
        }
        Self {
            state,
            index: N,
            gaussian_spare: None,
        }
    }

    fn regenerate(&mut self) {
        for i in 0..N {
            let y = (self.state[i] & UPPER_MASK) | (self.state[(i + 1) % N] & LOWER_MASK);
            let mut next = self.state[(i + M) % N] ^ (y >> 1);
            if y & 1 != 0 {
                next ^= MATRIX_A;
            }
            self.state[i] = next;
        }
        self.index = 0;
    }

    /// Next raw 32-bit word, tempered per the MT19937 reference algorithm.
    pub fn next_u32(&mut self) -> u32 {
        if self.index >= N {
            self.regenerate();
        }
        let mut y = self.state[self.index];
        self.index += 1;

        y ^= y >> 11;
        y ^= (y << 7) & 0x9d2c_5680;
        y ^= (y << 15) & 0xefc6_0000;
        y ^= y >> 18;
        y
    }

    /// Uniform float in `[0, 1)`.
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() as f64 / 4_294_967_296.0_f64) as f32
    }

    /// Inclusive integer range `[a, b]`.
    pub fn int_range(&mut self, a: i64, b: i64) -> i64 {
        if a >= b {
            return a;
        }
        self.gen_range(a..=b)
    }

    /// Float in `[a, b)`.
    pub fn float_range(&mut self, a: f32, b: f32) -> f32 {
        if a >= b {
            return a;
        }
        a + self.next_f32() * (b - a)
    }

    /// `true` with probability `p` (clamped to `[0, 1]`).
    pub fn bool(&mut self, p: f32) -> bool {
        self.next_f32() < p.clamp(0.0, 1.0)
    }

    /// Pick a uniformly random element. `None` on an empty slice — never panics.
    pub fn choice<'a, T>(&mut self, seq: &'a [T]) -> Option<&'a T> {
        seq.choose(self)
    }

    /// Fisher-Yates shuffle in place.
    pub fn shuffle<T>(&mut self, seq: &mut [T]) {
        seq.shuffle(self);
    }

    /// Gaussian sample via Box-Muller, caching the spare draw so two RNG
    /// words are spent per *pair* of gaussian samples, not per sample.
    pub fn gaussian(&mut self, mu: f32, sigma: f32) -> f32 {
        if let Some(spare) = self.gaussian_spare.take() {
            return mu + sigma * spare;
        }
        let u1 = self.next_f32().max(1e-10);
        let u2 = self.next_f32();
        let r = (-2.0 * (u1 as f64).ln()).sqrt() as f32;
        let theta = 2.0 * std::f32::consts::PI * u2;
        let z0 = r * theta.cos();
        let z1 = r * theta.sin();
        self.gaussian_spare = Some(z1);
        mu + sigma * z0
    }
}

impl RngCore for Mt19937 {
    fn next_u32(&mut self) -> u32 {
        Mt19937::next_u32(self)
    }

    fn next_u64(&mut self) -> u64 {
        let hi = self.next_u32() as u64;
        let lo = self.next_u32() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand_core::impls::fill_bytes_via_next(self, dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Mt19937 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Mt19937::seed_from_u32(u32::from_le_bytes(seed))
    }
}
