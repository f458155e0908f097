//! Deterministic pseudo-random number generation.
//!
//! [`DeterministicRandom`] is the classic 48-bit linear congruential
//! generator (`state' = state * 0x5DEECE66D + 0xB mod 2^48`). Two values are
//! exposed independently:
//!
//! - the **seed**: the value last passed to [`DeterministicRandom::set_seed`],
//!   from which the initial state is derived by the standard scrambling;
//! - the **state**: the current position in the sequence, which can be
//!   snapshotted and restored without touching the seed.
//!
//! Identical seed plus identical call sequence yields an identical output
//! sequence, bit for bit. Recording and playback rely on this.
//!
//! # Concurrency
//!
//! Every step is a compare-and-swap retry loop on an [`AtomicU64`], so the
//! generator can be shared by reference across threads. This does not make
//! the simulation as a whole thread-safe.
//!
//! # Example
//!
//! ```
//! use tessera_core::random::DeterministicRandom;
//!
//! let rng = DeterministicRandom::new(42);
//! let saved = rng.state();
//! let first = rng.next_int_bounded(100);
//!
//! rng.set_state(saved);
//! assert_eq!(rng.next_int_bounded(100), first);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use rand::RngCore;

/// LCG multiplier.
const MULTIPLIER: u64 = 0x5_DEEC_E66D;
/// LCG increment.
const ADDEND: u64 = 0xB;
/// 48-bit state mask.
const MASK: u64 = (1 << 48) - 1;
/// 2^-53, scale for `next_double`.
const DOUBLE_UNIT: f64 = 1.0 / (1u64 << 53) as f64;
/// 2^-24, scale for `next_float`.
const FLOAT_UNIT: f32 = 1.0 / (1u32 << 24) as f32;

/// Seeded, state-inspectable linear congruential generator.
pub struct DeterministicRandom {
    seed: AtomicU64,
    state: AtomicU64,
    next_gaussian: Mutex<Option<f64>>,
}

impl DeterministicRandom {
    /// Creates a generator seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed: AtomicU64::new(seed),
            state: AtomicU64::new(scramble(seed)),
            next_gaussian: Mutex::new(None),
        }
    }

    /// Re-derives the internal state from `seed` and forgets any cached
    /// gaussian.
    pub fn set_seed(&self, seed: u64) {
        self.seed.store(seed, Ordering::SeqCst);
        self.state.store(scramble(seed), Ordering::SeqCst);
        *self
            .next_gaussian
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Returns the seed the current sequence was started from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed.load(Ordering::SeqCst)
    }

    /// Returns the raw 48-bit state.
    #[must_use]
    pub fn state(&self) -> u64 {
        self.state.load(Ordering::SeqCst)
    }

    /// Jumps to a raw state. The seed is left untouched.
    pub fn set_state(&self, state: u64) {
        self.state.store(state & MASK, Ordering::SeqCst);
    }

    /// Advances the generator and returns the top `bits` bits of the new
    /// state, truncated to 32 bits.
    #[allow(clippy::cast_possible_truncation)]
    pub fn next(&self, bits: u32) -> i32 {
        debug_assert!((1..=32).contains(&bits));
        let mut current = self.state.load(Ordering::Relaxed);
        let next = loop {
            let candidate = current.wrapping_mul(MULTIPLIER).wrapping_add(ADDEND) & MASK;
            match self.state.compare_exchange_weak(
                current,
                candidate,
                Ordering::SeqCst,
                Ordering::Relaxed,
            ) {
                Ok(_) => break candidate,
                Err(observed) => current = observed,
            }
        };
        (next >> (48 - bits)) as u32 as i32
    }

    /// Returns a uniformly distributed `i32`.
    pub fn next_int(&self) -> i32 {
        self.next(32)
    }

    /// Returns a uniformly distributed value in `0..bound`.
    ///
    /// # Panics
    ///
    /// Panics if `bound` is not positive.
    pub fn next_int_bounded(&self, bound: i32) -> i32 {
        assert!(bound > 0, "bound must be positive, got {bound}");

        let mut r = self.next(31);
        let m = bound - 1;
        if bound & m == 0 {
            #[allow(clippy::cast_possible_truncation)]
            return ((i64::from(bound) * i64::from(r)) >> 31) as i32;
        }

        let mut u = r;
        loop {
            r = u % bound;
            if u.wrapping_sub(r).wrapping_add(m) >= 0 {
                return r;
            }
            u = self.next(31);
        }
    }

    /// Returns a uniformly distributed `i64` built from two 32-bit draws.
    pub fn next_long(&self) -> i64 {
        let high = i64::from(self.next(32));
        let low = i64::from(self.next(32));
        (high << 32).wrapping_add(low)
    }

    /// Returns a fair coin flip.
    pub fn next_bool(&self) -> bool {
        self.next(1) != 0
    }

    /// Returns a value in `[0, 1)` with 24 bits of precision.
    #[allow(clippy::cast_precision_loss)]
    pub fn next_float(&self) -> f32 {
        self.next(24) as f32 * FLOAT_UNIT
    }

    /// Returns a value in `[0, 1)` with 53 bits of precision.
    #[allow(clippy::cast_precision_loss)]
    pub fn next_double(&self) -> f64 {
        let high = i64::from(self.next(26)) << 27;
        let low = i64::from(self.next(27));
        (high + low) as f64 * DOUBLE_UNIT
    }

    /// Returns a normally distributed value (mean 0, deviation 1).
    ///
    /// Uses the polar method; the second value of each pair is cached and
    /// returned by the following call.
    pub fn next_gaussian(&self) -> f64 {
        let mut cached = self
            .next_gaussian
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(value) = cached.take() {
            return value;
        }

        let (v1, v2, s) = loop {
            let v1 = 2.0 * self.next_double() - 1.0;
            let v2 = 2.0 * self.next_double() - 1.0;
            let s = v1 * v1 + v2 * v2;
            if s < 1.0 && s != 0.0 {
                break (v1, v2, s);
            }
        };
        let multiplier = (-2.0 * s.ln() / s).sqrt();
        *cached = Some(v2 * multiplier);
        v1 * multiplier
    }
}

/// Standard seed scrambling.
const fn scramble(seed: u64) -> u64 {
    (seed ^ MULTIPLIER) & MASK
}

impl Default for DeterministicRandom {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Clone for DeterministicRandom {
    fn clone(&self) -> Self {
        let cached = *self
            .next_gaussian
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Self {
            seed: AtomicU64::new(self.seed()),
            state: AtomicU64::new(self.state()),
            next_gaussian: Mutex::new(cached),
        }
    }
}

impl fmt::Debug for DeterministicRandom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeterministicRandom")
            .field("seed", &self.seed())
            .field("state", &format!("{:#014x}", self.state()))
            .finish_non_exhaustive()
    }
}

impl RngCore for DeterministicRandom {
    #[allow(clippy::cast_sign_loss)]
    fn next_u32(&mut self) -> u32 {
        self.next(32) as u32
    }

    #[allow(clippy::cast_sign_loss)]
    fn next_u64(&mut self) -> u64 {
        self.next_long() as u64
    }

    #[allow(clippy::cast_sign_loss)]
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let mut word = self.next_int() as u32;
            for byte in chunk {
                *byte = (word & 0xFF) as u8;
                word >>= 8;
            }
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
