use std::num::NonZeroU32;

use crate::constants::{INCREMENT, MULTIPLIER};
use crate::error::DomainError;
use crate::jump::coefficients;

/// The target generator: a 32-bit linear congruential recurrence. The whole
/// mutable state is one u32, owned by exactly one `Lcg` instance; every draw
/// depends on all prior draws, so an instance is inherently sequential.
/// Search workers each own an independently seeded instance instead of
/// sharing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Replaces the state with `seed`. No other effect.
    pub fn reset(&mut self, seed: u32) {
        self.state = seed;
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    /// Advances one step and returns the new state.
    pub fn next_raw(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(INCREMENT);
        self.state
    }

    /// Advances one step and scales the top 16 bits of the new state into
    /// `[0, bound)` via `((state >> 16) * bound) >> 16`. This is the target
    /// program's exact formula, preserved bit-for-bit; it is not uniform
    /// beyond the granularity of the 16-bit window, and downstream sequence
    /// matching depends on reproducing it unchanged.
    pub fn next_bounded(&mut self, bound: u32) -> Result<u32, DomainError> {
        match NonZeroU32::new(bound) {
            Some(bound) => Ok(self.next_in(bound)),
            None => Err(DomainError::ZeroBound),
        }
    }

    /// [`Self::next_bounded`] with the zero check already discharged.
    pub fn next_in(&mut self, bound: NonZeroU32) -> u32 {
        let top = self.next_raw() >> 16;
        top.wrapping_mul(bound.get()) >> 16
    }

    /// Jumps forward `steps` steps in O(1) using the precomputed coefficient
    /// table and returns the new state. Step counts outside `1..=100` are an
    /// explicit no-op returning the current state unchanged: this mirrors the
    /// target's defensive range check and is a contract, not an oversight.
    pub fn jump(&mut self, steps: u32) -> u32 {
        if let Some(coeff) = coefficients(steps) {
            self.state = self
                .state
                .wrapping_mul(coeff.multiplier_pow)
                .wrapping_add(coeff.increment_sum);
        }
        self.state
    }
}
