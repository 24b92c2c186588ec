//! Exact backward traversal of the recurrence. The multiplier is odd and the
//! modulus is a power of two, so the multiplier is invertible and every state
//! has a unique predecessor.

use crate::constants::{INCREMENT, MODULUS, MULTIPLIER};

/// Modular inverse of the fixed multiplier, resolved at compile time.
pub const INVERSE_MULTIPLIER: u32 = modular_inverse(MULTIPLIER, MODULUS);

/// Extended Euclidean algorithm. Requires `gcd(a, modulus) == 1`; the result
/// is normalized into `[0, modulus)`.
pub const fn modular_inverse(a: u32, modulus: u64) -> u32 {
    let mut t: i64 = 0;
    let mut new_t: i64 = 1;
    let mut r: i64 = modulus as i64;
    let mut new_r: i64 = a as i64;

    while new_r != 0 {
        let quotient = r / new_r;
        let next_t = t - quotient * new_t;
        t = new_t;
        new_t = next_t;
        let next_r = r - quotient * new_r;
        r = new_r;
        new_r = next_r;
    }

    if t < 0 {
        t += modulus as i64;
    }
    t as u32
}

/// The unique predecessor of `state` under the forward recurrence:
/// `previous_state(next_raw(s)) == s` for every `s`.
pub fn previous_state(state: u32) -> u32 {
    let shifted = (state as u64 + MODULUS - INCREMENT as u64) % MODULUS;
    ((INVERSE_MULTIPLIER as u64 * shifted) % MODULUS) as u32
}

/// Lazy backward walk: yields `count + 1` states, starting with `seed`
/// itself as element 0.
pub fn previous_states(seed: u32, count: u32) -> PreviousStates {
    PreviousStates {
        current: Some(seed),
        remaining: count,
    }
}

pub struct PreviousStates {
    current: Option<u32>,
    remaining: u32,
}

impl Iterator for PreviousStates {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let state = self.current?;
        self.current = if self.remaining > 0 {
            self.remaining -= 1;
            Some(previous_state(state))
        } else {
            None
        };
        Some(state)
    }
}

/// The closest-approach pair between the backward trails of two observed
/// states: walks both `steps` states into the past and reports the ancestor
/// pair with minimum absolute distance, ignoring the first `skip` elements
/// of each trail. Used to estimate how far apart two captured generator
/// instances were seeded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BacktracePair {
    pub state_a: u32,
    pub state_b: u32,
    pub distance: u32,
}

pub fn closest_backtrace_pair(
    seed_a: u32,
    seed_b: u32,
    steps: u32,
    skip: u32,
) -> Option<BacktracePair> {
    let trail_a: Vec<u32> = previous_states(seed_a, steps).collect();
    let trail_b: Vec<u32> = previous_states(seed_b, steps).collect();

    let mut best: Option<BacktracePair> = None;
    for &state_a in trail_a.iter().skip(skip as usize) {
        for &state_b in trail_b.iter().skip(skip as usize) {
            let distance = state_a.abs_diff(state_b);
            if best.map_or(true, |pair| distance < pair.distance) {
                best = Some(BacktracePair {
                    state_a,
                    state_b,
                    distance,
                });
            }
        }
    }
    best
}
