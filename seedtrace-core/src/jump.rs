//! Precomputed coefficients for jumping the generator forward N steps in
//! O(1). Composing the recurrence N times gives
//! `state' = M^N * state + C * (M^(N-1) + ... + M + 1)  (mod 2^32)`,
//! so one multiply-add per jump suffices once both factors are known.

use crate::constants::{INCREMENT, JUMP_TABLE_LEN, MULTIPLIER};

/// Coefficient pair valid for exactly one step count N.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JumpCoefficients {
    /// `M^N mod 2^32`.
    pub multiplier_pow: u32,
    /// `C * sum(M^i for i in 0..N) mod 2^32`.
    pub increment_sum: u32,
}

static JUMP_TABLE: [JumpCoefficients; JUMP_TABLE_LEN] = build_jump_table();

/// Coefficients for `steps` forward steps, or `None` outside `1..=100`.
pub fn coefficients(steps: u32) -> Option<&'static JumpCoefficients> {
    if steps == 0 || steps as usize > JUMP_TABLE_LEN {
        return None;
    }
    Some(&JUMP_TABLE[steps as usize - 1])
}

/// `base^exp mod 2^32` by binary exponentiation. Wrapping u32 arithmetic is
/// exactly arithmetic mod 2^32.
const fn mod_pow(base: u32, mut exp: u32) -> u32 {
    let mut result: u32 = 1;
    let mut base = base;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result.wrapping_mul(base);
        }
        base = base.wrapping_mul(base);
        exp >>= 1;
    }
    result
}

const fn build_jump_table() -> [JumpCoefficients; JUMP_TABLE_LEN] {
    let mut table = [JumpCoefficients {
        multiplier_pow: 0,
        increment_sum: 0,
    }; JUMP_TABLE_LEN];

    // Geometric sum M^0 + .. + M^(n-1), accumulated iteratively.
    let mut sum: u32 = 0;
    let mut pow: u32 = 1;
    let mut n = 0;

    while n < JUMP_TABLE_LEN {
        sum = sum.wrapping_add(pow);
        pow = pow.wrapping_mul(MULTIPLIER);
        table[n] = JumpCoefficients {
            multiplier_pow: mod_pow(MULTIPLIER, n as u32 + 1),
            increment_sum: INCREMENT.wrapping_mul(sum),
        };
        n += 1;
    }

    table
}
