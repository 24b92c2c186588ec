//! Fixed parameters of the target generator. These are compiled in: the
//! whole model is specific to one recurrence and is not user-configurable.

/// Multiplier of the linear recurrence `state' = state * M + C (mod 2^32)`.
pub const MULTIPLIER: u32 = 0x5D58_8B65;

/// Additive increment of the recurrence.
pub const INCREMENT: u32 = 0x0026_9EC3;

/// The recurrence modulus, kept as u64 so intermediate sums never overflow.
pub const MODULUS: u64 = 1 << 32;

/// Largest jump-ahead step count with precomputed coefficients.
pub const JUMP_TABLE_LEN: usize = 100;
