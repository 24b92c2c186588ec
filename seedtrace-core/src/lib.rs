//! Deterministic model of the target program's pseudo-random number
//! generator: a 32-bit linear congruential recurrence with O(1) jump-ahead,
//! exact reverse stepping, seed-recovery search primitives, and the weighted
//! encounter-table simulation that consumes the generator's output.

pub mod calendar;
pub mod constants;
pub mod encounter;
pub mod error;
pub mod jump;
pub mod reverse;
pub mod rng;
pub mod search;

pub use error::DomainError;
pub use rng::Lcg;
