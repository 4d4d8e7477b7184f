//! Integer log helpers shared by the sparse-table family of schemes.

use crate::error::ArcaError;

/// Returns `floor(log2(x))`. Panics-free for `x >= 1`; callers must not
/// pass `x <= 0`.
pub fn log2_floor(x: i64) -> i64 {
    debug_assert!(x >= 1);
    (bit_length(x) - 1) as i64
}

/// Returns `ceil(log2(x))`, defined as 0 for `x == 1`.
pub fn log2_ceil(x: i64) -> i64 {
    debug_assert!(x >= 1);
    bit_length(x - 1) as i64
}

/// Returns the smallest power of two `>= x`. Fails on `x <= 0`.
pub fn next_power_of_2(x: i64) -> Result<i64, ArcaError> {
    if x <= 0 {
        return Err(ArcaError::Parameter("x must be positive".into()));
    }
    Ok(1i64 << log2_ceil(x))
}

/// Number of bits needed to represent `x` (0 for `x == 0`).
/// `pub(crate)` because the AS-table family of schemes needs it
/// directly to locate the lowest common dyadic block of two domain
/// points.
pub(crate) fn bit_length(x: i64) -> u32 {
    if x <= 0 {
        0
    } else {
        64 - (x as u64).leading_zeros()
    }
}
