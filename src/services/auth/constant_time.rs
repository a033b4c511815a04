//! Timing-safe comparison for signature checks.

use subtle::ConstantTimeEq;

// OR of every pairwise xor; zero iff the inputs are equal.
fn accumulate_difference(a: &[u8], b: &[u8]) -> u8 {
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y))
}

/// Compare two byte strings without an early exit on the first differing byte.
///
/// A length mismatch returns immediately: lengths are public (the expected
/// signature length is fixed by the algorithm).
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    accumulate_difference(a, b).ct_eq(&0u8).into()
}
