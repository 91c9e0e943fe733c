//! ## HyperLogLog register math
//! Estimates cardinality from `m` registers holding the maximal observed rank
//! for hashes routed to each of them.
//!
//! [Original HyperLogLog paper](http://algo.inria.fr/flajolet/Publications/FlFuGaMe07.pdf)
//!
//! Hash decomposition for precision `p`:
//! - 0..p bits     - register index
//! - p..63 bits    - remainder `w`, whose leading zero run length + 1 is the rank
//!
//! The harmonic sum `sum(2^-rank)` is kept as a fixed point number with
//! `SUM_FRACTION_BITS` fractional bits. Ranks never exceed 61, so every term
//! is an exact integer and incremental updates never drift.

use crate::precision::Precision;

/// Number of fractional bits of the fixed point harmonic sum
pub(crate) const SUM_FRACTION_BITS: u32 = 64;
/// `2^64` as floating point, the hash space size
const HASH_SPACE: f64 = 18_446_744_073_709_551_616.0;
/// Raw estimates above this threshold get large range correction
const LARGE_RANGE_THRESHOLD: f64 = HASH_SPACE / 30.0;

/// Split hash into register index and rank
#[inline]
pub(crate) fn decode_hash(hash: u64, precision: Precision) -> (usize, u8) {
    let p = u32::from(precision.bits());
    let idx = (hash & ((1 << p) - 1)) as usize;
    let w = hash >> p;
    // `w` has `p` leading zero bits introduced by the shift; all-zero `w` yields max rank
    let rank = w.leading_zeros() - p + 1;
    (idx, rank as u8)
}

/// Fixed point value of `2^-rank`
#[inline]
pub(crate) fn harmonic_term(rank: u8) -> u128 {
    1u128 << (SUM_FRACTION_BITS - u32::from(rank))
}

/// Fixed point harmonic sum and number of zero registers
pub(crate) fn summarize(registers: &[u8]) -> (u128, u32) {
    registers.iter().fold((0, 0), |(sum, zeros), &rank| {
        (sum + harmonic_term(rank), zeros + u32::from(rank == 0))
    })
}

/// Parameter for bias correction
#[inline]
pub(crate) fn alpha(m: usize) -> f64 {
    match m {
        16 => 0.673,
        32 => 0.697,
        64 => 0.709,
        _ => 0.7213 / (1.0 + 1.079 / (m as f64)),
    }
}

/// Range corrected cardinality estimate from register summary
#[inline]
pub(crate) fn estimate(m: usize, sum: u128, zeros: u32) -> f64 {
    let m_f64 = m as f64;
    let sum = sum as f64 / 2f64.powi(SUM_FRACTION_BITS as i32);
    let raw = alpha(m) * m_f64 * m_f64 / sum;

    if raw <= 2.5 * m_f64 && zeros > 0 {
        // small range correction: linear counting
        m_f64 * (m_f64 / f64::from(zeros)).ln()
    } else if raw > LARGE_RANGE_THRESHOLD && raw < HASH_SPACE {
        -HASH_SPACE * (1.0 - raw / HASH_SPACE).ln()
    } else {
        raw
    }
}
