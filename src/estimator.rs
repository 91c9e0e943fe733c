//! Cardinality estimator allows to estimate number of distinct elements
//! in the stream or dataset and is defined with runtime precision `p`
//! and compile-time hasher `H`:
//! - `p`: precision parameter in [4..16] range, which defines
//!   number of bits to use for HyperLogLog register indices.
//! - `H`: hasher used to map observed items to 64-bit hashes,
//!   `WyHash` unless specified otherwise.
//!
//! # Data-structure design rationale
//!
//! ## Compact and mergeable
//! - `m = 2^p` one-byte registers allocated once at construction.
//! - Merging is an elementwise maximum of registers, so estimators built
//!   independently (e.g. one per thread) combine into the estimator of the
//!   union of their streams.
//!
//! ## Low latency
//! - Number of zero registers and registers' harmonic sum are
//!   stored and updated dynamically as more data being inserted,
//!   allowing to have truly constant `estimate` operations.
//! - `add` and `estimate` never allocate.
//!
//! ## Accuracy
//! - Expected error:
//!     p = 10: 1.04 / sqrt(2^10) = 3.25%
//!     p = 12: 1.04 / sqrt(2^12) = 1.62%
//!     p = 14: 1.04 / sqrt(2^14) = 0.81%
//!     p = 16: 1.04 / sqrt(2^16) = 0.41%
//! - Linear counting is used for small cardinalities while zero registers remain.
//!
//! # Data storage format
//! See `serialization` module: one precision byte followed by `m` register bytes.

use std::fmt::{Debug, Formatter};
use std::hash::{BuildHasher, BuildHasherDefault, Hash, Hasher};
use std::mem::{size_of, size_of_val};

use wyhash::WyHash;

use crate::error::{Error, Result};
use crate::hyperloglog::{self, decode_hash, harmonic_term, summarize, SUM_FRACTION_BITS};
use crate::precision::Precision;

pub struct CardinalityEstimator<H: Hasher + Default = WyHash> {
    precision: Precision,
    /// Number of registers set to 0
    zeros: u32,
    /// Fixed point harmonic sum of registers, see `hyperloglog` module
    sum: u128,
    registers: Box<[u8]>,
    /// Zero-sized build hasher
    build_hasher: BuildHasherDefault<H>,
}

impl<H: Hasher + Default> CardinalityEstimator<H> {
    /// Creates new instance of `CardinalityEstimator` with `2^precision_bits` registers
    pub fn new(precision_bits: u8) -> Result<Self> {
        Ok(Self::with_precision(Precision::new(precision_bits)?))
    }

    /// Creates new instance of `CardinalityEstimator` with already validated precision
    pub fn with_precision(precision: Precision) -> Self {
        let m = precision.registers();
        Self {
            precision,
            zeros: m as u32,
            sum: (m as u128) << SUM_FRACTION_BITS,
            registers: vec![0u8; m].into_boxed_slice(),
            build_hasher: BuildHasherDefault::default(),
        }
    }

    /// Restore `CardinalityEstimator` from raw register values
    pub fn from_registers(precision_bits: u8, registers: &[u8]) -> Result<Self> {
        let precision = Precision::checked(precision_bits)
            .ok_or_else(|| Error::corrupt_data(format!("invalid precision {}", precision_bits)))?;
        if registers.len() != precision.registers() {
            return Err(Error::corrupt_data(format!(
                "expected {} registers for precision {}, got {}",
                precision.registers(),
                precision,
                registers.len()
            )));
        }
        let max_rank = precision.max_rank();
        if let Some(idx) = registers.iter().position(|&rank| rank > max_rank) {
            return Err(Error::corrupt_data(format!(
                "register {} holds rank {} above maximum {}",
                idx, registers[idx], max_rank
            )));
        }

        let (sum, zeros) = summarize(registers);
        Ok(Self {
            precision,
            zeros,
            sum,
            registers: registers.into(),
            build_hasher: BuildHasherDefault::default(),
        })
    }

    /// Add raw bytes item into `CardinalityEstimator`
    #[inline]
    pub fn add(&mut self, item: &[u8]) {
        let mut hasher = self.build_hasher.build_hasher();
        hasher.write(item);
        self.insert_hash(hasher.finish());
    }

    /// Insert a hashable item into `CardinalityEstimator`
    #[inline]
    pub fn insert<T: Hash + ?Sized>(&mut self, item: &T) {
        let mut hasher = self.build_hasher.build_hasher();
        item.hash(&mut hasher);
        self.insert_hash(hasher.finish());
    }

    /// Insert hash into `CardinalityEstimator`
    #[inline]
    pub fn insert_hash(&mut self, hash: u64) {
        let (idx, rank) = decode_hash(hash, self.precision);
        self.update_rank(idx, rank);
    }

    /// Raise `idx` register to `new_rank` keeping zeros and harmonic sum in sync
    #[inline]
    fn update_rank(&mut self, idx: usize, new_rank: u8) {
        let old_rank = self.registers[idx];
        if new_rank > old_rank {
            self.registers[idx] = new_rank;
            self.zeros -= u32::from(old_rank == 0);
            self.sum -= harmonic_term(old_rank);
            self.sum += harmonic_term(new_rank);
        }
    }

    /// Return cardinality estimate
    #[inline]
    pub fn estimate(&self) -> f64 {
        hyperloglog::estimate(self.registers.len(), self.sum, self.zeros)
    }

    /// Return cardinality estimate rounded to the nearest integer
    #[inline]
    pub fn count(&self) -> u64 {
        (self.estimate() + 0.5) as u64
    }

    /// Return whether no item has been observed
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.zeros as usize == self.registers.len()
    }

    /// Merge cardinality estimators into a new one observing the union of both streams
    pub fn merge(&self, rhs: &Self) -> Result<Self> {
        let mut merged = self.clone();
        merged.merge_from(rhs)?;
        Ok(merged)
    }

    /// Merge `rhs` into `self` in place
    pub fn merge_from(&mut self, rhs: &Self) -> Result<()> {
        if self.precision != rhs.precision {
            tracing::debug!(
                "refusing to merge estimators with precision {} and {}",
                self.precision,
                rhs.precision
            );
            return Err(Error::IncompatiblePrecision {
                left: self.precision.bits(),
                right: rhs.precision.bits(),
            });
        }
        for (idx, &rhs_rank) in rhs.registers.iter().enumerate() {
            self.update_rank(idx, rhs_rank);
        }
        Ok(())
    }

    /// Reset all registers to 0
    pub fn clear(&mut self) {
        self.registers.fill(0);
        let m = self.registers.len();
        self.zeros = m as u32;
        self.sum = (m as u128) << SUM_FRACTION_BITS;
    }

    /// Return precision of `CardinalityEstimator`
    #[inline]
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Return raw register values
    #[inline]
    pub fn registers(&self) -> &[u8] {
        &self.registers
    }

    /// Expected relative standard error of estimates
    #[inline]
    pub fn standard_error(&self) -> f64 {
        self.precision.standard_error()
    }

    /// Return memory size of `CardinalityEstimator`
    pub fn size_of(&self) -> usize {
        size_of::<Self>() + size_of_val(&*self.registers)
    }
}

impl<H: Hasher + Default> Default for CardinalityEstimator<H> {
    fn default() -> Self {
        Self::with_precision(Precision::DEFAULT)
    }
}

impl<H: Hasher + Default> Clone for CardinalityEstimator<H> {
    fn clone(&self) -> Self {
        Self {
            precision: self.precision,
            zeros: self.zeros,
            sum: self.sum,
            registers: self.registers.clone(),
            build_hasher: BuildHasherDefault::default(),
        }
    }
}

impl<H: Hasher + Default> PartialEq for CardinalityEstimator<H> {
    /// Compare cardinality estimators
    fn eq(&self, rhs: &Self) -> bool {
        self.precision == rhs.precision && self.registers == rhs.registers
    }
}

impl<H: Hasher + Default> Eq for CardinalityEstimator<H> {}

impl<'a, T, H> Extend<&'a T> for CardinalityEstimator<H>
where
    T: Hash + ?Sized + 'a,
    H: Hasher + Default,
{
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, items: I) {
        for item in items {
            self.insert(item);
        }
    }
}

impl<H: Hasher + Default> Debug for CardinalityEstimator<H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ precision: {}, estimate: {}, size: {} }}",
            self.precision,
            self.count(),
            self.size_of()
        )
    }
}
