//! ## Serialized format
//! Bit-exact byte layout used to store and exchange estimators:
//! - byte 0        - precision `p` in [4..16] range
//! - bytes 1..     - `m = 2^p` register ranks, one byte per register, in index order
//!
//! The layout holds no hasher identity: estimators must only be restored
//! with the same hasher they were built with.

use std::hash::Hasher;

use crate::error::{Error, Result};
use crate::estimator::CardinalityEstimator;
use crate::precision::Precision;

/// Serialized length of an estimator with given precision
#[inline]
pub fn serialized_len(precision: Precision) -> usize {
    1 + precision.registers()
}

impl<H: Hasher + Default> CardinalityEstimator<H> {
    /// Serialize `CardinalityEstimator` into its byte layout
    pub fn serialize(&self) -> Vec<u8> {
        let registers = self.registers();
        let mut data = Vec::with_capacity(1 + registers.len());
        data.push(self.precision().bits());
        data.extend_from_slice(registers);
        data
    }

    /// Deserialize `CardinalityEstimator` from its byte layout
    pub fn deserialize(data: &[u8]) -> Result<Self> {
        let (&precision_bits, registers) = data
            .split_first()
            .ok_or_else(|| Error::corrupt_data("empty input"))?;
        Self::from_registers(precision_bits, registers)
    }
}
