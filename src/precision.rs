//! ## Precision
//! Number of bits `p` used for HyperLogLog register indices, which defines
//! `m = 2^p` registers of one byte each.
//!
//! Expected standard error is `1.04 / sqrt(m)`:
//! - p = 4:  26.00% (16 bytes)
//! - p = 10: 3.25% (1 KiB)
//! - p = 12: 1.62% (4 KiB)
//! - p = 14: 0.81% (16 KiB)
//! - p = 16: 0.41% (64 KiB)

use std::fmt::{Display, Formatter};

use crate::error::{Error, Result};

/// Validated estimator precision in `[4..16]` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Precision(u8);

impl Precision {
    pub const MIN: Precision = Precision(4);
    pub const MAX: Precision = Precision(16);
    pub const DEFAULT: Precision = Precision(12);

    /// Create precision from number of index bits
    pub fn new(bits: u8) -> Result<Self> {
        Self::checked(bits).ok_or_else(|| {
            Error::invalid_argument(format!(
                "precision {} is outside of [{}..{}] range",
                bits,
                Self::MIN,
                Self::MAX
            ))
        })
    }

    #[inline]
    pub(crate) fn checked(bits: u8) -> Option<Self> {
        (Self::MIN.0..=Self::MAX.0)
            .contains(&bits)
            .then_some(Self(bits))
    }

    /// Smallest precision with standard error not exceeding `error_rate`.
    pub fn for_error_rate(error_rate: f64) -> Result<Self> {
        if error_rate.is_nan() || error_rate <= 0.0 || error_rate >= 1.0 {
            return Err(Error::invalid_argument(format!(
                "error rate {} is outside of (0..1) range",
                error_rate
            )));
        }

        // 1.04 / sqrt(m) <= error_rate  <=>  m >= (1.04 / error_rate)^2
        let min_registers = (1.04 / error_rate).powi(2);
        let bits = min_registers.log2().ceil().max(f64::from(Self::MIN.0));
        if bits > f64::from(Self::MAX.0) {
            return Err(Error::invalid_argument(format!(
                "error rate {} requires more than 2^{} registers",
                error_rate,
                Self::MAX
            )));
        }

        Ok(Self(bits as u8))
    }

    /// Number of index bits
    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Number of HyperLogLog registers
    #[inline]
    pub fn registers(self) -> usize {
        1 << self.0
    }

    /// Largest rank a register can hold: all `64 - p` remaining hash bits are zero.
    #[inline]
    pub fn max_rank(self) -> u8 {
        64 - self.0 + 1
    }

    /// Expected relative standard error of estimates
    #[inline]
    pub fn standard_error(self) -> f64 {
        1.04 / (self.registers() as f64).sqrt()
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for Precision {
    type Error = Error;

    fn try_from(bits: u8) -> Result<Self> {
        Self::new(bits)
    }
}

impl From<Precision> for u8 {
    fn from(precision: Precision) -> Self {
        precision.0
    }
}

impl Display for Precision {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
