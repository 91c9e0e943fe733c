//! `logcount` is a Rust crate designed to approximately count the number of distinct elements in a stream or dataset.
//!
//! This library uses HyperLogLog with small and large range corrections. Estimators are compact,
//! mergeable across threads or processes, and stored in a fixed byte layout portable across implementations.
//!
//! ```rust
//! use logcount::CardinalityEstimator;
//!
//! let mut lhs: CardinalityEstimator = CardinalityEstimator::new(12)?;
//! let mut rhs: CardinalityEstimator = CardinalityEstimator::new(12)?;
//! for i in 0u32..1_000 {
//!     lhs.add(&i.to_le_bytes());
//!     rhs.add(&(i + 500).to_le_bytes());
//! }
//!
//! let union = lhs.merge(&rhs)?;
//! assert!((union.estimate() - 1_500.0).abs() < 75.0);
//!
//! let restored = CardinalityEstimator::deserialize(&union.serialize())?;
//! assert_eq!(union, restored);
//! # Ok::<(), logcount::Error>(())
//! ```
pub mod error;
pub mod estimator;
mod hyperloglog;
pub mod precision;
#[cfg(feature = "with_serde")]
mod serde;
pub mod serialization;

pub use error::{Error, Result};
pub use estimator::CardinalityEstimator;
pub use precision::Precision;
