use thiserror::Error;

/// Errors reported by `CardinalityEstimator` operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Construction parameter outside of the supported bounds.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// Merge attempted between estimators with different register counts.
    #[error("incompatible precision: {left} != {right}")]
    IncompatiblePrecision { left: u8, right: u8 },

    /// Serialized estimator state can not be decoded.
    #[error("corrupt data: {reason}")]
    CorruptData { reason: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::debug!("rejected estimator argument: {}", reason);
        Error::InvalidArgument { reason }
    }

    pub(crate) fn corrupt_data(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::debug!("rejected estimator data: {}", reason);
        Error::CorruptData { reason }
    }
}
