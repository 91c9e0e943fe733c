//! # Serde module for CardinalityEstimator
//!
//! This module provides serde-based (serialization and deserialization) features for
//! `CardinalityEstimator`, reusing the byte layout of the `serialization` module:
//! the estimator is serialized as a byte sequence of its precision followed by registers.
//!
//! During deserialization the byte sequence is validated the same way as
//! `CardinalityEstimator::deserialize` does, so corrupt inputs surface as serde errors.
//!
//! Refer to the serde documentation for more details on custom serialization and deserialization:
//! - [Serialization](https://serde.rs/impl-serialize.html)
//! - [Deserialization](https://serde.rs/impl-deserialize.html)
use std::hash::Hasher;

use serde::de::Error;
use serde::{Deserialize, Serialize};

use crate::estimator::CardinalityEstimator;

impl<H: Hasher + Default> Serialize for CardinalityEstimator<H> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bytes(&CardinalityEstimator::serialize(self))
    }
}

impl<'de, H: Hasher + Default> Deserialize<'de> for CardinalityEstimator<H> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let data: Vec<u8> = Deserialize::deserialize(deserializer)?;
        CardinalityEstimator::deserialize(&data).map_err(Error::custom)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0; "empty set")]
    #[test_case(1; "single element")]
    #[test_case(2; "two distinct elements")]
    #[test_case(100; "hundred distinct elements")]
    #[test_case(10000; "ten thousand distinct elements")]
    fn test_serde(n: usize) {
        let mut original_estimator = CardinalityEstimator::<wyhash::WyHash>::new(8).unwrap();

        for i in 0..n {
            let item = &format!("item{}", i);
            original_estimator.insert(&item);
        }

        let serialized = serde_json::to_string(&original_estimator).expect("serialization failed");
        assert!(
            serialized.starts_with("[8,"),
            "serialized string should start with precision"
        );

        let deserialized_estimator: CardinalityEstimator =
            serde_json::from_str(&serialized).expect("deserialization failed");

        assert_eq!(original_estimator, deserialized_estimator);
    }

    #[test]
    fn test_deserialize_invalid_json() {
        let invalid_json = "{ invalid_json_string }";
        let result: Result<CardinalityEstimator, _> = serde_json::from_str(invalid_json);

        assert!(
            result.is_err(),
            "Deserialization should fail for invalid JSON"
        );
    }

    #[test_case("[]".as_bytes(); "empty array")]
    #[test_case("[4,0,0]".as_bytes(); "truncated registers")]
    #[test_case("[3,0,0,0,0,0,0,0,0]".as_bytes(); "invalid precision")]
    #[test_case("[4,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0]".as_bytes(); "trailing register")]
    #[test_case("[4,256,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0]".as_bytes(); "byte overflow")]
    #[test_case("[4,62,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0]".as_bytes(); "rank above maximum")]
    fn test_failed_deserialization(input: &[u8]) {
        let result: Result<CardinalityEstimator, _> = serde_json::from_slice(input);
        assert!(result.is_err());
    }
}
