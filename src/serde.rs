//! # Serde module for LogLogBeta
//!
//! This module provides serde-based (serialization and deserialization) features for
//! `LogLogBeta`. It uses `serde`'s custom serialization and deserialization mechanisms.
//!
//! During serialization the sketch is converted into a tuple
//! `(version, alpha, registers)`, mirroring the fields of the binary codec.
//! During deserialization the tuple is validated the same way the binary codec
//! validates its input (format version, register count, alpha and register ranks).
//!
//! Refer to the serde documentation for more details on custom serialization and deserialization:
//! - [Serialization](https://serde.rs/impl-serialize.html)
//! - [Deserialization](https://serde.rs/impl-deserialize.html)
use serde::de::Error;
use serde::ser::SerializeTuple;
use serde::{Deserialize, Serialize};

use crate::codec::FORMAT_VERSION;
use crate::estimator::LogLogBeta;

impl<const P: usize> Serialize for LogLogBeta<P> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut tup = serializer.serialize_tuple(3)?;
        tup.serialize_element(&FORMAT_VERSION)?;
        tup.serialize_element(&self.alpha)?;
        tup.serialize_element(self.registers())?;
        tup.end()
    }
}

impl<'de, const P: usize> Deserialize<'de> for LogLogBeta<P> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let (version, alpha, registers): (u8, f64, Vec<u8>) =
            Deserialize::deserialize(deserializer)?;
        LogLogBeta::from_parts(version, alpha, &registers).map_err(D::Error::custom)
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
        let mut original = LogLogBeta::<14>::new();

        for i in 0..n {
            let item = format!("item{}", i);
            original.insert(item.as_bytes());
        }

        let serialized = serde_json::to_string(&original).expect("serialization failed");
        assert!(
            !serialized.is_empty(),
            "serialized string should not be empty"
        );

        let deserialized: LogLogBeta<14> =
            serde_json::from_str(&serialized).expect("deserialization failed");

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_deserialize_invalid_json() {
        let invalid_json = "{ invalid_json_string }";
        let result: Result<LogLogBeta<14>, _> = serde_json::from_str(invalid_json);

        assert!(
            result.is_err(),
            "Deserialization should fail for invalid JSON"
        );
    }

    #[test_case("[1,0.5,[0,0]]"; "too few registers")]
    #[test_case("[2,0.673,[0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0]]"; "unsupported version")]
    #[test_case("[1,-1.0,[0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0]]"; "negative alpha")]
    #[test_case("[1,0.673,[62,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0]]"; "rank out of range")]
    #[test_case("[1,0.673,[0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0]]"; "too many registers")]
    #[test_case("[1,0.673]"; "missing registers")]
    fn test_failed_deserialization(input: &str) {
        let result: Result<LogLogBeta<4>, _> = serde_json::from_str(input);
        assert!(result.is_err());
    }

    #[test]
    fn test_valid_small_precision() {
        let input = "[1,0.673,[61,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1]]";
        let e: LogLogBeta<4> = serde_json::from_str(input).expect("deserialization failed");
        assert_eq!(e.registers()[0], 61);
        assert_eq!(e.registers()[15], 1);
        assert_eq!(serde_json::to_string(&e).unwrap(), input);
    }
}
