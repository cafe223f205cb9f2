//! Dry-run serialization probe
//!
//! Static type information cannot predict serializability: a container may
//! hold one live value, and only an actual encode attempt finds it. The
//! probe performs that attempt into a discard sink, using the same encoding
//! the artifact writer uses, so a probe success is an honest predictor of
//! the final payload write.

use std::io;
use thiserror::Error;
use worksnap_core::Value;

/// Failure recorded when a candidate value refuses serialization.
///
/// Probe failures are per-candidate diagnostics: the candidate is excluded
/// from the accepted set and the capture continues. They never abort the
/// overall call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ProbeError {
    /// The serializer's own description of the failure
    pub message: String,
}

/// Attempt to serialize `value` into a discard sink.
///
/// Nothing is retained on success and nothing is mutated on failure; the
/// candidate's bytes never reach the artifact buffer.
pub fn probe_value(value: &Value) -> Result<(), ProbeError> {
    rmp_serde::encode::write_named(&mut io::sink(), value).map_err(|e| ProbeError {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_data_values_pass() {
        assert!(probe_value(&Value::Null).is_ok());
        assert!(probe_value(&Value::Int(42)).is_ok());
        assert!(probe_value(&Value::from("text")).is_ok());
        assert!(probe_value(&Value::Array(vec![Value::Int(1), Value::Float(2.0)])).is_ok());

        let mut obj = BTreeMap::new();
        obj.insert("k".to_string(), Value::Bytes(vec![1, 2, 3]));
        assert!(probe_value(&Value::Object(obj)).is_ok());
    }

    #[test]
    fn test_live_values_fail() {
        assert!(probe_value(&Value::module("numpy")).is_err());
        assert!(probe_value(&Value::generator("g")).is_err());
        assert!(probe_value(&Value::file("data.csv")).is_err());
    }

    #[test]
    fn test_container_fails_as_a_whole() {
        // One poisoned element rejects the entire container.
        let mixed = Value::Array(vec![
            Value::Int(1),
            Value::Int(2),
            Value::generator("stream"),
        ]);
        let err = probe_value(&mixed).unwrap_err();
        assert!(!err.message.is_empty());
    }
}
