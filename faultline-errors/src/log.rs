//! Log-safe serialization
//!
//! Structured-log encoders want plain enumerable data, and the stack is the
//! one diagnostic field that naive copying tends to drop or mangle: it is
//! kept out of an error's plain serialized form here (as it is kept out of
//! the enumerable surface on most runtimes), and it holds a multi-line
//! platform-specific string. `to_log_object` produces a value with the stack
//! explicitly reattached as the final step, so it survives intact.

use crate::builder::backtrace_string;
use crate::value::Error;
use serde_json::{Map, Value};

/// Conversion into a value safe to hand to a structured-log encoder.
///
/// Total: every implementation must succeed on every input. Values that are
/// not error-shaped pass through unchanged.
pub trait ToLogObject {
    fn to_log_object(&self) -> Value;
}

/// Produce a log-safe view of a value.
///
/// ```rust
/// use faultline_errors::{to_log_object, Error, Kind};
///
/// let err = Error::build(Kind::Internal)
///     .field("stack", "synthetic trace")
///     .finish();
///
/// let log = to_log_object(&err);
/// assert_eq!(log["stack"], "synthetic trace");
/// ```
pub fn to_log_object<T: ToLogObject + ?Sized>(value: &T) -> Value {
    value.to_log_object()
}

impl ToLogObject for Error {
    fn to_log_object(&self) -> Value {
        // Plain serialization carries every field except the stack.
        let mut map = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        if let Some(stack) = self.stack() {
            map.insert("stack".to_string(), Value::String(stack.to_string()));
        }
        Value::Object(map)
    }
}

impl ToLogObject for anyhow::Error {
    fn to_log_object(&self) -> Value {
        let mut map = Map::new();
        map.insert("message".to_string(), Value::String(self.to_string()));
        if let Some(stack) = backtrace_string(self) {
            map.insert("stack".to_string(), Value::String(stack));
        }
        Value::Object(map)
    }
}

/// Already-plain data is not error-shaped; logging it is a pass-through.
impl ToLogObject for Value {
    fn to_log_object(&self) -> Value {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Kind;
    use serde_json::json;

    #[test]
    fn test_plain_values_pass_through() {
        let plain = json!({ "a": 1, "nested": { "b": [1, 2, 3] } });
        assert_eq!(to_log_object(&plain), plain);

        let text = json!("hello");
        assert_eq!(to_log_object(&text), text);

        let number = json!(42);
        assert_eq!(to_log_object(&number), number);
    }

    #[test]
    fn test_stack_survives_log_serialization() {
        let stack = "Error: boom\n    at reconcile (worker.rs:42)";
        let err = Error::build(Kind::Internal)
            .reason("boom")
            .field("request_id", "r-7")
            .field("stack", stack)
            .finish();

        // naive serialization drops the stack...
        let naive = serde_json::to_value(&err).unwrap();
        assert!(naive.get("stack").is_none());

        // ...the log view preserves it exactly, along with every other field
        let log = to_log_object(&err);
        assert_eq!(log["stack"], json!(stack));
        assert_eq!(log["code"], json!(500));
        assert_eq!(log["message"], json!("Internal Error: boom"));
        assert_eq!(log["request_id"], json!("r-7"));
        assert_eq!(log["faultlineError"], json!(true));
    }

    #[test]
    fn test_error_without_stack_has_no_stack_key() {
        let err = Error::new(Kind::NotFound);
        let log = to_log_object(&err);
        assert!(log.get("stack").is_none());
        assert_eq!(log["code"], json!(404));
    }

    #[test]
    fn test_external_error_log_view() {
        let external = anyhow::anyhow!("connection reset by peer");
        let log = to_log_object(&external);
        assert_eq!(log["message"], json!("connection reset by peer"));
    }
}
