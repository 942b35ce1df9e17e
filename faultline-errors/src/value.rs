//! The uniformly shaped error value

use faultline_responses::Kind;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Serialized marker key identifying a value that has already passed through
/// faultline construction. The nested-error guard looks for this key inside
/// embedded `err`/`error` objects.
pub const WRAPPED_KEY: &str = "faultlineError";

/// The standardized error value.
///
/// Every constructed value carries:
/// - `code`: numeric classification, the catalog default unless overridden
/// - `message`: human-readable description, never empty after construction
/// - extra fields supplied by the caller, kept in their own container so they
///   cannot collide with the reserved fields
/// - optionally a `stack` string and the adopted source error
///
/// Values are classified by code, not identity: `err.is(Kind::NotFound)`
/// works in a handler far from the construction site, and keeps working
/// after the value has crossed a serialization boundary.
///
/// # Example
///
/// ```rust
/// use faultline_errors::{Error, Kind};
///
/// let err = Error::with_reason(Kind::Conflict, "duplicate key");
/// assert_eq!(err.code(), 409);
/// assert_eq!(err.message(), "Conflict: duplicate key");
/// assert_eq!(err.kind(), Some(Kind::Conflict));
/// ```
///
/// The `stack` field is deliberately excluded from plain serialization
/// (mirroring how runtimes keep it out of an error's enumerable surface);
/// use [`crate::to_log_object`] to produce a structured-log value that
/// keeps it.
#[derive(Clone, Serialize, Deserialize)]
pub struct Error {
    pub(crate) code: u16,
    pub(crate) message: String,
    #[serde(rename = "faultlineError", default)]
    pub(crate) wrapped: bool,
    #[serde(flatten)]
    pub(crate) extras: Map<String, Value>,
    #[serde(skip)]
    pub(crate) stack: Option<String>,
    #[serde(skip)]
    pub(crate) source: Option<Arc<anyhow::Error>>,
}

impl Error {
    // =========================================================================
    // Getters
    // =========================================================================

    /// Get the numeric code
    pub fn code(&self) -> u16 {
        self.code
    }

    /// Get the message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether this value has passed through faultline construction.
    ///
    /// Once set the marker is never cleared, even when the value is adopted
    /// as the base of another construction.
    pub fn is_wrapped(&self) -> bool {
        self.wrapped
    }

    /// Get the caller-supplied extra fields
    pub fn extras(&self) -> &Map<String, Value> {
        &self.extras
    }

    /// Get a single extra field by key
    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.extras.get(key)
    }

    /// Get the stack string, if one was captured or supplied
    pub fn stack(&self) -> Option<&str> {
        self.stack.as_deref()
    }

    /// Get the adopted source error (if any)
    pub fn source_ref(&self) -> Option<&anyhow::Error> {
        self.source.as_deref()
    }

    // =========================================================================
    // Classification
    // =========================================================================

    /// Classify this value against the catalog by its code.
    ///
    /// Returns `None` when the code was overridden to something outside the
    /// catalog.
    pub fn kind(&self) -> Option<Kind> {
        Kind::from_code(self.code)
    }

    /// The generic predicate: true iff this value's code matches `kind`.
    pub fn is(&self, kind: Kind) -> bool {
        self.code == kind.code()
    }
}

/// Classify an error value against the catalog by its code.
///
/// Free-function form of [`Error::kind`], for call sites that dispatch on
/// the result:
///
/// ```rust
/// use faultline_errors::{classify, Error, Kind};
///
/// let err = Error::new(Kind::Gone);
/// match classify(&err) {
///     Some(Kind::Gone) => {}
///     _ => panic!("expected Gone"),
/// }
/// ```
pub fn classify(err: &Error) -> Option<Kind> {
    err.kind()
}

// =============================================================================
// Display - compact, single-line format for logs
// =============================================================================

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}", self.message, self.code)?;
        if let Some(kind) = self.kind() {
            write!(f, " {}", kind.name())?;
        }
        write!(f, "]")
    }
}

// =============================================================================
// Debug - verbose, multi-line format for debugging
// =============================================================================

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            Some(kind) => writeln!(f, "Error {} ({})", self.code, kind.name())?,
            None => writeln!(f, "Error {} (uncataloged)", self.code)?,
        }

        writeln!(f, "    Message: {}", self.message)?;

        if !self.extras.is_empty() {
            writeln!(f, "    Extras:")?;
            for (key, value) in &self.extras {
                writeln!(f, "        {}: {}", key, value)?;
            }
        }

        if let Some(stack) = &self.stack {
            writeln!(f, "    Stack:")?;
            for line in stack.lines() {
                writeln!(f, "        {}", line)?;
            }
        }

        if let Some(source) = &self.source {
            writeln!(f, "    Source: {:?}", source)?;
        }

        Ok(())
    }
}

// =============================================================================
// std::error::Error implementation
// =============================================================================

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Kind;
    use serde_json::json;

    #[test]
    fn test_defaults_only() {
        let err = Error::new(Kind::NotFound);
        assert_eq!(err.code(), 404);
        assert_eq!(err.message(), "Not Found");
        assert!(err.extras().is_empty());
        assert!(err.is_wrapped());
        assert!(err.stack().is_none());
    }

    #[test]
    fn test_classification() {
        let e404 = Error::new(Kind::NotFound);
        let e409 = Error::new(Kind::Conflict);

        assert!(e404.is(Kind::NotFound));
        assert!(!e404.is(Kind::Conflict));
        assert!(e409.is(Kind::Conflict));
        assert!(!e409.is(Kind::NotFound));

        assert_eq!(e404.kind(), Some(Kind::NotFound));
        assert_eq!(classify(&e409), Some(Kind::Conflict));
    }

    #[test]
    fn test_classification_of_overridden_code() {
        let err = Error::build(Kind::NotFound).field("code", 418).finish();
        assert_eq!(err.code(), 418);
        assert_eq!(err.kind(), None);
    }

    #[test]
    fn test_display() {
        let err = Error::with_reason(Kind::Conflict, "duplicate key");
        let display = format!("{}", err);
        assert!(display.contains("Conflict: duplicate key"));
        assert!(display.contains("409"));
        assert!(display.contains("conflict"));
    }

    #[test]
    fn test_debug_sections() {
        let err = Error::build(Kind::Internal)
            .reason("boom")
            .field("request_id", "r-1")
            .finish();
        let debug = format!("{:?}", err);
        assert!(debug.contains("500"));
        assert!(debug.contains("Message: Internal Error: boom"));
        assert!(debug.contains("request_id"));
    }

    #[test]
    fn test_serialized_shape() {
        let err = Error::build(Kind::NotFound)
            .field("extra", "x")
            .field("stack", "synthetic trace")
            .finish();

        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["code"], json!(404));
        assert_eq!(value["message"], json!("Not Found"));
        assert_eq!(value[WRAPPED_KEY], json!(true));
        // extras are flattened to the top level
        assert_eq!(value["extra"], json!("x"));
        // the stack never appears in plain serialization
        assert!(value.get("stack").is_none());
    }

    #[test]
    fn test_deserialize_collects_extras() {
        let err: Error = serde_json::from_value(json!({
            "code": 409,
            "message": "Conflict",
            "faultlineError": true,
            "attempt": 3
        }))
        .unwrap();

        assert_eq!(err.code(), 409);
        assert!(err.is_wrapped());
        assert_eq!(err.extra("attempt"), Some(&json!(3)));
    }

    #[test]
    fn test_std_error_source_chain() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "config.json not found");
        let err = Error::wrap(Kind::Internal, io_err);

        assert!(err.source_ref().is_some());
        let source = std::error::Error::source(&err).expect("source");
        assert!(source.to_string().contains("config.json"));
    }
}
