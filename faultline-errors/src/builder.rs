//! Error construction and the merge order

use crate::value::{Error, WRAPPED_KEY};
use faultline_responses::Kind;
use serde_json::{Map, Value};
use std::backtrace::BacktraceStatus;
use std::sync::Arc;

/// Prefix added to the message when construction detects an already-wrapped
/// error being wrapped again.
const NEST_WARNING: &str = "(warning: please do not nest errors) ";

/// Conventional keys under which callers embed a prior error in a data object.
const NESTED_KEYS: [&str; 2] = ["err", "error"];

/// What the merge starts from.
enum Base {
    /// No base; defaults come entirely from the catalog.
    Fresh,
    /// An external error adopted as the base: its message becomes the initial
    /// message, its backtrace (when captured) the stack, and the error itself
    /// is retained for the `source()` chain.
    Adopted(anyhow::Error),
    /// A previously constructed value adopted as the base; all of its fields
    /// carry over and the nested-error guard fires.
    Rewrapped(Error),
}

/// Collects construction inputs, then merges them in a fixed order:
/// catalog defaults < adopted-base fields < explicit data < reason.
///
/// # Example
///
/// ```rust
/// use faultline_errors::{Error, Kind};
///
/// let err = Error::build(Kind::Conflict)
///     .reason("duplicate key")
///     .field("table", "users")
///     .finish();
///
/// assert_eq!(err.message(), "Conflict: duplicate key");
/// assert_eq!(err.extra("table").unwrap(), "users");
/// ```
pub struct Builder {
    kind: Kind,
    reason: Option<String>,
    data: Map<String, Value>,
    base: Base,
}

impl Error {
    /// Start building an error of the given kind.
    pub fn build(kind: Kind) -> Builder {
        Builder {
            kind,
            reason: None,
            data: Map::new(),
            base: Base::Fresh,
        }
    }

    /// Construct from catalog defaults alone.
    pub fn new(kind: Kind) -> Error {
        Error::build(kind).finish()
    }

    /// Construct with a reason appended to the default message.
    pub fn with_reason(kind: Kind, reason: impl Into<String>) -> Error {
        Error::build(kind).reason(reason).finish()
    }

    /// Construct with caller-supplied data fields merged in.
    pub fn with_data(kind: Kind, data: Map<String, Value>) -> Error {
        Error::build(kind).data(data).finish()
    }

    /// Construct by adopting an external error as the base.
    pub fn wrap(kind: Kind, source: impl Into<anyhow::Error>) -> Error {
        Error::build(kind).source(source).finish()
    }
}

impl Builder {
    /// Set the reason string. Appended to the message with a `": "` separator
    /// once all other message composition is done.
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Add one data field.
    ///
    /// The reserved keys `code`, `message` and `stack` override the
    /// corresponding typed field instead of landing in extras.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Merge a whole data object. Later keys win over earlier ones.
    pub fn data(mut self, data: Map<String, Value>) -> Self {
        self.data.extend(data);
        self
    }

    /// Adopt an external error as the base of the merge.
    pub fn source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.base = Base::Adopted(source.into());
        self
    }

    /// Adopt a previously constructed value as the base of the merge.
    ///
    /// Its fields carry over (including its code, which catalog defaults
    /// never override) and the resulting message is prefixed with the
    /// nesting warning.
    pub fn rewrap(mut self, prior: Error) -> Self {
        self.base = Base::Rewrapped(prior);
        self
    }

    /// Run the merge and produce the error value.
    pub fn finish(self) -> Error {
        let Builder {
            kind,
            reason,
            data,
            base,
        } = self;

        let mut warn = false;

        let (code, mut message, mut stack, mut extras, source) = match base {
            Base::Fresh => (None, String::new(), None, Map::new(), None),
            Base::Adopted(err) => {
                let stack = backtrace_string(&err);
                (None, err.to_string(), stack, Map::new(), Some(Arc::new(err)))
            }
            Base::Rewrapped(prior) => {
                warn = prior.wrapped;
                (
                    Some(prior.code),
                    prior.message,
                    prior.stack,
                    prior.extras,
                    prior.source,
                )
            }
        };

        // Already-wrapped errors embedded under the conventional keys.
        // Absent or non-error-shaped values mean "not nested".
        for key in NESTED_KEYS {
            let tagged = data
                .get(key)
                .and_then(|v| v.get(WRAPPED_KEY))
                .and_then(Value::as_bool)
                .unwrap_or(false);
            if tagged {
                warn = true;
            }
        }

        // Catalog defaults fill only what the base left unset.
        let mut code = code.unwrap_or(kind.code());
        if message.is_empty() {
            message = kind.default_message().to_string();
        }

        // Explicit data wins over defaults and over the adopted base.
        // Reserved keys are intercepted, with invalid shapes treated as
        // absent, so extras can never shadow a typed field.
        for (key, value) in data {
            match key.as_str() {
                "code" => {
                    if let Some(n) = value.as_u64().and_then(|n| u16::try_from(n).ok()) {
                        code = n;
                    }
                }
                "message" => {
                    if let Some(s) = value.as_str() {
                        message = s.to_string();
                    }
                }
                "stack" => {
                    if let Some(s) = value.as_str() {
                        stack = Some(s.to_string());
                    }
                }
                WRAPPED_KEY => {}
                _ => {
                    extras.insert(key, value);
                }
            }
        }

        if let Some(reason) = reason {
            if message.is_empty() {
                message = reason;
            } else {
                message.push_str(": ");
                message.push_str(&reason);
            }
        }

        // An explicitly blanked message with no reason to replace it falls
        // back to the catalog default; a constructed value never carries an
        // empty message.
        if message.is_empty() {
            message = kind.default_message().to_string();
        }

        if warn {
            message.insert_str(0, NEST_WARNING);
        }

        Error {
            code,
            message,
            wrapped: true,
            extras,
            stack,
            source,
        }
    }
}

/// Render a captured backtrace as the stack string. Backtrace capture is
/// runtime-configured (RUST_BACKTRACE / RUST_LIB_BACKTRACE); when disabled
/// there is no stack to carry.
pub(crate) fn backtrace_string(err: &anyhow::Error) -> Option<String> {
    let backtrace = err.backtrace();
    match backtrace.status() {
        BacktraceStatus::Captured => Some(backtrace.to_string()),
        _ => None,
    }
}
