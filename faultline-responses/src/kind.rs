//! The response kind catalog

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::fmt;

/// Defines the catalog in one place: variant, wire name, code, default message.
///
/// Everything else (lookup tables, accessors) is generated from this single
/// table so the three representations can never drift apart.
macro_rules! catalog {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident = ($name:literal, $code:literal, $message:literal)
        ),+ $(,)?
    ) => {
        /// A named response kind with a fixed numeric code and default message.
        ///
        /// Users match on `Kind` to decide how to handle specific cases, or use
        /// the code/name accessors when talking to systems that only understand
        /// the numeric or string vocabulary.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[non_exhaustive]
        pub enum Kind {
            $(
                $(#[$meta])*
                $variant,
            )+
        }

        impl Kind {
            /// Every kind in the catalog, in code order.
            pub const ALL: &'static [Kind] = &[$(Kind::$variant),+];

            /// The numeric code for this kind.
            pub const fn code(self) -> u16 {
                match self {
                    $(Kind::$variant => $code,)+
                }
            }

            /// The default human-readable message for this kind.
            pub const fn default_message(self) -> &'static str {
                match self {
                    $(Kind::$variant => $message,)+
                }
            }

            /// The wire name of this kind (e.g. `"notFound"`).
            ///
            /// These names are a stable cross-language vocabulary; they are
            /// deliberately camelCase rather than Rust-style.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Kind::$variant => $name,)+
                }
            }

            /// Look up a kind by its wire name.
            pub fn from_name(name: &str) -> Option<Kind> {
                match name {
                    $($name => Some(Kind::$variant),)+
                    _ => None,
                }
            }

            /// Look up a kind by its numeric code.
            pub fn from_code(code: u16) -> Option<Kind> {
                match code {
                    $($code => Some(Kind::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

catalog! {
    // 1xx - informational
    Continue = ("continue", 100, "Continue"),
    SwitchingProtocols = ("switchingProtocols", 101, "Switching Protocols"),
    Processing = ("processing", 102, "Processing"),

    // 2xx - success
    Ok = ("ok", 200, "OK"),
    Created = ("created", 201, "Created"),
    Accepted = ("accepted", 202, "Accepted"),
    NoContent = ("noContent", 204, "No Content"),

    // 3xx - redirection
    MovedPermanently = ("movedPermanently", 301, "Moved Permanently"),
    Found = ("found", 302, "Found"),
    SeeOther = ("seeOther", 303, "See Other"),
    NotModified = ("notModified", 304, "Not Modified"),
    TemporaryRedirect = ("temporaryRedirect", 307, "Temporary Redirect"),

    // 4xx - client errors
    BadRequest = ("badRequest", 400, "Bad Request"),
    Unauthorized = ("unauthorized", 401, "Unauthorized"),
    PaymentRequired = ("paymentRequired", 402, "Payment Required"),
    Forbidden = ("forbidden", 403, "Forbidden"),
    NotFound = ("notFound", 404, "Not Found"),
    MethodNotAllowed = ("methodNotAllowed", 405, "Method Not Allowed"),
    NotAcceptable = ("notAcceptable", 406, "Not Acceptable"),
    RequestTimeout = ("requestTimeout", 408, "Request Timeout"),
    Conflict = ("conflict", 409, "Conflict"),
    Gone = ("gone", 410, "Gone"),
    PreconditionFailed = ("preconditionFailed", 412, "Precondition Failed"),
    PayloadTooLarge = ("payloadTooLarge", 413, "Payload Too Large"),
    UnsupportedMediaType = ("unsupportedMediaType", 415, "Unsupported Media Type"),
    UnprocessableEntity = ("unprocessableEntity", 422, "Unprocessable Entity"),
    TooManyRequests = ("tooManyRequests", 429, "Too Many Requests"),

    // 5xx - server errors
    Internal = ("internal", 500, "Internal Error"),
    NotImplemented = ("notImplemented", 501, "Not Implemented"),
    BadGateway = ("badGateway", 502, "Bad Gateway"),
    ServiceUnavailable = ("serviceUnavailable", 503, "Service Unavailable"),
    GatewayTimeout = ("gatewayTimeout", 504, "Gateway Timeout"),
    InsufficientStorage = ("insufficientStorage", 507, "Insufficient Storage"),
}

impl Kind {
    /// The conventional predicate name for this kind (e.g. `"isNotFound"`).
    ///
    /// `"is"` plus the wire name with its first letter upper-cased. Kept for
    /// interoperability with consumers that dispatch on predicate names.
    pub fn predicate_name(self) -> String {
        let name = self.name();
        let mut out = String::with_capacity(name.len() + 2);
        out.push_str("is");
        let mut chars = name.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
        out
    }

    /// Whether this kind represents an actual error (4xx/5xx) as opposed to
    /// an informational or success status.
    pub const fn is_error(self) -> bool {
        self.code() >= 400
    }

    /// Check if this kind is retryable by default
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            Kind::RequestTimeout
                | Kind::TooManyRequests
                | Kind::BadGateway
                | Kind::ServiceUnavailable
                | Kind::GatewayTimeout
        )
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// Kinds cross serialization boundaries by wire name, never by variant index,
// so reordering the catalog cannot change the wire format.

impl Serialize for Kind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Kind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Kind::from_name(&name)
            .ok_or_else(|| de::Error::custom(format!("unknown response kind '{}'", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_kind_display() {
        assert_eq!(Kind::NotFound.to_string(), "notFound");
        assert_eq!(Kind::SwitchingProtocols.to_string(), "switchingProtocols");
    }

    #[test]
    fn test_catalog_entries() {
        assert_eq!(Kind::NotFound.code(), 404);
        assert_eq!(Kind::NotFound.default_message(), "Not Found");
        assert_eq!(Kind::Conflict.code(), 409);
        assert_eq!(Kind::Conflict.default_message(), "Conflict");
        assert_eq!(Kind::Internal.code(), 500);
        assert_eq!(Kind::Internal.default_message(), "Internal Error");
    }

    #[test]
    fn test_from_name_round_trip() {
        for kind in Kind::ALL {
            assert_eq!(Kind::from_name(kind.name()), Some(*kind));
        }
        assert_eq!(Kind::from_name("notFound"), Some(Kind::NotFound));
        assert_eq!(Kind::from_name("NotFound"), None);
        assert_eq!(Kind::from_name("teapot"), None);
    }

    #[test]
    fn test_from_code_round_trip() {
        for kind in Kind::ALL {
            assert_eq!(Kind::from_code(kind.code()), Some(*kind));
        }
        assert_eq!(Kind::from_code(404), Some(Kind::NotFound));
        assert_eq!(Kind::from_code(999), None);
    }

    #[test]
    fn test_codes_are_unique() {
        let codes: HashSet<u16> = Kind::ALL.iter().map(|k| k.code()).collect();
        assert_eq!(codes.len(), Kind::ALL.len());
    }

    #[test]
    fn test_predicate_name() {
        assert_eq!(Kind::NotFound.predicate_name(), "isNotFound");
        assert_eq!(Kind::Conflict.predicate_name(), "isConflict");
        assert_eq!(Kind::Ok.predicate_name(), "isOk");
    }

    #[test]
    fn test_is_error() {
        assert!(Kind::NotFound.is_error());
        assert!(Kind::Internal.is_error());
        assert!(!Kind::Ok.is_error());
        assert!(!Kind::Accepted.is_error());
        assert!(!Kind::NotModified.is_error());
    }

    #[test]
    fn test_is_retryable() {
        assert!(Kind::ServiceUnavailable.is_retryable());
        assert!(Kind::TooManyRequests.is_retryable());
        assert!(!Kind::NotFound.is_retryable());
        assert!(!Kind::BadRequest.is_retryable());
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&Kind::NotFound).unwrap();
        assert_eq!(json, r#""notFound""#);

        let kind: Kind = serde_json::from_str(r#""conflict""#).unwrap();
        assert_eq!(kind, Kind::Conflict);

        assert!(serde_json::from_str::<Kind>(r#""teapot""#).is_err());
    }
}
