//! # faultline-errors
//!
//! Standardized application errors drawn from the faultline response catalog.
//!
//! ## Design Philosophy
//!
//! - **Kind**: one enumerated case per catalog entry (e.g. `NotFound`),
//!   carrying the numeric code and default message
//! - **Error**: the uniformly shaped value every operation produces - code,
//!   message, caller-supplied extra fields, optional stack
//! - **Builder**: one generic construction path with a fixed merge order, so
//!   an error built three layers deep looks like one built at the call site
//! - **Log safety**: `to_log_object` produces a plain structured value whose
//!   stack survives, where naive serialization would drop it
//!
//! ## Usage
//!
//! ```rust
//! use faultline_errors::{classify, Error, Kind};
//!
//! let err = Error::build(Kind::NotFound)
//!     .reason("user 42 is missing")
//!     .field("user_id", 42)
//!     .finish();
//!
//! assert_eq!(err.code(), 404);
//! assert_eq!(err.message(), "Not Found: user 42 is missing");
//! assert!(err.is(Kind::NotFound));
//! assert_eq!(classify(&err), Some(Kind::NotFound));
//! ```
//!
//! ## Principles
//!
//! - Construction never fails and never performs I/O
//! - Classification is by code: `err.is(kind)` keeps working no matter how
//!   far the value travels from the construction site
//! - Wrapping an already-wrapped error is flagged in the message, not fatal;
//!   the outer value stays classifiable
//! - External errors are adopted with `Error::wrap` / `Builder::source`,
//!   which preserves their message, backtrace and `source()` chain

mod builder;
mod log;
mod value;

pub use builder::Builder;
pub use log::{to_log_object, ToLogObject};
pub use value::{classify, Error, WRAPPED_KEY};

pub use faultline_responses::Kind;

/// Result type alias using faultline Error
pub type Result<T> = std::result::Result<T, Error>;
