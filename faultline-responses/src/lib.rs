//! # faultline-responses
//!
//! The standard response catalog for faultline: every named response kind
//! with its numeric code and default message.
//!
//! Kinds follow HTTP status semantics. Non-error codes (e.g. `Accepted`)
//! are included because callers occasionally use them to report status
//! information through the same channel.
//!
//! ## Usage
//!
//! ```rust
//! use faultline_responses::Kind;
//!
//! assert_eq!(Kind::NotFound.code(), 404);
//! assert_eq!(Kind::NotFound.default_message(), "Not Found");
//! assert_eq!(Kind::from_name("notFound"), Some(Kind::NotFound));
//! assert_eq!(Kind::from_code(409), Some(Kind::Conflict));
//! ```
//!
//! ## Principles
//!
//! - The catalog is compile-time data; nothing here is mutable at runtime
//! - Kind names (`notFound`, `conflict`, ...) are a stable vocabulary shared
//!   with non-Rust consumers and must not be renamed
//! - `faultline-errors` builds on this crate but never extends the catalog

mod kind;

pub use kind::Kind;
