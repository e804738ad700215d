//! # Reply - Typed Response Model
//!
//! The tagged-union value the execution engine hands back for every command.
//!
//! The engine parses the wire protocol internally; this crate only models the
//! already-decoded shape so command decoders can consume it without touching
//! protocol details.
//!
//! ## Example
//!
//! ```rust
//! use reply::Reply;
//!
//! let r = Reply::integer(2);
//! assert_eq!(r.as_int(), Some(2));
//! ```

mod types;

pub use types::Reply;
