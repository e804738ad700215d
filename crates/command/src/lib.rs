//! Command construction and response decoding for the corvus binding.
//!
//! Each command family has one builder that turns structured parameters into
//! a [`Command`]: the wire argument vector plus the captured decode context.
//! Builders never talk to the engine; the client (or a batch buffer) decides
//! when the command actually runs. Decoders map the engine's typed response
//! into host values, treating shape mismatches as typed-empty results rather
//! than hard errors.

mod args;
mod batch;
mod dispatch;
mod error;

pub mod decode;
pub mod geo;
pub mod scan;
pub mod set;

pub use args::Arg;
pub use args::ArgBuffer;
pub use batch::BatchBuffer;
pub use dispatch::Command;
pub use dispatch::ResponseShape;
pub use dispatch::decode_shaped;
pub use error::EncodeError;
