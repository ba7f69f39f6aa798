//! Common types, protocol definitions, and errors shared across `subnet-ensurer` crates.

pub mod error;
pub mod protocol;

pub use error::EnsureError;
pub use protocol::{EnsureOutcome, SubnetId, SubnetRequest};
