//! Wire types shared between the ServiceSquad client and its backend.

pub mod endpoints;
pub mod types;

pub use types::*;
