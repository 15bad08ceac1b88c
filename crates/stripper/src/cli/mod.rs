//! Command-line handling.

pub mod legacy;
pub mod strip;
