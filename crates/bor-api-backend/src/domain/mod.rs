//! # Domain Module
//!
//! Capability registry, error taxonomy and log filtering.

pub mod capability;
pub mod errors;
pub mod filter;

pub use capability::*;
pub use errors::*;
pub use filter::*;
