//! Top-level facade crate for the OKAPI gateway.
//!
//! Re-exports core types and the gateway library so users can depend on a single crate.

pub mod core {
    pub use okapi_core::*;
}

pub mod gateway {
    pub use okapi_gateway::*;
}
