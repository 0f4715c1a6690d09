//! OKAPI core: transport-agnostic request identity, method options, responses,
//! and the error surface shared by the gateway and its method handlers.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `OkapiError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod method;
pub mod request;
pub mod response;

/// Shared result type.
pub use error::{ClientCode, OkapiError, Result};
pub use method::{AuthLevel, MethodOptions};
pub use request::{Consumer, Request, Token, TokenType, Transport};
pub use response::Response;
