//! Transport layer (HTTP).
//!
//! Decodes method calls once before they reach the dispatcher and maps
//! dispatcher errors to HTTP status codes.

pub mod http;
