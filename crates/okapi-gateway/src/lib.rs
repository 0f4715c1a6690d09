//! OKAPI gateway library entry.
//!
//! This crate wires the method registry, dispatcher, stats recording, HTTP
//! transport, and built-in methods into a cohesive gateway stack. It is
//! intended to be consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod dispatch;
pub mod obs;
pub mod ops;
pub mod router;
pub mod services;
pub mod stats;
pub mod transport;
pub mod users;
pub mod views;
