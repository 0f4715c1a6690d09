//! Dispatcher module exports.
//!
//! Re-exports the registry, the handler trait, and the dispatcher so
//! downstream consumers can depend on this module directly.

pub mod context;
pub mod dispatcher;
pub mod docs;
pub mod registry;

pub use context::CallContext;
pub use dispatcher::Dispatcher;
pub use docs::DocsStore;
pub use registry::{MethodRegistry, WebService, CATALOGUE};
