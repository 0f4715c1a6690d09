//! Runtime statistics of method calls.
//!
//! Every successful call produces one [`StatsRecord`]. Absent identities are
//! mapped to sentinel values before the row reaches a [`StatsStore`], and a
//! failing store never fails the call that produced the row.

pub mod record;
pub mod recorder;
pub mod store;

pub use record::{CallType, StatsRecord};
pub use recorder::StatsRecorder;
pub use store::{JsonLinesStatsStore, MemoryStatsStore, StatsStore};
