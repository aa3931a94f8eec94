//! Black-box collaborators: the run metadata source and the log source.
//!
//! The engine only talks to these through the [`RunMetadataSource`] and
//! [`LogSource`] traits, reached via a [`BackendContext`]. The
//! [`InMemoryBackend`] serves a [`TelemetrySnapshot`] and backs both the
//! command line (snapshot files) and the test suites.

mod context;
mod error;
mod memory;
mod snapshot;
mod source;
mod types;


pub use context::BackendContext;
pub use error::BackendError;
pub use memory::{CallCounts, InMemoryBackend};
pub use snapshot::{SnapshotError, TelemetrySnapshot};
pub use source::{LogSource, RunMetadataSource};
pub use types::*;
