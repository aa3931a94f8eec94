//! Log Stream Reader
//!
//! Fetches bounded pages of timestamped events from one of a run's log
//! streams (run, engine, manifest, task). Caller time bounds are ISO-8601
//! strings translated to epoch milliseconds for the backend, and every
//! returned timestamp comes back as an absolute UTC instant.
//!
//! stream key + page query
//! fetch_page
//! LogPage { events, next_cursor, not_found }
//!

mod error;
mod reader;
mod stream;
pub mod timestamp;
mod types;

#[cfg(test)]
mod tests;

pub use error::LogReadError;
pub use reader::{fetch_page, read_all};
pub use stream::StreamKey;
pub use types::*;
