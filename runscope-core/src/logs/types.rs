use crate::logs::stream::StreamKey;
use crate::logs::timestamp::serialize_iso;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const MIN_PAGE_LIMIT: u32 = 1;
pub const MAX_PAGE_LIMIT: u32 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEvent {
    #[serde(serialize_with = "serialize_iso")]
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

/// Continuation token for one specific stream.
///
/// The token is opaque; the stream it was issued for travels with it so that
/// it cannot be replayed against another stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PageCursor {
    token: String,
    #[serde(skip)]
    stream: String,
}

impl PageCursor {
    pub fn for_stream(key: &StreamKey, token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            stream: key.stream_name(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn stream(&self) -> &str {
        &self.stream
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadDirection {
    /// Oldest events first.
    #[default]
    FromHead,
    /// Most recent events first.
    FromTail,
}

impl ReadDirection {
    pub fn start_from_head(self) -> bool {
        matches!(self, ReadDirection::FromHead)
    }
}

/// Parameters for a single page fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub limit: u32,
    pub cursor: Option<PageCursor>,
    pub direction: ReadDirection,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            start_time: None,
            end_time: None,
            limit: 100,
            cursor: None,
            direction: ReadDirection::FromHead,
        }
    }
}

impl PageQuery {
    /// Most recent `limit` events, no time bounds.
    pub fn latest(limit: u32) -> Self {
        Self {
            limit,
            direction: ReadDirection::FromTail,
            ..Self::default()
        }
    }

    pub fn from_head(limit: u32) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    pub fn with_cursor(mut self, cursor: Option<PageCursor>) -> Self {
        self.cursor = cursor;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogPage {
    pub events: Vec<LogEvent>,
    #[serde(rename = "nextToken", skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<PageCursor>,
    /// Set when the stream does not exist, as opposed to existing but empty.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub not_found: bool,
}

impl LogPage {
    pub fn not_found() -> Self {
        Self {
            not_found: true,
            ..Self::default()
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.events.iter().map(|e| e.message.clone()).collect()
    }
}
