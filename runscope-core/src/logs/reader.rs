use crate::backend::{BackendContext, LogEventsRequest, RawLogEvent};
use crate::logs::error::LogReadError;
use crate::logs::stream::StreamKey;
use crate::logs::timestamp::{from_epoch_millis, parse_iso_instant};
use crate::logs::types::{
    LogEvent, LogPage, MAX_PAGE_LIMIT, MIN_PAGE_LIMIT, PageCursor, PageQuery,
};
use tracing::{debug, warn};

/// Fetch one page of events from a run's log stream.
///
/// A missing stream is not an error: it yields an empty page with
/// `not_found` set, so callers can tell "no data yet" from a backend fault.
pub async fn fetch_page(
    ctx: &BackendContext,
    key: &StreamKey,
    query: &PageQuery,
) -> Result<LogPage, LogReadError> {
    let request = build_request(ctx, key, query)?;

    let raw = match ctx.logs.get_log_events(&request).await {
        Ok(raw) => raw,
        Err(err) if err.is_not_found() => {
            warn!(stream = %key, log_group = %ctx.log_group, "log stream not found");
            return Ok(LogPage::not_found());
        }
        Err(err) => return Err(err.into()),
    };

    let events = raw
        .events
        .into_iter()
        .map(to_log_event)
        .collect::<Result<Vec<_>, _>>()?;

    // The log service hands back the token it was given once a stream is
    // exhausted; that is not a continuation.
    let next_cursor = raw
        .next_forward_token
        .filter(|token| request.next_token.as_deref() != Some(token.as_str()))
        .map(|token| PageCursor::for_stream(key, token));

    debug!(
        stream = %key,
        events = events.len(),
        has_more = next_cursor.is_some(),
        "fetched log page"
    );

    Ok(LogPage {
        events,
        next_cursor,
        not_found: false,
    })
}

/// Read a stream from the head until the backend stops handing out cursors.
pub async fn read_all(
    ctx: &BackendContext,
    key: &StreamKey,
    page_size: u32,
) -> Result<LogPage, LogReadError> {
    let mut all = LogPage::default();
    let mut cursor: Option<PageCursor> = None;
    let mut pages = 0usize;

    loop {
        let query = PageQuery::from_head(page_size).with_cursor(cursor.take());
        let page = fetch_page(ctx, key, &query).await?;
        pages += 1;

        if page.not_found {
            return Ok(page);
        }

        let empty = page.events.is_empty();
        all.events.extend(page.events);

        match page.next_cursor {
            Some(next) if !empty => cursor = Some(next),
            _ => break,
        }
    }

    debug!(stream = %key, pages, events = all.events.len(), "read full log stream");

    Ok(all)
}

fn build_request(
    ctx: &BackendContext,
    key: &StreamKey,
    query: &PageQuery,
) -> Result<LogEventsRequest, LogReadError> {
    if !(MIN_PAGE_LIMIT..=MAX_PAGE_LIMIT).contains(&query.limit) {
        return Err(LogReadError::InvalidLimit {
            limit: query.limit,
            min: MIN_PAGE_LIMIT,
            max: MAX_PAGE_LIMIT,
        });
    }

    let stream = key.stream_name();

    if let Some(cursor) = &query.cursor {
        if cursor.stream() != stream {
            return Err(LogReadError::ForeignCursor {
                expected: stream,
                found: cursor.stream().to_string(),
            });
        }
    }

    Ok(LogEventsRequest {
        log_group: ctx.log_group.clone(),
        log_stream: stream,
        start_time_ms: to_epoch_millis("startTime", query.start_time.as_deref())?,
        end_time_ms: to_epoch_millis("endTime", query.end_time.as_deref())?,
        limit: query.limit,
        next_token: query.cursor.as_ref().map(|c| c.token().to_string()),
        start_from_head: query.direction.start_from_head(),
    })
}

fn to_epoch_millis(field: &'static str, value: Option<&str>) -> Result<Option<i64>, LogReadError> {
    let Some(value) = value else {
        return Ok(None);
    };

    parse_iso_instant(value)
        .map(|dt| Some(dt.timestamp_millis()))
        .ok_or_else(|| LogReadError::InvalidTimestamp {
            field,
            value: value.to_string(),
        })
}

fn to_log_event(raw: RawLogEvent) -> Result<LogEvent, LogReadError> {
    let timestamp = from_epoch_millis(raw.timestamp).ok_or(LogReadError::TimestampOutOfRange {
        timestamp_ms: raw.timestamp,
    })?;

    Ok(LogEvent {
        timestamp,
        message: raw.message,
    })
}
