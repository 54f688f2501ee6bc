//! JSON Lines ingestion.
//!
//! A feed carries one `ServerToClientMessage` per line. Blank lines are
//! ignored. A line that fails to parse is reported and skipped; it never
//! ends the feed. Only a read error from the underlying source does.

use super::MessageProcessor;
use crate::error::StreamError;
use a2ui_protocol::ServerToClientMessage;
use std::pin::Pin;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_stream::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;

/// Counters reported by [`MessageProcessor::process_json_lines`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamSummary {
    /// Messages applied without error.
    pub applied: usize,

    /// Lines that were not valid messages.
    pub skipped: usize,

    /// Messages applied only in part because of malformed units.
    pub rejected: usize,
}

/// Parse a JSON Lines feed into a stream of messages.
///
/// Yields `Err(StreamError::Parse)` for each bad line and keeps going. A read
/// error is yielded once as `Err(StreamError::Io)` and ends the stream.
pub fn message_stream<R>(
    reader: R,
) -> Pin<Box<dyn Stream<Item = Result<ServerToClientMessage, StreamError>> + Send>>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    let stream = async_stream::stream! {
        let mut lines = reader.lines();
        let mut line_number = 0;

        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    yield Err(StreamError::Io(e));
                    break;
                }
            };
            line_number += 1;

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<ServerToClientMessage>(&line) {
                Ok(message) => yield Ok(message),
                Err(source) => yield Err(StreamError::Parse { line_number, source }),
            }
        }
    };

    Box::pin(stream)
}

impl MessageProcessor {
    /// Apply every message of a JSON Lines feed, in order.
    ///
    /// Cancellation is checked between messages: a message is always applied
    /// in full or not at all.
    ///
    /// # Errors
    ///
    /// Returns `StreamError::Io` if reading the feed fails. Parse and shape
    /// errors are logged and counted in the summary instead.
    pub async fn process_json_lines<R>(
        &mut self,
        reader: R,
        cancel: &CancellationToken,
    ) -> Result<StreamSummary, StreamError>
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let mut messages = message_stream(reader);
        let mut summary = StreamSummary::default();

        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::info!(?summary, "message stream cancelled");
                    break;
                }
                next = messages.next() => next,
            };
            let Some(item) = next else {
                break;
            };

            match item {
                Ok(message) => match self.apply_message(message) {
                    Ok(()) => summary.applied += 1,
                    Err(_) => summary.rejected += 1,
                },
                Err(StreamError::Parse { line_number, source }) => {
                    tracing::warn!(line_number, error = %source, "skipping malformed line");
                    summary.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        tracing::debug!(?summary, "message stream finished");
        Ok(summary)
    }

    /// Parse and apply a single JSON line. Blank lines are a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StreamError::Parse` if the line is not a message and
    /// `StreamError::Apply` if the message was only partially applied.
    pub fn apply_json_line(&mut self, line: &str) -> Result<(), StreamError> {
        if line.trim().is_empty() {
            return Ok(());
        }
        let message: ServerToClientMessage =
            serde_json::from_str(line).map_err(|source| StreamError::Parse {
                line_number: 1,
                source,
            })?;
        self.apply_message(message)?;
        Ok(())
    }
}
