//! SSE (Server-Sent Events) framing for provider event streams.
//!
//! Converts a channel of ProviderEvents into the wire frames the browser
//! consumes: `message` frames carrying text deltas and the finish marker,
//! `error` frames carrying a user-facing message.

use std::convert::Infallible;

use axum::response::sse::Event;
use futures::stream::Stream;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;

use crate::provider::ProviderEvent;

/// Payload of a `message` frame.
#[derive(Debug, Serialize)]
pub struct MessageFrame<'a> {
    pub text: &'a str,
    pub finish: bool,
}

/// Payload of an `error` frame.
#[derive(Debug, Serialize)]
pub struct ErrorFrame<'a> {
    pub text: &'a str,
}

/// Convert a provider event receiver into an SSE frame stream.
///
/// The provider task drops its sender right after the terminal event, so
/// the returned stream ends immediately after a terminating frame and the
/// response body closes with it. Dropping the stream (client abort) closes
/// the channel, which stops the provider task on its next send.
pub fn provider_to_sse_stream(
    rx: mpsc::Receiver<ProviderEvent>,
) -> impl Stream<Item = Result<Event, Infallible>> {
    ReceiverStream::new(rx).map(|event| {
        let frame = match event {
            ProviderEvent::Delta { text } => Event::default().event("message").data(
                serde_json::to_string(&MessageFrame {
                    text: &text,
                    finish: false,
                })
                .unwrap_or_default(),
            ),
            ProviderEvent::Finish => Event::default().event("message").data(
                serde_json::to_string(&MessageFrame {
                    text: "",
                    finish: true,
                })
                .unwrap_or_default(),
            ),
            ProviderEvent::Error(message) => Event::default().event("error").data(
                serde_json::to_string(&ErrorFrame { text: &message }).unwrap_or_default(),
            ),
        };
        Ok(frame)
    })
}
