//! Streaming chat-completion client.
//!
//! Opens a token-streaming request against the configured OpenAI-compatible
//! endpoint and forwards typed [`ProviderEvent`]s through a bounded channel.
//! One spawned task per request; the channel is the only coupling to the
//! HTTP layer, so a dropped receiver (client abort) stops the task and the
//! in-flight upstream response is dropped with it.

use std::sync::Arc;

use eventsource_stream::Eventsource;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use crate::config::Config;
use crate::provider::models;
use crate::provider::reasoning::ReasoningExtractor;

/// User-facing message for failures establishing the upstream call. Raw
/// error detail stays in the server logs.
pub const CONTENT_FILTER_MESSAGE: &str = "Content filter, please modify your text and retry.";

/// Fallback when an upstream error carries no message text.
const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// Channel capacity between the provider task and the SSE framer. A slow
/// client fills it and backpressures the upstream read.
const EVENT_CHANNEL_CAPACITY: usize = 32;

/// An event produced by the upstream completion stream.
///
/// Zero or more `Delta`s followed by exactly one terminal `Finish` or
/// `Error`; the sender is dropped after the terminal event.
#[derive(Debug, Clone)]
pub enum ProviderEvent {
    /// A fragment of visible completion text.
    Delta { text: String },

    /// The upstream stream completed normally.
    Finish,

    /// The upstream stream failed; carries the user-facing message.
    Error(String),
}

#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream returned HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

// ─── Wire Types ────────────────────────────────────────────────────────────

/// Chat completion request (OpenAI-compatible).
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// One frame of the upstream SSE stream. Error frames and delta frames
/// share this shape; absent fields default.
#[derive(Debug, Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
    #[serde(default)]
    error: Option<StreamError>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: StreamDelta,
}

#[derive(Debug, Default, Deserialize)]
struct StreamDelta {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StreamError {
    #[serde(default)]
    message: Option<String>,
}

// ─── Client ────────────────────────────────────────────────────────────────

/// Client for the upstream completion API.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    http: reqwest::Client,
    config: Arc<Config>,
}

impl CompletionClient {
    /// Create a client over the process configuration.
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Open a streaming completion for `prompt`, returning the event channel.
    ///
    /// The model is always the configured default. Establishment failures
    /// surface as a single [`ProviderEvent::Error`] with a fixed message;
    /// the raw error is logged here and never shown to the caller.
    pub fn stream(&self, request_id: String, prompt: String) -> mpsc::Receiver<ProviderEvent> {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let http = self.http.clone();
        let config = self.config.clone();

        tokio::spawn(async move {
            if let Err(e) = relay_completion(&http, &config, &request_id, &prompt, &tx).await {
                error!(request_id = %request_id, error = %e, "Upstream completion failed");
                let _ = tx
                    .send(ProviderEvent::Error(CONTENT_FILTER_MESSAGE.to_string()))
                    .await;
            }
        });

        rx
    }
}

/// Drive one upstream stream to completion, forwarding events into `tx`.
///
/// Returns `Err` only for establishment failures (connect error, non-2xx);
/// everything after the stream opens is reported through the channel.
async fn relay_completion(
    http: &reqwest::Client,
    config: &Config,
    request_id: &str,
    prompt: &str,
    tx: &mpsc::Sender<ProviderEvent>,
) -> Result<(), CompletionError> {
    let model = config.provider.default_model.as_str();
    let body = ChatCompletionRequest {
        model,
        messages: vec![ChatMessage {
            role: "user",
            content: prompt,
        }],
        stream: true,
    };

    let mut request = http.post(config.completions_url()).json(&body);
    if let Some(key) = &config.provider.api_key {
        request = request.bearer_auth(key);
    }

    let response = request.send().await?;
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(CompletionError::Status { status, body });
    }

    debug!(request_id = %request_id, model = %model, "Upstream stream open");

    let mut extractor = models::capabilities_for(model)
        .reasoning_tag
        .map(ReasoningExtractor::new);

    let mut events = Box::pin(response.bytes_stream().eventsource());

    while let Some(event) = events.next().await {
        let event = match event {
            Ok(event) => event,
            Err(e) => {
                // The stream was already established: forward the message
                // instead of masking it.
                let message = non_empty_or_unknown(e.to_string());
                warn!(request_id = %request_id, error = %message, "Upstream stream error");
                let _ = tx.send(ProviderEvent::Error(message)).await;
                return Ok(());
            }
        };

        let data = event.data.trim();
        if data.is_empty() {
            continue;
        }
        if data == "[DONE]" {
            send_finish(&mut extractor, request_id, tx).await;
            return Ok(());
        }

        let chunk: StreamChunk = match serde_json::from_str(data) {
            Ok(chunk) => chunk,
            Err(e) => {
                debug!(request_id = %request_id, error = %e, "Skipping unparseable upstream frame");
                continue;
            }
        };

        if let Some(upstream_error) = chunk.error {
            let message = non_empty_or_unknown(upstream_error.message.unwrap_or_default());
            warn!(request_id = %request_id, error = %message, "Upstream reported an error mid-stream");
            let _ = tx.send(ProviderEvent::Error(message)).await;
            return Ok(());
        }

        if let Some(choice) = chunk.choices.into_iter().next() {
            if let Some(content) = choice.delta.content {
                let text = match extractor.as_mut() {
                    Some(extractor) => extractor.push(&content),
                    None => content,
                };
                if !text.is_empty() && tx.send(ProviderEvent::Delta { text }).await.is_err() {
                    // Client went away; abandon the upstream stream.
                    debug!(request_id = %request_id, "Client disconnected, abandoning upstream stream");
                    return Ok(());
                }
            }
        }
    }

    // Upstream closed without a [DONE] sentinel; treat as a normal finish.
    send_finish(&mut extractor, request_id, tx).await;
    Ok(())
}

/// Flush the reasoning extractor and emit the terminal `Finish` event.
async fn send_finish(
    extractor: &mut Option<ReasoningExtractor>,
    request_id: &str,
    tx: &mpsc::Sender<ProviderEvent>,
) {
    if let Some(extractor) = extractor {
        let remainder = extractor.finish();
        if !remainder.is_empty()
            && tx
                .send(ProviderEvent::Delta { text: remainder })
                .await
                .is_err()
        {
            return;
        }
        if extractor.reasoning_chars() > 0 {
            debug!(
                request_id = %request_id,
                reasoning_chars = extractor.reasoning_chars(),
                "Withheld reasoning content"
            );
        }
    }
    let _ = tx.send(ProviderEvent::Finish).await;
}

fn non_empty_or_unknown(message: String) -> String {
    if message.trim().is_empty() {
        UNKNOWN_ERROR_MESSAGE.to_string()
    } else {
        message
    }
}
