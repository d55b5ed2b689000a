//! OpenAI API client — the single point of entry for all model calls.
//!
//! ARCHITECTURAL RULE: no other module may call the vendor API directly.
//! Feature modules choose a model and messages; everything HTTP-shaped
//! lives here.
//!
//! Three call shapes: `complete` (chat completions), `stream` (chat
//! completions over SSE, yielding text fragments), and `search` (the
//! responses endpoint with an opaque web-search tool, yielding text plus
//! URL citations). A failed call is surfaced as a typed error and never
//! retried; the product surfaces degrade instead.

use std::time::Duration;

use futures::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::debug;

const STREAM_CHANNEL_CAPACITY: usize = 64;

/// Fragments as they arrive from a streaming call.
pub type FragmentStream = ReceiverStream<Result<String, LlmError>>;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("model returned empty content")]
    EmptyContent,
}

/// Web-search effort level, passed through to the vendor tool untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchTier {
    Low,
    Medium,
    High,
}

impl SearchTier {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchTier::Low => "low",
            SearchTier::Medium => "medium",
            SearchTier::High => "high",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

/// Token counts for one call. The two vendor endpoints name these fields
/// differently; the aliases normalize them.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Usage {
    #[serde(alias = "input_tokens")]
    pub prompt_tokens: u32,
    #[serde(alias = "output_tokens")]
    pub completion_tokens: u32,
}

/// A source link attached to web-search output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Citation {
    pub title: String,
    pub url: String,
}

/// Assembled result of a non-streaming call.
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub usage: Usage,
    pub citations: Vec<Citation>,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChunk {
    choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    delta: ChunkDelta,
}

#[derive(Debug, Deserialize)]
struct ChunkDelta {
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: &'a str,
    tools: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ResponsesReply {
    output: Vec<OutputItem>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(rename = "type")]
    item_type: String,
    #[serde(default)]
    content: Vec<OutputContent>,
}

#[derive(Debug, Deserialize)]
struct OutputContent {
    text: Option<String>,
    #[serde(default)]
    annotations: Vec<Annotation>,
}

#[derive(Debug, Deserialize)]
struct Annotation {
    #[serde(rename = "type", default)]
    kind: String,
    title: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// The single LLM client shared by all services.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// One non-streaming chat completion.
    pub async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<Completion, LlmError> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&ChatRequest {
                model,
                messages,
                stream: None,
            })
            .send()
            .await?;
        let response = check_status(response).await?;

        let body: ChatResponse = response.json().await?;
        let usage = body.usage.unwrap_or_default();
        let text = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(LlmError::EmptyContent)?;

        debug!(
            model,
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            "chat completion succeeded"
        );

        Ok(Completion {
            text,
            usage,
            citations: Vec::new(),
        })
    }

    /// One streaming chat completion. The returned stream yields text
    /// fragments in arrival order; a transport failure mid-stream arrives
    /// as a final `Err` item.
    pub async fn stream(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<FragmentStream, LlmError> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&ChatRequest {
                model,
                messages,
                stream: Some(true),
            })
            .send()
            .await?;
        let response = check_status(response).await?;

        let (tx, rx) = mpsc::channel(STREAM_CHANNEL_CAPACITY);
        tokio::spawn(async move {
            let mut bytes = response.bytes_stream();
            // Lines are buffered as bytes so a multi-byte Hangul character
            // split across chunk boundaries is never decoded in half.
            let mut line_buf: Vec<u8> = Vec::new();

            while let Some(chunk) = bytes.next().await {
                let chunk = match chunk {
                    Ok(chunk) => chunk,
                    Err(error) => {
                        let _ = tx.send(Err(LlmError::Http(error))).await;
                        return;
                    }
                };
                for byte in chunk {
                    if byte != b'\n' {
                        line_buf.push(byte);
                        continue;
                    }
                    let line = String::from_utf8_lossy(&line_buf).into_owned();
                    line_buf.clear();
                    match parse_sse_line(&line) {
                        SseLine::Fragment(text) => {
                            if tx.send(Ok(text)).await.is_err() {
                                // Receiver dropped; the caller went away.
                                return;
                            }
                        }
                        SseLine::Done => return,
                        SseLine::Skip => {}
                    }
                }
            }
        });

        Ok(ReceiverStream::new(rx))
    }

    /// One web-search call. The tool payload is passed through opaquely;
    /// only the assembled text and URL citations come back.
    pub async fn search(
        &self,
        model: &str,
        input: &str,
        tier: SearchTier,
    ) -> Result<Completion, LlmError> {
        let request = ResponsesRequest {
            model,
            input,
            tools: vec![json!({
                "type": "web_search_preview",
                "search_context_size": tier.as_str(),
            })],
        };
        let response = self
            .client
            .post(format!("{}/responses", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;
        let response = check_status(response).await?;

        let reply: ResponsesReply = response.json().await?;
        let usage = reply.usage.unwrap_or_default();

        let mut text = String::new();
        let mut citations = Vec::new();
        for item in reply.output {
            if item.item_type != "message" {
                continue;
            }
            for piece in item.content {
                if let Some(fragment) = piece.text {
                    text.push_str(&fragment);
                }
                for annotation in piece.annotations {
                    if annotation.kind == "url_citation" {
                        citations.push(Citation {
                            title: annotation.title.unwrap_or_default(),
                            url: annotation.url.unwrap_or_default(),
                        });
                    }
                }
            }
        }

        if text.is_empty() {
            return Err(LlmError::EmptyContent);
        }

        debug!(
            model,
            tier = tier.as_str(),
            citations = citations.len(),
            "search call succeeded"
        );

        Ok(Completion {
            text,
            usage,
            citations,
        })
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, LlmError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .map(|parsed| parsed.error.message)
        .unwrap_or(body);
    Err(LlmError::Api {
        status: status.as_u16(),
        message,
    })
}

enum SseLine {
    Fragment(String),
    Done,
    Skip,
}

fn parse_sse_line(line: &str) -> SseLine {
    let Some(data) = line.trim().strip_prefix("data: ") else {
        return SseLine::Skip;
    };
    if data == "[DONE]" {
        return SseLine::Done;
    }
    match serde_json::from_str::<ChatChunk>(data) {
        Ok(chunk) => {
            let fragment = chunk
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.delta.content)
                .unwrap_or_default();
            SseLine::Fragment(fragment)
        }
        Err(error) => {
            debug!(%error, "skipping unparseable stream line");
            SseLine::Skip
        }
    }
}
