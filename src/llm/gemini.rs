//! Gemini `generateContent` / `streamGenerateContent` client.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use super::client::{ensure_prompt, GenerationError, TextGenerator, TextStream};
use crate::config::AppConfig;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    request_timeout: Duration,
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_prompt(prompt: &'a str) -> Self {
        Self {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<u16>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, or `None` when the model produced no text part.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    fn block_reason(&self) -> Option<&str> {
        self.prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_deref())
    }
}

impl GeminiClient {
    pub fn from_config(config: &AppConfig) -> Result<Self, GenerationError> {
        let client = http_client(config.request_timeout)?;

        Ok(Self::with_client(
            client,
            &config.gemini_base_url,
            &config.gemini_api_key,
            &config.model_name,
            config.request_timeout,
        ))
    }

    pub fn with_client(
        client: Client,
        base_url: &str,
        api_key: &str,
        model: &str,
        request_timeout: Duration,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            request_timeout,
        }
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/models/{}:{}", self.base_url, self.model, method)
    }

    async fn post(
        &self,
        request: reqwest::RequestBuilder,
        prompt: &str,
    ) -> Result<reqwest::Response, GenerationError> {
        if self.api_key.trim().is_empty() {
            return Err(GenerationError::ConfigurationError(
                "API key not available".to_string(),
            ));
        }

        let response = request
            .header("x-goog-api-key", &self.api_key)
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(|e| GenerationError::GenerationFailed(e.to_string()))?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ApiErrorEnvelope>(&body)
            .map(|envelope| envelope.error)
            .unwrap_or_default();
        Err(classify_failure(Some(status), &detail, &body))
    }
}

/// Shared HTTP client. `read_timeout` bounds every read, so a stream that stalls
/// mid-response fails instead of holding the SSE connection open.
fn http_client(read_timeout: Duration) -> Result<Client, GenerationError> {
    Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .read_timeout(read_timeout)
        .pool_idle_timeout(Duration::from_secs(900))
        .user_agent(concat!("study-assistant-server/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| GenerationError::ConfigurationError(e.to_string()))
}

/// Maps a provider failure onto the generation error taxonomy.
fn classify_failure(
    status: Option<StatusCode>,
    detail: &ApiErrorBody,
    raw_body: &str,
) -> GenerationError {
    let code = status.map(|s| s.as_u16()).or(detail.code);
    let provider_status = detail.status.as_deref().unwrap_or_default();
    let message = detail
        .message
        .clone()
        .unwrap_or_else(|| raw_body.chars().take(200).collect());

    let unauthenticated = matches!(code, Some(401) | Some(403))
        || matches!(provider_status, "UNAUTHENTICATED" | "PERMISSION_DENIED")
        || message.contains("API key not valid")
        || message.contains("API key not available");
    if unauthenticated {
        return GenerationError::ConfigurationError(message);
    }

    if code == Some(429) || provider_status == "RESOURCE_EXHAUSTED" {
        return GenerationError::RateLimited;
    }

    match code {
        Some(code) => GenerationError::GenerationFailed(format!("HTTP {}: {}", code, message)),
        None => GenerationError::GenerationFailed(message),
    }
}

/// Splits a `text/event-stream` body into `data:` payloads, buffering partial lines.
#[derive(Default)]
struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(bytes);
        let mut payloads = Vec::new();
        while let Some(newline) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline).collect();
            if let Some(payload) = data_payload(&line) {
                payloads.push(payload);
            }
        }
        payloads
    }

    fn finish(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.buffer);
        data_payload(&rest)
    }
}

fn data_payload(line: &[u8]) -> Option<String> {
    let line = String::from_utf8_lossy(line);
    let data = line.trim_end_matches(['\r', '\n']).strip_prefix("data:")?;
    let data = data.trim_start();
    if data.is_empty() || data == "[DONE]" {
        None
    } else {
        Some(data.to_string())
    }
}

/// Turns one stream event into a text fragment. Events without text yield `None`.
fn decode_event(payload: &str) -> Option<Result<String, GenerationError>> {
    let event: GenerateContentResponse = match serde_json::from_str(payload) {
        Ok(event) => event,
        Err(e) => {
            return Some(Err(GenerationError::GenerationFailed(format!(
                "malformed stream event: {}",
                e
            ))))
        }
    };

    if let Some(error) = &event.error {
        return Some(Err(classify_failure(None, error, payload)));
    }
    if let Some(reason) = event.block_reason() {
        return Some(Err(GenerationError::GenerationFailed(format!(
            "prompt blocked: {}",
            reason
        ))));
    }
    event.text().map(Ok)
}

struct StreamState<S> {
    body: S,
    decoder: SseDecoder,
    pending: VecDeque<Result<String, GenerationError>>,
    finished: bool,
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        ensure_prompt(prompt)?;
        debug!("Sending generateContent request to model {}", self.model);

        let request = self
            .client
            .post(self.endpoint("generateContent"))
            .timeout(self.request_timeout);
        let response = self.post(request, prompt).await?;

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            GenerationError::GenerationFailed(format!("Unexpected response format: {}", e))
        })?;

        if let Some(reason) = body.block_reason() {
            warn!("Model refused prompt: {}", reason);
            return Err(GenerationError::GenerationFailed(format!(
                "prompt blocked: {}",
                reason
            )));
        }

        body.text().ok_or_else(|| {
            GenerationError::GenerationFailed("No response received from model".to_string())
        })
    }

    async fn generate_stream(&self, prompt: &str) -> Result<TextStream, GenerationError> {
        ensure_prompt(prompt)?;
        debug!("Opening streamGenerateContent request to model {}", self.model);

        let request = self
            .client
            .post(self.endpoint("streamGenerateContent"))
            .query(&[("alt", "sse")]);
        let response = self.post(request, prompt).await?;

        let state = StreamState {
            body: Box::pin(response.bytes_stream()),
            decoder: SseDecoder::default(),
            pending: VecDeque::new(),
            finished: false,
        };

        let fragments = stream::unfold(state, |mut state| async move {
            loop {
                if let Some(item) = state.pending.pop_front() {
                    if item.is_err() {
                        state.pending.clear();
                        state.finished = true;
                    }
                    return Some((item, state));
                }
                if state.finished {
                    return None;
                }

                match state.body.next().await {
                    Some(Ok(bytes)) => {
                        for payload in state.decoder.push(&bytes) {
                            state.pending.extend(decode_event(&payload));
                        }
                    }
                    Some(Err(e)) => {
                        state.finished = true;
                        return Some((Err(GenerationError::GenerationFailed(e.to_string())), state));
                    }
                    None => {
                        if let Some(payload) = state.decoder.finish() {
                            state.pending.extend(decode_event(&payload));
                        }
                        state.finished = true;
                    }
                }
            }
        });

        Ok(Box::pin(fragments))
    }
}
