use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::CONFIG;
use crate::error::ChatError;
use crate::llm::parts::MessagePart;
use crate::utils::http::get_http_client;
use crate::utils::timing::log_llm_timing;

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MAX_OUTPUT_TOKENS: i32 = 2048;

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    parts: Option<Vec<GeminiPart>>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

/// Client for the `generateContent` endpoint. One call per user turn, no
/// retry, no request timeout beyond the transport's own.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    max_output_tokens: i32,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            base_url: DEFAULT_API_BASE.to_string(),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }

    pub fn from_config() -> Self {
        Self {
            api_key: CONFIG.gemini_api_key.clone(),
            model: CONFIG.gemini_model.clone(),
            base_url: CONFIG.gemini_api_base.trim_end_matches('/').to_string(),
            max_output_tokens: CONFIG.gemini_max_output_tokens,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn redact_api_key(&self, text: &str) -> String {
        let key = self.api_key.trim();
        if key.is_empty() {
            return text.to_string();
        }
        text.replace(key, "[redacted]")
    }

    /// Sends one user turn and returns the generated text unmodified.
    pub async fn generate(&self, parts: &[MessagePart]) -> Result<String, ChatError> {
        let payload = json!({
            "contents": [{ "role": "user", "parts": parts }],
            "generationConfig": { "maxOutputTokens": self.max_output_tokens },
        });

        log_llm_timing("gemini", &self.model, "generate_content", || async {
            let response = self.call_api(&payload).await?;
            extract_first_text(response).ok_or(ChatError::MalformedResponse)
        })
        .await
    }

    async fn call_api(&self, payload: &Value) -> Result<GeminiResponse, ChatError> {
        let client = get_http_client();
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        if tracing::enabled!(tracing::Level::DEBUG) {
            debug!(
                target: "llm.gemini",
                model = %self.model,
                payload = %summarize_payload(payload)
            );
        }

        let response = match client.post(&url).json(payload).send().await {
            Ok(response) => response,
            Err(err) => {
                let err_text = self.redact_api_key(&err.to_string());
                warn!(
                    "Gemini request failed to send: {} (timeout={}, connect={})",
                    err_text,
                    err.is_timeout(),
                    err.is_connect()
                );
                return Err(ChatError::Api(format!(
                    "Gemini request failed: {err_text}"
                )));
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let (message, body_summary) = summarize_error_body(&body);
            warn!("Gemini API error: status={}, body={}", status, body_summary);
            let detail = message.unwrap_or_else(|| format!("API error: {}", status.as_u16()));
            return Err(ChatError::Api(self.redact_api_key(&detail)));
        }

        response.json::<GeminiResponse>().await.map_err(|err| {
            warn!("Gemini response body was not valid JSON: {err}");
            ChatError::MalformedResponse
        })
    }
}

/// The first candidate's first part must carry text; anything else counts as
/// a malformed response.
fn extract_first_text(response: GeminiResponse) -> Option<String> {
    response
        .candidates?
        .into_iter()
        .next()?
        .content?
        .parts?
        .into_iter()
        .next()?
        .text
        .filter(|text| !text.is_empty())
}

fn truncate_for_log(value: &str, limit: usize) -> String {
    if value.chars().count() <= limit {
        return value.to_string();
    }
    let truncated: String = value.chars().take(limit).collect();
    format!("{truncated}... (truncated)")
}

fn summarize_payload(payload: &Value) -> Value {
    let parts = payload
        .pointer("/contents/0/parts")
        .and_then(|value| value.as_array())
        .map(|parts| {
            parts
                .iter()
                .map(|part| {
                    if let Some(text) = part.get("text").and_then(|value| value.as_str()) {
                        json!({ "text": truncate_for_log(text, 200) })
                    } else if let Some(inline_data) = part.get("inlineData") {
                        let mime_type = inline_data
                            .get("mimeType")
                            .and_then(|value| value.as_str())
                            .unwrap_or("unknown");
                        let data_len = inline_data
                            .get("data")
                            .and_then(|value| value.as_str())
                            .map(|value| value.len())
                            .unwrap_or(0);
                        json!({ "inlineData": { "mimeType": mime_type, "dataLen": data_len } })
                    } else {
                        json!({ "unknownPart": true })
                    }
                })
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    json!({
        "parts": parts,
        "generationConfig": payload.get("generationConfig").cloned().unwrap_or(Value::Null),
    })
}

/// Pulls the provider's `error.message` out of an error body when there is
/// one, along with a log-safe summary of the whole body.
fn summarize_error_body(body: &str) -> (Option<String>, String) {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return (None, "empty response body".to_string());
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        let message = value
            .pointer("/error/message")
            .and_then(|v| v.as_str())
            .map(|v| v.to_string());
        return (message, truncate_for_log(&value.to_string(), 2000));
    }

    (None, truncate_for_log(trimmed, 2000))
}
