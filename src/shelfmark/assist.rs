//! # Code Assistant
//!
//! An optional source of codes: a natural-language description goes in, a
//! batch of code strings comes out. To the rest of the crate that batch is
//! indistinguishable from manually entered codes.
//!
//! [`CodeAssistant`] is the capability seam. [`GeminiAssistant`] talks to the
//! Gemini `generateContent` REST endpoint and asks for a JSON array of strings;
//! [`StaticAssistant`] returns a fixed list and is what tests and offline runs
//! use.
//!
//! Calls are blocking. While one is in flight the caller cannot submit
//! another, and there is no cancellation.

use crate::error::{Result, ShelfmarkError};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Shown to users for every assistant failure. Details go to the log.
pub const FAILURE_MESSAGE: &str = "Could not generate codes with the assistant. Please try again.";

pub trait CodeAssistant {
    fn generate(&self, prompt: &str) -> Result<Vec<String>>;
}

/// Parses the model's response text.
///
/// A JSON array yields its string elements (other element types are
/// stringified). Empty text or valid JSON that is not an array yields an empty
/// batch. Anything that is not JSON is an error.
pub fn parse_code_list(text: &str) -> Result<Vec<String>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    let value: Value = serde_json::from_str(text).map_err(ShelfmarkError::Serialization)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => s,
            other => other.to_string(),
        })
        .collect())
}

pub fn build_prompt(request: &str) -> String {
    format!(
        concat!(
            "You are a warehouse management expert. Create a list of warehouse location codes ",
            "from the description below.\n",
            "Return plain JSON: an array of code strings. Do not add any explanation.\n\n",
            "User description: \"{}\"\n\n",
            "Example input: \"Rack A has 3 levels, 2 bins per level\"\n",
            "Example output: [\"A.1.1\", \"A.1.2\", \"A.2.1\", \"A.2.2\", \"A.3.1\", \"A.3.2\"]\n"
        ),
        request
    )
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: Value,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateResponse {
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

/// Client for Google's Gemini API.
pub struct GeminiAssistant {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiAssistant {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| assist_failure("building HTTP client", e))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: GEMINI_API_URL.to_string(),
        })
    }

    /// Reads the key from `GEMINI_API_KEY`, falling back to `API_KEY`.
    pub fn from_env() -> Result<Self> {
        let key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .map_err(|_| {
                ShelfmarkError::Assist(
                    "No API key found. Set GEMINI_API_KEY to use the assistant.".to_string(),
                )
            })?;
        Self::new(key)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn request_body(prompt: &str) -> GenerateRequest {
        GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(build_prompt(prompt)),
                }],
            }],
            generation_config: json!({
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" }
                }
            }),
        }
    }
}

impl CodeAssistant for GeminiAssistant {
    fn generate(&self, prompt: &str) -> Result<Vec<String>> {
        tracing::debug!(model = %self.model, "requesting codes from assistant");
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::request_body(prompt))
            .send()
            .map_err(|e| assist_failure("sending request", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(assist_failure("response status", status));
        }

        let body: GenerateResponse = response
            .json()
            .map_err(|e| assist_failure("decoding response", e))?;
        let codes =
            parse_code_list(&body.text()).map_err(|e| assist_failure("parsing code list", e))?;
        tracing::debug!(codes = codes.len(), "assistant returned codes");
        Ok(codes)
    }
}

fn assist_failure(stage: &str, cause: impl std::fmt::Display) -> ShelfmarkError {
    tracing::error!(%cause, stage, "assistant request failed");
    ShelfmarkError::Assist(FAILURE_MESSAGE.to_string())
}

/// Returns the same codes for every prompt, or always fails.
#[derive(Debug, Clone, Default)]
pub struct StaticAssistant {
    codes: Vec<String>,
    fail: bool,
}

impl StaticAssistant {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            codes: codes.into_iter().map(Into::into).collect(),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            codes: Vec::new(),
            fail: true,
        }
    }
}

impl CodeAssistant for StaticAssistant {
    fn generate(&self, _prompt: &str) -> Result<Vec<String>> {
        if self.fail {
            return Err(ShelfmarkError::Assist(FAILURE_MESSAGE.to_string()));
        }
        Ok(self.codes.clone())
    }
}
