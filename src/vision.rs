//! Gemini vision client for price-tag analysis.
//!
//! This module provides the client for the remote vision-language model,
//! sending one captured JPEG frame plus a structured-output schema to the
//! `generateContent` endpoint and decoding the result into an
//! [`AnalysisResult`]. There is no retry policy: a single failure surfaces
//! immediately to the caller.

use crate::adapters::ReqwestHttpClient;
use crate::models::AnalysisResult;
use crate::traits::{Headers, HttpClient, HttpError};
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// Default base URL for the Gemini API.
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Model used for extraction.
pub const GEMINI_MODEL: &str = "gemini-3-flash-preview";

/// Environment variable holding the API credential.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Instruction preferring extraction from the tag over estimation.
const ANALYSIS_PROMPT: &str = "Analyze this product image. Identify the product name. \
    Look specifically for a price tag or label. If a price tag is clearly visible, \
    extract that price. If not, provide a realistic estimated market price. \
    Return the data in JSON format.";

/// Error type for vision client operations
#[derive(Debug)]
pub enum VisionError {
    /// No API credential is configured
    MissingApiKey,
    /// HTTP request failed
    Http(HttpError),
    /// Server returned an error status
    ServerError { status: u16, message: String },
    /// The model returned no structured text
    EmptyResponse,
    /// JSON (de)serialization failed
    Json(serde_json::Error),
}

impl std::fmt::Display for VisionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VisionError::MissingApiKey => {
                write!(f, "API key not found (set {})", API_KEY_ENV)
            }
            VisionError::Http(e) => write!(f, "HTTP error: {}", e),
            VisionError::ServerError { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            VisionError::EmptyResponse => write!(f, "No response from the model"),
            VisionError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for VisionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VisionError::Http(e) => Some(e),
            VisionError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<HttpError> for VisionError {
    fn from(e: HttpError) -> Self {
        VisionError::Http(e)
    }
}

impl From<serde_json::Error> for VisionError {
    fn from(e: serde_json::Error) -> Self {
        VisionError::Json(e)
    }
}

// ============================================================================
// Wire types (generateContent request/response)
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    #[serde(rename = "responseSchema")]
    response_schema: serde_json::Value,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Structured-output schema for the analysis result.
///
/// The currency hint flows into the schema description so the model
/// defaults to the shopper's preferred symbol when the tag shows none.
fn response_schema(currency_hint: Option<&str>) -> serde_json::Value {
    let default_symbol = currency_hint.unwrap_or("$");
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "productName": {
                "type": "STRING",
                "description": "The name of the product identified in the image. Be concise.",
            },
            "price": {
                "type": "NUMBER",
                "description": "The numeric price value found on a tag. If no tag is visible, estimate the market price.",
            },
            "currency": {
                "type": "STRING",
                "description": format!(
                    "The currency symbol (e.g., $, €, £). Default to {} if unknown.",
                    default_symbol
                ),
            },
            "category": {
                "type": "STRING",
                "description": "A short category for the item (e.g., Electronics, Food, Clothing).",
            },
            "confidenceScore": {
                "type": "NUMBER",
                "description": "A number between 0 and 1 indicating how confident you are about the price reading.",
            },
        },
        "required": ["productName", "price", "currency", "category", "confidenceScore"],
    })
}

fn build_request(jpeg: &[u8], currency_hint: Option<&str>) -> GenerateContentRequest {
    let mut prompt = ANALYSIS_PROMPT.to_string();
    if let Some(symbol) = currency_hint {
        prompt.push_str(&format!(
            " The shopper's preferred currency symbol is {}.",
            symbol
        ));
    }

    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![
                Part {
                    inline_data: Some(InlineData {
                        mime_type: "image/jpeg".to_string(),
                        data: base64::engine::general_purpose::STANDARD.encode(jpeg),
                    }),
                    text: None,
                },
                Part {
                    inline_data: None,
                    text: Some(prompt),
                },
            ],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: response_schema(currency_hint),
            // Low temperature for factual extraction.
            temperature: 0.2,
        },
    }
}

/// Extract the analysis result from a generateContent response body.
fn parse_analysis(body: &[u8]) -> Result<AnalysisResult, VisionError> {
    let response: GenerateContentResponse = serde_json::from_slice(body)?;

    let text = response
        .candidates
        .iter()
        .filter_map(|c| c.content.as_ref())
        .flat_map(|c| c.parts.iter())
        .filter_map(|p| p.text.as_deref())
        .find(|t| !t.trim().is_empty())
        .ok_or(VisionError::EmptyResponse)?;

    Ok(serde_json::from_str(text)?)
}

/// Client for the remote vision-language model.
///
/// Generic over [`HttpClient`] so tests can inject a mock; production code
/// uses the reqwest adapter and reads the credential from the environment.
pub struct VisionClient<C: HttpClient = ReqwestHttpClient> {
    base_url: String,
    api_key: Option<String>,
    http: C,
}

impl VisionClient {
    /// Create a client against the production endpoint, with the API key
    /// from the environment. A missing key is not an error here; it
    /// surfaces on the first analysis attempt.
    pub fn new() -> Self {
        Self {
            base_url: GEMINI_BASE_URL.to_string(),
            api_key: std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()),
            http: ReqwestHttpClient::new(),
        }
    }
}

impl Default for VisionClient {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: HttpClient> VisionClient<C> {
    /// Create a fully-specified client (custom endpoint, key, transport).
    pub fn with_parts(base_url: impl Into<String>, api_key: Option<String>, http: C) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
            http,
        }
    }

    /// Analyze one captured frame.
    ///
    /// `currency_hint` is the shopper's preferred currency symbol; it biases
    /// the model's fallback when the tag shows no currency.
    pub async fn analyze(
        &self,
        jpeg: &[u8],
        currency_hint: Option<&str>,
    ) -> Result<AnalysisResult, VisionError> {
        let api_key = self.api_key.as_deref().ok_or(VisionError::MissingApiKey)?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, GEMINI_MODEL
        );
        let body = serde_json::to_string(&build_request(jpeg, currency_hint))?;

        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("x-goog-api-key".to_string(), api_key.to_string());

        let response = self.http.post(&url, &body, &headers).await?;

        if !response.is_success() {
            return Err(VisionError::ServerError {
                status: response.status,
                message: response
                    .text()
                    .unwrap_or_else(|_| "Unknown error".to_string()),
            });
        }

        parse_analysis(&response.body)
    }
}
