//! Postgate-IN: Provider Response Normalizer
//!
//! This crate turns a raw generative-text response into canonical
//! [`ParsedContent`]: the per-channel posts, the optional brand analysis,
//! and token usage.
//!
//! # Example
//!
//! ```ignore
//! use postgate_in::normalize;
//! use serde_json::json;
//!
//! let response = json!({
//!     "content": [{"type": "text", "text": "{\"posts\": {...}}"}],
//!     "usage": {"input_tokens": 500, "output_tokens": 200}
//! });
//!
//! match normalize(&response, "claude") {
//!     Ok(parsed) => println!("linkedin: {}", parsed.posts["linkedin"]),
//!     Err(e) => eprintln!("unusable response: {}", e),
//! }
//! ```

pub mod extract;
pub mod provider;

pub use provider::{
    ClaudeBlock, ClaudeEnvelope, ClaudeUsage, OpenAiChoice, OpenAiEnvelope, OpenAiMessage,
    OpenAiUsage, Provider, ProviderResponse, ReplicateEnvelope, ReplicateOutput, TokenCount,
};

pub use postgate_core::{Channel, Posts};

use postgate_core::{PostgateError, REQUIRED_CHANNELS};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Canonical result of a successful normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedContent {
    /// Channel name → post text
    pub posts: Posts,
    /// Free-form brand analysis, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_analysis: Option<Value>,
    /// Extracted text before JSON parsing
    pub raw_response: String,
    pub parse_success: bool,
    /// Provider identifier as given by the caller
    pub provider: String,
    pub token_count: TokenCount,
}

impl ParsedContent {
    /// Post text for a channel, `""` if absent
    pub fn post(&self, channel: Channel) -> &str {
        self.posts.get(channel.as_str()).map(String::as_str).unwrap_or("")
    }

    /// Typed view of `brand_analysis`, if it has the expected shape
    pub fn brand(&self) -> Option<BrandAnalysis> {
        self.brand_analysis
            .as_ref()
            .and_then(|v| BrandAnalysis::deserialize(v).ok())
    }
}

/// Brand analysis as produced by the campaign prompt
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandAnalysis {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub key_usps: Vec<String>,
    #[serde(default)]
    pub target_audience: Option<String>,
    #[serde(default)]
    pub brand_voice: Option<String>,
}

/// Why a response could not be normalized
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Failed to parse LLM response as JSON: {0}")]
    JsonSyntax(String),
    #[error("Response missing \"posts\" field")]
    MissingPostsField,
    #[error("Response missing platforms: {}", .0.join(", "))]
    MissingPlatforms(Vec<String>),
}

impl ParseError {
    /// Missing channel names, in reporting order
    pub fn missing_platforms(&self) -> &[String] {
        match self {
            ParseError::MissingPlatforms(missing) => missing.as_slice(),
            _ => &[],
        }
    }
}

impl From<ParseError> for PostgateError {
    fn from(e: ParseError) -> Self {
        PostgateError::Parse(e.to_string())
    }
}

/// Normalize a raw provider response.
///
/// `provider` is one of `claude`, `openai`, `replicate`. Any other identifier
/// extracts no text, which then fails JSON parsing.
pub fn normalize(response: &Value, provider: &str) -> Result<ParsedContent, ParseError> {
    let envelope = ProviderResponse::from_value(&Provider::from_id(provider), response);
    normalize_response(&envelope)
}

/// Normalize an already-decoded provider envelope.
pub fn normalize_response(response: &ProviderResponse) -> Result<ParsedContent, ParseError> {
    let provider = response.provider();
    let content = response.text();

    let candidate = extract::json_candidate(&content);
    let parsed: Value = serde_json::from_str(candidate).map_err(|e| {
        tracing::debug!(provider = %provider, error = %e, "response is not valid JSON");
        ParseError::JsonSyntax(e.to_string())
    })?;

    let posts_value = match parsed.get("posts") {
        Some(posts) if is_truthy(posts) => posts,
        _ => return Err(ParseError::MissingPostsField),
    };

    let missing: Vec<String> = REQUIRED_CHANNELS
        .iter()
        .filter(|channel| !posts_value.get(**channel).map(is_truthy).unwrap_or(false))
        .map(|channel| channel.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(ParseError::MissingPlatforms(missing));
    }

    let brand_analysis = parsed
        .get("brand_analysis")
        .filter(|v| !v.is_null())
        .cloned();

    let token_count = response.token_count();
    tracing::debug!(
        provider = %provider,
        channels = posts_value.as_object().map(|m| m.len()).unwrap_or(0),
        input_tokens = token_count.input,
        output_tokens = token_count.output,
        "normalized provider response"
    );

    Ok(ParsedContent {
        posts: collect_posts(posts_value),
        brand_analysis,
        raw_response: content,
        parse_success: true,
        provider: provider.id().to_string(),
        token_count,
    })
}

/// JSON truthiness: null, false, 0 and "" are falsy
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Strings pass through; other non-null values keep their JSON text
fn collect_posts(posts: &Value) -> Posts {
    let mut out = Posts::new();
    if let Some(map) = posts.as_object() {
        for (name, value) in map {
            match value {
                Value::String(text) => {
                    out.insert(name.clone(), text.clone());
                }
                Value::Null => {}
                other => {
                    out.insert(name.clone(), other.to_string());
                }
            }
        }
    }
    out
}
