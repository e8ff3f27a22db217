//! Provider envelopes.
//!
//! Each supported provider wraps generated text differently:
//! - Claude: `content[0].text`, usage as `input_tokens` / `output_tokens`
//! - OpenAI: `choices[0].message.content`, usage as `prompt_tokens` / `completion_tokens`
//! - Replicate: a list of streamed string chunks, or a prediction with `output`
//!
//! Envelopes are decoded leniently: a response that does not fit its
//! provider's shape yields empty text rather than an error, and the JSON
//! extraction step reports the failure.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Provider identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Provider {
    Claude,
    OpenAi,
    Replicate,
    /// Anything else; no extraction is attempted
    Other(String),
}

impl Provider {
    pub fn from_id(id: &str) -> Self {
        match id {
            "claude" => Provider::Claude,
            "openai" => Provider::OpenAi,
            "replicate" => Provider::Replicate,
            other => Provider::Other(other.to_string()),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Provider::Claude => "claude",
            Provider::OpenAi => "openai",
            Provider::Replicate => "replicate",
            Provider::Other(id) => id,
        }
    }
}

impl FromStr for Provider {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Provider::from_id(s))
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Input/output token usage reported by the provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCount {
    pub input: u64,
    pub output: u64,
}

// === Claude ===

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaudeEnvelope {
    #[serde(default, deserialize_with = "lenient::seq")]
    pub content: Vec<ClaudeBlock>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub usage: Option<ClaudeUsage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaudeBlock {
    #[serde(default, rename = "type", deserialize_with = "lenient::option")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaudeUsage {
    #[serde(default, deserialize_with = "lenient::count")]
    pub input_tokens: Option<u64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub output_tokens: Option<u64>,
}

// === OpenAI ===

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenAiEnvelope {
    #[serde(default, deserialize_with = "lenient::seq")]
    pub choices: Vec<OpenAiChoice>,
    #[serde(default, deserialize_with = "lenient::option")]
    pub usage: Option<OpenAiUsage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenAiChoice {
    #[serde(default, deserialize_with = "lenient::option")]
    pub message: Option<OpenAiMessage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenAiMessage {
    #[serde(default, deserialize_with = "lenient::option")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenAiUsage {
    #[serde(default, deserialize_with = "lenient::count")]
    pub prompt_tokens: Option<u64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub completion_tokens: Option<u64>,
}

// === Replicate ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReplicateEnvelope {
    /// Streamed chunks, concatenated in order
    Chunks(#[serde(deserialize_with = "lenient::chunks")] Vec<String>),
    /// Prediction object
    Prediction {
        #[serde(default, deserialize_with = "lenient::option")]
        output: Option<ReplicateOutput>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReplicateOutput {
    Text(String),
    Chunks(#[serde(deserialize_with = "lenient::chunks")] Vec<String>),
}

impl Default for ReplicateEnvelope {
    fn default() -> Self {
        ReplicateEnvelope::Prediction { output: None }
    }
}

/// A provider response, decoded according to its provider
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderResponse {
    Claude(ClaudeEnvelope),
    OpenAi(OpenAiEnvelope),
    Replicate(ReplicateEnvelope),
    Unrecognized(String),
}

impl ProviderResponse {
    /// Decode a raw response for the given provider.
    pub fn from_value(provider: &Provider, value: &Value) -> Self {
        match provider {
            Provider::Claude => ProviderResponse::Claude(decode_or_default(provider, value)),
            Provider::OpenAi => ProviderResponse::OpenAi(decode_or_default(provider, value)),
            Provider::Replicate => ProviderResponse::Replicate(decode_or_default(provider, value)),
            Provider::Other(id) => {
                tracing::debug!(provider = %id, "unrecognized provider, no text extracted");
                ProviderResponse::Unrecognized(id.clone())
            }
        }
    }

    pub fn provider(&self) -> Provider {
        match self {
            ProviderResponse::Claude(_) => Provider::Claude,
            ProviderResponse::OpenAi(_) => Provider::OpenAi,
            ProviderResponse::Replicate(_) => Provider::Replicate,
            ProviderResponse::Unrecognized(id) => Provider::Other(id.clone()),
        }
    }

    /// Generated text carried by the envelope, or `""` when there is none.
    pub fn text(&self) -> String {
        match self {
            ProviderResponse::Claude(env) => env
                .content
                .first()
                .and_then(|block| block.text.clone())
                .unwrap_or_default(),
            ProviderResponse::OpenAi(env) => env
                .choices
                .first()
                .and_then(|choice| choice.message.as_ref())
                .and_then(|message| message.content.clone())
                .unwrap_or_default(),
            ProviderResponse::Replicate(ReplicateEnvelope::Chunks(chunks)) => chunks.concat(),
            ProviderResponse::Replicate(ReplicateEnvelope::Prediction { output }) => match output {
                Some(ReplicateOutput::Text(text)) => text.clone(),
                Some(ReplicateOutput::Chunks(chunks)) => chunks.concat(),
                None => String::new(),
            },
            ProviderResponse::Unrecognized(_) => String::new(),
        }
    }

    pub fn token_count(&self) -> TokenCount {
        match self {
            ProviderResponse::Claude(ClaudeEnvelope { usage: Some(usage), .. }) => TokenCount {
                input: usage.input_tokens.unwrap_or(0),
                output: usage.output_tokens.unwrap_or(0),
            },
            ProviderResponse::OpenAi(OpenAiEnvelope { usage: Some(usage), .. }) => TokenCount {
                input: usage.prompt_tokens.unwrap_or(0),
                output: usage.completion_tokens.unwrap_or(0),
            },
            _ => TokenCount::default(),
        }
    }
}

fn decode_or_default<T>(provider: &Provider, value: &Value) -> T
where
    T: for<'de> Deserialize<'de> + Default,
{
    match T::deserialize(value) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::warn!(provider = %provider, error = %e, "response does not match provider envelope");
            T::default()
        }
    }
}

/// Field decoders that drop a malformed field instead of the whole envelope
mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// `None` when the field has another shape
    pub fn option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(serde_json::from_value(value).ok())
    }

    /// Elements of another shape decode to their default; a non-list is empty
    pub fn seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => items
                .into_iter()
                .map(|item| serde_json::from_value(item).unwrap_or_default())
                .collect(),
            _ => Vec::new(),
        })
    }

    /// Token count; fractions are truncated
    pub fn count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(value.as_u64().or_else(|| {
            value
                .as_f64()
                .filter(|n| n.is_finite() && *n >= 0.0)
                .map(|n| n as u64)
        }))
    }

    /// Text chunks; `null` is empty and other scalars keep their JSON text
    pub fn chunks<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let items = Vec::<Value>::deserialize(deserializer)?;
        Ok(items
            .into_iter()
            .map(|item| match item {
                Value::String(text) => text,
                Value::Null => String::new(),
                other => other.to_string(),
            })
            .collect())
    }
}
