//! Mock provider responses shared by the integration suites.

#![allow(dead_code)]

use serde_json::{json, Value};

/// A complete campaign payload
pub fn campaign(include_analysis: bool) -> Value {
    let mut payload = json!({
        "posts": {
            "linkedin": "Professional LinkedIn post about our product",
            "twitter": "Catchy tweet with hashtags #tech #marketing",
            "instagram": "Visual Instagram post with emoji 🚀",
            "facebook": "Community-focused Facebook post"
        }
    });

    if include_analysis {
        payload["brand_analysis"] = json!({
            "title": "Test Company",
            "key_usps": ["Feature 1", "Feature 2"],
            "target_audience": "Businesses",
            "brand_voice": "Professional"
        });
    }

    payload
}

pub fn claude_response(text: &str) -> Value {
    json!({
        "content": [{"type": "text", "text": text}],
        "usage": {"input_tokens": 500, "output_tokens": 200}
    })
}

pub fn openai_response(text: &str) -> Value {
    json!({
        "choices": [{"message": {"content": text}}],
        "usage": {"prompt_tokens": 500, "completion_tokens": 200}
    })
}

pub fn replicate_output(text: &str) -> Value {
    json!({"output": text})
}

pub fn replicate_chunks(chunks: &[&str]) -> Value {
    json!(chunks)
}

/// Wrap a payload in a provider envelope
pub fn mock_response(provider: &str, payload: &Value) -> Value {
    let text = payload.to_string();
    match provider {
        "claude" => claude_response(&text),
        "openai" => openai_response(&text),
        "replicate" => replicate_output(&text),
        _ => payload.clone(),
    }
}
