//! JSON payload extraction for generated text.
//!
//! Models wrap their JSON in different ways:
//! - Bare JSON
//! - A fenced markdown block (```json ... ``` or ``` ... ```)
//! - JSON surrounded by prose ("Here are your posts: {...} Enjoy!")
//!
//! Only one object is ever extracted. The brace span runs from the first `{`
//! to the last `}` and is not depth-aware.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Fenced code block with an optional `json` tag
    static ref CODE_FENCE: Regex = Regex::new(r"```(?:json)?\s*([\s\S]*?)```").unwrap();

    /// First `{` through the last `}`
    static ref JSON_OBJECT: Regex = Regex::new(r"(\{[\s\S]*\})").unwrap();
}

/// Inner text of the first fenced code block
pub fn fenced_block(text: &str) -> Option<&str> {
    CODE_FENCE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Span from the first `{` to the last `}`
pub fn object_span(text: &str) -> Option<&str> {
    JSON_OBJECT.find(text).map(|m| m.as_str())
}

/// The string that should be handed to the JSON parser.
///
/// Falls back to the input unchanged when neither a fence nor braces are found.
pub fn json_candidate(content: &str) -> &str {
    let mut candidate = content;

    if let Some(inner) = fenced_block(candidate) {
        tracing::debug!(len = inner.len(), "using fenced code block");
        candidate = inner;
    }

    if let Some(span) = object_span(candidate) {
        candidate = span;
    }

    candidate
}
