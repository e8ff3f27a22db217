//! Subcommand implementations
//!
//! Each command returns the process exit status: `0` when the content may be
//! published (or parsed cleanly), [`EXIT_BLOCKED`] when the guardrails block
//! it, and [`EXIT_UNPARSEABLE`] when the response cannot be normalized.

use anyhow::{Context, Result};
use postgate_core::{PostgateError, Posts};
use postgate_quality::{GuardrailProfile, Guardrails};
use postgate_review::Reviewer;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::{self, Read, Write};
use std::path::Path;

pub const EXIT_OK: u8 = 0;
/// Not cleared for publishing
pub const EXIT_BLOCKED: u8 = 1;
/// Response could not be normalized
pub const EXIT_UNPARSEABLE: u8 = 2;

pub fn parse(provider: &str, input: &Path) -> Result<u8> {
    let response = read_json(input)?;
    run_parse(provider, &response, &mut io::stdout().lock())
}

pub fn validate(profile: Option<&Path>, input: &Path) -> Result<u8> {
    let guardrails = load_guardrails(profile)?;
    let value = read_json(input)?;
    let posts = posts_from_value(value)
        .with_context(|| format!("{} is not a map of channel to text", input.display()))?;
    run_validate(&guardrails, &posts, &mut io::stdout().lock())
}

pub fn review(provider: &str, profile: Option<&Path>, record: bool, input: &Path) -> Result<u8> {
    let reviewer = Reviewer::new(load_guardrails(profile)?);
    let response = read_json(input)?;
    run_review(&reviewer, provider, &response, record, &mut io::stdout().lock())
}

fn run_parse(provider: &str, response: &Value, out: &mut impl Write) -> Result<u8> {
    match postgate_in::normalize(response, provider) {
        Ok(parsed) => {
            write_json(out, &parsed)?;
            Ok(EXIT_OK)
        }
        Err(e) => {
            eprintln!("{}", e);
            Ok(EXIT_UNPARSEABLE)
        }
    }
}

fn run_validate(guardrails: &Guardrails, posts: &Posts, out: &mut impl Write) -> Result<u8> {
    let result = guardrails.validate(posts);
    write_json(out, &result)?;
    eprintln!("{}", result.summary());

    Ok(if result.can_publish { EXIT_OK } else { EXIT_BLOCKED })
}

fn run_review(
    reviewer: &Reviewer,
    provider: &str,
    response: &Value,
    record: bool,
    out: &mut impl Write,
) -> Result<u8> {
    tracing::debug!(provider, profile = %reviewer.guardrails().profile().name, "reviewing response");

    match reviewer.review(response, provider) {
        Ok(review) => {
            if record {
                write_json(out, &review.record())?;
            } else {
                write_json(out, &review)?;
            }
            eprintln!("{}", review.validation.summary());

            Ok(if review.can_publish() { EXIT_OK } else { EXIT_BLOCKED })
        }
        Err(PostgateError::Parse(msg)) => {
            eprintln!("{}", msg);
            Ok(EXIT_UNPARSEABLE)
        }
        Err(e) => Err(e.into()),
    }
}

/// Accepts a bare posts object or a payload with a `posts` field.
/// `null` channels are dropped and later reported as missing content.
fn posts_from_value(value: Value) -> Result<Posts, serde_json::Error> {
    let posts_value = match value {
        Value::Object(mut map) if map.contains_key("posts") => map.remove("posts").unwrap_or_default(),
        other => other,
    };
    let posts: BTreeMap<String, Option<String>> = serde_json::from_value(posts_value)?;
    Ok(posts
        .into_iter()
        .filter_map(|(channel, text)| text.map(|text| (channel, text)))
        .collect())
}

fn load_guardrails(profile: Option<&Path>) -> Result<Guardrails> {
    let profile = match profile {
        Some(path) => GuardrailProfile::load(path)
            .with_context(|| format!("loading guardrail profile {}", path.display()))?,
        None => GuardrailProfile::standard(),
    };
    let guardrails = Guardrails::new(profile);
    tracing::debug!(profile = %guardrails.profile().name, "guardrails loaded");
    Ok(guardrails)
}

fn read_json(input: &Path) -> Result<Value> {
    read_json_from(input, io::stdin().lock())
}

/// `-` reads `stdin`, anything else is a file path
fn read_json_from(input: &Path, mut stdin: impl Read) -> Result<Value> {
    let text = if input == Path::new("-") {
        let mut buf = String::new();
        stdin.read_to_string(&mut buf).context("reading stdin")?;
        buf
    } else {
        std::fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?
    };

    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", input.display()))
}

fn write_json<T: Serialize>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
