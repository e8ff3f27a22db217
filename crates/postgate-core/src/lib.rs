//! Postgate Core: channel model and unified errors
//!
//! Types shared by the response normalizer (`postgate-in`), the guardrail
//! validator (`postgate-quality`) and the review pipeline.

pub mod channel;
pub mod error;

pub use channel::{text_length, Channel, Posts, REQUIRED_CHANNELS};
pub use error::PostgateError;

/// Postgate engine version
pub const POSTGATE_VERSION: &str = "1.0.0";
