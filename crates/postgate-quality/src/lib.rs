//! Postgate Quality: Content Guardrails
//!
//! This crate checks generated posts against a guardrail profile
//! (length limits, banned phrases, emptiness) and decides whether the
//! campaign can be published.
//!
//! # Example
//!
//! ```ignore
//! use postgate_quality::{Guardrails, Posts};
//!
//! let gate = Guardrails::default();
//!
//! let mut posts = Posts::new();
//! posts.insert("linkedin".into(), "Our new scheduling assistant ships today.".into());
//!
//! let result = gate.validate(&posts);
//! println!("{} (score: {})", result.summary(), result.completeness_score);
//! for error in &result.errors {
//!     println!("  {}", error);
//! }
//! ```

pub mod gate;
pub mod profile;

pub use gate::{Finding, Guardrails, Rule, Severity, ValidationResult};
pub use postgate_core::Posts;
pub use profile::{ChannelRule, GuardrailProfile, ProfileError};

/// Validate posts against the standard profile
pub fn validate(posts: &Posts) -> ValidationResult {
    Guardrails::default().validate(posts)
}

/// Check if posts would be cleared for publishing
pub fn would_publish(posts: &Posts) -> bool {
    validate(posts).can_publish
}
