//! Postgate Review: normalize, then validate.
//!
//! Composes the two stages a generated campaign passes through before it
//! reaches the publishing gate.
//!
//! # Pipeline Flow
//!
//! ```text
//! Provider response → Normalizer → Guardrails → Review
//!                        ↓             ↓           ↓
//!                  ParsedContent  Validation   Validated / NeedsRevision
//! ```
//!
//! A response that cannot be normalized stops the pipeline with its parse
//! error; validation problems are reported in the review.

mod record;

pub use record::CampaignRecord;

use postgate_core::PostgateError;
use postgate_in::{ParsedContent, ProviderResponse};
use postgate_quality::{Guardrails, ValidationResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of a successful review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    /// Cleared for publishing
    Validated,
    /// Parsed, but the guardrails block publishing
    NeedsRevision,
}

/// Normalized content together with its guardrail verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignReview {
    pub content: ParsedContent,
    pub validation: ValidationResult,
    pub status: ReviewStatus,
}

impl CampaignReview {
    fn new(content: ParsedContent, validation: ValidationResult) -> Self {
        let status = if validation.can_publish {
            ReviewStatus::Validated
        } else {
            ReviewStatus::NeedsRevision
        };
        Self {
            content,
            validation,
            status,
        }
    }

    pub fn can_publish(&self) -> bool {
        self.status == ReviewStatus::Validated
    }

    /// Flat projection for downstream storage
    pub fn record(&self) -> CampaignRecord {
        CampaignRecord::from_review(self)
    }
}

/// Runs provider responses through the normalizer and the guardrails
#[derive(Debug, Clone, Default)]
pub struct Reviewer {
    guardrails: Guardrails,
}

impl Reviewer {
    pub fn new(guardrails: Guardrails) -> Self {
        Self { guardrails }
    }

    pub fn guardrails(&self) -> &Guardrails {
        &self.guardrails
    }

    /// Review a raw provider response
    pub fn review(&self, response: &Value, provider: &str) -> Result<CampaignReview, PostgateError> {
        let content = postgate_in::normalize(response, provider).map_err(|e| {
            tracing::warn!(provider, error = %e, "provider response rejected");
            e
        })?;
        Ok(self.review_content(content))
    }

    /// Review an already-decoded provider envelope
    pub fn review_response(&self, response: &ProviderResponse) -> Result<CampaignReview, PostgateError> {
        let content = postgate_in::normalize_response(response)?;
        Ok(self.review_content(content))
    }

    /// Validate content that was normalized elsewhere
    pub fn review_content(&self, content: ParsedContent) -> CampaignReview {
        let validation = self.guardrails.validate(&content.posts);
        let review = CampaignReview::new(content, validation);

        tracing::info!(
            provider = %review.content.provider,
            status = ?review.status,
            score = review.validation.completeness_score,
            "campaign reviewed"
        );

        review
    }

    /// Review independent responses, in order.
    pub fn review_batch(
        &self,
        responses: &[(Value, String)],
    ) -> Vec<Result<CampaignReview, PostgateError>> {
        responses
            .iter()
            .map(|(response, provider)| self.review(response, provider))
            .collect()
    }
}

/// Review a response against the standard guardrails
pub fn review(response: &Value, provider: &str) -> Result<CampaignReview, PostgateError> {
    Reviewer::default().review(response, provider)
}
