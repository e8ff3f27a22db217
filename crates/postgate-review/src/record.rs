//! Flat campaign record handed to the publishing side.

use crate::{CampaignReview, ReviewStatus};
use postgate_in::TokenCount;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRecord {
    /// `brand_analysis.title`, when present
    pub brand_title: Option<String>,
    pub provider: String,
    pub completeness_score: u32,
    pub is_valid: bool,
    pub can_publish: bool,
    pub validation_errors: Vec<String>,
    pub validation_warnings: Vec<String>,
    pub status: ReviewStatus,
    pub token_count: TokenCount,
}

impl CampaignRecord {
    pub fn from_review(review: &CampaignReview) -> Self {
        let brand_title = review
            .content
            .brand_analysis
            .as_ref()
            .and_then(|analysis| analysis.get("title"))
            .and_then(|title| title.as_str())
            .map(str::to_string);

        Self {
            brand_title,
            provider: review.content.provider.clone(),
            completeness_score: review.validation.completeness_score,
            is_valid: review.validation.is_valid,
            can_publish: review.validation.can_publish,
            validation_errors: review.validation.errors.clone(),
            validation_warnings: review.validation.warnings.clone(),
            status: review.status,
            token_count: review.content.token_count,
        }
    }
}
