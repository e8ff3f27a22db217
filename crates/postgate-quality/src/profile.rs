//! Guardrail profiles
//!
//! Defines per-channel length limits, banned phrases and the publish threshold.

use postgate_core::PostgateError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Length limits for one channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRule {
    /// Channel name (e.g., "linkedin")
    pub name: String,

    /// Shorter posts are rejected
    pub min_chars: usize,

    /// Longer posts only produce a warning
    pub max_chars: usize,
}

impl ChannelRule {
    pub fn new(name: impl Into<String>, min_chars: usize, max_chars: usize) -> Self {
        Self {
            name: name.into(),
            min_chars,
            max_chars,
        }
    }
}

/// Guardrail profile defining channel rules and content restrictions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuardrailProfile {
    /// Profile name (e.g., "standard@1.0")
    pub name: String,

    /// Channels checked, in reporting order
    pub channels: Vec<ChannelRule>,

    /// Phrases rejected anywhere in a post, matched case-insensitively
    #[serde(default)]
    pub banned_phrases: Vec<String>,

    /// Minimum completeness score required to publish
    #[serde(default = "default_publish_threshold")]
    pub publish_threshold: u32,
}

fn default_publish_threshold() -> u32 {
    80
}

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("failed to read profile {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid profile YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("profile defines no channels")]
    NoChannels,

    #[error("duplicate channel: {0}")]
    DuplicateChannel(String),

    #[error("channel {name}: minimum {min} exceeds maximum {max}")]
    InvertedLimits { name: String, min: usize, max: usize },

    #[error("publish threshold {0} exceeds 100")]
    ThresholdOutOfRange(u32),
}

impl From<ProfileError> for PostgateError {
    fn from(e: ProfileError) -> Self {
        PostgateError::Profile(e.to_string())
    }
}

impl GuardrailProfile {
    /// The standard social campaign profile
    pub fn standard() -> Self {
        Self {
            name: "standard@1.0".to_string(),
            channels: vec![
                ChannelRule::new("linkedin", 20, 3000),
                ChannelRule::new("twitter", 10, 280),
                ChannelRule::new("instagram", 20, 2200),
                ChannelRule::new("facebook", 20, 63206),
            ],
            banned_phrases: [
                "in today's fast-paced world",
                "game-changer",
                "synergy",
                "leverage",
                "think outside the box",
                "best in class",
                "revolutionary",
                "paradigm shift",
            ]
            .iter()
            .map(|p| p.to_string())
            .collect(),
            publish_threshold: default_publish_threshold(),
        }
    }

    /// Load profile from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, ProfileError> {
        let profile: Self = serde_yaml::from_str(yaml)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Load profile from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ProfileError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    /// Check the profile is internally consistent
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.channels.is_empty() {
            return Err(ProfileError::NoChannels);
        }

        let mut seen = HashSet::new();
        for rule in &self.channels {
            if !seen.insert(rule.name.as_str()) {
                return Err(ProfileError::DuplicateChannel(rule.name.clone()));
            }
            if rule.min_chars > rule.max_chars {
                return Err(ProfileError::InvertedLimits {
                    name: rule.name.clone(),
                    min: rule.min_chars,
                    max: rule.max_chars,
                });
            }
        }

        if self.publish_threshold > 100 {
            return Err(ProfileError::ThresholdOutOfRange(self.publish_threshold));
        }

        Ok(())
    }

    /// Rule for a channel
    pub fn channel(&self, name: &str) -> Option<&ChannelRule> {
        self.channels.iter().find(|c| c.name == name)
    }
}

impl Default for GuardrailProfile {
    fn default() -> Self {
        Self::standard()
    }
}
