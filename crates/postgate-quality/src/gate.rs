//! Guardrail evaluation for generated posts
//!
//! Checks every channel of a profile and produces a verdict: the error and
//! warning lists, a completeness score and whether the campaign may publish.

use super::profile::{ChannelRule, GuardrailProfile};
use postgate_core::{text_length, Posts};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Which guardrail a finding comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rule {
    MissingContent,
    BannedPhrase { phrase: String },
    TooShort { length: usize, minimum: usize },
    ExceedsLength { length: usize, maximum: usize },
    WhitespaceOnly,
}

impl Rule {
    pub fn severity(&self) -> Severity {
        match self {
            Rule::ExceedsLength { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Rule::MissingContent => "Missing content".to_string(),
            Rule::BannedPhrase { phrase } => format!("Contains banned phrase \"{}\"", phrase),
            Rule::TooShort { length, minimum } => {
                format!("Too short ({} chars, minimum {})", length, minimum)
            }
            Rule::ExceedsLength { length, maximum } => {
                format!("Exceeds recommended length ({}/{} chars)", length, maximum)
            }
            Rule::WhitespaceOnly => "Content is whitespace only".to_string(),
        }
    }
}

/// Single guardrail finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub channel: String,
    pub rule: Rule,
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    fn new(channel: &str, rule: Rule) -> Self {
        Self {
            channel: channel.to_string(),
            severity: rule.severity(),
            message: rule.message(),
            rule,
        }
    }

    /// `"<channel>: <message>"`
    pub fn render(&self) -> String {
        format!("{}: {}", self.channel, self.message)
    }
}

/// Overall guardrail verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// No error was recorded
    pub is_valid: bool,

    /// Share of channels that passed, 0-100
    pub completeness_score: u32,

    pub errors: Vec<String>,

    pub warnings: Vec<String>,

    /// Score reaches the publish threshold and there are no errors
    pub can_publish: bool,

    /// The posts that were checked
    pub posts: Posts,

    /// Structured form of `errors` and `warnings`, in emission order
    pub findings: Vec<Finding>,
}

impl ValidationResult {
    /// Findings recorded for one channel
    pub fn channel_findings<'a>(&'a self, channel: &'a str) -> impl Iterator<Item = &'a Finding> + 'a {
        self.findings.iter().filter(move |f| f.channel == channel)
    }

    /// One-line summary for operators
    pub fn summary(&self) -> String {
        if self.can_publish {
            if self.warnings.is_empty() {
                format!("Ready to publish (score {})", self.completeness_score)
            } else {
                format!(
                    "Ready to publish with {} warning(s) (score {})",
                    self.warnings.len(),
                    self.completeness_score
                )
            }
        } else if !self.errors.is_empty() {
            let mut channels: Vec<&str> = Vec::new();
            for finding in self.findings.iter().filter(|f| f.severity == Severity::Error) {
                if !channels.contains(&finding.channel.as_str()) {
                    channels.push(&finding.channel);
                }
            }
            format!(
                "Blocked: {} error(s) in {} (score {})",
                self.errors.len(),
                channels.join(", "),
                self.completeness_score
            )
        } else {
            format!("Blocked: score {} below publish threshold", self.completeness_score)
        }
    }
}

/// Guardrail validator bound to one profile
#[derive(Debug, Clone)]
pub struct Guardrails {
    profile: GuardrailProfile,
    /// Banned phrases as configured, paired with their lowercase form
    banned: Vec<(String, String)>,
}

impl Guardrails {
    /// Create guardrails for the given profile
    pub fn new(profile: GuardrailProfile) -> Self {
        let banned = profile
            .banned_phrases
            .iter()
            .map(|p| (p.clone(), p.to_lowercase()))
            .collect();
        Self { profile, banned }
    }

    pub fn profile(&self) -> &GuardrailProfile {
        &self.profile
    }

    /// Validate posts against the profile. Never fails.
    pub fn validate(&self, posts: &Posts) -> ValidationResult {
        let mut findings: Vec<Finding> = Vec::new();
        let mut valid_count = 0usize;

        for rule in &self.profile.channels {
            let text = posts.get(&rule.name).map(String::as_str).unwrap_or("");
            let start = findings.len();

            self.check_channel(rule, text, &mut findings);

            let has_error = findings[start..]
                .iter()
                .any(|f| f.severity == Severity::Error);
            if !text.is_empty() && text_length(trim_text(text)) >= rule.min_chars && !has_error {
                valid_count += 1;
            }
        }

        let errors: Vec<String> = findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .map(Finding::render)
            .collect();
        let warnings: Vec<String> = findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
            .map(Finding::render)
            .collect();

        let completeness_score = completeness_score(valid_count, self.profile.channels.len());
        let is_valid = errors.is_empty();
        let can_publish = is_valid && completeness_score >= self.profile.publish_threshold;

        tracing::debug!(
            profile = %self.profile.name,
            score = completeness_score,
            errors = errors.len(),
            warnings = warnings.len(),
            can_publish,
            "validated posts"
        );

        ValidationResult {
            is_valid,
            completeness_score,
            errors,
            warnings,
            can_publish,
            posts: posts.clone(),
            findings,
        }
    }

    fn check_channel(&self, rule: &ChannelRule, text: &str, findings: &mut Vec<Finding>) {
        let channel = rule.name.as_str();

        if text.is_empty() {
            findings.push(Finding::new(channel, Rule::MissingContent));
            return;
        }

        let lower = text.to_lowercase();
        for (phrase, needle) in &self.banned {
            if lower.contains(needle.as_str()) {
                findings.push(Finding::new(
                    channel,
                    Rule::BannedPhrase {
                        phrase: phrase.clone(),
                    },
                ));
            }
        }

        let length = text_length(text);
        if length < rule.min_chars {
            findings.push(Finding::new(
                channel,
                Rule::TooShort {
                    length,
                    minimum: rule.min_chars,
                },
            ));
        }

        if length > rule.max_chars {
            findings.push(Finding::new(
                channel,
                Rule::ExceedsLength {
                    length,
                    maximum: rule.max_chars,
                },
            ));
        }

        if trim_text(text).is_empty() {
            findings.push(Finding::new(channel, Rule::WhitespaceOnly));
        }
    }
}

impl Default for Guardrails {
    fn default() -> Self {
        Self::new(GuardrailProfile::default())
    }
}

/// Trims whitespace and the byte order mark
fn trim_text(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

/// `round(valid / total * 100)`, rounding halves up
fn completeness_score(valid: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((200 * valid + total) / (2 * total)) as u32
}
