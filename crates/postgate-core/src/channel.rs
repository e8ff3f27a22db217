//! Publishing channels.
//!
//! The four channels every generated campaign must cover, in the fixed order
//! used for diagnostics.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Channel name → post text
pub type Posts = BTreeMap<String, String>;

/// Required channel names, in reporting order
pub const REQUIRED_CHANNELS: [&str; 4] = ["linkedin", "twitter", "instagram", "facebook"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Linkedin,
    Twitter,
    Instagram,
    Facebook,
}

impl Channel {
    pub const ALL: [Channel; 4] = [
        Channel::Linkedin,
        Channel::Twitter,
        Channel::Instagram,
        Channel::Facebook,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Linkedin => "linkedin",
            Channel::Twitter => "twitter",
            Channel::Instagram => "instagram",
            Channel::Facebook => "facebook",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Channel::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown channel: {}", s))
    }
}

/// Length of a post as the publishing channels count it (UTF-16 code units).
pub fn text_length(text: &str) -> usize {
    text.encode_utf16().count()
}
