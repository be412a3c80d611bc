use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Where the URL returned by a share action is meant to be used.
///
/// Names are matched exactly. Anything else, including a differently cased known
/// name, is kept verbatim and forwarded to the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SharePlatform {
    Twitter,
    Facebook,
    Linkedin,
    Copy,
    Other(String),
}

impl SharePlatform {
    pub const KNOWN: [&'static str; 4] = ["twitter", "facebook", "linkedin", "copy"];

    pub fn parse(value: &str) -> Self {
        match value {
            "twitter" => Self::Twitter,
            "facebook" => Self::Facebook,
            "linkedin" => Self::Linkedin,
            "copy" => Self::Copy,
            _ => {
                tracing::warn!("Unknown share platform '{value}', forwarding as-is");
                Self::Other(value.to_string())
            }
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Twitter => "twitter",
            Self::Facebook => "facebook",
            Self::Linkedin => "linkedin",
            Self::Copy => "copy",
            Self::Other(value) => value,
        }
    }

    /// Platform page that publishes `share_url`, if this platform has one
    pub fn intent_url(&self, share_url: &str) -> Option<String> {
        let encoded = urlencoding::encode(share_url);
        match self {
            Self::Twitter => Some(format!("https://twitter.com/intent/tweet?url={encoded}")),
            Self::Facebook => Some(format!(
                "https://www.facebook.com/sharer/sharer.php?u={encoded}"
            )),
            Self::Linkedin => Some(format!(
                "https://www.linkedin.com/sharing/share-offsite/?url={encoded}"
            )),
            Self::Copy | Self::Other(_) => None,
        }
    }
}

impl fmt::Display for SharePlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SharePlatform {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for SharePlatform {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl Serialize for SharePlatform {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SharePlatform {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SharePlatform::parse(&s))
    }
}
