use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// An awarded achievement certificate as delivered by the certificate service.
///
/// Snapshots are immutable on the client: engagement counters in [`CertificateStats`]
/// only change by re-fetching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: CertificateType,
    pub level: CertificateLevel,
    #[serde(default)]
    pub recipients: Vec<Recipient>,
    #[serde(default)]
    pub related_to: RelatedTo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_id: Option<RelatedRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria: Option<Criteria>,
    pub metadata: CertificateMetadata,
    #[serde(default)]
    pub stats: CertificateStats,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design: Option<Design>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertificateType {
    Milestone,
    Anniversary,
    Achievement,
    Trust,
    Communication,
    Commitment,
    Growth,
    Special,
}

impl CertificateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Milestone => "milestone",
            Self::Anniversary => "anniversary",
            Self::Achievement => "achievement",
            Self::Trust => "trust",
            Self::Communication => "communication",
            Self::Commitment => "commitment",
            Self::Growth => "growth",
            Self::Special => "special",
        }
    }
}

impl fmt::Display for CertificateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Certificate rank, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertificateLevel {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
}

impl CertificateLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Platinum => "platinum",
            Self::Diamond => "diamond",
        }
    }
}

impl fmt::Display for CertificateLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl UserRef {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    pub user: UserRef,
    pub awarded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelatedTo {
    Milestone,
    Relationship,
    #[default]
    None,
}

impl RelatedTo {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Milestone => "milestone",
            Self::Relationship => "relationship",
            Self::None => "none",
        }
    }
}

/// The entity a certificate points at, either resolved by the backend or a bare id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelatedRef {
    Resolved(RelatedSummary),
    Id(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedSummary {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl RelatedRef {
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Resolved(summary) => summary.id.as_deref(),
            Self::Id(id) => Some(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Criteria {
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    /// Days
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_required: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points_required: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateMetadata {
    pub certificate_number: String,
    pub issued_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CertificateStats {
    pub view_count: u64,
    pub download_count: u64,
    pub share_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Design {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
}

impl Certificate {
    /// A certificate without `validUntil` never expires
    pub fn is_valid_at(&self, at: DateTime<Utc>) -> bool {
        self.metadata.valid_until.is_none_or(|until| at <= until)
    }

    pub fn is_expired(&self) -> bool {
        !self.is_valid_at(Utc::now())
    }

    pub fn recipient_names(&self) -> Vec<String> {
        self.recipients.iter().map(|r| r.user.full_name()).collect()
    }
}

impl fmt::Display for Certificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} {}), No. {}",
            self.title, self.level, self.kind, self.metadata.certificate_number
        )
    }
}
