use crate::cert::model::Certificate;
use crate::utils::errors::{RelcertError, Result};
use crate::utils::output::GetColumnValue;
use std::str::FromStr;

const DEFAULT_COLUMNS: [&str; 5] = ["number", "title", "type", "level", "recipients"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CertificateColumn {
    Id,
    Number,
    Title,
    Type,
    Level,
    Recipients,
    IssuedBy,
    ValidUntil,
    Views,
    Downloads,
    Shares,
}

impl CertificateColumn {
    pub const NAMES: [&'static str; 11] = [
        "id",
        "number",
        "title",
        "type",
        "level",
        "recipients",
        "issued_by",
        "valid_until",
        "views",
        "downloads",
        "shares",
    ];

    pub fn header(&self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Number => "Number",
            Self::Title => "Title",
            Self::Type => "Type",
            Self::Level => "Level",
            Self::Recipients => "Recipients",
            Self::IssuedBy => "Issued By",
            Self::ValidUntil => "Valid Until",
            Self::Views => "Views",
            Self::Downloads => "Downloads",
            Self::Shares => "Shares",
        }
    }

    /// Parse a `--columns` value; a leading `+` appends to the defaults
    pub fn parse_list(columns: Option<&str>) -> Result<Vec<Self>> {
        let names: Vec<&str> = match columns {
            None => DEFAULT_COLUMNS.to_vec(),
            Some(list) => {
                let (mut names, rest) = match list.strip_prefix('+') {
                    Some(stripped) => (DEFAULT_COLUMNS.to_vec(), stripped),
                    None => (Vec::new(), list),
                };
                names.extend(rest.split(',').map(str::trim).filter(|s| !s.is_empty()));
                names
            }
        };

        names
            .into_iter()
            .map(|name| name.parse().map_err(RelcertError::InvalidInput))
            .collect()
    }
}

impl FromStr for CertificateColumn {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "id" => Ok(Self::Id),
            "number" | "no" => Ok(Self::Number),
            "title" => Ok(Self::Title),
            "type" => Ok(Self::Type),
            "level" => Ok(Self::Level),
            "recipients" => Ok(Self::Recipients),
            "issued_by" | "issuer" => Ok(Self::IssuedBy),
            "valid_until" | "expires" => Ok(Self::ValidUntil),
            "views" => Ok(Self::Views),
            "downloads" => Ok(Self::Downloads),
            "shares" => Ok(Self::Shares),
            _ => Err(format!("Invalid column: {s}")),
        }
    }
}

impl GetColumnValue for Certificate {
    type Column = CertificateColumn;

    fn get_column_value(&self, column: &CertificateColumn) -> String {
        match column {
            CertificateColumn::Id => self.id.clone(),
            CertificateColumn::Number => self.metadata.certificate_number.clone(),
            CertificateColumn::Title => self.title.clone(),
            CertificateColumn::Type => self.kind.to_string(),
            CertificateColumn::Level => self.level.to_string(),
            CertificateColumn::Recipients => self.recipient_names().join(","),
            CertificateColumn::IssuedBy => self.metadata.issued_by.clone(),
            CertificateColumn::ValidUntil => self
                .metadata
                .valid_until
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string()),
            CertificateColumn::Views => self.stats.view_count.to_string(),
            CertificateColumn::Downloads => self.stats.download_count.to_string(),
            CertificateColumn::Shares => self.stats.share_count.to_string(),
        }
    }
}
