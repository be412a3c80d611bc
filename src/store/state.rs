use crate::cert::Certificate;
use std::fmt;
use thiserror::Error;

/// Everything the store exposes to its consumers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    /// Last successful single-certificate fetch
    pub certificate: Option<Certificate>,
    /// Last successful collection fetch
    pub certificates: Vec<Certificate>,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetCertificate,
    FetchAllCertificates,
    GetCertificates,
    DownloadCertificate,
    ShareCertificate,
}

impl Operation {
    /// Message used when a failure carries none from the service
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::GetCertificate => "Failed to fetch certificate",
            Self::FetchAllCertificates | Self::GetCertificates => "Failed to fetch certificates",
            Self::DownloadCertificate => "Failed to download certificate",
            Self::ShareCertificate => "Failed to share certificate",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GetCertificate => "get_certificate",
            Self::FetchAllCertificates => "fetch_all_certificates",
            Self::GetCertificates => "get_certificates",
            Self::DownloadCertificate => "download_certificate",
            Self::ShareCertificate => "share_certificate",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failed store operation; `message` is the same text left in the store's `error`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct StoreError {
    pub operation: Operation,
    pub message: String,
}

impl StoreError {
    pub fn new(operation: Operation, server_message: Option<&str>) -> Self {
        let message = server_message
            .unwrap_or_else(|| operation.default_message())
            .to_string();
        Self { operation, message }
    }
}
