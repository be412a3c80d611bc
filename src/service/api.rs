use crate::cert::{Certificate, CertificateFilters, SharePlatform};
use crate::service::ServiceError;
use async_trait::async_trait;

pub type ApiResult<T> = std::result::Result<T, ServiceError>;

/// Operations offered by the remote certificate service
#[async_trait]
pub trait CertificateApi: Send + Sync {
    /// `GET /certificates/{id}`
    async fn fetch_certificate(&self, id: &str) -> ApiResult<Certificate>;

    /// `GET /certificates?{filters}`
    async fn fetch_certificates(&self, filters: &CertificateFilters)
        -> ApiResult<Vec<Certificate>>;

    /// `GET /certificates/relationship/{relationship_id}`
    async fn fetch_relationship_certificates(
        &self,
        relationship_id: &str,
    ) -> ApiResult<Vec<Certificate>>;

    /// `GET /certificates/{id}/download`, opaque bytes
    async fn download_certificate(&self, id: &str) -> ApiResult<Vec<u8>>;

    /// `POST /certificates/{id}/share`, returns the share URL
    async fn share_certificate(&self, id: &str, platform: &SharePlatform) -> ApiResult<String>;
}
