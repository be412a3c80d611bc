use crate::cert::{Certificate, CertificateFilters, SharePlatform};
use crate::service::{create_http_client, ApiResult, CertificateApi, ServiceError};
use crate::utils::config::RelcertConfig;
use crate::utils::errors::Result;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

#[derive(Deserialize)]
struct CertificateEnvelope {
    certificate: Certificate,
}

#[derive(Deserialize)]
struct CertificatesEnvelope {
    certificates: Vec<Certificate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShareEnvelope {
    share_url: String,
}

/// HTTP client for the certificate service
#[derive(Clone)]
pub struct CertificateClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl CertificateClient {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = create_http_client(timeout)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn from_config(config: &RelcertConfig) -> Result<Self> {
        Self::new(
            &config.api_url()?,
            config.token().map(str::to_string),
            config.timeout(),
        )
    }

    /// Get service base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!("{} {}", method, url);

        let builder = self.client.request(method, &url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> ApiResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ServiceError::from_body(status, &body))
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        let response = self.send(builder).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ServiceError::Decode(e.to_string()))
    }
}

fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[async_trait]
impl CertificateApi for CertificateClient {
    async fn fetch_certificate(&self, id: &str) -> ApiResult<Certificate> {
        let path = format!("certificates/{}", segment(id));
        let envelope: CertificateEnvelope = self.send_json(self.request(Method::GET, &path)).await?;
        Ok(envelope.certificate)
    }

    async fn fetch_certificates(
        &self,
        filters: &CertificateFilters,
    ) -> ApiResult<Vec<Certificate>> {
        let mut builder = self.request(Method::GET, "certificates");
        if !filters.is_empty() {
            builder = builder.query(&filters.query_pairs());
        }

        let envelope: CertificatesEnvelope = self.send_json(builder).await?;
        Ok(envelope.certificates)
    }

    async fn fetch_relationship_certificates(
        &self,
        relationship_id: &str,
    ) -> ApiResult<Vec<Certificate>> {
        let path = format!("certificates/relationship/{}", segment(relationship_id));
        let envelope: CertificatesEnvelope =
            self.send_json(self.request(Method::GET, &path)).await?;
        Ok(envelope.certificates)
    }

    async fn download_certificate(&self, id: &str) -> ApiResult<Vec<u8>> {
        let path = format!("certificates/{}/download", segment(id));
        let response = self.send(self.request(Method::GET, &path)).await?;
        let bytes = response.bytes().await?;
        tracing::debug!("Downloaded {} bytes for certificate {}", bytes.len(), id);
        Ok(bytes.to_vec())
    }

    async fn share_certificate(&self, id: &str, platform: &SharePlatform) -> ApiResult<String> {
        let path = format!("certificates/{}/share", segment(id));
        let builder = self
            .request(Method::POST, &path)
            .json(&json!({ "platform": platform }));

        let envelope: ShareEnvelope = self.send_json(builder).await?;
        Ok(envelope.share_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cert::model::tests::sample_json;
    use reqwest::StatusCode;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, token: Option<&str>) -> CertificateClient {
        CertificateClient::new(
            &format!("{}/api/", server.uri()),
            token.map(str::to_string),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_certificate_with_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/certificates/c1"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "certificate": sample_json("c1", "trust") })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Some("secret"));
        let cert = client.fetch_certificate("c1").await.unwrap();
        assert_eq!(cert.id, "c1");
        assert_eq!(cert.kind.as_str(), "trust");
    }

    #[tokio::test]
    async fn test_fetch_certificate_not_found_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/certificates/missing"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({ "message": "Certificate not found" })),
            )
            .mount(&server)
            .await;

        let err = client_for(&server, None)
            .fetch_certificate("missing")
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(err.server_message(), Some("Certificate not found"));
    }

    #[tokio::test]
    async fn test_fetch_certificates_forwards_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/certificates"))
            .and(query_param("type", "milestone"))
            .and(query_param("level", "gold"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "certificates": [sample_json("c1", "milestone")]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let filters = CertificateFilters::new()
            .with("type", "milestone")
            .with("level", "gold");
        let certs = client_for(&server, None)
            .fetch_certificates(&filters)
            .await
            .unwrap();
        assert_eq!(certs.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_certificates_without_filters_sends_no_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/certificates"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "certificates": [sample_json("c1", "milestone"), sample_json("c2", "growth")]
            })))
            .mount(&server)
            .await;

        let certs = client_for(&server, None)
            .fetch_certificates(&CertificateFilters::new())
            .await
            .unwrap();
        assert_eq!(certs.len(), 2);

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url.query(), None);
    }

    #[tokio::test]
    async fn test_fetch_relationship_certificates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/certificates/relationship/rel-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "certificates": [sample_json("c3", "anniversary")]
            })))
            .mount(&server)
            .await;

        let certs = client_for(&server, None)
            .fetch_relationship_certificates("rel-1")
            .await
            .unwrap();
        assert_eq!(certs[0].id, "c3");
    }

    #[tokio::test]
    async fn test_download_returns_raw_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/certificates/c1/download"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(b"%PDF-1.4 fake".to_vec(), "application/pdf"),
            )
            .mount(&server)
            .await;

        let bytes = client_for(&server, None)
            .download_certificate("c1")
            .await
            .unwrap();
        assert_eq!(bytes, b"%PDF-1.4 fake");
    }

    #[tokio::test]
    async fn test_share_posts_platform() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/certificates/c1/share"))
            .and(body_json(json!({ "platform": "mastodon" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "shareUrl": "https://app.example.com/s/abc" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let url = client_for(&server, None)
            .share_certificate("c1", &SharePlatform::parse("mastodon"))
            .await
            .unwrap();
        assert_eq!(url, "https://app.example.com/s/abc");
    }

    #[tokio::test]
    async fn test_share_sends_platform_verbatim() {
        let server = MockServer::start().await;
        for raw in ["X", " LinkedIn "] {
            Mock::given(method("POST"))
                .and(path("/api/certificates/c1/share"))
                .and(body_json(json!({ "platform": raw })))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(json!({ "shareUrl": "https://app.example.com/s/abc" })),
                )
                .expect(1)
                .mount(&server)
                .await;
        }

        let client = client_for(&server, None);
        for raw in ["X", " LinkedIn "] {
            client
                .share_certificate("c1", &SharePlatform::parse(raw))
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/certificates/c1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "cert": {} })))
            .mount(&server)
            .await;

        let err = client_for(&server, None)
            .fetch_certificate("c1")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Decode(_)));
        assert!(err.server_message().is_none());
    }

    #[tokio::test]
    async fn test_identifier_is_percent_encoded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/certificates/a%2Fb"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "certificate": sample_json("a/b", "growth") })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let cert = client_for(&server, None)
            .fetch_certificate("a/b")
            .await
            .unwrap();
        assert_eq!(cert.id, "a/b");
    }
}
