pub mod api;
pub mod client;
pub mod error;

pub use api::{ApiResult, CertificateApi};
pub use client::CertificateClient;
pub use error::ServiceError;

use reqwest::Client;
use std::time::Duration;

/// Create the HTTP client used for every certificate service call
pub fn create_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .use_rustls_tls() // Use rustls with system certificate store
        .user_agent(concat!("relcert/", env!("CARGO_PKG_VERSION")))
        .build()
}
