use crate::cert::{Certificate, CertificateFilters, SharePlatform};
use crate::service::{CertificateApi, ServiceError};
use crate::store::download::{DownloadSink, FileSaver};
use crate::store::state::{Operation, StoreError, StoreState};
use parking_lot::RwLock;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Shared certificate cache and request coordinator.
///
/// `is_loading` and `error` are shared by every operation. Requests are neither
/// queued nor cancelled: each one writes the shared fields when it completes, so the
/// last request to *finish* decides the final state, whichever was issued first.
/// Wrap the store in an `Arc` to hand it to several consumers.
pub struct CertificateStore<A, S = FileSaver> {
    api: A,
    sink: S,
    state: RwLock<StoreState>,
}

impl<A, S> CertificateStore<A, S>
where
    A: CertificateApi,
    S: DownloadSink,
{
    pub fn new(api: A, sink: S) -> Self {
        Self {
            api,
            sink,
            state: RwLock::new(StoreState::default()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consistent copy of the whole state
    pub fn snapshot(&self) -> StoreState {
        self.state.read().clone()
    }

    pub fn certificate(&self) -> Option<Certificate> {
        self.state.read().certificate.clone()
    }

    pub fn certificates(&self) -> Vec<Certificate> {
        self.state.read().certificates.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().is_loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    /// Fetch one certificate and cache it as `certificate`
    pub async fn get_certificate(&self, id: &str) -> StoreResult<Certificate> {
        self.begin(Operation::GetCertificate);

        match self.api.fetch_certificate(id).await {
            Ok(certificate) => {
                let mut state = self.state.write();
                state.is_loading = false;
                state.certificate = Some(certificate.clone());
                Ok(certificate)
            }
            Err(e) => Err(self.fail(Operation::GetCertificate, &e)),
        }
    }

    /// Fetch the collection matching `filters`, forwarded as-is to the service.
    /// Empty filters fetch everything visible to the session.
    pub async fn fetch_all_certificates(
        &self,
        filters: &CertificateFilters,
    ) -> StoreResult<Vec<Certificate>> {
        self.begin(Operation::FetchAllCertificates);

        let result = self.api.fetch_certificates(filters).await;
        self.settle_collection(Operation::FetchAllCertificates, result)
    }

    /// Fetch the certificates of one relationship
    pub async fn get_certificates(&self, relationship_id: &str) -> StoreResult<Vec<Certificate>> {
        self.begin(Operation::GetCertificates);

        let result = self
            .api
            .fetch_relationship_certificates(relationship_id)
            .await;
        self.settle_collection(Operation::GetCertificates, result)
    }

    /// Download a certificate's document and hand it to the download sink.
    /// The cache is left alone; the server-side download counter shows up on the next fetch.
    pub async fn download_certificate(&self, id: &str) -> StoreResult<()> {
        self.begin(Operation::DownloadCertificate);

        let bytes = match self.api.download_certificate(id).await {
            Ok(bytes) => bytes,
            Err(e) => return Err(self.fail(Operation::DownloadCertificate, &e)),
        };

        match self.sink.save(id, bytes).await {
            Ok(path) => {
                tracing::debug!("Certificate {} saved to {}", id, path.display());
                self.state.write().is_loading = false;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Saving certificate {} failed: {}", id, e);
                Err(self.settle_error(StoreError::new(Operation::DownloadCertificate, None)))
            }
        }
    }

    /// Ask the service for a share URL for `platform`. The platform is not validated.
    pub async fn share_certificate(
        &self,
        id: &str,
        platform: &SharePlatform,
    ) -> StoreResult<String> {
        self.begin(Operation::ShareCertificate);

        match self.api.share_certificate(id, platform).await {
            Ok(share_url) => {
                self.state.write().is_loading = false;
                tracing::info!("Shared certificate {} to {}", id, platform);
                Ok(share_url)
            }
            Err(e) => Err(self.fail(Operation::ShareCertificate, &e)),
        }
    }

    pub fn clear_error(&self) {
        self.state.write().error = None;
    }

    pub fn clear_certificate(&self) {
        self.state.write().certificate = None;
    }

    /// Back to the freshly constructed state
    pub fn reset(&self) {
        *self.state.write() = StoreState::default();
    }

    fn begin(&self, operation: Operation) {
        tracing::debug!("Starting {}", operation);
        let mut state = self.state.write();
        state.is_loading = true;
        state.error = None;
    }

    fn settle_collection(
        &self,
        operation: Operation,
        result: Result<Vec<Certificate>, ServiceError>,
    ) -> StoreResult<Vec<Certificate>> {
        match result {
            Ok(certificates) => {
                tracing::debug!("{} returned {} certificates", operation, certificates.len());
                let mut state = self.state.write();
                state.is_loading = false;
                state.certificates = certificates.clone();
                Ok(certificates)
            }
            Err(e) => Err(self.fail(operation, &e)),
        }
    }

    fn fail(&self, operation: Operation, error: &ServiceError) -> StoreError {
        tracing::warn!("{} failed: {}", operation, error);
        self.settle_error(StoreError::new(operation, error.server_message()))
    }

    fn settle_error(&self, error: StoreError) -> StoreError {
        let mut state = self.state.write();
        state.is_loading = false;
        state.error = Some(error.message.clone());
        error
    }
}
