pub mod cert;
pub mod cli;
pub mod service;
pub mod store;
pub mod utils;

// Re-export specific items to avoid conflicts
pub use cert::{Certificate, CertificateFilters, SharePlatform};
pub use service::{CertificateApi, CertificateClient, ServiceError};
pub use store::{CertificateStore, FileSaver, StoreError, StoreState};
pub use utils::{config, errors, paths};
