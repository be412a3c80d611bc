pub mod certificate_store;
pub mod download;
pub mod state;

pub use certificate_store::CertificateStore;
pub use download::{download_file_name, DownloadSink, FileSaver, TransientHandle};
pub use state::{Operation, StoreError, StoreState};
