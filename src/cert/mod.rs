pub mod columns;
pub mod filters;
pub mod model;
pub mod platform;

pub use columns::CertificateColumn;
pub use filters::CertificateFilters;
pub use model::*;
pub use platform::SharePlatform;
