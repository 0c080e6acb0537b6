// gridsite-api: Async Rust client for the gridsite inventory Data API

pub mod client;
pub mod devices;
pub mod error;
pub mod models;
pub mod sites;
pub mod transport;

pub use client::ApiClient;
pub use error::Error;
pub use models::{
    Audit, Device, DeviceFields, DeviceQuery, Page, RecordStatus, Site, SiteFields, SiteQuery,
};
pub use transport::{TlsMode, TransportConfig};
