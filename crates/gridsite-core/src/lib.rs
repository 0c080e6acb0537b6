// gridsite-core: Import pipeline, list views and the inventory facade shared by the CLI.

pub mod config;
pub mod error;
pub mod export;
pub mod forms;
pub mod import;
pub mod inventory;
pub mod model;
pub mod query;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ApiConfig, TlsVerification};
pub use error::CoreError;
pub use import::{
    CommitOutcome, CommitReport, CommitStatus, ImportFailure, ImportReview, ImportSession,
    ImportState, RowError, SiteSink,
};
pub use inventory::Inventory;
pub use query::{DeviceFilter, PageView, SiteFilter, paginate};

// Re-export the wire model at the crate root for ergonomics.
pub use model::{
    Audit, Device, DeviceFields, DeviceQuery, Page, RecordStatus, Site, SiteFields, SiteQuery,
};
