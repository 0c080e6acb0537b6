// ── Domain model ──
//
// Sites and devices are the wire types from gridsite-api; this module adds
// the known choice values for every enumerated attribute.

pub mod options;

pub use gridsite_api::models::{
    Audit, Device, DeviceFields, DeviceQuery, Page, RecordStatus, Site, SiteFields, SiteQuery,
};
