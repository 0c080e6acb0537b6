// ── List views ──
//
// Filtering and paging over lists already fetched from the Data API.

pub mod filter;
pub mod paginate;

pub use filter::{DeviceFilter, SiteFilter, choice};
pub use paginate::{DEFAULT_PER_PAGE, PageView, paginate};
