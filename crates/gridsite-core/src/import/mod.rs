// ── CSV bulk import ──
//
// tokenizer -> validator -> mapper, driven by `ImportSession`.

pub mod mapper;
pub mod schema;
pub mod session;
pub mod template;
pub mod tokenizer;
pub mod validate;

pub use mapper::map_row;
pub use schema::{Column, Rule, SITE_COLUMNS};
pub use session::{
    CommitOutcome, CommitReport, CommitStatus, ERROR_DISPLAY_LIMIT, ImportFailure, ImportReview,
    ImportSession, ImportState, SiteSink,
};
pub use template::write_template;
pub use tokenizer::tokenize;
pub use validate::{RowError, validate_row};
