// ── CSV export ──
//
// Site export: "Running Number" followed by the 31 template columns, one
// row per site. Written with the csv crate, so cells containing commas or
// quotes are quoted and read back by the import tokenizer.

use std::io::Write;

use crate::error::CoreError;
use crate::import::schema::{SITE_COLUMNS, headers};
use crate::model::Site;

pub const RUNNING_NUMBER_HEADER: &str = "Running Number";

pub(crate) fn csv_error(what: &str, err: impl std::fmt::Display) -> CoreError {
    CoreError::Output {
        what: what.to_owned(),
        reason: err.to_string(),
    }
}

/// Write `sites` as CSV to `out`.
pub fn export_sites<W: Write>(sites: &[Site], out: W) -> Result<(), CoreError> {
    let mut wtr = csv::Writer::from_writer(out);

    let mut header = vec![RUNNING_NUMBER_HEADER];
    header.extend(headers());
    wtr.write_record(&header)
        .map_err(|e| csv_error("site export", e))?;

    for site in sites {
        let mut row = Vec::with_capacity(SITE_COLUMNS.len() + 1);
        row.push(
            site.running_number
                .map(|n| n.to_string())
                .unwrap_or_default(),
        );
        row.extend(SITE_COLUMNS.iter().map(|c| c.render(&site.fields)));
        wtr.write_record(&row)
            .map_err(|e| csv_error("site export", e))?;
    }

    wtr.flush().map_err(|e| csv_error("site export", e))?;
    Ok(())
}
