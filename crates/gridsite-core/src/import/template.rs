// Downloadable import template: the 31 headers and one sample row.

use std::io::Write;

use super::schema::{COLUMN_COUNT, headers};
use crate::error::CoreError;
use crate::export::csv_error;

pub const TEMPLATE_FILE_NAME: &str = "sites-import-template.csv";

/// The sample row, in column order.
pub const SAMPLE_ROW: [&str; COLUMN_COUNT] = [
    "TNB",
    "Sample Site 1",
    "",
    "FL001",
    "PRIMARY",
    "DA",
    "SELANGOR",
    "Zone A",
    "PE",
    "RTU",
    "CA01",
    "CID001",
    "",
    "DNP3",
    "1000",
    "1100",
    "NEW",
    "2024-01-15",
    "-",
    "Production",
    "Commissioned",
    "P1",
    "Active",
    "192.168.1.1",
    "CELCOM",
    "DIGI",
    "1500.00",
    "CENTRAL",
    "TNB-IT No. 4/2016",
    "3.1390",
    "101.6869",
];

/// Write the template to `out`.
pub fn write_template<W: Write>(out: W) -> Result<(), CoreError> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(headers())
        .map_err(|e| csv_error("import template", e))?;
    wtr.write_record(SAMPLE_ROW)
        .map_err(|e| csv_error("import template", e))?;
    wtr.flush().map_err(|e| csv_error("import template", e))?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::import::ImportReview;

    #[test]
    fn template_sample_imports_cleanly() {
        let mut buf = Vec::new();
        write_template(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("Client,Site Name,Old PE Name,FL Number,"));

        let review = ImportReview::from_text(&text).unwrap();
        assert!(review.is_clean(), "{:?}", review.errors);
        assert_eq!(review.preview.len(), 1);
        assert_eq!(review.preview[0].site_name, "Sample Site 1");
        assert_eq!(review.preview[0].gps_long, Some(101.6869));
    }
}
