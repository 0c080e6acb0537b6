// ── Row validator ──
//
// Checks one tokenized data row against the site schema. Every check runs;
// a row can report several problems at once. Malformed input always
// becomes a message, never a panic.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::schema::{Column, Rule, SITE_COLUMNS, parse_number};

static LOOSE_IPV4: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,3}\.){3}[0-9]{1,3}$").expect("invalid loopback IP regex")
});

/// One problem found in one data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// 1-based position among the data rows (the header is not counted).
    pub row: usize,
    /// Label of the offending column.
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row {}: {}", self.row, self.message)
    }
}

/// Trimmed cell at `index`, or `""` when the row is short.
pub(crate) fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map_or("", |s| s.trim())
}

/// Validate the data row at 0-based `index`.
///
/// Required columns are checked first, then numeric ranges, then the
/// loopback IP shape.
pub fn validate_row(row: &[String], index: usize) -> Vec<RowError> {
    let row_no = index + 1;
    let mut errors = Vec::new();

    let columns = || SITE_COLUMNS.iter().enumerate();

    for (i, column) in columns().filter(|(_, c)| c.required) {
        if cell(row, i).is_empty() {
            errors.push(RowError {
                row: row_no,
                field: column.label,
                message: format!("{} is required", column.label),
            });
        }
    }

    for (i, column) in columns() {
        if let Rule::Number { min, max, message } = column.rule {
            let raw = cell(row, i);
            if !raw.is_empty() && !in_range(raw, min, max) {
                errors.push(rule_error(row_no, column, message));
            }
        }
    }

    for (i, column) in columns().filter(|(_, c)| c.rule == Rule::LooseIpv4) {
        let raw = cell(row, i);
        if !raw.is_empty() && !LOOSE_IPV4.is_match(raw) {
            errors.push(rule_error(row_no, column, "Invalid IP address format"));
        }
    }

    errors
}

/// Loose dotted-quad check shared with the forms.
pub(crate) fn is_loose_ipv4(raw: &str) -> bool {
    LOOSE_IPV4.is_match(raw)
}

fn in_range(raw: &str, min: Option<f64>, max: Option<f64>) -> bool {
    parse_number(raw).is_some_and(|n| min.is_none_or(|lo| n >= lo) && max.is_none_or(|hi| n <= hi))
}

fn rule_error(row: usize, column: &Column, message: &str) -> RowError {
    RowError {
        row,
        field: column.label,
        message: message.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// A fully valid row modelled on the template sample.
    fn valid_row() -> Vec<String> {
        [
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
        ]
        .iter()
        .map(|s| (*s).to_owned())
        .collect()
    }

    fn with(index: usize, value: &str) -> Vec<String> {
        let mut row = valid_row();
        row[index] = value.to_owned();
        row
    }

    fn messages(row: &[String], index: usize) -> Vec<String> {
        validate_row(row, index)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn valid_row_has_no_errors() {
        assert!(validate_row(&valid_row(), 0).is_empty());
    }

    #[test]
    fn all_required_missing_yields_nine_errors() {
        let row = vec![String::new(); 31];
        assert_eq!(
            messages(&row, 4),
            vec![
                "Row 5: Client is required",
                "Row 5: Site Name is required",
                "Row 5: Priority Status is required",
                "Row 5: State is required",
                "Row 5: Station Category is required",
                "Row 5: Monitoring Type is required",
                "Row 5: Status is required",
                "Row 5: RTU Status is required",
                "Row 5: Site Status is required",
            ]
        );
    }

    #[test]
    fn short_row_reads_missing_columns_as_empty() {
        let row = vec!["TNB".to_owned(), "Site".to_owned()];
        let errors = validate_row(&row, 0);
        assert_eq!(errors.len(), 7);
        assert!(errors.iter().all(|e| e.message.ends_with("is required")));
    }

    #[test]
    fn whitespace_only_required_cell_is_missing() {
        assert_eq!(
            messages(&with(6, "   "), 1),
            vec!["Row 2: State is required"]
        );
    }

    #[test]
    fn latitude_boundaries() {
        for ok in ["-90", "90", "0", "3.139"] {
            assert!(validate_row(&with(29, ok), 0).is_empty(), "{ok} should pass");
        }
        for bad in ["-90.0001", "90.0001", "north", "NaN"] {
            assert_eq!(
                messages(&with(29, bad), 0),
                vec!["Row 1: GPS Latitude must be between -90 and 90"],
                "{bad} should fail"
            );
        }
    }

    #[test]
    fn longitude_boundaries() {
        for ok in ["-180", "180"] {
            assert!(validate_row(&with(30, ok), 0).is_empty(), "{ok} should pass");
        }
        for bad in ["-180.0001", "180.0001"] {
            assert_eq!(
                messages(&with(30, bad), 0),
                vec!["Row 1: GPS Longitude must be between -180 and 180"]
            );
        }
    }

    #[test]
    fn pricing_boundaries() {
        assert!(validate_row(&with(26, "0"), 0).is_empty());
        assert_eq!(
            messages(&with(26, "-0.01"), 0),
            vec!["Row 1: Pricing must be a valid positive number"]
        );
        assert_eq!(
            messages(&with(26, "cheap"), 0),
            vec!["Row 1: Pricing must be a valid positive number"]
        );
    }

    #[test]
    fn ip_shape() {
        assert!(validate_row(&with(23, "192.168.1.1"), 0).is_empty());
        assert!(validate_row(&with(23, "999.999.999.999"), 0).is_empty());
        for bad in ["192.168.1", "192.168.1.1.1", "abc.def.1.1", "1234.1.1.1"] {
            assert_eq!(
                messages(&with(23, bad), 0),
                vec!["Row 1: Invalid IP address format"],
                "{bad} should fail"
            );
        }
    }

    #[test]
    fn optional_cells_may_be_empty() {
        let mut row = valid_row();
        for i in [23, 26, 29, 30] {
            row[i].clear();
        }
        assert!(validate_row(&row, 0).is_empty());
    }

    #[test]
    fn checks_do_not_short_circuit() {
        let mut row = with(0, "");
        row[23] = "not-an-ip".into();
        row[26] = "-5".into();
        row[29] = "91".into();
        row[30] = "181".into();

        let errors = validate_row(&row, 2);
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["Client", "Pricing", "GPS Latitude", "GPS Longitude", "Loopback IP"]
        );
        assert!(errors.iter().all(|e| e.row == 3));
    }
}
