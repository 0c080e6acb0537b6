// ── Row mapper ──
//
// Pure conversion from a validated row to `SiteFields`. Text cells are
// copied (empty when the row is short); numeric cells are parsed and left
// unset when empty.

use super::schema::{SITE_COLUMNS, Slot, parse_number};
use super::validate::cell;
use crate::model::SiteFields;

/// Build the site record for one data row.
pub fn map_row(row: &[String]) -> SiteFields {
    let mut fields = SiteFields::default();

    for (i, column) in SITE_COLUMNS.iter().enumerate() {
        let raw = cell(row, i);
        match column.slot {
            Slot::Text { set, .. } => set(&mut fields, raw.to_owned()),
            Slot::Number { set, .. } => {
                let value = if raw.is_empty() {
                    None
                } else {
                    parse_number(raw)
                };
                set(&mut fields, value);
            }
        }
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn maps_positions_to_attributes() {
        let mut cells = vec![""; 31];
        cells[0] = "TNB";
        cells[1] = "Substation Alpha";
        cells[14] = "1000";
        cells[23] = "10.0.0.1";
        cells[26] = "1500.00";
        cells[29] = "3.1390";
        cells[30] = "101.6869";

        let fields = map_row(&row(&cells));
        assert_eq!(fields.client, "TNB");
        assert_eq!(fields.site_name, "Substation Alpha");
        assert_eq!(fields.first_ioa, "1000");
        assert_eq!(fields.loopback_ip, "10.0.0.1");
        assert_eq!(fields.pricing, Some(1500.0));
        assert_eq!(fields.gps_lat, Some(3.139));
        assert_eq!(fields.gps_long, Some(101.6869));
        assert_eq!(fields.old_pe_name, "");
    }

    #[test]
    fn empty_numbers_stay_unset() {
        let fields = map_row(&row(&["TNB", "Alpha"]));
        assert_eq!(fields.pricing, None);
        assert_eq!(fields.gps_lat, None);
        assert_eq!(fields.gps_long, None);
        assert_eq!(fields.contract_no, "");
    }

    #[test]
    fn mapping_is_deterministic() {
        let input = row(&["TNB", "Alpha", "", "FL9", "VVIP"]);
        assert_eq!(map_row(&input), map_row(&input));
    }
}
