// ── Site import schema ──
//
// One ordered table describes the 31-column site template: header text,
// the label used in error messages, whether the column is required, how
// its value is checked, and which `SiteFields` attribute it fills. The
// validator, mapper, template writer and export all read this table.

use crate::model::SiteFields;

/// Value check applied to a non-empty cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    /// Copied verbatim.
    Text,
    /// Must parse as a finite number within the inclusive bounds.
    Number {
        min: Option<f64>,
        max: Option<f64>,
        message: &'static str,
    },
    /// Four dot-separated groups of 1–3 ASCII digits. Groups are not
    /// bounded to 0–255.
    LooseIpv4,
}

/// Where a column's value lives on [`SiteFields`].
#[derive(Clone, Copy)]
pub enum Slot {
    Text {
        get: fn(&SiteFields) -> &str,
        set: fn(&mut SiteFields, String),
    },
    Number {
        get: fn(&SiteFields) -> Option<f64>,
        set: fn(&mut SiteFields, Option<f64>),
    },
}

impl std::fmt::Debug for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text { .. } => f.write_str("Slot::Text"),
            Self::Number { .. } => f.write_str("Slot::Number"),
        }
    }
}

/// One template column.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub header: &'static str,
    /// Field name used in `<label> is required`.
    pub label: &'static str,
    pub required: bool,
    pub rule: Rule,
    pub slot: Slot,
}

impl Column {
    /// Render this column's value from a record, for export.
    pub fn render(&self, fields: &SiteFields) -> String {
        match self.slot {
            Slot::Text { get, .. } => get(fields).to_owned(),
            Slot::Number { get, .. } => get(fields).map(|n| n.to_string()).unwrap_or_default(),
        }
    }
}

macro_rules! text {
    ($field:ident) => {
        Slot::Text {
            get: |s| s.$field.as_str(),
            set: |s, v| s.$field = v,
        }
    };
}

macro_rules! number {
    ($field:ident) => {
        Slot::Number {
            get: |s| s.$field,
            set: |s, v| s.$field = v,
        }
    };
}

const fn col(header: &'static str, label: &'static str, required: bool, slot: Slot) -> Column {
    Column {
        header,
        label,
        required,
        rule: Rule::Text,
        slot,
    }
}

pub const COLUMN_COUNT: usize = 31;

pub const PRICING: usize = 26;
pub const GPS_LAT: usize = 29;
pub const GPS_LONG: usize = 30;
pub const LOOPBACK_IP: usize = 23;

/// The site template, in column order.
pub static SITE_COLUMNS: [Column; COLUMN_COUNT] = [
    col("Client", "Client", true, text!(client)),
    col("Site Name", "Site Name", true, text!(site_name)),
    col("Old PE Name", "Old PE Name", false, text!(old_pe_name)),
    col("FL Number", "FL Number", false, text!(fl_number)),
    col("Priority Status", "Priority Status", true, text!(priority_status)),
    col("Project Owner", "Project Owner", false, text!(project_owner)),
    col("State", "State", true, text!(state)),
    col("Subzone", "Subzone", false, text!(subzone)),
    col("Station Category", "Station Category", true, text!(station_category)),
    col("Monitoring Type", "Monitoring Type", true, text!(monitoring_type)),
    col("Gateway", "Gateway", false, text!(gateway)),
    col("Circuit ID", "Circuit ID", false, text!(circuit_id)),
    col("CAASDU", "CAASDU", false, text!(caasdu)),
    col("Protocol", "Protocol", false, text!(protocol)),
    col("1st IOA", "1st IOA", false, text!(first_ioa)),
    col("Last IOA", "Last IOA", false, text!(last_ioa)),
    col("Template", "Template", false, text!(template)),
    col("Installation Date", "Installation Date", false, text!(installation_date)),
    col(
        "Sim Card Termination Activity",
        "Sim Card Termination Activity",
        false,
        text!(sim_card_termination_activity),
    ),
    col("Status", "Status", true, text!(status)),
    col("RTU Status", "RTU Status", true, text!(rtu_status)),
    col("Phase", "Phase", false, text!(phase)),
    col("Site Status", "Site Status", true, text!(site_status)),
    Column {
        header: "Loopback IP",
        label: "Loopback IP",
        required: false,
        rule: Rule::LooseIpv4,
        slot: text!(loopback_ip),
    },
    col("APN 1", "APN 1", false, text!(apn1)),
    col("APN 2", "APN 2", false, text!(apn2)),
    Column {
        header: "Pricing",
        label: "Pricing",
        required: false,
        rule: Rule::Number {
            min: Some(0.0),
            max: None,
            message: "Pricing must be a valid positive number",
        },
        slot: number!(pricing),
    },
    col("Region", "Region", false, text!(region)),
    col("Contract No", "Contract No", false, text!(contract_no)),
    Column {
        header: "GPS Lat",
        label: "GPS Latitude",
        required: false,
        rule: Rule::Number {
            min: Some(-90.0),
            max: Some(90.0),
            message: "GPS Latitude must be between -90 and 90",
        },
        slot: number!(gps_lat),
    },
    Column {
        header: "GPS Long",
        label: "GPS Longitude",
        required: false,
        rule: Rule::Number {
            min: Some(-180.0),
            max: Some(180.0),
            message: "GPS Longitude must be between -180 and 180",
        },
        slot: number!(gps_long),
    },
];

/// Template header row.
pub fn headers() -> impl Iterator<Item = &'static str> {
    SITE_COLUMNS.iter().map(|c| c.header)
}

/// Parse a cell as a finite number.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}
