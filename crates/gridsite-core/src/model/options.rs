//! Known choice values for enumerated site and device attributes.
//!
//! The forms accept only these values. The CSV importer does not check
//! membership; the server has the final word on stored values.

// ── Site ─────────────────────────────────────────────────────────────

pub const CLIENT: &[&str] = &["TNB", "Global"];

pub const PRIORITY_STATUS: &[&str] = &["-", "CC", "PRIMARY", "VVIP"];

pub const PROJECT_OWNER: &[&str] = &["DA", "DA-SBU AD", "DALCO", "RE / BIOGAS", "SBU AD", "TTOM"];

pub const STATE: &[&str] = &[
    "JOHOR",
    "JOHOR UTARA",
    "JOHOR SELATAN",
    "KEDAH",
    "KELANTAN",
    "MELAKA",
    "N. SEMBILAN",
    "PAHANG",
    "PERAK",
    "PERLIS",
    "P. PINANG",
    "SABAH",
    "SARAWAK",
    "SELANGOR",
    "TERENGGANU",
    "W.P. KUALA LUMPUR",
    "W.P. LABUAN",
    "W.P. PUTRAJAYA",
    "CYBERJAYA",
    "PUTRAJAYA",
];

pub const STATION_CATEGORY: &[&str] = &["PE", "PMU", "PPU", "SS", "SSU"];

pub const MONITORING_TYPE: &[&str] = &["CSU", "DISMANTLE", "FTU", "MRMU", "RMU", "RTU", "VCB"];

pub const GATEWAY: &[&str] = &[
    "CA01", "CA02", "CA03", "CA04", "CA05", "CB01", "CB02", "CB03", "CB04", "CB05", "NA01",
    "NA02", "NA03", "NA04", "NA05", "NA06", "NA07", "SA01", "SA02", "SA03", "SA04", "SA05",
    "SA06", "SA07",
];

pub const PROTOCOL: &[&str] = &["DNP3", "IEC101"];

pub const TEMPLATE: &[&str] = &["NEW", "OLD"];

pub const SIM_CARD_TERMINATION: &[&str] = &["-"];

pub const STATUS: &[&str] = &["DEC O&M-Live", "O&M-Live", "Pre-Production", "Production"];

pub const RTU_STATUS: &[&str] = &["Commissioned", "Non-Commissioned"];

pub const PHASE: &[&str] = &[
    "P1",
    "P10B3",
    "P3",
    "P4",
    "P5",
    "P5P2",
    "P6B1",
    "P7B1",
    "P7B2",
    "P7B3",
    "P7CF",
    "P8B1",
    "P8B2",
    "P9B1",
    "SBU AD",
    "TTOM 2023",
    "TTOM 2024",
];

pub const SITE_STATUS: &[&str] = &["Active", "Decommissioned (Pending Action)", "Relocated"];

pub const APN: &[&str] = &["-", "CELCOM", "DIGI", "MAXIS"];

pub const REGION: &[&str] = &["CENTRAL", "SOUTHERN", "NORTHERN", "EASTERN"];

pub const CONTRACT_NO: &[&str] = &["TNB-IT No. 4/2016", "TNB-IT No. 52/2019"];

// ── Device ───────────────────────────────────────────────────────────

pub const PSU_TYPE: &[&str] = &["EXICOM", "MEANWELL"];

pub const BATTERY_DC: &[&str] = &["Battery", "DC Converter"];

pub const BATTERY_BRAND_DC_CONVERTER_TYPE: &[&str] = &[
    "30 VDC",
    "ENERZELL",
    "EXCELL",
    "EnerZell",
    "GENESIS",
    "GP",
    "LEOCH",
    "LEOCH ",
    "SWICPOWER",
];

pub const SPD_BRAND: &[&str] = &["CHINT", "PHOENIX CONTACT"];

pub const MCB_BRAND: &[&str] = &["CHINT", "EPS", "HIMEL", "SCHNEIDER"];

pub const RCCB_BRAND: &[&str] = &["CHINT", "HIMEL", "SCHNEIDER", "SCHNEIDER (40A)"];

pub const ANTENNA_SUPPLIER: &[&str] = &["Nosairis"];

pub const METHOD_OF_INSTALLATION: &[&str] = &[
    "C81006/1287",
    "ROUTER INSIDE RTU RACK",
    "SSWM",
    "WM INSIDE PE",
    "WM INSIDE PMU",
    "WM INSIDE PPU",
    "WM INSIDE SSU",
    "WM OUTSIDE PE",
    "WM OUTSIDE PPU",
    "WM OUTSIDE SSU",
];

pub const TYPE_OF_ENCLOSURE: &[&str] = &["TO BE CONFIRMED"];

pub const ENCLOSURE_INSTALLED_BY: &[&str] = &["2023-07-29 00:00:00", "Nosairis", "TNB ICT"];

pub const INSTALLER_TEAM: &[&str] = &["ANO", "PRODATA", "Prodata", "SATRIA", "SWICHTEC", "Swichtec"];

pub const TNB_CONTRACT_NO: &[&str] = &[
    "TNB 1649/2020",
    "TNB-IT No. 24/2017",
    "TNB-IT No. 4/2016",
    "TNB-IT No. 52/2019",
];

pub const CONNECTIVITY_TYPE: &[&str] = &["Wired", "Cellular", "Both"];

pub const BREAKER_TYPE: &[&str] = &["CSU", "MRMU", "RMU", "VCB"];

/// Exact, case-sensitive membership.
pub fn is_known(options: &[&str], value: &str) -> bool {
    options.contains(&value)
}
