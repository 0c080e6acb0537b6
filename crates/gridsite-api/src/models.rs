// Wire types for the inventory Data API.
//
// The same `SiteFields` / `DeviceFields` structs are used for what the
// operator edits (forms, CSV import) and for what the server returns, so
// the two shapes cannot drift. Optional text attributes are plain `String`
// where empty means unset; a `null` from the server reads as `""`.
// Optional numbers are `Option<f64>` and are omitted from request bodies
// when unset.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};

// ── Serde helpers ───────────────────────────────────────────────────

fn null_as_empty<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(de)?.unwrap_or_default())
}

/// Audit timestamps arrive as RFC 3339 strings, `null`, or `""`.
fn lenient_timestamp<'de, D: Deserializer<'de>>(
    de: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    match Option::<String>::deserialize(de)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .parse::<DateTime<Utc>>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Device identifiers are strings in the contract but some servers emit integers.
fn string_or_number<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
    }

    Ok(match Raw::deserialize(de)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
    })
}

// ── Paging ──────────────────────────────────────────────────────────

/// A page of list results: `{count, next, previous, results}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

// ── Audit ───────────────────────────────────────────────────────────

/// Soft-delete flag, distinct from the domain "site status".
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
pub enum RecordStatus {
    #[default]
    Active,
    Inactive,
}

/// Server-maintained audit attributes shared by sites and devices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Audit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_by: Option<String>,
    #[serde(default)]
    pub record_status: RecordStatus,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

// ── Site ────────────────────────────────────────────────────────────

/// The 31 operator-editable site attributes, in import-template order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteFields {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub client: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub site_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub old_pe_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub fl_number: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub priority_status: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub project_owner: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub state: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub subzone: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub station_category: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub monitoring_type: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub gateway: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub circuit_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub caasdu: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub protocol: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub first_ioa: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub last_ioa: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub template: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub installation_date: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sim_card_termination_activity: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub rtu_status: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phase: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub site_status: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub loopback_ip: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub apn1: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub apn2: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<f64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub region: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub contract_no: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gps_lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gps_long: Option<f64>,
}

/// A site record as stored by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Server-assigned identity; absent until the record is created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub running_number: Option<u64>,
    #[serde(flatten)]
    pub fields: SiteFields,
    #[serde(flatten)]
    pub audit: Audit,
}

/// Request body for create / update: the editable fields plus the soft-delete flag.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SiteWrite<'a> {
    #[serde(flatten)]
    pub fields: &'a SiteFields,
    /// Sent on create only; updates leave the stored flag untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_status: Option<RecordStatus>,
}

// ── Device ──────────────────────────────────────────────────────────

/// Operator-editable device attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceFields {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub client: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub site_name: String,
    /// Link to the owning site, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_running_number: Option<u64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sim1_ip_address: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sim_iccid_sim1: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sim2_ip_address: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sim_iccid_sim2: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub psu_type: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub battery_dc: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub battery_brand_dc_converter_type: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub spd_brand: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub mcb_brand: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub rccb_brand: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub antenna_type_qty: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub antenna_supplier: String,
    #[serde(rename = "serialNumberVA", default, deserialize_with = "null_as_empty")]
    pub serial_number_va: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub enclosure_sn: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub relocated_sn_enclosure: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub relocated_enclosure_date: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub method_of_installation: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub type_of_enclosure: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub enclosure_installed_by: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub installer_team: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tnb_contract_no: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub serial_number_router: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub connectivity_type: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub breaker_type: String,
}

/// A device record as stored by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(flatten)]
    pub fields: DeviceFields,
    #[serde(flatten)]
    pub audit: Audit,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DeviceWrite<'a> {
    #[serde(flatten)]
    pub fields: &'a DeviceFields,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_status: Option<RecordStatus>,
}

// ── List queries ────────────────────────────────────────────────────

/// Server-side filter parameters for `GET /sites/`.
#[derive(Debug, Clone, Default)]
pub struct SiteQuery {
    pub search: Option<String>,
    pub client: Option<String>,
    pub state: Option<String>,
    pub status: Option<String>,
    pub page: Option<u32>,
}

impl SiteQuery {
    pub(crate) fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        push_param(&mut params, "search", self.search.as_ref());
        push_param(&mut params, "client", self.client.as_ref());
        push_param(&mut params, "state", self.state.as_ref());
        push_param(&mut params, "status", self.status.as_ref());
        push_param(&mut params, "page", self.page.as_ref());
        params
    }
}

/// Server-side filter parameters for `GET /devices/`.
#[derive(Debug, Clone, Default)]
pub struct DeviceQuery {
    pub search: Option<String>,
    pub client: Option<String>,
    pub connectivity_type: Option<String>,
    pub site_running_number: Option<u64>,
    pub page: Option<u32>,
}

impl DeviceQuery {
    /// Devices linked to one site.
    pub fn for_site(running_number: u64) -> Self {
        Self {
            site_running_number: Some(running_number),
            ..Self::default()
        }
    }

    pub(crate) fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        push_param(&mut params, "search", self.search.as_ref());
        push_param(&mut params, "client", self.client.as_ref());
        push_param(
            &mut params,
            "connectivity_type",
            self.connectivity_type.as_ref(),
        );
        push_param(
            &mut params,
            "site_running_number",
            self.site_running_number.as_ref(),
        );
        push_param(&mut params, "page", self.page.as_ref());
        params
    }
}

fn push_param<T: ToString>(
    params: &mut Vec<(&'static str, String)>,
    key: &'static str,
    value: Option<&T>,
) {
    if let Some(v) = value {
        params.push((key, v.to_string()));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn site_roundtrips_camel_case_wire_names() {
        let raw = json!({
            "id": 7,
            "runningNumber": 1001,
            "client": "TNB",
            "siteName": "Substation Alpha",
            "oldPeName": null,
            "priorityStatus": "PRIMARY",
            "state": "SELANGOR",
            "stationCategory": "PE",
            "monitoringType": "RTU",
            "status": "Production",
            "rtuStatus": "Commissioned",
            "siteStatus": "Active",
            "gpsLat": 3.139,
            "recordStatus": "Inactive",
            "createdAt": "2024-01-15T10:30:00Z",
            "updatedAt": ""
        });

        let site: Site = serde_json::from_value(raw).unwrap();
        assert_eq!(site.running_number, Some(1001));
        assert_eq!(site.fields.site_name, "Substation Alpha");
        assert_eq!(site.fields.old_pe_name, "");
        assert_eq!(site.fields.gps_lat, Some(3.139));
        assert_eq!(site.fields.pricing, None);
        assert_eq!(site.audit.record_status, RecordStatus::Inactive);
        assert!(site.audit.created_at.is_some());
        assert!(site.audit.updated_at.is_none());

        let out = serde_json::to_value(&site).unwrap();
        assert_eq!(out["siteName"], "Substation Alpha");
        assert_eq!(out["runningNumber"], 1001);
        assert!(out.get("pricing").is_none());
    }

    #[test]
    fn device_accepts_numeric_id_and_va_rename() {
        let raw = json!({
            "id": 42,
            "client": "TNB",
            "siteName": "Substation Beta",
            "siteRunningNumber": 1002,
            "serialNumberVA": "VA2024002",
            "connectivityType": "Cellular"
        });

        let device: Device = serde_json::from_value(raw).unwrap();
        assert_eq!(device.id, "42");
        assert_eq!(device.fields.serial_number_va, "VA2024002");
        assert_eq!(device.fields.site_running_number, Some(1002));
        assert_eq!(device.audit.record_status, RecordStatus::Active);
    }

    #[test]
    fn query_params_skip_unset_values() {
        let query = SiteQuery {
            client: Some("TNB".into()),
            page: Some(2),
            ..SiteQuery::default()
        };
        assert_eq!(
            query.to_params(),
            vec![("client", "TNB".to_owned()), ("page", "2".to_owned())]
        );

        let query = DeviceQuery::for_site(1001);
        assert_eq!(
            query.to_params(),
            vec![("site_running_number", "1001".to_owned())]
        );
    }
}
