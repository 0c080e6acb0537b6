// ── Form validation ──
//
// Interactive create/edit forms are stricter than the CSV importer: every
// attribute is required, and enumerated attributes must be one of the
// known option values. Errors are keyed by wire field name, in form order,
// with at most one message per field.

use indexmap::IndexMap;

use crate::error::CoreError;
use crate::import::validate::is_loose_ipv4;
use crate::model::options;
use crate::model::{DeviceFields, SiteFields};

/// Field name -> message, in form order.
pub type FormErrors = IndexMap<&'static str, String>;

#[derive(Clone, Copy)]
enum Value<'a> {
    Text(&'a str, Option<&'static [&'static str]>),
    Number(Option<f64>),
}

struct Entry<'a> {
    key: &'static str,
    label: &'static str,
    value: Value<'a>,
}

const fn text<'a>(
    key: &'static str,
    label: &'static str,
    value: &'a str,
    choices: Option<&'static [&'static str]>,
) -> Entry<'a> {
    Entry {
        key,
        label,
        value: Value::Text(value, choices),
    }
}

const fn number(key: &'static str, label: &'static str, value: Option<f64>) -> Entry<'static> {
    Entry {
        key,
        label,
        value: Value::Number(value),
    }
}

/// Required and option-membership checks shared by both forms.
fn check_entries(entries: &[Entry<'_>]) -> FormErrors {
    let mut errors = FormErrors::new();
    for entry in entries {
        match entry.value {
            Value::Text(v, choices) => {
                let v = v.trim();
                if v.is_empty() {
                    errors.insert(entry.key, format!("{} is required", entry.label));
                } else if let Some(choices) = choices.filter(|c| !options::is_known(c, v)) {
                    errors.insert(
                        entry.key,
                        format!("{} must be one of: {}", entry.label, choices.join(", ")),
                    );
                }
            }
            Value::Number(None) => {
                errors.insert(entry.key, format!("{} is required", entry.label));
            }
            Value::Number(Some(_)) => {}
        }
    }
    errors
}

fn site_entries(s: &SiteFields) -> [Entry<'_>; 31] {
    use options as o;
    [
        text("client", "Client", &s.client, Some(o::CLIENT)),
        text("siteName", "Site Name", &s.site_name, None),
        text("oldPeName", "Old PE Name", &s.old_pe_name, None),
        text("flNumber", "FL Number", &s.fl_number, None),
        text("priorityStatus", "Priority Status", &s.priority_status, Some(o::PRIORITY_STATUS)),
        text("projectOwner", "Project Owner", &s.project_owner, Some(o::PROJECT_OWNER)),
        text("state", "State", &s.state, Some(o::STATE)),
        text("subzone", "Subzone", &s.subzone, None),
        text("stationCategory", "Station Category", &s.station_category, Some(o::STATION_CATEGORY)),
        text("monitoringType", "Monitoring Type", &s.monitoring_type, Some(o::MONITORING_TYPE)),
        text("gateway", "Gateway", &s.gateway, Some(o::GATEWAY)),
        text("circuitId", "Circuit ID", &s.circuit_id, None),
        text("caasdu", "CAASDU", &s.caasdu, None),
        text("protocol", "Protocol", &s.protocol, Some(o::PROTOCOL)),
        text("firstIoa", "First IOA", &s.first_ioa, None),
        text("lastIoa", "Last IOA", &s.last_ioa, None),
        text("template", "Template", &s.template, Some(o::TEMPLATE)),
        text("installationDate", "Installation Date", &s.installation_date, None),
        text(
            "simCardTerminationActivity",
            "SIM Card Termination Activity",
            &s.sim_card_termination_activity,
            Some(o::SIM_CARD_TERMINATION),
        ),
        text("status", "Status", &s.status, Some(o::STATUS)),
        text("rtuStatus", "RTU Status", &s.rtu_status, Some(o::RTU_STATUS)),
        text("phase", "Phase", &s.phase, Some(o::PHASE)),
        text("siteStatus", "Site Status", &s.site_status, Some(o::SITE_STATUS)),
        text("loopbackIp", "Loopback IP", &s.loopback_ip, None),
        text("apn1", "APN1", &s.apn1, Some(o::APN)),
        text("apn2", "APN2", &s.apn2, Some(o::APN)),
        number("pricing", "Pricing", s.pricing),
        text("region", "Region", &s.region, Some(o::REGION)),
        text("contractNo", "Contract No", &s.contract_no, Some(o::CONTRACT_NO)),
        number("gpsLat", "GPS Latitude", s.gps_lat),
        number("gpsLong", "GPS Longitude", s.gps_long),
    ]
}

fn device_entries(d: &DeviceFields) -> [Entry<'_>; 26] {
    use options as o;
    [
        text("client", "Client", &d.client, Some(o::CLIENT)),
        text("siteName", "Site Name", &d.site_name, None),
        text("sim1IpAddress", "SIM 1 IP Address", &d.sim1_ip_address, None),
        text("simIccidSim1", "SIM ICCID (SIM 1)", &d.sim_iccid_sim1, None),
        text("sim2IpAddress", "SIM 2 IP Address", &d.sim2_ip_address, None),
        text("simIccidSim2", "SIM ICCID (SIM 2)", &d.sim_iccid_sim2, None),
        text("psuType", "PSU Type", &d.psu_type, Some(o::PSU_TYPE)),
        text("batteryDc", "Battery DC", &d.battery_dc, Some(o::BATTERY_DC)),
        text(
            "batteryBrandDcConverterType",
            "Battery Brand DC Converter Type",
            &d.battery_brand_dc_converter_type,
            Some(o::BATTERY_BRAND_DC_CONVERTER_TYPE),
        ),
        text("spdBrand", "SPD Brand", &d.spd_brand, Some(o::SPD_BRAND)),
        text("mcbBrand", "MCB Brand", &d.mcb_brand, Some(o::MCB_BRAND)),
        text("rccbBrand", "RCCB Brand", &d.rccb_brand, Some(o::RCCB_BRAND)),
        text("antennaTypeQty", "Antenna Type Qty", &d.antenna_type_qty, None),
        text("antennaSupplier", "Antenna Supplier", &d.antenna_supplier, Some(o::ANTENNA_SUPPLIER)),
        text("serialNumberVA", "Serial Number VA", &d.serial_number_va, None),
        text("enclosureSn", "Enclosure SN", &d.enclosure_sn, None),
        text("relocatedSnEnclosure", "Relocated SN Enclosure", &d.relocated_sn_enclosure, None),
        text(
            "relocatedEnclosureDate",
            "Relocated Enclosure Date",
            &d.relocated_enclosure_date,
            None,
        ),
        text(
            "methodOfInstallation",
            "Method of Installation",
            &d.method_of_installation,
            Some(o::METHOD_OF_INSTALLATION),
        ),
        text("typeOfEnclosure", "Type of Enclosure", &d.type_of_enclosure, Some(o::TYPE_OF_ENCLOSURE)),
        text(
            "enclosureInstalledBy",
            "Enclosure Installed By",
            &d.enclosure_installed_by,
            Some(o::ENCLOSURE_INSTALLED_BY),
        ),
        text("installerTeam", "Installer Team", &d.installer_team, Some(o::INSTALLER_TEAM)),
        text("tnbContractNo", "TNB Contract No", &d.tnb_contract_no, Some(o::TNB_CONTRACT_NO)),
        text("serialNumberRouter", "Serial Number Router", &d.serial_number_router, None),
        text("connectivityType", "Connectivity Type", &d.connectivity_type, Some(o::CONNECTIVITY_TYPE)),
        text("breakerType", "Breaker Type", &d.breaker_type, Some(o::BREAKER_TYPE)),
    ]
}

/// Validate a site create/edit form.
pub fn validate_site_form(site: &SiteFields) -> FormErrors {
    let mut errors = check_entries(&site_entries(site));

    if site.pricing.is_some_and(|p| !p.is_finite() || p < 0.0) {
        errors.insert("pricing", "Pricing must be a valid positive number".into());
    }
    if site
        .gps_lat
        .is_some_and(|v| !(-90.0..=90.0).contains(&v))
    {
        errors.insert("gpsLat", "GPS Latitude must be between -90 and 90".into());
    }
    if site
        .gps_long
        .is_some_and(|v| !(-180.0..=180.0).contains(&v))
    {
        errors.insert("gpsLong", "GPS Longitude must be between -180 and 180".into());
    }
    let ip = site.loopback_ip.trim();
    if !ip.is_empty() && !is_loose_ipv4(ip) {
        errors.insert("loopbackIp", "Invalid IP address format".into());
    }

    errors
}

/// Validate a device create/edit form.
pub fn validate_device_form(device: &DeviceFields) -> FormErrors {
    check_entries(&device_entries(device))
}

/// Turn a non-empty error map into [`CoreError::Invalid`].
pub fn into_result(errors: FormErrors) -> Result<(), CoreError> {
    if errors.is_empty() {
        return Ok(());
    }
    Err(CoreError::Invalid {
        fields: errors
            .into_iter()
            .map(|(k, v)| (k.to_owned(), vec![v]))
            .collect(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn complete_site() -> SiteFields {
        SiteFields {
            client: "TNB".into(),
            site_name: "Substation Alpha".into(),
            old_pe_name: "PE-OLD-1".into(),
            fl_number: "FL001".into(),
            priority_status: "PRIMARY".into(),
            project_owner: "DA".into(),
            state: "SELANGOR".into(),
            subzone: "Zone A".into(),
            station_category: "PE".into(),
            monitoring_type: "RTU".into(),
            gateway: "CA01".into(),
            circuit_id: "CID001".into(),
            caasdu: "CA-1".into(),
            protocol: "DNP3".into(),
            first_ioa: "1000".into(),
            last_ioa: "1100".into(),
            template: "NEW".into(),
            installation_date: "2024-01-15".into(),
            sim_card_termination_activity: "-".into(),
            status: "Production".into(),
            rtu_status: "Commissioned".into(),
            phase: "P1".into(),
            site_status: "Active".into(),
            loopback_ip: "192.168.1.1".into(),
            apn1: "CELCOM".into(),
            apn2: "DIGI".into(),
            pricing: Some(1500.0),
            region: "CENTRAL".into(),
            contract_no: "TNB-IT No. 4/2016".into(),
            gps_lat: Some(3.139),
            gps_long: Some(101.6869),
        }
    }

    #[test]
    fn complete_site_passes() {
        assert!(validate_site_form(&complete_site()).is_empty());
        assert!(into_result(validate_site_form(&complete_site())).is_ok());
    }

    #[test]
    fn empty_site_reports_every_field_in_order() {
        let errors = validate_site_form(&SiteFields::default());
        assert_eq!(errors.len(), 31);
        assert_eq!(errors.get_index(0).unwrap(), (&"client", &"Client is required".to_owned()));
        assert_eq!(errors["oldPeName"], "Old PE Name is required");
        assert_eq!(errors["apn1"], "APN1 is required");
        assert_eq!(errors["firstIoa"], "First IOA is required");
        assert_eq!(
            errors["simCardTerminationActivity"],
            "SIM Card Termination Activity is required"
        );
        assert_eq!(errors["gpsLat"], "GPS Latitude is required");
    }

    #[test]
    fn range_and_ip_checks() {
        let site = SiteFields {
            pricing: Some(-1.0),
            gps_lat: Some(90.5),
            gps_long: Some(-180.0),
            loopback_ip: "10.0.0".into(),
            ..complete_site()
        };
        let errors = validate_site_form(&site);
        assert_eq!(
            errors.keys().copied().collect::<Vec<_>>(),
            vec!["pricing", "gpsLat", "loopbackIp"]
        );
        assert_eq!(errors["pricing"], "Pricing must be a valid positive number");
        assert_eq!(errors["loopbackIp"], "Invalid IP address format");
    }

    #[test]
    fn unknown_option_is_rejected() {
        let site = SiteFields {
            state: "ATLANTIS".into(),
            ..complete_site()
        };
        let errors = validate_site_form(&site);
        assert_eq!(errors.len(), 1);
        assert!(errors["state"].starts_with("State must be one of: JOHOR, "));
    }

    #[test]
    fn device_form_messages() {
        let errors = validate_device_form(&DeviceFields::default());
        assert_eq!(errors.len(), 26);
        assert_eq!(errors["sim1IpAddress"], "SIM 1 IP Address is required");
        assert_eq!(errors["simIccidSim1"], "SIM ICCID (SIM 1) is required");
        assert_eq!(errors["batteryDc"], "Battery DC is required");
        assert_eq!(
            errors["batteryBrandDcConverterType"],
            "Battery Brand DC Converter Type is required"
        );

        let err = into_result(errors).unwrap_err();
        assert!(err.to_string().starts_with("Validation failed: client: Client is required; "));
    }
}
