//! Device command handlers.

use tabled::Tabled;

use gridsite_core::forms::{into_result, validate_device_form};
use gridsite_core::query::choice;
use gridsite_core::{Device, DeviceFields, DeviceFilter, Inventory};

use crate::cli::{DevicesArgs, DevicesCommand, GlobalOpts};
use crate::config::Presentation;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Site")]
    site: String,
    #[tabled(rename = "Client")]
    client: String,
    #[tabled(rename = "Serial (VA)")]
    serial_va: String,
    #[tabled(rename = "Router Serial")]
    serial_router: String,
    #[tabled(rename = "Connectivity")]
    connectivity: String,
}

impl From<&Device> for DeviceRow {
    fn from(d: &Device) -> Self {
        Self {
            id: d.id.clone(),
            site: d.fields.site_name.clone(),
            client: d.fields.client.clone(),
            serial_va: d.fields.serial_number_va.clone(),
            serial_router: d.fields.serial_number_router.clone(),
            connectivity: d.fields.connectivity_type.clone(),
        }
    }
}

/// Device table for embedding in other views.
pub(super) fn table(devices: &[Device]) -> String {
    let rows: Vec<DeviceRow> = devices.iter().map(DeviceRow::from).collect();
    output::render_table(&rows)
}

fn detail(d: &Device) -> String {
    let f = &d.fields;
    let site = f
        .site_running_number
        .map_or_else(|| f.site_name.clone(), |n| format!("{} (#{n})", f.site_name));
    [
        ("ID", d.id.clone()),
        ("Site", site),
        ("Client", f.client.clone()),
        ("SIM1 IP Address", f.sim1_ip_address.clone()),
        ("SIM1 ICCID", f.sim_iccid_sim1.clone()),
        ("SIM2 IP Address", f.sim2_ip_address.clone()),
        ("SIM2 ICCID", f.sim_iccid_sim2.clone()),
        ("PSU Type", f.psu_type.clone()),
        ("Battery DC", f.battery_dc.clone()),
        ("DC Converter", f.battery_brand_dc_converter_type.clone()),
        ("SPD Brand", f.spd_brand.clone()),
        ("MCB Brand", f.mcb_brand.clone()),
        ("RCCB Brand", f.rccb_brand.clone()),
        ("Antenna Type/Qty", f.antenna_type_qty.clone()),
        ("Antenna Supplier", f.antenna_supplier.clone()),
        ("Serial Number (VA)", f.serial_number_va.clone()),
        ("Enclosure SN", f.enclosure_sn.clone()),
        ("Relocated Enclosure SN", f.relocated_sn_enclosure.clone()),
        ("Relocated Enclosure Date", f.relocated_enclosure_date.clone()),
        ("Method of Installation", f.method_of_installation.clone()),
        ("Type of Enclosure", f.type_of_enclosure.clone()),
        ("Enclosure Installed By", f.enclosure_installed_by.clone()),
        ("Installer Team", f.installer_team.clone()),
        ("TNB Contract No", f.tnb_contract_no.clone()),
        ("Router Serial", f.serial_number_router.clone()),
        ("Connectivity Type", f.connectivity_type.clone()),
        ("Breaker Type", f.breaker_type.clone()),
        ("Record Status", d.audit.record_status.to_string()),
    ]
    .iter()
    .map(|(label, value)| {
        let value = if value.is_empty() { "-" } else { value.as_str() };
        format!("{label:<24}  {value}")
    })
    .collect::<Vec<_>>()
    .join("\n")
}

fn checked(fields: DeviceFields) -> Result<DeviceFields, CliError> {
    into_result(validate_device_form(&fields))?;
    Ok(fields)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    inventory: &Inventory,
    args: DevicesArgs,
    global: &GlobalOpts,
    view: &Presentation,
) -> Result<(), CliError> {
    match args.command {
        DevicesCommand::List {
            search,
            client,
            connectivity_type,
            site,
            paging,
        } => {
            let filter = DeviceFilter {
                search: search.unwrap_or_default(),
                client: choice(client.as_deref()),
                connectivity_type: choice(connectivity_type.as_deref()),
            };
            let devices = match site {
                Some(running_number) => {
                    let linked = inventory.site_devices(running_number).await?;
                    filter.apply(linked)
                }
                None => inventory.devices(&filter).await?,
            };
            let page = util::page_of(devices, &paging, view.page_size);

            let out = output::render_list(
                view.output,
                &page.items,
                |d| DeviceRow::from(d),
                |d| d.id.clone(),
            );
            output::print_output(&out, global.quiet);
            output::note(&util::page_footer(&page), global.quiet);
            Ok(())
        }

        DevicesCommand::Get { device } => {
            let found = inventory.device(&device).await?;
            let out = output::render_single(view.output, &found, detail, |d| d.id.clone());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Create { from_file } => {
            let fields = checked(util::read_json_file(&from_file)?)?;
            let created = inventory.create_device(&fields).await?;
            output::note(&format!("Device {} created", created.id), global.quiet);
            Ok(())
        }

        DevicesCommand::Update { device, from_file } => {
            let fields = checked(util::read_json_file(&from_file)?)?;
            inventory.update_device(&device, &fields).await?;
            output::note(&format!("Device {device} updated"), global.quiet);
            Ok(())
        }

        DevicesCommand::Delete { device } => {
            if !util::confirm(
                &format!("Delete device {device}? This is destructive."),
                global.yes,
            )? {
                return Ok(());
            }
            inventory.delete_device(&device).await?;
            output::note(&format!("Device {device} deleted"), global.quiet);
            Ok(())
        }

        DevicesCommand::Stats => {
            let stats = inventory.device_stats().await?;
            let out = output::render_single(
                view.output,
                &stats,
                |v| serde_json::to_string_pretty(v).unwrap_or_default(),
                ToString::to_string,
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Clients => {
            let values = inventory.device_clients().await?;
            output::print_output(&output::render_values(view.output, &values), global.quiet);
            Ok(())
        }

        DevicesCommand::ConnectivityTypes => {
            let values = inventory.connectivity_types().await?;
            output::print_output(&output::render_values(view.output, &values), global.quiet);
            Ok(())
        }

        DevicesCommand::BreakerTypes => {
            let values = inventory.breaker_types().await?;
            output::print_output(&output::render_values(view.output, &values), global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridsite_core::Audit;

    #[test]
    fn detail_marks_blank_fields() {
        let device = Device {
            id: "42".into(),
            fields: DeviceFields {
                site_name: "Substation Alpha".into(),
                site_running_number: Some(1001),
                serial_number_va: "VA2024001".into(),
                ..DeviceFields::default()
            },
            audit: Audit::default(),
        };
        let text = detail(&device);
        assert!(text.contains("Substation Alpha (#1001)"));
        assert!(text.contains("VA2024001"));
        assert!(text.lines().any(|l| l.starts_with("PSU Type") && l.ends_with('-')));
    }
}
