//! Site command handlers.

use tabled::Tabled;

use gridsite_core::forms::{into_result, validate_site_form};
use gridsite_core::import::SITE_COLUMNS;
use gridsite_core::query::choice;
use gridsite_core::{Inventory, Site, SiteFields, SiteFilter, export};

use crate::cli::{GlobalOpts, SitesArgs, SitesCommand};
use crate::config::Presentation;
use crate::error::CliError;
use crate::output;

use super::{devices, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SiteRow {
    #[tabled(rename = "No.")]
    running_number: String,
    #[tabled(rename = "Site Name")]
    name: String,
    #[tabled(rename = "Client")]
    client: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "RTU")]
    rtu_status: String,
    #[tabled(rename = "Site Status")]
    site_status: String,
}

impl From<&Site> for SiteRow {
    fn from(s: &Site) -> Self {
        Self {
            running_number: running_number(s),
            name: s.fields.site_name.clone(),
            client: s.fields.client.clone(),
            state: s.fields.state.clone(),
            status: s.fields.status.clone(),
            rtu_status: s.fields.rtu_status.clone(),
            site_status: s.fields.site_status.clone(),
        }
    }
}

fn running_number(s: &Site) -> String {
    s.running_number.map(|n| n.to_string()).unwrap_or_default()
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

fn detail(s: &Site) -> String {
    let width = SITE_COLUMNS
        .iter()
        .map(|c| c.label.len())
        .max()
        .unwrap_or(0);

    let mut lines = vec![format!(
        "{:<width$}  {}",
        "Running Number",
        or_dash(&running_number(s))
    )];
    for column in &SITE_COLUMNS {
        let value = column.render(&s.fields);
        lines.push(format!("{:<width$}  {}", column.label, or_dash(&value)));
    }
    lines.push(format!("{:<width$}  {}", "Record Status", s.audit.record_status));
    if let Some(at) = s.audit.created_at {
        lines.push(format!(
            "{:<width$}  {at} by {}",
            "Created",
            s.audit.created_by.as_deref().unwrap_or("-")
        ));
    }
    if let Some(at) = s.audit.updated_at {
        lines.push(format!(
            "{:<width$}  {at} by {}",
            "Updated",
            s.audit.last_updated_by.as_deref().unwrap_or("-")
        ));
    }
    lines.join("\n")
}

/// Local form rules first, then the server.
fn checked(fields: SiteFields) -> Result<SiteFields, CliError> {
    into_result(validate_site_form(&fields))?;
    Ok(fields)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    inventory: &Inventory,
    args: SitesArgs,
    global: &GlobalOpts,
    view: &Presentation,
) -> Result<(), CliError> {
    match args.command {
        SitesCommand::List {
            search,
            client,
            state,
            status,
            paging,
        } => {
            let filter = SiteFilter {
                search: search.unwrap_or_default(),
                client: choice(client.as_deref()),
                state: choice(state.as_deref()),
                status: choice(status.as_deref()),
            };
            let sites = inventory.sites(&filter).await?;
            let page = util::page_of(sites, &paging, view.page_size);

            let out = output::render_list(
                view.output,
                &page.items,
                |s| SiteRow::from(s),
                running_number,
            );
            output::print_output(&out, global.quiet);
            output::note(&util::page_footer(&page), global.quiet);
            Ok(())
        }

        SitesCommand::Get { running_number } => {
            let site = inventory.site(running_number).await?;
            let out = output::render_single(view.output, &site, detail, self::running_number);
            output::print_output(&out, global.quiet);

            let linked = inventory.site_devices(running_number).await?;
            if matches!(view.output, crate::cli::OutputFormat::Table) {
                output::print_output(
                    &format!("\nDevices ({})\n{}", linked.len(), devices::table(&linked)),
                    global.quiet,
                );
            }
            Ok(())
        }

        SitesCommand::Create { from_file } => {
            let fields = checked(util::read_json_file(&from_file)?)?;
            let site = inventory.create_site(&fields).await?;
            output::note(
                &format!(
                    "Site '{}' created (running number {})",
                    site.fields.site_name,
                    or_dash(&self::running_number(&site))
                ),
                global.quiet,
            );
            Ok(())
        }

        SitesCommand::Update {
            running_number,
            from_file,
        } => {
            let fields = checked(util::read_json_file(&from_file)?)?;
            inventory.update_site(running_number, &fields).await?;
            output::note(&format!("Site {running_number} updated"), global.quiet);
            Ok(())
        }

        SitesCommand::Delete { running_number } => {
            if !util::confirm(
                &format!("Delete site {running_number}? This is destructive."),
                global.yes,
            )? {
                return Ok(());
            }
            inventory.delete_site(running_number).await?;
            output::note(&format!("Site {running_number} deleted"), global.quiet);
            Ok(())
        }

        SitesCommand::Export { file, search } => {
            let filter = SiteFilter {
                search: search.unwrap_or_default(),
                ..SiteFilter::default()
            };
            let sites = inventory.sites(&filter).await?;
            let mut buf = Vec::new();
            export::export_sites(&sites, &mut buf)?;
            util::write_to(file.as_deref(), &buf)?;
            if let Some(path) = file {
                output::note(
                    &format!("Exported {} site(s) to {}", sites.len(), path.display()),
                    global.quiet,
                );
            }
            Ok(())
        }

        SitesCommand::Stats => {
            let stats = inventory.site_stats().await?;
            let out = output::render_single(
                view.output,
                &stats,
                |v| serde_json::to_string_pretty(v).unwrap_or_default(),
                ToString::to_string,
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SitesCommand::Clients => {
            let clients = inventory.site_clients().await?;
            output::print_output(&output::render_values(view.output, &clients), global.quiet);
            Ok(())
        }

        SitesCommand::States => {
            let states = inventory.site_states().await?;
            output::print_output(&output::render_values(view.output, &states), global.quiet);
            Ok(())
        }
    }
}
