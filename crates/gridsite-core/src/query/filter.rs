// ── List filters ──
//
// Client-side narrowing of site and device lists. A filter value of `None`
// (or the literal "all") matches everything; other values must match
// exactly. Search terms match case-insensitively as substrings.

use crate::model::{Device, Site};

/// Treat the UI's "all" sentinel and blank input as no filter.
pub fn choice(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
        .map(str::to_owned)
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn exact(filter: Option<&String>, value: &str) -> bool {
    filter.is_none_or(|f| f == value)
}

// ── Sites ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteFilter {
    pub search: String,
    pub client: Option<String>,
    pub state: Option<String>,
    pub status: Option<String>,
}

impl SiteFilter {
    /// Search covers site name, running number, FL number and circuit id.
    pub fn matches(&self, site: &Site) -> bool {
        let term = self.search.trim().to_lowercase();
        let fields = &site.fields;

        let matches_search = term.is_empty()
            || contains_ci(&fields.site_name, &term)
            || site
                .running_number
                .is_some_and(|n| n.to_string().contains(&term))
            || contains_ci(&fields.fl_number, &term)
            || contains_ci(&fields.circuit_id, &term);

        matches_search
            && exact(self.client.as_ref(), &fields.client)
            && exact(self.state.as_ref(), &fields.state)
            && exact(self.status.as_ref(), &fields.status)
    }

    /// Keep the sites that match, in their original order.
    pub fn apply(&self, sites: Vec<Site>) -> Vec<Site> {
        sites.into_iter().filter(|s| self.matches(s)).collect()
    }
}

// ── Devices ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceFilter {
    pub search: String,
    pub client: Option<String>,
    pub connectivity_type: Option<String>,
}

impl DeviceFilter {
    /// Search covers site name, client and both serial numbers.
    pub fn matches(&self, device: &Device) -> bool {
        let term = self.search.trim().to_lowercase();
        let fields = &device.fields;

        let matches_search = term.is_empty()
            || contains_ci(&fields.site_name, &term)
            || contains_ci(&fields.client, &term)
            || contains_ci(&fields.serial_number_va, &term)
            || contains_ci(&fields.serial_number_router, &term);

        matches_search
            && exact(self.client.as_ref(), &fields.client)
            && exact(self.connectivity_type.as_ref(), &fields.connectivity_type)
    }

    pub fn apply(&self, devices: Vec<Device>) -> Vec<Device> {
        devices.into_iter().filter(|d| self.matches(d)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Audit, DeviceFields, SiteFields};

    fn site(n: u64, name: &str, client: &str, state: &str, fl: &str, circuit: &str) -> Site {
        Site {
            id: None,
            running_number: Some(n),
            fields: SiteFields {
                client: client.into(),
                site_name: name.into(),
                state: state.into(),
                status: "Production".into(),
                fl_number: fl.into(),
                circuit_id: circuit.into(),
                ..SiteFields::default()
            },
            audit: Audit::default(),
        }
    }

    fn sites() -> Vec<Site> {
        vec![
            site(1001, "Substation Alpha", "TNB", "SELANGOR", "FL001", "CID-A"),
            site(1002, "Substation Beta", "Global", "JOHOR", "", "CID-B"),
            site(2050, "Gamma Yard", "TNB", "JOHOR", "fl777", ""),
        ]
    }

    fn names(found: &[Site]) -> Vec<String> {
        found.iter().map(|s| s.fields.site_name.clone()).collect()
    }

    #[test]
    fn empty_filter_matches_everything() {
        let all = sites();
        assert_eq!(SiteFilter::default().apply(all).len(), 3);
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let all = sites();
        let by = |term: &str| {
            names(
                &SiteFilter {
                    search: term.into(),
                    ..SiteFilter::default()
                }
                .apply(all.clone()),
            )
        };

        assert_eq!(by("SUBSTATION"), vec!["Substation Alpha", "Substation Beta"]);
        assert_eq!(by("205"), vec!["Gamma Yard"]);
        assert_eq!(by("FL777"), vec!["Gamma Yard"]);
        assert_eq!(by("cid-b"), vec!["Substation Beta"]);
        assert!(by("nowhere").is_empty());
    }

    #[test]
    fn exact_filters_combine() {
        let all = sites();
        let filter = SiteFilter {
            client: Some("TNB".into()),
            state: Some("JOHOR".into()),
            ..SiteFilter::default()
        };
        assert_eq!(names(&filter.apply(all.clone())), vec!["Gamma Yard"]);

        let filter = SiteFilter {
            status: Some("Pre-Production".into()),
            ..SiteFilter::default()
        };
        assert!(filter.apply(all).is_empty());
    }

    #[test]
    fn all_sentinel_means_no_filter() {
        assert_eq!(choice(Some("all")), None);
        assert_eq!(choice(Some("  ")), None);
        assert_eq!(choice(None), None);
        assert_eq!(choice(Some("TNB")), Some("TNB".to_owned()));
    }

    #[test]
    fn device_search_covers_serials() {
        let device = |id: &str, va: &str, router: &str, conn: &str| Device {
            id: id.into(),
            fields: DeviceFields {
                client: "TNB".into(),
                site_name: "Substation Alpha".into(),
                serial_number_va: va.into(),
                serial_number_router: router.into(),
                connectivity_type: conn.into(),
                ..DeviceFields::default()
            },
            audit: Audit::default(),
        };
        let all = vec![
            device("1", "VA2024001", "RT-9", "Wired"),
            device("2", "VA2024002", "RT-10", "Cellular"),
        ];

        let found = DeviceFilter {
            search: "rt-10".into(),
            ..DeviceFilter::default()
        }
        .apply(all.clone());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "2");

        let found = DeviceFilter {
            connectivity_type: Some("Wired".into()),
            ..DeviceFilter::default()
        }
        .apply(all);
        assert_eq!(found[0].id, "1");
        assert_eq!(found.len(), 1);
    }
}
