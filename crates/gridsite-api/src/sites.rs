// Site endpoints
//
// Sites are addressed by their server-assigned running number.

use serde::Deserialize;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{Page, RecordStatus, Site, SiteFields, SiteQuery, SiteWrite};

#[derive(Deserialize)]
struct ClientsResponse {
    #[serde(default)]
    clients: Vec<String>,
}

#[derive(Deserialize)]
struct StatesResponse {
    #[serde(default)]
    states: Vec<String>,
}

impl ApiClient {
    /// One page of sites.
    ///
    /// `GET /sites/?search=&client=&state=&status=&page=`
    pub async fn list_sites(&self, query: &SiteQuery) -> Result<Page<Site>, Error> {
        self.get_with_params("sites/", &query.to_params()).await
    }

    /// Every site matching `query`, following `next` links.
    pub async fn list_all_sites(&self, query: &SiteQuery) -> Result<Vec<Site>, Error> {
        self.collect_pages(|page| {
            let query = SiteQuery {
                page: Some(page),
                ..query.clone()
            };
            async move { self.list_sites(&query).await }
        })
        .await
    }

    /// `GET /sites/{n}/`
    pub async fn get_site(&self, running_number: u64) -> Result<Site, Error> {
        self.get(&format!("sites/{running_number}/")).await
    }

    /// Create a site. The server assigns the running number.
    ///
    /// `POST /sites/`
    pub async fn create_site(&self, fields: &SiteFields) -> Result<Site, Error> {
        debug!(site_name = %fields.site_name, "creating site");
        self.post(
            "sites/",
            &SiteWrite {
                fields,
                record_status: Some(RecordStatus::Active),
            },
        )
        .await
    }

    /// Replace a site's editable fields.
    ///
    /// `PUT /sites/{n}/`
    pub async fn update_site(
        &self,
        running_number: u64,
        fields: &SiteFields,
    ) -> Result<Site, Error> {
        debug!(running_number, "updating site");
        self.put(
            &format!("sites/{running_number}/"),
            &SiteWrite {
                fields,
                record_status: None,
            },
        )
        .await
    }

    /// `DELETE /sites/{n}/`
    pub async fn delete_site(&self, running_number: u64) -> Result<(), Error> {
        debug!(running_number, "deleting site");
        self.delete(&format!("sites/{running_number}/")).await
    }

    /// Server-computed aggregate counts. The shape is server-defined.
    pub async fn site_stats(&self) -> Result<serde_json::Value, Error> {
        self.get("sites/stats/").await
    }

    /// Distinct client names across all sites.
    pub async fn site_clients(&self) -> Result<Vec<String>, Error> {
        let resp: ClientsResponse = self.get("sites/clients/").await?;
        Ok(resp.clients)
    }

    /// Distinct states across all sites.
    pub async fn site_states(&self) -> Result<Vec<String>, Error> {
        let resp: StatesResponse = self.get("sites/states/").await?;
        Ok(resp.states)
    }
}
