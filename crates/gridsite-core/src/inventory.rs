// ── Inventory facade ──
//
// The one handle consumers hold. Wraps the Data API client, converts its
// errors into `CoreError`, applies the list filters, and serves as the
// commit target for CSV imports.

use tracing::debug;

use gridsite_api::ApiClient;

use crate::config::ApiConfig;
use crate::error::CoreError;
use crate::import::SiteSink;
use crate::model::{Device, DeviceFields, DeviceQuery, Site, SiteFields, SiteQuery};
use crate::query::{DeviceFilter, SiteFilter};

/// Sites and devices held by one Data API deployment.
#[derive(Debug, Clone)]
pub struct Inventory {
    client: ApiClient,
}

fn or_not_found(err: gridsite_api::Error, entity: &str, id: impl ToString) -> CoreError {
    if err.is_not_found() {
        CoreError::not_found(entity, id)
    } else {
        err.into()
    }
}

impl Inventory {
    pub fn new(config: &ApiConfig) -> Result<Self, CoreError> {
        let client = ApiClient::new(config.base_url.as_str(), &config.transport())?;
        debug!(base_url = %config.base_url, "inventory client ready");
        Ok(Self { client })
    }

    // ── Sites ────────────────────────────────────────────────────────

    /// Every site, narrowed by `filter`.
    pub async fn sites(&self, filter: &SiteFilter) -> Result<Vec<Site>, CoreError> {
        let all = self.client.list_all_sites(&SiteQuery::default()).await?;
        let total = all.len();
        let found = filter.apply(all);
        debug!(total, matched = found.len(), "filtered sites");
        Ok(found)
    }

    pub async fn site(&self, running_number: u64) -> Result<Site, CoreError> {
        self.client
            .get_site(running_number)
            .await
            .map_err(|e| or_not_found(e, "Site", running_number))
    }

    /// Devices linked to one site.
    pub async fn site_devices(&self, running_number: u64) -> Result<Vec<Device>, CoreError> {
        Ok(self
            .client
            .list_all_devices(&DeviceQuery::for_site(running_number))
            .await?)
    }

    pub async fn create_site(&self, fields: &SiteFields) -> Result<Site, CoreError> {
        Ok(self.client.create_site(fields).await?)
    }

    pub async fn update_site(
        &self,
        running_number: u64,
        fields: &SiteFields,
    ) -> Result<Site, CoreError> {
        self.client
            .update_site(running_number, fields)
            .await
            .map_err(|e| or_not_found(e, "Site", running_number))
    }

    pub async fn delete_site(&self, running_number: u64) -> Result<(), CoreError> {
        self.client
            .delete_site(running_number)
            .await
            .map_err(|e| or_not_found(e, "Site", running_number))
    }

    pub async fn site_stats(&self) -> Result<serde_json::Value, CoreError> {
        Ok(self.client.site_stats().await?)
    }

    pub async fn site_clients(&self) -> Result<Vec<String>, CoreError> {
        Ok(self.client.site_clients().await?)
    }

    pub async fn site_states(&self) -> Result<Vec<String>, CoreError> {
        Ok(self.client.site_states().await?)
    }

    // ── Devices ──────────────────────────────────────────────────────

    /// Every device, narrowed by `filter`.
    pub async fn devices(&self, filter: &DeviceFilter) -> Result<Vec<Device>, CoreError> {
        let all = self.client.list_all_devices(&DeviceQuery::default()).await?;
        Ok(filter.apply(all))
    }

    pub async fn device(&self, id: &str) -> Result<Device, CoreError> {
        self.client
            .get_device(id)
            .await
            .map_err(|e| or_not_found(e, "Device", id))
    }

    pub async fn create_device(&self, fields: &DeviceFields) -> Result<Device, CoreError> {
        Ok(self.client.create_device(fields).await?)
    }

    pub async fn update_device(
        &self,
        id: &str,
        fields: &DeviceFields,
    ) -> Result<Device, CoreError> {
        self.client
            .update_device(id, fields)
            .await
            .map_err(|e| or_not_found(e, "Device", id))
    }

    pub async fn delete_device(&self, id: &str) -> Result<(), CoreError> {
        self.client
            .delete_device(id)
            .await
            .map_err(|e| or_not_found(e, "Device", id))
    }

    pub async fn device_stats(&self) -> Result<serde_json::Value, CoreError> {
        Ok(self.client.device_stats().await?)
    }

    pub async fn device_clients(&self) -> Result<Vec<String>, CoreError> {
        Ok(self.client.device_clients().await?)
    }

    pub async fn connectivity_types(&self) -> Result<Vec<String>, CoreError> {
        Ok(self.client.device_connectivity_types().await?)
    }

    pub async fn breaker_types(&self) -> Result<Vec<String>, CoreError> {
        Ok(self.client.device_breaker_types().await?)
    }
}

impl SiteSink for Inventory {
    async fn create_site(&self, fields: &SiteFields) -> Result<Site, CoreError> {
        Inventory::create_site(self, fields).await
    }
}
