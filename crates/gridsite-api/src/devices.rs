// Device endpoints

use serde::Deserialize;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{Device, DeviceFields, DeviceQuery, DeviceWrite, Page, RecordStatus};

#[derive(Deserialize)]
struct ClientsResponse {
    #[serde(default)]
    clients: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConnectivityTypesResponse {
    #[serde(default)]
    connectivity_types: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BreakerTypesResponse {
    #[serde(default)]
    breaker_types: Vec<String>,
}

impl ApiClient {
    /// One page of devices.
    ///
    /// `GET /devices/?search=&client=&connectivity_type=&site_running_number=&page=`
    pub async fn list_devices(&self, query: &DeviceQuery) -> Result<Page<Device>, Error> {
        self.get_with_params("devices/", &query.to_params()).await
    }

    /// Every device matching `query`, following `next` links.
    pub async fn list_all_devices(&self, query: &DeviceQuery) -> Result<Vec<Device>, Error> {
        self.collect_pages(|page| {
            let query = DeviceQuery {
                page: Some(page),
                ..query.clone()
            };
            async move { self.list_devices(&query).await }
        })
        .await
    }

    /// `GET /devices/{id}/`
    pub async fn get_device(&self, id: &str) -> Result<Device, Error> {
        self.get(&format!("devices/{id}/")).await
    }

    /// `POST /devices/`
    pub async fn create_device(&self, fields: &DeviceFields) -> Result<Device, Error> {
        debug!(site_name = %fields.site_name, "creating device");
        self.post(
            "devices/",
            &DeviceWrite {
                fields,
                record_status: Some(RecordStatus::Active),
            },
        )
        .await
    }

    /// `PUT /devices/{id}/`
    pub async fn update_device(&self, id: &str, fields: &DeviceFields) -> Result<Device, Error> {
        debug!(id, "updating device");
        self.put(
            &format!("devices/{id}/"),
            &DeviceWrite {
                fields,
                record_status: None,
            },
        )
        .await
    }

    /// `DELETE /devices/{id}/`
    pub async fn delete_device(&self, id: &str) -> Result<(), Error> {
        debug!(id, "deleting device");
        self.delete(&format!("devices/{id}/")).await
    }

    pub async fn device_stats(&self) -> Result<serde_json::Value, Error> {
        self.get("devices/stats/").await
    }

    pub async fn device_clients(&self) -> Result<Vec<String>, Error> {
        let resp: ClientsResponse = self.get("devices/clients/").await?;
        Ok(resp.clients)
    }

    pub async fn device_connectivity_types(&self) -> Result<Vec<String>, Error> {
        let resp: ConnectivityTypesResponse = self.get("devices/connectivity_types/").await?;
        Ok(resp.connectivity_types)
    }

    pub async fn device_breaker_types(&self) -> Result<Vec<String>, Error> {
        let resp: BreakerTypesResponse = self.get("devices/breaker_types/").await?;
        Ok(resp.breaker_types)
    }
}
