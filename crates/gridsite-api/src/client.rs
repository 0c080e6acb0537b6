// Async HTTP client for the inventory Data API.
//
// JSON REST endpoints with trailing slashes (`sites/`, `sites/{n}/`, ...).
// The base URL comes from configuration; nothing here hard-codes a host.

use std::future::Future;

use indexmap::IndexMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::models::Page;

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the inventory Data API.
///
/// Endpoint methods live in [`crate::sites`] and [`crate::devices`];
/// this module owns URL building, the HTTP verbs and error decoding.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client for `base_url` (e.g. `http://localhost:8000/api`).
    pub fn new(base_url: &str, transport: &crate::TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(base_url, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Ensure the base path ends with `/` so relative joins append.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"sites/12/"`) onto the base URL.
    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        self.handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();
        decode_error(status.as_u16(), &raw)
    }

    // ── Pagination helper ────────────────────────────────────────────

    /// Collect every page into a single `Vec<T>`, starting at page 1 and
    /// stopping once the server reports no `next` page.
    pub async fn collect_pages<T, F, Fut>(&self, fetch: F) -> Result<Vec<T>, Error>
    where
        F: Fn(u32) -> Fut,
        Fut: Future<Output = Result<Page<T>, Error>>,
    {
        let mut all = Vec::new();
        let mut page_no = 1;

        loop {
            let page = fetch(page_no).await?;
            let received = page.results.len();
            all.extend(page.results);

            if page.next.is_none() || received == 0 {
                break;
            }
            page_no += 1;
        }

        Ok(all)
    }
}

/// Turn a non-success body into an [`Error`].
///
/// A 400 whose body is a JSON object becomes [`Error::Validation`], with
/// array values joined and scalar values kept as-is. Anything else uses the
/// body's `detail` string, falling back to `HTTP error! status: N`.
fn decode_error(status: u16, raw: &str) -> Error {
    // Decode straight into an IndexMap so fields keep the server's order.
    let field_map = if status == 400 {
        serde_json::from_str::<IndexMap<String, serde_json::Value>>(raw)
            .ok()
            .filter(|map| !map.is_empty())
    } else {
        None
    };
    if let Some(map) = field_map {
        let fields: IndexMap<String, Vec<String>> = map
            .iter()
            .map(|(field, value)| (field.clone(), field_messages(value)))
            .collect();
        return Error::Validation { fields };
    }

    let parsed = serde_json::from_str::<serde_json::Value>(raw).ok();
    let detail = parsed
        .as_ref()
        .and_then(|v| v.get("detail"))
        .and_then(serde_json::Value::as_str)
        .filter(|d| !d.is_empty())
        .map(str::to_owned);

    Error::Api {
        status,
        message: detail.unwrap_or_else(|| format!("HTTP error! status: {status}")),
    }
}

fn field_messages(value: &serde_json::Value) -> Vec<String> {
    match value {
        serde_json::Value::Array(items) => items
            .iter()
            .map(|item| match item {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        serde_json::Value::String(s) => vec![s.clone()],
        other => vec![other.to_string()],
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let client =
            ApiClient::with_client("http://localhost:8000/api", reqwest::Client::new()).unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8000/api/");
        assert_eq!(
            client.url("sites/12/").unwrap().as_str(),
            "http://localhost:8000/api/sites/12/"
        );
    }

    #[test]
    fn decode_400_object_as_validation() {
        let err = decode_error(
            400,
            r#"{"siteName": ["This field is required."], "pricing": "bad"}"#,
        );
        assert_eq!(
            err.to_string(),
            "Validation error: siteName: This field is required.; pricing: bad"
        );
    }

    #[test]
    fn decode_400_keeps_server_field_order() {
        let err = decode_error(
            400,
            r#"{"state": ["Required."], "client": ["Required."], "gpsLat": ["Too large."]}"#,
        );
        let fields: Vec<_> = err.validation_fields().unwrap().keys().cloned().collect();
        assert_eq!(fields, vec!["state", "client", "gpsLat"]);
        assert_eq!(
            err.to_string(),
            "Validation error: state: Required.; client: Required.; gpsLat: Too large."
        );
    }

    #[test]
    fn decode_detail_or_status_fallback() {
        let err = decode_error(404, r#"{"detail": "Not found."}"#);
        assert!(matches!(err, Error::Api { status: 404, ref message } if message == "Not found."));

        let err = decode_error(500, "<html>boom</html>");
        assert_eq!(err.to_string(), "HTTP error! status: 500");

        // a 400 without a JSON object body is an ordinary API error
        let err = decode_error(400, "");
        assert_eq!(err.to_string(), "HTTP error! status: 400");
    }
}
