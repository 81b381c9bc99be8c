// # Provider Gateway
//
// Authenticated HTTP access to the IONOS Cloud DNS API.
//
// Two kinds of calls go through here:
//
// - Raw zone file calls (`execute`): `text/plain` body, only `200 OK` and
//   `201 Created` count as success. These exist because the structured
//   record API rejects names containing `_`.
// - Structured JSON calls (zones, records): any 2xx counts as success,
//   since record deletion answers `202 Accepted`.
//
// Every response body is read to completion before returning, on success
// and on failure, so the pooled connection goes back to the client. No call
// is retried.
//
// ## API Reference
//
// - List zones: GET `/zones?filter.zone.name=...`
// - Zone file: GET/PUT `/zones/:zone_id/zonefile`
// - List records: GET `/records?filter.zoneId=...&filter.name=...&filter.type=...`
// - Delete record: DELETE `/zones/:zone_id/records/:record_id`

use async_trait::async_trait;
use dns01_core::{Error, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use std::sync::Arc;
use std::time::Duration;

use crate::api::{ApiConnector, IonosApi, RecordFilter};
use crate::model::{Collection, Record, RecordRead, Zone, ZoneRead};

/// Default HTTP timeout for API requests (30 seconds)
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for one IONOS endpoint and token
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose the API token.
#[derive(Clone)]
pub struct IonosClient {
    /// API base URL without trailing slash
    server: String,

    /// Bearer token
    /// ⚠️ NEVER log this value
    api_token: String,

    client: reqwest::Client,
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for IonosClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IonosClient")
            .field("server", &self.server)
            .field("api_token", &"<REDACTED>")
            .finish()
    }
}

impl IonosClient {
    /// Create a client
    ///
    /// Fails if the token is empty or the HTTP client cannot be built.
    pub fn new(
        server: impl Into<String>,
        api_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let api_token = api_token.into();
        if api_token.is_empty() {
            return Err(Error::credential("IONOS API token cannot be empty"));
        }

        let server = server.into().trim_end_matches('/').to_string();
        if server.is_empty() {
            return Err(Error::config("IONOS endpoint cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            server,
            api_token,
            client,
        })
    }

    fn zone_file_url(&self, zone_id: &str) -> String {
        format!("{}/zones/{}/zonefile", self.server, zone_id)
    }

    /// Build a raw zone file request
    pub(crate) fn build_request(
        &self,
        method: Method,
        url: &str,
        body: &str,
    ) -> Result<reqwest::Request> {
        self.client
            .request(method.clone(), url)
            .header(CONTENT_TYPE, "text/plain")
            .header(ACCEPT, "application/json")
            .bearer_auth(&self.api_token)
            .body(body.to_string())
            .build()
            .map_err(|e| transport_error(&method, url, e))
    }

    /// Send a raw zone file request and return the response body
    ///
    /// Only `200 OK` and `201 Created` are accepted. Anything else becomes
    /// [`Error::Http`] carrying the status line, URL and method.
    pub async fn execute(&self, method: Method, url: &str, body: &str) -> Result<String> {
        let request = self.build_request(method.clone(), url, body)?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| transport_error(&method, url, e))?;

        let status = response.status();
        let body = response.text().await;

        zone_file_response(status, &method, url, body)
    }

    /// Fetch the raw zone file
    pub async fn retrieve_zone_file(&self, zone_id: &str) -> Result<String> {
        self.execute(Method::GET, &self.zone_file_url(zone_id), "")
            .await
    }

    /// Replace the raw zone file
    pub async fn upload_zone_file(&self, zone_id: &str, zone_file: &str) -> Result<String> {
        self.execute(Method::PUT, &self.zone_file_url(zone_id), zone_file)
            .await
    }

    /// Send a structured JSON request and return the response body
    async fn send_structured(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<String> {
        let url = format!("{}{}", self.server, path);

        let response = self
            .client
            .request(method.clone(), &url)
            .query(query)
            .header(ACCEPT, "application/json")
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(|e| transport_error(&method, &url, e))?;

        let status = response.status();
        let full_url = response.url().to_string();
        let body = response.text().await;

        if !status.is_success() {
            return Err(status_error(status, &method, &full_url));
        }

        body.map_err(|e| transport_error(&method, &full_url, e))
    }
}

fn zone_file_response(
    status: StatusCode,
    method: &Method,
    url: &str,
    body: reqwest::Result<String>,
) -> Result<String> {
    if status == StatusCode::OK || status == StatusCode::CREATED {
        return body.map_err(|e| transport_error(method, url, e));
    }
    Err(status_error(status, method, url))
}

fn status_error(status: StatusCode, method: &Method, url: &str) -> Error {
    let err = Error::http(status.to_string(), url, method.as_str());
    tracing::error!("{}", err);
    err
}

fn transport_error(method: &Method, url: &str, err: reqwest::Error) -> Error {
    Error::transport(format!("{} {} failed: {}", method, url, err))
}

#[async_trait]
impl IonosApi for IonosClient {
    async fn list_zones(&self, name: &str) -> Result<Vec<Zone>> {
        tracing::debug!("Listing zones named {}", name);
        let body = self
            .send_structured(Method::GET, "/zones", &[("filter.zone.name", name)])
            .await?;
        let list: Collection<ZoneRead> = serde_json::from_str(&body)?;
        Ok(list.items.into_iter().map(Zone::from).collect())
    }

    async fn list_records(&self, filter: &RecordFilter<'_>) -> Result<Vec<Record>> {
        let mut query = vec![("filter.zoneId", filter.zone_id)];
        if let Some(name) = filter.name {
            query.push(("filter.name", name));
        }
        if let Some(record_type) = filter.record_type {
            query.push(("filter.type", record_type));
        }

        tracing::debug!("Listing records: {:?}", filter);
        let body = self.send_structured(Method::GET, "/records", &query).await?;
        let list: Collection<RecordRead> = serde_json::from_str(&body)?;
        Ok(list.items.into_iter().map(Record::from).collect())
    }

    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()> {
        let path = format!("/zones/{}/records/{}", zone_id, record_id);
        self.send_structured(Method::DELETE, &path, &[]).await?;
        Ok(())
    }

    async fn get_zone_file(&self, zone_id: &str) -> Result<String> {
        self.retrieve_zone_file(zone_id).await
    }

    async fn put_zone_file(&self, zone_id: &str, zone_file: &str) -> Result<()> {
        self.upload_zone_file(zone_id, zone_file).await?;
        Ok(())
    }
}

/// Connector producing [`IonosClient`]s
#[derive(Debug, Clone)]
pub struct HttpConnector {
    timeout: Duration,
}

impl HttpConnector {
    /// Create a connector whose clients use `timeout` for every call
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for HttpConnector {
    fn default() -> Self {
        Self::new(DEFAULT_HTTP_TIMEOUT)
    }
}

impl ApiConnector for HttpConnector {
    fn connect(&self, endpoint: &str, token: &str) -> Result<Arc<dyn IonosApi>> {
        Ok(Arc::new(IonosClient::new(endpoint, token, self.timeout)?))
    }
}
