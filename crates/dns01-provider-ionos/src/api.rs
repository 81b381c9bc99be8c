//! Provider API seam
//!
//! Everything the reconciliation logic needs from IONOS, as one trait. The
//! HTTP implementation is [`IonosClient`](crate::client::IonosClient);
//! tests substitute an in-memory provider.

use async_trait::async_trait;
use dns01_core::Result;
use std::sync::Arc;

use crate::model::{Record, Zone};

/// Filter for structured record listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFilter<'a> {
    /// Zone the records belong to
    pub zone_id: &'a str,
    /// Exact record label, if any
    pub name: Option<&'a str>,
    /// Record type, if any
    pub record_type: Option<&'a str>,
}

/// Calls against the IONOS Cloud DNS API
///
/// Implementations make exactly one provider request per method call and
/// never retry.
#[async_trait]
pub trait IonosApi: Send + Sync {
    /// `GET /zones?filter.zone.name=<name>`
    async fn list_zones(&self, name: &str) -> Result<Vec<Zone>>;

    /// `GET /records?filter.zoneId=...&filter.name=...&filter.type=...`
    async fn list_records(&self, filter: &RecordFilter<'_>) -> Result<Vec<Record>>;

    /// `DELETE /zones/<zoneId>/records/<recordId>`
    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()>;

    /// `GET /zones/<zoneId>/zonefile`
    async fn get_zone_file(&self, zone_id: &str) -> Result<String>;

    /// `PUT /zones/<zoneId>/zonefile`
    async fn put_zone_file(&self, zone_id: &str, zone_file: &str) -> Result<()>;
}

/// Builds an API client for one challenge request
pub trait ApiConnector: Send + Sync {
    /// Connect to `endpoint` authenticating with `token`
    fn connect(&self, endpoint: &str, token: &str) -> Result<Arc<dyn IonosApi>>;
}
