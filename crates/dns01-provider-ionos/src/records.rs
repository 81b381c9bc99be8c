//! Record Index
//!
//! Structured reads of TXT records. A missing record is `None`, never an
//! error: callers treat it as "does not exist yet".

use dns01_core::Result;

use crate::api::{IonosApi, RecordFilter};
use crate::model::Record;

/// Record type managed by this crate
pub const TXT: &str = "TXT";

/// List TXT records named `name` in a zone
///
/// Zone, name and type filters are all sent to the provider; the type is
/// checked again on the way back.
pub async fn list_txt_records(api: &dyn IonosApi, zone_id: &str, name: &str) -> Result<Vec<Record>> {
    let filter = RecordFilter {
        zone_id,
        name: Some(name),
        record_type: Some(TXT),
    };

    let records = api.list_records(&filter).await?;
    Ok(records
        .into_iter()
        .filter(|r| r.record_type.eq_ignore_ascii_case(TXT))
        .collect())
}

/// Find the TXT record whose name and content both match exactly
pub async fn find_record(
    api: &dyn IonosApi,
    zone_id: &str,
    subdomain: &str,
    target: &str,
) -> Result<Option<Record>> {
    let records = list_txt_records(api, zone_id, subdomain).await?;

    let found = records
        .into_iter()
        .find(|r| r.name == subdomain && r.content == target);

    if found.is_none() {
        tracing::debug!(
            "No record found for zoneId '{}', subdomain '{}' and target '{}'",
            zone_id,
            subdomain,
            target
        );
    }
    Ok(found)
}
