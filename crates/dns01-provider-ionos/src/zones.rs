//! Zone Directory
//!
//! Resolves a domain to its IONOS zone. Both lookups here go through
//! [`lookup_zone`] so they always agree on which zone a domain maps to.

use dns01_core::{Error, Result};

use crate::api::IonosApi;
use crate::model::{Zone, ZoneState};

/// Find the single zone named exactly `domain`
///
/// The provider-side filter is not trusted to be exact: only zones whose
/// name equals `domain` (case-sensitive) are kept, and anything other than
/// exactly one match is an error. Provider failures are passed through
/// unchanged.
pub async fn lookup_zone(api: &dyn IonosApi, domain: &str) -> Result<Zone> {
    let zones = api.list_zones(domain).await.inspect_err(|e| {
        tracing::error!("Unable to list zones for domain '{}': {}", domain, e);
    })?;

    let mut matching: Vec<Zone> = zones.into_iter().filter(|z| z.name == domain).collect();

    match matching.len() {
        1 => Ok(matching.remove(0)),
        0 => Err(Error::zone_lookup(format!(
            "no ionos zone found for domain {}",
            domain
        ))),
        n => Err(Error::zone_lookup(format!(
            "{} ionos zones found for domain {}, expected exactly one",
            n, domain
        ))),
    }
}

/// Resolve the zone id for `domain`
pub async fn resolve_zone_id(api: &dyn IonosApi, domain: &str) -> Result<String> {
    let zone = lookup_zone(api, domain).await?;
    tracing::debug!("Found zone ID {} for domain {}", zone.id, domain);
    Ok(zone.id)
}

/// Fail unless the zone for `domain` is deployed
pub async fn validate_deployed(api: &dyn IonosApi, domain: &str) -> Result<()> {
    tracing::debug!("Validating zone for domain {}", domain);
    let zone = lookup_zone(api, domain).await?;

    if zone.state != ZoneState::Available {
        return Err(Error::zone_not_deployed(format!(
            "ionos zone {} for domain {} is in state {}",
            zone.id, domain, zone.state
        )));
    }
    Ok(())
}
