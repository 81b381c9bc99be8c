//! Challenge Reconciliation Protocol
//!
//! The two idempotent operations a solver exposes, built from the zone,
//! record and zone file primitives. Nothing is carried between calls:
//! each one re-reads zone and record state from the provider.
//!
//! ```text
//! ensure_present: validate_deployed → resolve_zone_id → find_record
//!                   ├─ found   → AlreadyPresent
//!                   └─ missing → ensure_record_line → re-list
//!                                  ├─ appended            → Created
//!                                  └─ line already there  → AlreadyWritten
//!
//! ensure_absent:  resolve_zone_id → find_record
//!                   ├─ found   → delete_record → Deleted
//!                   └─ missing → AlreadyAbsent
//! ```

use dns01_core::{ChallengeOutcome, Result};
use tracing::{info, warn};

use crate::api::IonosApi;
use crate::records::{find_record, list_txt_records};
use crate::zone_file::{CHALLENGE_TTL, ZoneFileChange, ensure_record_line};
use crate::zones::{resolve_zone_id, validate_deployed};

/// Ensure a TXT record `subdomain` with content `target` exists in `domain`
pub async fn ensure_present(
    api: &dyn IonosApi,
    domain: &str,
    subdomain: &str,
    target: &str,
    dry_run: bool,
) -> Result<ChallengeOutcome> {
    info!(
        "Ensuring TXT record for domain {}.{} with value {}",
        subdomain, domain, target
    );

    validate_deployed(api, domain).await?;
    let zone_id = resolve_zone_id(api, domain).await?;

    if let Some(record) = find_record(api, &zone_id, subdomain, target).await? {
        info!(
            "TXT record already present for domain {}.{} with value {}",
            subdomain, domain, target
        );
        return Ok(ChallengeOutcome::AlreadyPresent {
            record_id: record.id,
        });
    }

    let change =
        ensure_record_line(api, &zone_id, subdomain, CHALLENGE_TTL, target, dry_run).await?;
    if change == ZoneFileChange::WouldAppend {
        return Ok(ChallengeOutcome::Skipped {
            action: format!("append TXT line for {} to zone {}", subdomain, zone_id),
        });
    }

    // The line is in the zone file at this point; the listing only confirms it.
    let confirmed = match list_txt_records(api, &zone_id, subdomain).await {
        Ok(records) => records
            .iter()
            .any(|r| r.name == subdomain && r.content == target),
        Err(e) => {
            warn!(
                "Could not confirm TXT record {}.{} after zone file update: {}",
                subdomain, domain, e
            );
            false
        }
    };

    if change == ZoneFileChange::AlreadyPresent {
        info!(
            "TXT line already in zone file for domain {}.{} with value {} (listed: {})",
            subdomain, domain, target, confirmed
        );
        return Ok(ChallengeOutcome::AlreadyWritten { confirmed });
    }

    info!(
        "TXT record created for domain {}.{} with value {} (confirmed: {})",
        subdomain, domain, target, confirmed
    );
    Ok(ChallengeOutcome::Created { confirmed })
}

/// Ensure no TXT record `subdomain` with content `target` exists in `domain`
///
/// Records with the same name but another value are left alone.
pub async fn ensure_absent(
    api: &dyn IonosApi,
    domain: &str,
    subdomain: &str,
    target: &str,
    dry_run: bool,
) -> Result<ChallengeOutcome> {
    info!(
        "Removing TXT record for domain {}.{} with value {}",
        subdomain, domain, target
    );

    let zone_id = resolve_zone_id(api, domain).await?;

    let Some(record) = find_record(api, &zone_id, subdomain, target).await? else {
        info!(
            "TXT record already absent for domain {}.{} with value {}",
            subdomain, domain, target
        );
        return Ok(ChallengeOutcome::AlreadyAbsent);
    };

    if dry_run {
        warn!(
            "[DRY-RUN] Would delete record {} from zone {}",
            record.id, zone_id
        );
        return Ok(ChallengeOutcome::Skipped {
            action: format!("delete record {} from zone {}", record.id, zone_id),
        });
    }

    api.delete_record(&zone_id, &record.id).await?;

    info!(
        "TXT record {} deleted for domain {}.{}",
        record.id, subdomain, domain
    );
    Ok(ChallengeOutcome::Deleted {
        record_id: record.id,
    })
}
