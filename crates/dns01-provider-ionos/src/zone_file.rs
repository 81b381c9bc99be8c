// # Zone File Reconciler
//
// Creates challenge records through the raw zone file, because the
// structured record API refuses names containing `_` (and every DNS-01
// record is named `_acme-challenge...`).
//
// The zone file is treated as opaque text:
//
// 1. GET the zone file
// 2. Require the `;Zone: ` header, otherwise fail without writing
// 3. If the exact record line is already a substring, stop
// 4. Otherwise append `\n<line>` and PUT the whole text back
//
// Nothing is ever removed or reformatted. There is no locking: a second
// writer racing on the same zone can lose an update (last PUT wins).

use dns01_core::{Error, Result};

use crate::api::IonosApi;

/// Every zone file served by IONOS starts with this marker
pub const ZONE_FILE_HEADER: &str = ";Zone: ";

/// TTL written for challenge records (in seconds)
pub const CHALLENGE_TTL: u32 = 60;

/// What [`ensure_record_line`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneFileChange {
    /// The line was already present; nothing was uploaded
    AlreadyPresent,
    /// The line was appended and the zone file uploaded
    Appended,
    /// Dry-run: the line is missing but the upload was skipped
    WouldAppend,
}

/// The zone file line for a TXT record
pub fn record_line(subdomain: &str, ttl: u32, target: &str) -> String {
    format!("{}\t{}\tIN\tTXT\t\"{}\"", subdomain, ttl, target)
}

/// Compute the patched zone file
///
/// Returns `Ok(None)` when `line` is already present, `Ok(Some(text))`
/// with the new zone file otherwise. A zone file without the expected
/// header is rejected.
pub fn patch_zone_file(current: &str, line: &str) -> Result<Option<String>> {
    if !current.starts_with(ZONE_FILE_HEADER) {
        return Err(Error::zone_file_format(current));
    }
    if current.contains(line) {
        return Ok(None);
    }
    Ok(Some(format!("{}\n{}", current, line)))
}

/// Make sure the zone file of `zone_id` carries the TXT line for `target`
pub async fn ensure_record_line(
    api: &dyn IonosApi,
    zone_id: &str,
    subdomain: &str,
    ttl: u32,
    target: &str,
    dry_run: bool,
) -> Result<ZoneFileChange> {
    let current = api.get_zone_file(zone_id).await.inspect_err(|e| {
        tracing::error!(
            "Unable to create record '{}/{}': retrieving zone file failed: {}",
            zone_id,
            subdomain,
            e
        );
    })?;

    let line = record_line(subdomain, ttl, target);
    let Some(updated) = patch_zone_file(&current, &line)? else {
        tracing::info!(
            "Zone file of {} already contains TXT line for {}",
            zone_id,
            subdomain
        );
        return Ok(ZoneFileChange::AlreadyPresent);
    };

    if dry_run {
        tracing::warn!(
            "[DRY-RUN] Would upload zone file of {} with appended line: {:?}",
            zone_id,
            line
        );
        return Ok(ZoneFileChange::WouldAppend);
    }

    api.put_zone_file(zone_id, &updated).await.inspect_err(|e| {
        tracing::error!(
            "Unable to create record '{}/{}': uploading zone file failed: {}",
            zone_id,
            subdomain,
            e
        );
    })?;

    tracing::info!("Appended TXT line for {} to zone file of {}", subdomain, zone_id);
    Ok(ZoneFileChange::Appended)
}
