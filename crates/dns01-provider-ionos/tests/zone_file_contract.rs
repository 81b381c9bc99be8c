//! Contract Test: Zone File Reconciler
//!
//! Constraints verified:
//! - Unexpected zone file content is rejected without an upload
//! - The record line is appended exactly once, existing text untouched
//! - Dry-run reads but never uploads
//! - Upload failures are reported, not swallowed

mod common;

use common::*;
use dns01_core::Error;
use dns01_provider_ionos::zone_file::{CHALLENGE_TTL, ZoneFileChange, ensure_record_line};

#[tokio::test]
async fn appends_line_to_zone_file() {
    let fake = FakeIonos::with_example_zone();

    let change = ensure_record_line(&fake, ZONE_ID, SUBDOMAIN, CHALLENGE_TTL, "abc123", false)
        .await
        .unwrap();

    assert_eq!(change, ZoneFileChange::Appended);
    assert_eq!(
        fake.uploads(),
        vec![";Zone: example.com\n\n_acme-challenge\t60\tIN\tTXT\t\"abc123\"".to_string()]
    );
}

#[tokio::test]
async fn present_line_is_not_uploaded_again() {
    let fake = FakeIonos::with_example_zone();

    ensure_record_line(&fake, ZONE_ID, SUBDOMAIN, CHALLENGE_TTL, "abc123", false)
        .await
        .unwrap();
    let second = ensure_record_line(&fake, ZONE_ID, SUBDOMAIN, CHALLENGE_TTL, "abc123", false)
        .await
        .unwrap();

    assert_eq!(second, ZoneFileChange::AlreadyPresent);
    assert_eq!(fake.get_zone_file_calls(), 2);
    assert_eq!(fake.put_zone_file_calls(), 1);
}

#[tokio::test]
async fn unexpected_header_fails_without_upload() {
    let fake = FakeIonos::with_example_zone();
    fake.set_zone_file(ZONE_ID, "{\"error\": \"maintenance\"}");

    let err = ensure_record_line(&fake, ZONE_ID, SUBDOMAIN, CHALLENGE_TTL, "abc123", false)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ZoneFileFormat(_)));
    assert!(err.to_string().contains("maintenance"));
    assert_eq!(fake.put_zone_file_calls(), 0);
}

#[tokio::test]
async fn missing_zone_file_is_reported() {
    let fake = FakeIonos::with_example_zone();

    let err = ensure_record_line(&fake, "zone-unknown", SUBDOMAIN, CHALLENGE_TTL, "abc123", false)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Http { ref status, .. } if status == "404 Not Found"));
    assert_eq!(fake.put_zone_file_calls(), 0);
}

#[tokio::test]
async fn dry_run_reads_but_does_not_upload() {
    let fake = FakeIonos::with_example_zone();

    let change = ensure_record_line(&fake, ZONE_ID, SUBDOMAIN, CHALLENGE_TTL, "abc123", true)
        .await
        .unwrap();

    assert_eq!(change, ZoneFileChange::WouldAppend);
    assert_eq!(fake.get_zone_file_calls(), 1);
    assert_eq!(fake.put_zone_file_calls(), 0);
    assert_eq!(fake.zone_file(ZONE_ID).as_deref(), Some(";Zone: example.com\n"));
}

#[tokio::test]
async fn upload_failure_is_propagated() {
    let fake = FakeIonos::with_example_zone().failing_uploads();

    let err = ensure_record_line(&fake, ZONE_ID, SUBDOMAIN, CHALLENGE_TTL, "abc123", false)
        .await
        .unwrap_err();

    match err {
        Error::Http { status, method, .. } => {
            assert_eq!(status, "500 Internal Server Error");
            assert_eq!(method, "PUT");
        }
        other => panic!("expected HTTP error, got {:?}", other),
    }
    assert_eq!(fake.zone_file(ZONE_ID).as_deref(), Some(";Zone: example.com\n"));
}
